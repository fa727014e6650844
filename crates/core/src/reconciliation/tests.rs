//! Property-based tests for reconciliation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use super::*;
use crate::cheques::ChequeStatus;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn input(bank: AccountId, statement_balance: Option<Decimal>) -> ReconciliationInput {
    ReconciliationInput {
        bank_account_id: bank,
        start_date: None,
        end_date: None,
        statement_balance,
        matched_transaction_ids: Vec::new(),
        reconciliation_date: day(31),
    }
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// adjusted = book - uncleared exactly, and the reconciled flag follows
    /// the tolerance against the chosen baseline.
    #[test]
    fn prop_adjusted_balance_and_flag(
        incomes in prop::collection::vec(amount_strategy(), 0..10),
        expenses in prop::collection::vec(amount_strategy(), 0..10),
        cheques in prop::collection::vec(amount_strategy(), 0..5),
        statement in (-10_000_000i64..10_000_000).prop_map(|n| Decimal::new(n, 2)),
        book_baseline in any::<bool>(),
    ) {
        let bank = AccountId::new();
        let transactions: Vec<Transaction> = incomes
            .iter()
            .map(|a| Transaction::income(bank, day(1), *a))
            .chain(expenses.iter().map(|a| Transaction::expense(bank, day(2), *a)))
            .collect();
        let cheques: Vec<IssuedCheque> = cheques
            .iter()
            .map(|a| IssuedCheque::new(bank, day(3), *a))
            .collect();
        let baseline = if book_baseline {
            ReconciliationBaseline::BookBalance
        } else {
            ReconciliationBaseline::AdjustedBankBalance
        };

        let report = ReconciliationService::reconcile(
            &input(bank, Some(statement)), transactions, cheques, baseline,
        ).unwrap();

        prop_assert_eq!(report.adjusted_bank_balance, report.book_balance - report.uncleared_amount);
        let reference = if book_baseline { report.book_balance } else { report.adjusted_bank_balance };
        let difference = statement - reference;
        prop_assert_eq!(report.difference, Some(difference));
        prop_assert_eq!(report.is_reconciled, Some(difference.abs() < dec!(0.01)));
        prop_assert_eq!(report.commit.is_some(), difference.abs() < dec!(0.01));
    }
}

#[test]
fn test_reconciliation_scenario() {
    let bank = AccountId::new();
    let transactions = vec![Transaction::income(bank, day(1), dec!(1000))];
    let cheques = vec![IssuedCheque::new(bank, day(5), dec!(150))];

    let report = ReconciliationService::reconcile(
        &input(bank, Some(dec!(850))),
        transactions,
        cheques,
        ReconciliationBaseline::AdjustedBankBalance,
    )
    .unwrap();

    assert_eq!(report.book_balance, dec!(1000));
    assert_eq!(report.uncleared_amount, dec!(150));
    assert_eq!(report.adjusted_bank_balance, dec!(850));
    assert_eq!(report.difference, Some(dec!(0)));
    assert_eq!(report.is_reconciled, Some(true));
    let commit = report.commit.unwrap();
    assert_eq!(commit.account_id, bank);
    assert_eq!(commit.statement_balance, dec!(850));
    assert_eq!(commit.reconciliation_date, day(31));
}

#[test]
fn test_book_balance_baseline() {
    let bank = AccountId::new();
    let transactions = vec![Transaction::income(bank, day(1), dec!(1000))];
    let cheques = vec![IssuedCheque::new(bank, day(5), dec!(150))];

    let report = ReconciliationService::reconcile(
        &input(bank, Some(dec!(850))),
        transactions,
        cheques,
        ReconciliationBaseline::BookBalance,
    )
    .unwrap();

    assert_eq!(report.difference, Some(dec!(-150)));
    assert_eq!(report.is_reconciled, Some(false));
    assert!(report.commit.is_none());
}

#[test]
fn test_only_uncleared_cheques_count() {
    let bank = AccountId::new();
    let cheques = vec![
        IssuedCheque::new(bank, day(1), dec!(10)),
        IssuedCheque::new(bank, day(2), dec!(20)).with_status(ChequeStatus::Presented),
        IssuedCheque::new(bank, day(3), dec!(40)).with_status(ChequeStatus::Cleared),
        IssuedCheque::new(bank, day(4), dec!(80)).with_status(ChequeStatus::Bounced),
    ];

    let report = ReconciliationService::reconcile(
        &input(bank, None),
        Vec::new(),
        cheques,
        ReconciliationBaseline::default(),
    )
    .unwrap();

    assert_eq!(report.uncleared_amount, dec!(30));
    assert_eq!(report.uncleared_cheques.len(), 2);
    assert_eq!(report.adjusted_bank_balance, dec!(-30));
}

#[test]
fn test_preview_has_no_difference_or_commit() {
    let bank = AccountId::new();
    let report = ReconciliationService::reconcile(
        &input(bank, None),
        vec![Transaction::expense(bank, day(1), dec!(5))],
        Vec::new(),
        ReconciliationBaseline::default(),
    )
    .unwrap();

    assert_eq!(report.book_balance, dec!(-5));
    assert!(report.difference.is_none());
    assert!(report.is_reconciled.is_none());
    assert!(report.commit.is_none());

    let value = serde_json::to_value(&report).unwrap();
    assert!(value.get("difference").is_none());
    assert!(value.get("is_reconciled").is_none());
    assert_eq!(value["baseline"], "adjusted_bank_balance");
}

#[test]
fn test_commit_carries_matched_transactions() {
    let bank = AccountId::new();
    let first = Transaction::income(bank, day(1), dec!(100));
    let second = Transaction::expense(bank, day(2), dec!(25));
    let mut request = input(bank, Some(dec!(75)));
    request.matched_transaction_ids = vec![first.id, second.id];

    let report = ReconciliationService::reconcile(
        &request,
        vec![first.clone(), second.clone()],
        Vec::new(),
        ReconciliationBaseline::default(),
    )
    .unwrap();

    assert_eq!(
        report.commit.unwrap().matched_transaction_ids,
        vec![first.id, second.id]
    );
}

#[test]
fn test_unknown_matched_transaction_is_rejected() {
    let bank = AccountId::new();
    let stranger = TransactionId::new();
    let mut request = input(bank, Some(dec!(0)));
    request.matched_transaction_ids = vec![stranger];

    let err = ReconciliationService::reconcile(
        &request,
        Vec::new(),
        Vec::new(),
        ReconciliationBaseline::default(),
    )
    .unwrap_err();

    assert_eq!(err, ReconciliationError::UnknownMatchedTransaction(stranger));
}

#[test]
fn test_within_one_cent_is_reconciled() {
    let bank = AccountId::new();
    let report = ReconciliationService::reconcile(
        &input(bank, Some(dec!(100.009))),
        vec![Transaction::income(bank, day(1), dec!(100))],
        Vec::new(),
        ReconciliationBaseline::default(),
    )
    .unwrap();
    assert_eq!(report.is_reconciled, Some(true));

    let report = ReconciliationService::reconcile(
        &input(bank, Some(dec!(100.01))),
        vec![Transaction::income(bank, day(1), dec!(100))],
        Vec::new(),
        ReconciliationBaseline::default(),
    )
    .unwrap();
    assert_eq!(report.is_reconciled, Some(false));
}
