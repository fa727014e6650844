//! Current/non-current placement of balance sheet accounts.
//!
//! The explicit `classification` tag on an account wins. Legacy accounts
//! without a tag fall back to a name heuristic.

use crate::ledger::{Account, AccountClassification, AccountType};

/// Name fragments that mark a legacy asset account as current.
const CURRENT_ASSET_MARKERS: [&str; 3] = ["cash", "bank", "receivable"];

/// Name fragments that mark a legacy liability account as current.
const CURRENT_LIABILITY_MARKERS: [&str; 2] = ["payable", "accrued"];

/// Resolves the classification of an asset or liability account.
///
/// Returns `None` for other account types, which are not sub-classified.
#[must_use]
pub fn classify(account: &Account, kind: AccountType) -> Option<AccountClassification> {
    let markers: &[&str] = match kind {
        AccountType::Asset => &CURRENT_ASSET_MARKERS,
        AccountType::Liability => &CURRENT_LIABILITY_MARKERS,
        AccountType::Equity | AccountType::Revenue | AccountType::Expense => return None,
    };

    Some(
        account
            .classification
            .unwrap_or_else(|| heuristic(&account.name, markers)),
    )
}

fn heuristic(name: &str, markers: &[&str]) -> AccountClassification {
    let name = name.to_lowercase();
    if markers.iter().any(|m| name.contains(m)) {
        AccountClassification::Current
    } else {
        AccountClassification::NonCurrent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case("Cash on Hand", "asset", AccountClassification::Current)]
    #[case("Main BANK Account", "asset", AccountClassification::Current)]
    #[case("Accounts Receivable", "asset", AccountClassification::Current)]
    #[case("Office Equipment", "asset", AccountClassification::NonCurrent)]
    #[case("Accounts Payable", "liability", AccountClassification::Current)]
    #[case("Accrued Wages", "liability", AccountClassification::Current)]
    #[case("Long-term Loan", "liability", AccountClassification::NonCurrent)]
    fn test_heuristic_for_untagged_accounts(
        #[case] name: &str,
        #[case] account_type: &str,
        #[case] expected: AccountClassification,
    ) {
        let account = Account::new("1", name, account_type, Decimal::ZERO);
        let kind = account.kind().unwrap();
        assert_eq!(classify(&account, kind), Some(expected));
    }

    #[test]
    fn test_explicit_tag_overrides_name() {
        let account = Account::new("1500", "Bank Guarantee Deposit", "asset", Decimal::ZERO)
            .with_classification(AccountClassification::NonCurrent);
        assert_eq!(
            classify(&account, AccountType::Asset),
            Some(AccountClassification::NonCurrent)
        );
    }

    #[test]
    fn test_equity_is_not_classified() {
        let account = Account::new("3000", "Owner's Capital", "equity", Decimal::ZERO);
        assert_eq!(classify(&account, AccountType::Equity), None);
    }
}
