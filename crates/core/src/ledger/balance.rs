//! Running balance calculation.
//!
//! Accumulation always runs oldest to newest. Newest-first presentation is a
//! reversal of the finished sequence, never a reverse accumulation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Presentation order for balanced sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayOrder {
    /// Oldest first.
    Chronological,
    /// Newest first.
    #[default]
    NewestFirst,
}

/// Running balance state after one entry.
///
/// - `current_balance[N] = previous_balance[N] + change[N]`
/// - `previous_balance[N] = current_balance[N-1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// 1-based position in chronological order.
    pub sequence: u64,
    /// Balance before this entry.
    pub previous_balance: Decimal,
    /// Balance after this entry.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// State for the first entry of a sequence.
    #[must_use]
    pub fn first_entry(opening_balance: Decimal, change: Decimal) -> Self {
        Self {
            sequence: 1,
            previous_balance: opening_balance,
            current_balance: opening_balance + change,
        }
    }

    /// State for the entry following `previous`.
    #[must_use]
    pub fn next_entry(previous: &Self, change: Decimal) -> Self {
        Self {
            sequence: previous.sequence + 1,
            previous_balance: previous.current_balance,
            current_balance: previous.current_balance + change,
        }
    }
}

/// An entry annotated with the balance after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balanced<T> {
    /// The entry.
    #[serde(flatten)]
    pub entry: T,
    /// Balance after applying this entry.
    pub balance: Decimal,
}

/// Accumulates `contribution` over `entries` in the order given.
///
/// The caller is responsible for passing entries oldest first.
pub fn running_balances<T, F>(
    entries: impl IntoIterator<Item = T>,
    opening_balance: Decimal,
    contribution: F,
) -> Vec<Balanced<T>>
where
    F: Fn(&T) -> Decimal,
{
    let mut state: Option<RunningBalance> = None;
    entries
        .into_iter()
        .map(|entry| {
            let change = contribution(&entry);
            let next = match &state {
                None => RunningBalance::first_entry(opening_balance, change),
                Some(previous) => RunningBalance::next_entry(previous, change),
            };
            state = Some(next);
            Balanced {
                entry,
                balance: next.current_balance,
            }
        })
        .collect()
}

/// Sorts by date (stable), accumulates chronologically, then applies `order`.
pub fn dated_running_balances<T, D, F>(
    entries: Vec<T>,
    opening_balance: Decimal,
    date_of: D,
    contribution: F,
    order: DisplayOrder,
) -> Vec<Balanced<T>>
where
    D: Fn(&T) -> NaiveDate,
    F: Fn(&T) -> Decimal,
{
    let mut entries = entries;
    entries.sort_by_key(|e| date_of(e));
    let mut balanced = running_balances(entries, opening_balance, contribution);
    if order == DisplayOrder::NewestFirst {
        balanced.reverse();
    }
    balanced
}
