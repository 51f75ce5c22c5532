//! Balance folds and statement generation.
//!
//! The fold over posted entries is the authoritative definition of an
//! account's balance; the cached balance on the account row is a projection
//! that must equal `balance_as_of(now)` after every successful write.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::LedgerEntry;

/// Signed balance of a party as of a point in time.
///
/// Folds every entry with `transaction_date <= as_of`, accumulating
/// `+amount` for debits and `-amount` for credits. Callers pass the entries
/// of a single party.
#[must_use]
pub fn balance_as_of(entries: &[LedgerEntry], as_of: DateTime<Utc>) -> Decimal {
    entries
        .iter()
        .filter(|e| e.transaction_date <= as_of)
        .map(LedgerEntry::signed_amount)
        .sum()
}

/// One statement line: an entry plus the balance after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    /// The posted entry.
    pub entry: LedgerEntry,
    /// Balance after applying this entry.
    pub running_balance: Decimal,
}

/// A party's activity over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStatement {
    /// Start of the range (inclusive).
    pub start: DateTime<Utc>,
    /// End of the range (inclusive).
    pub end: DateTime<Utc>,
    /// Balance carried in from before `start`.
    pub opening: Decimal,
    /// Entries in the range, ascending, each with its running balance.
    pub lines: Vec<StatementLine>,
    /// Balance after the last line (equals `opening` for an empty range).
    pub closing: Decimal,
}

/// Builds a statement for one party's entries over `[start, end]`.
///
/// The opening balance counts entries strictly before `start`; every entry
/// inside the range contributes one line with a running balance, ordered by
/// transaction date (write order breaks ties). The closing balance equals
/// `balance_as_of(end)`.
#[must_use]
pub fn statement(
    entries: &[LedgerEntry],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AccountStatement {
    let opening: Decimal = entries
        .iter()
        .filter(|e| e.transaction_date < start)
        .map(LedgerEntry::signed_amount)
        .sum();

    let mut in_range: Vec<&LedgerEntry> = entries
        .iter()
        .filter(|e| e.transaction_date >= start && e.transaction_date <= end)
        .collect();
    in_range.sort_by_key(|e| (e.transaction_date, e.created_at));

    let mut running = opening;
    let lines: Vec<StatementLine> = in_range
        .into_iter()
        .map(|entry| {
            running += entry.signed_amount();
            StatementLine {
                entry: entry.clone(),
                running_balance: running,
            }
        })
        .collect();

    AccountStatement {
        start,
        end,
        opening,
        lines,
        closing: running,
    }
}
