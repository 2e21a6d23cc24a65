use chrono::NaiveDate;
use partida_types::{AccountCode, Circuit, EntryId};
use rust_decimal::Decimal;

/// Errors produced by journal operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JournalError {
    #[error("entry has no lines")]
    EmptyEntry,

    #[error("line {line} carries both a debit and a credit")]
    MixedLine { line: usize },

    #[error("line {line} has a negative amount")]
    NegativeAmount { line: usize },

    #[error("line {line} has a blank account code")]
    BlankAccountCode { line: usize },

    #[error("amounts overflow the decimal range")]
    AmountOverflow,

    #[error("entry is unbalanced: debits ({debits}) != credits ({credits})")]
    Unbalanced { debits: Decimal, credits: Decimal },

    #[error("invalid date range: from={from}, to={to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    #[error("no entry carries circuit {0}")]
    UnknownCircuit(Circuit),

    #[error("account {0} is not in the chart of accounts")]
    UnknownAccount(AccountCode),

    #[error("entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("integrity violation at entry #{number}: {reason}")]
    IntegrityViolation { number: u64, reason: String },

    #[error("journal lock poisoned")]
    LockPoisoned,
}

pub type JournalResult<T> = Result<T, JournalError>;
