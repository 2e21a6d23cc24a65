//! Double-entry journal core for Partida.
//!
//! This crate is the heart of Partida. It provides:
//! - Journal entry and line types with the balanced-entry invariant
//! - `JournalWriter` / `JournalReader` trait boundaries
//! - `InMemoryJournal`, an append-only store with an account index
//! - The day book (`diario`), newest first
//! - The account ledger (`mayor`) with running balance
//! - The trial balance (`sumas_y_saldos`) over a validated `ReportFilter`
//! - Integrity validation for journals restored from storage

pub mod config;
pub mod day_book;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod memory;
pub mod records;
pub mod traits;
pub mod trial_balance;
pub mod validation;

pub use config::{BalanceConvention, CircuitPolicy, JournalConfig, OpeningBalance};
pub use day_book::diario;
pub use error::{JournalError, JournalResult};
pub use filter::ReportFilter;
pub use ledger::{closing_balance, mayor, mayor_from_postings, LedgerMovement};
pub use memory::InMemoryJournal;
pub use records::{EntryDraft, JournalEntry, JournalLine, LineTotals, Posting};
pub use traits::{JournalReader, JournalWriter};
pub use trial_balance::{
    sumas_y_saldos, sumas_y_saldos_with, Figures, TrialBalance, TrialBalanceRow,
    TrialBalanceTotals,
};
pub use validation::{validate_lines, JournalValidator, ValidationReport, Violation, ViolationKind};
