//! High-level SDK for Partida.
//!
//! Provides [`Books`], the boundary a production system exposes: posting,
//! day book, account ledger and trial balance over one journal and one
//! chart of accounts, plus the JSON book file used to persist them.

pub mod book_file;
pub mod books;
pub mod error;

pub use book_file::BookFile;
pub use books::{BookSummary, Books};
pub use error::{SdkError, SdkResult};

// Re-export key types
pub use partida_journal::{
    EntryDraft, JournalConfig, JournalEntry, JournalLine, LedgerMovement, ReportFilter,
    TrialBalance, TrialBalanceRow,
};
pub use partida_types::{Account, AccountCode, AccountNature, ChartOfAccounts, Circuit, EntryId};
