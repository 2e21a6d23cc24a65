use partida_types::EntryId;

use crate::error::JournalResult;
use crate::records::{EntryDraft, JournalEntry, Posting};

/// Write boundary for journal posting.
pub trait JournalWriter: Send + Sync {
    /// Validate and append an entry, assigning its id and sequence number.
    fn post(&self, draft: EntryDraft) -> JournalResult<JournalEntry>;
}

/// Read boundary for journal queries.
///
/// Every method observes a single point-in-time state of the journal.
pub trait JournalReader: Send + Sync {
    /// All entries in posting order.
    fn all_entries(&self) -> JournalResult<Vec<JournalEntry>>;

    fn get(&self, id: &EntryId) -> JournalResult<Option<JournalEntry>>;

    fn entry_count(&self) -> JournalResult<u64>;

    /// Lines of one account in posting order, resolved through the account index.
    fn account_postings(&self, account: &str) -> JournalResult<Vec<Posting>>;
}
