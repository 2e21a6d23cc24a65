use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use partida_types::{AccountCode, EntryId};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{JournalError, JournalResult};
use crate::records::{EntryDraft, JournalEntry, Posting};
use crate::traits::{JournalReader, JournalWriter};
use crate::validation::{validate_lines, JournalValidator};

/// In-memory journal for tests, local tools, and embedding.
///
/// An append-only entry log plus two secondary indexes (by id and by
/// account) that are updated under the same write lock as the append, so a
/// reader never sees an entry without its index rows.
///
/// The sum of all posted debits (equal to all posted credits) must fit in a
/// `Decimal`. Every account balance, running or per period, lies within that
/// sum, so views over the journal cannot overflow.
#[derive(Default)]
pub struct InMemoryJournal {
    inner: RwLock<JournalState>,
}

#[derive(Default)]
struct JournalState {
    entries: Vec<JournalEntry>,
    by_id: HashMap<EntryId, usize>,
    by_account: HashMap<AccountCode, Vec<LineRef>>,
    /// Total debits posted so far.
    volume: Decimal,
}

/// Position of one line inside the entry log.
#[derive(Clone, Copy, Debug)]
struct LineRef {
    entry: usize,
    line: usize,
}

impl JournalState {
    fn next_number(&self) -> u64 {
        (self.entries.len() + 1) as u64
    }

    fn append(&mut self, entry: JournalEntry) -> JournalResult<()> {
        if self.by_id.contains_key(&entry.id) {
            return Err(JournalError::IntegrityViolation {
                number: entry.number,
                reason: format!("entry id {} already used", entry.id),
            });
        }
        let volume = self
            .volume
            .checked_add(entry.totals()?.debits)
            .ok_or(JournalError::AmountOverflow)?;

        let position = self.entries.len();
        for (line, l) in entry.lines.iter().enumerate() {
            self.by_account
                .entry(l.account.clone())
                .or_default()
                .push(LineRef {
                    entry: position,
                    line,
                });
        }
        self.by_id.insert(entry.id, position);
        self.entries.push(entry);
        self.volume = volume;
        Ok(())
    }

    fn post_draft(&mut self, draft: EntryDraft) -> JournalResult<JournalEntry> {
        if let Err(e) = validate_lines(&draft.lines) {
            warn!(error = %e, concept = %draft.concept, "entry rejected");
            return Err(e);
        }

        let entry = JournalEntry::from_draft(draft, EntryId::new(), self.next_number());
        if let Err(e) = self.append(entry.clone()) {
            warn!(error = %e, concept = %entry.concept, "entry rejected");
            return Err(e);
        }
        debug!(
            number = entry.number,
            id = %entry.id,
            lines = entry.lines.len(),
            "entry posted"
        );
        Ok(entry)
    }
}

impl InMemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a journal from previously persisted entries.
    ///
    /// Entries must be in posting order, numbered contiguously from 1, carry
    /// unique ids, and each be structurally valid and balanced.
    pub fn restore(entries: Vec<JournalEntry>) -> JournalResult<Self> {
        let report = JournalValidator::validate_entries(&entries);
        if let Some(violation) = report.violations.first() {
            warn!(
                number = violation.number,
                violations = report.violations.len(),
                "journal restore failed"
            );
            return Err(JournalError::IntegrityViolation {
                number: violation.number,
                reason: violation.description.clone(),
            });
        }

        let mut state = JournalState::default();
        for entry in entries {
            state.append(entry)?;
        }
        debug!(entries = state.entries.len(), "journal restored");

        Ok(Self {
            inner: RwLock::new(state),
        })
    }

    /// Post the entry that offsets `id`, dated `date`.
    ///
    /// The lookup and the append happen under one write lock.
    pub fn reverse(&self, id: &EntryId, date: NaiveDate) -> JournalResult<JournalEntry> {
        let mut state = self.write_state()?;
        let draft = state
            .by_id
            .get(id)
            .map(|&i| state.entries[i].reversal(date))
            .ok_or(JournalError::EntryNotFound(*id))?;
        state.post_draft(draft)
    }

    fn read_state(&self) -> JournalResult<RwLockReadGuard<'_, JournalState>> {
        self.inner.read().map_err(|_| JournalError::LockPoisoned)
    }

    fn write_state(&self) -> JournalResult<RwLockWriteGuard<'_, JournalState>> {
        self.inner.write().map_err(|_| JournalError::LockPoisoned)
    }
}

impl JournalWriter for InMemoryJournal {
    fn post(&self, draft: EntryDraft) -> JournalResult<JournalEntry> {
        let mut state = self.write_state()?;
        state.post_draft(draft)
    }
}

impl JournalReader for InMemoryJournal {
    fn all_entries(&self) -> JournalResult<Vec<JournalEntry>> {
        let state = self.read_state()?;
        Ok(state.entries.clone())
    }

    fn get(&self, id: &EntryId) -> JournalResult<Option<JournalEntry>> {
        let state = self.read_state()?;
        Ok(state.by_id.get(id).map(|&i| state.entries[i].clone()))
    }

    fn entry_count(&self) -> JournalResult<u64> {
        let state = self.read_state()?;
        Ok(state.entries.len() as u64)
    }

    fn account_postings(&self, account: &str) -> JournalResult<Vec<Posting>> {
        let state = self.read_state()?;
        let postings = state
            .by_account
            .get(account)
            .map(|refs| {
                refs.iter()
                    .map(|r| {
                        let entry = &state.entries[r.entry];
                        Posting::new(entry, &entry.lines[r.line])
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(postings)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    fn transfer(d: u32, amount: Decimal) -> EntryDraft {
        EntryDraft::new(date(d), format!("transfer {amount}"))
            .debit("A", amount)
            .credit("B", amount)
    }

    #[test]
    fn post_assigns_contiguous_numbers() {
        let journal = InMemoryJournal::new();
        let first = journal.post(transfer(3, dec!(1))).unwrap();
        let second = journal.post(transfer(1, dec!(2))).unwrap();

        assert_eq!(first.number, 1);
        assert_eq!(second.number, 2);
        assert_ne!(first.id, second.id);

        let all = journal.all_entries().unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[test]
    fn rejected_post_leaves_journal_unchanged() {
        let journal = InMemoryJournal::new();
        journal.post(transfer(1, dec!(1000))).unwrap();

        let unbalanced = EntryDraft::new(date(2), "bad")
            .debit("A", dec!(100))
            .credit("B", dec!(90));
        let err = journal.post(unbalanced).unwrap_err();
        assert!(matches!(err, JournalError::Unbalanced { .. }));
        assert_eq!(journal.entry_count().unwrap(), 1);
        assert!(journal.account_postings("A").unwrap().len() == 1);

        let err = journal.post(EntryDraft::new(date(2), "empty")).unwrap_err();
        assert_eq!(err, JournalError::EmptyEntry);

        // Numbers continue without a gap after rejections.
        let next = journal.post(transfer(3, dec!(5))).unwrap();
        assert_eq!(next.number, 2);
    }

    #[test]
    fn overflowing_amounts_are_rejected_without_poisoning() {
        let journal = InMemoryJournal::new();
        let huge = EntryDraft::new(date(1), "huge")
            .debit("A", Decimal::MAX)
            .debit("A", Decimal::MAX)
            .credit("B", Decimal::MAX)
            .credit("B", Decimal::MAX);
        assert_eq!(journal.post(huge).unwrap_err(), JournalError::AmountOverflow);
        assert_eq!(journal.entry_count().unwrap(), 0);

        let next = journal.post(transfer(2, dec!(10))).unwrap();
        assert_eq!(next.number, 1);
    }

    #[test]
    fn journal_volume_is_capped() {
        let journal = InMemoryJournal::new();
        let max = EntryDraft::new(date(1), "max")
            .debit("A", Decimal::MAX)
            .credit("B", Decimal::MAX);
        journal.post(max.clone()).unwrap();

        assert_eq!(journal.post(max).unwrap_err(), JournalError::AmountOverflow);
        assert_eq!(journal.post(transfer(2, dec!(1))).unwrap_err(), JournalError::AmountOverflow);
        assert_eq!(journal.entry_count().unwrap(), 1);
        assert_eq!(journal.account_postings("A").unwrap().len(), 1);

        // The offsetting entry is still over the cap.
        let first = journal.all_entries().unwrap()[0].id;
        assert!(journal.reverse(&first, date(2)).is_err());
    }

    #[test]
    fn get_finds_posted_entry() {
        let journal = InMemoryJournal::new();
        let posted = journal.post(transfer(1, dec!(7))).unwrap();
        assert_eq!(journal.get(&posted.id).unwrap(), Some(posted));
        assert_eq!(journal.get(&EntryId::new()).unwrap(), None);
    }

    #[test]
    fn account_index_follows_posting_order() {
        let journal = InMemoryJournal::new();
        journal.post(transfer(5, dec!(1))).unwrap();
        journal
            .post(
                EntryDraft::new(date(1), "split")
                    .debit("A", dec!(2))
                    .debit("A", dec!(3))
                    .credit("C", dec!(5)),
            )
            .unwrap();

        let postings = journal.account_postings("A").unwrap();
        let seen: Vec<_> = postings.iter().map(|p| (p.number, p.line.debit)).collect();
        assert_eq!(seen, vec![(1, dec!(1)), (2, dec!(2)), (2, dec!(3))]);
        assert!(journal.account_postings("Z").unwrap().is_empty());
    }

    #[test]
    fn unknown_account_codes_are_accepted() {
        let journal = InMemoryJournal::new();
        let posted = journal
            .post(
                EntryDraft::new(date(1), "new account")
                    .debit("9.9.99", dec!(4))
                    .credit("A", dec!(4)),
            )
            .unwrap();
        assert_eq!(posted.number, 1);
    }

    #[test]
    fn restore_round_trips_entries() {
        let journal = InMemoryJournal::new();
        journal.post(transfer(1, dec!(1))).unwrap();
        journal.post(transfer(2, dec!(2))).unwrap();
        let entries = journal.all_entries().unwrap();

        let restored = InMemoryJournal::restore(entries.clone()).unwrap();
        assert_eq!(restored.all_entries().unwrap(), entries);
        assert_eq!(restored.account_postings("B").unwrap().len(), 2);

        let next = restored.post(transfer(3, dec!(3))).unwrap();
        assert_eq!(next.number, 3);
    }

    #[test]
    fn restore_rejects_sequence_gap() {
        let journal = InMemoryJournal::new();
        journal.post(transfer(1, dec!(1))).unwrap();
        journal.post(transfer(2, dec!(2))).unwrap();
        let mut entries = journal.all_entries().unwrap();
        entries.remove(0);

        let err = InMemoryJournal::restore(entries).err().unwrap();
        assert!(matches!(err, JournalError::IntegrityViolation { number: 2, .. }));
    }

    #[test]
    fn restore_rejects_unbalanced_entry() {
        let journal = InMemoryJournal::new();
        journal.post(transfer(1, dec!(1))).unwrap();
        let mut entries = journal.all_entries().unwrap();
        entries[0].lines[0].debit = dec!(2);

        assert!(InMemoryJournal::restore(entries).is_err());
    }

    #[test]
    fn reverse_posts_offsetting_entry() {
        let journal = InMemoryJournal::new();
        let original = journal.post(transfer(1, dec!(80))).unwrap();
        let reversal = journal.reverse(&original.id, date(4)).unwrap();

        assert_eq!(reversal.number, 2);
        assert_eq!(reversal.date, date(4));
        let net: Decimal = journal
            .account_postings("A")
            .unwrap()
            .iter()
            .map(|p| p.line.net())
            .sum();
        assert_eq!(net, dec!(0));
    }

    #[test]
    fn reverse_unknown_entry_fails() {
        let journal = InMemoryJournal::new();
        let id = EntryId::new();
        assert_eq!(
            journal.reverse(&id, date(1)).unwrap_err(),
            JournalError::EntryNotFound(id)
        );
    }

    fn assert_consistent(entries: &[JournalEntry]) {
        for (index, entry) in entries.iter().enumerate() {
            assert_eq!(entry.number, (index + 1) as u64);
            assert!(entry.is_balanced());
        }
    }

    #[test]
    fn concurrent_posts_get_unique_numbers() {
        let journal = Arc::new(InMemoryJournal::new());
        std::thread::scope(|scope| {
            for t in 0..8u32 {
                let journal = Arc::clone(&journal);
                scope.spawn(move || {
                    for _ in 0..25 {
                        journal.post(transfer(1 + t, dec!(1))).unwrap();
                    }
                });
            }
            for _ in 0..2 {
                let journal = Arc::clone(&journal);
                scope.spawn(move || {
                    let mut seen = 0;
                    while seen < 200 {
                        let snapshot = journal.all_entries().unwrap();
                        assert!(snapshot.len() >= seen);
                        assert_consistent(&snapshot);
                        let indexed: usize = ["A", "B"]
                            .iter()
                            .map(|code| journal.account_postings(code).unwrap().len())
                            .sum();
                        assert!(indexed >= 2 * snapshot.len());
                        seen = snapshot.len();
                    }
                });
            }
        });

        let entries = journal.all_entries().unwrap();
        assert_eq!(entries.len(), 200);
        assert_consistent(&entries);
    }
}
