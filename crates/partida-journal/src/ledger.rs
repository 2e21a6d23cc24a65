use chrono::NaiveDate;
use partida_types::{AccountNature, EntryId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::records::{JournalEntry, Posting};

/// One line of an account ledger with the running balance after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerMovement {
    pub entry_id: EntryId,
    pub date: NaiveDate,
    pub number: u64,
    pub concept: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub balance: Decimal,
}

impl LedgerMovement {
    /// Re-express the running balance in the sign convention of `nature`.
    pub fn presented(mut self, nature: AccountNature) -> Self {
        self.balance = nature.present(self.balance);
        self
    }
}

/// Movement history of `account`, oldest first, with a debit-positive
/// running balance starting from zero.
///
/// Lines with neither debit nor credit are skipped. Ordering is by entry
/// date, then entry number, then line position within the entry. The
/// projection knows nothing about account nature; callers showing a
/// credit-normal account flip the sign with [`LedgerMovement::presented`].
///
/// `entries` are expected to come from a journal, whose total volume fits
/// in a `Decimal` (see [`InMemoryJournal`](crate::memory::InMemoryJournal));
/// every running balance then stays within range.
pub fn mayor(entries: &[JournalEntry], account: &str) -> Vec<LedgerMovement> {
    let postings = entries
        .iter()
        .flat_map(|entry| {
            entry
                .lines_for(account)
                .map(move |line| Posting::new(entry, line))
        })
        .collect();
    mayor_from_postings(postings)
}

/// Same projection as [`mayor`], fed from the store's account index.
pub fn mayor_from_postings(mut postings: Vec<Posting>) -> Vec<LedgerMovement> {
    postings.retain(|p| !p.line.is_noop());
    // Stable: lines of one entry keep their entry order.
    postings.sort_by_key(|p| (p.date, p.number));

    let mut balance = Decimal::ZERO;
    postings
        .into_iter()
        .map(|p| {
            balance += p.line.net();
            LedgerMovement {
                entry_id: p.entry_id,
                date: p.date,
                number: p.number,
                concept: p.concept,
                debit: p.line.debit,
                credit: p.line.credit,
                balance,
            }
        })
        .collect()
}

/// Balance after the last movement, zero for an idle account.
pub fn closing_balance(movements: &[LedgerMovement]) -> Decimal {
    movements.last().map_or(Decimal::ZERO, |m| m.balance)
}
