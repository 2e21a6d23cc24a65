use chrono::NaiveDate;
use partida_types::{AccountCode, Circuit, EntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{JournalError, JournalResult};

/// One debit or credit movement against a single account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    #[serde(rename = "accountCode")]
    pub account: AccountCode,
    #[serde(default)]
    pub debit: Decimal,
    #[serde(default)]
    pub credit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl JournalLine {
    pub fn debit(account: impl Into<AccountCode>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            debit: amount,
            credit: Decimal::ZERO,
            description: None,
        }
    }

    pub fn credit(account: impl Into<AccountCode>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            debit: Decimal::ZERO,
            credit: amount,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Lines with neither a debit nor a credit move nothing.
    pub fn is_noop(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }

    /// Debit-positive effect of the line on its account.
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }

    /// The same line with debit and credit swapped.
    pub fn offset(&self) -> Self {
        Self {
            account: self.account.clone(),
            debit: self.credit,
            credit: self.debit,
            description: self.description.clone(),
        }
    }
}

/// Sum of debits and credits over a set of lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineTotals {
    pub debits: Decimal,
    pub credits: Decimal,
}

impl LineTotals {
    /// Column sums of `lines`; `AmountOverflow` when either leaves the
    /// decimal range.
    pub fn of<'a>(lines: impl IntoIterator<Item = &'a JournalLine>) -> JournalResult<Self> {
        lines.into_iter().try_fold(Self::default(), |acc, line| {
            Ok(Self {
                debits: acc
                    .debits
                    .checked_add(line.debit)
                    .ok_or(JournalError::AmountOverflow)?,
                credits: acc
                    .credits
                    .checked_add(line.credit)
                    .ok_or(JournalError::AmountOverflow)?,
            })
        })
    }

    pub fn is_balanced(&self) -> bool {
        self.debits == self.credits
    }
}

/// An entry as submitted for posting: everything but id and number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub date: NaiveDate,
    pub concept: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit: Option<Circuit>,
    #[serde(default)]
    pub lines: Vec<JournalLine>,
}

impl EntryDraft {
    pub fn new(date: NaiveDate, concept: impl Into<String>) -> Self {
        Self {
            date,
            concept: concept.into(),
            circuit: None,
            lines: Vec::new(),
        }
    }

    pub fn in_circuit(mut self, circuit: Circuit) -> Self {
        self.circuit = Some(circuit);
        self
    }

    pub fn line(mut self, line: JournalLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn debit(self, account: impl Into<AccountCode>, amount: Decimal) -> Self {
        self.line(JournalLine::debit(account, amount))
    }

    pub fn credit(self, account: impl Into<AccountCode>, amount: Decimal) -> Self {
        self.line(JournalLine::credit(account, amount))
    }

    pub fn totals(&self) -> JournalResult<LineTotals> {
        LineTotals::of(&self.lines)
    }
}

/// A posted, balanced journal entry.
///
/// Entries handed out by a store are copies; the posted original can never
/// be edited. Corrections are posted as new offsetting entries (see
/// [`JournalEntry::reversal`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    /// Posting order, starting at 1. Breaks ties between same-date entries.
    pub number: u64,
    pub date: NaiveDate,
    pub concept: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit: Option<Circuit>,
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    pub(crate) fn from_draft(draft: EntryDraft, id: EntryId, number: u64) -> Self {
        Self {
            id,
            number,
            date: draft.date,
            concept: draft.concept,
            circuit: draft.circuit,
            lines: draft.lines,
        }
    }

    pub fn totals(&self) -> JournalResult<LineTotals> {
        LineTotals::of(&self.lines)
    }

    pub fn is_balanced(&self) -> bool {
        self.totals().is_ok_and(|t| t.is_balanced())
    }

    pub fn in_circuit(&self, circuit: &Circuit) -> bool {
        self.circuit.as_ref() == Some(circuit)
    }

    /// Lines of this entry touching `account`, in entry order.
    pub fn lines_for<'a>(&'a self, account: &'a str) -> impl Iterator<Item = &'a JournalLine> {
        self.lines.iter().filter(move |l| l.account.as_str() == account)
    }

    /// Draft of the entry that cancels this one, dated `date`.
    pub fn reversal(&self, date: NaiveDate) -> EntryDraft {
        EntryDraft {
            date,
            concept: format!("Reversal of #{}: {}", self.number, self.concept),
            circuit: self.circuit.clone(),
            lines: self.lines.iter().map(JournalLine::offset).collect(),
        }
    }
}

/// One account's line together with the header of its owning entry.
///
/// Produced by the store's account index, in posting order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Posting {
    pub entry_id: EntryId,
    pub number: u64,
    pub date: NaiveDate,
    pub concept: String,
    pub line: JournalLine,
}

impl Posting {
    pub fn new(entry: &JournalEntry, line: &JournalLine) -> Self {
        Self {
            entry_id: entry.id,
            number: entry.number,
            date: entry.date,
            concept: entry.concept.clone(),
            line: line.clone(),
        }
    }
}
