use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::{JournalError, JournalResult};
use crate::records::{JournalEntry, JournalLine, LineTotals};
use crate::traits::JournalReader;

/// Structural and balance checks applied to every entry before it is stored.
///
/// Checks run in order: empty entry, per-line structure, then balance. The
/// first failure is returned; on success, the entry's totals.
pub fn validate_lines(lines: &[JournalLine]) -> JournalResult<LineTotals> {
    if lines.is_empty() {
        return Err(JournalError::EmptyEntry);
    }

    for (line, l) in lines.iter().enumerate() {
        if l.account.is_blank() {
            return Err(JournalError::BlankAccountCode { line });
        }
        if l.debit < Decimal::ZERO || l.credit < Decimal::ZERO {
            return Err(JournalError::NegativeAmount { line });
        }
        if !l.debit.is_zero() && !l.credit.is_zero() {
            return Err(JournalError::MixedLine { line });
        }
    }

    let totals = LineTotals::of(lines)?;
    if !totals.is_balanced() {
        return Err(JournalError::Unbalanced {
            debits: totals.debits,
            credits: totals.credits,
        });
    }

    Ok(totals)
}

/// Result of journal validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub entry_count: u64,
    pub sequence_contiguous: bool,
    pub ids_unique: bool,
    pub entries_valid: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub number: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    SequenceGap,
    DuplicateId,
    InvalidEntry,
    /// Total debits of the journal leave the decimal range.
    VolumeOverflow,
}

/// Journal integrity validator.
///
/// Used on journals rebuilt from persistent storage, where the invariants
/// enforced by `post` may have been bypassed.
pub struct JournalValidator;

impl JournalValidator {
    /// Validate every entry currently held by `reader`.
    pub fn validate<R: JournalReader>(reader: &R) -> JournalResult<ValidationReport> {
        let entries = reader.all_entries()?;
        Ok(Self::validate_entries(&entries))
    }

    /// Validate an entry sequence that is expected in posting order.
    pub fn validate_entries(entries: &[JournalEntry]) -> ValidationReport {
        let mut violations = Vec::new();
        let mut sequence_contiguous = true;
        let mut ids_unique = true;
        let mut entries_valid = true;
        let mut seen_ids = HashSet::new();
        let mut volume = Some(Decimal::ZERO);

        for (index, entry) in entries.iter().enumerate() {
            let expected = (index + 1) as u64;
            if entry.number != expected {
                sequence_contiguous = false;
                violations.push(Violation {
                    number: entry.number,
                    kind: ViolationKind::SequenceGap,
                    description: format!("expected entry #{expected}, got #{}", entry.number),
                });
            }

            if !seen_ids.insert(entry.id) {
                ids_unique = false;
                violations.push(Violation {
                    number: entry.number,
                    kind: ViolationKind::DuplicateId,
                    description: format!("entry id {} already used", entry.id),
                });
            }

            match validate_lines(&entry.lines) {
                Ok(totals) => {
                    let had_room = volume.is_some();
                    volume = volume.and_then(|v| v.checked_add(totals.debits));
                    if had_room && volume.is_none() {
                        entries_valid = false;
                        violations.push(Violation {
                            number: entry.number,
                            kind: ViolationKind::VolumeOverflow,
                            description: JournalError::AmountOverflow.to_string(),
                        });
                    }
                }
                Err(e) => {
                    entries_valid = false;
                    violations.push(Violation {
                        number: entry.number,
                        kind: ViolationKind::InvalidEntry,
                        description: e.to_string(),
                    });
                }
            }
        }

        ValidationReport {
            entry_count: entries.len() as u64,
            sequence_contiguous,
            ids_unique,
            entries_valid,
            violations,
        }
    }
}
