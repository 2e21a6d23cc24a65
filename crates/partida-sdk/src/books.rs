use std::collections::BTreeSet;

use chrono::NaiveDate;
use partida_journal::{
    diario, mayor_from_postings, sumas_y_saldos_with, validate_lines, BalanceConvention,
    EntryDraft, InMemoryJournal, JournalConfig, JournalEntry, JournalError, JournalReader,
    JournalValidator, JournalWriter, LedgerMovement, LineTotals, ReportFilter, TrialBalance,
    ValidationReport,
};
use partida_types::{AccountCode, ChartOfAccounts, Circuit, EntryId};
use rust_decimal::Decimal;
use tracing::debug;

use crate::book_file::BookFile;
use crate::error::SdkResult;

/// Overview of a set of books, for integrity checks and status output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookSummary {
    pub entry_count: u64,
    pub account_count: usize,
    pub total_debits: Option<Decimal>,
    pub total_credits: Option<Decimal>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Codes posted to but absent from the chart.
    pub unlisted_accounts: Vec<AccountCode>,
    pub circuits: Vec<Circuit>,
    pub validation: ValidationReport,
}

impl BookSummary {
    /// Summarize `entries` without trusting them.
    ///
    /// Every violation is collected in `validation`. Totals cover the
    /// structurally valid entries and are `None` when they leave the decimal
    /// range.
    pub fn of(chart: &ChartOfAccounts, entries: &[JournalEntry]) -> Self {
        let mut unlisted = BTreeSet::new();
        let mut circuits = BTreeSet::new();
        let mut totals = Some(LineTotals::default());

        for entry in entries {
            if let Ok(entry_totals) = validate_lines(&entry.lines) {
                totals = totals.and_then(|t| {
                    Some(LineTotals {
                        debits: t.debits.checked_add(entry_totals.debits)?,
                        credits: t.credits.checked_add(entry_totals.credits)?,
                    })
                });
            }
            if let Some(circuit) = &entry.circuit {
                circuits.insert(circuit.clone());
            }
            for line in &entry.lines {
                if !chart.contains(line.account.as_str()) {
                    unlisted.insert(line.account.clone());
                }
            }
        }

        Self {
            entry_count: entries.len() as u64,
            account_count: chart.len(),
            total_debits: totals.map(|t| t.debits),
            total_credits: totals.map(|t| t.credits),
            first_date: entries.iter().map(|e| e.date).min(),
            last_date: entries.iter().map(|e| e.date).max(),
            unlisted_accounts: unlisted.into_iter().collect(),
            circuits: circuits.into_iter().collect(),
            validation: JournalValidator::validate_entries(entries),
        }
    }
}

/// A journal bound to its chart of accounts and reporting configuration.
pub struct Books {
    chart: ChartOfAccounts,
    journal: InMemoryJournal,
    config: JournalConfig,
}

impl Books {
    /// Empty books over `chart` with the default configuration.
    pub fn new(chart: ChartOfAccounts) -> Self {
        Self::with_config(chart, JournalConfig::default())
    }

    pub fn with_config(chart: ChartOfAccounts, config: JournalConfig) -> Self {
        Self {
            chart,
            journal: InMemoryJournal::new(),
            config,
        }
    }

    /// Rebuild books from a persisted file, re-checking every entry.
    pub fn from_book_file(file: BookFile, config: JournalConfig) -> SdkResult<Self> {
        let journal = InMemoryJournal::restore(file.entries)?;
        Ok(Self {
            chart: file.chart,
            journal,
            config,
        })
    }

    pub fn to_book_file(&self) -> SdkResult<BookFile> {
        Ok(BookFile {
            chart: self.chart.clone(),
            entries: self.journal.all_entries()?,
        })
    }

    // ---- Posting ----

    pub fn post(&self, draft: EntryDraft) -> SdkResult<JournalEntry> {
        let entry = self.journal.post(draft)?;
        for line in &entry.lines {
            if !self.chart.contains(line.account.as_str()) {
                debug!(
                    number = entry.number,
                    account = %line.account,
                    "posted to account outside the chart"
                );
            }
        }
        Ok(entry)
    }

    /// Post the correction that cancels entry `id`.
    pub fn reverse(&self, id: &EntryId, date: NaiveDate) -> SdkResult<JournalEntry> {
        Ok(self.journal.reverse(id, date)?)
    }

    // ---- Reports ----

    pub fn diario(&self) -> SdkResult<Vec<JournalEntry>> {
        let entries = self.journal.all_entries()?;
        Ok(diario(&entries))
    }

    /// Ledger of a chart account, balances signed per the balance convention.
    pub fn mayor(&self, account: &str) -> SdkResult<Vec<LedgerMovement>> {
        let code = AccountCode::new(account);
        let known = self
            .chart
            .get(code.as_str())
            .ok_or_else(|| JournalError::UnknownAccount(code.clone()))?;

        let movements = mayor_from_postings(self.journal.account_postings(code.as_str())?);
        let nature = match self.config.balance_convention {
            BalanceConvention::DebitPositive => None,
            BalanceConvention::NatureAware => known.nature,
        };
        Ok(match nature {
            Some(nature) => movements.into_iter().map(|m| m.presented(nature)).collect(),
            None => movements,
        })
    }

    pub fn sumas_y_saldos(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        circuit: Option<Circuit>,
    ) -> SdkResult<TrialBalance> {
        let filter = ReportFilter::new(from, to, circuit)?;
        let entries = self.journal.all_entries()?;
        Ok(sumas_y_saldos_with(
            &entries,
            &filter,
            &self.chart,
            &self.config,
        )?)
    }

    pub fn summary(&self) -> SdkResult<BookSummary> {
        let entries = self.journal.all_entries()?;
        Ok(BookSummary::of(&self.chart, &entries))
    }

    // ---- Accessors ----

    pub fn chart(&self) -> &ChartOfAccounts {
        &self.chart
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    pub fn journal(&self) -> &InMemoryJournal {
        &self.journal
    }

    pub fn entry(&self, id: &EntryId) -> SdkResult<Option<JournalEntry>> {
        Ok(self.journal.get(id)?)
    }

    pub fn entry_count(&self) -> SdkResult<u64> {
        Ok(self.journal.entry_count()?)
    }
}
