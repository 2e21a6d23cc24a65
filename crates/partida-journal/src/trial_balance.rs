use std::collections::HashMap;

use partida_types::{AccountCode, ChartOfAccounts};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::{CircuitPolicy, JournalConfig, OpeningBalance};
use crate::error::{JournalError, JournalResult};
use crate::filter::ReportFilter;
use crate::records::JournalEntry;

/// Opening, period, and closing figures of one account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Figures {
    pub opening: Decimal,
    pub debits: Decimal,
    pub credits: Decimal,
    pub closing: Decimal,
}

impl Figures {
    /// Figures with `closing = opening + debits - credits`.
    pub fn new(opening: Decimal, debits: Decimal, credits: Decimal) -> JournalResult<Self> {
        let closing = opening
            .checked_add(debits)
            .and_then(|v| v.checked_sub(credits))
            .ok_or(JournalError::AmountOverflow)?;
        Ok(Self {
            opening,
            debits,
            credits,
            closing,
        })
    }

    fn checked_add(self, other: Self) -> JournalResult<Self> {
        let sum = |a: Decimal, b: Decimal| a.checked_add(b).ok_or(JournalError::AmountOverflow);
        Ok(Self {
            opening: sum(self.opening, other.opening)?,
            debits: sum(self.debits, other.debits)?,
            credits: sum(self.credits, other.credits)?,
            closing: sum(self.closing, other.closing)?,
        })
    }
}

/// One chart account in a trial balance.
///
/// `adjusted` starts as a copy of `figures`; an adjustment pass layered on
/// top rewrites it and leaves the posted figures alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrialBalanceRow {
    pub account: AccountCode,
    pub name: String,
    pub figures: Figures,
    pub adjusted: Figures,
}

/// Column sums over all rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrialBalanceTotals {
    pub figures: Figures,
    pub adjusted: Figures,
}

impl TrialBalanceTotals {
    fn of(rows: &[TrialBalanceRow]) -> JournalResult<Self> {
        rows.iter().try_fold(Self::default(), |acc, row| {
            Ok(Self {
                figures: acc.figures.checked_add(row.figures)?,
                adjusted: acc.adjusted.checked_add(row.adjusted)?,
            })
        })
    }
}

/// Balance of accounts: one row per chart account, in chart order, plus
/// the column sums.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub totals: TrialBalanceTotals,
}

impl TrialBalance {
    /// Adjusted debits equal adjusted credits across all rows.
    ///
    /// Holds whenever every account touched in the period is in the chart.
    pub fn is_balanced(&self) -> bool {
        self.totals.adjusted.debits == self.totals.adjusted.credits
    }

    pub fn row(&self, account: &str) -> Option<&TrialBalanceRow> {
        self.rows.iter().find(|r| r.account.as_str() == account)
    }
}

/// Trial balance with the default configuration: zero opening balances and
/// a strict circuit policy.
pub fn sumas_y_saldos(
    entries: &[JournalEntry],
    filter: &ReportFilter,
    chart: &ChartOfAccounts,
) -> JournalResult<TrialBalance> {
    sumas_y_saldos_with(entries, filter, chart, &JournalConfig::default())
}

/// Trial balance over the entries selected by `filter`.
///
/// Accounts with no activity still get a row with zero period totals. Lines
/// on codes missing from the chart are left out. Sums that leave the decimal
/// range fail with `AmountOverflow`.
pub fn sumas_y_saldos_with(
    entries: &[JournalEntry],
    filter: &ReportFilter,
    chart: &ChartOfAccounts,
    config: &JournalConfig,
) -> JournalResult<TrialBalance> {
    if let Some(circuit) = filter.circuit() {
        let known = entries.iter().any(|e| e.in_circuit(circuit));
        if !known && config.circuit_policy == CircuitPolicy::Strict {
            return Err(JournalError::UnknownCircuit(circuit.clone()));
        }
    }

    let carry_forward = config.opening_balance == OpeningBalance::CarryForward;
    let mut period: HashMap<&str, (Decimal, Decimal)> = HashMap::new();
    let mut prior: HashMap<&str, Decimal> = HashMap::new();
    let mut in_period = 0usize;

    let add = |a: &mut Decimal, b: Decimal| -> JournalResult<()> {
        *a = a.checked_add(b).ok_or(JournalError::AmountOverflow)?;
        Ok(())
    };

    for entry in entries {
        if filter.matches(entry) {
            in_period += 1;
            for line in &entry.lines {
                let sums = period.entry(line.account.as_str()).or_default();
                add(&mut sums.0, line.debit)?;
                add(&mut sums.1, line.credit)?;
            }
        } else if carry_forward && filter.precedes(entry) {
            for line in &entry.lines {
                let net = line
                    .debit
                    .checked_sub(line.credit)
                    .ok_or(JournalError::AmountOverflow)?;
                add(prior.entry(line.account.as_str()).or_default(), net)?;
            }
        }
    }

    let rows = chart
        .iter()
        .map(|account| {
            let code = account.code.as_str();
            let opening = prior.get(code).copied().unwrap_or_default();
            let (debits, credits) = period.get(code).copied().unwrap_or_default();
            let figures = Figures::new(opening, debits, credits)?;
            Ok(TrialBalanceRow {
                account: account.code.clone(),
                name: account.name.clone(),
                figures,
                adjusted: figures,
            })
        })
        .collect::<JournalResult<Vec<_>>>()?;
    let totals = TrialBalanceTotals::of(&rows)?;

    debug!(rows = rows.len(), entries = in_period, "trial balance computed");
    Ok(TrialBalance { rows, totals })
}
