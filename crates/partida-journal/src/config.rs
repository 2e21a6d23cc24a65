use serde::{Deserialize, Serialize};

/// How account balances are signed when shown to a reader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceConvention {
    /// `debit - credit` for every account, whatever its nature.
    #[default]
    DebitPositive,
    /// Credit-normal accounts (per the chart's nature flag) show
    /// `credit - debit`. Accounts without a nature keep the debit-positive sign.
    NatureAware,
}

/// What a circuit filter that no entry carries means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitPolicy {
    /// Fail with `UnknownCircuit`: the tag is most likely a typo.
    #[default]
    Strict,
    /// Report zero activity for every account.
    Lenient,
}

/// Where a trial balance's opening figures come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningBalance {
    /// Every period opens at zero.
    #[default]
    Zero,
    /// Opening is the net of in-circuit activity dated before `from`.
    /// Nothing is closed or stored; the figure is recomputed each time.
    CarryForward,
}

/// Reporting configuration for a set of books.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub balance_convention: BalanceConvention,
    pub circuit_policy: CircuitPolicy,
    pub opening_balance: OpeningBalance,
}
