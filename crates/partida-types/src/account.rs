use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Key into the chart of accounts.
///
/// Codes are opaque strings compared exactly after trimming. A journal line
/// may reference a code the chart does not know; such lines post normally
/// but are left out of chart-driven reports.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AccountCode(String);

impl AccountCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the code is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for AccountCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AccountCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<AccountCode> for String {
    fn from(value: AccountCode) -> Self {
        value.0
    }
}

impl Borrow<str> for AccountCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accounting convention for the sign of an account's balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountNature {
    /// Assets and expenses: a net debit is a positive balance.
    Debit,
    /// Liabilities, equity and revenue: a net credit is a positive balance.
    Credit,
}

impl AccountNature {
    /// Convert a debit-positive balance into this nature's conventional sign.
    pub fn present(self, debit_positive: Decimal) -> Decimal {
        match self {
            Self::Debit => debit_positive,
            Self::Credit => -debit_positive,
        }
    }
}

impl fmt::Display for AccountNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
        }
    }
}

/// One account of the chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub code: AccountCode,
    pub name: String,
    /// Absent in catalogs that do not model account nature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nature: Option<AccountNature>,
}

impl Account {
    pub fn new(code: impl Into<AccountCode>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            nature: None,
        }
    }

    pub fn with_nature(mut self, nature: AccountNature) -> Self {
        self.nature = Some(nature);
        self
    }
}

/// Ordered catalog of accounts, supplied by the caller.
///
/// Order is significant: trial balance rows follow it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Account>", into = "Vec<Account>")]
pub struct ChartOfAccounts {
    accounts: Vec<Account>,
    positions: HashMap<AccountCode, usize>,
}

impl ChartOfAccounts {
    /// Build a chart, rejecting blank and duplicate codes.
    pub fn new(accounts: Vec<Account>) -> Result<Self, TypeError> {
        let mut positions = HashMap::with_capacity(accounts.len());
        for (index, account) in accounts.iter().enumerate() {
            if account.code.is_blank() {
                return Err(TypeError::EmptyAccountCode);
            }
            if positions.insert(account.code.clone(), index).is_some() {
                return Err(TypeError::DuplicateAccount(account.code.clone()));
            }
        }
        Ok(Self {
            accounts,
            positions,
        })
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts in chart order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn get(&self, code: &str) -> Option<&Account> {
        self.positions.get(code).map(|&i| &self.accounts[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.positions.contains_key(code)
    }

    /// Position of the account in chart order.
    pub fn position(&self, code: &str) -> Option<usize> {
        self.positions.get(code).copied()
    }

    pub fn nature_of(&self, code: &str) -> Option<AccountNature> {
        self.get(code).and_then(|a| a.nature)
    }
}

impl TryFrom<Vec<Account>> for ChartOfAccounts {
    type Error = TypeError;

    fn try_from(value: Vec<Account>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChartOfAccounts> for Vec<Account> {
    fn from(value: ChartOfAccounts) -> Self {
        value.accounts
    }
}

impl<'a> IntoIterator for &'a ChartOfAccounts {
    type Item = &'a Account;
    type IntoIter = std::slice::Iter<'a, Account>;

    fn into_iter(self) -> Self::IntoIter {
        self.accounts.iter()
    }
}
