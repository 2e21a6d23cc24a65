use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Category tag on a journal entry ("ventas", "compras", "general", ...).
///
/// Reports filter on circuits by exact, case-sensitive match of the trimmed
/// tag. An entry without a circuit only appears in unfiltered reports.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Circuit(String);

impl Circuit {
    /// Build a circuit tag, trimming surrounding whitespace.
    pub fn new(tag: impl AsRef<str>) -> Result<Self, TypeError> {
        let tag = tag.as_ref().trim();
        if tag.is_empty() {
            return Err(TypeError::EmptyCircuit);
        }
        Ok(Self(tag.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Circuit {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Circuit> for String {
    fn from(value: Circuit) -> Self {
        value.0
    }
}

impl FromStr for Circuit {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
