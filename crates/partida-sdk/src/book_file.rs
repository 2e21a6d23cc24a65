use std::fs;
use std::path::Path;

use partida_journal::JournalEntry;
use partida_types::ChartOfAccounts;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::books::BookSummary;
use crate::error::{SdkError, SdkResult};

/// JSON document holding a chart of accounts and its posted entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFile {
    pub chart: ChartOfAccounts,
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
}

impl BookFile {
    pub fn from_json(json: &str) -> SdkResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> SdkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> SdkResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| SdkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            accounts = file.chart.len(),
            entries = file.entries.len(),
            "book file loaded"
        );
        Ok(file)
    }

    /// Summary and integrity report of the file as stored, before any
    /// entry is restored into a journal.
    pub fn summary(&self) -> BookSummary {
        BookSummary::of(&self.chart, &self.entries)
    }

    pub fn save(&self, path: &Path) -> SdkResult<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| SdkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), entries = self.entries.len(), "book file saved");
        Ok(())
    }
}
