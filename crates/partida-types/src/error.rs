use thiserror::Error;

use crate::account::AccountCode;

/// Errors produced by type construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("account code must not be blank")]
    EmptyAccountCode,

    #[error("circuit tag must not be blank")]
    EmptyCircuit,

    #[error("duplicate account code in chart of accounts: {0}")]
    DuplicateAccount(AccountCode),

    #[error("invalid entry id: {0}")]
    InvalidEntryId(String),
}
