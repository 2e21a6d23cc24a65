//! Foundation types for Partida, a double-entry journal core.
//!
//! This crate provides the identity and catalog types shared by every other
//! Partida crate.
//!
//! # Key Types
//!
//! - [`EntryId`] — UUID v7 journal entry identifier
//! - [`AccountCode`] — Key into the chart of accounts
//! - [`AccountNature`] — Debit-normal or credit-normal convention
//! - [`ChartOfAccounts`] — Ordered, externally supplied account catalog
//! - [`Circuit`] — Category tag used to scope reports to a business process

pub mod account;
pub mod circuit;
pub mod error;
pub mod identity;

pub use account::{Account, AccountCode, AccountNature, ChartOfAccounts};
pub use circuit::Circuit;
pub use error::TypeError;
pub use identity::EntryId;

pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
