//! Core business logic for Ledgerline.
//!
//! This crate is the ledger aggregation and reporting engine. It has ZERO
//! storage or transport dependencies and no async: every operation is a pure
//! function over record sets the caller has already fetched.
//!
//! # Modules
//!
//! - `ledger` - Records, sign conventions, running balances, journal and general ledger
//! - `books` - Cash book and bank book
//! - `cheques` - Issued and received cheque registers
//! - `assets` - Fixed asset register
//! - `reports` - Trial balance, balance sheet, profit & loss, cash flow, summaries
//! - `reconciliation` - Bank reconciliation
//! - `inventory` - Stock movements as single atomic commands
//! - `settings` - The organization settings record

pub mod assets;
pub mod books;
pub mod cheques;
pub mod inventory;
pub mod ledger;
pub mod reconciliation;
pub mod reports;
pub mod settings;
