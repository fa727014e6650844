//! Financial report generation.
//!
//! This module provides pure business logic for generating financial reports:
//! - Trial Balance
//! - Balance Sheet (with current/non-current classification)
//! - Profit & Loss and Cash Flow
//! - Financial Summary, Asset Performance and Dashboard Metrics

pub mod classification;
pub mod error;
pub mod income;
pub mod metrics;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use classification::classify;
pub use error::ReportError;
pub use income::IncomeService;
pub use metrics::MetricsService;
pub use service::{DEPRECIATION_LINE, PPE_LINE, ReportService};
pub use types::*;
