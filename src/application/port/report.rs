// SPDX-License-Identifier: MPL-2.0
//! Report submission port definition.

use crate::application::report::{CaptureReport, ReportReference};
use chrono::{DateTime, Utc};
use std::fmt;

/// Errors that can occur when handing a report over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The receiver refused the report.
    Rejected(String),
    /// The receiver could not be reached.
    Unavailable(String),
}

impl ReportError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ReportError::Rejected(_) => "report-error-rejected",
            ReportError::Unavailable(_) => "report-error-unavailable",
        }
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Rejected(msg) => write!(f, "report rejected: {msg}"),
            ReportError::Unavailable(msg) => write!(f, "report receiver unavailable: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {}

/// Proof that a report was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub reference: ReportReference,
    pub accepted_at: DateTime<Utc>,
}

/// Port receiving finished capture reports.
pub trait ReportSink: Send + Sync {
    /// Submits `report`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] when the report is not accepted.
    fn submit(&self, report: &CaptureReport) -> Result<Receipt, ReportError>;
}
