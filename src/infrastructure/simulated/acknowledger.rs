// SPDX-License-Identifier: MPL-2.0
//! Report receiver that acknowledges locally.

use crate::application::port::{Receipt, ReportError, ReportSink};
use crate::application::report::CaptureReport;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Accepts every report and only logs it.
#[derive(Debug, Default)]
pub struct LocalAcknowledger {
    accepted: AtomicU64,
}

impl LocalAcknowledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reports accepted since start-up.
    #[must_use]
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }
}

impl ReportSink for LocalAcknowledger {
    fn submit(&self, report: &CaptureReport) -> Result<Receipt, ReportError> {
        let total = self.accepted.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            reference = %report.reference,
            role = %report.role,
            distance = %report.check.distance,
            proximity = ?report.check.proximity,
            points = report.points(),
            total,
            "report acknowledged"
        );
        Ok(Receipt {
            reference: report.reference.clone(),
            accepted_at: Utc::now(),
        })
    }
}
