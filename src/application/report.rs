// SPDX-License-Identifier: MPL-2.0
//! Capture reports and the per-login tally.
//!
//! A [`CaptureReport`] is built from a finished
//! [`CaptureSession`](crate::domain::capture::CaptureSession) at submission.
//! Its [`ReportReference`] is derived from both photos and the submission
//! time, so two submissions of the same photos at different times differ.

use crate::domain::capture::{Capture, CompletedCapture, WasteAnalysis};
use crate::domain::geo::ProximityCheck;
use crate::domain::identity::Role;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// Number of hex digits of the digest kept in a reference.
const REFERENCE_HEX_LEN: usize = 10;

/// Short human-readable report identifier, e.g. `EW-3F9A1C07B2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportReference(String);

impl ReportReference {
    fn derive(pickup: &Capture, disposal: &Capture, submitted_at: &DateTime<Utc>) -> Self {
        let mut hasher = blake3::Hasher::new();
        for capture in [pickup, disposal] {
            hasher.update(&capture.image.width().to_le_bytes());
            hasher.update(&capture.image.height().to_le_bytes());
            hasher.update(capture.image.rgba_bytes());
            hasher.update(&capture.location.latitude().to_le_bytes());
            hasher.update(&capture.location.longitude().to_le_bytes());
        }
        hasher.update(
            submitted_at
                .to_rfc3339_opts(SecondsFormat::Millis, true)
                .as_bytes(),
        );
        let hex = hasher.finalize().to_hex();
        Self(format!(
            "EW-{}",
            hex.as_str()[..REFERENCE_HEX_LEN].to_ascii_uppercase()
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything submitted for one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureReport {
    pub reference: ReportReference,
    pub role: Role,
    pub pickup: Capture,
    pub disposal: Capture,
    pub check: ProximityCheck,
    /// `None` when classification failed.
    pub analysis: Option<WasteAnalysis>,
    pub submitted_at: DateTime<Utc>,
}

impl CaptureReport {
    #[must_use]
    pub fn new(
        role: Role,
        completed: CompletedCapture,
        analysis: Option<WasteAnalysis>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let reference =
            ReportReference::derive(&completed.pickup, &completed.disposal, &submitted_at);
        Self {
            reference,
            role,
            pickup: completed.pickup,
            disposal: completed.disposal,
            check: completed.check,
            analysis,
            submitted_at,
        }
    }

    /// Points this report earns; zero without an analysis.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.analysis.map_or(0, |analysis| analysis.points)
    }
}

/// Reports accepted and points earned since login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionTally {
    pub reports: u32,
    pub points: u32,
}

impl SessionTally {
    /// Counts an accepted report.
    pub fn record(&mut self, report: &CaptureReport) {
        self.reports = self.reports.saturating_add(1);
        self.points = self.points.saturating_add(report.points());
    }
}
