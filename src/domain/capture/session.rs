// SPDX-License-Identifier: MPL-2.0
//! Guided capture state machine.
//!
//! A [`CaptureSession`] walks through three steps in order:
//!
//! 1. **Pickup**: photograph the waste and record where it was collected.
//! 2. **Disposal**: photograph it again at the bin and record that position.
//! 3. **Verify**: read-only summary, ready for submission.
//!
//! Each of the first two steps advances on its own as soon as both its image
//! and its location are known. [`CaptureSession::back`] returns to the
//! previous step with that step's artifacts restored so either can be retaken.
//! Artifacts are tagged with the step they were requested for; results that
//! arrive after the user has moved on are rejected as stale.

use super::image::CapturedImage;
use crate::domain::geo::{BinSite, Coordinate, ProximityCheck};
use std::fmt;

// =============================================================================
// CaptureStep
// =============================================================================

/// Step of the capture flow, ordered from first to last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CaptureStep {
    Pickup,
    Disposal,
    Verify,
}

impl CaptureStep {
    pub const ALL: [CaptureStep; 3] = [
        CaptureStep::Pickup,
        CaptureStep::Disposal,
        CaptureStep::Verify,
    ];

    /// One-based position, as shown in step titles.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            CaptureStep::Pickup => 1,
            CaptureStep::Disposal => 2,
            CaptureStep::Verify => 3,
        }
    }

    #[must_use]
    pub fn previous(self) -> Option<CaptureStep> {
        match self {
            CaptureStep::Pickup => None,
            CaptureStep::Disposal => Some(CaptureStep::Pickup),
            CaptureStep::Verify => Some(CaptureStep::Disposal),
        }
    }

    #[must_use]
    pub fn next(self) -> Option<CaptureStep> {
        match self {
            CaptureStep::Pickup => Some(CaptureStep::Disposal),
            CaptureStep::Disposal => Some(CaptureStep::Verify),
            CaptureStep::Verify => None,
        }
    }

    /// i18n key of the step heading.
    #[must_use]
    pub fn title_key(self) -> &'static str {
        match self {
            CaptureStep::Pickup => "capture-step-pickup-title",
            CaptureStep::Disposal => "capture-step-disposal-title",
            CaptureStep::Verify => "capture-step-verify-title",
        }
    }

    /// Whether this step collects an image and a location.
    #[must_use]
    pub fn collects_artifacts(self) -> bool {
        !matches!(self, CaptureStep::Verify)
    }
}

impl fmt::Display for CaptureStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaptureStep::Pickup => "pickup",
            CaptureStep::Disposal => "disposal",
            CaptureStep::Verify => "verify",
        };
        f.write_str(name)
    }
}

// =============================================================================
// TransitionError
// =============================================================================

/// Rejected capture session operation. The session is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// An artifact was produced for a step that is no longer current.
    StaleStep {
        current: CaptureStep,
        requested: CaptureStep,
    },
    /// The current step is missing its image or its location.
    Incomplete(CaptureStep),
    /// Already on the first step.
    NoPreviousStep,
    /// Already on the last step.
    NoNextStep,
    /// The verify step does not accept new artifacts.
    ReadOnly,
    /// Submission is only possible from the verify step.
    NotReadyToSubmit(CaptureStep),
}

impl TransitionError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            TransitionError::StaleStep { .. } => "capture-error-stale",
            TransitionError::Incomplete(_) => "capture-error-incomplete",
            TransitionError::NoPreviousStep => "capture-error-no-previous",
            TransitionError::NoNextStep => "capture-error-no-next",
            TransitionError::ReadOnly => "capture-error-read-only",
            TransitionError::NotReadyToSubmit(_) => "capture-error-not-ready",
        }
    }
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::StaleStep { current, requested } => {
                write!(f, "artifact for {requested} arrived while on {current}")
            }
            TransitionError::Incomplete(step) => {
                write!(f, "{step} step needs both an image and a location")
            }
            TransitionError::NoPreviousStep => write!(f, "already on the first step"),
            TransitionError::NoNextStep => write!(f, "already on the last step"),
            TransitionError::ReadOnly => write!(f, "verify step is read-only"),
            TransitionError::NotReadyToSubmit(step) => {
                write!(f, "cannot submit from the {step} step")
            }
        }
    }
}

impl std::error::Error for TransitionError {}

// =============================================================================
// Stages
// =============================================================================

/// Image and location recorded for one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub image: CapturedImage,
    pub location: Coordinate,
}

/// Current stage with the artifacts gathered so far.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureStage {
    Pickup {
        image: Option<CapturedImage>,
        location: Option<Coordinate>,
    },
    Disposal {
        pickup: Capture,
        image: Option<CapturedImage>,
        location: Option<Coordinate>,
    },
    Verify {
        pickup: Capture,
        disposal: Capture,
    },
}

impl CaptureStage {
    fn empty() -> Self {
        CaptureStage::Pickup {
            image: None,
            location: None,
        }
    }

    #[must_use]
    pub fn step(&self) -> CaptureStep {
        match self {
            CaptureStage::Pickup { .. } => CaptureStep::Pickup,
            CaptureStage::Disposal { .. } => CaptureStep::Disposal,
            CaptureStage::Verify { .. } => CaptureStep::Verify,
        }
    }
}

/// Result of recording an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The step still lacks something.
    Stayed,
    /// The step became complete and the session moved on.
    Advanced(CaptureStep),
}

/// Both captures handed over on submission, with the proximity outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedCapture {
    pub pickup: Capture,
    pub disposal: Capture,
    pub check: ProximityCheck,
}

// =============================================================================
// CaptureSession
// =============================================================================

/// The capture flow for one report.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSession {
    site: BinSite,
    stage: CaptureStage,
}

impl CaptureSession {
    /// Starts an empty session on the pickup step.
    #[must_use]
    pub fn new(site: BinSite) -> Self {
        Self {
            site,
            stage: CaptureStage::empty(),
        }
    }

    #[must_use]
    pub fn step(&self) -> CaptureStep {
        self.stage.step()
    }

    #[must_use]
    pub fn stage(&self) -> &CaptureStage {
        &self.stage
    }

    #[must_use]
    pub fn site(&self) -> &BinSite {
        &self.site
    }

    /// Replaces the reference bin. Captured artifacts are kept.
    pub fn set_site(&mut self, site: BinSite) {
        self.site = site;
    }

    /// Image recorded on the current step, if any.
    #[must_use]
    pub fn current_image(&self) -> Option<&CapturedImage> {
        match &self.stage {
            CaptureStage::Pickup { image, .. } | CaptureStage::Disposal { image, .. } => {
                image.as_ref()
            }
            CaptureStage::Verify { .. } => None,
        }
    }

    /// Location recorded on the current step, if any.
    #[must_use]
    pub fn current_location(&self) -> Option<Coordinate> {
        match &self.stage {
            CaptureStage::Pickup { location, .. } | CaptureStage::Disposal { location, .. } => {
                *location
            }
            CaptureStage::Verify { .. } => None,
        }
    }

    /// Pickup capture once the pickup step is done.
    #[must_use]
    pub fn pickup(&self) -> Option<&Capture> {
        match &self.stage {
            CaptureStage::Pickup { .. } => None,
            CaptureStage::Disposal { pickup, .. } | CaptureStage::Verify { pickup, .. } => {
                Some(pickup)
            }
        }
    }

    /// Disposal capture once the disposal step is done.
    #[must_use]
    pub fn disposal(&self) -> Option<&Capture> {
        match &self.stage {
            CaptureStage::Verify { disposal, .. } => Some(disposal),
            _ => None,
        }
    }

    /// Whether the current step has both its image and its location.
    #[must_use]
    pub fn is_step_complete(&self) -> bool {
        match &self.stage {
            CaptureStage::Pickup { image, location } | CaptureStage::Disposal { image, location, .. } => {
                image.is_some() && location.is_some()
            }
            CaptureStage::Verify { .. } => true,
        }
    }

    /// Distance from the disposal location to the bin, once that location is known.
    #[must_use]
    pub fn check(&self) -> Option<ProximityCheck> {
        let disposal = match &self.stage {
            CaptureStage::Disposal {
                location: Some(location),
                ..
            } => location,
            CaptureStage::Verify { disposal, .. } => &disposal.location,
            _ => return None,
        };
        Some(self.site.check(disposal))
    }

    /// Stores the image taken for `step`, advancing if the step is now complete.
    ///
    /// # Errors
    ///
    /// Fails when `step` is not current or when on the verify step.
    pub fn record_image(
        &mut self,
        step: CaptureStep,
        image: CapturedImage,
    ) -> Result<Progress, TransitionError> {
        self.ensure_current(step)?;
        match &mut self.stage {
            CaptureStage::Pickup { image: slot, .. } | CaptureStage::Disposal { image: slot, .. } => {
                *slot = Some(image);
            }
            CaptureStage::Verify { .. } => return Err(TransitionError::ReadOnly),
        }
        Ok(self.advance_if_complete())
    }

    /// Stores the location obtained for `step`, advancing if the step is now complete.
    ///
    /// # Errors
    ///
    /// Fails when `step` is not current or when on the verify step.
    pub fn record_location(
        &mut self,
        step: CaptureStep,
        location: Coordinate,
    ) -> Result<Progress, TransitionError> {
        self.ensure_current(step)?;
        match &mut self.stage {
            CaptureStage::Pickup { location: slot, .. }
            | CaptureStage::Disposal { location: slot, .. } => {
                *slot = Some(location);
            }
            CaptureStage::Verify { .. } => return Err(TransitionError::ReadOnly),
        }
        Ok(self.advance_if_complete())
    }

    /// Forgets the location recorded for `step` so that a new fix is awaited.
    ///
    /// # Errors
    ///
    /// Fails when `step` is not current or when on the verify step.
    pub fn clear_location(&mut self, step: CaptureStep) -> Result<(), TransitionError> {
        self.ensure_current(step)?;
        match &mut self.stage {
            CaptureStage::Pickup { location, .. } | CaptureStage::Disposal { location, .. } => {
                *location = None;
                Ok(())
            }
            CaptureStage::Verify { .. } => Err(TransitionError::ReadOnly),
        }
    }

    /// Moves to the next step when the current one is complete.
    ///
    /// # Errors
    ///
    /// [`TransitionError::Incomplete`] when an artifact is missing and
    /// [`TransitionError::NoNextStep`] on the verify step.
    pub fn advance(&mut self) -> Result<CaptureStep, TransitionError> {
        let stage = std::mem::replace(&mut self.stage, CaptureStage::empty());
        let (stage, outcome) = match stage {
            CaptureStage::Pickup {
                image: Some(image),
                location: Some(location),
            } => (
                CaptureStage::Disposal {
                    pickup: Capture { image, location },
                    image: None,
                    location: None,
                },
                Ok(CaptureStep::Disposal),
            ),
            CaptureStage::Disposal {
                pickup,
                image: Some(image),
                location: Some(location),
            } => (
                CaptureStage::Verify {
                    pickup,
                    disposal: Capture { image, location },
                },
                Ok(CaptureStep::Verify),
            ),
            verify @ CaptureStage::Verify { .. } => (verify, Err(TransitionError::NoNextStep)),
            incomplete => {
                let step = incomplete.step();
                (incomplete, Err(TransitionError::Incomplete(step)))
            }
        };
        self.stage = stage;
        outcome
    }

    /// Returns to the previous step, restoring its image and location.
    ///
    /// Artifacts gathered on the step being left are discarded.
    ///
    /// # Errors
    ///
    /// [`TransitionError::NoPreviousStep`] on the pickup step.
    pub fn back(&mut self) -> Result<CaptureStep, TransitionError> {
        let stage = std::mem::replace(&mut self.stage, CaptureStage::empty());
        let (stage, outcome) = match stage {
            pickup @ CaptureStage::Pickup { .. } => (pickup, Err(TransitionError::NoPreviousStep)),
            CaptureStage::Disposal { pickup, .. } => (
                CaptureStage::Pickup {
                    image: Some(pickup.image),
                    location: Some(pickup.location),
                },
                Ok(CaptureStep::Pickup),
            ),
            CaptureStage::Verify { pickup, disposal } => (
                CaptureStage::Disposal {
                    pickup,
                    image: Some(disposal.image),
                    location: Some(disposal.location),
                },
                Ok(CaptureStep::Disposal),
            ),
        };
        self.stage = stage;
        outcome
    }

    /// Hands over both captures and resets to an empty pickup step.
    ///
    /// # Errors
    ///
    /// [`TransitionError::NotReadyToSubmit`] unless on the verify step. The
    /// session is left untouched in that case.
    pub fn finish(&mut self) -> Result<CompletedCapture, TransitionError> {
        match std::mem::replace(&mut self.stage, CaptureStage::empty()) {
            CaptureStage::Verify { pickup, disposal } => {
                let check = self.site.check(&disposal.location);
                Ok(CompletedCapture {
                    pickup,
                    disposal,
                    check,
                })
            }
            other => {
                let step = other.step();
                self.stage = other;
                Err(TransitionError::NotReadyToSubmit(step))
            }
        }
    }

    /// Drops every artifact and returns to the pickup step.
    pub fn reset(&mut self) {
        self.stage = CaptureStage::empty();
    }

    fn ensure_current(&self, requested: CaptureStep) -> Result<(), TransitionError> {
        let current = self.step();
        if current == requested {
            Ok(())
        } else {
            Err(TransitionError::StaleStep { current, requested })
        }
    }

    fn advance_if_complete(&mut self) -> Progress {
        if self.step().collects_artifacts() && self.is_step_complete() {
            match self.advance() {
                Ok(step) => Progress::Advanced(step),
                Err(_) => Progress::Stayed,
            }
        } else {
            Progress::Stayed
        }
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new(BinSite::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capture::ImageOrigin;
    use crate::domain::geo::{Proximity, REFERENCE_BIN};

    fn image(tag: u8) -> CapturedImage {
        CapturedImage::from_rgba(1, 1, vec![tag, tag, tag, 255], ImageOrigin::Placeholder)
            .expect("valid pixel")
    }

    fn offset(lat: f64) -> Coordinate {
        Coordinate::new(REFERENCE_BIN.latitude() + lat, REFERENCE_BIN.longitude())
    }

    fn session_at_verify() -> CaptureSession {
        let mut session = CaptureSession::default();
        session.record_image(CaptureStep::Pickup, image(1)).unwrap();
        session.record_location(CaptureStep::Pickup, offset(0.01)).unwrap();
        session.record_location(CaptureStep::Disposal, REFERENCE_BIN).unwrap();
        session.record_image(CaptureStep::Disposal, image(2)).unwrap();
        session
    }

    #[test]
    fn new_session_starts_empty_on_pickup() {
        let session = CaptureSession::default();
        assert_eq!(session.step(), CaptureStep::Pickup);
        assert!(session.current_image().is_none());
        assert!(session.current_location().is_none());
        assert!(session.check().is_none());
    }

    #[test]
    fn pickup_waits_for_both_artifacts() {
        let mut session = CaptureSession::default();
        let progress = session.record_image(CaptureStep::Pickup, image(1)).unwrap();
        assert_eq!(progress, Progress::Stayed);
        assert_eq!(session.step(), CaptureStep::Pickup);

        let progress = session
            .record_location(CaptureStep::Pickup, REFERENCE_BIN)
            .unwrap();
        assert_eq!(progress, Progress::Advanced(CaptureStep::Disposal));
        assert_eq!(session.pickup().map(|c| c.location), Some(REFERENCE_BIN));
    }

    #[test]
    fn location_first_then_image_also_advances() {
        let mut session = CaptureSession::default();
        session.record_location(CaptureStep::Pickup, REFERENCE_BIN).unwrap();
        let progress = session.record_image(CaptureStep::Pickup, image(1)).unwrap();
        assert_eq!(progress, Progress::Advanced(CaptureStep::Disposal));
    }

    #[test]
    fn full_flow_reaches_verify_with_distance() {
        let session = session_at_verify();
        assert_eq!(session.step(), CaptureStep::Verify);
        let check = session.check().expect("disposal known");
        assert_eq!(check.distance.metres(), 0.0);
        assert_eq!(check.proximity, Proximity::WithinRange);
    }

    #[test]
    fn check_is_available_as_soon_as_disposal_location_is_known() {
        let mut session = CaptureSession::default();
        session.record_image(CaptureStep::Pickup, image(1)).unwrap();
        session.record_location(CaptureStep::Pickup, REFERENCE_BIN).unwrap();
        assert!(session.check().is_none());

        session.record_location(CaptureStep::Disposal, offset(0.0002)).unwrap();
        assert_eq!(session.step(), CaptureStep::Disposal);
        assert_eq!(session.check().map(|c| c.proximity), Some(Proximity::TooFar));
    }

    #[test]
    fn stale_location_is_rejected() {
        let mut session = CaptureSession::default();
        session.record_image(CaptureStep::Pickup, image(1)).unwrap();
        session.record_location(CaptureStep::Pickup, REFERENCE_BIN).unwrap();

        let err = session
            .record_location(CaptureStep::Pickup, offset(1.0))
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::StaleStep {
                current: CaptureStep::Disposal,
                requested: CaptureStep::Pickup
            }
        );
        assert!(session.current_location().is_none());
    }

    #[test]
    fn verify_is_read_only() {
        let mut session = session_at_verify();
        assert_eq!(
            session.record_image(CaptureStep::Verify, image(9)),
            Err(TransitionError::ReadOnly)
        );
        assert_eq!(session.advance(), Err(TransitionError::NoNextStep));
        assert_eq!(session.step(), CaptureStep::Verify);
    }

    #[test]
    fn advance_requires_complete_step() {
        let mut session = CaptureSession::default();
        session.record_image(CaptureStep::Pickup, image(1)).unwrap();
        assert_eq!(
            session.advance(),
            Err(TransitionError::Incomplete(CaptureStep::Pickup))
        );
        assert!(session.current_image().is_some());
    }

    #[test]
    fn back_restores_previous_artifacts() {
        let mut session = session_at_verify();
        assert_eq!(session.back(), Ok(CaptureStep::Disposal));
        assert_eq!(session.current_location(), Some(REFERENCE_BIN));
        assert_eq!(session.current_image(), Some(&image(2)));

        assert_eq!(session.back(), Ok(CaptureStep::Pickup));
        assert_eq!(session.current_location(), Some(offset(0.01)));
        assert_eq!(session.back(), Err(TransitionError::NoPreviousStep));
    }

    #[test]
    fn continue_after_back_moves_forward_again() {
        let mut session = session_at_verify();
        session.back().unwrap();
        assert_eq!(session.advance(), Ok(CaptureStep::Verify));
    }

    #[test]
    fn retake_after_back_advances_again() {
        let mut session = session_at_verify();
        session.back().unwrap();
        session.back().unwrap();
        let progress = session.record_image(CaptureStep::Pickup, image(7)).unwrap();
        assert_eq!(progress, Progress::Advanced(CaptureStep::Disposal));
        assert_eq!(session.pickup().map(|c| c.image.clone()), Some(image(7)));
        assert!(session.current_image().is_none());
    }

    #[test]
    fn retake_with_cleared_location_waits_for_new_fix() {
        let mut session = session_at_verify();
        session.back().unwrap();
        assert_eq!(session.current_location(), Some(REFERENCE_BIN));

        session.clear_location(CaptureStep::Disposal).unwrap();
        assert_eq!(session.current_location(), None);
        assert_eq!(session.check(), None);
        assert_eq!(
            session.record_image(CaptureStep::Disposal, image(3)),
            Ok(Progress::Stayed)
        );

        let fresh = offset(0.00001);
        assert_eq!(
            session.record_location(CaptureStep::Disposal, fresh),
            Ok(Progress::Advanced(CaptureStep::Verify))
        );
        assert_eq!(session.disposal().map(|d| d.location), Some(fresh));
    }

    #[test]
    fn clear_location_is_refused_off_step() {
        let mut session = session_at_verify();
        assert_eq!(
            session.clear_location(CaptureStep::Disposal),
            Err(TransitionError::StaleStep {
                current: CaptureStep::Verify,
                requested: CaptureStep::Disposal,
            })
        );
        assert_eq!(
            session.clear_location(CaptureStep::Verify),
            Err(TransitionError::ReadOnly)
        );
    }

    #[test]
    fn finish_resets_to_empty_pickup() {
        let mut session = session_at_verify();
        let completed = session.finish().expect("on verify");
        assert_eq!(completed.disposal.location, REFERENCE_BIN);
        assert!(completed.check.proximity.is_within_range());

        assert_eq!(session.step(), CaptureStep::Pickup);
        assert!(session.current_image().is_none());
        assert!(session.current_location().is_none());
        assert!(session.pickup().is_none());
    }

    #[test]
    fn finish_before_verify_is_rejected_without_side_effects() {
        let mut session = CaptureSession::default();
        session.record_image(CaptureStep::Pickup, image(1)).unwrap();
        assert_eq!(
            session.finish(),
            Err(TransitionError::NotReadyToSubmit(CaptureStep::Pickup))
        );
        assert!(session.current_image().is_some());
    }

    #[test]
    fn changing_site_updates_check() {
        let mut session = CaptureSession::default();
        session.record_image(CaptureStep::Pickup, image(1)).unwrap();
        session.record_location(CaptureStep::Pickup, REFERENCE_BIN).unwrap();
        session.record_location(CaptureStep::Disposal, offset(0.0002)).unwrap();
        assert_eq!(session.check().map(|c| c.proximity), Some(Proximity::TooFar));

        session.set_site(BinSite::new(
            REFERENCE_BIN,
            crate::domain::geo::AcceptanceRadius::new(100.0),
        ));
        assert_eq!(
            session.check().map(|c| c.proximity),
            Some(Proximity::WithinRange)
        );
    }

    #[test]
    fn steps_are_ordered() {
        assert!(CaptureStep::Pickup < CaptureStep::Disposal);
        assert!(CaptureStep::Disposal < CaptureStep::Verify);
        assert_eq!(CaptureStep::Verify.next(), None);
        assert_eq!(CaptureStep::Pickup.previous(), None);
    }
}
