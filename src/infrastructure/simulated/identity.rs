// SPDX-License-Identifier: MPL-2.0
//! Identity service that accepts every well-formed identifier and code.

use crate::application::port::{CodeDispatch, IdentityError, IdentityVerifier};
use crate::domain::identity::{Identifier, OneTimeCode};
use std::time::Duration;

/// Accepts any syntactically valid identifier and code pair.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedIdentityService {
    code_validity: Duration,
}

impl SimulatedIdentityService {
    #[must_use]
    pub fn new(code_validity: Duration) -> Self {
        Self { code_validity }
    }
}

impl IdentityVerifier for SimulatedIdentityService {
    fn request_code(&self, identifier: &Identifier) -> Result<CodeDispatch, IdentityError> {
        tracing::info!(identifier = %identifier, "one-time code dispatched");
        Ok(CodeDispatch {
            valid_for: self.code_validity,
        })
    }

    fn verify_code(
        &self,
        identifier: &Identifier,
        _code: &OneTimeCode,
    ) -> Result<(), IdentityError> {
        tracing::info!(identifier = %identifier, "one-time code accepted");
        Ok(())
    }
}
