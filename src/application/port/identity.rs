// SPDX-License-Identifier: MPL-2.0
//! Identity verification port definition.
//!
//! The identity gate asks an [`IdentityVerifier`] to send a one-time code to
//! the holder of an identifier, then to check the code the user typed.
//! Simulated latency is applied by the caller, not by implementations.

use crate::domain::identity::{Identifier, OneTimeCode};
use std::fmt;
use std::time::Duration;

// =============================================================================
// IdentityError
// =============================================================================

/// Errors reported by an identity backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The backend could not be reached.
    Unreachable(String),
    /// The identifier is not registered.
    UnknownIdentifier,
    /// The code does not match the one that was sent.
    CodeMismatch,
    /// The code has expired and a new one must be requested.
    CodeExpired,
}

impl IdentityError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            IdentityError::Unreachable(_) => "identity-error-unreachable",
            IdentityError::UnknownIdentifier => "identity-error-unknown-identifier",
            IdentityError::CodeMismatch => "identity-error-code-mismatch",
            IdentityError::CodeExpired => "identity-error-code-expired",
        }
    }
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::Unreachable(msg) => write!(f, "identity service unreachable: {msg}"),
            IdentityError::UnknownIdentifier => write!(f, "identifier is not registered"),
            IdentityError::CodeMismatch => write!(f, "one-time code does not match"),
            IdentityError::CodeExpired => write!(f, "one-time code has expired"),
        }
    }
}

impl std::error::Error for IdentityError {}

// =============================================================================
// CodeDispatch
// =============================================================================

/// Acknowledgement that a one-time code was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeDispatch {
    /// How long the code stays valid.
    pub valid_for: Duration,
}

impl CodeDispatch {
    /// Validity rounded up to whole minutes, for display.
    #[must_use]
    pub fn valid_minutes(&self) -> u64 {
        self.valid_for.as_secs().div_ceil(60)
    }
}

// =============================================================================
// IdentityVerifier Trait
// =============================================================================

/// Port for the two-step identifier and one-time code check.
pub trait IdentityVerifier: Send + Sync {
    /// Sends a one-time code to the holder of `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] when the code cannot be dispatched.
    fn request_code(&self, identifier: &Identifier) -> Result<CodeDispatch, IdentityError>;

    /// Checks `code` against the one sent for `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] when the code is rejected.
    fn verify_code(&self, identifier: &Identifier, code: &OneTimeCode)
        -> Result<(), IdentityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_minutes_rounds_up() {
        let dispatch = CodeDispatch {
            valid_for: Duration::from_secs(61),
        };
        assert_eq!(dispatch.valid_minutes(), 2);
        let dispatch = CodeDispatch {
            valid_for: Duration::from_secs(300),
        };
        assert_eq!(dispatch.valid_minutes(), 5);
    }

    #[test]
    fn identity_errors_have_distinct_keys() {
        let keys = [
            IdentityError::Unreachable("x".into()).i18n_key(),
            IdentityError::UnknownIdentifier.i18n_key(),
            IdentityError::CodeMismatch.i18n_key(),
            IdentityError::CodeExpired.i18n_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
