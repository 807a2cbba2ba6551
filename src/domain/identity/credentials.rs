// SPDX-License-Identifier: MPL-2.0
//! Validated login credentials.
//!
//! Both credentials are plain ASCII digit strings. Raw user input is
//! sanitised with [`sanitize_digits`] as it is typed, and only strings of the
//! exact expected length can be turned into an [`Identifier`] or a
//! [`OneTimeCode`].

use std::fmt;

/// Number of digits in a national identifier.
pub const IDENTIFIER_LEN: usize = 12;

/// Number of digits in a one-time code.
pub const CODE_LEN: usize = 6;

/// Strips every non-ASCII-digit character and truncates to `max_len` digits.
#[must_use]
pub fn sanitize_digits(raw: &str, max_len: usize) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(max_len)
        .collect()
}

/// Reasons a credential string is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// The identifier does not have exactly [`IDENTIFIER_LEN`] digits.
    IdentifierLength { actual: usize },
    /// The code does not have exactly [`CODE_LEN`] digits.
    CodeLength { actual: usize },
}

impl CredentialError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CredentialError::IdentifierLength { .. } => "login-error-identifier-length",
            CredentialError::CodeLength { .. } => "login-error-code-length",
        }
    }
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::IdentifierLength { actual } => write!(
                f,
                "identifier must have {IDENTIFIER_LEN} digits, got {actual}"
            ),
            CredentialError::CodeLength { actual } => {
                write!(f, "code must have {CODE_LEN} digits, got {actual}")
            }
        }
    }
}

impl std::error::Error for CredentialError {}

/// A 12-digit national identifier.
///
/// `Debug` and `Display` only show the last four digits so the value can be
/// logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Identifier(String);

impl Identifier {
    /// Sanitises `raw` and accepts it only if exactly 12 digits remain.
    ///
    /// Digits beyond the twelfth are dropped during sanitising, matching the
    /// behaviour of the input field.
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        let digits = sanitize_digits(raw, IDENTIFIER_LEN);
        if digits.len() == IDENTIFIER_LEN {
            Ok(Self(digits))
        } else {
            Err(CredentialError::IdentifierLength {
                actual: digits.len(),
            })
        }
    }

    /// Returns the full digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form, e.g. `XXXX XXXX 9012`.
    #[must_use]
    pub fn masked(&self) -> String {
        let tail = &self.0[IDENTIFIER_LEN - 4..];
        format!("XXXX XXXX {tail}")
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identifier").field(&self.masked()).finish()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// A 6-digit one-time code. Never printed in clear.
#[derive(Clone, PartialEq, Eq)]
pub struct OneTimeCode(String);

impl OneTimeCode {
    /// Sanitises `raw` and accepts it only if exactly 6 digits remain.
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        let digits = sanitize_digits(raw, CODE_LEN);
        if digits.len() == CODE_LEN {
            Ok(Self(digits))
        } else {
            Err(CredentialError::CodeLength {
                actual: digits.len(),
            })
        }
    }

    /// Returns the digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OneTimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OneTimeCode(******)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_non_digits_and_truncates() {
        assert_eq!(sanitize_digits("1234-5678 9012", IDENTIFIER_LEN), "123456789012");
        assert_eq!(sanitize_digits("12345678901234", IDENTIFIER_LEN), "123456789012");
        assert_eq!(sanitize_digits("abc", CODE_LEN), "");
    }

    #[test]
    fn sanitize_ignores_non_ascii_digits() {
        // Devanagari digits are not accepted by the input field.
        assert_eq!(sanitize_digits("१२३4", CODE_LEN), "4");
    }

    #[test]
    fn identifier_requires_exactly_twelve_digits() {
        assert!(Identifier::parse("123456789012").is_ok());
        assert_eq!(
            Identifier::parse("12345678901"),
            Err(CredentialError::IdentifierLength { actual: 11 })
        );
        assert_eq!(
            Identifier::parse(""),
            Err(CredentialError::IdentifierLength { actual: 0 })
        );
    }

    #[test]
    fn identifier_accepts_formatted_input() {
        let id = Identifier::parse("1234 5678 9012").expect("valid identifier");
        assert_eq!(id.as_str(), "123456789012");
    }

    #[test]
    fn identifier_is_masked_when_printed() {
        let id = Identifier::parse("123456789012").expect("valid identifier");
        assert_eq!(id.to_string(), "XXXX XXXX 9012");
        assert!(!format!("{id:?}").contains("12345678"));
    }

    #[test]
    fn code_requires_exactly_six_digits() {
        assert!(OneTimeCode::parse("654321").is_ok());
        assert_eq!(
            OneTimeCode::parse("65432"),
            Err(CredentialError::CodeLength { actual: 5 })
        );
        assert_eq!(
            OneTimeCode::parse("12a45"),
            Err(CredentialError::CodeLength { actual: 4 })
        );
    }

    #[test]
    fn code_is_never_printed() {
        let code = OneTimeCode::parse("654321").expect("valid code");
        assert!(!format!("{code:?}").contains("654321"));
    }

    #[test]
    fn credential_errors_have_i18n_keys() {
        assert_eq!(
            CredentialError::IdentifierLength { actual: 3 }.i18n_key(),
            "login-error-identifier-length"
        );
        assert_eq!(
            CredentialError::CodeLength { actual: 3 }.i18n_key(),
            "login-error-code-length"
        );
    }
}
