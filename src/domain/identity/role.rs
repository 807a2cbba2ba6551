// SPDX-License-Identifier: MPL-2.0
//! User roles selected at login.

use std::fmt;
use std::str::FromStr;

/// Coarse role chosen on the identity gate before the identifier step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Waste collector documenting pickups and disposals.
    #[default]
    Collector,
    /// Government employee supervising collection sites.
    Employee,
}

impl Role {
    /// All roles, in the order they are offered on the login screen.
    pub const ALL: [Role; 2] = [Role::Collector, Role::Employee];

    /// Stable string form, used as the session store value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Collector => "collector",
            Role::Employee => "employee",
        }
    }

    /// Returns the i18n key of the human-readable role label.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            Role::Collector => "role-collector",
            Role::Employee => "role-employee",
        }
    }

    /// Whether this role may edit the reference bin site.
    #[must_use]
    pub fn can_edit_site(self) -> bool {
        matches!(self, Role::Employee)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collector" => Ok(Role::Collector),
            "employee" => Ok(Role::Employee),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
