// SPDX-License-Identifier: MPL-2.0
//! Session-scoped key/value store.
//!
//! Lives only as long as the process and is cleared on logout. The
//! authenticated role is kept under [`ROLE_KEY`] in its stable string form.

use crate::domain::identity::Role;
use std::collections::HashMap;

/// Key holding the authenticated role.
pub const ROLE_KEY: &str = "userType";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionStore {
    values: HashMap<String, String>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn set_role(&mut self, role: Role) {
        self.set(ROLE_KEY, role.as_str());
    }

    /// Authenticated role, if any. An unparsable value counts as signed out.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        let raw = self.get(ROLE_KEY)?;
        match raw.parse() {
            Ok(role) => Some(role),
            Err(err) => {
                tracing::warn!(%err, "session store holds an unknown role");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_is_stored_under_user_type() {
        let mut store = SessionStore::new();
        store.set_role(Role::Employee);
        assert_eq!(store.get("userType"), Some("employee"));
        assert_eq!(store.role(), Some(Role::Employee));
    }

    #[test]
    fn empty_store_has_no_role() {
        assert_eq!(SessionStore::new().role(), None);
    }

    #[test]
    fn unknown_role_reads_as_signed_out() {
        let mut store = SessionStore::new();
        store.set(ROLE_KEY, "mayor");
        assert_eq!(store.role(), None);
    }

    #[test]
    fn clear_removes_everything() {
        let mut store = SessionStore::new();
        store.set_role(Role::Collector);
        store.set("other", "value");
        store.clear();
        assert_eq!(store.role(), None);
        assert_eq!(store.get("other"), None);
    }

    #[test]
    fn remove_returns_previous_value() {
        let mut store = SessionStore::new();
        store.set("k", "v");
        assert_eq!(store.remove("k").as_deref(), Some("v"));
        assert_eq!(store.remove("k"), None);
    }
}
