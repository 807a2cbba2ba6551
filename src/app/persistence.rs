// SPDX-License-Identifier: MPL-2.0
//! Preference persistence.
//!
//! Every settings change is written to `settings.toml` right away. Failures
//! are reported as a notification key and never undo the in-memory change.

use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use unic_langid::LanguageIdentifier;

/// Writes `config` to disk.
///
/// Guarded during tests to keep isolation: unit tests exercise the logic by
/// calling the handlers directly without touching the user's config.
/// Returns the notification key to show when saving failed.
pub fn persist_config(config: &Config) -> Option<&'static str> {
    if cfg!(test) {
        return None;
    }
    match config::save(config) {
        Ok(()) => {
            tracing::debug!("config saved");
            None
        }
        Err(err) => {
            tracing::warn!(%err, "failed to save config");
            Some("notification-config-save-error")
        }
    }
}

/// Switches the UI language and records it in `config`.
pub fn apply_language_change(
    i18n: &mut I18n,
    config: &mut Config,
    locale: LanguageIdentifier,
) -> Option<&'static str> {
    i18n.set_locale(locale);
    let current = i18n.current_locale().to_string();
    tracing::info!(locale = %current, "language changed");
    config.general.language = Some(current);
    persist_config(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_change_updates_config() {
        let mut i18n = I18n::default();
        let mut config = Config::default();
        let hi: LanguageIdentifier = "hi".parse().expect("valid locale");

        assert_eq!(apply_language_change(&mut i18n, &mut config, hi.clone()), None);

        assert_eq!(i18n.current_locale(), &hi);
        assert_eq!(config.general.language.as_deref(), Some("hi"));
    }

    #[test]
    fn unknown_language_keeps_current_locale() {
        let mut i18n = I18n::default();
        let before = i18n.current_locale().clone();
        let mut config = Config::default();
        let xx: LanguageIdentifier = "xx".parse().expect("valid locale");

        apply_language_change(&mut i18n, &mut config, xx);

        assert_eq!(i18n.current_locale(), &before);
        assert_eq!(config.general.language, Some(before.to_string()));
    }
}
