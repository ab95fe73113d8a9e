//! Capability descriptor construction.
//!
//! The descriptor sent when requesting a remote grid session is built
//! purely from the startup settings at request time. Nothing here is
//! cached or persisted; every call recomputes the mapping.

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Value, json};
use thirtyfour::Capabilities;

use crate::settings::{StartupSettings, TargetBrowser};

// ============================================================================
// Constants
// ============================================================================

/// Chrome switch disabling the popup blocker.
///
/// Suites drive popup windows; the blocker would silently eat them.
pub const DISABLE_POPUP_BLOCKING: &str = "--disable-popup-blocking";

// ============================================================================
// Descriptor Construction
// ============================================================================

/// Builds the capability descriptor for a remote grid session.
///
/// Always sets `browserName` to the raw free-text browser name (grid
/// remotes match on the text, not on the resolved kind). Chrome targets
/// additionally get the vendor switch list with popup blocking disabled.
/// A `version` capability is set only when the settings carry a
/// non-empty browser version. No other fields are populated.
#[must_use]
pub fn remote_capabilities(settings: &StartupSettings) -> Capabilities {
    let mut caps = Capabilities::new();
    caps.insert(
        "browserName".to_string(),
        Value::String(settings.browser_type().to_string()),
    );

    if settings.target_browser() == TargetBrowser::GoogleChrome {
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": [DISABLE_POPUP_BLOCKING] }),
        );
    }

    if !settings.browser_version().is_empty() {
        caps.insert(
            "version".to_string(),
            Value::String(settings.browser_version().to_string()),
        );
    }

    caps
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(browser: &str, version: &str) -> StartupSettings {
        StartupSettings::builder()
            .browser_type(browser)
            .browser_version(version)
            .local_driver_directory("/opt/drivers")
            .build()
            .unwrap()
    }

    #[test]
    fn test_browser_name_is_raw_text() {
        let caps = remote_capabilities(&settings("googlechrome", ""));
        assert_eq!(
            caps.get("browserName").and_then(Value::as_str),
            Some("googlechrome")
        );
    }

    #[test]
    fn test_chrome_without_version() {
        let caps = remote_capabilities(&settings("googlechrome", ""));

        let options = caps.get("goog:chromeOptions").unwrap();
        let args = options["args"].as_array().unwrap();
        assert_eq!(args, &[json!(DISABLE_POPUP_BLOCKING)]);
        assert!(!caps.contains_key("version"));
    }

    #[test]
    fn test_firefox_with_version() {
        let caps = remote_capabilities(&settings("firefox", "52"));

        assert_eq!(caps.get("version"), Some(&json!("52")));
        assert!(!caps.contains_key("goog:chromeOptions"));
    }

    #[test]
    fn test_unknown_browser_still_builds() {
        // Settings never validate the browser text; the descriptor just
        // carries it through.
        let caps = remote_capabilities(&settings("unknown-browser", ""));
        assert_eq!(
            caps.get("browserName").and_then(Value::as_str),
            Some("unknown-browser")
        );
        assert!(!caps.contains_key("goog:chromeOptions"));
    }

    #[test]
    fn test_descriptor_has_no_extra_fields() {
        let caps = remote_capabilities(&settings("firefox", ""));
        assert_eq!(caps.len(), 1);

        let caps = remote_capabilities(&settings("googlechrome", "100"));
        assert_eq!(caps.len(), 3);
    }
}
