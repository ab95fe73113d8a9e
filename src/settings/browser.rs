//! Target browser resolution.
//!
//! Settings accept the browser as free text ("googlechrome", "ff", "ie")
//! and derive a [`TargetBrowser`] from it on every read. Resolution is
//! deliberately liberal: unrecognized text degrades to
//! [`TargetBrowser::Unknown`] instead of erroring, and the factory rejects
//! `Unknown` at creation time.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// TargetBrowser
// ============================================================================

/// The browser a driver will be created for.
///
/// Derived from the free-text browser name in the startup settings.
/// Local runs may not support all kinds; grid remotes match on the raw
/// text, not on this enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetBrowser {
    /// Mozilla Firefox.
    Firefox,
    /// Microsoft Internet Explorer.
    InternetExplorer,
    /// Google Chrome.
    GoogleChrome,
    /// Apple Safari.
    Safari,
    /// Unrecognized browser text. Rejected by the factory.
    Unknown,
}

// ============================================================================
// Resolution Rules
// ============================================================================

/// Substring fallback rules, tested in order after the exact match fails.
///
/// Order matters: "ff" is checked before "safari", so text containing
/// both ("safariff") resolves to Firefox.
const FALLBACK_RULES: &[(&[&str], TargetBrowser)] = &[
    (&["firefox", "ff"], TargetBrowser::Firefox),
    (&["explore", "ie"], TargetBrowser::InternetExplorer),
    (&["chrome"], TargetBrowser::GoogleChrome),
    (&["safari"], TargetBrowser::Safari),
];

// ============================================================================
// TargetBrowser Implementation
// ============================================================================

impl TargetBrowser {
    /// All enumeration members, in declaration order.
    pub const ALL: [TargetBrowser; 5] = [
        TargetBrowser::Firefox,
        TargetBrowser::InternetExplorer,
        TargetBrowser::GoogleChrome,
        TargetBrowser::Safari,
        TargetBrowser::Unknown,
    ];

    /// Resolves free browser text into a target browser.
    ///
    /// First attempts a case-insensitive exact match against the member
    /// names. If that fails, lower-cases the text and checks substring
    /// containment against the fallback rules in order. Text matching no
    /// rule resolves to [`TargetBrowser::Unknown`]; no error is raised
    /// here.
    #[must_use]
    pub fn resolve(text: &str) -> Self {
        for kind in Self::ALL {
            if text.eq_ignore_ascii_case(kind.name()) {
                return kind;
            }
        }

        let lowered = text.to_lowercase();
        for (needles, kind) in FALLBACK_RULES {
            if needles.iter().any(|needle| lowered.contains(needle)) {
                return *kind;
            }
        }

        TargetBrowser::Unknown
    }

    /// Returns the member name of this kind.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            TargetBrowser::Firefox => "Firefox",
            TargetBrowser::InternetExplorer => "InternetExplorer",
            TargetBrowser::GoogleChrome => "GoogleChrome",
            TargetBrowser::Safari => "Safari",
            TargetBrowser::Unknown => "Unknown",
        }
    }

    /// Returns `true` if this kind can be passed to the factory at all.
    #[inline]
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, TargetBrowser::Unknown)
    }
}

impl fmt::Display for TargetBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_exact_names_any_case() {
        assert_eq!(TargetBrowser::resolve("Firefox"), TargetBrowser::Firefox);
        assert_eq!(TargetBrowser::resolve("FIREFOX"), TargetBrowser::Firefox);
        assert_eq!(TargetBrowser::resolve("firefox"), TargetBrowser::Firefox);
        assert_eq!(
            TargetBrowser::resolve("internetexplorer"),
            TargetBrowser::InternetExplorer
        );
        assert_eq!(
            TargetBrowser::resolve("GoogleChrome"),
            TargetBrowser::GoogleChrome
        );
        assert_eq!(TargetBrowser::resolve("safari"), TargetBrowser::Safari);
        assert_eq!(TargetBrowser::resolve("unknown"), TargetBrowser::Unknown);
    }

    #[test]
    fn test_substring_fallback() {
        assert_eq!(TargetBrowser::resolve("ff"), TargetBrowser::Firefox);
        assert_eq!(TargetBrowser::resolve("ff 52"), TargetBrowser::Firefox);
        assert_eq!(
            TargetBrowser::resolve("ie"),
            TargetBrowser::InternetExplorer
        );
        assert_eq!(
            TargetBrowser::resolve("internet explorer"),
            TargetBrowser::InternetExplorer
        );
        assert_eq!(
            TargetBrowser::resolve("googlechrome"),
            TargetBrowser::GoogleChrome
        );
        assert_eq!(
            TargetBrowser::resolve("chrome beta"),
            TargetBrowser::GoogleChrome
        );
        assert_eq!(
            TargetBrowser::resolve("mobile safari"),
            TargetBrowser::Safari
        );
    }

    #[test]
    fn test_unrecognized_text_degrades_to_unknown() {
        assert_eq!(TargetBrowser::resolve(""), TargetBrowser::Unknown);
        assert_eq!(
            TargetBrowser::resolve("unknown-browser"),
            TargetBrowser::Unknown
        );
        assert_eq!(TargetBrowser::resolve("opera"), TargetBrowser::Unknown);
    }

    #[test]
    fn test_rule_order_ff_wins_over_safari() {
        // "safariff" contains both "safari" and "ff"; the rule order puts
        // "ff" first, so Firefox wins.
        assert_eq!(TargetBrowser::resolve("safariff"), TargetBrowser::Firefox);
    }

    #[test]
    fn test_display_matches_member_name() {
        assert_eq!(TargetBrowser::GoogleChrome.to_string(), "GoogleChrome");
        assert_eq!(TargetBrowser::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_is_known() {
        assert!(TargetBrowser::Firefox.is_known());
        assert!(!TargetBrowser::Unknown.is_known());
    }

    proptest! {
        #[test]
        fn prop_chrome_substring_resolves_to_chrome(
            prefix in "[a-z0-9]{0,8}",
            suffix in "[a-z0-9]{0,8}",
        ) {
            let text = format!("{prefix}chrome{suffix}");
            // Skip inputs that hit an earlier rule or an exact name.
            prop_assume!(!text.contains("ff"));
            prop_assume!(!text.contains("ie"));
            prop_assume!(!text.contains("explore"));
            prop_assume!(!text.eq_ignore_ascii_case("googlechrome"));
            prop_assert_eq!(TargetBrowser::resolve(&text), TargetBrowser::GoogleChrome);
        }

        #[test]
        fn prop_resolution_never_panics(text in ".{0,64}") {
            let _ = TargetBrowser::resolve(&text);
        }
    }
}
