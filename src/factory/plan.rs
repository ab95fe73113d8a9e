//! Local launch plans.
//!
//! Each supported browser kind maps to a [`LaunchPlan`] variant holding
//! its own construction parameters: driver binary, local port, process
//! arguments and session options. The factory resolves the plan through
//! a single lookup instead of branching per browser at every step.

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;

use serde_json::json;
use thirtyfour::{Capabilities, DesiredCapabilities};

use crate::settings::discovery::CHROMEDRIVER_EXE;
use crate::settings::{StartupSettings, TargetBrowser};

use super::capabilities::DISABLE_POPUP_BLOCKING;

// ============================================================================
// Constants
// ============================================================================

/// Default local port for chromedriver.
pub const CHROMEDRIVER_PORT: u16 = 9515;

/// Default local port for geckodriver.
pub const GECKODRIVER_PORT: u16 = 4444;

/// File name of the geckodriver executable.
#[cfg(windows)]
const GECKODRIVER_EXE: &str = "geckodriver.exe";

/// File name of the geckodriver executable.
#[cfg(not(windows))]
const GECKODRIVER_EXE: &str = "geckodriver";

/// File name of the Internet Explorer driver executable.
const IEDRIVER_EXE: &str = "IEDriverServer.exe";

// ============================================================================
// LaunchPlan
// ============================================================================

/// Construction parameters for a local driver session.
///
/// One variant per browser kind with a local construction rule; kinds
/// without one (Safari, Unknown) have no plan and fail driver creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchPlan {
    /// chromedriver from the resolved binary directory.
    Chrome {
        /// Directory holding the chromedriver binary. Empty when the
        /// search-path scan found nothing; the spawn then falls back to
        /// `PATH` resolution.
        driver_directory: PathBuf,
        /// Local port the driver listens on.
        port: u16,
    },

    /// geckodriver with the default profile and binary.
    Firefox {
        /// Local port the driver listens on.
        port: u16,
    },

    /// IE driver server on the configured local port.
    InternetExplorer {
        /// Local port the driver listens on.
        port: u16,
    },
}

// ============================================================================
// LaunchPlan - Lookup
// ============================================================================

impl LaunchPlan {
    /// Resolves the launch plan for a browser kind.
    ///
    /// Returns `None` for kinds without a local construction rule.
    #[must_use]
    pub fn for_browser(kind: TargetBrowser, settings: &StartupSettings) -> Option<Self> {
        match kind {
            TargetBrowser::GoogleChrome => Some(Self::Chrome {
                driver_directory: settings.local_driver_directory().to_path_buf(),
                port: CHROMEDRIVER_PORT,
            }),
            TargetBrowser::Firefox => Some(Self::Firefox {
                port: GECKODRIVER_PORT,
            }),
            // The IE driver reuses the configured hub port locally.
            TargetBrowser::InternetExplorer => Some(Self::InternetExplorer {
                port: settings.hub_server_port(),
            }),
            TargetBrowser::Safari | TargetBrowser::Unknown => None,
        }
    }
}

// ============================================================================
// LaunchPlan - Accessors
// ============================================================================

impl LaunchPlan {
    /// The browser kind this plan constructs.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TargetBrowser {
        match self {
            Self::Chrome { .. } => TargetBrowser::GoogleChrome,
            Self::Firefox { .. } => TargetBrowser::Firefox,
            Self::InternetExplorer { .. } => TargetBrowser::InternetExplorer,
        }
    }

    /// File name of the driver binary.
    #[inline]
    #[must_use]
    pub const fn binary_name(&self) -> &'static str {
        match self {
            Self::Chrome { .. } => CHROMEDRIVER_EXE,
            Self::Firefox { .. } => GECKODRIVER_EXE,
            Self::InternetExplorer { .. } => IEDRIVER_EXE,
        }
    }

    /// Full path of the driver binary to spawn.
    ///
    /// Chrome uses the resolved binary directory when one was found;
    /// everything else is left to `PATH` resolution.
    #[must_use]
    pub fn binary_path(&self) -> PathBuf {
        match self {
            Self::Chrome {
                driver_directory, ..
            } if !driver_directory.as_os_str().is_empty() => {
                driver_directory.join(self.binary_name())
            }
            _ => PathBuf::from(self.binary_name()),
        }
    }

    /// Local port the driver listens on.
    #[inline]
    #[must_use]
    pub const fn port(&self) -> u16 {
        match self {
            Self::Chrome { port, .. }
            | Self::Firefox { port }
            | Self::InternetExplorer { port } => *port,
        }
    }

    /// Command-line arguments for the driver process.
    #[must_use]
    pub fn process_args(&self) -> Vec<String> {
        match self {
            Self::Chrome { port, .. } | Self::Firefox { port } => {
                vec![format!("--port={port}")]
            }
            Self::InternetExplorer { port } => vec![format!("/port={port}")],
        }
    }

    /// Session endpoint of the launched driver.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.port())
    }

    /// Session options for the local browser.
    ///
    /// Chrome disables popup blocking; Firefox and Internet Explorer use
    /// their default options.
    #[must_use]
    pub fn session_capabilities(&self) -> Capabilities {
        match self {
            Self::Chrome { .. } => {
                let mut caps: Capabilities = DesiredCapabilities::chrome().into();
                caps.insert(
                    "goog:chromeOptions".to_string(),
                    json!({ "args": [DISABLE_POPUP_BLOCKING] }),
                );
                caps
            }
            Self::Firefox { .. } => DesiredCapabilities::firefox().into(),
            Self::InternetExplorer { .. } => DesiredCapabilities::internet_explorer().into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    fn settings() -> StartupSettings {
        StartupSettings::builder()
            .local_driver_directory("/opt/drivers")
            .build()
            .unwrap()
    }

    #[test]
    fn test_chrome_plan() {
        let plan = LaunchPlan::for_browser(TargetBrowser::GoogleChrome, &settings()).unwrap();

        assert_eq!(plan.kind(), TargetBrowser::GoogleChrome);
        assert_eq!(plan.binary_name(), CHROMEDRIVER_EXE);
        assert_eq!(plan.port(), CHROMEDRIVER_PORT);
        assert_eq!(
            plan.binary_path(),
            Path::new("/opt/drivers").join(CHROMEDRIVER_EXE)
        );
        assert_eq!(plan.process_args(), vec![format!("--port={CHROMEDRIVER_PORT}")]);
        assert_eq!(plan.endpoint(), "http://localhost:9515");
    }

    #[test]
    fn test_chrome_plan_without_resolved_directory() {
        let s = StartupSettings::builder()
            .local_driver_directory("")
            .build()
            .unwrap();
        let plan = LaunchPlan::for_browser(TargetBrowser::GoogleChrome, &s).unwrap();

        assert_eq!(plan.binary_path(), Path::new(CHROMEDRIVER_EXE));
    }

    #[test]
    fn test_firefox_plan() {
        let plan = LaunchPlan::for_browser(TargetBrowser::Firefox, &settings()).unwrap();

        assert_eq!(plan.binary_name(), GECKODRIVER_EXE);
        assert_eq!(plan.port(), GECKODRIVER_PORT);
        assert_eq!(plan.binary_path(), Path::new(GECKODRIVER_EXE));
    }

    #[test]
    fn test_ie_plan_uses_configured_port() {
        let s = StartupSettings::builder()
            .hub_server_port(5555)
            .local_driver_directory("/opt/drivers")
            .build()
            .unwrap();
        let plan = LaunchPlan::for_browser(TargetBrowser::InternetExplorer, &s).unwrap();

        assert_eq!(plan.port(), 5555);
        assert_eq!(plan.process_args(), vec!["/port=5555".to_string()]);
    }

    #[test]
    fn test_unsupported_kinds_have_no_plan() {
        assert!(LaunchPlan::for_browser(TargetBrowser::Safari, &settings()).is_none());
        assert!(LaunchPlan::for_browser(TargetBrowser::Unknown, &settings()).is_none());
    }

    #[test]
    fn test_chrome_session_capabilities_disable_popups() {
        let plan = LaunchPlan::for_browser(TargetBrowser::GoogleChrome, &settings()).unwrap();
        let caps = plan.session_capabilities();

        let options = caps.get("goog:chromeOptions").unwrap();
        let args = options["args"].as_array().unwrap();
        assert!(args.contains(&serde_json::json!(DISABLE_POPUP_BLOCKING)));
    }

    #[test]
    fn test_firefox_session_capabilities_are_defaults() {
        let plan = LaunchPlan::for_browser(TargetBrowser::Firefox, &settings()).unwrap();
        let caps = plan.session_capabilities();

        assert!(!caps.contains_key("goog:chromeOptions"));
    }
}
