//! Thin given/when/then layer for UI suites.
//!
//! The crate does not ship a test runner; suites keep using their own.
//! This module only provides the narration layer on top: [`Scenario`]
//! steps that log what the suite is doing, canonical [`browser_names`],
//! and [`for_all_browsers`] for running one scenario body per supported
//! browser with a fresh local driver each time.
//!
//! # Example
//!
//! ```no_run
//! use webdriver_factory::harness::{Scenario, for_all_browsers};
//!
//! # async fn example() -> webdriver_factory::Result<()> {
//! for_all_browsers(|browser, handle| {
//!     Box::pin(async move {
//!         let scenario = Scenario::new(format!("search smoke ({browser})"));
//!         scenario.given("a live driver", || ());
//!
//!         handle.navigate("http://localhost").await?;
//!
//!         let agent = handle.user_agent().await?;
//!         scenario.then("the browser reports a user agent", || {
//!             scenario.expect("user agent is non-empty", !agent.is_empty());
//!         });
//!         Ok(())
//!     })
//! })
//! .await
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::pin::Pin;

use tracing::{error, info};

use crate::error::Result;
use crate::factory::DriverFactory;
use crate::session::DriverHandle;
use crate::settings::StartupSettings;

// ============================================================================
// Browser Names
// ============================================================================

/// Canonical free-text names for the supported browsers.
pub mod browser_names {
    /// Google Chrome.
    pub const CHROME: &str = "googlechrome";

    /// Mozilla Firefox.
    pub const FIREFOX: &str = "firefox";

    /// Microsoft Internet Explorer.
    pub const INTERNET_EXPLORER: &str = "ie";
}

/// Browsers a scenario runs against by default.
pub const SUPPORTED_BROWSERS: [&str; 3] = [
    browser_names::CHROME,
    browser_names::FIREFOX,
    browser_names::INTERNET_EXPLORER,
];

// ============================================================================
// Scenario
// ============================================================================

/// Given/when/then narration for a single scenario.
///
/// Each step logs its description and runs the step closure, returning
/// its value so steps nest and chain naturally. [`expect`](Self::expect)
/// panics on a failed expectation, which is how the embedding test
/// runner sees the scenario fail.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario name used in every step log line.
    name: String,
}

impl Scenario {
    /// Creates a named scenario.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The scenario name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs a "given" step.
    pub fn given<T>(&self, description: &str, step: impl FnOnce() -> T) -> T {
        self.step("given", description, step)
    }

    /// Runs a "when" step.
    pub fn when<T>(&self, description: &str, step: impl FnOnce() -> T) -> T {
        self.step("when", description, step)
    }

    /// Runs a "then" step.
    pub fn then<T>(&self, description: &str, step: impl FnOnce() -> T) -> T {
        self.step("then", description, step)
    }

    /// Checks an expectation, failing the scenario when it does not hold.
    pub fn expect(&self, description: &str, condition: bool) {
        if !condition {
            error!(scenario = %self.name, description, "Expectation failed");
            panic!("{}: expected {description}", self.name);
        }
        info!(scenario = %self.name, description, "Expectation held");
    }

    fn step<T>(&self, keyword: &str, description: &str, step: impl FnOnce() -> T) -> T {
        info!(scenario = %self.name, keyword, description, "Step");
        step()
    }
}

// ============================================================================
// For All Browsers
// ============================================================================

/// Default local settings for a named browser.
pub fn local_settings(browser: &str) -> Result<StartupSettings> {
    StartupSettings::builder()
        .browser_type(browser)
        .run_using_grid(false)
        .build()
}

/// Runs a scenario body once per supported browser.
///
/// A fresh local driver is created for each browser and released on
/// every exit path, including a failing body. The first failure stops
/// the run.
pub async fn for_all_browsers<F>(body: F) -> Result<()>
where
    F: for<'a> Fn(&'a str, &'a DriverHandle) -> Pin<Box<dyn Future<Output = Result<()>> + 'a>>,
{
    for browser in SUPPORTED_BROWSERS {
        info!(browser, "Creating driver for scenario run");

        let factory = DriverFactory::new(local_settings(browser)?);
        let handle = factory.create_driver().await?;

        let outcome = body(browser, &handle).await;
        let teardown = handle.quit().await;

        outcome?;
        teardown?;
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::settings::TargetBrowser;

    #[test]
    fn test_steps_return_their_value() {
        let scenario = Scenario::new("steps");

        let given = scenario.given("a number", || 2);
        let when = scenario.when("we double it", || given * 2);
        let then = scenario.then("it is four", || when == 4);

        assert!(then);
    }

    #[test]
    fn test_expect_holds() {
        Scenario::new("holds").expect("truth", true);
    }

    #[test]
    #[should_panic(expected = "expected the impossible")]
    fn test_expect_fails_the_scenario() {
        Scenario::new("fails").expect("the impossible", false);
    }

    #[test]
    fn test_supported_browsers_all_resolve() {
        for browser in SUPPORTED_BROWSERS {
            let settings = StartupSettings::builder()
                .browser_type(browser)
                .local_driver_directory("/opt/drivers")
                .build()
                .unwrap();
            assert_ne!(settings.target_browser(), TargetBrowser::Unknown);
        }
    }

    #[test]
    fn test_local_settings_disable_grid() {
        let settings = local_settings(browser_names::CHROME).unwrap();
        assert!(!settings.run_using_grid());
        assert_eq!(settings.browser_type(), "googlechrome");
    }
}
