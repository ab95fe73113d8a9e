//! Driver factory.
//!
//! [`DriverFactory`] turns [`StartupSettings`] into a live, caller-owned
//! [`DriverHandle`]: either by launching a local driver binary and
//! connecting to it, or by requesting a session from a remote grid hub.
//! Both paths end with the same uniform step, setting the implicit wait
//! to the configured command timeout.
//!
//! # Example
//!
//! ```no_run
//! use webdriver_factory::{DriverFactory, StartupSettings};
//!
//! # async fn example() -> webdriver_factory::Result<()> {
//! let settings = StartupSettings::builder()
//!     .browser_type("googlechrome")
//!     .build()?;
//!
//! let handle = DriverFactory::new(settings).create_driver().await?;
//! handle.navigate("http://localhost").await?;
//! handle.quit().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use thirtyfour::{Capabilities, TimeoutConfiguration, WebDriver};
use tokio::process::{Child, Command};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::session::{DriverHandle, ProcessGuard};
use crate::settings::{StartupSettings, TargetBrowser};

use super::capabilities::remote_capabilities;
use super::plan::LaunchPlan;

// ============================================================================
// Constants
// ============================================================================

/// Poll interval while waiting for a freshly launched driver to accept
/// its first session.
const CONNECT_POLL_INTERVAL: Duration = Duration::from_millis(250);

// ============================================================================
// DriverFactory
// ============================================================================

/// Factory for creating driver handles from startup settings.
///
/// Stateless across calls; it holds only the settings reference and
/// never retains a handle after returning it. Concurrent calls are
/// independent and each produce their own session.
#[derive(Debug, Clone)]
pub struct DriverFactory {
    /// The startup settings driving every creation.
    settings: StartupSettings,
}

// ============================================================================
// DriverFactory - Public API
// ============================================================================

impl DriverFactory {
    /// Creates a factory over the given settings.
    #[inline]
    #[must_use]
    pub fn new(settings: StartupSettings) -> Self {
        Self { settings }
    }

    /// The settings this factory creates drivers from.
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &StartupSettings {
        &self.settings
    }

    /// Creates a driver handle, local or grid-based per the settings.
    ///
    /// Single-shot: no retry, backoff or fallback between browser kinds
    /// happens here. The handle's implicit wait is set to the command
    /// timeout before it is returned, on both paths.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedBrowser`] if the browser text resolved to
    ///   `Unknown`, or to a kind without a local construction rule.
    ///   Checked first; no process is launched and no network is touched.
    /// - [`Error::Config`] if grid mode is enabled without a hub server.
    /// - [`Error::Connection`] / [`Error::ConnectionTimeout`] if session
    ///   creation fails.
    /// - [`Error::DriverNotFound`] / [`Error::ProcessLaunch`] if the
    ///   local driver binary is missing or fails to start.
    pub async fn create_driver(&self) -> Result<DriverHandle> {
        let kind = self.settings.target_browser();
        if !kind.is_known() {
            return Err(Error::unsupported_browser(kind.name()));
        }

        let handle = if self.settings.run_using_grid() {
            self.create_grid_driver().await?
        } else {
            self.create_local_driver(kind).await?
        };

        // Uniform across both paths; a handle that cannot take its
        // timeouts is released rather than returned half-configured.
        if let Err(e) = self.apply_session_timeouts(&handle).await {
            handle.dispose().await;
            return Err(e);
        }

        report_session(&handle).await;
        Ok(handle)
    }
}

// ============================================================================
// DriverFactory - Grid Path
// ============================================================================

impl DriverFactory {
    /// Requests a session from the grid hub.
    async fn create_grid_driver(&self) -> Result<DriverHandle> {
        let hub = self
            .settings
            .hub_uri()
            .ok_or_else(|| Error::config("Grid mode requires a hub server name"))?;

        let caps = remote_capabilities(&self.settings);
        debug!(hub = %hub, "Creating a grid driver");

        let driver = WebDriver::new(hub.as_str(), caps.clone())
            .await
            .map_err(|e| Error::connection(format!("{hub}: {e}")))?;

        Ok(DriverHandle::remote(driver, caps))
    }
}

// ============================================================================
// DriverFactory - Local Path
// ============================================================================

impl DriverFactory {
    /// Launches the local driver binary and connects to it.
    async fn create_local_driver(&self, kind: TargetBrowser) -> Result<DriverHandle> {
        let plan = LaunchPlan::for_browser(kind, &self.settings)
            .ok_or_else(|| Error::unsupported_browser(kind.name()))?;

        debug!(browser = %kind, binary = plan.binary_name(), "Creating a local driver");

        let child = self.spawn_driver_process(&plan)?;
        let caps = plan.session_capabilities();

        match connect_with_deadline(&plan.endpoint(), &caps, self.settings.timeout()).await {
            Ok(driver) => Ok(DriverHandle::local(driver, child, caps)),
            Err(e) => {
                // The process came up but never took a session.
                ProcessGuard::new(child).kill().await;
                Err(e)
            }
        }
    }

    /// Spawns the driver process described by the plan.
    fn spawn_driver_process(&self, plan: &LaunchPlan) -> Result<Child> {
        let binary = plan.binary_path();

        let mut cmd = Command::new(&binary);
        cmd.args(plan.process_args());

        // Suppress stdio
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::driver_not_found(plan.binary_name())
            } else {
                Error::process_launch(e)
            }
        })?;

        info!(
            binary = %binary.display(),
            port = plan.port(),
            pid = child.id(),
            "Driver process spawned"
        );
        Ok(child)
    }
}

// ============================================================================
// DriverFactory - Shared Post-Setup
// ============================================================================

impl DriverFactory {
    /// Applies the command timeout to the live session.
    ///
    /// Page-load and script timeouts carry the command budget; the
    /// implicit wait is the uniform element/page wait both paths share.
    async fn apply_session_timeouts(&self, handle: &DriverHandle) -> Result<()> {
        let timeout = self.settings.timeout();

        let timeouts = TimeoutConfiguration::new(Some(timeout), Some(timeout), None);
        handle.webdriver().update_timeouts(timeouts).await?;

        handle.set_implicit_wait(timeout).await?;
        Ok(())
    }
}

// ============================================================================
// Session Diagnostics
// ============================================================================

/// Logs the capability set and the live browser's user agent.
///
/// Diagnostic only; runs after the handle is fully set up and never
/// fails creation.
async fn report_session(handle: &DriverHandle) {
    info!(capabilities = ?handle.capabilities(), "Driver capabilities");

    match handle.user_agent().await {
        Ok(agent) => info!(user_agent = %agent, "User agent"),
        Err(e) => debug!(error = %e, "Failed to read user agent"),
    }
}

// ============================================================================
// Connect Deadline
// ============================================================================

/// Attempts session creation against a freshly launched driver until it
/// succeeds or the command timeout elapses.
///
/// The driver binary needs a moment between spawn and accepting its
/// first session; attempts before that fail with connection refused.
async fn connect_with_deadline(
    endpoint: &str,
    caps: &Capabilities,
    timeout: Duration,
) -> Result<WebDriver> {
    let deadline = Instant::now() + timeout;

    loop {
        match WebDriver::new(endpoint, caps.clone()).await {
            Ok(driver) => return Ok(driver),
            Err(e) if Instant::now() >= deadline => {
                debug!(endpoint, error = %e, "Driver endpoint never became ready");
                return Err(Error::connection_timeout(timeout.as_millis() as u64));
            }
            Err(e) => {
                debug!(endpoint, error = %e, "Driver endpoint not ready; polling");
                tokio::time::sleep(CONNECT_POLL_INTERVAL).await;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> crate::settings::StartupSettingsBuilder {
        StartupSettings::builder().local_driver_directory("/opt/drivers")
    }

    fn factory(browser: &str) -> DriverFactory {
        DriverFactory::new(settings().browser_type(browser).build().unwrap())
    }

    #[tokio::test]
    async fn test_unknown_browser_is_rejected_before_any_work() {
        let err = factory("unknown-browser").create_driver().await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedBrowser { .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_local_safari_has_no_construction_rule() {
        let err = factory("safari").create_driver().await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedBrowser { .. }));
    }

    #[tokio::test]
    async fn test_grid_without_hub_name_is_config_error() {
        let settings = settings()
            .browser_type("googlechrome")
            .run_using_grid(true)
            .build()
            .unwrap();
        let err = DriverFactory::new(settings)
            .create_driver()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Config { .. }));
    }

    #[tokio::test]
    async fn test_missing_driver_binary_reports_driver_not_found() {
        let plan = LaunchPlan::for_browser(
            TargetBrowser::GoogleChrome,
            &settings().local_driver_directory("/nonexistent").build().unwrap(),
        )
        .unwrap();

        let err = factory("googlechrome")
            .spawn_driver_process(&plan)
            .unwrap_err();
        assert!(matches!(err, Error::DriverNotFound { .. }));
    }

    #[tokio::test]
    async fn test_connect_deadline_expires() {
        // Nothing listens on this endpoint; a zero budget fails on the
        // first attempt.
        let caps = Capabilities::new();
        let err = connect_with_deadline("http://localhost:1", &caps, Duration::ZERO)
            .await
            .unwrap_err();

        assert!(err.is_connection_error());
    }

    #[test]
    fn test_factory_is_clone_and_debug() {
        fn assert_clone<T: Clone>() {}
        fn assert_debug<T: std::fmt::Debug>() {}
        assert_clone::<DriverFactory>();
        assert_debug::<DriverFactory>();
    }
}
