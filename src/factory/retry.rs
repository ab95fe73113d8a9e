//! Caller-level acquisition retry.
//!
//! [`DriverFactory::create_driver`] is single-shot by design. Suites
//! that want resilience against a grid warming up or a driver binary
//! restarting wrap it in [`acquire_driver`], which polls at the
//! configured interval until the configured budget elapses.

// ============================================================================
// Imports
// ============================================================================

use tokio::time::Instant;
use tracing::warn;

use crate::error::Result;
use crate::session::DriverHandle;

use super::core::DriverFactory;

// ============================================================================
// Acquisition Loop
// ============================================================================

/// Acquires a driver, retrying transient failures.
///
/// Polls [`DriverFactory::create_driver`] every
/// `acquire_context_interval` until `acquire_context_timeout` elapses.
/// Only connection and process launch errors are retried;
/// [`Error::UnsupportedBrowser`](crate::Error::UnsupportedBrowser) and
/// configuration errors propagate immediately. When the budget runs out
/// the last error is returned unmodified.
pub async fn acquire_driver(factory: &DriverFactory) -> Result<DriverHandle> {
    let budget = factory.settings().acquire_context_timeout();
    let interval = factory.settings().acquire_context_interval();
    let deadline = Instant::now() + budget;

    loop {
        match factory.create_driver().await {
            Ok(handle) => return Ok(handle),
            Err(e) if e.is_retryable() && Instant::now() < deadline => {
                warn!(error = %e, retry_in = ?interval, "Driver acquisition failed; retrying");
                tokio::time::sleep(interval).await;
            }
            Err(e) => return Err(e),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;
    use crate::settings::StartupSettings;

    #[tokio::test]
    async fn test_unsupported_browser_is_never_retried() {
        let settings = StartupSettings::builder()
            .browser_type("unknown-browser")
            .local_driver_directory("/opt/drivers")
            .build()
            .unwrap();
        let factory = DriverFactory::new(settings);

        // A generous budget must not delay the failure.
        let started = std::time::Instant::now();
        let err = acquire_driver(&factory).await.unwrap_err();

        assert!(matches!(err, Error::UnsupportedBrowser { .. }));
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_exhausted_budget_returns_last_error() {
        // Chrome with a bogus driver directory fails to launch; a zero
        // budget means the transient error is returned after one try.
        let settings = StartupSettings::builder()
            .browser_type("googlechrome")
            .local_driver_directory("/nonexistent")
            .acquire_context_timeout_seconds(0)
            .acquire_context_interval_seconds(0)
            .build()
            .unwrap();
        let factory = DriverFactory::new(settings);

        let err = acquire_driver(&factory).await.unwrap_err();
        assert!(err.is_process_launch_error());
    }
}
