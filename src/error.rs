//! Error types for the driver factory.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use webdriver_factory::{DriverFactory, Result, StartupSettings};
//!
//! async fn example(factory: &DriverFactory) -> Result<()> {
//!     let handle = factory.create_driver().await?;
//!     handle.quit().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::UnsupportedBrowser`] |
//! | Process launch | [`Error::DriverNotFound`], [`Error::ProcessLaunch`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectionTimeout`] |
//! | External | [`Error::Io`], [`Error::WebDriver`], [`Error::UrlParse`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thirtyfour::error::WebDriverError;
use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when startup settings are internally inconsistent, e.g.
    /// grid mode enabled without a hub server name.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// The resolved target browser cannot be constructed.
    ///
    /// Returned when the browser text resolved to `Unknown`, or to a kind
    /// with no local construction rule. Fatal; never retried.
    #[error("Cannot create a browser of type {browser}")]
    UnsupportedBrowser {
        /// The browser kind or free text that failed to resolve.
        browser: String,
    },

    // ========================================================================
    // Process Launch Errors
    // ========================================================================
    /// Local driver binary not found.
    ///
    /// Returned when the driver executable is not present in the resolved
    /// binary directory or on the search path.
    #[error("Driver binary not found: {binary}")]
    DriverNotFound {
        /// File name of the missing driver executable.
        binary: String,
    },

    /// Failed to launch the local driver process.
    ///
    /// Returned when the driver binary exists but fails to start.
    #[error("Failed to launch driver process: {message}")]
    ProcessLaunch {
        /// Description of the launch failure.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// Session creation failed.
    ///
    /// Returned when the grid endpoint is unreachable or rejects the
    /// session request, or a freshly launched local driver refuses it.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Session was not established within the command timeout.
    #[error("Connection timeout after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// Error reported by the underlying WebDriver client.
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] WebDriverError),

    /// URL parse error.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an unsupported browser error.
    #[inline]
    pub fn unsupported_browser(browser: impl Into<String>) -> Self {
        Self::UnsupportedBrowser {
            browser: browser.into(),
        }
    }

    /// Creates a driver not found error.
    #[inline]
    pub fn driver_not_found(binary: impl Into<String>) -> Self {
        Self::DriverNotFound {
            binary: binary.into(),
        }
    }

    /// Creates a process launch error.
    #[inline]
    pub fn process_launch(err: IoError) -> Self {
        Self::ProcessLaunch {
            message: err.to_string(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a connection timeout error.
    #[inline]
    pub fn connection_timeout(timeout_ms: u64) -> Self {
        Self::ConnectionTimeout { timeout_ms }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::ConnectionTimeout { .. }
        )
    }

    /// Returns `true` if this is a process launch error.
    ///
    /// Covers both a missing driver binary and a binary that failed to
    /// start.
    #[inline]
    #[must_use]
    pub fn is_process_launch_error(&self) -> bool {
        matches!(self, Self::DriverNotFound { .. } | Self::ProcessLaunch { .. })
    }

    /// Returns `true` if acquisition may be retried after this error.
    ///
    /// Only connection and process launch failures are transient.
    /// [`Error::UnsupportedBrowser`] and configuration errors are never
    /// retried.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.is_connection_error() || self.is_process_launch_error()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::connection("failed to connect");
        assert_eq!(err.to_string(), "Connection failed: failed to connect");
    }

    #[test]
    fn test_unsupported_browser_display() {
        let err = Error::unsupported_browser("Unknown");
        assert_eq!(err.to_string(), "Cannot create a browser of type Unknown");
    }

    #[test]
    fn test_is_connection_error() {
        let conn_err = Error::connection("test");
        let timeout_err = Error::connection_timeout(1000);
        let other_err = Error::config("test");

        assert!(conn_err.is_connection_error());
        assert!(timeout_err.is_connection_error());
        assert!(!other_err.is_connection_error());
    }

    #[test]
    fn test_is_process_launch_error() {
        let missing = Error::driver_not_found("chromedriver");
        let launch = Error::ProcessLaunch {
            message: "spawn failed".into(),
        };

        assert!(missing.is_process_launch_error());
        assert!(launch.is_process_launch_error());
        assert!(!Error::config("test").is_process_launch_error());
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::connection("test").is_retryable());
        assert!(Error::driver_not_found("geckodriver").is_retryable());
        assert!(!Error::unsupported_browser("Unknown").is_retryable());
        assert!(!Error::config("test").is_retryable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
