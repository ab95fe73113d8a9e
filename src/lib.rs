//! WebDriver factory - startup settings and driver acquisition for UI suites.
//!
//! This library configures and instantiates browser automation drivers,
//! local or grid-based, on top of the [`thirtyfour`] WebDriver client.
//! It owns none of the wire protocol; it owns the decisions around it:
//! which browser, which endpoint, which capabilities, which timeouts.
//!
//! # Architecture
//!
//! Two components, composed in one direction:
//!
//! - **[`StartupSettings`]**: an immutable configuration value object.
//!   Browser selection is free text resolved into a [`TargetBrowser`] on
//!   every read; the local driver binary directory is resolved from the
//!   search path once, at construction.
//! - **[`DriverFactory`]**: consumes the settings and produces an
//!   exclusively owned [`DriverHandle`], either by launching a local
//!   driver binary or by requesting a session from a grid hub, then
//!   uniformly applies the configured implicit wait.
//!
//! Unrecognized browser text is accepted liberally at the settings level
//! and rejected strictly at creation time. All errors surface to the
//! caller; the factory never retries. Suites that want retry wrap the
//! factory in [`acquire_driver`], which polls over the configured budget
//! and only retries transient failures.
//!
//! # Quick Start
//!
//! ```no_run
//! use webdriver_factory::{DriverFactory, Result, StartupSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let settings = StartupSettings::builder()
//!         .browser_type("googlechrome")
//!         .timeout_seconds(30)
//!         .build()?;
//!
//!     let handle = DriverFactory::new(settings).create_driver().await?;
//!
//!     handle.navigate("http://localhost").await?;
//!     println!("User agent: {}", handle.user_agent().await?);
//!
//!     handle.quit().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`settings`] | Startup settings, browser resolution, binary discovery |
//! | [`factory`] | Driver factory, launch plans, capability descriptors |
//! | [`session`] | Owned driver handles and teardown |
//! | [`harness`] | Given/when/then narration for suites |
//! | [`error`] | Error types and [`Result`] alias |

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Driver factory and capability resolution.
///
/// Use [`DriverFactory::new`] with built [`StartupSettings`].
pub mod factory;

/// Given/when/then scenario narration.
///
/// A thin layer over the embedding test runner, not a runner itself.
pub mod harness;

/// Driver handle ownership and teardown.
pub mod session;

/// Startup settings and browser resolution.
///
/// Use [`StartupSettings::builder()`] to construct settings.
pub mod settings;

// ============================================================================
// Re-exports
// ============================================================================

// Settings types
pub use settings::{StartupSettings, StartupSettingsBuilder, TargetBrowser};

// Factory types
pub use factory::{DriverFactory, LaunchPlan, acquire_driver, remote_capabilities};

// Session types
pub use session::DriverHandle;

// Error types
pub use error::{Error, Result};
