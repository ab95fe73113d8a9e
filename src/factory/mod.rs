//! Driver factory and capability resolution.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DriverFactory`] | Creates driver handles from startup settings |
//! | [`LaunchPlan`] | Per-browser local construction parameters |
//! | [`remote_capabilities`] | Grid capability descriptor construction |
//! | [`acquire_driver`] | Caller-level retry over the configured budget |
//!
//! # Example
//!
//! ```no_run
//! use webdriver_factory::{DriverFactory, StartupSettings, acquire_driver};
//!
//! # async fn example() -> webdriver_factory::Result<()> {
//! let settings = StartupSettings::builder()
//!     .browser_type("ff")
//!     .build()?;
//!
//! let factory = DriverFactory::new(settings);
//! let handle = acquire_driver(&factory).await?;
//! handle.quit().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Capability descriptor construction for grid sessions.
pub mod capabilities;

/// Core factory implementation.
pub mod core;

/// Per-browser local launch plans.
pub mod plan;

/// Caller-level acquisition retry loop.
pub mod retry;

// ============================================================================
// Re-exports
// ============================================================================

pub use capabilities::remote_capabilities;
pub use core::DriverFactory;
pub use plan::LaunchPlan;
pub use retry::acquire_driver;
