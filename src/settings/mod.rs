//! Startup settings and browser resolution.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StartupSettings`] | Immutable driver acquisition configuration |
//! | [`StartupSettingsBuilder`] | Fluent configuration builder |
//! | [`TargetBrowser`] | Browser kind derived from free text |
//!
//! # Example
//!
//! ```
//! use webdriver_factory::{StartupSettings, TargetBrowser};
//!
//! # fn example() -> webdriver_factory::Result<()> {
//! let settings = StartupSettings::builder()
//!     .browser_type("ff")
//!     .run_using_grid(true)
//!     .hub_server_name("gridhost")
//!     .build()?;
//!
//! assert_eq!(settings.target_browser(), TargetBrowser::Firefox);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Target browser enumeration and free-text resolution.
pub mod browser;

/// Local driver binary discovery on the search path.
pub mod discovery;

/// Startup settings value object and builder.
pub mod startup;

// ============================================================================
// Re-exports
// ============================================================================

pub use browser::TargetBrowser;
pub use startup::{StartupSettings, StartupSettingsBuilder};
