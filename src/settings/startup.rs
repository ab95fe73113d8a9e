//! Startup settings for driver acquisition.
//!
//! [`StartupSettings`] is an immutable-after-construction value object
//! holding everything the factory needs: browser selection, timeouts,
//! grid endpoints and the local driver binary directory. Construct it
//! through [`StartupSettings::builder()`].
//!
//! # Example
//!
//! ```
//! use webdriver_factory::StartupSettings;
//!
//! # fn example() -> webdriver_factory::Result<()> {
//! let settings = StartupSettings::builder()
//!     .browser_type("googlechrome")
//!     .timeout_seconds(30)
//!     .build()?;
//!
//! assert!(settings.hub_uri().is_none());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

use super::browser::TargetBrowser;
use super::discovery;

// ============================================================================
// Constants
// ============================================================================

/// Default free-text browser name.
pub const DEFAULT_BROWSER_TYPE: &str = "googlechrome";

/// Default first page loaded by a suite.
pub const DEFAULT_WEB_ROOT: &str = "http://localhost";

/// Default hub server port.
pub const DEFAULT_HUB_PORT: u16 = 4444;

/// Default initial browser window width in pixels.
pub const DEFAULT_BROWSER_WIDTH: u32 = 1024;

/// Default initial browser window height in pixels.
pub const DEFAULT_BROWSER_HEIGHT: u32 = 768;

/// Default command timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Relative path of the hub session endpoint.
pub const HUB_RELATIVE_PATH: &str = "wd/hub";

const DEFAULT_AJAX_TIMEOUT_SECONDS: u64 = 8;
const DEFAULT_CLIENT_SIDE_TIMEOUT_SECONDS: u64 = 2;
const DEFAULT_ACQUIRE_TIMEOUT_SECONDS: u64 = 300;
const DEFAULT_ACQUIRE_INTERVAL_SECONDS: u64 = 20;

// ============================================================================
// StartupSettings
// ============================================================================

/// Configuration values required to acquire a driver.
///
/// Immutable after construction. The target browser is never stored; it
/// is recomputed from the free browser text on every read, so there is no
/// way for the two to disagree.
#[derive(Debug, Clone)]
pub struct StartupSettings {
    browser_type: String,
    browser_version: String,
    timeout_seconds: u64,
    ajax_timeout: Duration,
    client_side_timeout: Duration,
    browser_width: u32,
    browser_height: u32,
    run_using_grid: bool,
    hub_server_name: String,
    hub_server_port: u16,
    web_root: String,
    who_am_i_server: String,
    local_driver_directory: PathBuf,
    acquire_context_timeout_seconds: u64,
    acquire_context_interval_seconds: u64,
}

// ============================================================================
// StartupSettings - Accessors
// ============================================================================

impl StartupSettings {
    /// Creates a configuration builder with default settings.
    #[inline]
    #[must_use]
    pub fn builder() -> StartupSettingsBuilder {
        StartupSettingsBuilder::new()
    }

    /// The free-text browser name.
    ///
    /// In grid mode this becomes the `browserName` capability verbatim.
    #[inline]
    #[must_use]
    pub fn browser_type(&self) -> &str {
        &self.browser_type
    }

    /// The requested browser version. Empty when unconstrained.
    #[inline]
    #[must_use]
    pub fn browser_version(&self) -> &str {
        &self.browser_version
    }

    /// The target browser derived from [`browser_type`](Self::browser_type).
    ///
    /// Recomputed on every read; there is no setter.
    #[inline]
    #[must_use]
    pub fn target_browser(&self) -> TargetBrowser {
        TargetBrowser::resolve(&self.browser_type)
    }

    /// The command timeout.
    ///
    /// Applied to session creation and, uniformly, as the implicit wait
    /// on every handle the factory returns.
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The command timeout in whole seconds.
    #[inline]
    #[must_use]
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    /// Timeout for AJAX operations against a warm page.
    #[inline]
    #[must_use]
    pub fn ajax_timeout(&self) -> Duration {
        self.ajax_timeout
    }

    /// Timeout for purely client-side actions.
    #[inline]
    #[must_use]
    pub fn client_side_timeout(&self) -> Duration {
        self.client_side_timeout
    }

    /// Initial browser window width in pixels.
    #[inline]
    #[must_use]
    pub fn browser_width(&self) -> u32 {
        self.browser_width
    }

    /// Initial browser window height in pixels.
    #[inline]
    #[must_use]
    pub fn browser_height(&self) -> u32 {
        self.browser_height
    }

    /// Whether drivers are created against the grid hub.
    #[inline]
    #[must_use]
    pub fn run_using_grid(&self) -> bool {
        self.run_using_grid
    }

    /// The grid hub server name. Empty when no hub is configured.
    #[inline]
    #[must_use]
    pub fn hub_server_name(&self) -> &str {
        &self.hub_server_name
    }

    /// The port used by the hub server.
    ///
    /// Also reused as the local port for the Internet Explorer driver.
    #[inline]
    #[must_use]
    pub fn hub_server_port(&self) -> u16 {
        self.hub_server_port
    }

    /// The first page a suite loads.
    #[inline]
    #[must_use]
    pub fn root_url(&self) -> &str {
        &self.web_root
    }

    /// Directory containing the local driver binary.
    ///
    /// Resolved once, at construction time. Empty when the binary was not
    /// found on the search path.
    #[inline]
    #[must_use]
    pub fn local_driver_directory(&self) -> &Path {
        &self.local_driver_directory
    }

    /// Total budget for retrying driver acquisition.
    #[inline]
    #[must_use]
    pub fn acquire_context_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_context_timeout_seconds)
    }

    /// Interval between driver acquisition attempts.
    #[inline]
    #[must_use]
    pub fn acquire_context_interval(&self) -> Duration {
        Duration::from_secs(self.acquire_context_interval_seconds)
    }
}

// ============================================================================
// StartupSettings - Derived Endpoints
// ============================================================================

impl StartupSettings {
    /// The hub session endpoint: `http://{host}:{port}/wd/hub`.
    ///
    /// `None` whenever the hub server name is empty, or the name does not
    /// form a valid URL host.
    #[must_use]
    pub fn hub_uri(&self) -> Option<Url> {
        if self.hub_server_name.is_empty() {
            return None;
        }

        Url::parse(&format!(
            "http://{}:{}/{}",
            self.hub_server_name, self.hub_server_port, HUB_RELATIVE_PATH
        ))
        .ok()
    }

    /// Endpoint of the service reporting the worker machine's name.
    ///
    /// Uses the dedicated who-am-i server when set, falling back to the
    /// hub server name. `None` when both are empty.
    #[must_use]
    pub fn who_am_i_uri(&self) -> Option<Url> {
        let host = if self.who_am_i_server.is_empty() {
            &self.hub_server_name
        } else {
            &self.who_am_i_server
        };

        if host.is_empty() {
            return None;
        }

        Url::parse(&format!("http://{host}")).ok()
    }
}

// ============================================================================
// StartupSettingsBuilder
// ============================================================================

/// Builder for [`StartupSettings`].
///
/// Starts from the stock defaults (local googlechrome, 30 second command
/// timeout, 1024x768) so a bare `build()` yields a usable configuration.
#[derive(Debug, Clone)]
pub struct StartupSettingsBuilder {
    browser_type: String,
    browser_version: String,
    timeout_seconds: u64,
    ajax_timeout: Duration,
    client_side_timeout: Duration,
    browser_width: u32,
    browser_height: u32,
    run_using_grid: bool,
    hub_server_name: String,
    hub_server_port: u16,
    web_root: String,
    who_am_i_server: String,
    local_driver_directory: Option<PathBuf>,
    acquire_context_timeout_seconds: u64,
    acquire_context_interval_seconds: u64,
}

impl Default for StartupSettingsBuilder {
    fn default() -> Self {
        Self {
            browser_type: DEFAULT_BROWSER_TYPE.to_string(),
            browser_version: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            ajax_timeout: Duration::from_secs(DEFAULT_AJAX_TIMEOUT_SECONDS),
            client_side_timeout: Duration::from_secs(DEFAULT_CLIENT_SIDE_TIMEOUT_SECONDS),
            browser_width: DEFAULT_BROWSER_WIDTH,
            browser_height: DEFAULT_BROWSER_HEIGHT,
            run_using_grid: false,
            hub_server_name: String::new(),
            hub_server_port: DEFAULT_HUB_PORT,
            web_root: DEFAULT_WEB_ROOT.to_string(),
            who_am_i_server: String::new(),
            local_driver_directory: None,
            acquire_context_timeout_seconds: DEFAULT_ACQUIRE_TIMEOUT_SECONDS,
            acquire_context_interval_seconds: DEFAULT_ACQUIRE_INTERVAL_SECONDS,
        }
    }
}

// ============================================================================
// StartupSettingsBuilder - Setters
// ============================================================================

impl StartupSettingsBuilder {
    /// Creates a new builder with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text browser name.
    ///
    /// Any text is accepted here; resolution happens on read and the
    /// factory rejects unresolvable names at creation time.
    #[inline]
    #[must_use]
    pub fn browser_type(mut self, browser_type: impl Into<String>) -> Self {
        self.browser_type = browser_type.into();
        self
    }

    /// Sets the requested browser version.
    #[inline]
    #[must_use]
    pub fn browser_version(mut self, version: impl Into<String>) -> Self {
        self.browser_version = version.into();
        self
    }

    /// Sets the command timeout in seconds.
    #[inline]
    #[must_use]
    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the AJAX timeout.
    #[inline]
    #[must_use]
    pub fn ajax_timeout(mut self, timeout: Duration) -> Self {
        self.ajax_timeout = timeout;
        self
    }

    /// Sets the client-side timeout.
    #[inline]
    #[must_use]
    pub fn client_side_timeout(mut self, timeout: Duration) -> Self {
        self.client_side_timeout = timeout;
        self
    }

    /// Sets the initial browser window size in pixels.
    #[inline]
    #[must_use]
    pub fn browser_size(mut self, width: u32, height: u32) -> Self {
        self.browser_width = width;
        self.browser_height = height;
        self
    }

    /// Enables or disables grid mode.
    #[inline]
    #[must_use]
    pub fn run_using_grid(mut self, enabled: bool) -> Self {
        self.run_using_grid = enabled;
        self
    }

    /// Sets the grid hub server name.
    #[inline]
    #[must_use]
    pub fn hub_server_name(mut self, name: impl Into<String>) -> Self {
        self.hub_server_name = name.into();
        self
    }

    /// Sets the hub server port.
    #[inline]
    #[must_use]
    pub fn hub_server_port(mut self, port: u16) -> Self {
        self.hub_server_port = port;
        self
    }

    /// Sets the first page a suite loads.
    #[inline]
    #[must_use]
    pub fn web_root(mut self, web_root: impl Into<String>) -> Self {
        self.web_root = web_root.into();
        self
    }

    /// Sets the who-am-i server name.
    #[inline]
    #[must_use]
    pub fn who_am_i_server(mut self, name: impl Into<String>) -> Self {
        self.who_am_i_server = name.into();
        self
    }

    /// Sets the local driver binary directory explicitly.
    ///
    /// When not set, the directory is resolved by scanning the process
    /// search path at build time.
    #[inline]
    #[must_use]
    pub fn local_driver_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.local_driver_directory = Some(directory.into());
        self
    }

    /// Sets the total retry budget for driver acquisition, in seconds.
    #[inline]
    #[must_use]
    pub fn acquire_context_timeout_seconds(mut self, seconds: u64) -> Self {
        self.acquire_context_timeout_seconds = seconds;
        self
    }

    /// Sets the retry polling interval for driver acquisition, in seconds.
    #[inline]
    #[must_use]
    pub fn acquire_context_interval_seconds(mut self, seconds: u64) -> Self {
        self.acquire_context_interval_seconds = seconds;
        self
    }
}

// ============================================================================
// StartupSettingsBuilder - Build
// ============================================================================

impl StartupSettingsBuilder {
    /// Builds the settings, resolving the local driver directory.
    ///
    /// Browser text is never validated here; unrecognized names degrade
    /// to [`TargetBrowser::Unknown`] and fail at driver creation instead.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the browser window dimensions are zero.
    pub fn build(self) -> Result<StartupSettings> {
        if self.browser_width == 0 || self.browser_height == 0 {
            return Err(Error::config(
                "Browser window dimensions must be greater than zero",
            ));
        }

        let local_driver_directory = self
            .local_driver_directory
            .or_else(discovery::find_driver_directory)
            .unwrap_or_default();

        Ok(StartupSettings {
            browser_type: self.browser_type,
            browser_version: self.browser_version,
            timeout_seconds: self.timeout_seconds,
            ajax_timeout: self.ajax_timeout,
            client_side_timeout: self.client_side_timeout,
            browser_width: self.browser_width,
            browser_height: self.browser_height,
            run_using_grid: self.run_using_grid,
            hub_server_name: self.hub_server_name,
            hub_server_port: self.hub_server_port,
            web_root: self.web_root,
            who_am_i_server: self.who_am_i_server,
            local_driver_directory,
            acquire_context_timeout_seconds: self.acquire_context_timeout_seconds,
            acquire_context_interval_seconds: self.acquire_context_interval_seconds,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> StartupSettingsBuilder {
        // Pin the driver directory so tests never scan the real PATH.
        StartupSettings::builder().local_driver_directory("/opt/drivers")
    }

    #[test]
    fn test_defaults() {
        let s = settings().build().unwrap();
        assert_eq!(s.browser_type(), "googlechrome");
        assert_eq!(s.target_browser(), TargetBrowser::GoogleChrome);
        assert_eq!(s.timeout(), Duration::from_secs(30));
        assert_eq!(s.ajax_timeout(), Duration::from_secs(8));
        assert_eq!(s.client_side_timeout(), Duration::from_secs(2));
        assert_eq!((s.browser_width(), s.browser_height()), (1024, 768));
        assert!(!s.run_using_grid());
        assert_eq!(s.hub_server_port(), 4444);
        assert_eq!(s.root_url(), "http://localhost");
        assert_eq!(s.acquire_context_timeout(), Duration::from_secs(300));
        assert_eq!(s.acquire_context_interval(), Duration::from_secs(20));
    }

    #[test]
    fn test_target_browser_recomputed_from_text() {
        let s = settings().browser_type("ff").build().unwrap();
        assert_eq!(s.target_browser(), TargetBrowser::Firefox);

        let s = settings().browser_type("no such thing").build().unwrap();
        assert_eq!(s.target_browser(), TargetBrowser::Unknown);
    }

    #[test]
    fn test_hub_uri_absent_without_server_name() {
        let s = settings().build().unwrap();
        assert!(s.hub_uri().is_none());
    }

    #[test]
    fn test_hub_uri_format() {
        let s = settings()
            .hub_server_name("gridhost")
            .hub_server_port(4444)
            .build()
            .unwrap();

        assert_eq!(
            s.hub_uri().unwrap().as_str(),
            "http://gridhost:4444/wd/hub"
        );
    }

    #[test]
    fn test_who_am_i_uri_falls_back_to_hub_name() {
        let s = settings().hub_server_name("gridhost").build().unwrap();
        assert_eq!(s.who_am_i_uri().unwrap().as_str(), "http://gridhost/");

        let s = settings()
            .hub_server_name("gridhost")
            .who_am_i_server("whoami")
            .build()
            .unwrap();
        assert_eq!(s.who_am_i_uri().unwrap().as_str(), "http://whoami/");

        let s = settings().build().unwrap();
        assert!(s.who_am_i_uri().is_none());
    }

    #[test]
    fn test_explicit_driver_directory_is_kept() {
        let s = settings().build().unwrap();
        assert_eq!(s.local_driver_directory(), Path::new("/opt/drivers"));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = settings().browser_size(0, 768).build().unwrap_err();
        assert!(err.to_string().contains("dimensions"));
    }

    #[test]
    fn test_settings_are_clone() {
        let s = settings().build().unwrap();
        let cloned = s.clone();
        assert_eq!(s.browser_type(), cloned.browser_type());
    }
}
