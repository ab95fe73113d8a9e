//! Driver handle ownership and teardown.
//!
//! A [`DriverHandle`] represents a live automation session. The factory
//! transfers ownership to the caller on return; the caller is
//! responsible for releasing it with [`DriverHandle::quit()`] on every
//! exit path. For local sessions the handle also owns the driver binary
//! child process, which is killed as a last resort if the handle is
//! dropped without quitting.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use thirtyfour::{Capabilities, WebDriver};
use tokio::process::Child;
use tracing::{debug, info};

use crate::error::Result;

// ============================================================================
// ProcessGuard
// ============================================================================

/// Guards a driver child process and ensures it is killed when dropped.
pub(crate) struct ProcessGuard {
    /// The child process handle.
    child: Option<Child>,
    /// Process ID for logging.
    pid: u32,
}

impl ProcessGuard {
    /// Creates a new process guard.
    pub(crate) fn new(child: Child) -> Self {
        let pid = child.id().unwrap_or(0);
        debug!(pid, "Process guard created");
        Self {
            child: Some(child),
            pid,
        }
    }

    /// Kills the process and waits for it to exit.
    pub(crate) async fn kill(&mut self) {
        if let Some(mut child) = self.child.take() {
            debug!(pid = self.pid, "Killing driver process");
            if let Err(e) = child.kill().await {
                debug!(pid = self.pid, error = %e, "Failed to kill process");
            }
            if let Err(e) = child.wait().await {
                debug!(pid = self.pid, error = %e, "Failed to wait for process");
            }
            info!(pid = self.pid, "Driver process terminated");
        }
    }

    /// Returns the process ID.
    #[inline]
    pub(crate) fn pid(&self) -> u32 {
        self.pid
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take()
            && let Err(e) = child.start_kill()
        {
            debug!(pid = self.pid, error = %e, "Failed to send kill signal in Drop");
        }
    }
}

// ============================================================================
// DriverHandle
// ============================================================================

/// A live, exclusively owned automation session.
///
/// Grid sessions hold only the remote session; local sessions also own
/// the driver binary process. There is no pooling or reuse; one handle
/// per test, destroyed at teardown.
///
/// # Example
///
/// ```no_run
/// # async fn example(handle: webdriver_factory::DriverHandle)
/// #     -> webdriver_factory::Result<()> {
/// handle.navigate("http://localhost").await?;
/// let agent = handle.user_agent().await?;
/// handle.quit().await?;
/// # Ok(())
/// # }
/// ```
pub struct DriverHandle {
    /// The underlying WebDriver session.
    driver: WebDriver,
    /// Child process guard for local sessions.
    process: Option<ProcessGuard>,
    /// The capability descriptor the session was requested with.
    capabilities: Capabilities,
}

impl fmt::Debug for DriverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverHandle")
            .field("local", &self.is_local())
            .field("pid", &self.pid())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// DriverHandle - Constructors
// ============================================================================

impl DriverHandle {
    /// Wraps a remote grid session.
    pub(crate) fn remote(driver: WebDriver, capabilities: Capabilities) -> Self {
        Self {
            driver,
            process: None,
            capabilities,
        }
    }

    /// Wraps a local session together with its driver process.
    pub(crate) fn local(driver: WebDriver, child: Child, capabilities: Capabilities) -> Self {
        Self {
            driver,
            process: Some(ProcessGuard::new(child)),
            capabilities,
        }
    }
}

// ============================================================================
// DriverHandle - Session Surface
// ============================================================================

impl DriverHandle {
    /// Navigates the session to `url`.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    /// Executes a script in the session and returns its value.
    pub async fn execute_script(&self, script: &str) -> Result<Value> {
        let ret = self.driver.execute(script, Vec::new()).await?;
        Ok(ret.json().clone())
    }

    /// Returns the user agent reported by the live browser.
    pub async fn user_agent(&self) -> Result<String> {
        let value = self.execute_script("return navigator.userAgent;").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Sets the implicit wait applied to element lookup and page loads.
    pub async fn set_implicit_wait(&self, timeout: Duration) -> Result<()> {
        self.driver.set_implicit_wait_timeout(timeout).await?;
        Ok(())
    }

    /// The underlying WebDriver session, for the full client API.
    #[inline]
    #[must_use]
    pub fn webdriver(&self) -> &WebDriver {
        &self.driver
    }

    /// The capability descriptor the session was requested with.
    #[inline]
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns `true` if this handle owns a local driver process.
    #[inline]
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.process.is_some()
    }

    /// Process ID of the local driver, if any.
    #[inline]
    #[must_use]
    pub fn pid(&self) -> Option<u32> {
        self.process.as_ref().map(ProcessGuard::pid)
    }
}

// ============================================================================
// DriverHandle - Teardown
// ============================================================================

impl DriverHandle {
    /// Ends the session and reaps the local driver process.
    ///
    /// Consumes the handle; this is the one clean exit. Dropping an
    /// un-quit handle still kills the child process, but the remote
    /// session is left to time out on the server side.
    pub async fn quit(mut self) -> Result<()> {
        let result = self.driver.quit().await;

        if let Some(mut guard) = self.process.take() {
            guard.kill().await;
        }

        result?;
        Ok(())
    }

    /// Best-effort teardown for partially set up handles.
    ///
    /// Like [`quit`](Self::quit) but swallows session errors; used when
    /// creation already failed and the original error must win.
    pub(crate) async fn dispose(mut self) {
        if let Err(e) = self.driver.quit().await {
            debug!(error = %e, "Failed to quit session during disposal");
        }

        if let Some(mut guard) = self.process.take() {
            guard.kill().await;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_guard_kill_reaps_child() {
        let child = tokio::process::Command::new("sleep")
            .arg("60")
            .spawn()
            .unwrap();
        let mut guard = ProcessGuard::new(child);

        assert!(guard.pid() > 0);
        guard.kill().await;

        // Second kill is a no-op.
        guard.kill().await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_guard_drop_sends_kill() {
        let child = tokio::process::Command::new("sleep")
            .arg("60")
            .spawn()
            .unwrap();
        drop(ProcessGuard::new(child));
    }
}
