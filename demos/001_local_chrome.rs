//! Local Chrome driver acquisition.
//!
//! Demonstrates:
//! - Building startup settings for a local googlechrome run
//! - Creating a driver through the factory
//! - Navigating and reading the user agent
//! - Releasing the handle
//!
//! Usage:
//!   cargo run --example 001_local_chrome
//!
//! Requires chromedriver on the search path (or set WDF_DRIVER_DIR).

// ============================================================================
// Imports
// ============================================================================

use webdriver_factory::{DriverFactory, Result, StartupSettings};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webdriver_factory=debug".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    println!("=== 001: Local Chrome ===\n");

    // ========================================================================
    // Build Settings
    // ========================================================================

    println!("[1] Building settings...");

    let mut builder = StartupSettings::builder()
        .browser_type("googlechrome")
        .timeout_seconds(30);

    if let Ok(dir) = std::env::var("WDF_DRIVER_DIR") {
        builder = builder.local_driver_directory(dir);
    }

    let settings = builder.build()?;
    println!("    Browser:    {}", settings.target_browser());
    println!(
        "    Driver dir: {}",
        settings.local_driver_directory().display()
    );
    println!("    ✓ Settings ready\n");

    // ========================================================================
    // Create Driver
    // ========================================================================

    println!("[2] Creating local driver...");

    let factory = DriverFactory::new(settings);
    let handle = factory.create_driver().await?;

    println!("    ✓ Driver created");
    println!("    Local: {}", handle.is_local());
    if let Some(pid) = handle.pid() {
        println!("    PID:   {pid}");
    }
    println!();

    // ========================================================================
    // Drive
    // ========================================================================

    println!("[3] Navigating...");

    handle.navigate(factory.settings().root_url()).await?;
    println!("    ✓ Loaded {}", factory.settings().root_url());

    let agent = handle.user_agent().await?;
    println!("    User agent: {agent}\n");

    // ========================================================================
    // Cleanup
    // ========================================================================

    println!("[Cleanup] Quitting...");
    handle.quit().await?;
    println!("          ✓ Done");

    Ok(())
}
