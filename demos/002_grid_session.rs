//! Grid session acquisition.
//!
//! Demonstrates:
//! - Grid-mode settings with a hub endpoint
//! - The capability descriptor sent to the hub
//! - Acquisition with the configured retry budget
//!
//! Usage:
//!   cargo run --example 002_grid_session -- gridhost 4444
//!
//! Requires a reachable Selenium grid hub.

// ============================================================================
// Imports
// ============================================================================

use webdriver_factory::{DriverFactory, Result, StartupSettings, acquire_driver, remote_capabilities};

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
    println!("=== 002: Grid Session ===\n");

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "localhost".to_string());
    let port: u16 = args.next().and_then(|p| p.parse().ok()).unwrap_or(4444);

    // ========================================================================
    // Build Settings
    // ========================================================================

    println!("[1] Building grid settings...");

    let settings = StartupSettings::builder()
        .browser_type("googlechrome")
        .run_using_grid(true)
        .hub_server_name(host)
        .hub_server_port(port)
        .acquire_context_timeout_seconds(60)
        .acquire_context_interval_seconds(5)
        .build()?;

    match settings.hub_uri() {
        Some(hub) => println!("    Hub: {hub}"),
        None => println!("    Hub: (none)"),
    }
    println!("    Capabilities: {:?}", remote_capabilities(&settings));
    println!("    ✓ Settings ready\n");

    // ========================================================================
    // Acquire Driver
    // ========================================================================

    println!("[2] Acquiring grid driver (with retry budget)...");

    let factory = DriverFactory::new(settings);
    let handle = acquire_driver(&factory).await?;

    println!("    ✓ Session created");
    println!("    Local: {}\n", handle.is_local());

    // ========================================================================
    // Drive
    // ========================================================================

    println!("[3] Reading user agent...");
    println!("    User agent: {}\n", handle.user_agent().await?);

    // ========================================================================
    // Cleanup
    // ========================================================================

    println!("[Cleanup] Quitting...");
    handle.quit().await?;
    println!("          ✓ Done");

    Ok(())
}
