//! One scenario across all supported browsers.
//!
//! Demonstrates:
//! - The given/when/then narration layer
//! - for_all_browsers: fresh local driver per browser, released per run
//!
//! Usage:
//!   cargo run --example 003_all_browsers
//!
//! Requires the local driver binaries for each browser on the search path.

// ============================================================================
// Imports
// ============================================================================

use webdriver_factory::Result;
use webdriver_factory::harness::{Scenario, for_all_browsers};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webdriver_factory=info".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    println!("=== 003: All Browsers ===\n");

    for_all_browsers(|browser, handle| {
        Box::pin(async move {
            let scenario = Scenario::new(format!("homepage loads ({browser})"));

            scenario.given("a live driver", || ());

            scenario.when("we load the root page", || ());
            handle.navigate("http://localhost").await?;

            let agent = handle.user_agent().await?;
            scenario.then("the browser reports a user agent", || {
                scenario.expect("user agent is non-empty", !agent.is_empty());
            });

            println!("    ✓ {browser}: {agent}");
            Ok(())
        })
    })
    .await?;

    println!("\n=== All browsers passed ===");
    Ok(())
}
