//! cloc-verify: CI harness that validates the go-cloc tool.
//!
//! Runs the tool once per hosted provider with credentials from the
//! `GO_CLOC_*` environment variables, compares each aggregate total against
//! the known value for that provider's reference organization, and exits
//! non-zero when anything is off so CI can gate on it.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use cloc_verify_core::config::HarnessConfig;
use cloc_verify_core::suite::{self, provider_cases};

/// One or more provider assertions failed.
const EXIT_ASSERTION_FAILURE: i32 = 1;
/// The tool binary could not be launched (or its output stream broke).
const EXIT_LAUNCH_FAILURE: i32 = 2;

#[derive(Parser)]
#[command(
    name = "cloc-verify",
    about = "Validates the go-cloc tool against known provider totals"
)]
struct Cli {
    /// Path to the go-cloc binary under test
    #[arg(long)]
    tool_path: PathBuf,

    /// Per-provider timeout in seconds (waits indefinitely when omitted)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    println!("Path to the go-cloc binary: {}", cli.tool_path.display());

    // Credentials are read from the environment exactly once, here; the
    // suite itself is a pure function of this config.
    let config = HarnessConfig::from_env();
    let cases = provider_cases(&config);
    let timeout = cli.timeout_secs.map(Duration::from_secs);

    let results = match suite::run_suite(&cli.tool_path, &cases, timeout).await {
        Ok(results) => results,
        Err(e) => {
            eprintln!("{:#}", anyhow::Error::from(e));
            std::process::exit(EXIT_LAUNCH_FAILURE);
        }
    };

    suite::print_results(&results);
    if suite::all_passed(&results) {
        println!("All tests passed!");
    } else {
        println!("Some tests failed. See above for details");
        std::process::exit(EXIT_ASSERTION_FAILURE);
    }
}
