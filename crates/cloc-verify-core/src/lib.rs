//! Core library for the cloc-verify harness.
//!
//! The harness does not count lines itself: it drives the external
//! `go-cloc` binary once per hosted provider, scrapes the aggregate total
//! from the tool's final output line, and compares it against the known
//! total for that provider's reference organization.
//!
//! # Architecture
//!
//! ```text
//! cloc-verify (binary)
//!     |
//!     v
//! suite::run_suite -- one TestCase per provider, strictly sequential
//!     |
//!     v
//! runner::run_tool -- spawn tool, echo stdout, extract final total
//! ```

pub mod config;
pub mod runner;
pub mod suite;

pub use config::{HarnessConfig, ProviderCredentials};
pub use runner::{RunnerError, ToolOutcome, run_tool};
pub use suite::{TestCase, TestResult, all_passed, print_results, provider_cases, run_suite};
