//! Test orchestrator: the fixed provider matrix, execution, and reporting.
//!
//! One [`TestCase`] per provider, run strictly sequentially in declared
//! order. Each case invokes the tool exactly once; there are no retries.
//! A wrong or missing total is recorded and the run continues, while a
//! launch failure aborts the remaining cases (a broken environment, not a
//! counting discrepancy).

use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{HarnessConfig, ProviderCredentials};
use crate::runner::{self, RunnerError, ToolOutcome};

// Known aggregate totals for the reference organizations.
const GITHUB_EXPECTED: u64 = 143_933;
const AZURE_DEVOPS_EXPECTED: u64 = 57_888;
const GITLAB_EXPECTED: u64 = 162;
const BITBUCKET_EXPECTED: u64 = 4_317;

/// One provider scenario: invocation arguments plus the known-good total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub args: Vec<String>,
    pub expected: u64,
}

impl TestCase {
    /// Build the case for one provider.
    ///
    /// The argument list keeps the tool non-interactive and its output
    /// machine-parseable: informational logging, no CSV report files.
    fn for_provider(provider: &str, creds: &ProviderCredentials, expected: u64) -> Self {
        Self {
            name: provider.to_owned(),
            args: vec![
                "--devops".to_owned(),
                provider.to_owned(),
                "--organization".to_owned(),
                creds.organization.clone(),
                "--accessToken".to_owned(),
                creds.access_token.clone(),
                "--log-level".to_owned(),
                "INFO".to_owned(),
                "--dump-csvs=false".to_owned(),
            ],
            expected,
        }
    }
}

/// The recorded outcome of one executed case. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub name: String,
    pub did_pass: bool,
    pub expected: u64,
    pub actual: ToolOutcome,
}

/// The full provider matrix, in its fixed execution order.
pub fn provider_cases(config: &HarnessConfig) -> Vec<TestCase> {
    vec![
        TestCase::for_provider("GitHub", &config.github, GITHUB_EXPECTED),
        TestCase::for_provider("AzureDevOps", &config.azure_devops, AZURE_DEVOPS_EXPECTED),
        TestCase::for_provider("GitLab", &config.gitlab, GITLAB_EXPECTED),
        TestCase::for_provider("Bitbucket", &config.bitbucket, BITBUCKET_EXPECTED),
    ]
}

/// Run every case against the tool at `tool_path`, one at a time.
///
/// Each case fully drains the tool's output before the next begins. A
/// [`RunnerError`] (launch or stream failure) aborts the remaining cases
/// and propagates to the caller; everything else becomes a [`TestResult`].
pub async fn run_suite(
    tool_path: &Path,
    cases: &[TestCase],
    timeout: Option<Duration>,
) -> Result<Vec<TestResult>, RunnerError> {
    let mut results = Vec::with_capacity(cases.len());

    for case in cases {
        println!("--------Running test: {}---------", case.name);
        info!(case = %case.name, expected = case.expected, "running provider case");

        let actual = runner::run_tool(tool_path, &case.args, timeout).await?;
        let did_pass = matches!(actual, ToolOutcome::Total(n) if n == case.expected);
        if !did_pass {
            warn!(
                case = %case.name,
                expected = case.expected,
                actual = %actual,
                "provider case failed"
            );
        }

        results.push(TestResult {
            name: case.name.clone(),
            did_pass,
            expected: case.expected,
            actual,
        });
    }

    Ok(results)
}

/// Print every result's fields, one block per case.
pub fn print_results(results: &[TestResult]) {
    for result in results {
        println!("Test: {}", result.name);
        println!("Expected: {}", result.expected);
        println!("Actual: {}", result.actual);
        println!("Pass: {}", result.did_pass);
        println!();
    }
}

/// The run verdict: logical AND over every case's `did_pass`.
pub fn all_passed(results: &[TestResult]) -> bool {
    results.iter().all(|r| r.did_pass)
}
