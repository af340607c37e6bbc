//! End-to-end suite tests against fake cloc tool scripts.

use std::path::{Path, PathBuf};
use std::time::Duration;

use cloc_verify_core::config::{HarnessConfig, ProviderCredentials};
use cloc_verify_core::runner::{RunnerError, ToolOutcome};
use cloc_verify_core::suite::{all_passed, provider_cases, run_suite};

// ===========================================================================
// Helpers
// ===========================================================================

fn fabricated_config() -> HarnessConfig {
    HarnessConfig {
        github: ProviderCredentials::new("gh-org", "gh-token"),
        azure_devops: ProviderCredentials::new("az-org", "az-token"),
        gitlab: ProviderCredentials::new("gl-org", "gl-token"),
        bitbucket: ProviderCredentials::new("bb-org", "bb-token"),
    }
}

fn write_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-go-cloc.sh");
    std::fs::write(&path, body).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}

/// A fake tool that prints progress and then the correct total for every
/// provider. `$2` is the provider name (the argument after `--devops`).
const WELL_BEHAVED_TOOL: &str = "#!/bin/sh\n\
    echo \"scanning organization on $2...\"\n\
    case \"$2\" in\n\
      GitHub) echo 143933 ;;\n\
      AzureDevOps) echo 57888 ;;\n\
      GitLab) echo 162 ;;\n\
      Bitbucket) echo 4317 ;;\n\
      *) echo \"unknown provider: $2\" ;;\n\
    esac\n";

// ===========================================================================
// Scenarios
// ===========================================================================

#[tokio::test]
async fn every_provider_matching_its_total_passes_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = write_tool(tmp.path(), WELL_BEHAVED_TOOL);
    let cases = provider_cases(&fabricated_config());

    let results = run_suite(&tool, &cases, None).await.unwrap();

    assert_eq!(results.len(), 4);
    for result in &results {
        assert!(result.did_pass, "case {} should pass", result.name);
    }
    assert!(all_passed(&results));
    assert_eq!(results[0].actual, ToolOutcome::Total(143_933));
}

#[tokio::test]
async fn a_wrong_total_fails_that_case_and_reports_the_actual_value() {
    let tmp = tempfile::tempdir().unwrap();
    // GitLab reports 160 instead of the expected 162.
    let tool = write_tool(
        tmp.path(),
        "#!/bin/sh\n\
         case \"$2\" in\n\
           GitHub) echo 143933 ;;\n\
           AzureDevOps) echo 57888 ;;\n\
           GitLab) echo 160 ;;\n\
           Bitbucket) echo 4317 ;;\n\
         esac\n",
    );
    let cases = provider_cases(&fabricated_config());

    let results = run_suite(&tool, &cases, None).await.unwrap();

    let gitlab = results.iter().find(|r| r.name == "GitLab").unwrap();
    assert!(!gitlab.did_pass);
    assert_eq!(gitlab.expected, 162);
    assert_eq!(gitlab.actual, ToolOutcome::Total(160));

    // One failed case forces the aggregate down regardless of the others.
    assert!(!all_passed(&results));
    assert!(results.iter().filter(|r| r.did_pass).count() == 3);
}

#[tokio::test]
async fn a_crashing_tool_yields_no_result_not_zero() {
    let tmp = tempfile::tempdir().unwrap();
    // Bitbucket crashes before printing anything.
    let tool = write_tool(
        tmp.path(),
        "#!/bin/sh\n\
         case \"$2\" in\n\
           Bitbucket) exit 2 ;;\n\
           GitHub) echo 143933 ;;\n\
           AzureDevOps) echo 57888 ;;\n\
           GitLab) echo 162 ;;\n\
         esac\n",
    );
    let cases = provider_cases(&fabricated_config());

    let results = run_suite(&tool, &cases, None).await.unwrap();

    let bitbucket = results.iter().find(|r| r.name == "Bitbucket").unwrap();
    assert!(!bitbucket.did_pass);
    assert_eq!(bitbucket.actual, ToolOutcome::NoResult);
    assert!(!all_passed(&results));
}

#[tokio::test]
async fn a_missing_binary_aborts_the_whole_run() {
    let cases = provider_cases(&fabricated_config());

    let result = run_suite(Path::new("/nonexistent/go-cloc"), &cases, None).await;

    assert!(matches!(result, Err(RunnerError::Launch { .. })));
}

#[tokio::test]
async fn run_continues_past_a_failed_case() {
    let tmp = tempfile::tempdir().unwrap();
    // The very first provider fails; the other three must still run.
    let tool = write_tool(
        tmp.path(),
        "#!/bin/sh\n\
         case \"$2\" in\n\
           GitHub) echo 'fatal: bad credentials' ;;\n\
           AzureDevOps) echo 57888 ;;\n\
           GitLab) echo 162 ;;\n\
           Bitbucket) echo 4317 ;;\n\
         esac\n",
    );
    let cases = provider_cases(&fabricated_config());

    let results = run_suite(&tool, &cases, None).await.unwrap();

    assert_eq!(results.len(), 4);
    assert!(!results[0].did_pass);
    assert_eq!(results[0].actual, ToolOutcome::NoResult);
    assert!(results[1..].iter().all(|r| r.did_pass));
}

#[tokio::test]
async fn a_hanging_tool_times_out_as_a_failed_case() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = write_tool(
        tmp.path(),
        "#!/bin/sh\n\
         case \"$2\" in\n\
           GitHub) sleep 3600 ;;\n\
           AzureDevOps) echo 57888 ;;\n\
           GitLab) echo 162 ;;\n\
           Bitbucket) echo 4317 ;;\n\
         esac\n",
    );
    let cases = provider_cases(&fabricated_config());

    let results = run_suite(&tool, &cases, Some(Duration::from_millis(300)))
        .await
        .unwrap();

    let github = results.iter().find(|r| r.name == "GitHub").unwrap();
    assert!(!github.did_pass);
    assert_eq!(github.actual, ToolOutcome::TimedOut);
    // The remaining providers still ran to completion.
    assert!(results[1..].iter().all(|r| r.did_pass));
}

#[tokio::test]
async fn reruns_are_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = write_tool(tmp.path(), WELL_BEHAVED_TOOL);
    let cases = provider_cases(&fabricated_config());

    let first = run_suite(&tool, &cases, None).await.unwrap();
    let second = run_suite(&tool, &cases, None).await.unwrap();

    assert_eq!(first, second);
}
