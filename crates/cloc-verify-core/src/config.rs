//! Provider credential configuration.
//!
//! Credentials are read from the environment once at startup and threaded
//! explicitly into [`crate::suite::provider_cases`], so the case table is a
//! pure function of its inputs and tests can fabricate credentials freely.

use std::env;

/// Organization identifier and access token for one hosted provider.
///
/// The harness never validates these values; they are forwarded verbatim
/// into the tool's argument list. An unset environment variable becomes an
/// empty string, which surfaces as a tool-side authentication failure
/// rather than a harness error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub organization: String,
    pub access_token: String,
}

impl ProviderCredentials {
    /// Build credentials from explicit values (tests, fixtures).
    pub fn new(organization: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            access_token: access_token.into(),
        }
    }

    fn from_env(org_var: &str, token_var: &str) -> Self {
        Self {
            organization: env::var(org_var).unwrap_or_default(),
            access_token: env::var(token_var).unwrap_or_default(),
        }
    }
}

/// Credentials for every provider the suite covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub github: ProviderCredentials,
    pub azure_devops: ProviderCredentials,
    pub gitlab: ProviderCredentials,
    pub bitbucket: ProviderCredentials,
}

impl HarnessConfig {
    /// Read the eight `GO_CLOC_*` variables from the process environment.
    ///
    /// This is the only place the harness touches ambient state; everything
    /// downstream receives the config by value.
    pub fn from_env() -> Self {
        Self {
            github: ProviderCredentials::from_env(
                "GO_CLOC_GITHUB_ORGANIZATION",
                "GO_CLOC_GITHUB_ACCESS_TOKEN",
            ),
            azure_devops: ProviderCredentials::from_env(
                "GO_CLOC_AZURE_DEVOPS_ORGANIZATION",
                "GO_CLOC_AZURE_DEVOPS_ACCESS_TOKEN",
            ),
            gitlab: ProviderCredentials::from_env(
                "GO_CLOC_GITLAB_ORGANIZATION",
                "GO_CLOC_GITLAB_ACCESS_TOKEN",
            ),
            bitbucket: ProviderCredentials::from_env(
                "GO_CLOC_BITBUCKET_ORGANIZATION",
                "GO_CLOC_BITBUCKET_ACCESS_TOKEN",
            ),
        }
    }
}
