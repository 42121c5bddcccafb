//! Runtime configuration resolved from the CI environment.
//!
//! All environment lookups happen here, once, at startup. Everything past
//! this point receives the resolved [`Config`] by parameter.
use secrecy::SecretString;
use std::env;

use crate::error::{MonotagError, Result};

/// Commit treated as HEAD when the environment does not pin one.
const DEFAULT_HEAD: &str = "HEAD";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Commit SHA used for log ranges and as the release target.
    pub head_sha: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for the release API.
    pub token: SecretString,
    /// Enable debug logging.
    pub debug: bool,
}

impl Config {
    /// Resolve configuration from the environment.
    ///
    /// Reads `GITHUB_SHA` (optional, defaults to `HEAD`), `GITHUB_REPOSITORY`
    /// (`owner/repo`, required), `GITHUB_TOKEN` (required) and `RUNNER_DEBUG`.
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            env::var("GITHUB_SHA").ok(),
            env::var("GITHUB_REPOSITORY").ok(),
            env::var("GITHUB_TOKEN").ok(),
            env::var("RUNNER_DEBUG").ok(),
        )
    }

    fn resolve(
        head_sha: Option<String>,
        repository: Option<String>,
        token: Option<String>,
        debug: Option<String>,
    ) -> Result<Self> {
        let head_sha = head_sha
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HEAD.to_string());

        let repository = repository.filter(|r| !r.is_empty()).ok_or_else(|| {
            MonotagError::invalid_config("GITHUB_REPOSITORY must be set")
        })?;

        let (owner, repo) =
            repository.split_once('/').ok_or_else(|| {
                MonotagError::invalid_config(format!(
                    "expected owner/repo for GITHUB_REPOSITORY, got: {}",
                    repository
                ))
            })?;

        if owner.is_empty() || repo.is_empty() {
            return Err(MonotagError::invalid_config(format!(
                "expected owner/repo for GITHUB_REPOSITORY, got: {}",
                repository
            )));
        }

        let token = token.filter(|t| !t.is_empty()).ok_or_else(|| {
            MonotagError::invalid_config("must set github token")
        })?;

        let debug = matches!(debug.as_deref(), Some("1") | Some("true"));

        Ok(Self {
            head_sha,
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: SecretString::from(token),
            debug,
        })
    }
}
