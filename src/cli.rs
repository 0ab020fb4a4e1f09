//! CLI argument parsing and environment configuration.
use clap::Parser;
use log::*;
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    error::SyncError, forge::config::RemoteConfig, orchestrator::SyncConfig,
    result::Result,
};

/// CLI arguments for one synchronization run.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "release")]
    /// Token identifying release branches, matched by containment.
    pub release_branch_type: String,

    #[arg(long, default_value = "develop")]
    /// Trunk branch that receives forward merges once no higher release
    /// branch exists.
    pub develop_branch: String,

    #[arg(long, default_value = "")]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// Branch-naming configuration for the orchestrator.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            release_branch_type: self.release_branch_type.clone(),
            trunk_branch: self.develop_branch.clone(),
        }
    }

    /// Forge connection configuration from CLI arguments and environment.
    pub fn remote_config(&self) -> Result<RemoteConfig> {
        let repository = env::var("GITHUB_REPOSITORY")
            .map_err(|_| SyncError::MissingEnv("GITHUB_REPOSITORY"))?;
        let (owner, repo) = parse_owner_and_repository(&repository)?;

        info!("owner: {owner} repository: {repo}");

        Ok(RemoteConfig {
            owner,
            repo,
            token: self.resolve_token()?,
        })
    }

    fn resolve_token(&self) -> Result<SecretString> {
        if !self.github_token.is_empty() {
            return Ok(SecretString::from(self.github_token.clone()));
        }

        match env::var("GITHUB_TOKEN") {
            Ok(token) if !token.is_empty() => Ok(SecretString::from(token)),
            _ => Err(SyncError::MissingToken.into()),
        }
    }
}

/// Split an `owner/repo` identifier into its parts.
fn parse_owner_and_repository(value: &str) -> Result<(String, String)> {
    match value.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(SyncError::InvalidRepository(value.to_string()).into()),
    }
}

/// Local checkout directory from the CI environment. Missing is fatal.
pub fn workspace_path() -> Result<PathBuf> {
    let workspace = env::var("GITHUB_WORKSPACE")
        .map_err(|_| SyncError::MissingEnv("GITHUB_WORKSPACE"))?;

    let path = std::path::absolute(&workspace)?;

    info!("workspace path: {}", path.display());

    Ok(path)
}
