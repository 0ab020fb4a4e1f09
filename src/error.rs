//! Custom error types for sync-branches.

use thiserror::Error;

/// Main error type for sync-branches operations.
///
/// Only fatal conditions live here: misconfiguration and git plumbing
/// failures abort the run. A rejected merge is not an error — the forge
/// layer reports it as [`crate::forge::request::MergeAttempt::Conflict`]
/// and the orchestrator handles it as ordinary control flow.
#[derive(Error, Debug)]
pub enum SyncError {
    // Environment/configuration errors
    #[error("{0} not defined")]
    MissingEnv(&'static str),

    #[error("Invalid repository identifier: {0}")]
    InvalidRepository(String),

    #[error("Missing github token: set --github-token or GITHUB_TOKEN")]
    MissingToken,

    // Git errors
    #[error("Current branch cannot be determined")]
    CurrentBranchUndetermined,

    #[error("git {args} failed with exit code {exit_code}: {stderr}")]
    GitCommand {
        args: String,
        exit_code: i32,
        stderr: String,
    },
}
