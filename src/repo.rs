//! Git repository operations for branch synchronization.
//!
//! This is deliberately a thin shell over the `git` binary rather than a
//! full libgit2 binding: the workflow only needs the checked-out branch
//! name, a remote fetch, and the remote branch listing, and it always runs
//! inside a CI checkout where `git` is present and already authenticated.
use async_trait::async_trait;
use log::*;
use std::path::PathBuf;
use tokio::process::Command;

use crate::{error::SyncError, result::Result};

/// Captured output of one git invocation.
#[derive(Debug)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Read access to the local clone, as seen by the orchestrator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repo {
    /// Name of the branch currently checked out. Failure here is fatal:
    /// without it there is nothing to synchronize.
    async fn current_branch(&self) -> Result<String>;
    /// Synchronize the local view of all remotes.
    async fn fetch_all(&self) -> Result<()>;
    /// All remote-tracking branch names, trimmed, in listing order.
    async fn list_remote_branches(&self) -> Result<Vec<String>>;
}

/// Command-line git client bound to a working directory.
pub struct GitRepo {
    working_directory: PathBuf,
}

impl GitRepo {
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: working_directory.into(),
        }
    }

    /// Run git with the given arguments in the working directory.
    ///
    /// With `allow_non_zero_exit` the caller inspects the exit code itself;
    /// otherwise a non-zero exit becomes an error carrying stderr.
    pub async fn exec(
        &self,
        args: &[&str],
        allow_non_zero_exit: bool,
    ) -> Result<GitOutput> {
        debug!("running: git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.working_directory)
            .output()
            .await?;

        let result = GitOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        };

        if !allow_non_zero_exit && result.exit_code != 0 {
            return Err(SyncError::GitCommand {
                args: args.join(" "),
                exit_code: result.exit_code,
                stderr: result.stderr,
            }
            .into());
        }

        Ok(result)
    }
}

#[async_trait]
impl Repo for GitRepo {
    async fn current_branch(&self) -> Result<String> {
        let result =
            self.exec(&["symbolic-ref", "HEAD", "--short"], true).await?;

        if result.exit_code == 0 {
            Ok(result.stdout.trim().to_string())
        } else {
            Err(SyncError::CurrentBranchUndetermined.into())
        }
    }

    async fn fetch_all(&self) -> Result<()> {
        self.exec(&["fetch", "--all"], true).await?;
        Ok(())
    }

    async fn list_remote_branches(&self) -> Result<Vec<String>> {
        let result = self.exec(&["branch", "-r", "--list"], true).await?;

        if result.exit_code == 0 {
            Ok(split_lines(&result.stdout))
        } else {
            Ok(vec![])
        }
    }
}

fn split_lines(multiline: &str) -> Vec<String> {
    multiline
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_trims_and_drops_empties() {
        let listing = "  origin/develop\n\n  origin/release/1.0.0  \n";

        let lines = split_lines(listing);

        assert_eq!(lines, vec!["origin/develop", "origin/release/1.0.0"]);
    }

    #[tokio::test]
    async fn exec_reports_exit_code_when_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let repo = GitRepo::new(dir.path());

        let result = repo
            .exec(&["not-a-real-subcommand"], true)
            .await
            .unwrap();

        assert_ne!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn exec_fails_on_non_zero_exit_when_not_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let repo = GitRepo::new(dir.path());

        let result = repo.exec(&["not-a-real-subcommand"], false).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn current_branch_reports_the_checked_out_branch() {
        let dir = tempfile::tempdir().unwrap();
        let repo = GitRepo::new(dir.path());
        repo.exec(&["init", "-b", "main"], false).await.unwrap();

        let branch = repo.current_branch().await.unwrap();

        assert_eq!(branch, "main");
    }

    #[tokio::test]
    async fn list_remote_branches_is_empty_for_a_fresh_repo() {
        let dir = tempfile::tempdir().unwrap();
        let repo = GitRepo::new(dir.path());
        repo.exec(&["init", "-b", "main"], false).await.unwrap();

        let branches = repo.list_remote_branches().await.unwrap();

        assert!(branches.is_empty());
    }
}
