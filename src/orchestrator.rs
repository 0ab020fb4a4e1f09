//! Drives one branch-synchronization run end to end.
//!
//! The orchestrator owns no remote state of its own. It reads the checked
//! out branch, resolves the merge target, and performs exactly one write
//! against the forge per run: either a server-side merge or, when that is
//! rejected, at most one new pull request.
use log::*;

use crate::{
    forge::{
        request::{
            CompareRequest, CreatePrRequest, GetPrRequest, MergeAttempt,
            MergeRequest,
        },
        traits::Forge,
    },
    repo::Repo,
    resolver::resolve_target,
    result::Result,
};

/// Branch-naming configuration for one run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Token identifying release branches, matched by containment against
    /// branch names rather than as a path prefix.
    pub release_branch_type: String,
    /// Long-lived integration branch receiving forward merges once no
    /// higher release branch exists.
    pub trunk_branch: String,
}

/// Terminal result of one orchestration run.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// The forge merged head into base; carries the merge commit sha.
    Merged { sha: String },
    /// Nothing to do: non-release branch, missing trunk, or no content
    /// difference behind a rejected merge.
    Skipped,
    /// A pull request covering this merge is already open.
    ExistingPullRequest { number: u64, url: String },
    /// The merge was rejected and a new pull request was opened.
    PullRequestCreated { number: u64, url: String },
}

impl MergeOutcome {
    /// The externally observed output of the run: the merge commit sha, the
    /// created pull request URL, or empty for every skip. An existing pull
    /// request is reported in the log only.
    pub fn output(&self) -> &str {
        match self {
            MergeOutcome::Merged { sha } => sha,
            MergeOutcome::PullRequestCreated { url, .. } => url,
            MergeOutcome::Skipped => "",
            MergeOutcome::ExistingPullRequest { .. } => "",
        }
    }
}

pub struct Orchestrator {
    config: SyncConfig,
    repo: Box<dyn Repo>,
    forge: Box<dyn Forge>,
}

impl Orchestrator {
    pub fn new(
        config: SyncConfig,
        repo: Box<dyn Repo>,
        forge: Box<dyn Forge>,
    ) -> Self {
        Self {
            config,
            repo,
            forge,
        }
    }

    /// Run the synchronization workflow once.
    ///
    /// Business no-ops come back as [`MergeOutcome::Skipped`]; only
    /// misconfiguration and transport failures propagate as errors.
    pub async fn run(&self) -> Result<MergeOutcome> {
        let current_branch = self.repo.current_branch().await?;

        if !current_branch.contains(&self.config.release_branch_type) {
            info!(
                "The branch {current_branch} is not a {} branch type",
                self.config.release_branch_type
            );
            return Ok(MergeOutcome::Skipped);
        }

        self.repo.fetch_all().await?;

        let branches = self.repo.list_remote_branches().await?;

        // Trunk presence is checked against the unfiltered listing: a trunk
        // name like "develop" would never pass the release-type filter.
        let trunk_exists = branches
            .iter()
            .any(|branch| branch.contains(&self.config.trunk_branch));

        if !trunk_exists {
            info!("Missing {} branch", self.config.trunk_branch);
            return Ok(MergeOutcome::Skipped);
        }

        let release_branches: Vec<String> = branches
            .iter()
            .filter(|branch| {
                branch.contains(&self.config.release_branch_type)
            })
            .cloned()
            .collect();

        let target_branch = resolve_target(
            &release_branches,
            &current_branch,
            &self.config.trunk_branch,
        );

        info!("Merge branch:{current_branch} to: {target_branch}");

        let attempt = self
            .forge
            .merge(MergeRequest {
                head_branch: current_branch.clone(),
                base_branch: target_branch.clone(),
            })
            .await?;

        match attempt {
            MergeAttempt::Merged(sha) => {
                info!("Commit {sha}");
                Ok(MergeOutcome::Merged { sha })
            }
            MergeAttempt::Conflict(reason) => {
                info!(
                    "Merge branch:{current_branch} to: {target_branch} failed:{reason}"
                );
                self.open_pull_request(current_branch, target_branch).await
            }
        }
    }

    /// Recovery path for a rejected merge: report an already-open pull
    /// request, skip when the branches hold identical content, or open a
    /// new pull request.
    async fn open_pull_request(
        &self,
        head_branch: String,
        base_branch: String,
    ) -> Result<MergeOutcome> {
        let existing = self
            .forge
            .get_open_pr(GetPrRequest {
                head_branch: head_branch.clone(),
                base_branch: base_branch.clone(),
            })
            .await?;

        if let Some(pull) = existing {
            info!(
                "There is already a pull request ({}) to {base_branch} from {head_branch}. You can view it here: {}",
                pull.number, pull.url
            );
            return Ok(MergeOutcome::ExistingPullRequest {
                number: pull.number,
                url: pull.url,
            });
        }

        let has_difference = self
            .forge
            .has_content_difference(CompareRequest {
                base_branch: base_branch.clone(),
                head_branch: head_branch.clone(),
            })
            .await?;

        if !has_difference {
            info!(
                "There is no content difference between {head_branch} and {base_branch}."
            );
            return Ok(MergeOutcome::Skipped);
        }

        let pull = self
            .forge
            .create_pr(CreatePrRequest {
                head_branch: head_branch.clone(),
                base_branch: base_branch.clone(),
                title: format!("sync: {head_branch} to {base_branch}"),
                body: format!(
                    "sync-branches: New code has just landed in {head_branch}, so let's bring {base_branch} up to speed!"
                ),
            })
            .await?;

        info!(
            "Pull request ({}) successful! You can view it here: {}",
            pull.number, pull.url
        );

        Ok(MergeOutcome::PullRequestCreated {
            number: pull.number,
            url: pull.url,
        })
    }
}
