//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::Octocrab;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{
    forge::{
        config::RemoteConfig,
        request::{
            Commit, CompareRequest, CreatePrRequest, GetPrRequest,
            MergeAttempt, MergeRequest, PullRequest,
        },
        traits::Forge,
    },
    result::Result,
};

const GITHUB_API_BASE_URI: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct BranchRef {
    #[serde(rename = "ref")]
    pub ref_field: String,
}

#[derive(Debug, Deserialize)]
struct PullItem {
    pub number: u64,
    pub html_url: String,
    pub head: BranchRef,
    pub base: BranchRef,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    #[serde(default)]
    pub files: Option<Vec<serde_json::Value>>,
}

/// GitHub forge implementation using Octocrab for merge, pull request, and
/// commit-comparison interactions.
pub struct Github {
    config: RemoteConfig,
    base_uri: String,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = GITHUB_API_BASE_URI.to_string();
        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri.clone())?;
        let instance = builder.build()?;

        Ok(Self {
            config,
            base_uri,
            instance,
        })
    }
}

#[async_trait]
impl Forge for Github {
    async fn merge(&self, req: MergeRequest) -> Result<MergeAttempt> {
        let endpoint = format!(
            "{}/repos/{}/{}/merges",
            self.base_uri, self.config.owner, self.config.repo
        );

        let body = serde_json::json!({
            "base": req.base_branch,
            "head": req.head_branch,
        });

        let result: std::result::Result<Commit, octocrab::Error> =
            self.instance.post(endpoint, Some(&body)).await;

        match result {
            Ok(commit) => Ok(MergeAttempt::Merged(commit.sha)),
            Err(octocrab::Error::GitHub { source, .. }) => {
                // 409 is the ordinary conflict case; any other API-level
                // rejection (missing base, non-mergeable state) feeds the
                // same pull-request flow.
                if source.status_code != StatusCode::CONFLICT {
                    debug!(
                        "merge rejected with status {}: {}",
                        source.status_code, source.message
                    );
                }
                Ok(MergeAttempt::Conflict(source.message.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_open_pr(
        &self,
        req: GetPrRequest,
    ) -> Result<Option<PullRequest>> {
        let endpoint = format!(
            "{}/repos/{}/{}/pulls?state=open&per_page=100",
            self.base_uri, self.config.owner, self.config.repo
        );

        let pulls: Vec<PullItem> =
            self.instance.get(endpoint, None::<&()>).await?;

        Ok(pulls
            .into_iter()
            .find(|pull| {
                pull.head.ref_field == req.head_branch
                    && pull.base.ref_field == req.base_branch
            })
            .map(|pull| PullRequest {
                number: pull.number,
                url: pull.html_url,
            }))
    }

    async fn has_content_difference(
        &self,
        req: CompareRequest,
    ) -> Result<bool> {
        let endpoint = format!(
            "{}/repos/{}/{}/compare/{}...{}?page=1&per_page=1",
            self.base_uri,
            self.config.owner,
            self.config.repo,
            req.base_branch,
            req.head_branch
        );

        let response: CompareResponse =
            self.instance.get(endpoint, None::<&()>).await?;

        Ok(response.files.is_some_and(|files| !files.is_empty()))
    }

    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        let endpoint = format!(
            "{}/repos/{}/{}/pulls",
            self.base_uri, self.config.owner, self.config.repo
        );

        let body = serde_json::json!({
            "head": req.head_branch,
            "base": req.base_branch,
            "title": req.title,
            "body": req.body,
            "draft": false,
        });

        let pull: PullItem = self.instance.post(endpoint, Some(&body)).await?;

        Ok(PullRequest {
            number: pull.number,
            url: pull.html_url,
        })
    }
}
