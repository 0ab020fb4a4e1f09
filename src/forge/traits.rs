//! Traits related to the remote git forge
use async_trait::async_trait;
use color_eyre::eyre::Result;

use crate::forge::request::{
    CompareRequest, CreatePrRequest, GetPrRequest, MergeAttempt,
    MergeRequest, PullRequest,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Forge {
    /// Attempt a server-side merge of head into base. Rejections come back
    /// as [`MergeAttempt::Conflict`]; only transport failures are errors.
    async fn merge(&self, req: MergeRequest) -> Result<MergeAttempt>;
    /// Find an open pull request with the given head and base branches.
    async fn get_open_pr(
        &self,
        req: GetPrRequest,
    ) -> Result<Option<PullRequest>>;
    /// Whether base and head differ by at least one changed file.
    async fn has_content_difference(
        &self,
        req: CompareRequest,
    ) -> Result<bool>;
    /// Open a new pull request.
    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest>;
}
