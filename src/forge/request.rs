use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
/// Request to merge one branch into another server-side.
pub struct MergeRequest {
    pub head_branch: String,
    pub base_branch: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to find an open pull request by branch names.
pub struct GetPrRequest {
    pub head_branch: String,
    pub base_branch: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to compare two branches for changed files.
pub struct CompareRequest {
    pub base_branch: String,
    pub head_branch: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to create a new pull request.
pub struct CreatePrRequest {
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
/// Pull request information as reported by the forge.
pub struct PullRequest {
    pub number: u64,
    pub url: String,
}

#[derive(Debug, Clone)]
/// Outcome of a server-side merge attempt.
///
/// A rejected merge is a value, not an error: the orchestrator branches on
/// it to decide whether a pull request is warranted. Only transport and
/// authentication failures surface as errors from the merge call.
pub enum MergeAttempt {
    /// The forge performed the merge; carries the new commit sha.
    Merged(String),
    /// The forge rejected the merge; carries its diagnostic message.
    Conflict(String),
}

#[derive(Debug, Deserialize)]
/// Merge commit returned by the forge on success.
pub struct Commit {
    pub sha: String,
}
