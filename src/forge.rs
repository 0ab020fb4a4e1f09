//! Interface to the remote Git hosting platform.
//!
//! Provides token-based authentication and the merge, pull request, and
//! commit-comparison operations the orchestrator depends on.

/// Connection configuration and authentication.
pub mod config;

/// GitHub API client implementation.
pub mod github;

/// Request and response types shared across forge operations.
pub mod request;

/// Common trait for forge abstraction.
pub mod traits;
