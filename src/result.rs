//! Unified result type for sync-branches.
//!
//! All fallible functions in this crate return the `Result<T>` alias defined
//! here, built on `color-eyre` for contextual error reports. Structured error
//! cases live in [`crate::error`] and convert into these reports where they
//! cross module boundaries.

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout sync-branches.
pub type Result<T> = EyreResult<T>;
