//! Target branch resolution for the merge chain.
//!
//! Given every remote branch name and the release branch that just received
//! a commit, this module decides where that commit should flow next: the
//! branch holding the next-higher semantic version, or the trunk branch once
//! no higher release exists.
use log::*;
use semver::Version;

use crate::version::extract_versions;

/// Remote alias stripped from a resolved branch name before it is handed to
/// the forge as a merge base.
const REMOTE_PREFIX: &str = "origin/";

/// Resolve the branch that `current_branch` should merge into.
///
/// Versions found in `branches` are scanned in descending order for the
/// first one whose canonical text appears in `current_branch`. Scanning from
/// the highest version down matters under substring matching: `1.40.10`
/// must claim the current position before its prefix `1.40.1` can.
///
/// The target is the next-higher version's branch. Adjacency is positional
/// in the sorted list, so version gaps are fine: with only `1.0.0` and
/// `2.0.0` known, `2.0.0` is next after `1.0.0`. When the current branch
/// holds the highest known version, or none of the versions match it at
/// all, the target is `trunk_branch`.
///
/// Both containment checks are substring checks by contract, not structural
/// parsing of `type/version` paths. A version appearing in an unrelated
/// branch path will match here; callers own the branch naming discipline.
pub fn resolve_target(
    branches: &[String],
    current_branch: &str,
    trunk_branch: &str,
) -> String {
    let mut versions = extract_versions(branches);
    versions.reverse();

    let position = versions
        .iter()
        .position(|version| current_branch.contains(&version.to_string()));

    match position {
        Some(index) if index > 0 => {
            let next_version = &versions[index - 1];
            branch_for_version(branches, next_version)
                .unwrap_or_else(|| trunk_branch.to_string())
        }
        Some(_) => trunk_branch.to_string(),
        None => {
            debug!(
                "no known version matches branch {current_branch}: falling back to {trunk_branch}"
            );
            trunk_branch.to_string()
        }
    }
}

/// First branch containing the version's text, remote alias stripped. First
/// match wins when several branch names share the version substring.
fn branch_for_version(branches: &[String], version: &Version) -> Option<String> {
    let text = version.to_string();
    branches.iter().find(|branch| branch.contains(&text)).map(
        |branch| {
            branch
                .strip_prefix(REMOTE_PREFIX)
                .unwrap_or(branch)
                .to_string()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branches(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn targets_next_higher_release_over_a_version_gap() {
        let all = branches(&[
            "origin/develop",
            "origin/feature/ABC-0001",
            "origin/release/1.0.0",
            "origin/release/2.0.0",
        ]);

        let target = resolve_target(&all, "release/1.0.0", "develop");

        assert_eq!(target, "release/2.0.0");
    }

    #[test]
    fn targets_nearest_patch_release_not_the_farthest() {
        let all = branches(&[
            "origin/develop",
            "origin/feature/ABC-0001",
            "origin/release/1.0.0",
            "origin/release/1.0.1",
            "origin/release/2.0.0",
        ]);

        let target = resolve_target(&all, "release/1.0.0", "develop");

        assert_eq!(target, "release/1.0.1");
    }

    #[test]
    fn targets_nearest_minor_release() {
        let all = branches(&[
            "origin/develop",
            "origin/feature/ABC-0001",
            "origin/release/1.0.0",
            "origin/release/1.1.0",
            "origin/release/2.0.0",
        ]);

        let target = resolve_target(&all, "release/1.0.0", "develop");

        assert_eq!(target, "release/1.1.0");
    }

    #[test]
    fn falls_back_to_trunk_when_current_is_the_only_release() {
        let all = branches(&[
            "origin/develop",
            "origin/feature/ABC-0001",
            "origin/release/1.0.0",
        ]);

        let target = resolve_target(&all, "release/1.0.0", "develop");

        assert_eq!(target, "develop");
    }

    #[test]
    fn falls_back_to_trunk_when_current_is_the_highest_of_many() {
        let all = branches(&[
            "origin/develop",
            "origin/release/1.40.0",
            "origin/release/1.40.1",
            "origin/release/1.40.2",
            "origin/release/1.40.3",
            "origin/release/1.40.4",
            "origin/release/1.40.5",
            "origin/release/1.40.6",
            "origin/release/1.40.7",
            "origin/release/1.40.8",
            "origin/release/1.40.9",
            "origin/release/1.40.10",
        ]);

        let target = resolve_target(&all, "release/1.40.10", "develop");

        assert_eq!(target, "develop");
    }

    #[test]
    fn targets_the_release_one_above_in_a_long_list() {
        let all = branches(&[
            "origin/develop",
            "origin/release/1.40.0",
            "origin/release/1.40.1",
            "origin/release/1.40.2",
            "origin/release/1.40.3",
            "origin/release/1.40.4",
            "origin/release/1.40.5",
            "origin/release/1.40.6",
            "origin/release/1.40.7",
            "origin/release/1.40.8",
            "origin/release/1.40.9",
            "origin/release/1.40.10",
            "origin/release/1.40.11",
        ]);

        let target = resolve_target(&all, "release/1.40.10", "develop");

        assert_eq!(target, "release/1.40.11");
    }

    #[test]
    fn falls_back_to_trunk_when_no_version_matches_current() {
        let all = branches(&[
            "origin/develop",
            "origin/release/1.0.0",
            "origin/release/2.0.0",
        ]);

        let target = resolve_target(&all, "release/3.0.0", "develop");

        assert_eq!(target, "develop");
    }

    #[test]
    fn falls_back_to_trunk_when_no_branch_encodes_a_version() {
        let all = branches(&["origin/develop", "origin/feature/ABC-0001"]);

        let target = resolve_target(&all, "release/1.0.0", "develop");

        assert_eq!(target, "develop");
    }

    #[test]
    fn strips_the_remote_alias_from_the_target() {
        let all = branches(&[
            "origin/release/1.0.0",
            "origin/release/1.1.0",
        ]);

        let target = resolve_target(&all, "release/1.0.0", "develop");

        assert_eq!(target, "release/1.1.0");
    }
}
