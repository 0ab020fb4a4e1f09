//! Semantic version extraction from branch names.
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+").unwrap());

/// Collect the semantic versions encoded in a list of branch names.
///
/// Names without a dotted numeric triple are dropped silently. The result is
/// deduplicated and sorted ascending by semver precedence, so `1.40.10`
/// orders after `1.40.9` rather than lexically.
pub fn extract_versions(branch_names: &[String]) -> Vec<Version> {
    let mut versions: Vec<Version> = branch_names
        .iter()
        .filter_map(|name| VERSION_REGEX.find(name))
        .filter_map(|found| Version::parse(found.as_str()).ok())
        .collect();

    versions.sort();
    versions.dedup();
    versions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branches(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn extracts_versions_in_ascending_order() {
        let input = branches(&[
            "origin/release/2.0.0",
            "origin/release/1.0.0",
            "origin/release/1.0.1",
        ]);

        let versions = extract_versions(&input);

        let expected = vec![
            Version::new(1, 0, 0),
            Version::new(1, 0, 1),
            Version::new(2, 0, 0),
        ];
        assert_eq!(versions, expected);
    }

    #[test]
    fn orders_numerically_not_lexically() {
        let input = branches(&[
            "origin/release/1.40.10",
            "origin/release/1.40.2",
            "origin/release/1.40.9",
        ]);

        let versions = extract_versions(&input);

        let expected = vec![
            Version::new(1, 40, 2),
            Version::new(1, 40, 9),
            Version::new(1, 40, 10),
        ];
        assert_eq!(versions, expected);
    }

    #[test]
    fn drops_names_without_a_version() {
        let input = branches(&[
            "origin/develop",
            "origin/feature/ABC-0001",
            "origin/release/1.0.0",
        ]);

        let versions = extract_versions(&input);

        assert_eq!(versions, vec![Version::new(1, 0, 0)]);
    }

    #[test]
    fn collapses_duplicates() {
        let input = branches(&[
            "origin/release/1.0.0",
            "upstream/release/1.0.0",
            "origin/hotfix/1.0.0",
        ]);

        let versions = extract_versions(&input);

        assert_eq!(versions, vec![Version::new(1, 0, 0)]);
    }

    #[test]
    fn returns_empty_for_no_candidates() {
        let input = branches(&["origin/develop", "origin/main"]);
        assert!(extract_versions(&input).is_empty());
    }
}
