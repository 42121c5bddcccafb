//! Data types for module releases: tags, latest-version selection, and the
//! release draft handed to the publisher.
use log::*;
use semver::Version;
use std::fmt::Display;

use crate::analyzer::{bump::BumpSize, commit::Commit};

/// Git tag that represents a module release, `<module>/<semver>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name, including the module prefix.
    pub name: String,
    /// Semantic version parsed from the tag name.
    pub semver: Version,
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl Tag {
    /// Pick the highest tagged version for a module, independent of the
    /// enumeration order of `versions`. Suffixes that do not parse as
    /// semantic versions are skipped with a warning.
    pub fn latest(module: &str, versions: &[String]) -> Option<Self> {
        versions
            .iter()
            .filter_map(|version| match Version::parse(version) {
                Ok(semver) => Some(semver),
                Err(err) => {
                    warn!("ignoring tag {}/{}: {}", module, version, err);
                    None
                }
            })
            .max()
            .map(|semver| Self {
                name: format!("{}/{}", module, semver),
                semver,
            })
    }
}

/// Next version for the module, or `None` when no commit warrants a
/// release. An empty commit set yields `None`.
pub fn next_version(latest: &Version, commits: &[Commit]) -> Option<Version> {
    BumpSize::overall(commits).apply(latest)
}

/// Draft release pointing a new tag at a commit, with commit headers as the
/// notes body. Transient, built right before publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDraft {
    /// Tag to create, `<module>/<version>`. Doubles as the release title.
    pub tag_name: String,
    /// Version being released.
    pub version: Version,
    /// Release notes: one `* ` bullet per commit header.
    pub notes: String,
}

impl ReleaseDraft {
    /// Build the draft for a module release. Commits with an empty header
    /// are left out of the notes entirely.
    pub fn new(module: &str, version: Version, commits: &[Commit]) -> Self {
        let notes = commits
            .iter()
            .filter(|commit| !commit.header.is_empty())
            .map(|commit| format!("* {}", commit.header))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            tag_name: format!("{}/{}", module, version),
            version,
            notes,
        }
    }
}
