use semver::Version;
use std::fmt::Display;

use crate::analyzer::commit::Commit;

/// Severity of version change required by a commit.
///
/// Variant order defines severity: `None < Patch < Minor < Major`, so the
/// overall bump for a commit set is simply the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BumpSize {
    None,
    Patch,
    Minor,
    Major,
}

impl Display for BumpSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        f.write_str(name)
    }
}

impl BumpSize {
    /// Classify a single commit. Rules are checked in order, first match
    /// wins:
    ///
    /// 1. type tag ends with the `!` escalation marker
    /// 2. a note titled `BREAKING CHANGE` is present
    /// 3. type tag is `feat` or `feature`
    /// 4. type tag is `fix`
    /// 5. anything else bumps nothing
    pub fn classify(commit: &Commit) -> Self {
        if commit.bang {
            return Self::Major;
        }
        if commit.has_breaking_note() {
            return Self::Major;
        }
        match commit.kind.as_deref() {
            Some("feat" | "feature") => Self::Minor,
            Some("fix") => Self::Patch,
            _ => Self::None,
        }
    }

    /// Largest severity across a set of commits. An empty set is `None`.
    pub fn overall(commits: &[Commit]) -> Self {
        commits
            .iter()
            .map(Self::classify)
            .max()
            .unwrap_or(Self::None)
    }

    /// Increment `version` by this bump size, zeroing the lower components.
    /// `None` produces no new version.
    pub fn apply(self, version: &Version) -> Option<Version> {
        match self {
            Self::Major => Some(Version::new(version.major + 1, 0, 0)),
            Self::Minor => {
                Some(Version::new(version.major, version.minor + 1, 0))
            }
            Self::Patch => Some(Version::new(
                version.major,
                version.minor,
                version.patch + 1,
            )),
            Self::None => None,
        }
    }
}
