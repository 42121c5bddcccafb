use crate::analyzer::release::ReleaseDraft;

/// Request to create a remote release for a tag.
///
/// The release is always non-draft, non-prerelease, and never marked as the
/// repository's latest release; those knobs are pinned by the forge
/// implementation so per-module releases cannot clobber repository-level
/// "latest" status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReleaseRequest {
    /// Tag to create, `<module>/<version>`.
    pub tag_name: String,
    /// Release title. Matches the tag name.
    pub name: String,
    /// Release notes body.
    pub body: String,
    /// Commit the tag should point at.
    pub target_commitish: String,
}

impl CreateReleaseRequest {
    /// Build the request for a drafted module release.
    pub fn from_draft(draft: &ReleaseDraft, target_commitish: &str) -> Self {
        Self {
            tag_name: draft.tag_name.clone(),
            name: draft.tag_name.clone(),
            body: draft.notes.clone(),
            target_commitish: target_commitish.to_string(),
        }
    }
}
