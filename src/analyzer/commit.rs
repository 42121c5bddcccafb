use git_conventional::Commit as ConventionalCommit;
use serde::Serialize;

use crate::repo::LogEntry;

/// Note attached to a commit body, such as `BREAKING CHANGE: ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub title: String,
    pub text: String,
}

/// Title that escalates a commit to a major bump.
pub const BREAKING_NOTE_TITLE: &str = "BREAKING CHANGE";

/// Commit parsed with conventional commit semantics.
///
/// Non-conventional messages still produce a commit: the first line becomes
/// the header, the type tag stays empty, and no notes are attached.
#[derive(Debug, Clone, Serialize)]
pub struct Commit {
    pub id: String,
    /// Conventional type tag, e.g. `feat`. `None` when the header does not
    /// follow the convention.
    pub kind: Option<String>,
    /// Whether the type tag carried the `!` escalation marker.
    pub bang: bool,
    /// First line of the commit message.
    pub header: String,
    pub body: Option<String>,
    pub notes: Vec<Note>,
}

impl Commit {
    /// Parse a git log entry into a structured commit.
    pub fn parse(entry: &LogEntry) -> Self {
        let message = entry.message.trim_end();
        let header = message.lines().next().unwrap_or("").to_string();

        match ConventionalCommit::parse(message) {
            Ok(parsed) => {
                let notes = parsed
                    .footers()
                    .iter()
                    .map(|footer| Note {
                        title: footer.token().to_string(),
                        text: footer.value().to_string(),
                    })
                    .collect();

                Self {
                    id: entry.id.clone(),
                    kind: Some(parsed.type_().to_string()),
                    bang: header_has_escalation_marker(&header),
                    header,
                    body: parsed.body().map(|b| b.to_string()),
                    notes,
                }
            }
            Err(_) => {
                let body = message
                    .split_once('\n')
                    .map(|(_, rest)| rest.trim().to_string())
                    .filter(|rest| !rest.is_empty());

                Self {
                    id: entry.id.clone(),
                    kind: None,
                    bang: false,
                    header,
                    body,
                    notes: vec![],
                }
            }
        }
    }

    /// Whether any note is titled exactly [`BREAKING_NOTE_TITLE`].
    pub fn has_breaking_note(&self) -> bool {
        self.notes.iter().any(|note| note.title == BREAKING_NOTE_TITLE)
    }
}

/// The escalation marker sits at the end of the type tag (after the scope,
/// when one is present), immediately before the `:` separator.
fn header_has_escalation_marker(header: &str) -> bool {
    header
        .split_once(':')
        .map(|(tag, _)| tag.trim_end().ends_with('!'))
        .unwrap_or(false)
}
