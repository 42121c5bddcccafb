//! Local repository access: root discovery, module scanning, and the git
//! queries release analysis depends on.
//!
//! All git data is read through the `git` CLI. The tool depends on the exact
//! output shape of `git log -z --pretty=medium`: entries separated by NUL,
//! header block and message separated by a blank line, message lines
//! indented by four spaces.
use log::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, fs};

use crate::error::{MonotagError, Result};

/// Indentation git applies to message lines in `--pretty=medium` output.
const LOG_MESSAGE_INDENT: &str = "    ";

/// Single entry parsed from `git log -z` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Commit hash from the entry header.
    pub id: String,
    /// Full commit message with log indentation removed.
    pub message: String,
}

/// Monorepo checkout rooted at the directory containing `.git`.
pub struct Repository {
    root: PathBuf,
    head_sha: String,
}

impl Repository {
    /// Locate the repository root by walking up from the current directory.
    pub fn discover(head_sha: String) -> Result<Self> {
        let start = env::current_dir()?;
        Self::discover_from(start, head_sha)
    }

    /// Walk upward from `start` until a directory containing a `.git` entry
    /// is found. Fails once the filesystem root has been searched.
    pub fn discover_from(start: PathBuf, head_sha: String) -> Result<Self> {
        let mut current = start.clone();
        loop {
            if current.join(".git").symlink_metadata().is_ok() {
                return Ok(Self {
                    root: current,
                    head_sha,
                });
            }
            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(MonotagError::RepoRootNotFound { start }),
            }
        }
    }

    /// Repository root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Commit treated as HEAD for log ranges and release targets.
    pub fn head_sha(&self) -> &str {
        &self.head_sha
    }

    /// Candidate module directories: immediate children of the root,
    /// directories only, hidden entries excluded. Filesystem enumeration
    /// order, not sorted.
    pub fn modules(&self) -> Result<Vec<String>> {
        let mut modules = vec![];

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            if entry.file_type()?.is_dir() {
                modules.push(name);
            }
        }

        Ok(modules)
    }

    /// Versions already tagged for `module`, with the `module/` prefix
    /// stripped. Empty when the module has never been tagged.
    pub fn module_versions(&self, module: &str) -> Result<Vec<String>> {
        let pattern = format!("{}/*", module);
        let stdout = self.git(&["tag", "-l", &pattern])?;

        let prefix = format!("{}/", module);
        Ok(stdout
            .lines()
            .filter_map(|tag| tag.strip_prefix(&prefix))
            .map(str::to_string)
            .collect())
    }

    /// Commits touching paths under `module` since the tagged `version`,
    /// up to and including the configured head commit.
    pub fn commits_since(
        &self,
        module: &str,
        version: &str,
    ) -> Result<Vec<LogEntry>> {
        let range = format!("{}/{}...{}", module, version, self.head_sha);
        let stdout = self.git(&[
            "log",
            "-z",
            "--no-decorate",
            "--pretty=medium",
            &range,
            "--",
            module,
        ])?;

        Ok(parse_log(&stdout))
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        debug!("running: git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MonotagError::git(format!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

/// Split NUL-separated `--pretty=medium` output into log entries. Empty
/// output yields no entries.
pub fn parse_log(output: &str) -> Vec<LogEntry> {
    output
        .split('\0')
        .filter(|entry| !entry.trim().is_empty())
        .filter_map(parse_log_entry)
        .collect()
}

/// Parse one medium-format entry: a `commit <sha>` header block, a blank
/// line, then the indented message. Entries without a recognizable header
/// line are dropped.
fn parse_log_entry(entry: &str) -> Option<LogEntry> {
    let entry = entry.trim_start_matches('\n');

    let id = entry
        .lines()
        .next()?
        .strip_prefix("commit ")?
        .trim()
        .to_string();

    let message = match entry.split_once("\n\n") {
        Some((_, block)) => block
            .lines()
            .map(|line| line.strip_prefix(LOG_MESSAGE_INDENT).unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string(),
        None => String::new(),
    };

    Some(LogEntry { id, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::TempDir;

    /// Run a git command in `dir`, panicking on failure.
    fn git(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .expect("failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Initialize a repository with committer identity configured.
    fn init_repo(dir: &Path) {
        git(dir, &["init", "-b", "main"]);
        git(dir, &["config", "user.name", "Test User"]);
        git(dir, &["config", "user.email", "test@example.com"]);
    }

    /// Write a file under `module` and commit it with `message`.
    fn commit_file(dir: &Path, module: &str, file: &str, message: &str) {
        let module_dir = dir.join(module);
        fs::create_dir_all(&module_dir).unwrap();
        fs::write(module_dir.join(file), message).unwrap();
        git(dir, &["add", "."]);
        git(dir, &["commit", "-m", message]);
    }

    #[test]
    fn discovers_root_from_nested_directory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("api/src/deeply");
        fs::create_dir_all(&nested).unwrap();

        let repo =
            Repository::discover_from(nested, "HEAD".to_string()).unwrap();
        assert_eq!(repo.root(), tmp.path());
    }

    #[test]
    fn discovery_fails_at_filesystem_root() {
        let tmp = TempDir::new().unwrap();
        let result =
            Repository::discover_from(tmp.path().to_path_buf(), "HEAD".into());
        assert!(matches!(
            result,
            Err(MonotagError::RepoRootNotFound { .. })
        ));
    }

    #[test]
    fn modules_lists_only_visible_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".git")).unwrap();
        fs::create_dir_all(tmp.path().join("api")).unwrap();
        fs::create_dir_all(tmp.path().join("lib")).unwrap();
        fs::create_dir_all(tmp.path().join(".github")).unwrap();
        fs::write(tmp.path().join("README.md"), "readme").unwrap();

        let repo =
            Repository::discover_from(tmp.path().to_path_buf(), "HEAD".into())
                .unwrap();
        let mut modules = repo.modules().unwrap();
        modules.sort();

        assert_eq!(modules, vec!["api".to_string(), "lib".to_string()]);
    }

    #[test]
    fn module_versions_strips_tag_prefix() {
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());
        commit_file(tmp.path(), "api", "a.txt", "chore: initial");
        git(tmp.path(), &["tag", "api/1.0.0"]);
        git(tmp.path(), &["tag", "api/1.2.0"]);
        git(tmp.path(), &["tag", "lib/0.3.0"]);

        let repo =
            Repository::discover_from(tmp.path().to_path_buf(), "HEAD".into())
                .unwrap();
        let mut versions = repo.module_versions("api").unwrap();
        versions.sort();

        assert_eq!(versions, vec!["1.0.0".to_string(), "1.2.0".to_string()]);
        assert_eq!(repo.module_versions("cli").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn commits_since_returns_commits_touching_the_module() {
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());
        commit_file(tmp.path(), "api", "a.txt", "chore: initial");
        git(tmp.path(), &["tag", "api/1.0.0"]);
        commit_file(tmp.path(), "api", "b.txt", "feat: add endpoint");
        commit_file(tmp.path(), "lib", "c.txt", "fix: unrelated module");

        let repo =
            Repository::discover_from(tmp.path().to_path_buf(), "HEAD".into())
                .unwrap();
        let entries = repo.commits_since("api", "1.0.0").unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "feat: add endpoint");
        assert!(!entries[0].id.is_empty());
    }

    #[test]
    fn commits_since_preserves_message_bodies() {
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());
        commit_file(tmp.path(), "api", "a.txt", "chore: initial");
        git(tmp.path(), &["tag", "api/1.0.0"]);

        fs::write(tmp.path().join("api/b.txt"), "update").unwrap();
        git(tmp.path(), &["add", "."]);
        git(
            tmp.path(),
            &[
                "commit",
                "-m",
                "fix: drop legacy",
                "-m",
                "BREAKING CHANGE: removes the old entry point",
            ],
        );

        let repo =
            Repository::discover_from(tmp.path().to_path_buf(), "HEAD".into())
                .unwrap();
        let entries = repo.commits_since("api", "1.0.0").unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].message,
            "fix: drop legacy\n\nBREAKING CHANGE: removes the old entry point"
        );
    }

    #[test]
    fn commits_since_is_empty_when_tag_is_at_head() {
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());
        commit_file(tmp.path(), "api", "a.txt", "chore: initial");
        git(tmp.path(), &["tag", "api/1.0.0"]);

        let repo =
            Repository::discover_from(tmp.path().to_path_buf(), "HEAD".into())
                .unwrap();
        let entries = repo.commits_since("api", "1.0.0").unwrap();

        assert!(entries.is_empty());
    }

    #[test]
    fn parse_log_splits_null_separated_entries() {
        let output = concat!(
            "commit 1111111111111111111111111111111111111111\n",
            "Author: Test User <test@example.com>\n",
            "Date:   Mon Aug 3 10:00:00 2026 +0000\n",
            "\n",
            "    feat: add endpoint\n",
            "\0",
            "commit 2222222222222222222222222222222222222222\n",
            "Author: Test User <test@example.com>\n",
            "Date:   Mon Aug 3 09:00:00 2026 +0000\n",
            "\n",
            "    fix: drop legacy\n",
            "\n",
            "    BREAKING CHANGE: removes the old entry point\n",
        );

        let entries = parse_log(output);

        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].id,
            "1111111111111111111111111111111111111111"
        );
        assert_eq!(entries[0].message, "feat: add endpoint");
        assert_eq!(
            entries[1].message,
            "fix: drop legacy\n\nBREAKING CHANGE: removes the old entry point"
        );
    }

    #[test]
    fn parse_log_handles_empty_output() {
        assert!(parse_log("").is_empty());
    }

    #[test]
    fn parse_log_keeps_body_indentation_beyond_log_indent() {
        let output = concat!(
            "commit 3333333333333333333333333333333333333333\n",
            "Author: Test User <test@example.com>\n",
            "Date:   Mon Aug 3 08:00:00 2026 +0000\n",
            "\n",
            "    feat: add config\n",
            "\n",
            "    example:\n",
            "        nested = true\n",
        );

        let entries = parse_log(output);

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].message,
            "feat: add config\n\nexample:\n    nested = true"
        );
    }
}
