//! Sequential per-module release orchestration.
//!
//! Modules are processed one at a time in scan order. A failed release
//! creation marks the run as failed but never blocks the remaining modules;
//! anything else that goes wrong aborts the run.
use log::*;

use crate::{
    analyzer::{
        commit::Commit,
        release::{self, ReleaseDraft, Tag},
    },
    error::Result,
    forge::{request::CreateReleaseRequest, traits::Forge},
    repo::Repository,
};

/// Aggregate outcome across all modules.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Releases created.
    pub released: usize,
    /// Modules skipped: untagged, or nothing to release.
    pub skipped: usize,
    /// Release-creation failures.
    pub failed: usize,
}

enum ModuleOutcome {
    Released,
    Skipped,
    Failed,
}

pub struct Orchestrator {
    repo: Repository,
    forge: Box<dyn Forge>,
}

impl Orchestrator {
    pub fn new(repo: Repository, forge: Box<dyn Forge>) -> Self {
        Self { repo, forge }
    }

    /// Process every module under the repository root.
    pub async fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for module in self.repo.modules()? {
            info!("looking at module: {}", module);
            match self.process_module(&module).await? {
                ModuleOutcome::Released => summary.released += 1,
                ModuleOutcome::Skipped => summary.skipped += 1,
                ModuleOutcome::Failed => summary.failed += 1,
            }
        }

        Ok(summary)
    }

    async fn process_module(&self, module: &str) -> Result<ModuleOutcome> {
        let versions = self.repo.module_versions(module)?;

        let Some(latest) = Tag::latest(module, &versions) else {
            info!("no tagged version for {}: skipping", module);
            return Ok(ModuleOutcome::Skipped);
        };
        info!("latest version for {}: {}", module, latest.semver);

        let entries =
            self.repo.commits_since(module, &latest.semver.to_string())?;
        let commits: Vec<Commit> =
            entries.iter().map(Commit::parse).collect();

        if log_enabled!(Level::Debug) {
            debug!(
                "commits for {}: {}",
                module,
                serde_json::to_string(&commits)?
            );
        }

        let Some(next) = release::next_version(&latest.semver, &commits)
        else {
            info!("not incrementing version for {}", module);
            return Ok(ModuleOutcome::Skipped);
        };

        let draft = ReleaseDraft::new(module, next, &commits);
        info!("new version for {}: {}", module, draft.version);

        match self.publish(&draft).await {
            Ok(()) => Ok(ModuleOutcome::Released),
            Err(err) if err.is_recoverable() => {
                error!(
                    "failed to create release for {}: {}",
                    draft.tag_name, err
                );
                Ok(ModuleOutcome::Failed)
            }
            Err(err) => Err(err),
        }
    }

    async fn publish(&self, draft: &ReleaseDraft) -> Result<()> {
        info!("creating release {}:", draft.tag_name);
        info!("{}", draft.notes);

        let req =
            CreateReleaseRequest::from_draft(draft, self.repo.head_sha());
        self.forge.create_release(req).await
    }
}
