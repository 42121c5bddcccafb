//! Traits related to remote release forges
use async_trait::async_trait;

use crate::{error::Result, forge::request::CreateReleaseRequest};

/// Narrow interface to the remote release API. Orchestration only ever
/// needs release creation, which keeps it testable with a substitute
/// implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Forge {
    /// Create a remote release pointing the requested tag at a commit.
    async fn create_release(&self, req: CreateReleaseRequest) -> Result<()>;
}
