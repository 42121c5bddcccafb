//! Implements the Forge trait for Github
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::repos::releases::MakeLatest;

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig, request::CreateReleaseRequest, traits::Forge,
    },
};

/// GitHub forge implementation using Octocrab for release API interactions.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .build()?;

        Ok(Self { config, instance })
    }
}

#[async_trait]
impl Forge for Github {
    async fn create_release(&self, req: CreateReleaseRequest) -> Result<()> {
        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .create(&req.tag_name)
            .name(&req.name)
            .body(&req.body)
            .target_commitish(&req.target_commitish)
            .draft(false)
            .prerelease(false)
            .make_latest(MakeLatest::False)
            .send()
            .await?;

        Ok(())
    }
}
