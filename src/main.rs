use log::*;

mod analyzer;
mod config;
mod error;
mod forge;
mod orchestrator;
mod repo;

use crate::error::Result;

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("monotag")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = config::Config::from_env()?;

    initialize_logger(config.debug)?;

    let repo = repo::Repository::discover(config.head_sha.clone())?;
    info!("git root: {}", repo.root().display());

    let forge = forge::github::Github::new(forge::config::RemoteConfig {
        owner: config.owner.clone(),
        repo: config.repo.clone(),
        token: config.token.clone(),
    })?;

    let orchestrator = orchestrator::Orchestrator::new(repo, Box::new(forge));
    let summary = orchestrator.run().await?;

    info!(
        "run complete: {} released, {} skipped, {} failed",
        summary.released, summary.skipped, summary.failed
    );

    if summary.failed > 0 {
        error!("one or more module releases failed");
        std::process::exit(1);
    }

    Ok(())
}
