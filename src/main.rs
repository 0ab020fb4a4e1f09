use clap::Parser;
use log::*;
use std::io::Write;

mod cli;
mod error;
mod forge;
mod orchestrator;
mod repo;
mod resolver;
mod result;
mod version;

use crate::{
    forge::github::Github,
    orchestrator::{MergeOutcome, Orchestrator},
    repo::GitRepo,
    result::Result,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("sync_branches")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

/// Append a `name=value` pair to the build output file named by
/// GITHUB_OUTPUT. Best effort: an unset variable is logged, not fatal.
fn set_build_output(name: &str, value: &str) -> Result<()> {
    match std::env::var("GITHUB_OUTPUT") {
        Ok(path) if !path.is_empty() => {
            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            writeln!(file, "{name}={value}")?;
        }
        _ => warn!("GITHUB_OUTPUT not set: skipping output {name}"),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = cli::Args::parse();

    initialize_logger(args.debug)?;

    let workspace = cli::workspace_path()?;
    let remote_config = args.remote_config()?;

    let repo = GitRepo::new(workspace);
    let forge = Github::new(remote_config)?;

    let orchestrator = Orchestrator::new(
        args.sync_config(),
        Box::new(repo),
        Box::new(forge),
    );

    let outcome = orchestrator.run().await?;

    if let MergeOutcome::PullRequestCreated { .. } = outcome {
        let time = chrono::Local::now().format("%H:%M:%S %z").to_string();
        set_build_output("time", &time)?;
    }

    let output = outcome.output();
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
