//! Journey CLI - turn a directory of photographs into a browsable journey report.
//!
//! Reads the capture time of every photo, writes downsized thumbnails through
//! one GraphicsMagick batch job, and renders `index.html` next to the photos.
//!
//! # Usage
//!
//! ```bash
//! journey ~/Pictures/2017-lisbon
//! ```
//!
//! The path to `gm` comes from the config file (`$JOURNEY_CONFIG`, or
//! `~/.config/journey/config.toml` on Linux).

use clap::Parser;

mod cli;
mod logging;

/// Journey - turn a directory of photographs into a browsable journey report.
#[derive(Parser, Debug)]
#[command(name = "journey")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    build: cli::build::BuildArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Wrong argument count exits here with clap's usage error (status 2),
    // before anything touches the filesystem.
    let cli = Cli::parse();

    cli::build::execute(cli.build).await
}
