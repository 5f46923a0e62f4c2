//! Building a journey report for one directory.

use anyhow::Context;
use clap::Args;
use journey_core::{validate_input_dir, Config, JourneyPipeline, RunContext};
use std::path::PathBuf;

use crate::logging;

/// Arguments for building a report.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory of photos to turn into a journey report
    pub input: PathBuf,
}

/// Validate the input, load configuration, and run the pipeline.
///
/// The input directory is checked before the config file is read, so a
/// mistyped path is reported even without a config in place.
pub async fn execute(args: BuildArgs) -> anyhow::Result<()> {
    let input = validate_input_dir(&args.input)?;

    let config = Config::load().with_context(|| {
        format!(
            "Could not load configuration from {}\n\n  \
             Hint: create it with a [tools] section naming the gm executable, \
             or point {} at another file.",
            Config::default_path().display(),
            journey_core::config::CONFIG_ENV,
        )
    })?;
    logging::init_from_config(&config);
    tracing::debug!("Journey v{}", journey_core::VERSION);

    let mut ctx = RunContext::new(input, &config);
    let summary = JourneyPipeline::new(&config).run(&mut ctx).await?;

    tracing::info!(
        "Journey of {} photo(s) ready, thumbnails in {:?}",
        summary.photos,
        summary.thumbnails_dir
    );
    println!("{}", summary.report_path.display());
    Ok(())
}
