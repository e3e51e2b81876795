mod cli;

use anyhow::Result;
use clap::Parser;
use repointer_core::Repointer;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() -> Result<()> {
    // Diagnostics go to stderr; the run report owns stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("repointer=info".parse()?)
                .add_directive("repointer_core=error".parse()?),
        )
        .init();

    let args = Args::parse();
    debug!("Arguments: {:?}", args);

    let repointer = Repointer::new(args.config());
    let outcome = repointer.run(&args.raw_params())?;

    info!(
        "Finished with {} replacement(s){}",
        outcome.replacements(),
        if outcome.wrote_rom() { "" } else { ", ROM not modified" }
    );
    Ok(())
}
