use clap::Parser;
use color_eyre::eyre::{Report, Result};
use relate_viewer::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<(), Report> {
    // ------------------------------------------------------------------------
    // CLI Setup

    let args = Cli::parse();

    // initialize color_eyre crate for colorized logs
    color_eyre::install()?;

    // Set logging/verbosity level via RUST_LOG
    std::env::set_var("RUST_LOG", args.verbosity.to_string());

    // initialize env_logger crate for logging/verbosity level
    env_logger::init();

    // check which CLI command we're running (download, render)
    match args.command {
        cli::Command::Download(args) => cli::download::download(&args).await?,
        cli::Command::Render(args) => cli::render::render(&args).await?,
    }

    Ok(())
}
