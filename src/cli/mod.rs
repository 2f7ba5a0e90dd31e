//! Command-line interface of the viewer binary.

pub mod download;
pub mod render;

use clap::{Parser, Subcommand, ValueEnum};

// ----------------------------------------------------------------------------
// CLI Entry Point
// ----------------------------------------------------------------------------

/// The command-line interface, parsed from [`std::env::args`] in the main
/// function.
#[derive(Debug, Parser)]
#[clap(name = "relate-viewer", author, version)]
#[clap(about = "Renders Relate genomic-ancestry output as linked SVG views.")]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,

    /// Set the output verbosity level.
    #[clap(short = 'v', long)]
    #[clap(value_enum, default_value_t = Verbosity::default())]
    #[clap(global = true)]
    pub verbosity: Verbosity,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the input files of an analysis into a local directory.
    Download(download::Args),
    /// Load an analysis and write the composed SVG document.
    Render(render::Args),
}

// ----------------------------------------------------------------------------
// Verbosity
// ----------------------------------------------------------------------------

/// Log level, forwarded to the logger through `RUST_LOG`.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Verbosity {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let lowercase = format!("{self:?}").to_lowercase();
        write!(f, "{lowercase}")
    }
}
