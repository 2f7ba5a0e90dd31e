use crate::dataset::{Dataset, Padding, SessionConfig};
use crate::render::{Stage, ViewEvent};
use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use log::info;
use std::path::PathBuf;

/// Render analysis arguments.
#[derive(Debug, Parser)]
pub struct Args {
    /// Analysis identifier (the stem of the input file names).
    #[clap(short = 'a', long, required = true)]
    pub analysis_id: String,

    /// Directory or base URL holding the analysis files.
    #[clap(short = 'd', long, required = true)]
    pub data_url: String,

    /// URL or path of the population lookup table.
    #[clap(long, required = true)]
    pub hapmap_url: String,

    /// Output SVG path.
    #[clap(short = 'o', long, required = true)]
    pub output: PathBuf,

    /// Open the dendrogram for this tree index before rendering.
    #[clap(long)]
    pub region: Option<usize>,

    /// Select these haplotype rows before rendering.
    #[clap(long, value_delimiter = ',')]
    pub select: Option<Vec<usize>>,

    /// Also write a dataset summary snapshot (JSON).
    #[clap(long)]
    pub summary: Option<PathBuf>,

    /// Padding around the stage, in pixels.
    #[clap(long, default_value_t = 12.0)]
    pub padding: f64,

    /// Primary font size, in pixels.
    #[clap(long, default_value_t = 14.0)]
    pub font_size: f64,
}

/// Load an analysis, replay the requested interaction state, and write the
/// composed document. The haplotype and region views always draw before the
/// dendrogram, so a region request never runs ahead of the base layout.
pub async fn render(args: &Args) -> Result<(), Report> {
    let config = SessionConfig {
        data_url: args.data_url.clone(),
        hapmap_url: args.hapmap_url.clone(),
        analysis_id: args.analysis_id.clone(),
        padding: Padding::uniform(args.padding),
        primary_font_size_px: args.font_size,
    };

    // no views are constructed unless the whole dataset loads
    let dataset = Dataset::load(&config).await?;
    let mut stage = Stage::new(&config, &dataset);

    if let Some(indexes) = &args.select {
        stage.handle(ViewEvent::SelectHaplotype { indexes: indexes.clone(), shift_key: false });
    }
    if let Some(tree_index) = args.region {
        stage.handle(ViewEvent::ToggleRegion { tree_index });
    }

    let document = stage.render();
    svg::save(&args.output, &document)
        .wrap_err_with(|| format!("Failed to write file: {:?}", args.output))?;
    info!("Rendered: {:?}", args.output);

    if let Some(path) = &args.summary {
        dataset.write_summary(path)?;
        info!("Exported summary: {path:?}");
    }

    Ok(())
}
