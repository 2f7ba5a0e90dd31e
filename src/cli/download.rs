use crate::dataset::{remote, Padding, SessionConfig};
use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use log::info;
use std::fs::create_dir_all;
use std::path::PathBuf;

/// Download analysis input files.
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

    /// Output directory.
    ///
    /// If the directory does not exist, it will be created.
    #[clap(short = 'o', long, required = true)]
    pub output_dir: PathBuf,
}

/// Fetch the four input files of an analysis and write a download manifest
/// next to them.
pub async fn download(args: &Args) -> Result<(), Report> {
    info!("Downloading analysis: {}", args.analysis_id);

    if !args.output_dir.exists() {
        info!("Creating output directory: {:?}", &args.output_dir);
        create_dir_all(&args.output_dir)?;
    }

    let config = SessionConfig {
        data_url: args.data_url.clone(),
        hapmap_url: args.hapmap_url.clone(),
        analysis_id: args.analysis_id.clone(),
        padding: Padding::uniform(0.0),
        primary_font_size_px: 0.0,
    };

    let id = &args.analysis_id;
    let files = [
        (config.haplotype_url(), format!("{id}.haploidid.fullassembled.BOTH.txt")),
        (config.mutation_url(), format!("{id}.mut")),
        (config.ancestor_url(), format!("{id}.anc")),
        (config.hapmap_url.clone(), "hapmap.tsv".to_string()),
    ];

    let mut manifest = Vec::new();
    for (url, file_name) in &files {
        info!("Downloading: {url}");
        let record = remote::materialize(url, &args.output_dir, file_name).await?;
        manifest.push(record);
    }

    let manifest_path = args.output_dir.join("manifest.json");
    let output = serde_json::to_string_pretty(&manifest)
        .wrap_err("Failed to serialize the download manifest.")?;
    std::fs::write(&manifest_path, format!("{output}\n"))
        .wrap_err_with(|| format!("Failed to write file: {manifest_path:?}"))?;

    info!("Done.");
    Ok(())
}
