pub mod ethnicity;
pub mod remote;
#[cfg(test)]
mod tests;

pub use ethnicity::{EthnicityDatum, EthnicityIndex};

use color_eyre::eyre::{Report, Result, WrapErr};
use color_eyre::Help;
use indoc::formatdoc;
use log::info;
use relate_phylo::{parse_haplotypes, parse_mutations, Forest, HaplotypeMutationMatrix, Mutation, Region};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

// ----------------------------------------------------------------------------
// Session configuration
// ----------------------------------------------------------------------------

/// Box of padding around the rendered stage, in pixels.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn uniform(value: f64) -> Self {
        Padding { top: value, right: value, bottom: value, left: value }
    }
}

/// Everything the hosting environment supplies to one analysis session:
/// where the input files live, which analysis to load, and the padding/font
/// geometry the layout derives from.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Directory or base URL holding the `<id>.*` analysis files.
    pub data_url: String,
    /// URL or path of the population lookup table.
    pub hapmap_url: String,
    /// Analysis identifier; the stem of the three input file names.
    pub analysis_id: String,
    pub padding: Padding,
    pub primary_font_size_px: f64,
}

impl SessionConfig {
    pub fn haplotype_url(&self) -> String {
        format!("{}/{}.haploidid.fullassembled.BOTH.txt", self.data_url, self.analysis_id)
    }

    pub fn mutation_url(&self) -> String {
        format!("{}/{}.mut", self.data_url, self.analysis_id)
    }

    pub fn ancestor_url(&self) -> String {
        format!("{}/{}.anc", self.data_url, self.analysis_id)
    }
}

// ----------------------------------------------------------------------------
// Dataset
// ----------------------------------------------------------------------------

/// One loaded analysis. The dataset owns the haplotype list, the mutation
/// table, the ancestral forest, the derived incidence matrix and the
/// population index together, for the lifetime of the viewer instance.
///
/// There is no update or merge path: loading another analysis means building
/// a new dataset and a new view layer.
#[derive(Debug, Default)]
pub struct Dataset {
    pub analysis_id: String,
    pub haplotypes: Vec<String>,
    pub mutations: Vec<Mutation>,
    pub forest: Forest,
    pub matrix: HaplotypeMutationMatrix,
    pub ethnicities: EthnicityIndex,
}

impl Dataset {
    /// Load an analysis. The four file fetches are issued together and joined
    /// all-or-nothing: a single failure aborts the load before any parsing,
    /// and no partial dataset is ever exposed.
    pub async fn load(config: &SessionConfig) -> Result<Dataset, Report> {
        info!("Loading analysis: {}", config.analysis_id);

        let haplotype_url = config.haplotype_url();
        let mutation_url = config.mutation_url();
        let ancestor_url = config.ancestor_url();
        let (haplotype_text, mutation_text, ancestor_text, hapmap_text) = tokio::try_join!(
            remote::fetch_text(&haplotype_url),
            remote::fetch_text(&mutation_url),
            remote::fetch_text(&ancestor_url),
            remote::fetch_text(&config.hapmap_url),
        )
        .wrap_err_with(|| format!("Failed to load analysis: {:?}", config.analysis_id))
        .with_suggestion(|| {
            formatdoc!(
                "Expected to find all of:
                   {}
                   {}
                   {}
                   {}",
                config.haplotype_url(),
                config.mutation_url(),
                config.ancestor_url(),
                config.hapmap_url,
            )
        })?;

        Self::build(config, &haplotype_text, &mutation_text, &ancestor_text, &hapmap_text)
    }

    /// Parse and assemble a dataset from already-fetched file contents.
    pub fn build(
        config: &SessionConfig,
        haplotype_text: &str,
        mutation_text: &str,
        ancestor_text: &str,
        hapmap_text: &str,
    ) -> Result<Dataset, Report> {
        let haplotypes = parse_haplotypes(haplotype_text);
        let mutations = parse_mutations(mutation_text)
            .wrap_err_with(|| format!("Failed to parse: {:?}", config.mutation_url()))?;

        // the final mutation's snp ordinal closes the last region
        let last_snp = mutations.last().map(|mutation| mutation.snp).unwrap_or(0);
        let forest = Forest::parse(ancestor_text, last_snp)
            .wrap_err_with(|| format!("Failed to parse: {:?}", config.ancestor_url()))?;

        let matrix = HaplotypeMutationMatrix::derive(haplotypes.len(), &mutations, &forest);
        let ethnicities = EthnicityIndex::parse(hapmap_text)
            .wrap_err_with(|| format!("Failed to parse: {:?}", config.hapmap_url))?;

        info!(
            "Loaded {} haplotypes, {} mutations, {} trees.",
            haplotypes.len(),
            mutations.len(),
            forest.len()
        );

        Ok(Dataset {
            analysis_id: config.analysis_id.clone(),
            haplotypes,
            mutations,
            forest,
            matrix,
            ethnicities,
        })
    }

    pub fn haplotype_count(&self) -> usize {
        self.haplotypes.len()
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.len()
    }

    /// Write a summary snapshot of the loaded analysis.
    pub fn write_summary(&self, path: &Path) -> Result<(), Report> {
        let summary = Summary {
            analysis_id: self.analysis_id.clone(),
            haplotypes: self.haplotype_count(),
            mutations: self.mutation_count(),
            trees: self.forest.len(),
            regions: self.forest.regions(),
        };

        let output = serde_json::to_string_pretty(&summary)
            .wrap_err("Failed to serialize the dataset summary.")?;
        let mut file =
            File::create(path).wrap_err_with(|| format!("Failed to create file: {path:?}"))?;
        file.write_all(format!("{output}\n").as_bytes())
            .wrap_err_with(|| format!("Failed to write file: {path:?}"))?;

        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Summary
// ----------------------------------------------------------------------------

/// Dataset metadata snapshot written next to rendered output.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Summary {
    pub analysis_id: String,
    pub haplotypes: usize,
    pub mutations: usize,
    pub trees: usize,
    pub regions: Vec<Region>,
}
