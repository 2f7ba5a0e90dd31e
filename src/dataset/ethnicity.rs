use color_eyre::eyre::{Report, Result, WrapErr};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ----------------------------------------------------------------------------
// Ethnicity index
// ----------------------------------------------------------------------------

/// One row of the population lookup table.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EthnicityDatum {
    pub sampleid: String,
    pub popname: String,
    pub gpopname: String,
}

/// Sample-to-population lookup parsed from the tab-delimited hapmap table.
///
/// Lookups never fail: unknown sample ids resolve to a sentinel record with
/// empty population names, so rendering continues for samples the table does
/// not cover.
#[derive(Clone, Debug, Default)]
pub struct EthnicityIndex {
    samples: BTreeMap<String, EthnicityDatum>,
}

impl EthnicityIndex {
    /// Parse the table: tab-delimited, header line discarded, columns
    /// `sampleid`, `popname`, `gpopname`.
    pub fn parse(text: &str) -> Result<EthnicityIndex, Report> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut samples = BTreeMap::new();
        for record in reader.records() {
            let record = record.wrap_err("Failed to parse the population table")?;
            let sampleid = record.get(0).unwrap_or("").to_string();
            if sampleid.is_empty() {
                continue;
            }
            let datum = EthnicityDatum {
                sampleid: sampleid.clone(),
                popname: record.get(1).unwrap_or("").to_string(),
                gpopname: record.get(2).unwrap_or("").to_string(),
            };
            samples.insert(sampleid, datum);
        }

        debug!("Parsed {} population records.", samples.len());
        Ok(EthnicityIndex { samples })
    }

    /// Look up a sample; unknown ids yield the sentinel record.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use relate_viewer::dataset::EthnicityIndex;
    ///
    /// let index = EthnicityIndex::default();
    /// let datum = index.sample("does-not-exist");
    /// assert_eq!(datum.sampleid, "does-not-exist");
    /// assert_eq!(datum.popname, "");
    /// assert_eq!(datum.gpopname, "");
    /// ```
    pub fn sample(&self, sampleid: &str) -> EthnicityDatum {
        self.samples.get(sampleid).cloned().unwrap_or_else(|| EthnicityDatum {
            sampleid: sampleid.to_string(),
            popname: String::new(),
            gpopname: String::new(),
        })
    }

    /// The population name of a sample, empty for unknown ids.
    pub fn popname(&self, sampleid: &str) -> String {
        self.sample(sampleid).popname
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
