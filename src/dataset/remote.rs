use chrono::{DateTime, Utc};
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ----------------------------------------------------------------------------
// Remote files
// ----------------------------------------------------------------------------

/// Fetch the text content of a URL. Plain paths read from the filesystem, so
/// local checkouts and remote analyses share one code path and one error
/// shape.
pub async fn fetch_text(url: &str) -> Result<String, Report> {
    if url.starts_with("http://") || url.starts_with("https://") {
        let response = reqwest::get(url)
            .await
            .wrap_err_with(|| format!("Failed to request: {url:?}"))?;
        if response.status() != 200 {
            Err(eyre!("Failed to download: {url:?}")
                .suggestion(format!("Status code: {}", response.status())))?;
        }
        let text = response
            .text()
            .await
            .wrap_err_with(|| format!("Failed to read response body: {url:?}"))?;
        Ok(text)
    } else {
        tokio::fs::read_to_string(url)
            .await
            .wrap_err_with(|| format!("Failed to read file: {url:?}"))
    }
}

/// Fetch `url` and write it under `output_dir`, returning the manifest record.
pub async fn materialize(url: &str, output_dir: &Path, file_name: &str) -> Result<RemoteFile, Report> {
    let text = fetch_text(url).await?;
    let local_path = output_dir.join(file_name);
    tokio::fs::write(&local_path, text)
        .await
        .wrap_err_with(|| format!("Failed to write file: {local_path:?}"))?;

    Ok(RemoteFile {
        url: url.to_string(),
        local_path,
        date_downloaded: Utc::now(),
    })
}

/// One downloaded input file, as recorded in the download manifest.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RemoteFile {
    pub url: String,
    pub local_path: PathBuf,
    pub date_downloaded: DateTime<Utc>,
}
