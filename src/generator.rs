use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::filesystem::scan_files;
use crate::page;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub file_count: usize,
    pub output: PathBuf,
}

/// Scan `config.scan_dir`, render the page and write it to
/// `config.output_html`, overwriting any previous page.
pub fn run(config: &Config) -> Result<RunSummary> {
    let ignore = config.ignore_pattern()?;

    let scan_dir = &config.scan_dir;
    if !scan_dir.exists() {
        create_dir(scan_dir)?;
        info!(path = %scan_dir.display(), "created scan directory");
    }

    info!(path = %scan_dir.display(), "scanning");
    let files = scan_files(scan_dir, &ignore)?;
    info!(count = files.len(), "scan complete");

    let html = page::render(&files, config);

    let output = &config.output_html;
    if let Some(parent) = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        create_dir(parent)?;
    }
    fs::write(output, html).map_err(|source| Error::Write {
        path: output.clone(),
        source,
    })?;
    info!(path = %output.display(), "download page written");

    Ok(RunSummary {
        file_count: files.len(),
        output: output.clone(),
    })
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
