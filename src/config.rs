use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for downloadable files.
    pub scan_dir: PathBuf,
    /// Where the generated page is written.
    pub output_html: PathBuf,
    /// Root of the raw-content URL used for every non-`.txt` file.
    pub raw_base_url: String,
    /// Root URL used for `.txt` files.
    pub txt_base_url: String,
    /// Path segment between `raw_base_url` and a file's relative path.
    pub raw_subpath: String,
    pub page_title: String,
    /// Regex tested against each entry's base name; matches are skipped.
    pub ignore: String,
    /// HTML-escape file names and labels before embedding them.
    pub escape_names: bool,
    pub labels: Labels,
}

/// User-visible page text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub lang: String,
    pub name: String,
    pub size: String,
    pub modified: String,
    pub action: String,
    pub txt_download: String,
    pub raw_download: String,
    pub empty: String,
    pub footer: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_dir: PathBuf::from("download/doc"),
            output_html: PathBuf::from("download/download.html"),
            raw_base_url: "https://github.com/st2026-dev/st2026-dev.github.io/raw/main".to_string(),
            txt_base_url: "https://st2026-dev.github.io/download/doc".to_string(),
            raw_subpath: "download/doc".to_string(),
            page_title: "资源下载站 - 自动生成".to_string(),
            ignore: r"^\.".to_string(),
            escape_names: false,
            labels: Labels::default(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            lang: "zh-CN".to_string(),
            name: "文件名称".to_string(),
            size: "文件大小".to_string(),
            modified: "最后更新".to_string(),
            action: "操作".to_string(),
            txt_download: "点击下载".to_string(),
            raw_download: "立即下载".to_string(),
            empty: "暂无下载文件".to_string(),
            footer: "页面由GitHub Actions自动生成 | 最后生成时间：".to_string(),
        }
    }
}

impl Config {
    pub fn get_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dlpage/config.toml")
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// used when present and the built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let config_path = Self::get_path();
        if config_path.is_file() {
            Self::from_file(&config_path)
        } else {
            debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn ignore_pattern(&self) -> Result<Regex> {
        Regex::new(&self.ignore).map_err(|source| Error::IgnorePattern {
            pattern: self.ignore.clone(),
            source,
        })
    }
}
