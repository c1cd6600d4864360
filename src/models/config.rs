use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Contents of `~/.config/bucketman/config.json`. Credentials are never stored here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub endpoint_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path_style: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Everything needed to build the storage client and the initial screen
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint_url: Option<String>,
    pub region: Option<String>,
    pub profile: Option<String>,
    pub bucket: Option<String>,
    pub path_style: bool,
    pub credentials: Option<Credentials>,
    pub root_dir: PathBuf,
    pub dry_run: bool,
    pub debug: bool,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("bucketman").join("config.json"))
}

/// Reads a config file. A missing file yields the defaults, a malformed one is an error.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

impl Settings {
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match cli.config.clone().or_else(default_config_path) {
            Some(path) => load_file_config(&path)?,
            None => FileConfig::default(),
        };

        let root_dir = match &cli.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()
                .ok()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("/")),
        };

        Ok(Self::resolve(cli, file_config, root_dir))
    }

    /// Flags win over the config file.
    pub fn resolve(cli: &Cli, file_config: FileConfig, root_dir: PathBuf) -> Self {
        let endpoint_url = cli.endpoint_url.clone().or(file_config.endpoint_url);
        // custom endpoints (MinIO, Ceph) usually need path-style addressing
        let path_style = file_config
            .path_style
            .unwrap_or(endpoint_url.is_some());

        let credentials = match (&cli.access_key_id, &cli.secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => Some(Credentials {
                access_key_id: access_key_id.clone(),
                secret_access_key: secret_access_key.clone(),
            }),
            _ => None,
        };

        Self {
            endpoint_url,
            region: cli.region.clone().or(file_config.region),
            profile: cli.profile.clone().or(file_config.profile),
            bucket: cli.bucket.clone().or(file_config.bucket),
            path_style,
            credentials,
            root_dir,
            dry_run: cli.dry_run,
            debug: cli.debug,
        }
    }
}
