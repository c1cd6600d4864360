use clap::Parser;
use std::path::PathBuf;

/// A terminal S3 file browser
#[derive(Debug, Clone, Parser)]
#[command(name = "bucketman", version)]
pub struct Cli {
    /// Custom S3 endpoint, e.g. a MinIO server
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Static access key ID
    #[arg(long, requires = "secret_access_key")]
    pub access_key_id: Option<String>,

    /// Static secret access key
    #[arg(long, requires = "access_key_id")]
    pub secret_access_key: Option<String>,

    /// The S3 bucket to open
    #[arg(long)]
    pub bucket: Option<String>,

    #[arg(long)]
    pub region: Option<String>,

    /// AWS shared config profile
    #[arg(long)]
    pub profile: Option<String>,

    /// Config file (default: ~/.config/bucketman/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log what would be transferred or deleted without doing it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logs in bucketman.log
    #[arg(long)]
    pub debug: bool,

    /// Local directory to browse
    pub dir: Option<PathBuf>,
}
