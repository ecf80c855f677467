//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::error::InvalidStatusError;
use crate::domain::media::VideoMimeType;
use crate::domain::task::TaskStatus;

/// FieldTask - field worker client for tenant task and media APIs
#[derive(Parser, Debug)]
#[command(name = "field-task")]
#[command(version)]
#[command(about = "Field worker client for tenant-scoped task and media APIs")]
#[command(long_about = None)]
pub struct Cli {
    /// Tenant domain the API base URL is derived from
    #[arg(short = 't', long, value_name = "DOMAIN", env = "FIELD_TASK_TENANT")]
    pub tenant: Option<String>,

    /// API host the tenant subdomain is prepended to
    #[arg(long, value_name = "HOST")]
    pub api_host: Option<String>,

    /// URL scheme (http or https)
    #[arg(long, value_name = "SCHEME")]
    pub api_scheme: Option<String>,

    /// Full API base URL, skipping tenant derivation
    #[arg(long, value_name = "URL", conflicts_with_all = ["tenant", "api_host", "api_scheme"])]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List assigned tasks
    Tasks,
    /// Show one task with its stages and media
    Show {
        /// Task id
        id: u64,
    },
    /// Update a task's status (applied locally even if the server is unreachable)
    Status {
        /// Task id
        id: u64,
        /// New status (open, pause, continue, important, close)
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    /// List media recorded for a task
    Media {
        /// Task id
        id: u64,
    },
    /// Capture a recording from a file-backed stream and attach it to a task
    Record {
        /// Task id
        id: u64,
        /// Input file streamed as capture chunks
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        /// Declared MIME type of the capture
        #[arg(long, value_name = "TYPE")]
        mime: Option<MimeArg>,
        /// Chunk size in bytes for the capture stream
        #[arg(long, value_name = "BYTES")]
        chunk_size: Option<usize>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parse a status argument through the domain parser (case-insensitive)
fn parse_status(value: &str) -> Result<TaskStatus, InvalidStatusError> {
    value.parse()
}

/// MIME type argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MimeArg {
    Webm,
    Mp4,
    Ogg,
}

impl From<MimeArg> for VideoMimeType {
    fn from(arg: MimeArg) -> Self {
        match arg {
            MimeArg::Webm => VideoMimeType::Webm,
            MimeArg::Mp4 => VideoMimeType::Mp4,
            MimeArg::Ogg => VideoMimeType::Ogg,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["tenant_domain", "api_host", "api_scheme", "chunk_size"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
