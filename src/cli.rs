use clap::Parser;
use std::path::PathBuf;

use crate::config::ErrorPolicy;

/// Back up every open board of one or more Trello organizations to JSON files.
#[derive(Parser, Debug)]
#[command(name = "trello-backup")]
#[command(version, long_about = None)]
pub struct Cli {
    /// TOML config file (defaults to ~/.trello-backup/config.toml)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to save JSON files, created if it does not exist
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_directory: Option<PathBuf>,

    /// Trello app name shown on the token authorization page
    #[arg(short = 'a', long)]
    pub app_name: Option<String>,

    /// Trello API key
    #[arg(short = 'k', long, env = "TRELLO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Trello OAuth token
    #[arg(short = 't', long, env = "TRELLO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Expiration requested for a new token (1hour, 1day, 30days, never)
    #[arg(short = 'e', long)]
    pub token_expiration: Option<String>,

    /// Logging level: DEBUG|INFO|WARNING|ERROR|CRITICAL
    #[arg(short = 'l', long)]
    pub log_level: Option<String>,

    /// Comma-separated organization id(s) to back up
    #[arg(short = 'o', long)]
    pub organization_ids: Option<String>,

    /// Comma-separated organization name(s) to back up
    #[arg(short = 'n', long)]
    pub organization_names: Option<String>,

    /// Trello REST base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// What to do when a single board fails to load or save
    #[arg(long, value_enum)]
    pub on_error: Option<ErrorPolicy>,
}
