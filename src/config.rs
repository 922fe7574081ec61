use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

pub const DEFAULT_API_URL: &str = "https://api.trello.com/1/";
const DEFAULT_APP_NAME: &str = "trello-backup";
const DEFAULT_TOKEN_EXPIRATION: &str = "never";

/// Keys accepted in the TOML config file. Every key is optional and is
/// overridden by the matching command-line flag.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub token: Option<String>,
    pub token_expiration: Option<String>,
    pub app_name: Option<String>,
    pub output_directory: Option<PathBuf>,
    pub log_level: Option<String>,
    pub organization_ids: Option<String>,
    pub organization_names: Option<String>,
    pub on_error: Option<ErrorPolicy>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub token: String,
}

/// What to do when a single board cannot be loaded or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the whole run on the first failed board.
    #[default]
    Abort,
    /// Log the failure, back up the remaining boards, exit non-zero at the end.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARNING" | "WARN" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warning => tracing::Level::WARN,
            Self::Error | Self::Critical => tracing::Level::ERROR,
        }
    }
}

/// Which organizations to back up. Ids are used as-is; names go through
/// the organization directory first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgSelection {
    Ids(Vec<String>),
    Names(Vec<String>),
}

/// Fully resolved options for one run. Built once in `main` and only ever
/// borrowed afterwards.
#[derive(Debug, Clone)]
pub struct BackupConfig {
    pub api_url: String,
    pub credentials: Credentials,
    pub app_name: String,
    pub token_expiration: String,
    pub output_directory: PathBuf,
    pub log_level: LogLevel,
    pub organizations: OrgSelection,
    /// Names given alongside ids; ids win and these are not looked up.
    pub ignored_names: Vec<String>,
    pub on_error: ErrorPolicy,
}

impl BackupConfig {
    /// Merge command-line values over the config file and built-in defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let api_url = ensure_trailing_slash(
            cli.api_url
                .clone()
                .or(file.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        );

        let log_level_raw = cli
            .log_level
            .clone()
            .or(file.log_level)
            .unwrap_or_else(|| "INFO".to_string());
        let log_level = LogLevel::parse(&log_level_raw)
            .with_context(|| format!("Unknown log level '{log_level_raw}'"))?;

        let ids = cli
            .organization_ids
            .clone()
            .or(file.organization_ids)
            .map(|s| split_list(&s.to_lowercase()))
            .unwrap_or_default();
        let names = cli
            .organization_names
            .clone()
            .or(file.organization_names)
            .map(|s| split_list(&s))
            .unwrap_or_default();
        let (organizations, ignored_names) = if !ids.is_empty() {
            (OrgSelection::Ids(ids), names)
        } else if !names.is_empty() {
            (OrgSelection::Names(names), Vec::new())
        } else {
            (OrgSelection::Ids(Vec::new()), Vec::new())
        };

        Ok(Self {
            api_url,
            credentials: Credentials {
                api_key: cli.api_key.clone().or(file.api_key).unwrap_or_default(),
                token: cli.token.clone().or(file.token).unwrap_or_default(),
            },
            app_name: cli
                .app_name
                .clone()
                .or(file.app_name)
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            token_expiration: cli
                .token_expiration
                .clone()
                .or(file.token_expiration)
                .unwrap_or_else(|| DEFAULT_TOKEN_EXPIRATION.to_string()),
            output_directory: cli
                .output_directory
                .clone()
                .or(file.output_directory)
                .unwrap_or_else(|| PathBuf::from(".")),
            log_level,
            organizations,
            ignored_names,
            on_error: cli.on_error.or(file.on_error).unwrap_or_default(),
        })
    }
}

/// Split a comma-separated option value, trimming each entry and dropping
/// empty ones.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

fn ensure_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".trello-backup")
        .join("config.toml")
}

/// Read the config file. An explicitly named file must exist; the default
/// location is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let path = default_config_path();
            if !path.exists() {
                return Ok(FileConfig::default());
            }
            path
        }
    };
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: FileConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["trello-backup"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn split_list_trims_and_drops_empty() {
        assert_eq!(split_list(" Acme ,BETA"), vec!["Acme", "BETA"]);
        assert_eq!(split_list("a,,b, "), vec!["a", "b"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn log_level_accepts_python_style_names() {
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("CRITICAL"), Some(LogLevel::Critical));
        assert_eq!(LogLevel::parse(" debug "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("verbose"), None);
        assert_eq!(LogLevel::Critical.as_tracing(), tracing::Level::ERROR);
    }

    #[test]
    fn defaults_apply_when_nothing_given() {
        let config = BackupConfig::resolve(&cli(&[]), FileConfig::default()).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.app_name, "trello-backup");
        assert_eq!(config.token_expiration, "never");
        assert_eq!(config.output_directory, PathBuf::from("."));
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.on_error, ErrorPolicy::Abort);
        assert_eq!(config.organizations, OrgSelection::Ids(vec![]));
    }

    #[test]
    fn command_line_overrides_file() {
        let file: FileConfig = toml::from_str(
            r#"
api_key = "file-key"
token = "file-token"
output_directory = "/from/file"
log_level = "ERROR"
on_error = "skip"
"#,
        )
        .unwrap();
        let config =
            BackupConfig::resolve(&cli(&["-k", "cli-key", "-d", "/from/cli"]), file).unwrap();
        assert_eq!(config.credentials.api_key, "cli-key");
        assert_eq!(config.credentials.token, "file-token");
        assert_eq!(config.output_directory, PathBuf::from("/from/cli"));
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.on_error, ErrorPolicy::Skip);
    }

    #[test]
    fn ids_take_precedence_over_names() {
        let config = BackupConfig::resolve(
            &cli(&["-o", "id1, id2", "-n", "acme"]),
            FileConfig::default(),
        )
        .unwrap();
        assert_eq!(
            config.organizations,
            OrgSelection::Ids(vec!["id1".into(), "id2".into()])
        );
        assert_eq!(config.ignored_names, vec!["acme"]);
    }

    #[test]
    fn ids_are_lower_cased() {
        let config =
            BackupConfig::resolve(&cli(&["-o", " 5F1ABC ,60aBc"]), FileConfig::default()).unwrap();
        assert_eq!(
            config.organizations,
            OrgSelection::Ids(vec!["5f1abc".into(), "60abc".into()])
        );
    }

    #[test]
    fn names_used_when_no_ids() {
        let config =
            BackupConfig::resolve(&cli(&["-n", " Acme ,BETA"]), FileConfig::default()).unwrap();
        assert_eq!(
            config.organizations,
            OrgSelection::Names(vec!["Acme".into(), "BETA".into()])
        );
    }

    #[test]
    fn api_url_gets_trailing_slash() {
        let config = BackupConfig::resolve(
            &cli(&["--api-url", "http://localhost:1234/1"]),
            FileConfig::default(),
        )
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:1234/1/");
    }

    #[test]
    fn unknown_log_level_is_an_error() {
        let result = BackupConfig::resolve(&cli(&["-l", "chatty"]), FileConfig::default());
        assert!(result.unwrap_err().to_string().contains("chatty"));
    }

    #[test]
    fn load_config_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.toml");
        std::fs::write(&path, "organization_names = \"acme\"\napp_name = \"nightly\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.organization_names.as_deref(), Some("acme"));
        assert_eq!(config.app_name.as_deref(), Some("nightly"));
    }

    #[test]
    fn load_config_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(&dir.path().join("nope.toml")));
        assert!(result.unwrap_err().to_string().contains("Failed to read config"));
    }

    #[test]
    fn load_config_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.toml");
        std::fs::write(&path, "api_secret = \"x\"\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
