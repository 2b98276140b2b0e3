//! Application configuration.
//!
//! An [`AppConfig`] is built once in `main` from three layers, highest
//! precedence first: command-line flags (which clap already merges with
//! their `JOT_*` environment variables), the optional YAML file, and the
//! built-in defaults. The resulting value is passed down explicitly.

use std::env;
use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::extract::{ExtractionRules, RuleOverrides};

/// Directory name used under the XDG base directories.
pub const APP_DIR: &str = "jot";

pub const DEFAULT_PORT: u16 = 3737;
pub const DEFAULT_BOOKS_URL: &str = "https://openlibrary.org";
pub const DEFAULT_BOOKS_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(jot::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    #[diagnostic(
        code(jot::config::parse),
        help("The file must be YAML with optional server, database, extraction and books sections")
    )]
    Parse { path: PathBuf, message: String },
}

// =============================================================================
// XDG paths
// =============================================================================

fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `$XDG_DATA_HOME/jot`, falling back to `~/.local/share/jot`.
pub fn data_dir() -> PathBuf {
    env::var_os("XDG_DATA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".local/share"))
        .join(APP_DIR)
}

/// `$XDG_CONFIG_HOME/jot`, falling back to `~/.config/jot`.
pub fn config_dir() -> PathBuf {
    env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".config"))
        .join(APP_DIR)
}

/// Default database location: `data_dir()/jot.db`.
pub fn default_db_path() -> PathBuf {
    data_dir().join("jot.db")
}

/// Default config file location: `config_dir()/config.yaml`.
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

// =============================================================================
// YAML file
// =============================================================================

/// On-disk configuration. Every field is optional.
///
/// ```yaml
/// server:
///   host: 127.0.0.1
///   port: 3737
///   docs: true
/// database:
///   path: /var/lib/jot/jot.db
/// extraction:
///   imperative_verbs:
///     triage: true
///     buy: false
///   keyword_cues: ["todo:", "follow-up:"]
/// books:
///   base_url: https://openlibrary.org
///   timeout_secs: 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub extraction: RuleOverrides,
    pub books: BooksSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub docs: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BooksSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(path, &text)
    }

    /// Load an explicitly requested file, or the default file when present.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = default_config_path();
                if path.is_file() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

// =============================================================================
// Resolved configuration
// =============================================================================

/// Open Library client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooksConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BOOKS_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_BOOKS_TIMEOUT_SECS),
        }
    }
}

/// Values supplied on the command line. `None` defers to the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub db_path: Option<PathBuf>,
    pub enable_docs: bool,
    pub verbosity: u8,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub db_path: PathBuf,
    pub enable_docs: bool,
    /// 0 = warn, 1 = info, 2 = debug, 3+ = trace.
    pub verbosity: u8,
    pub rules: ExtractionRules,
    pub books: BooksConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            db_path: default_db_path(),
            enable_docs: false,
            verbosity: 0,
            rules: ExtractionRules::default(),
            books: BooksConfig::default(),
        }
    }
}

impl AppConfig {
    /// Layer command-line overrides over a file config over the defaults.
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        let defaults = Self::default();

        let books = BooksConfig {
            base_url: file
                .books
                .base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.books.base_url),
            timeout: file
                .books
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.books.timeout),
        };

        Self {
            host: overrides.host.or(file.server.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.server.port).unwrap_or(defaults.port),
            db_path: overrides
                .db_path
                .or(file.database.path)
                .unwrap_or(defaults.db_path),
            enable_docs: overrides.enable_docs || file.server.docs.unwrap_or(false),
            verbosity: overrides.verbosity,
            rules: ExtractionRules::default().apply(file.extraction),
            books,
        }
    }

    /// `host:port` for binding the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
