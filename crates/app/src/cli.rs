use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

pub const DEFAULT_DB_URL: &str = "sqlite:quiz.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "quiz", version, about = "Multiple-choice quiz trainer")]
pub struct Cli {
    /// SQLite database holding the answer history.
    #[arg(long = "db", env = "QUIZ_DB_URL", default_value = DEFAULT_DB_URL, global = true)]
    pub db_url: String,

    /// Question bank JSON file. Uses the bundled sample bank when omitted.
    #[arg(long, env = "QUIZ_BANK", global = true)]
    pub bank: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Open the quiz window (default)
    Ui,
    /// Print unanswered, weak and solved counts
    Status,
    /// Erase the answer history
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Ui)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Turn a bare path or `sqlite:` URL into an absolute `sqlite://` URL.
///
/// `sqlite://` URLs and `sqlite::memory:` are returned as given.
///
/// # Errors
///
/// Returns `ConfigError::InvalidDbUrl` for a blank value.
pub fn normalize_sqlite_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidDbUrl {
            raw: raw.to_string(),
        });
    }
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return Ok(trimmed.to_string());
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    Ok(format!("sqlite://{}", absolute.display()))
}

/// Create the database file and its parent directories if they are missing.
///
/// # Errors
///
/// Returns an error for a URL without a path, or if the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ConfigError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ConfigError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}
