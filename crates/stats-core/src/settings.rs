use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{Result, StatsError};
use crate::models::{Decoding, OpenPolicy};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Letter and doubled-letter frequency statistics for two text files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "letter-stats",
    about = "Letter and doubled-letter frequency statistics for two text files",
    version
)]
pub struct Settings {
    /// File for case-sensitive single-letter statistics ("-" reads stdin)
    pub single_file: Option<PathBuf>,

    /// File for case-insensitive doubled-letter statistics ("-" reads stdin)
    pub pair_file: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// How bytes are decoded into characters
    #[arg(long, default_value = "byte", value_parser = ["byte", "utf8"])]
    pub decoding: String,

    /// Fail when an input file cannot be opened instead of treating it as empty
    #[arg(long)]
    pub strict: bool,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os().collect())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args(args: Vec<OsString>) -> Self {
        Self::resolve(Settings::parse_from(args))
    }

    /// Apply the `--debug` flag.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Both input paths, or `None` when either was left out.
    pub fn input_paths(&self) -> Option<(PathBuf, PathBuf)> {
        match (&self.single_file, &self.pair_file) {
            (Some(single), Some(pair)) => Some((single.clone(), pair.clone())),
            _ => None,
        }
    }

    pub fn decoding(&self) -> Result<Decoding> {
        match self.decoding.as_str() {
            "byte" => Ok(Decoding::Byte),
            "utf8" => Ok(Decoding::Utf8),
            other => Err(StatsError::Config(format!("unknown decoding: {}", other))),
        }
    }

    pub fn open_policy(&self) -> OpenPolicy {
        if self.strict {
            OpenPolicy::Strict
        } else {
            OpenPolicy::Degrade
        }
    }

    pub fn wants_json(&self) -> bool {
        self.format == "json"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
