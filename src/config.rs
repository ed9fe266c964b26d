//! Configuration management for the replay tool.
//!
//! Handles:
//! - Command-line argument parsing
//! - Machine profile loading (TOML)

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::machine::Position;

/// What to do when a line fails to parse or execute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first failing line
    #[default]
    Abort,
    /// Report the failing line and carry on with the next one
    Continue,
}

/// Command-line arguments for the replay tool
#[derive(Debug, Parser)]
#[command(name = "gcode-replay")]
#[command(about = "Replay a GCode program and report the tracked machine state")]
#[command(version)]
pub struct Args {
    /// Program to replay, `-` reads standard input
    pub program: PathBuf,

    /// Machine profile to load instead of the default one
    #[arg(long, help = "Machine profile TOML file")]
    pub profile: Option<PathBuf>,

    /// Error policy, overrides the profile
    #[arg(long, value_enum)]
    pub on_error: Option<ErrorPolicy>,

    /// Only parse lines, do not track state
    #[arg(long)]
    pub parse_only: bool,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Machine profile file structure (matches TOML)
///
/// ```toml
/// [machine]
/// name = "replicator"
///
/// [home_position]
/// X = 152.0
/// Y = 75.0
/// Z = 0.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MachineProfile {
    #[serde(default)]
    pub machine: MachineMeta,
    #[serde(default)]
    pub home_position: Position,
    pub on_error: Option<ErrorPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MachineMeta {
    pub name: Option<String>,
}

impl MachineProfile {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid machine profile")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read machine profile {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to load machine profile {}", path.display()))
    }

    /// Default profile location in the user config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gcode-replay").join("machine.toml"))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub program: PathBuf,
    pub profile: MachineProfile,
    /// Profile file actually loaded, if any
    pub profile_path: Option<PathBuf>,
    pub on_error: ErrorPolicy,
    pub parse_only: bool,
    pub json: bool,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from arguments, falling back to the profile in
    /// the user config directory
    pub fn from_args(args: Args) -> Result<Self> {
        Self::from_args_with_default(args, MachineProfile::default_path())
    }

    /// Create configuration from explicit arguments and default profile
    /// location (useful for testing)
    pub fn from_args_with_default(args: Args, default_profile: Option<PathBuf>) -> Result<Self> {
        // An explicit profile must exist, the default one may not
        let profile_path = match args.profile {
            Some(path) => Some(path),
            None => default_profile.filter(|path| path.is_file()),
        };

        let profile = match &profile_path {
            Some(path) => MachineProfile::load(path)?,
            None => MachineProfile::default(),
        };

        let on_error = args.on_error.or(profile.on_error).unwrap_or_default();

        Ok(Config {
            program: args.program,
            profile,
            profile_path,
            on_error,
            parse_only: args.parse_only,
            json: args.json,
            log_level: args.log_level,
        })
    }

    /// Whether the program should be read from standard input
    pub fn reads_stdin(&self) -> bool {
        self.program.as_os_str() == "-"
    }
}
