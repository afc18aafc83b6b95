//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Typesys CLI - Inspect and validate relationship typedefs.
#[derive(Debug, Parser)]
#[command(name = "typesys")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TYPESYS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate relationship defs
    Check(CheckArgs),

    /// Print relationship defs
    Show(ShowArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Typedef files (JSON)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Enable every rule and reject upward tag propagation
    #[arg(long, conflicts_with = "permissive")]
    pub strict: bool,

    /// Only check that both ends are present and complete
    #[arg(long)]
    pub permissive: bool,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Typedef files (JSON)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from(["typesys", "check", "a.json", "b.json", "--strict"]);
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.files.len(), 2);
                assert!(args.strict);
                assert!(!args.permissive);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_check_requires_files() {
        assert!(Cli::try_parse_from(["typesys", "check"]).is_err());
    }

    #[test]
    fn test_strict_conflicts_with_permissive() {
        let result = Cli::try_parse_from(["typesys", "check", "a.json", "--strict", "--permissive"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["typesys", "show", "a.json", "-vv", "--format", "json", "--no-color"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["typesys", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected Config Init command"),
        }
    }
}
