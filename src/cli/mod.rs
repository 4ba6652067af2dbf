//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Aegis using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Aegis - Clinical data integration with HIPAA redaction
#[derive(Parser, Debug)]
#[command(name = "aegis")]
#[command(version, about, long_about = None)]
#[command(author = "Aegis Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "aegis.toml", env = "AEGIS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "AEGIS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch diagnostic reports for patients and print them redacted
    Report(commands::report::ReportArgs),

    /// Redact a chat message and show the sensitive-information notice
    Sanitize(commands::sanitize::SanitizeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Store the chat-service API key in the local credential store
    SetKey(commands::key::SetKeyArgs),

    /// Remove the chat-service API key from the local credential store
    ClearKey(commands::key::ClearKeyArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_report() {
        let cli = Cli::parse_from([
            "aegis",
            "report",
            "--patient",
            "erXuFYUfucBZaryVksYEcMg3",
            "--username",
            "clinician",
            "--password",
            "pw",
        ]);
        assert_eq!(cli.config, "aegis.toml");
        match cli.command {
            Commands::Report(args) => {
                assert_eq!(args.patient, vec!["erXuFYUfucBZaryVksYEcMg3".to_string()]);
                assert_eq!(args.username, "clinician");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_multiple_patients() {
        let cli = Cli::parse_from([
            "aegis", "report", "-p", "a", "-p", "b", "-u", "clinician", "--password", "pw",
        ]);
        match cli.command {
            Commands::Report(args) => assert_eq!(args.patient.len(), 2),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["aegis", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["aegis", "--log-level", "debug", "sanitize", "hello"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Sanitize(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["aegis", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(args) if args.force));
    }

    #[test]
    fn test_cli_parse_key_commands() {
        let cli = Cli::parse_from(["aegis", "set-key", "sk-test"]);
        assert!(matches!(cli.command, Commands::SetKey(_)));

        let cli = Cli::parse_from(["aegis", "clear-key"]);
        assert!(matches!(cli.command, Commands::ClearKey(_)));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let cli = Cli::parse_from([
            "aegis", "report", "-p", "a", "-u", "clinician", "--password", "hunter2",
        ]);
        assert!(!format!("{cli:?}").contains("hunter2"));

        let cli = Cli::parse_from(["aegis", "set-key", "sk-live-secret"]);
        assert!(!format!("{cli:?}").contains("sk-live-secret"));
    }
}
