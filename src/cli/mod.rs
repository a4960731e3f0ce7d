//! CLI module for Tokenlens
//!
//! Command-line interface definitions and handlers for the Tokenlens
//! dashboard server.
//!
//! # Commands
//!
//! - `serve` - Start the dashboard server
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! tokenlens serve
//!
//! # Start with a seed data file
//! tokenlens serve --seed data/seed.json
//!
//! # Generate shell completions
//! tokenlens completions bash > ~/.bash_completion.d/tokenlens
//! ```

pub mod completions;
pub mod config;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tokenlens - LLM usage cost dashboard
#[derive(Parser, Debug)]
#[command(
    name = "tokenlens",
    version,
    about = "Operator dashboard for LLM token usage and cost attribution"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard server
    Serve(ServeArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "tokenlens.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "TOKENLENS_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "TOKENLENS_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TOKENLENS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Seed the in-memory store from a JSON file
    #[arg(short, long, env = "TOKENLENS_SEED")]
    pub seed: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "tokenlens.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["tokenlens", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.config, PathBuf::from("tokenlens.toml"));
                assert!(args.port.is_none());
                assert!(args.seed.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["tokenlens", "serve", "-p", "9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.port, Some(9000)),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_seed() {
        let cli = Cli::try_parse_from(["tokenlens", "serve", "--seed", "data.json"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.seed, Some(PathBuf::from("data.json"))),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["tokenlens", "config", "init"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init(_))
        ));
    }

    #[test]
    fn test_cli_parse_completions() {
        let cli = Cli::try_parse_from(["tokenlens", "completions", "bash"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions(_)));
    }
}
