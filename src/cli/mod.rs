//! CLI module for Recall
//!
//! Provides command-line interface parsing for the recall-server binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Recall - compressed conversation memory for chat agents
#[derive(Parser, Debug)]
#[command(
    name = "recall-server",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Recall - compressed conversation memory for chat agents",
    long_about = "A chat server whose conversation memory folds long histories into an\n\
                  LLM-written summary once they grow past a configurable threshold.\n\n\
                  Run without arguments to start the server.",
    after_help = "EXAMPLES:\n    \
                  recall-server                      # Start the server (reads recall.toml if present)\n    \
                  recall-server --config my.toml     # Use a custom config file\n    \
                  recall-server config --validate    # Check a config file and exit"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "recall.toml", global = true, env = "RECALL_CONFIG")]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show configuration information
    Config {
        /// Validate the configuration file and exit
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["recall-server"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("recall.toml"));
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_subcommand() {
        let cli =
            Cli::try_parse_from(["recall-server", "config", "--validate", "-c", "my.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("my.toml"));
        assert!(matches!(cli.command, Some(Commands::Config { validate: true })));
    }
}
