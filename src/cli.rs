//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for ipfinder using clap's derive macros.

use clap::{Parser, Subcommand};

/// ipfinder - Public IP discovery and geolocation lookup
#[derive(Parser, Debug)]
#[command(name = "ipfinder")]
#[command(version)]
#[command(about = "Find your public IP address and where it is located", long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ipfinder.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Print the result as JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect your own public IPv4/IPv6 addresses and locate them (default)
    Me,

    /// Look up a specific IP address
    ///
    /// Addresses containing ':' are treated as IPv6, everything else as IPv4.
    Lookup {
        /// IP address to look up
        address: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: ipfinder.example.toml)
        output_path: Option<String>,

        /// Overwrite the file if it already exists
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_auto_detect() {
        let cli = Cli::try_parse_from(["ipfinder"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_lookup_with_global_flags() {
        let cli =
            Cli::try_parse_from(["ipfinder", "lookup", "8.8.8.8", "--json", "-c", "x.toml"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.config.as_deref(), Some("x.toml"));
        match cli.command {
            Some(Commands::Lookup { address }) => assert_eq!(address, "8.8.8.8"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_generate() {
        let cli = Cli::try_parse_from(["ipfinder", "config", "generate", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Config {
                action: ConfigCommands::Generate { output_path, force },
            }) => {
                assert!(output_path.is_none());
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_lookup_requires_address() {
        assert!(Cli::try_parse_from(["ipfinder", "lookup"]).is_err());
    }
}
