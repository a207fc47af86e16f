//! CLI interface module
//!
//! Terminal presentation shell: runs a resolution on a worker thread,
//! then prints either the formatted text or JSON.

pub mod render;

use std::fmt;
use std::path::Path;
use std::process::ExitCode;

use colored::Colorize;

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::services::{IpResolver, LookupMode, ResolutionResult, spawn_resolution};

#[derive(Debug)]
pub enum CliError {
    ResolveError(String),
    OutputError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::ResolveError(msg) => format!("Resolve error: {}", msg),
            CliError::OutputError(msg) => format!("Output error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        match self {
            CliError::ResolveError(msg) => {
                format!("{} {}", "Resolve error:".red().bold(), msg.white())
            }
            CliError::OutputError(msg) => {
                format!("{} {}", "Output error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

/// Run a CLI command from clap-parsed input
///
/// Returns `ExitCode::FAILURE` when the resolution produced no record.
pub fn run_cli_command(cli: Cli, config: &StaticConfig) -> Result<ExitCode, CliError> {
    let mode = match cli.command {
        Some(Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        }) => {
            config_generate(output_path, force)?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Lookup { address }) => {
            let mode = LookupMode::from_input(Some(&address));
            if !mode.is_explicit() {
                return Err(CliError::CommandError(
                    "Please enter an IP address to lookup".to_string(),
                ));
            }
            mode
        }
        Some(Commands::Me) | None => LookupMode::AutoDetect,
    };

    let resolver = IpResolver::new(config.providers.clone());
    let result = resolve_with_progress(resolver, mode.clone(), cli.json)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::OutputError(e.to_string()))?;
        println!("{}", json);
    } else {
        print!("{}", render::render_text(&result));
        println!();
        println!("{}", render::status_line(&result, mode.is_explicit()));
    }

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn resolve_with_progress(
    resolver: IpResolver,
    mode: LookupMode,
    quiet: bool,
) -> Result<ResolutionResult, CliError> {
    if !quiet {
        let message = if mode.is_explicit() {
            "Looking up IP address..."
        } else {
            "Detecting your IP addresses..."
        };
        eprintln!("{} {}", "●".blue(), message.blue());
    }

    let rx = spawn_resolution(resolver, mode)
        .map_err(|e| CliError::ResolveError(format!("Failed to start worker: {}", e)))?;
    rx.recv()
        .map_err(|_| CliError::ResolveError("Resolution worker terminated unexpectedly".to_string()))
}

/// Generate example configuration file
fn config_generate(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| "ipfinder.example.toml".to_string());

    if !force && Path::new(&path).exists() {
        return Err(CliError::CommandError(format!(
            "File already exists: {} (use --force to overwrite)",
            path
        )));
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    match StaticConfig::default().save_to_file(&path) {
        Ok(()) => {
            println!(
                "  {} {}",
                "Configuration file generated successfully".green(),
                path.blue()
            );
            Ok(())
        }
        Err(e) => Err(CliError::CommandError(format!(
            "Unable to write configuration file: {}",
            e
        ))),
    }
}
