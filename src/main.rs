use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use ipfinder::cli::Cli;
use ipfinder::config::init_config;
use ipfinder::interfaces::cli::run_cli_command;
use ipfinder::system::{init_logging, install_panic_hook};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = init_config(cli.config.as_deref());

    // 日志初始化失败不影响查询
    let _guard = match init_logging(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("[WARN] Logging disabled: {}", e);
            None
        }
    };
    install_panic_hook();

    debug!(
        "Providers: primary={}, fallback={}",
        config.providers.primary_url, config.providers.fallback_url
    );

    match run_cli_command(cli, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            ExitCode::from(2)
        }
    }
}
