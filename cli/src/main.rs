mod cli;
mod commands;
mod config;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::{Cli, Commands};
use config::{LogLevel, UserConfig};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let mut config = UserConfig::load();
    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);
    logging::init(config.log_level, log_level_override);

    config.merge_with_args(cli.hwmon_dir, cli.legacy_file);
    let paths = config.sysfs_paths();

    match cli.command {
        Some(Commands::Status {
            json,
            compact,
            check,
        }) => commands::status::run(&paths, json, compact, check),
        Some(Commands::Debug) => {
            commands::debug::run(&paths)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config { path, reset }) => {
            commands::config::run(&config, path, reset)?;
            Ok(ExitCode::SUCCESS)
        }
        None => commands::status::run(&paths, false, false, false),
    }
}
