use std::fmt::Write as _;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

use crate::config::{config_path, UserConfig};

/// `effective` is the loaded config with command-line overrides applied.
pub fn run(effective: &UserConfig, path: bool, reset: bool) -> Result<()> {
    let config_file = config_path();

    if path {
        println!("{}", config_file.display());
        return Ok(());
    }

    if reset {
        UserConfig::default()
            .save()
            .wrap_err_with(|| format!("Failed to write {}", config_file.display()))?;
        println!("Wrote default config to {}", config_file.display());
        return Ok(());
    }

    print!("{}", render(&config_file, &UserConfig::load(), effective)?);
    Ok(())
}

fn render(config_file: &Path, stored: &UserConfig, effective: &UserConfig) -> Result<String> {
    let mut out = String::new();
    let state = if config_file.exists() {
        ""
    } else {
        " (not created, using defaults)"
    };
    writeln!(out, "Config file: {}{}", config_file.display(), state)?;
    writeln!(out)?;
    writeln!(out, "{}", toml::to_string_pretty(stored)?)?;

    if effective.sysfs != stored.sysfs {
        writeln!(out, "Overridden on the command line:")?;
        writeln!(out, "  hwmon_dir = {}", effective.sysfs.hwmon_dir.display())?;
        writeln!(out, "  legacy_file = {}", effective.sysfs.legacy_file.display())?;
    }

    Ok(out)
}
