use std::fs;
use std::path::PathBuf;

use color_eyre::eyre::Result;
use undervolt_platform::{locate_in, read_status, sensor_name, SysfsPaths, HWMON_NAME};

use crate::config::{config_path, UserConfig};

pub fn run(paths: &SysfsPaths) -> Result<()> {
    println!("undervolt debug information");
    println!("{}", "=".repeat(60));

    println!("\n--- Sysfs Paths ---");
    println!("hwmon: {}", paths.hwmon_dir.display());
    println!("legacy: {}", paths.legacy_file.display());

    println!("\n--- hwmon Entries ---");
    let entries = hwmon_entries(paths);
    if entries.is_empty() {
        println!("(none)");
    }
    for (dir, name) in &entries {
        let name = name.as_deref().unwrap_or("<unreadable>");
        let marker = if name == HWMON_NAME { " <- match" } else { "" };
        println!("{}: {}{}", dir.display(), name, marker);
    }

    println!("\n--- Legacy Register ---");
    println!(
        "Present: {}",
        if paths.legacy_file.is_file() { "yes" } else { "no" }
    );

    println!("\n--- Discovery ---");
    match locate_in(paths) {
        Some(source) => {
            println!("Source: {}", source.kind());
            println!("Status file: {}", source.status_file().display());
            match read_status(&source) {
                Ok(under_voltage) => println!("Under-voltage: {}", under_voltage),
                Err(e) => println!("Read failed: {}", e),
            }
        }
        None => println!("Source: none"),
    }

    println!("\n--- Config ---");
    println!("Config: {}", config_path().display());
    println!("{}", toml::to_string_pretty(&UserConfig::load())?);

    Ok(())
}

/// hwmon entries in listing order with their sensor names.
fn hwmon_entries(paths: &SysfsPaths) -> Vec<(PathBuf, Option<String>)> {
    fs::read_dir(&paths.hwmon_dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| {
                    let path = e.path();
                    let name = sensor_name(&path);
                    (path, name)
                })
                .collect()
        })
        .unwrap_or_default()
}
