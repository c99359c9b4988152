use std::process::ExitCode;

use color_eyre::eyre::{Result, WrapErr};
use serde_json::{json, Value};
use tracing::{info, warn};
use undervolt_platform::{SysfsPaths, UnderVoltage, VoltageStatus};

const EXIT_UNDER_VOLTAGE: u8 = 1;
const EXIT_UNAVAILABLE: u8 = 2;
const EXIT_READ_ERROR: u8 = 3;

pub fn run(paths: &SysfsPaths, json: bool, compact: bool, check: bool) -> Result<ExitCode> {
    run_with_code(paths, json, compact, check).map(ExitCode::from)
}

/// Under `check`, read failures are reported and exit with `EXIT_READ_ERROR`.
fn run_with_code(paths: &SysfsPaths, json: bool, compact: bool, check: bool) -> Result<u8> {
    match query(paths, json, compact) {
        Ok(status) => Ok(exit_code(status, check)),
        Err(report) if check => {
            eprintln!("Error: {:?}", report);
            Ok(EXIT_READ_ERROR)
        }
        Err(report) => Err(report),
    }
}

/// Discover, read once and print. `None` means no supported interface.
fn query(paths: &SysfsPaths, json: bool, compact: bool) -> Result<Option<VoltageStatus>> {
    let Some(under_voltage) = UnderVoltage::discover_in(paths) else {
        warn!("No supported power-monitoring interface on this host");
        if json {
            print_doc(&unavailable_doc(), compact)?;
        } else {
            println!("Under-voltage detection is not available on this system.");
        }
        return Ok(None);
    };

    let under_voltage = under_voltage.with_observer(|reading| {
        info!(
            source = reading.source.kind(),
            raw = reading.raw,
            under_voltage = reading.under_voltage,
            "Read power status"
        );
    });

    let status = under_voltage.status().wrap_err_with(|| {
        format!(
            "Failed to read {} status",
            under_voltage.source().kind()
        )
    })?;

    if json {
        print_doc(&status_doc(&under_voltage, status), compact)?;
    } else {
        println!("{}: {}", status.label(), status.description());
    }

    Ok(Some(status))
}

fn print_doc(doc: &Value, compact: bool) -> Result<()> {
    if compact {
        println!("{}", serde_json::to_string(doc)?);
    } else {
        println!("{}", serde_json::to_string_pretty(doc)?);
    }
    Ok(())
}

fn status_doc(under_voltage: &UnderVoltage, status: VoltageStatus) -> Value {
    let source = under_voltage.source();
    json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "available": true,
        "source": {
            "kind": source.kind(),
            "path": source.status_file().display().to_string(),
        },
        "under_voltage": status.is_under_voltage(),
        "status": status.label(),
        "description": status.description(),
    })
}

fn unavailable_doc() -> Value {
    json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "available": false,
        "source": null,
        "under_voltage": null,
    })
}

fn exit_code(status: Option<VoltageStatus>, check: bool) -> u8 {
    if !check {
        return 0;
    }
    match status {
        Some(VoltageStatus::Normal) => 0,
        Some(VoltageStatus::UnderVoltage) => EXIT_UNDER_VOLTAGE,
        None => EXIT_UNAVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn legacy_paths(tmp: &TempDir, throttled: &str) -> SysfsPaths {
        let legacy_file = tmp.path().join("get_throttled");
        fs::write(&legacy_file, throttled).unwrap();
        SysfsPaths {
            hwmon_dir: tmp.path().join("hwmon"),
            legacy_file,
        }
    }

    #[test]
    fn test_status_doc_fields() {
        let tmp = TempDir::new().unwrap();
        let paths = legacy_paths(&tmp, "50005\n");
        let under_voltage = UnderVoltage::discover_in(&paths).unwrap();
        let status = under_voltage.status().unwrap();

        let doc = status_doc(&under_voltage, status);
        assert_eq!(doc["available"], true);
        assert_eq!(doc["source"]["kind"], "legacy");
        assert_eq!(
            doc["source"]["path"],
            paths.legacy_file.display().to_string()
        );
        assert_eq!(doc["under_voltage"], true);
        assert_eq!(doc["status"], "Under-voltage");
        assert_eq!(
            doc["description"],
            undervolt_platform::DESCRIPTION_UNDER_VOLTAGE
        );
    }

    #[test]
    fn test_unavailable_doc() {
        let doc = unavailable_doc();
        assert_eq!(doc["available"], false);
        assert!(doc["source"].is_null());
        assert!(doc["under_voltage"].is_null());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(None, false), 0);
        assert_eq!(exit_code(Some(VoltageStatus::UnderVoltage), false), 0);
        assert_eq!(exit_code(Some(VoltageStatus::Normal), true), 0);
        assert_eq!(exit_code(Some(VoltageStatus::UnderVoltage), true), 1);
        assert_eq!(exit_code(None, true), 2);
    }

    #[test]
    fn test_read_error_without_check_propagates() {
        let tmp = TempDir::new().unwrap();
        let paths = legacy_paths(&tmp, "garbage\n");
        assert!(run_with_code(&paths, false, false, false).is_err());
    }

    #[test]
    fn test_read_error_under_check_has_own_code() {
        let tmp = TempDir::new().unwrap();
        let paths = legacy_paths(&tmp, "garbage\n");
        let code = run_with_code(&paths, false, false, true).unwrap();
        assert_eq!(code, EXIT_READ_ERROR);
        assert_ne!(code, EXIT_UNDER_VOLTAGE);
        assert_ne!(code, EXIT_UNAVAILABLE);
    }

    #[test]
    fn test_check_codes_from_files() {
        let tmp = TempDir::new().unwrap();
        let paths = legacy_paths(&tmp, "50005\n");
        assert_eq!(run_with_code(&paths, false, false, true).unwrap(), 1);

        let paths = legacy_paths(&tmp, "0\n");
        assert_eq!(run_with_code(&paths, true, true, true).unwrap(), 0);

        let empty = TempDir::new().unwrap();
        let paths = SysfsPaths {
            hwmon_dir: empty.path().join("hwmon"),
            legacy_file: empty.path().join("get_throttled"),
        };
        assert_eq!(run_with_code(&paths, false, false, true).unwrap(), 2);
    }
}
