//! Discovery of the under-voltage status interface.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::{HWMON_NAME, SYSFILE_HWMON_DIR, SYSFILE_HWMON_FILE, SYSFILE_LEGACY};

/// Where the locator looks for status files.
///
/// The defaults point at the real sysfs locations. Other roots are useful
/// for fixtures or for hosts that mount sysfs elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsPaths {
    pub hwmon_dir: PathBuf,
    pub legacy_file: PathBuf,
}

impl Default for SysfsPaths {
    fn default() -> Self {
        Self {
            hwmon_dir: PathBuf::from(SYSFILE_HWMON_DIR),
            legacy_file: PathBuf::from(SYSFILE_LEGACY),
        }
    }
}

/// A resolved status interface.
///
/// Only valid at the moment of discovery: the file behind it may vanish
/// before the next read, which then fails with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowerSource {
    /// `rpi_volt` hwmon device directory.
    Hwmon { dir: PathBuf },
    /// Firmware `get_throttled` register.
    Legacy { path: PathBuf },
}

impl PowerSource {
    /// File read on every query.
    pub fn status_file(&self) -> PathBuf {
        match self {
            PowerSource::Hwmon { dir } => dir.join(SYSFILE_HWMON_FILE),
            PowerSource::Legacy { path } => path.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PowerSource::Hwmon { .. } => "hwmon",
            PowerSource::Legacy { .. } => "legacy",
        }
    }
}

/// Locate the status interface at the default sysfs paths.
pub fn locate() -> Option<PowerSource> {
    locate_in(&SysfsPaths::default())
}

/// Locate the status interface under the given paths.
///
/// Prefers the hwmon device; falls back to the legacy register. Returns
/// `None` when the host exposes neither.
pub fn locate_in(paths: &SysfsPaths) -> Option<PowerSource> {
    if let Some(dir) = find_hwmon(&paths.hwmon_dir) {
        debug!(dir = %dir.display(), "Found {} hwmon device", HWMON_NAME);
        return Some(PowerSource::Hwmon { dir });
    }

    // Kernels before the hwmon driver only expose the firmware register
    if paths.legacy_file.is_file() {
        debug!(path = %paths.legacy_file.display(), "Using legacy throttled register");
        return Some(PowerSource::Legacy {
            path: paths.legacy_file.clone(),
        });
    }

    debug!("No under-voltage interface found");
    None
}

/// First hwmon entry, in directory listing order, whose `name` matches.
fn find_hwmon(root: &Path) -> Option<PathBuf> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            trace!(root = %root.display(), error = %e, "Cannot list hwmon directory");
            return None;
        }
    };

    entries
        .flatten()
        .map(|entry| entry.path())
        .find(|path| is_rpi_volt(path))
}

fn is_rpi_volt(dir: &Path) -> bool {
    match sensor_name(dir) {
        Some(name) if name == HWMON_NAME => true,
        Some(name) => {
            trace!(dir = %dir.display(), name = %name, "Skipping hwmon entry");
            false
        }
        None => false,
    }
}

/// Trimmed contents of `<dir>/name`, or `None` if it cannot be read.
pub fn sensor_name(dir: &Path) -> Option<String> {
    fs::read_to_string(dir.join("name"))
        .ok()
        .map(|name| name.trim().to_string())
}
