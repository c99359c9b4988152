//! Under-voltage detection for Raspberry Pi boards.
//!
//! The official Raspberry Pi kernel reports power supply health through one
//! of two sysfs interfaces:
//!
//! - an `rpi_volt` hwmon device exposing `in0_lcrit_alarm` (kernel 5.x+)
//! - the firmware `get_throttled` register on older kernels (4.14+)
//!
//! Discovery happens once; every query re-reads the underlying file.
//!
//! # Example
//!
//! ```no_run
//! use undervolt_platform::new_under_voltage;
//!
//! if let Some(under_voltage) = new_under_voltage() {
//!     let status = under_voltage.status()?;
//!     println!("{}", status.description());
//! }
//! # Ok::<(), undervolt_platform::Error>(())
//! ```

mod error;
mod reader;
mod source;
mod types;

pub use error::{Error, Result};
pub use reader::{new_under_voltage, read_status, Reading, UnderVoltage};
pub use source::{locate, locate_in, sensor_name, PowerSource, SysfsPaths};
pub use types::VoltageStatus;

/// Name reported by the `rpi_volt` hwmon driver.
pub const HWMON_NAME: &str = "rpi_volt";

pub const SYSFILE_HWMON_DIR: &str = "/sys/class/hwmon";
pub const SYSFILE_HWMON_FILE: &str = "in0_lcrit_alarm";
pub const SYSFILE_LEGACY: &str = "/sys/devices/platform/soc/soc:firmware/get_throttled";

/// Bit 16 of `get_throttled`: under-voltage has occurred since the last
/// clear. It stays set after the supply recovers.
pub const UNDERVOLTAGE_STICKY_BIT: u64 = 1 << 16;

pub const DESCRIPTION_NORMALIZED: &str = "Voltage normalized. Everything is working as intended.";
pub const DESCRIPTION_UNDER_VOLTAGE: &str = "Under-voltage was detected. Consider getting a uninterruptible power supply for your Raspberry Pi.";
