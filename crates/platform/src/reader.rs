//! Reading and decoding the under-voltage status.

use std::fmt;
use std::fs;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::source::{locate, locate_in, PowerSource, SysfsPaths};
use crate::types::VoltageStatus;
use crate::UNDERVOLTAGE_STICKY_BIT;

/// A decoded reading, handed to observers after every successful query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading<'a> {
    pub source: &'a PowerSource,
    /// File contents with the trailing newline removed.
    pub raw: &'a str,
    pub under_voltage: bool,
}

type Observer = Arc<dyn Fn(&Reading<'_>) + Send + Sync>;

/// Query handle bound to a resolved [`PowerSource`].
///
/// Holds no state besides the source; every call re-reads sysfs.
#[derive(Clone)]
pub struct UnderVoltage {
    source: PowerSource,
    observer: Option<Observer>,
}

/// Discover the status interface and return a handle for it, or `None`
/// when the host has no supported interface.
pub fn new_under_voltage() -> Option<UnderVoltage> {
    locate().map(UnderVoltage::new)
}

impl UnderVoltage {
    pub fn new(source: PowerSource) -> Self {
        Self {
            source,
            observer: None,
        }
    }

    /// Like [`new_under_voltage`], looking under the given paths.
    pub fn discover_in(paths: &SysfsPaths) -> Option<Self> {
        locate_in(paths).map(Self::new)
    }

    /// Register a callback invoked with each successful reading.
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&Reading<'_>) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn source(&self) -> &PowerSource {
        &self.source
    }

    /// Get under-voltage status.
    pub fn get(&self) -> Result<bool> {
        let raw = read_raw(&self.source)?;
        let under_voltage = decode(&self.source, &raw)?;

        if let Some(observer) = &self.observer {
            observer(&Reading {
                source: &self.source,
                raw: &raw,
                under_voltage,
            });
        }

        Ok(under_voltage)
    }

    pub fn status(&self) -> Result<VoltageStatus> {
        self.get().map(VoltageStatus::from)
    }
}

impl fmt::Debug for UnderVoltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnderVoltage")
            .field("source", &self.source)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// Read and decode the status of `source` once.
pub fn read_status(source: &PowerSource) -> Result<bool> {
    let raw = read_raw(source)?;
    decode(source, &raw)
}

/// Contents of the status file minus one trailing newline.
fn read_raw(source: &PowerSource) -> Result<String> {
    let path = source.status_file();
    let mut content = fs::read_to_string(&path).map_err(|source| Error::Read {
        path: path.clone(),
        source,
    })?;

    if content.ends_with('\n') {
        content.pop();
    }

    match source {
        PowerSource::Hwmon { .. } => debug!("Get under voltage status: {}", content),
        PowerSource::Legacy { .. } => debug!("Get throttled value: {}", content),
    }

    Ok(content)
}

fn decode(source: &PowerSource, raw: &str) -> Result<bool> {
    match source {
        PowerSource::Hwmon { .. } => Ok(decode_alarm(raw)),
        PowerSource::Legacy { path } => decode_throttled(raw).map_err(|e| Error::Parse {
            path: path.clone(),
            value: raw.to_string(),
            source: e,
        }),
    }
}

/// `in0_lcrit_alarm` is `"1"` while the alarm is raised.
fn decode_alarm(raw: &str) -> bool {
    raw == "1"
}

/// `get_throttled` is a hex bitmask; only the sticky under-voltage bit counts.
///
/// Accepts an optional `0x`/`0X` prefix and an optional `+` sign, up to 64 bits.
fn decode_throttled(raw: &str) -> std::result::Result<bool, std::num::ParseIntError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    let throttled = u64::from_str_radix(digits, 16)?;
    Ok(throttled & UNDERVOLTAGE_STICKY_BIT == UNDERVOLTAGE_STICKY_BIT)
}
