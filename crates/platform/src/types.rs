//! Shared types for under-voltage reporting.

use std::fmt;

use crate::{DESCRIPTION_NORMALIZED, DESCRIPTION_UNDER_VOLTAGE};

/// Outcome of a single under-voltage query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoltageStatus {
    /// Supply voltage is within range
    #[default]
    Normal,
    /// Under-voltage is flagged (for the legacy register: flagged and not yet cleared)
    UnderVoltage,
}

impl VoltageStatus {
    /// Returns a short label for the status.
    pub fn label(&self) -> &'static str {
        match self {
            VoltageStatus::Normal => "Normal",
            VoltageStatus::UnderVoltage => "Under-voltage",
        }
    }

    /// Returns the human-readable description for the status.
    pub fn description(&self) -> &'static str {
        match self {
            VoltageStatus::Normal => DESCRIPTION_NORMALIZED,
            VoltageStatus::UnderVoltage => DESCRIPTION_UNDER_VOLTAGE,
        }
    }

    pub fn is_under_voltage(&self) -> bool {
        matches!(self, VoltageStatus::UnderVoltage)
    }
}

impl From<bool> for VoltageStatus {
    fn from(under_voltage: bool) -> Self {
        if under_voltage {
            VoltageStatus::UnderVoltage
        } else {
            VoltageStatus::Normal
        }
    }
}

impl fmt::Display for VoltageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
