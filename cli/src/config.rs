use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use undervolt_platform::{SysfsPaths, SYSFILE_HWMON_DIR, SYSFILE_LEGACY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "off" | "none" => LogLevel::Off,
            "error" => LogLevel::Error,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Warn,
        }
    }

    pub fn as_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Trace => Some(tracing::Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SysfsConfig {
    pub hwmon_dir: PathBuf,
    pub legacy_file: PathBuf,
}

impl Default for SysfsConfig {
    fn default() -> Self {
        Self {
            hwmon_dir: PathBuf::from(SYSFILE_HWMON_DIR),
            legacy_file: PathBuf::from(SYSFILE_LEGACY),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub log_level: LogLevel,
    pub sysfs: SysfsConfig,
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("undervolt")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn ensure_dirs() -> std::io::Result<()> {
    fs::create_dir_all(config_dir())
}

impl UserConfig {
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_default()
    }

    pub fn save(&self) -> std::io::Result<()> {
        ensure_dirs()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(config_path(), content)
    }

    pub fn merge_with_args(&mut self, hwmon_dir: Option<PathBuf>, legacy_file: Option<PathBuf>) {
        if let Some(dir) = hwmon_dir {
            self.sysfs.hwmon_dir = dir;
        }
        if let Some(file) = legacy_file {
            self.sysfs.legacy_file = file;
        }
    }

    pub fn sysfs_paths(&self) -> SysfsPaths {
        SysfsPaths {
            hwmon_dir: self.sysfs.hwmon_dir.clone(),
            legacy_file: self.sysfs.legacy_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("OFF"), LogLevel::Off);
        assert_eq!(LogLevel::from_str("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Trace"), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("bogus"), LogLevel::Warn);
        assert!(LogLevel::Off.as_tracing_level().is_none());
        assert_eq!(
            LogLevel::Info.as_tracing_level(),
            Some(tracing::Level::INFO)
        );
    }

    #[test]
    fn test_defaults_point_at_sysfs() {
        let config = UserConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.sysfs_paths(), SysfsPaths::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = UserConfig::parse(
            r#"
log_level = "debug"

[sysfs]
hwmon_dir = "/mnt/sys/class/hwmon"
"#,
        );
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.sysfs.hwmon_dir, PathBuf::from("/mnt/sys/class/hwmon"));
        assert_eq!(config.sysfs.legacy_file, PathBuf::from(SYSFILE_LEGACY));
    }

    #[test]
    fn test_parse_invalid_falls_back_to_default() {
        assert_eq!(UserConfig::parse("log_level = ["), UserConfig::default());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = UserConfig::default();
        config.log_level = LogLevel::Trace;
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(UserConfig::parse(&text), config);
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = UserConfig::default();
        config.merge_with_args(Some(PathBuf::from("/tmp/hwmon")), None);
        assert_eq!(config.sysfs.hwmon_dir, PathBuf::from("/tmp/hwmon"));
        assert_eq!(config.sysfs.legacy_file, PathBuf::from(SYSFILE_LEGACY));
    }
}
