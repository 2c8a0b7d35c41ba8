//! Dashboard configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::tables::Phase;
use crate::view::ViewSettings;

/// File looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "zerodash.toml";

/// Main dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Workbook holding the four dashboard sheets
    #[serde(default = "default_workbook")]
    pub workbook: PathBuf,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: DashboardConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check values that deserialize fine but make no sense
    pub fn validate(&self) -> Result<()> {
        if self.display.hit_list_size == 0 {
            anyhow::bail!("Configuration error: display.hit_list_size must be at least 1");
        }
        if let Err(reason) = self.display.default_phase.parse::<Phase>() {
            anyhow::bail!("Configuration error: display.default_phase: {}", reason);
        }
        Ok(())
    }

    /// Phase preselected on the deep-dive page
    pub fn default_phase(&self) -> Result<Phase> {
        self.display
            .default_phase
            .parse::<Phase>()
            .map_err(anyhow::Error::msg)
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            hit_list_size: self.display.hit_list_size,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            workbook: default_workbook(),
            display: DisplayConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// What the pages show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of accounts on the hit list
    #[serde(default = "default_hit_list_size")]
    pub hit_list_size: usize,
    /// Phase label preselected on the deep-dive page
    #[serde(default = "default_phase_label")]
    pub default_phase: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hit_list_size: default_hit_list_size(),
            default_phase: default_phase_label(),
        }
    }
}

/// Where CSV downloads go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

fn default_workbook() -> PathBuf {
    PathBuf::from("Mock-productzero-sheet 2.xlsx")
}

fn default_hit_list_size() -> usize {
    10
}

fn default_phase_label() -> String {
    Phase::Phase1A.label().to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.workbook, PathBuf::from("Mock-productzero-sheet 2.xlsx"));
        assert_eq!(config.display.hit_list_size, 10);
        assert_eq!(config.default_phase().unwrap(), Phase::Phase1A);
        assert_eq!(config.export.directory, PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: DashboardConfig = toml::from_str(
            r#"
            workbook = "data/q3.xlsx"

            [display]
            default_phase = "2"
            "#,
        )
        .unwrap();

        assert_eq!(config.workbook, PathBuf::from("data/q3.xlsx"));
        assert_eq!(config.display.hit_list_size, 10);
        assert_eq!(config.default_phase().unwrap(), Phase::Phase2);
        assert_eq!(config.view_settings().hit_list_size, 10);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: DashboardConfig = toml::from_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_validation() {
        let mut config = DashboardConfig::default();
        config.display.hit_list_size = 0;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.display.default_phase = "Phase 7".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Phase 7"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[display]\nhit_list_size = 5\n[export]\ndirectory = \"out\"\n").unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.display.hit_list_size, 5);
        assert_eq!(config.export.directory, PathBuf::from("out"));

        assert!(DashboardConfig::from_file(dir.path().join("missing.toml")).is_err());
    }
}
