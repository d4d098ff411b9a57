//! Runtime configuration for reporting and export.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::error::{RegistryError, Result};

/// Environment variable overriding the worker thread count
pub const ENV_REPORT_THREADS: &str = "MCH_REPORT_THREADS";
/// Environment variable toggling parallel aggregation (`true`/`false`, `1`/`0`)
pub const ENV_REPORT_PARALLEL: &str = "MCH_REPORT_PARALLEL";
/// Environment variable overriding the export output directory
pub const ENV_OUTPUT_DIR: &str = "MCH_OUTPUT_DIR";

/// Configuration for indicator aggregation
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Whether to aggregate patients on the rayon pool
    pub parallel: bool,
    /// Worker threads for parallel aggregation (`None` uses the global pool)
    pub num_threads: Option<usize>,
    /// Whether to show a progress bar during aggregation
    pub show_progress: bool,
    /// City printed in the report header
    pub city_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            num_threads: None,
            show_progress: false,
            city_label: "Batangas City".to_string(),
        }
    }
}

impl ReportConfig {
    /// Defaults overridden by `MCH_REPORT_THREADS` and `MCH_REPORT_PARALLEL`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(value) = env::var(ENV_REPORT_THREADS) {
            let threads = value.trim().parse::<usize>().map_err(|_| {
                RegistryError::ConfigError(format!("{ENV_REPORT_THREADS} must be a number, got '{value}'"))
            })?;
            if threads == 0 {
                return Err(RegistryError::ConfigError(format!(
                    "{ENV_REPORT_THREADS} must be at least 1"
                )));
            }
            config.num_threads = Some(threads);
        }
        if let Ok(value) = env::var(ENV_REPORT_PARALLEL) {
            config.parallel = parse_switch(ENV_REPORT_PARALLEL, &value)?;
        }
        Ok(config)
    }

    /// Worker threads actually used for parallel aggregation
    #[must_use]
    pub fn effective_threads(&self) -> usize {
        if self.parallel {
            self.num_threads.unwrap_or_else(num_cpus::get)
        } else {
            1
        }
    }
}

impl fmt::Display for ReportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report Configuration:")?;
        writeln!(f, "  Parallel: {}", self.parallel)?;
        writeln!(f, "  Threads: {}", self.effective_threads())?;
        writeln!(f, "  Show Progress: {}", self.show_progress)?;
        writeln!(f, "  City: {}", self.city_label)?;
        Ok(())
    }
}

/// Configuration for the TCL export and file output
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Number of prenatal visit date columns in the case list
    pub max_visit_columns: usize,
    /// Directory receiving exported Parquet files
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_visit_columns: 8,
            output_dir: PathBuf::from("output"),
        }
    }
}

impl ExportConfig {
    /// Defaults overridden by `MCH_OUTPUT_DIR`
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = env::var(ENV_OUTPUT_DIR) {
            if !dir.trim().is_empty() {
                config.output_dir = PathBuf::from(dir);
            }
        }
        config
    }
}

impl fmt::Display for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Export Configuration:")?;
        writeln!(f, "  Visit Columns: {}", self.max_visit_columns)?;
        writeln!(f, "  Output Directory: {}", self.output_dir.display())?;
        Ok(())
    }
}

fn parse_switch(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(RegistryError::ConfigError(format!(
            "{name} must be true or false, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let report = ReportConfig::default();
        assert!(report.parallel);
        assert_eq!(report.city_label, "Batangas City");
        assert_eq!(ExportConfig::default().max_visit_columns, 8);
    }

    #[test]
    fn test_sequential_uses_one_thread() {
        let config = ReportConfig {
            parallel: false,
            num_threads: Some(8),
            ..ReportConfig::default()
        };
        assert_eq!(config.effective_threads(), 1);
    }

    #[test]
    fn test_parse_switch() {
        assert!(parse_switch("X", "Yes").unwrap());
        assert!(!parse_switch("X", "0").unwrap());
        assert!(parse_switch("X", "maybe").is_err());
    }
}
