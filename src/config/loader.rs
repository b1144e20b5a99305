//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading program
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{EnrollmentPeriod, InputDefaults};

use super::types::{
    CompensationFile, CompensationSchedule, ProgramConfig, ProgramFile, ProgramMetadata,
};

/// Loads and provides access to program configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/oep_2025/
/// ├── program.yaml       # Program metadata and enrollment period
/// └── compensation.yaml  # Pay schedule and input defaults
/// ```
///
/// # Example
///
/// ```no_run
/// use earnings_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/oep_2025").unwrap();
/// println!("Loaded program: {}", loader.program().name);
/// println!("Hourly rate: ${}", loader.schedule().hourly_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ProgramConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/oep_2025")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or is missing a field (`ConfigParseError`)
    /// - A value is out of range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let program_path = path.join("program.yaml");
        let program = Self::load_yaml::<ProgramFile>(&program_path)?;

        let compensation_path = path.join("compensation.yaml");
        let compensation = Self::load_yaml::<CompensationFile>(&compensation_path)?;

        let config = ProgramConfig::new(
            program.program,
            program.enrollment_period,
            compensation.schedule,
            compensation.defaults,
        )?;

        debug!(
            path = %path.display(),
            program = %config.program().code,
            hourly_rate = %config.schedule().hourly_rate,
            per_application_rate = %config.schedule().per_application_rate,
            "Loaded program configuration"
        );

        Ok(Self { config })
    }

    /// Wraps a configuration built in code rather than read from disk.
    pub fn from_config(config: ProgramConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the program metadata.
    pub fn program(&self) -> &ProgramMetadata {
        self.config.program()
    }

    /// Returns the enrollment period.
    pub fn enrollment_period(&self) -> &EnrollmentPeriod {
        self.config.enrollment_period()
    }

    /// Returns the pay schedule.
    pub fn schedule(&self) -> &CompensationSchedule {
        self.config.schedule()
    }

    /// Returns the input defaults.
    pub fn defaults(&self) -> &InputDefaults {
        self.config.defaults()
    }
}
