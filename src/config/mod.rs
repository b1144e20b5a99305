//! Configuration loading and management for the Earnings Engine.
//!
//! This module loads the program configuration from YAML files: program
//! metadata, the enrollment period, the pay schedule, and the defaults used
//! for inputs a caller leaves out.
//!
//! # Example
//!
//! ```no_run
//! use earnings_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/oep_2025").unwrap();
//! println!("Loaded program: {}", config.program().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CompensationFile, CompensationSchedule, ProgramConfig, ProgramFile, ProgramMetadata,
};
