//! Configuration types for earnings projections.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    COMMISSION_THRESHOLD, HOURLY_RATE, PER_APP_RATE, RESIDUAL_RATE_PER_CUSTOMER,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{EnrollmentPeriod, InputDefaults, MAX_PERSISTENCY_RATE};

/// Metadata about the compensation program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramMetadata {
    /// Short program code (e.g., "ACA-OEP-2026").
    pub code: String,
    /// The human-readable name of the program.
    pub name: String,
    /// The version or effective date of the program terms.
    pub version: String,
    /// The organization offering the program.
    pub organization: String,
}

/// Program file structure (program.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramFile {
    /// Program metadata.
    pub program: ProgramMetadata,
    /// The enrollment period the program covers.
    pub enrollment_period: EnrollmentPeriod,
}

/// Pay and residual rates for both compensation models.
///
/// The default schedule carries the standard program rates:
/// $12/hour, $15 per application beyond the fifth each day under hourly plus
/// commission, $15 per application under commission only, and a residual of
/// $2 per active customer per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationSchedule {
    /// Hourly wage under hourly plus commission.
    pub hourly_rate: Decimal,
    /// Commission per application.
    pub per_application_rate: Decimal,
    /// Daily applications that earn no commission under hourly plus commission.
    pub commission_threshold: Decimal,
    /// Monthly residual per active customer.
    pub residual_rate_per_customer: Decimal,
}

impl Default for CompensationSchedule {
    fn default() -> Self {
        Self {
            hourly_rate: HOURLY_RATE,
            per_application_rate: PER_APP_RATE,
            commission_threshold: COMMISSION_THRESHOLD,
            residual_rate_per_customer: RESIDUAL_RATE_PER_CUSTOMER,
        }
    }
}

/// Compensation file structure (compensation.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct CompensationFile {
    /// The pay schedule.
    pub schedule: CompensationSchedule,
    /// Defaults for inputs the caller leaves out.
    pub defaults: InputDefaults,
}

/// The complete program configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    metadata: ProgramMetadata,
    enrollment_period: EnrollmentPeriod,
    schedule: CompensationSchedule,
    defaults: InputDefaults,
}

impl ProgramConfig {
    /// Creates a new configuration from its component parts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a rate is negative, the default working
    /// days are not positive, or the default persistency rate lies outside
    /// 0 to 100.
    pub fn new(
        metadata: ProgramMetadata,
        enrollment_period: EnrollmentPeriod,
        schedule: CompensationSchedule,
        defaults: InputDefaults,
    ) -> EngineResult<Self> {
        let rates = [
            ("hourly_rate", schedule.hourly_rate),
            ("per_application_rate", schedule.per_application_rate),
            ("commission_threshold", schedule.commission_threshold),
            (
                "residual_rate_per_customer",
                schedule.residual_rate_per_customer,
            ),
        ];
        if let Some((field, value)) = rates.iter().find(|(_, v)| v.is_sign_negative()) {
            return Err(invalid_config(
                field,
                format!("must not be negative, got {}", value),
            ));
        }

        if defaults.working_days < 1 {
            return Err(invalid_config(
                "defaults.working_days",
                format!("must be positive, got {}", defaults.working_days),
            ));
        }

        if defaults.persistency_rate.is_sign_negative()
            || defaults.persistency_rate > MAX_PERSISTENCY_RATE
        {
            return Err(invalid_config(
                "defaults.persistency_rate",
                format!(
                    "must be between 0 and 100, got {}",
                    defaults.persistency_rate
                ),
            ));
        }

        Ok(Self {
            metadata,
            enrollment_period,
            schedule,
            defaults,
        })
    }

    /// Returns the program metadata.
    pub fn program(&self) -> &ProgramMetadata {
        &self.metadata
    }

    /// Returns the enrollment period.
    pub fn enrollment_period(&self) -> &EnrollmentPeriod {
        &self.enrollment_period
    }

    /// Returns the pay schedule.
    pub fn schedule(&self) -> &CompensationSchedule {
        &self.schedule
    }

    /// Returns the input defaults.
    pub fn defaults(&self) -> &InputDefaults {
        &self.defaults
    }
}

fn invalid_config(field: &str, message: String) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message,
    }
}
