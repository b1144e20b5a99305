//! Core data models for the Earnings Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod compensation;
mod enrollment_period;
mod inputs;
mod projection;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationOutcome, CalculationResult, ProjectionDisplay,
};
pub use compensation::CompensationModel;
pub use enrollment_period::EnrollmentPeriod;
pub use inputs::{
    CalculatorInputs, DEFAULT_DISPLAY_PERSISTENCY_RATE, DEFAULT_PERSISTENCY_RATE,
    DEFAULT_RESIDUAL_MONTHS, DEFAULT_WORKING_DAYS, DailyInputs, FormInputs, InputDefaults,
    MAX_APPLICATIONS_PER_DAY, MAX_HOURS_WORKED, MAX_PERSISTENCY_RATE, MAX_RESIDUAL_MONTHS,
    MAX_WORKING_DAYS, MIN_RESIDUAL_MONTHS, MIN_WORKING_DAYS, PeriodConfig, ResidualConfig,
};
pub use projection::{
    DailyPayResult, ModelComparison, MonthlyResidual, PeriodResult, ProjectionResult,
    ResidualProjection, YearlyResidual,
};
