//! Calculation result models for the Earnings Engine.
//!
//! This module contains the [`CalculationResult`] envelope returned by the
//! API: the engine output for one request together with the inputs it was
//! computed from, formatted display values and an audit trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    CalculatorInputs, CompensationModel, EnrollmentPeriod, ModelComparison, MonthlyResidual,
    ProjectionResult,
};

/// A single step in the audit trace recording one engine stage.
///
/// Each step captures the input, output, and reasoning for the stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// A warning generated while preparing or running a calculation.
///
/// Warnings never stop a calculation; they record that an input was
/// adjusted before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use earnings_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// Currency-formatted figures for one projection, ready to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionDisplay {
    /// The model these figures belong to.
    pub model: CompensationModel,
    /// Daily pay, e.g. "$321".
    pub daily_pay: String,
    /// Total pay across the enrollment period.
    pub period_pay: String,
    /// Applications across the enrollment period, e.g. "1,060".
    pub total_applications: String,
    /// Monthly residual in the first year.
    pub year_one_monthly_residual: String,
    /// Five-year residual total.
    pub total_residuals: String,
    /// Period pay plus residuals.
    pub cumulative_total: String,
}

/// What a calculation produced: one model's projection or both side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationOutcome {
    /// A projection for the requested model.
    Projection(ProjectionResult),
    /// Projections for both models with their differences.
    Comparison(ModelComparison),
}

/// The complete result of a calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The enrollment period the projection covers.
    pub enrollment_period: EnrollmentPeriod,
    /// The inputs actually used, after sanitization.
    pub inputs: CalculatorInputs,
    /// The engine output.
    #[serde(flatten)]
    pub outcome: CalculationOutcome,
    /// Month-by-month residual preview for the selected model.
    pub monthly_preview: Vec<MonthlyResidual>,
    /// Formatted figures, one entry per projected model.
    pub display: Vec<ProjectionDisplay>,
    /// Complete audit trace of the calculation.
    pub audit_trace: AuditTrace,
}
