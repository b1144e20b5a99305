//! Enrollment period projection.
//!
//! Scales one day's results across the working days of the enrollment
//! period.

use rust_decimal::Decimal;

use crate::models::{AuditStep, PeriodResult};

/// Projects daily pay and applications across the enrollment period.
///
/// The scaling is linear and unrounded. `working_days` is taken as given:
/// zero or negative values produce zero or negative totals. Totals saturate
/// at the bounds of `Decimal`.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::project_period;
/// use rust_decimal_macros::dec;
///
/// let period = project_period(dec!(321), dec!(20), 53);
/// assert_eq!(period.total_applications, dec!(1060));
/// assert_eq!(period.total_pay, dec!(17013));
/// ```
pub fn project_period(
    daily_total_pay: Decimal,
    applications_per_day: Decimal,
    working_days: i64,
) -> PeriodResult {
    let days = Decimal::from(working_days);
    PeriodResult {
        total_applications: applications_per_day.saturating_mul(days),
        total_pay: daily_total_pay.saturating_mul(days),
    }
}

/// Records a period projection as an audit step.
pub fn period_audit_step(
    step_number: u32,
    daily_total_pay: Decimal,
    applications_per_day: Decimal,
    working_days: i64,
    result: &PeriodResult,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "period_projection".to_string(),
        rule_name: "Enrollment Period Projection".to_string(),
        input: serde_json::json!({
            "daily_total_pay": daily_total_pay.normalize().to_string(),
            "applications_per_day": applications_per_day.normalize().to_string(),
            "working_days": working_days
        }),
        output: serde_json::json!({
            "total_applications": result.total_applications.normalize().to_string(),
            "total_pay": result.total_pay.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} days = ${}; {} apps x {} days = {} apps",
            daily_total_pay.normalize(),
            working_days,
            result.total_pay.normalize(),
            applications_per_day.normalize(),
            working_days,
            result.total_applications.normalize()
        ),
    }
}
