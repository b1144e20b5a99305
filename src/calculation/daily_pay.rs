//! Daily pay calculation.
//!
//! This module computes a single day's earnings under either compensation
//! model.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::CompensationSchedule;
use crate::models::{AuditStep, CompensationModel, DailyInputs, DailyPayResult};

/// Hourly wage under hourly plus commission.
pub const HOURLY_RATE: Decimal = dec!(12);

/// Commission per application.
pub const PER_APP_RATE: Decimal = dec!(15);

/// Daily applications that earn no commission under hourly plus commission.
pub const COMMISSION_THRESHOLD: Decimal = dec!(5);

/// Computes one day's pay under the given compensation model.
///
/// Negative inputs are treated as zero. Amounts saturate at the bounds of
/// `Decimal`, so the function never fails.
///
/// - Hourly plus commission: `hourly_rate * hours` plus
///   `per_application_rate` for each application beyond the threshold.
/// - Commission only: `per_application_rate` for every application and no
///   hourly pay.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::compute_daily_pay;
/// use earnings_engine::config::CompensationSchedule;
/// use earnings_engine::models::CompensationModel;
/// use rust_decimal_macros::dec;
///
/// let schedule = CompensationSchedule::default();
/// let daily = compute_daily_pay(
///     CompensationModel::HourlyPlusCommission,
///     dec!(20),
///     dec!(8),
///     &schedule,
/// );
/// assert_eq!(daily.hourly_pay, dec!(96));
/// assert_eq!(daily.commission_pay, dec!(225));
/// assert_eq!(daily.total_pay, dec!(321));
/// ```
pub fn compute_daily_pay(
    model: CompensationModel,
    applications_per_day: Decimal,
    hours_worked: Decimal,
    schedule: &CompensationSchedule,
) -> DailyPayResult {
    let applications = applications_per_day.max(Decimal::ZERO);
    let hours = hours_worked.max(Decimal::ZERO);

    let (hourly_pay, commission_pay) = match model {
        CompensationModel::HourlyPlusCommission => {
            let commissionable = applications
                .saturating_sub(schedule.commission_threshold)
                .max(Decimal::ZERO);
            (
                schedule.hourly_rate.saturating_mul(hours),
                schedule.per_application_rate.saturating_mul(commissionable),
            )
        }
        CompensationModel::CommissionOnly => (
            Decimal::ZERO,
            schedule.per_application_rate.saturating_mul(applications),
        ),
    };

    DailyPayResult {
        hourly_pay,
        commission_pay,
        total_pay: hourly_pay.saturating_add(commission_pay),
    }
}

/// Records a daily pay calculation as an audit step.
pub fn daily_pay_audit_step(
    step_number: u32,
    model: CompensationModel,
    inputs: &DailyInputs,
    schedule: &CompensationSchedule,
    result: &DailyPayResult,
) -> AuditStep {
    let reasoning = match model {
        CompensationModel::HourlyPlusCommission => format!(
            "${} x {}h = ${} hourly + ${} x {} apps over {} = ${} commission; total ${}",
            schedule.hourly_rate.normalize(),
            inputs.hours_worked.max(Decimal::ZERO).normalize(),
            result.hourly_pay.normalize(),
            schedule.per_application_rate.normalize(),
            inputs
                .applications_per_day
                .saturating_sub(schedule.commission_threshold)
                .max(Decimal::ZERO)
                .normalize(),
            schedule.commission_threshold.normalize(),
            result.commission_pay.normalize(),
            result.total_pay.normalize()
        ),
        CompensationModel::CommissionOnly => format!(
            "${} x {} apps = ${} commission; no hourly pay",
            schedule.per_application_rate.normalize(),
            inputs.applications_per_day.max(Decimal::ZERO).normalize(),
            result.total_pay.normalize()
        ),
    };

    AuditStep {
        step_number,
        rule_id: "daily_pay".to_string(),
        rule_name: "Daily Pay".to_string(),
        input: serde_json::json!({
            "model": model.as_str(),
            "applications_per_day": inputs.applications_per_day.normalize().to_string(),
            "hours_worked": inputs.hours_worked.normalize().to_string()
        }),
        output: serde_json::json!({
            "hourly_pay": result.hourly_pay.normalize().to_string(),
            "commission_pay": result.commission_pay.normalize().to_string(),
            "total_pay": result.total_pay.normalize().to_string()
        }),
        reasoning,
    }
}
