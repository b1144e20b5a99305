//! Residual income projection.
//!
//! Residuals are paid monthly for every customer still active. The customer
//! base acquired during the enrollment period shrinks at each annual renewal
//! by the persistency rate, compounding year over year.

use std::iter::successors;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use crate::config::CompensationSchedule;
use crate::models::{
    AuditStep, MAX_RESIDUAL_MONTHS, MIN_RESIDUAL_MONTHS, MonthlyResidual, ResidualProjection,
    YearlyResidual,
};

/// Monthly residual per active customer.
pub const RESIDUAL_RATE_PER_CUSTOMER: Decimal = dec!(2);

/// Years covered by a residual projection.
pub const RESIDUAL_HORIZON_YEARS: u32 = 5;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Retention applied in the first year (no decay).
const FULL_RETENTION: Decimal = dec!(100);

/// Projects residual income over the five-year horizon.
///
/// Year 1 pays on every customer enrolled during the period. Each later year
/// first applies `persistency_rate` (a percentage) to the previous year's
/// base. The running base is never rounded; only the reported
/// `active_customers` is, with halves rounding up. Amounts saturate at the
/// bounds of `Decimal` rather than overflowing.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::project_residuals;
/// use earnings_engine::config::CompensationSchedule;
/// use rust_decimal_macros::dec;
///
/// let projection = project_residuals(dec!(1060), dec!(70), &CompensationSchedule::default());
///
/// let years = &projection.yearly_residuals;
/// assert_eq!(years.len(), 5);
/// assert_eq!(years[0].monthly_amount, dec!(2120));
/// assert_eq!(years[1].active_customers, 742);
/// assert_eq!(years[2].active_customers, 519);
/// ```
pub fn project_residuals(
    total_applications_in_period: Decimal,
    persistency_rate: Decimal,
    schedule: &CompensationSchedule,
) -> ResidualProjection {
    let retention = persistency_rate / FULL_RETENTION;

    let yearly_residuals: Vec<YearlyResidual> = (1..=RESIDUAL_HORIZON_YEARS)
        .zip(successors(Some(total_applications_in_period), |active| {
            Some(active.saturating_mul(retention))
        }))
        .map(|(year, active)| {
            let monthly_amount = active.saturating_mul(schedule.residual_rate_per_customer);
            YearlyResidual {
                year,
                active_customers: round_customers(active),
                monthly_amount,
                year_total: monthly_amount.saturating_mul(MONTHS_PER_YEAR),
                retention_rate_applied: if year == 1 {
                    FULL_RETENTION
                } else {
                    persistency_rate
                },
            }
        })
        .collect();

    let total_residuals = yearly_residuals
        .iter()
        .fold(Decimal::ZERO, |total, y| total.saturating_add(y.year_total));

    ResidualProjection {
        yearly_residuals,
        total_residuals,
    }
}

/// Rounds a customer count to the nearest whole customer, halves up.
///
/// Counts beyond the `i64` range clamp to its bounds.
fn round_customers(active: Decimal) -> i64 {
    active
        .saturating_add(dec!(0.5))
        .floor()
        .to_i64()
        .unwrap_or(if active.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
}

/// Expands a yearly schedule into its first `months` calendar months.
///
/// `months` is clamped to 1..=24. Month `m` falls in year `(m - 1) / 12 + 1`
/// and pays that year's monthly amount.
pub fn preview_monthly_residuals(
    yearly_residuals: &[YearlyResidual],
    months: u32,
) -> Vec<MonthlyResidual> {
    let months = months.clamp(MIN_RESIDUAL_MONTHS, MAX_RESIDUAL_MONTHS);

    (1..=months)
        .filter_map(|month| {
            let year = (month - 1) / 12 + 1;
            yearly_residuals
                .iter()
                .find(|y| y.year == year)
                .map(|y| MonthlyResidual {
                    month,
                    year,
                    amount: y.monthly_amount,
                })
        })
        .collect()
}

/// Records a residual projection as an audit step.
pub fn residual_audit_step(
    step_number: u32,
    total_applications_in_period: Decimal,
    persistency_rate: Decimal,
    schedule: &CompensationSchedule,
    result: &ResidualProjection,
) -> AuditStep {
    let customers: Vec<i64> = result
        .yearly_residuals
        .iter()
        .map(|y| y.active_customers)
        .collect();

    AuditStep {
        step_number,
        rule_id: "residual_projection".to_string(),
        rule_name: "Residual Projection".to_string(),
        input: serde_json::json!({
            "total_applications": total_applications_in_period.normalize().to_string(),
            "persistency_rate": persistency_rate.normalize().to_string(),
            "residual_rate_per_customer": schedule.residual_rate_per_customer.normalize().to_string()
        }),
        output: serde_json::json!({
            "active_customers_by_year": customers,
            "total_residuals": result.total_residuals.normalize().to_string()
        }),
        reasoning: format!(
            "{} customers at ${}/month, retaining {}% each renewal over {} years = ${}",
            total_applications_in_period.normalize(),
            schedule.residual_rate_per_customer.normalize(),
            persistency_rate.normalize(),
            RESIDUAL_HORIZON_YEARS,
            result.total_residuals.normalize()
        ),
    }
}
