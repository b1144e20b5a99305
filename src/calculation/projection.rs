//! Cumulative projection and model comparison.
//!
//! Chains the daily, period and residual stages into a single
//! [`ProjectionResult`] and projects both models side by side.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::config::CompensationSchedule;
use crate::models::{
    AuditStep, CompensationModel, DailyInputs, ModelComparison, PeriodConfig, ProjectionResult,
    ResidualConfig, ResidualProjection,
};

use super::daily_pay::{compute_daily_pay, daily_pay_audit_step};
use super::period::{period_audit_step, project_period};
use super::residuals::{project_residuals, residual_audit_step};

/// Builds the full projection for one compensation model.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::build_projection;
/// use earnings_engine::config::CompensationSchedule;
/// use earnings_engine::models::{CompensationModel, DailyInputs, PeriodConfig, ResidualConfig};
/// use rust_decimal_macros::dec;
///
/// let projection = build_projection(
///     CompensationModel::HourlyPlusCommission,
///     &DailyInputs { applications_per_day: dec!(20), hours_worked: dec!(8) },
///     &PeriodConfig::default(),
///     &ResidualConfig { persistency_rate: dec!(70) },
///     &CompensationSchedule::default(),
/// );
///
/// assert_eq!(projection.period.total_pay, dec!(17013));
/// assert_eq!(projection.cumulative_total, dec!(87560.664));
/// ```
pub fn build_projection(
    model: CompensationModel,
    daily_inputs: &DailyInputs,
    period_config: &PeriodConfig,
    residual_config: &ResidualConfig,
    schedule: &CompensationSchedule,
) -> ProjectionResult {
    let daily = compute_daily_pay(
        model,
        daily_inputs.applications_per_day,
        daily_inputs.hours_worked,
        schedule,
    );
    let period = project_period(
        daily.total_pay,
        daily_inputs.applications_per_day,
        period_config.working_days,
    );
    let residuals = project_residuals(
        period.total_applications,
        residual_config.persistency_rate,
        schedule,
    );

    let cumulative_total = period.total_pay.saturating_add(residuals.total_residuals);

    ProjectionResult {
        model,
        daily,
        period,
        yearly_residuals: residuals.yearly_residuals,
        total_residuals: residuals.total_residuals,
        cumulative_total,
    }
}

/// Projects both compensation models from the same inputs.
pub fn compare_models(
    daily_inputs: &DailyInputs,
    period_config: &PeriodConfig,
    residual_config: &ResidualConfig,
    schedule: &CompensationSchedule,
) -> ModelComparison {
    let hpc = build_projection(
        CompensationModel::HourlyPlusCommission,
        daily_inputs,
        period_config,
        residual_config,
        schedule,
    );
    let co = build_projection(
        CompensationModel::CommissionOnly,
        daily_inputs,
        period_config,
        residual_config,
        schedule,
    );

    ModelComparison {
        daily_pay_difference: difference(hpc.daily.total_pay, co.daily.total_pay),
        period_pay_difference: difference(hpc.period.total_pay, co.period.total_pay),
        year_one_monthly_residual_difference: difference(
            hpc.year_one_monthly_residual(),
            co.year_one_monthly_residual(),
        ),
        total_residuals_difference: difference(hpc.total_residuals, co.total_residuals),
        cumulative_difference: difference(hpc.cumulative_total, co.cumulative_total),
        higher_daily_pay: higher(hpc.daily.total_pay, co.daily.total_pay),
        higher_cumulative: higher(hpc.cumulative_total, co.cumulative_total),
        hourly_plus_commission: hpc,
        commission_only: co,
    }
}

/// Absolute difference, saturating at `Decimal::MAX`.
fn difference(a: Decimal, b: Decimal) -> Decimal {
    a.saturating_sub(b).abs()
}

fn higher(hourly_plus_commission: Decimal, commission_only: Decimal) -> Option<CompensationModel> {
    match hourly_plus_commission.cmp(&commission_only) {
        Ordering::Greater => Some(CompensationModel::HourlyPlusCommission),
        Ordering::Less => Some(CompensationModel::CommissionOnly),
        Ordering::Equal => None,
    }
}

/// Rebuilds the audit steps behind a projection, numbered from `first_step`.
///
/// Produces one step per stage: daily pay, period projection, residual
/// projection and the cumulative total.
pub fn trace_projection(
    projection: &ProjectionResult,
    daily_inputs: &DailyInputs,
    period_config: &PeriodConfig,
    residual_config: &ResidualConfig,
    schedule: &CompensationSchedule,
    first_step: u32,
) -> Vec<AuditStep> {
    let model = projection.model;
    let residuals = ResidualProjection {
        yearly_residuals: projection.yearly_residuals.clone(),
        total_residuals: projection.total_residuals,
    };

    vec![
        daily_pay_audit_step(
            first_step,
            model,
            daily_inputs,
            schedule,
            &projection.daily,
        ),
        period_audit_step(
            first_step + 1,
            projection.daily.total_pay,
            daily_inputs.applications_per_day,
            period_config.working_days,
            &projection.period,
        ),
        residual_audit_step(
            first_step + 2,
            projection.period.total_applications,
            residual_config.persistency_rate,
            schedule,
            &residuals,
        ),
        AuditStep {
            step_number: first_step + 3,
            rule_id: "cumulative_total".to_string(),
            rule_name: "Cumulative Total".to_string(),
            input: serde_json::json!({
                "model": model.as_str(),
                "period_pay": projection.period.total_pay.normalize().to_string(),
                "total_residuals": projection.total_residuals.normalize().to_string()
            }),
            output: serde_json::json!({
                "cumulative_total": projection.cumulative_total.normalize().to_string()
            }),
            reasoning: format!(
                "{}: ${} period pay + ${} residuals = ${}",
                model,
                projection.period.total_pay.normalize(),
                projection.total_residuals.normalize(),
                projection.cumulative_total.normalize()
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn scenario_inputs() -> DailyInputs {
        DailyInputs {
            applications_per_day: dec!(20),
            hours_worked: dec!(8),
        }
    }

    fn seventy_percent() -> ResidualConfig {
        ResidualConfig {
            persistency_rate: dec!(70),
        }
    }

    fn project(model: CompensationModel) -> ProjectionResult {
        build_projection(
            model,
            &scenario_inputs(),
            &PeriodConfig::default(),
            &seventy_percent(),
            &CompensationSchedule::default(),
        )
    }

    #[test]
    fn test_hourly_plus_commission_full_projection() {
        let projection = project(CompensationModel::HourlyPlusCommission);

        assert_eq!(projection.model, CompensationModel::HourlyPlusCommission);
        assert_eq!(projection.daily.total_pay, dec!(321));
        assert_eq!(projection.period.total_applications, dec!(1060));
        assert_eq!(projection.period.total_pay, dec!(17013));
        assert_eq!(projection.yearly_residuals.len(), 5);
        assert_eq!(projection.year_one_monthly_residual(), dec!(2120));
        assert_eq!(projection.total_residuals, dec!(70547.664));
        assert_eq!(projection.cumulative_total, dec!(87560.664));
    }

    #[test]
    fn test_commission_only_full_projection() {
        let projection = project(CompensationModel::CommissionOnly);

        assert_eq!(projection.daily.hourly_pay, Decimal::ZERO);
        assert_eq!(projection.period.total_pay, dec!(15900));
        // Residuals depend only on applications, so both models match.
        assert_eq!(projection.total_residuals, dec!(70547.664));
        assert_eq!(projection.cumulative_total, dec!(86447.664));
    }

    #[test]
    fn test_default_residual_config_keeps_every_customer() {
        let projection = build_projection(
            CompensationModel::CommissionOnly,
            &scenario_inputs(),
            &PeriodConfig::default(),
            &ResidualConfig::default(),
            &CompensationSchedule::default(),
        );

        assert_eq!(projection.total_residuals, dec!(127200));
    }

    #[test]
    fn test_zero_working_days_zeroes_everything_downstream() {
        let projection = build_projection(
            CompensationModel::HourlyPlusCommission,
            &scenario_inputs(),
            &PeriodConfig { working_days: 0 },
            &seventy_percent(),
            &CompensationSchedule::default(),
        );

        assert_eq!(projection.daily.total_pay, dec!(321));
        assert_eq!(projection.period.total_pay, Decimal::ZERO);
        assert_eq!(projection.total_residuals, Decimal::ZERO);
        assert_eq!(projection.cumulative_total, Decimal::ZERO);
    }

    #[test]
    fn test_compare_models_at_twenty_apps() {
        let comparison = compare_models(
            &scenario_inputs(),
            &PeriodConfig::default(),
            &seventy_percent(),
            &CompensationSchedule::default(),
        );

        assert_eq!(comparison.daily_pay_difference, dec!(21));
        assert_eq!(comparison.period_pay_difference, dec!(1113));
        assert_eq!(comparison.year_one_monthly_residual_difference, Decimal::ZERO);
        assert_eq!(comparison.total_residuals_difference, Decimal::ZERO);
        assert_eq!(comparison.cumulative_difference, dec!(1113));
        assert_eq!(
            comparison.higher_daily_pay,
            Some(CompensationModel::HourlyPlusCommission)
        );
        assert_eq!(
            comparison.higher_cumulative,
            Some(CompensationModel::HourlyPlusCommission)
        );
        assert_eq!(
            comparison
                .projection(CompensationModel::CommissionOnly)
                .period
                .total_pay,
            dec!(15900)
        );
    }

    #[test]
    fn test_compare_models_commission_only_ahead_with_high_volume() {
        let inputs = DailyInputs {
            applications_per_day: dec!(40),
            hours_worked: dec!(4),
        };

        let comparison = compare_models(
            &inputs,
            &PeriodConfig::default(),
            &seventy_percent(),
            &CompensationSchedule::default(),
        );

        // H+C: 48 + 525 = 573; CO: 600
        assert_eq!(comparison.daily_pay_difference, dec!(27));
        assert_eq!(
            comparison.higher_daily_pay,
            Some(CompensationModel::CommissionOnly)
        );
    }

    #[test]
    fn test_compare_models_tie_has_no_leader() {
        // H+C: 12 x 6.25 = 75; CO: 15 x 5 = 75
        let inputs = DailyInputs {
            applications_per_day: dec!(5),
            hours_worked: dec!(6.25),
        };

        let comparison = compare_models(
            &inputs,
            &PeriodConfig::default(),
            &seventy_percent(),
            &CompensationSchedule::default(),
        );

        assert_eq!(comparison.daily_pay_difference, Decimal::ZERO);
        assert_eq!(comparison.higher_daily_pay, None);
        assert_eq!(comparison.higher_cumulative, None);
    }

    #[test]
    fn test_trace_projection_numbers_steps_from_offset() {
        let projection = project(CompensationModel::HourlyPlusCommission);

        let steps = trace_projection(
            &projection,
            &scenario_inputs(),
            &PeriodConfig::default(),
            &seventy_percent(),
            &CompensationSchedule::default(),
            5,
        );

        let ids: Vec<&str> = steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "daily_pay",
                "period_projection",
                "residual_projection",
                "cumulative_total"
            ]
        );
        let numbers: Vec<u32> = steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![5, 6, 7, 8]);
        assert_eq!(steps[3].output["cumulative_total"], "87560.664");
        assert!(steps[3].reasoning.starts_with("Hourly + Commission"));
    }

    #[test]
    fn test_huge_inputs_saturate_through_every_stage() {
        let inputs = DailyInputs {
            applications_per_day: dec!(1e27),
            hours_worked: dec!(8),
        };

        let projection = build_projection(
            CompensationModel::CommissionOnly,
            &inputs,
            &PeriodConfig::default(),
            &seventy_percent(),
            &CompensationSchedule::default(),
        );

        assert_eq!(projection.daily.total_pay, dec!(1.5e28));
        assert_eq!(projection.period.total_applications, dec!(5.3e28));
        assert_eq!(projection.period.total_pay, Decimal::MAX);
        assert_eq!(projection.total_residuals, Decimal::MAX);
        assert_eq!(projection.cumulative_total, Decimal::MAX);
    }

    #[test]
    fn test_compare_models_with_huge_inputs_does_not_overflow() {
        let inputs = DailyInputs {
            applications_per_day: Decimal::MAX,
            hours_worked: Decimal::MAX,
        };

        let comparison = compare_models(
            &inputs,
            &PeriodConfig { working_days: -53 },
            &seventy_percent(),
            &CompensationSchedule::default(),
        );

        assert_eq!(comparison.hourly_plus_commission.period.total_pay, Decimal::MIN);
        assert_eq!(comparison.daily_pay_difference, Decimal::ZERO);
        assert_eq!(comparison.cumulative_difference, Decimal::ZERO);
    }

    #[test]
    fn test_difference_saturates() {
        assert_eq!(difference(Decimal::MAX, Decimal::MIN), Decimal::MAX);
        assert_eq!(difference(Decimal::MIN, Decimal::MAX), Decimal::MAX);
        assert_eq!(difference(dec!(300), dec!(321)), dec!(21));
    }

    fn arb_model() -> impl Strategy<Value = CompensationModel> {
        prop_oneof![
            Just(CompensationModel::HourlyPlusCommission),
            Just(CompensationModel::CommissionOnly),
        ]
    }

    proptest! {
        #[test]
        fn prop_cumulative_is_exact_sum(
            model in arb_model(),
            apps in 0i64..=100,
            half_hours in 0i64..=32,
            days in 1i64..=100,
            persistency in 0i64..=100,
        ) {
            let projection = build_projection(
                model,
                &DailyInputs {
                    applications_per_day: Decimal::from(apps),
                    hours_worked: Decimal::new(half_hours * 5, 1),
                },
                &PeriodConfig { working_days: days },
                &ResidualConfig { persistency_rate: Decimal::from(persistency) },
                &CompensationSchedule::default(),
            );

            prop_assert_eq!(
                projection.cumulative_total,
                projection.period.total_pay + projection.total_residuals
            );
        }

        #[test]
        fn prop_comparison_differences_are_non_negative(
            apps in 0i64..=100,
            half_hours in 0i64..=32,
        ) {
            let comparison = compare_models(
                &DailyInputs {
                    applications_per_day: Decimal::from(apps),
                    hours_worked: Decimal::new(half_hours * 5, 1),
                },
                &PeriodConfig::default(),
                &ResidualConfig { persistency_rate: dec!(70) },
                &CompensationSchedule::default(),
            );

            prop_assert!(comparison.daily_pay_difference >= Decimal::ZERO);
            prop_assert!(comparison.cumulative_difference >= Decimal::ZERO);
            prop_assert_eq!(
                comparison.hourly_plus_commission.total_residuals,
                comparison.commission_only.total_residuals
            );
        }
    }
}
