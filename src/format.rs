//! Display formatting for projection figures.
//!
//! Amounts are shown as whole US dollars with thousands separators,
//! rounding half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{ProjectionDisplay, ProjectionResult};

/// Rounds a value to a whole number, halves away from zero.
fn round_whole(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Inserts a comma between every group of three digits.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats an amount as whole US dollars.
///
/// # Examples
///
/// ```
/// use earnings_engine::format::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(17013)), "$17,013");
/// assert_eq!(format_currency(dec!(87560.664)), "$87,561");
/// assert_eq!(format_currency(dec!(-1234.4)), "-$1,234");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_whole(value);
    let digits = group_thousands(&rounded.abs().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Formats a count as a whole number with thousands separators.
pub fn format_count(value: Decimal) -> String {
    let rounded = round_whole(value);
    let digits = group_thousands(&rounded.abs().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Formats the headline figures of a projection.
pub fn display_projection(projection: &ProjectionResult) -> ProjectionDisplay {
    ProjectionDisplay {
        model: projection.model,
        daily_pay: format_currency(projection.daily.total_pay),
        period_pay: format_currency(projection.period.total_pay),
        total_applications: format_count(projection.period.total_applications),
        year_one_monthly_residual: format_currency(projection.year_one_monthly_residual()),
        total_residuals: format_currency(projection.total_residuals),
        cumulative_total: format_currency(projection.cumulative_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::build_projection;
    use crate::config::CompensationSchedule;
    use crate::models::{CompensationModel, DailyInputs, PeriodConfig, ResidualConfig};
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(17013)), "$17,013");
        assert_eq!(format_currency(dec!(1234567)), "$1,234,567");
        assert_eq!(format_currency(dec!(321)), "$321");
        assert_eq!(format_currency(dec!(100.00)), "$100");
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(87560.664)), "$87,561");
        assert_eq!(format_currency(dec!(2.5)), "$3");
        assert_eq!(format_currency(dec!(2.4)), "$2");
        assert_eq!(format_currency(dec!(-2.5)), "-$3");
    }

    #[test]
    fn test_format_currency_zero_and_negative() {
        assert_eq!(format_currency(Decimal::ZERO), "$0");
        assert_eq!(format_currency(dec!(-0.4)), "$0");
        assert_eq!(format_currency(dec!(-1234)), "-$1,234");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(dec!(1060)), "1,060");
        assert_eq!(format_count(dec!(742)), "742");
        assert_eq!(format_count(dec!(0)), "0");
        assert_eq!(format_count(dec!(-40)), "-40");
    }

    #[test]
    fn test_group_thousands_boundaries() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("100000"), "100,000");
    }

    #[test]
    fn test_display_projection() {
        let projection = build_projection(
            CompensationModel::HourlyPlusCommission,
            &DailyInputs {
                applications_per_day: dec!(20),
                hours_worked: dec!(8),
            },
            &PeriodConfig::default(),
            &ResidualConfig {
                persistency_rate: dec!(70),
            },
            &CompensationSchedule::default(),
        );

        let display = display_projection(&projection);

        assert_eq!(display.model, CompensationModel::HourlyPlusCommission);
        assert_eq!(display.daily_pay, "$321");
        assert_eq!(display.period_pay, "$17,013");
        assert_eq!(display.total_applications, "1,060");
        assert_eq!(display.year_one_monthly_residual, "$2,120");
        assert_eq!(display.total_residuals, "$70,548");
        assert_eq!(display.cumulative_total, "$87,561");
    }
}
