//! Projection result models.
//!
//! Plain value records produced by the engine stages. Each is built fresh on
//! every recalculation and never mutated afterwards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CompensationModel;

/// One day's earnings under a compensation model.
///
/// # Example
///
/// ```
/// use earnings_engine::models::DailyPayResult;
/// use rust_decimal_macros::dec;
///
/// let daily = DailyPayResult {
///     hourly_pay: dec!(96),
///     commission_pay: dec!(225),
///     total_pay: dec!(321),
/// };
/// assert_eq!(daily.hourly_pay + daily.commission_pay, daily.total_pay);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPayResult {
    /// Pay from hours worked (always zero for commission-only).
    pub hourly_pay: Decimal,
    /// Pay from applications completed.
    pub commission_pay: Decimal,
    /// `hourly_pay + commission_pay`.
    pub total_pay: Decimal,
}

/// Daily results scaled across the enrollment period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResult {
    /// Applications completed over the whole period.
    pub total_applications: Decimal,
    /// Pay earned over the whole period.
    pub total_pay: Decimal,
}

/// Residual income for one year of the projection horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyResidual {
    /// The projection year, starting at 1.
    pub year: u32,
    /// Customers still active during this year, rounded for reporting.
    pub active_customers: i64,
    /// Residual paid each month of this year.
    pub monthly_amount: Decimal,
    /// `monthly_amount * 12`.
    pub year_total: Decimal,
    /// Retention percentage applied at the start of this year (100 for year 1).
    pub retention_rate_applied: Decimal,
}

/// The full residual schedule over the projection horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualProjection {
    /// Year-by-year residuals in ascending year order.
    pub yearly_residuals: Vec<YearlyResidual>,
    /// Sum of every `year_total`.
    pub total_residuals: Decimal,
}

/// The residual paid in a single calendar month of the horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyResidual {
    /// Month number counted from the start of the horizon, starting at 1.
    pub month: u32,
    /// The projection year this month falls in.
    pub year: u32,
    /// The residual paid in this month.
    pub amount: Decimal,
}

/// The complete projection for one compensation model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// The model this projection was computed under.
    pub model: CompensationModel,
    /// One day's pay.
    pub daily: DailyPayResult,
    /// Totals across the enrollment period.
    pub period: PeriodResult,
    /// Year-by-year residuals.
    pub yearly_residuals: Vec<YearlyResidual>,
    /// Sum of all residual year totals.
    pub total_residuals: Decimal,
    /// `period.total_pay + total_residuals`.
    pub cumulative_total: Decimal,
}

impl ProjectionResult {
    /// Returns the monthly residual for the first year, or zero if the
    /// schedule is empty.
    pub fn year_one_monthly_residual(&self) -> Decimal {
        self.yearly_residuals
            .first()
            .map(|y| y.monthly_amount)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Both compensation models projected from the same inputs.
///
/// Differences are absolute values; the `higher_*` fields say which side
/// is ahead and are `None` on an exact tie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelComparison {
    /// Projection under hourly plus commission.
    pub hourly_plus_commission: ProjectionResult,
    /// Projection under commission only.
    pub commission_only: ProjectionResult,
    /// Absolute difference in daily pay.
    pub daily_pay_difference: Decimal,
    /// Absolute difference in total period pay.
    pub period_pay_difference: Decimal,
    /// Absolute difference in the first year's monthly residual.
    pub year_one_monthly_residual_difference: Decimal,
    /// Absolute difference in five-year residuals.
    pub total_residuals_difference: Decimal,
    /// Absolute difference in cumulative totals.
    pub cumulative_difference: Decimal,
    /// The model with the larger daily pay.
    pub higher_daily_pay: Option<CompensationModel>,
    /// The model with the larger cumulative total.
    pub higher_cumulative: Option<CompensationModel>,
}

impl ModelComparison {
    /// Returns the projection for the given model.
    pub fn projection(&self, model: CompensationModel) -> &ProjectionResult {
        match model {
            CompensationModel::HourlyPlusCommission => &self.hourly_plus_commission,
            CompensationModel::CommissionOnly => &self.commission_only,
        }
    }
}
