//! Calculator input models.
//!
//! The engine stages take small value records ([`DailyInputs`],
//! [`PeriodConfig`], [`ResidualConfig`]). Callers normally build them from a
//! [`CalculatorInputs`], which carries everything a single recalculation
//! needs and knows how to bring raw values into the calculator's ranges.
//!
//! Two policies are offered for out-of-range values:
//! - [`CalculatorInputs::sanitize`] clamps silently and reports each
//!   adjustment as an [`AuditWarning`];
//! - [`CalculatorInputs::validate`] rejects them with
//!   [`EngineError::InvalidInput`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{AuditWarning, CompensationModel};

/// Working days in the default enrollment period.
pub const DEFAULT_WORKING_DAYS: i64 = 53;

/// Persistency rate assumed when none is given to the residual projector.
pub const DEFAULT_PERSISTENCY_RATE: Decimal = dec!(100);

/// Persistency rate the calculator presents to agents.
pub const DEFAULT_DISPLAY_PERSISTENCY_RATE: Decimal = dec!(70);

/// Residual months previewed when none are requested.
pub const DEFAULT_RESIDUAL_MONTHS: u32 = 12;

/// Upper bound for applications per day.
pub const MAX_APPLICATIONS_PER_DAY: Decimal = dec!(100);

/// Upper bound for hours worked per day.
pub const MAX_HOURS_WORKED: Decimal = dec!(16);

/// Lower bound for working days in the period.
pub const MIN_WORKING_DAYS: i64 = 1;

/// Upper bound for working days in the period.
pub const MAX_WORKING_DAYS: i64 = 100;

/// Upper bound for the persistency rate, in percent.
pub const MAX_PERSISTENCY_RATE: Decimal = dec!(100);

/// Lower bound for previewed residual months.
pub const MIN_RESIDUAL_MONTHS: u32 = 1;

/// Upper bound for previewed residual months.
pub const MAX_RESIDUAL_MONTHS: u32 = 24;

const INPUT_CLAMPED: &str = "INPUT_CLAMPED";
const INPUT_TRUNCATED: &str = "INPUT_TRUNCATED";

/// A day's work: the inputs of the daily pay calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyInputs {
    /// Applications completed per day.
    pub applications_per_day: Decimal,
    /// Hours worked per day.
    pub hours_worked: Decimal,
}

/// Length of the enrollment period in working days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodConfig {
    /// Days on which enrollment work is done.
    pub working_days: i64,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            working_days: DEFAULT_WORKING_DAYS,
        }
    }
}

/// Customer retention assumption for residual projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualConfig {
    /// Percentage of customers retained at each annual renewal, 0 to 100.
    pub persistency_rate: Decimal,
}

impl Default for ResidualConfig {
    fn default() -> Self {
        Self {
            persistency_rate: DEFAULT_PERSISTENCY_RATE,
        }
    }
}

/// Values used for any input the caller leaves out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDefaults {
    /// Model selected when none is given.
    #[serde(default)]
    pub model: CompensationModel,
    /// Working days in the enrollment period.
    pub working_days: i64,
    /// Persistency rate, in percent.
    pub persistency_rate: Decimal,
    /// Months shown in the residual preview.
    pub residual_months: u32,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            model: CompensationModel::default(),
            working_days: DEFAULT_WORKING_DAYS,
            persistency_rate: DEFAULT_DISPLAY_PERSISTENCY_RATE,
            residual_months: DEFAULT_RESIDUAL_MONTHS,
        }
    }
}

/// Everything a single recalculation needs.
///
/// # Example
///
/// ```
/// use earnings_engine::models::{CalculatorInputs, CompensationModel, InputDefaults};
/// use rust_decimal_macros::dec;
///
/// let inputs = CalculatorInputs::with_defaults(
///     CompensationModel::HourlyPlusCommission,
///     dec!(20),
///     dec!(8),
///     &InputDefaults::default(),
/// );
/// assert_eq!(inputs.working_days, 53);
/// assert_eq!(inputs.persistency_rate, dec!(70));
///
/// let (sanitized, warnings) = inputs.sanitize();
/// assert!(warnings.is_empty());
/// assert_eq!(sanitized, inputs);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    /// The compensation model to project.
    pub model: CompensationModel,
    /// Applications completed per day.
    pub applications_per_day: Decimal,
    /// Hours worked per day.
    pub hours_worked: Decimal,
    /// Working days in the enrollment period.
    pub working_days: i64,
    /// Persistency rate, in percent.
    pub persistency_rate: Decimal,
    /// Months shown in the residual preview.
    pub residual_months: u32,
}

impl CalculatorInputs {
    /// Builds inputs from the daily values, taking the rest from `defaults`.
    pub fn with_defaults(
        model: CompensationModel,
        applications_per_day: Decimal,
        hours_worked: Decimal,
        defaults: &InputDefaults,
    ) -> Self {
        Self {
            model,
            applications_per_day,
            hours_worked,
            working_days: defaults.working_days,
            persistency_rate: defaults.persistency_rate,
            residual_months: defaults.residual_months,
        }
    }

    /// Returns the daily calculator inputs.
    pub fn daily(&self) -> DailyInputs {
        DailyInputs {
            applications_per_day: self.applications_per_day,
            hours_worked: self.hours_worked,
        }
    }

    /// Returns the period configuration.
    pub fn period(&self) -> PeriodConfig {
        PeriodConfig {
            working_days: self.working_days,
        }
    }

    /// Returns the residual configuration.
    pub fn residual(&self) -> ResidualConfig {
        ResidualConfig {
            persistency_rate: self.persistency_rate,
        }
    }

    /// Clamps every field into the calculator's range.
    ///
    /// Applications are whole numbers, so fractional values are truncated.
    /// Each adjustment is reported as a low-severity warning; values already
    /// in range pass through untouched.
    pub fn sanitize(self) -> (Self, Vec<AuditWarning>) {
        let mut warnings = Vec::new();

        let mut applications_per_day = self.applications_per_day;
        if applications_per_day.fract() != Decimal::ZERO {
            // -0.5 truncates to a negative zero
            let truncated = match applications_per_day.trunc() {
                t if t.is_zero() => Decimal::ZERO,
                t => t,
            };
            warnings.push(AuditWarning {
                code: INPUT_TRUNCATED.to_string(),
                message: format!(
                    "applications_per_day {} truncated to {}",
                    applications_per_day.normalize(),
                    truncated
                ),
                severity: "low".to_string(),
            });
            applications_per_day = truncated;
        }

        let sanitized = Self {
            model: self.model,
            applications_per_day: clamp_field(
                "applications_per_day",
                applications_per_day,
                Decimal::ZERO,
                MAX_APPLICATIONS_PER_DAY,
                &mut warnings,
            ),
            hours_worked: clamp_field(
                "hours_worked",
                self.hours_worked,
                Decimal::ZERO,
                MAX_HOURS_WORKED,
                &mut warnings,
            ),
            working_days: clamp_field(
                "working_days",
                self.working_days,
                MIN_WORKING_DAYS,
                MAX_WORKING_DAYS,
                &mut warnings,
            ),
            persistency_rate: clamp_field(
                "persistency_rate",
                self.persistency_rate,
                Decimal::ZERO,
                MAX_PERSISTENCY_RATE,
                &mut warnings,
            ),
            residual_months: clamp_field(
                "residual_months",
                self.residual_months,
                MIN_RESIDUAL_MONTHS,
                MAX_RESIDUAL_MONTHS,
                &mut warnings,
            ),
        };

        (sanitized, warnings)
    }

    /// Rejects any field outside the calculator's range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.applications_per_day.fract() != Decimal::ZERO {
            return Err(invalid("applications_per_day", "must be a whole number"));
        }
        check_range(
            "applications_per_day",
            self.applications_per_day,
            Decimal::ZERO,
            MAX_APPLICATIONS_PER_DAY,
        )?;
        check_range(
            "hours_worked",
            self.hours_worked,
            Decimal::ZERO,
            MAX_HOURS_WORKED,
        )?;
        check_range(
            "working_days",
            self.working_days,
            MIN_WORKING_DAYS,
            MAX_WORKING_DAYS,
        )?;
        check_range(
            "persistency_rate",
            self.persistency_rate,
            Decimal::ZERO,
            MAX_PERSISTENCY_RATE,
        )?;
        check_range(
            "residual_months",
            self.residual_months,
            MIN_RESIDUAL_MONTHS,
            MAX_RESIDUAL_MONTHS,
        )
    }

    /// Applies the strict or permissive range policy.
    ///
    /// Strict mode validates and returns the inputs unchanged with no
    /// warnings; otherwise the inputs are sanitized.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` in strict mode when a field is out of range.
    pub fn prepare(self, strict: bool) -> EngineResult<(Self, Vec<AuditWarning>)> {
        if strict {
            self.validate()?;
            Ok((self, Vec::new()))
        } else {
            Ok(self.sanitize())
        }
    }
}

fn clamp_field<T>(field: &str, value: T, min: T, max: T, warnings: &mut Vec<AuditWarning>) -> T
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    let clamped = if value < min {
        min
    } else if value > max {
        max
    } else {
        return value;
    };

    warnings.push(AuditWarning {
        code: INPUT_CLAMPED.to_string(),
        message: format!(
            "{} {} adjusted to {} (allowed range {} to {})",
            field, value, clamped, min, max
        ),
        severity: "low".to_string(),
    });
    clamped
}

fn check_range<T>(field: &str, value: T, min: T, max: T) -> EngineResult<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(invalid(
            field,
            &format!("must be between {} and {}, got {}", min, max, value),
        ));
    }
    Ok(())
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Raw string values as submitted by the calculator's web form.
///
/// Unparseable entries fall back the way the form does: applications to 0,
/// hours to 0, and working days, persistency and residual months to their
/// configured defaults. A working-day or residual-month count of 0 also
/// falls back to the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInputs {
    /// Compensation model label.
    #[serde(default)]
    pub model: Option<String>,
    /// Applications per day.
    #[serde(default)]
    pub applications_per_day: Option<String>,
    /// Hours worked per day.
    #[serde(default)]
    pub hours_worked: Option<String>,
    /// Working days in the period.
    #[serde(default)]
    pub working_days: Option<String>,
    /// Persistency rate, in percent.
    #[serde(default)]
    pub persistency_rate: Option<String>,
    /// Months shown in the residual preview.
    #[serde(default)]
    pub residual_months: Option<String>,
}

impl FormInputs {
    /// Converts the form values into calculator inputs.
    ///
    /// The result is not range-checked; pass it through
    /// [`CalculatorInputs::sanitize`] or [`CalculatorInputs::validate`].
    pub fn into_inputs(self, defaults: &InputDefaults) -> CalculatorInputs {
        let model = self
            .model
            .as_deref()
            .and_then(|m| m.parse().ok())
            .unwrap_or(defaults.model);

        let applications_per_day = self
            .applications_per_day
            .as_deref()
            .and_then(parse_leading_int)
            .unwrap_or(0)
            .max(0);

        let hours_worked = self
            .hours_worked
            .as_deref()
            .and_then(parse_leading_decimal)
            .unwrap_or(Decimal::ZERO);

        let working_days = self
            .working_days
            .as_deref()
            .and_then(parse_leading_int)
            .filter(|d| *d != 0)
            .unwrap_or(defaults.working_days);

        let persistency_rate = self
            .persistency_rate
            .as_deref()
            .and_then(parse_leading_int)
            .map(Decimal::from)
            .unwrap_or(defaults.persistency_rate);

        let residual_months = self
            .residual_months
            .as_deref()
            .and_then(parse_leading_int)
            .filter(|m| *m != 0)
            .and_then(|m| u32::try_from(m.max(0)).ok())
            .unwrap_or(defaults.residual_months);

        CalculatorInputs {
            model,
            applications_per_day: Decimal::from(applications_per_day),
            hours_worked,
            working_days,
            persistency_rate,
            residual_months,
        }
    }
}

/// Parses the leading integer of a string, ignoring anything after it
/// ("12", "12.7" and "12abc" all give 12).
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Parses the leading decimal number of a string, ignoring anything after
/// it ("7.5", "7.5h" and ".5" give 7.5, 7.5 and 0.5).
fn parse_leading_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim_start();
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let int_end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let whole = &body[..int_end];
    let fraction = body[int_end..]
        .strip_prefix('.')
        .map(|rest| {
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            &rest[..end]
        })
        .unwrap_or("");
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let literal = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    };
    let value = literal.parse::<Decimal>().ok()?;
    Some(if negative && !value.is_zero() { -value } else { value })
}
