//! Request types for the Earnings Engine API.
//!
//! This module defines the JSON request body shared by the `/calculate` and
//! `/compare` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CalculatorInputs, CompensationModel, InputDefaults};

/// Request body for the `/calculate` and `/compare` endpoints.
///
/// Only `applications_per_day` is required. Omitted fields take the
/// configured defaults, and `hours_worked` defaults to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// The compensation model to project.
    #[serde(default)]
    pub model: Option<CompensationModel>,
    /// Applications completed per day.
    pub applications_per_day: Decimal,
    /// Hours worked per day.
    #[serde(default)]
    pub hours_worked: Decimal,
    /// Working days in the enrollment period.
    #[serde(default)]
    pub working_days: Option<i64>,
    /// Persistency rate, in percent.
    #[serde(default)]
    pub persistency_rate: Option<Decimal>,
    /// Months shown in the residual preview.
    #[serde(default)]
    pub residual_months: Option<u32>,
    /// Reject out-of-range values instead of clamping them.
    #[serde(default)]
    pub strict: bool,
}

impl ProjectionRequest {
    /// Converts the request into calculator inputs, filling gaps from
    /// `defaults`.
    pub fn into_inputs(self, defaults: &InputDefaults) -> CalculatorInputs {
        CalculatorInputs {
            model: self.model.unwrap_or(defaults.model),
            applications_per_day: self.applications_per_day,
            hours_worked: self.hours_worked,
            working_days: self.working_days.unwrap_or(defaults.working_days),
            persistency_rate: self.persistency_rate.unwrap_or(defaults.persistency_rate),
            residual_months: self.residual_months.unwrap_or(defaults.residual_months),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_minimal_request_deserializes() {
        let request: ProjectionRequest =
            serde_json::from_str(r#"{"applications_per_day": 20}"#).unwrap();

        assert_eq!(request.model, None);
        assert_eq!(request.applications_per_day, dec!(20));
        assert_eq!(request.hours_worked, Decimal::ZERO);
        assert!(!request.strict);
    }

    #[test]
    fn test_full_request_deserializes() {
        let json = r#"{
            "model": "commission_only",
            "applications_per_day": "20",
            "hours_worked": 7.5,
            "working_days": 40,
            "persistency_rate": 80,
            "residual_months": 24,
            "strict": true
        }"#;

        let request: ProjectionRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.model, Some(CompensationModel::CommissionOnly));
        assert_eq!(request.hours_worked, dec!(7.5));
        assert_eq!(request.working_days, Some(40));
        assert_eq!(request.persistency_rate, Some(dec!(80)));
        assert_eq!(request.residual_months, Some(24));
        assert!(request.strict);
    }

    #[test]
    fn test_missing_applications_is_rejected() {
        let result = serde_json::from_str::<ProjectionRequest>(r#"{"hours_worked": 8}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("missing field `applications_per_day`"));
    }

    #[test]
    fn test_into_inputs_fills_defaults() {
        let request: ProjectionRequest =
            serde_json::from_str(r#"{"applications_per_day": 20, "hours_worked": 8}"#).unwrap();

        let inputs = request.into_inputs(&InputDefaults::default());

        assert_eq!(inputs.model, CompensationModel::HourlyPlusCommission);
        assert_eq!(inputs.working_days, 53);
        assert_eq!(inputs.persistency_rate, dec!(70));
        assert_eq!(inputs.residual_months, 12);
    }

    #[test]
    fn test_into_inputs_keeps_given_values() {
        let request = ProjectionRequest {
            model: Some(CompensationModel::CommissionOnly),
            applications_per_day: dec!(30),
            hours_worked: dec!(6),
            working_days: Some(20),
            persistency_rate: Some(dec!(90)),
            residual_months: Some(3),
            strict: false,
        };

        let inputs = request.into_inputs(&InputDefaults::default());

        assert_eq!(inputs.model, CompensationModel::CommissionOnly);
        assert_eq!(inputs.working_days, 20);
        assert_eq!(inputs.persistency_rate, dec!(90));
        assert_eq!(inputs.residual_months, 3);
    }
}
