//! Compensation model selection.
//!
//! An agent is paid under exactly one of two schemes. The choice is a closed
//! enum so every calculation matches on it exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The compensation scheme an agent is paid under.
///
/// # Example
///
/// ```
/// use earnings_engine::models::CompensationModel;
///
/// let model: CompensationModel = "commission_only".parse().unwrap();
/// assert_eq!(model, CompensationModel::CommissionOnly);
/// assert_eq!(model.to_string(), "Commission Only");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationModel {
    /// Hourly wage plus a per-application commission above a daily threshold.
    #[default]
    HourlyPlusCommission,
    /// Per-application commission on every application, no hourly wage.
    CommissionOnly,
}

impl CompensationModel {
    /// Both models, in the order they are presented side by side.
    pub const ALL: [CompensationModel; 2] = [
        CompensationModel::HourlyPlusCommission,
        CompensationModel::CommissionOnly,
    ];

    /// Returns the snake_case identifier used in JSON and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompensationModel::HourlyPlusCommission => "hourly_plus_commission",
            CompensationModel::CommissionOnly => "commission_only",
        }
    }

    /// Returns true if the model pays an hourly wage.
    pub fn pays_hourly(&self) -> bool {
        matches!(self, CompensationModel::HourlyPlusCommission)
    }
}

impl fmt::Display for CompensationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompensationModel::HourlyPlusCommission => "Hourly + Commission",
            CompensationModel::CommissionOnly => "Commission Only",
        };
        f.write_str(label)
    }
}

impl FromStr for CompensationModel {
    type Err = EngineError;

    /// Accepts the snake_case identifiers as well as the short labels
    /// (`hourly+commission`, `commissiononly`) used by the web form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect();

        match normalized.as_str() {
            "hourlypluscommission" | "hourly+commission" | "hourly" => {
                Ok(CompensationModel::HourlyPlusCommission)
            }
            "commissiononly" | "commission" => Ok(CompensationModel::CommissionOnly),
            _ => Err(EngineError::InvalidInput {
                field: "model".to_string(),
                message: format!("unknown compensation model '{}'", s),
            }),
        }
    }
}
