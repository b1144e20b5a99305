//! Calculation logic for the Earnings Engine.
//!
//! This module holds the projection pipeline: daily pay under each
//! compensation model, scaling across the enrollment period, the five-year
//! residual schedule, and the cumulative projection that chains them.
//! Every function here is pure and never fails.

mod daily_pay;
mod period;
mod projection;
mod residuals;

pub use daily_pay::{
    COMMISSION_THRESHOLD, HOURLY_RATE, PER_APP_RATE, compute_daily_pay, daily_pay_audit_step,
};
pub use period::{period_audit_step, project_period};
pub use projection::{build_projection, compare_models, trace_projection};
pub use residuals::{
    RESIDUAL_HORIZON_YEARS, RESIDUAL_RATE_PER_CUSTOMER, preview_monthly_residuals,
    project_residuals, residual_audit_step,
};
