//! HTTP request handlers for the Earnings Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Form, Json, Router,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    build_projection, compare_models, preview_monthly_residuals, trace_projection,
};
use crate::config::ConfigLoader;
use crate::format::display_projection;
use crate::models::{
    AuditTrace, AuditWarning, CalculationOutcome, CalculationResult, CalculatorInputs,
    FormInputs,
};

use super::request::ProjectionRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/compare", post(compare_handler))
        .route("/calculate/form", post(calculate_form_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Which engine output a request asks for.
#[derive(Debug, Clone, Copy)]
enum Mode {
    Projection,
    Comparison,
}

/// Handler for POST /calculate.
///
/// Projects earnings for the requested (or default) compensation model.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectionRequest>, JsonRejection>,
) -> Response {
    handle_json(state, payload, Mode::Projection)
}

/// Handler for POST /compare.
///
/// Projects both compensation models from the same inputs.
async fn compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectionRequest>, JsonRejection>,
) -> Response {
    handle_json(state, payload, Mode::Comparison)
}

/// Handler for POST /calculate/form.
///
/// Accepts the calculator's url-encoded form. Unparseable fields fall back
/// to defaults and the result is always clamped into range.
async fn calculate_form_handler(
    State(state): State<AppState>,
    payload: Result<Form<FormInputs>, FormRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing form calculation request");

    let form = match payload {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Form rejected"
            );
            return ApiErrorResponse::bad_request(ApiError::malformed_form(body_text))
                .into_response();
        }
    };

    let config = state.config();
    let inputs = form.into_inputs(config.defaults());
    respond(correlation_id, config, inputs, false, Mode::Projection)
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "engine_version": env!("CARGO_PKG_VERSION"),
        "program": state.config().program().code,
    }))
}

fn handle_json(
    state: AppState,
    payload: Result<Json<ProjectionRequest>, JsonRejection>,
    mode: Mode,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, mode = ?mode, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = json_rejection_error(rejection, correlation_id);
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let config = state.config();
    let strict = request.strict;
    let inputs = request.into_inputs(config.defaults());
    respond(correlation_id, config, inputs, strict, mode)
}

fn json_rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including the field name
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn respond(
    correlation_id: Uuid,
    config: &ConfigLoader,
    inputs: CalculatorInputs,
    strict: bool,
    mode: Mode,
) -> Response {
    let (inputs, warnings) = match inputs.prepare(strict) {
        Ok(prepared) => prepared,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Input validation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            return api_error.into_response();
        }
    };

    for warning in &warnings {
        warn!(
            correlation_id = %correlation_id,
            code = %warning.code,
            message = %warning.message,
            "Input adjusted"
        );
    }

    let result = perform_calculation(config, inputs, warnings, mode);

    info!(
        correlation_id = %correlation_id,
        calculation_id = %result.calculation_id,
        model = %inputs.model,
        applications_per_day = %inputs.applications_per_day,
        working_days = inputs.working_days,
        duration_us = result.audit_trace.duration_us,
        "Calculation completed successfully"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}

/// Runs the engine and wraps its output in a [`CalculationResult`].
fn perform_calculation(
    config: &ConfigLoader,
    inputs: CalculatorInputs,
    warnings: Vec<AuditWarning>,
    mode: Mode,
) -> CalculationResult {
    let start_time = Instant::now();
    let schedule = config.schedule();
    let daily = inputs.daily();
    let period = inputs.period();
    let residual = inputs.residual();

    let (outcome, projections) = match mode {
        Mode::Projection => {
            let projection = build_projection(inputs.model, &daily, &period, &residual, schedule);
            (
                CalculationOutcome::Projection(projection.clone()),
                vec![projection],
            )
        }
        Mode::Comparison => {
            let comparison = compare_models(&daily, &period, &residual, schedule);
            let projections = vec![
                comparison.hourly_plus_commission.clone(),
                comparison.commission_only.clone(),
            ];
            (CalculationOutcome::Comparison(comparison), projections)
        }
    };

    let mut steps = Vec::new();
    for projection in &projections {
        let first_step = steps.len() as u32 + 1;
        steps.extend(trace_projection(
            projection, &daily, &period, &residual, schedule, first_step,
        ));
    }

    let selected = projections
        .iter()
        .find(|p| p.model == inputs.model)
        .or(projections.first());
    let monthly_preview = selected
        .map(|p| preview_monthly_residuals(&p.yearly_residuals, inputs.residual_months))
        .unwrap_or_default();

    let display = projections.iter().map(display_projection).collect();

    let duration_us = start_time.elapsed().as_micros() as u64;

    CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        enrollment_period: config.enrollment_period().clone(),
        inputs,
        outcome,
        monthly_preview,
        display,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    }
}
