//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{PeriodProration, build_report, build_year_report, liquidate_period};
use crate::config::{ConfigLoader, ConfigurationProvider, PayrollConfiguration};
use crate::error::EngineResult;
use crate::models::{CostCenterReport, Employee, PeriodLiquidation, YearCostCenterReport};

use super::request::{PayrollRequest, YearReportRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/liquidate", post(liquidate_handler))
        .route("/payroll/cost-by-center", post(cost_by_center_handler))
        .route("/payroll/cost-by-center/year", post(year_report_handler))
        .with_state(state)
}

/// Handler for POST /payroll/liquidate.
///
/// Returns one line per employee plus period totals.
async fn liquidate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing liquidation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection).into_response(),
    };

    let start_time = Instant::now();
    match perform_liquidation(&request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                tenant_id = %request.tenant_id,
                employees = result.lines.len(),
                days_in_period = result.days_in_period,
                net_pay = %result.totals.net_pay,
                total_cost = %result.totals.total_cost,
                duration_us = start_time.elapsed().as_micros(),
                "Liquidation completed successfully"
            );
            json_ok(result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                tenant_id = %request.tenant_id,
                error = %err,
                "Liquidation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /payroll/cost-by-center.
///
/// Returns the payroll cost grouped by cost center.
async fn cost_by_center_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing cost center report request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection).into_response(),
    };

    let start_time = Instant::now();
    match perform_cost_report(&request, state.config()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                tenant_id = %request.tenant_id,
                cost_centers = report.cost_centers.len(),
                grand_total_employer_cost = %report.grand_total_employer_cost,
                duration_us = start_time.elapsed().as_micros(),
                "Cost center report completed successfully"
            );
            json_ok(report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                tenant_id = %request.tenant_id,
                error = %err,
                "Cost center report failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /payroll/cost-by-center/year.
///
/// Consolidates the cost-center report over the processed periods of a year.
async fn year_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<YearReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing year cost center report request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection).into_response(),
    };

    let start_time = Instant::now();
    match perform_year_report(&request, state.config()) {
        Ok(year_report) => {
            info!(
                correlation_id = %correlation_id,
                tenant_id = %request.tenant_id,
                year = year_report.year,
                periods_included = year_report.periods_included.len(),
                periods_skipped = year_report.periods_skipped.len(),
                grand_total_employer_cost = %year_report.report.grand_total_employer_cost,
                duration_us = start_time.elapsed().as_micros(),
                "Year cost center report completed successfully"
            );
            json_ok(year_report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                tenant_id = %request.tenant_id,
                error = %err,
                "Year cost center report failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a body extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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
    };
    ApiErrorResponse::bad_request(error)
}

/// Resolves the tenant configuration, the period proration and the
/// normalized employees shared by both endpoints.
fn prepare<'a>(
    request: &PayrollRequest,
    config: &'a ConfigLoader,
) -> EngineResult<(&'a PayrollConfiguration, PeriodProration, Vec<Employee>)> {
    let payroll_config = config.configuration(&request.tenant_id)?;
    let proration = request.period.proration()?;
    let employees = request.normalized_employees()?;
    Ok((payroll_config, proration, employees))
}

/// Liquidates the requested period.
fn perform_liquidation(
    request: &PayrollRequest,
    config: &ConfigLoader,
) -> EngineResult<PeriodLiquidation> {
    let (payroll_config, proration, employees) = prepare(request, config)?;
    liquidate_period(&request.tenant_id, &employees, payroll_config, proration)
}

/// Builds the cost center report for the requested period.
fn perform_cost_report(
    request: &PayrollRequest,
    config: &ConfigLoader,
) -> EngineResult<CostCenterReport> {
    let (payroll_config, proration, employees) = prepare(request, config)?;
    build_report(&employees, payroll_config, proration.period_factor)
}

/// Builds the cost center report over the processed periods of a year.
fn perform_year_report(
    request: &YearReportRequest,
    config: &ConfigLoader,
) -> EngineResult<YearCostCenterReport> {
    let payroll_config = config.configuration(&request.tenant_id)?;
    let periods = request.normalized_periods()?;
    build_year_report(request.year, &periods, payroll_config)
}
