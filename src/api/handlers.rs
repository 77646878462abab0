//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::types::{
    AnalysisResponse, AverageQuery, CorrelationQuery, CorrelationResponse, ErrorResponse,
    PredictResponse, SummaryResponse,
};
use crate::record::{Field, WeeklyRecord};
use crate::report::{Analysis, Summary};
use crate::stats::{GroupedAverages, correlation, forecast_next_week, grouped_average};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Returns the weekly series.
///
/// `GET /data/weekly` → 200 + `Vec<WeeklyRecord>` JSON
pub async fn get_weekly(State(state): State<Arc<AppState>>) -> Json<Vec<WeeklyRecord>> {
    Json(state.records.clone())
}

/// Forecasts next week with the configured denominator mode.
///
/// `GET /data/predict` → 200 + `PredictResponse` JSON (`predictions: null`
/// for fewer than two weeks)
/// degenerate fit → 500 + `ErrorResponse`
pub async fn get_predict(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PredictResponse>, ApiError> {
    let mode = state.config.forecast.denominator;
    match forecast_next_week(&state.records, mode) {
        Ok(predictions) => Ok(Json(PredictResponse {
            message: "Next week's forecast",
            predictions,
        })),
        Err(e) => {
            warn!(error = %e, %mode, "forecast failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Prediction failed", e)),
            ))
        }
    }
}

/// Returns the series with its weather/outcome correlations.
///
/// `GET /data/analysis` → 200 + `AnalysisResponse` JSON
pub async fn get_analysis(State(state): State<Arc<AppState>>) -> Json<AnalysisResponse> {
    Json(AnalysisResponse {
        message: "Weather impact on yield and reject rates",
        insights: state.records.clone(),
        correlations: Analysis::from_records(&state.records),
    })
}

/// Returns outcome averages grouped by each weather column.
///
/// `GET /data/summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        message: "Weather-based summary statistics",
        summary: Summary::from_records(&state.records),
    })
}

/// Correlates two named columns.
///
/// `GET /data/correlation?x=humidity&y=strawberry_yield` → 200 +
/// `CorrelationResponse` JSON
/// unknown column → 400 + `ErrorResponse`
pub async fn get_correlation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CorrelationQuery>,
) -> Result<Json<CorrelationResponse>, ApiError> {
    let x = parse_field(&query.x)?;
    let y = parse_field(&query.y)?;
    Ok(Json(CorrelationResponse {
        x: x.name(),
        y: y.name(),
        correlation: correlation(&state.records, x, y),
    }))
}

/// Averages one named column grouped by another.
///
/// `GET /data/average?group=rainfall&target=reject_due_to_pest` → 200 +
/// grouped average array
/// unknown column → 400 + `ErrorResponse`
pub async fn get_average(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AverageQuery>,
) -> Result<Json<GroupedAverages>, ApiError> {
    let group = parse_field(&query.group)?;
    let target = parse_field(&query.target)?;
    Ok(Json(grouped_average(&state.records, group, target)))
}

fn parse_field(name: &str) -> Result<Field, ApiError> {
    name.parse::<Field>().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid field", e)),
        )
    })
}
