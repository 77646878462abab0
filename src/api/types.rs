//! API response and query types.
//!
//! Response shapes match what the dashboard frontend already consumes.

use serde::{Deserialize, Serialize};

use crate::record::WeeklyRecord;
use crate::report::{Analysis, Summary};
use crate::stats::Forecast;

/// `GET /data/predict` body.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub message: &'static str,
    /// `None` (JSON `null`) when fewer than two weeks are available.
    pub predictions: Option<Forecast>,
}

/// `GET /data/analysis` body.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub message: &'static str,
    /// The weekly series the correlations were computed from.
    pub insights: Vec<WeeklyRecord>,
    pub correlations: Analysis,
}

/// `GET /data/summary` body.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub message: &'static str,
    pub summary: Summary,
}

/// Query parameters for the ad-hoc correlation endpoint.
#[derive(Debug, Deserialize)]
pub struct CorrelationQuery {
    pub x: String,
    pub y: String,
}

/// `GET /data/correlation` body.
#[derive(Debug, Serialize)]
pub struct CorrelationResponse {
    pub x: &'static str,
    pub y: &'static str,
    pub correlation: f64,
}

/// Query parameters for the ad-hoc grouped average endpoint.
#[derive(Debug, Deserialize)]
pub struct AverageQuery {
    pub group: String,
    pub target: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Short description of the failed operation.
    pub error: String,
    /// Underlying cause, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: impl ToString) -> Self {
        Self {
            error: error.into(),
            details: Some(details.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prediction_serializes_as_null() {
        let body = PredictResponse {
            message: "Next week's forecast",
            predictions: None,
        };
        let json = serde_json::to_value(&body).expect("serializable");
        assert!(json["predictions"].is_null());
        assert_eq!(json["message"], "Next week's forecast");
    }

    #[test]
    fn error_details_are_optional() {
        let bare = ErrorResponse {
            error: "Analysis failed".to_string(),
            details: None,
        };
        let json = serde_json::to_value(&bare).expect("serializable");
        assert!(json.get("details").is_none());

        let full = ErrorResponse::new("Prediction failed", "degenerate");
        let json = serde_json::to_value(&full).expect("serializable");
        assert_eq!(json["details"], "degenerate");
    }
}
