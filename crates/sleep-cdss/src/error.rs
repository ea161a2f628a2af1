use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::therapy::{ConfigurationError, TriageServiceError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Thresholds(ConfigurationError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Triage(TriageServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Thresholds(err) => write!(f, "threshold configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Triage(err) => write!(f, "triage error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Thresholds(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Triage(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Triage(TriageServiceError::Validation(err)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": err.to_string(), "field": err.field() }),
            ),
            AppError::Triage(TriageServiceError::Alert(err)) => {
                (StatusCode::BAD_GATEWAY, json!({ "error": err.to_string() }))
            }
            AppError::Config(_)
            | AppError::Thresholds(_)
            | AppError::Telemetry(_)
            | AppError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ConfigurationError> for AppError {
    fn from(value: ConfigurationError) -> Self {
        Self::Thresholds(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<TriageServiceError> for AppError {
    fn from(value: TriageServiceError) -> Self {
        Self::Triage(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::therapy::{AlertError, SnapshotField, ValidationError};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn validation_errors_name_the_rejected_field() {
        let err = AppError::from(TriageServiceError::Validation(ValidationError::AboveMaximum {
            field: SnapshotField::Spo2,
            value: 101.0,
            max: 100.0,
        }));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["field"], json!("spo2"));
        assert_eq!(body["error"], json!("spo2 must not exceed 100 (found 101)"));
    }

    #[tokio::test]
    async fn alert_outage_maps_to_bad_gateway_without_field() {
        let err = AppError::from(TriageServiceError::Alert(AlertError::Transport(
            "pager offline".to_string(),
        )));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert!(body.get("field").is_none());
    }

    #[tokio::test]
    async fn infrastructure_failures_are_internal_errors() {
        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "port taken",
        ));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], json!("io error: port taken"));
    }
}
