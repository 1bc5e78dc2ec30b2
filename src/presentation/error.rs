// HTTP error mapping
use crate::domain::error::StationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    Station(StationError),
    Internal(anyhow::Error),
}

impl From<StationError> for ApiError {
    fn from(e: StationError) -> Self {
        ApiError::Station(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<StationError>() {
            Ok(station) => ApiError::Station(station),
            Err(other) => ApiError::Internal(other),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Station(
                StationError::UnknownLanguage(_)
                | StationError::UnknownSensor(_)
                | StationError::UnknownPanel(_)
                | StationError::UnknownChannel(_),
            ) => StatusCode::NOT_FOUND,
            ApiError::Station(
                StationError::NotCalibratable(_) | StationError::InvalidSetting { .. },
            ) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Station(e) => e.to_string(),
            ApiError::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                "internal error".to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
