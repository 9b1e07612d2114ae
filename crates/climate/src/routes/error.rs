use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("invalid date format, expected YYYY-MM-DD: {0}")]
    InvalidDateFormat(String),
    #[error("dataset is empty")]
    EmptyDataset,
    #[error("no data")]
    NoDataInRange,
    #[error("internal error")]
    Database(#[source] db::Error),
}

impl From<db::Error> for ApiError {
    fn from(value: db::Error) -> Self {
        match value {
            db::Error::EmptyDataset => ApiError::EmptyDataset,
            other => ApiError::Database(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidDateFormat(_) => StatusCode::BAD_REQUEST,
            ApiError::EmptyDataset => StatusCode::NOT_FOUND,
            // an empty range is an answer, not a failure
            ApiError::NoDataInRange => StatusCode::OK,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(e) => error!("error querying climate data: {}", e),
            ApiError::EmptyDataset => warn!("request against an empty dataset"),
            ApiError::InvalidDateFormat(input) => warn!("rejected date parameter: {}", input),
            ApiError::NoDataInRange => {}
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
