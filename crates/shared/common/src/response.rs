//! Result envelope returned by every endpoint.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Tagged success/failure value.
///
/// `is_success` is true exactly when no error message is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResult<T> {
    pub is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl<T> ServiceResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            is_success: true,
            data: Some(data),
            success_message: None,
            error_message: None,
            error_code: None,
        }
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            data: None,
            success_message: None,
            error_message: Some(message.into()),
            error_code: Some(code.into()),
        }
    }
}

impl ServiceResult<()> {
    /// Success carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            data: None,
            success_message: Some(message.into()),
            error_message: None,
            error_code: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ServiceResult<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

/// Created response helper for POST endpoints
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(ServiceResult::success(self.0))).into_response()
    }
}
