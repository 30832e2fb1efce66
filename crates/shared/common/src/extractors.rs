//! Request extractors.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// JSON body that has passed its `validator` rules.
///
/// Malformed bodies and rule violations are both rejected as
/// [`AppError::Validation`], so handlers only ever see valid input.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(violation_message(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Message for the failing field that sorts first by name.
///
/// Field errors come back in hash order; sorting keeps the reported message
/// stable when several fields fail at once. Rules without a message fall
/// back to naming the field.
fn violation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .and_then(|(field, errors)| {
            errors.first().map(|error| match &error.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .unwrap_or_else(|| "Validation failed".to_string())
}
