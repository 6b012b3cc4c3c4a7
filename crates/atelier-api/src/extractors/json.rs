//! JSON body extractors that turn every rejection into a `400`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use atelier_core::error::AppError;

/// `Json<T>` whose rejections and rule violations both become `400`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::validation(e.body_text()))?;
        value.validate().map_err(|e| AppError::validation(describe(&e)))?;
        Ok(Self(value))
    }
}

/// `Json<T>` for bodies without `validator` rules. Malformed JSON and
/// well-formed JSON that does not fit `T` are both `400`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::validation(e.body_text()))?;
        Ok(Self(value))
    }
}

/// One line per failing field, sorted by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    if lines.is_empty() {
        return "Invalid request body".to_string();
    }
    lines.sort();
    lines.join("; ")
}
