//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Deserialization failures are reported as [`AppError::JsonExtractorRejection`]
/// and `Validate` failures as [`AppError::ValidationError`], so both produce
/// the standard [`crate::errors::ErrorResponse`] body.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateCategoria {
///     #[validate(length(min = 1, max = 50))]
///     nombre: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateCategoria>) -> String {
///     format!("Creating {}", payload.nombre)
/// }
///
/// let app = Router::new().route("/categorias", post(create));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
