use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use garde::Validate;
use std::ops::Deref;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor wrapper, which validates extracted payload with garde.
///
/// Invalid payload is rejected with 422 and the validation report,
/// failure of the inner extractor is returned as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Garde<E>(pub E);

impl<E> Deref for Garde<E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<Extractor, T> FromRequest<AppState> for Garde<Extractor>
where
    T: Validate<Context = ()>,
    Extractor: Deref<Target = T> + FromRequest<AppState>,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let inner = Extractor::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        inner
            .deref()
            .validate()
            .map_err(|report| ApiError::Validation(report).into_response())?;
        Ok(Garde(inner))
    }
}
