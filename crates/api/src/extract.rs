//! Extractors that turn every malformed request into a 400
//! `VALIDATION_ERROR` body instead of axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use realty_core::error::CoreError;
use realty_core::types::DbId;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

fn rejected(detail: String) -> AppError {
    AppError::Core(CoreError::Validation(detail))
}

/// JSON body that has passed its `validator` rules.
///
/// Malformed JSON and rule violations both reject with a 400
/// `VALIDATION_ERROR`, so callers see one error shape for bad input.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| rejected(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// The single `{id}` segment of a resource route.
///
/// ```ignore
/// async fn get_by_id(IdPath(id): IdPath) -> AppResult<Json<()>> { .. }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub DbId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejected(rejection.body_text()))?;
        Ok(IdPath(id))
    }
}

/// Query string deserialized into `T`.
#[derive(Debug, Clone, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejected(rejection.body_text()))?;
        Ok(QueryParams(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request as HttpRequest;
    use serde::Deserialize;

    use super::*;
    use crate::query::SlotQuery;

    async fn query<T: DeserializeOwned>(uri: &str) -> Result<T, AppError> {
        let (mut parts, ()) = HttpRequest::get(uri).body(()).unwrap().into_parts();
        QueryParams::<T>::from_request_parts(&mut parts, &())
            .await
            .map(|QueryParams(value)| value)
    }

    #[derive(Debug, Deserialize)]
    struct Page {
        #[allow(dead_code)]
        limit: Option<i64>,
    }

    #[tokio::test]
    async fn slot_query_accepts_camel_case_property_id() {
        let q: SlotQuery = query("/visits/available-slots?propertyId=5&date=2024-06-01")
            .await
            .unwrap();
        assert_eq!(q.property_id.as_deref(), Some("5"));
        assert_eq!(q.date.as_deref(), Some("2024-06-01"));

        let q: SlotQuery = query("/visits/available-slots?property_id=7&date=2024-06-01")
            .await
            .unwrap();
        assert_eq!(q.property_id.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn malformed_query_is_a_validation_error() {
        let err = query::<Page>("/properties?limit=ten").await.unwrap_err();
        assert!(matches!(err, AppError::Core(CoreError::Validation(_))));
    }
}
