//! Response envelope shared by all handlers.
//!
//! Successful bodies are always `{ "data": ... }`; errors are produced by
//! [`AppError`](crate::error::AppError) as `{ "error", "code" }`.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `201 Created` carrying the enveloped resource.
pub type Created<T> = (StatusCode, Json<DataResponse<T>>);

pub fn created<T: Serialize>(data: T) -> Created<T> {
    (StatusCode::CREATED, Json(DataResponse { data }))
}
