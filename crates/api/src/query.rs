//! Query parameter types shared by handler modules.
//!
//! Values arrive as raw strings so malformed input surfaces as a
//! `VALIDATION_ERROR` body naming the field, instead of a generic
//! deserialization failure.

use serde::Deserialize;

/// `GET /visits/available-slots?propertyId=&date=`.
#[derive(Debug, Default, Deserialize)]
pub struct SlotQuery {
    #[serde(alias = "propertyId")]
    pub property_id: Option<String>,
    pub date: Option<String>,
}

/// `GET /properties/{property_id}/available-slots?date=`.
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// `?status=` filter on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}

/// `?status=&limit=&offset=` on admin listings.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?role=&limit=&offset=` on the admin user listing.
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    pub role: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Trimmed, non-empty value of an optional query parameter.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
