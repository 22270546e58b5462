//! Listing vocabulary, the media upload seam, and the listing creation outcome.

use async_trait::async_trait;
use serde::Serialize;

pub const PROPERTY_TYPES: &[&str] = &["apartment", "house", "villa", "condo", "land", "commercial"];

pub const LISTING_TYPES: &[&str] = &["sale", "rent"];

pub const LISTING_STATUSES: &[&str] = &["available", "pending", "sold", "rented"];

/// Maximum number of images accepted on a single listing.
pub const MAX_LISTING_IMAGES: usize = 20;

fn validate_one_of(kind: &str, value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Invalid {kind} '{value}'. Must be one of: {}",
            allowed.join(", ")
        ))
    }
}

pub fn validate_property_type(value: &str) -> Result<(), String> {
    validate_one_of("property type", value, PROPERTY_TYPES)
}

pub fn validate_listing_type(value: &str) -> Result<(), String> {
    validate_one_of("listing type", value, LISTING_TYPES)
}

pub fn validate_listing_status(value: &str) -> Result<(), String> {
    validate_one_of("listing status", value, LISTING_STATUSES)
}

/// Failure reported by a [`MediaUploader`].
#[derive(Debug, thiserror::Error)]
#[error("media upload failed: {0}")]
pub struct MediaError(pub String);

/// Stores listing images and returns the URLs the listing should reference.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, sources: &[String]) -> Result<Vec<String>, MediaError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Uploader that keeps caller-supplied URLs as they are, provided each one
/// is an absolute `http(s)` URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkOnlyUploader;

#[async_trait]
impl MediaUploader for LinkOnlyUploader {
    async fn upload(&self, sources: &[String]) -> Result<Vec<String>, MediaError> {
        if sources.len() > MAX_LISTING_IMAGES {
            return Err(MediaError(format!(
                "at most {MAX_LISTING_IMAGES} images may be attached, got {}",
                sources.len()
            )));
        }
        sources
            .iter()
            .map(|src| {
                let src = src.trim();
                if src.starts_with("https://") || src.starts_with("http://") {
                    Ok(src.to_string())
                } else {
                    Err(MediaError(format!("'{src}' is not an http(s) URL")))
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "link-only"
    }
}

/// Result of creating a listing whose images are stored as a side effect.
///
/// The listing row is committed before media upload runs, so a failed upload
/// leaves a valid listing without images rather than rolling the listing back.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ListingOutcome<T> {
    Created { listing: T },
    CreatedWithoutMedia { listing: T, reason: String },
}

impl<T> ListingOutcome<T> {
    pub fn listing(&self) -> &T {
        match self {
            Self::Created { listing } | Self::CreatedWithoutMedia { listing, .. } => listing,
        }
    }
}
