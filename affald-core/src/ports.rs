//! Asset loading seam and the error types crossing module boundaries.

use std::io::Error as IoError;

use image::{DynamicImage, ImageError};

use crate::model::SensorId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Schedule parameters outside their accepted ranges.
pub enum ConfigError {
    /// Pickup day is not a weekday index.
    #[error("Pickup day must be between 0 (Monday) and 6 (Sunday), got {0}")]
    PickupDay(u32),
    /// Frequency is outside one to 52 weeks.
    #[error("Pickup frequency must be between 1 and 52 weeks, got {0}")]
    Frequency(u32),
    /// Start week is not an ISO week number.
    #[error("Start week must be between 1 and 53, got {0}")]
    StartWeek(u32),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Failures of the pickup search.
pub enum ScheduleError {
    /// The sensor is not registered.
    #[error("Unknown sensor: {0}")]
    UnknownSensor(SensorId),
    /// No candidate matched the recurrence within the search horizon.
    #[error("No pickup date found within {horizon} weeks")]
    NotFound {
        /// Number of candidates inspected.
        horizon: usize,
    },
}

#[derive(thiserror::Error, Debug)]
/// Errors raised while answering a picture request.
pub enum CompositeError {
    /// The request carried no identifier list.
    #[error("Missing images parameter")]
    MissingParameter,
    /// None of the requested identifiers has an asset.
    #[error("No valid images found")]
    NoAssets,
    /// Reading, decoding or encoding failed.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ImageError> for CompositeError {
    fn from(err: ImageError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<IoError> for CompositeError {
    fn from(err: IoError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Client-visible outcome class of a failed picture request.
pub enum QueryStatus {
    /// The caller sent an incomplete request.
    BadRequest,
    /// Nothing could be drawn for the request.
    NotFound,
    /// The server failed while drawing.
    Internal,
}

impl QueryStatus {
    /// HTTP status code a host should answer with.
    #[must_use]
    pub const fn http_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

impl CompositeError {
    /// Classify the error for the system boundary.
    #[must_use]
    pub const fn status(&self) -> QueryStatus {
        match self {
            Self::MissingParameter => QueryStatus::BadRequest,
            Self::NoAssets => QueryStatus::NotFound,
            Self::Internal(_) => QueryStatus::Internal,
        }
    }
}

/// Source of decoded icon bitmaps, keyed by icon identifier.
pub trait AssetSource: Send + Sync {
    /// Load the bitmap for `identifier`.
    ///
    /// Returns `Ok(None)` when no asset exists for the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::Internal`] when an existing asset cannot be read or decoded.
    fn load(&self, identifier: &str) -> Result<Option<DynamicImage>, CompositeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_errors_map_to_http_codes() {
        assert_eq!(CompositeError::MissingParameter.status().http_code(), 400, "missing parameter");
        assert_eq!(CompositeError::NoAssets.status().http_code(), 404, "no assets");
        assert_eq!(
            CompositeError::Internal("boom".to_owned()).status().http_code(),
            500,
            "internal failure"
        );
    }

    #[test]
    fn io_errors_become_internal() {
        let err = CompositeError::from(IoError::other("disk on fire"));
        assert_eq!(err.status(), QueryStatus::Internal, "io error class");
        assert_eq!(err.to_string(), "Internal error: disk on fire", "message kept");
    }
}
