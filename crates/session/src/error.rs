use formats::FeatureCollectionError;

/// Failure to retrieve an overlay payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Why the actions overlay fell back to the built-in sample.
#[derive(Debug, thiserror::Error)]
pub enum OverlayLoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("malformed overlay data: {0}")]
    Parse(#[from] FeatureCollectionError),
}

/// Errors reported by the location feed, plus the platform having none.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("location unsupported on this platform")]
    Unsupported,
}

impl LocationError {
    /// Map a W3C `GeolocationPositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => LocationError::PermissionDenied,
            3 => LocationError::Timeout,
            _ => LocationError::PositionUnavailable,
        }
    }

    /// Text shown on the status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::Unsupported => "Geolocation not supported on this device.",
            _ => "Location permission needed to test the MVP.",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}
