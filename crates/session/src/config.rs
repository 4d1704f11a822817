use foundation::geo::LatLng;
use serde::Deserialize;

use crate::error::ConfigError;

/// Highest zoom level any configured threshold may name.
pub const MAX_ZOOM_LEVEL: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub lat: f64,
    pub lng: f64,
    pub zoom: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        // Florence.
        Self {
            lat: 43.7696,
            lng: 11.2558,
            zoom: 13.0,
        }
    }
}

impl ViewConfig {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BasemapConfig {
    pub url_template: String,
    pub max_zoom: u8,
}

impl Default for BasemapConfig {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png"
                .to_string(),
            max_zoom: 19,
        }
    }
}

/// Options handed to the platform location watch. The feed owns retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocationOptions {
    pub high_accuracy: bool,
    /// Oldest cached fix the platform may deliver.
    pub maximum_age_ms: u32,
    pub timeout_ms: u32,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            maximum_age_ms: 15_000,
            timeout_ms: 15_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub default_view: ViewConfig,
    /// Zoom at which the status line starts speaking.
    pub speak_zoom: f64,
    /// Seconds after a manual gesture during which soft follow stays paused.
    pub follow_grace_s: f64,
    /// Lowest zoom a follow recenter will use.
    pub follow_min_zoom: f64,
    pub intro_visible_s: f64,
    pub intro_fade_s: f64,
    pub actions_url: String,
    pub basemap: BasemapConfig,
    pub location: LocationOptions,
    /// `tracing` filter directive used by hosts that install a subscriber.
    pub log_filter: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_view: ViewConfig::default(),
            speak_zoom: 14.0,
            follow_grace_s: 12.0,
            follow_min_zoom: 15.0,
            intro_visible_s: 3.2,
            intro_fade_s: 0.8,
            actions_url: "./data/actions.json".to_string(),
            basemap: BasemapConfig::default(),
            location: LocationOptions::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl SessionConfig {
    /// Parse a (possibly partial) JSON object over the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: SessionConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_zoom("speak_zoom", self.speak_zoom)?;
        check_zoom("follow_min_zoom", self.follow_min_zoom)?;
        check_zoom("default_view.zoom", self.default_view.zoom)?;
        check_seconds("follow_grace_s", self.follow_grace_s)?;
        check_seconds("intro_visible_s", self.intro_visible_s)?;
        check_seconds("intro_fade_s", self.intro_fade_s)?;
        if !self.default_view.center().is_valid() {
            return Err(ConfigError::OutOfRange {
                field: "default_view.lat",
                value: self.default_view.lat,
            });
        }
        if self.actions_url.trim().is_empty() {
            return Err(ConfigError::Empty("actions_url"));
        }
        if self.basemap.url_template.trim().is_empty() {
            return Err(ConfigError::Empty("basemap.url_template"));
        }
        Ok(())
    }
}

fn check_zoom(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=MAX_ZOOM_LEVEL).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn check_seconds(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}
