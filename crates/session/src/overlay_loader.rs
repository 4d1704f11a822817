use std::rc::Rc;

use formats::FeatureCollection;
use foundation::geo::LatLng;
use futures_util::future::LocalBoxFuture;
use layers::{LayerId, MarkerStyle, OverlayLayer, PointMarker, Popup};
use runtime::single_flight::{SharedTask, SingleFlight};
use tracing::{debug, info, warn};

use crate::error::{FetchError, OverlayLoadError};

/// Layer id of the actions overlay.
pub const ACTIONS_LAYER: LayerId = LayerId(1);

/// Label used when a feature has no usable `name`.
pub const DEFAULT_ACTION_LABEL: &str = "Human action";

pub const FALLBACK_ACTION_LABEL: &str = "Sample action (edit data/actions.json)";

pub const FALLBACK_ACTION_POSITION: LatLng = LatLng::new(43.7696, 11.2558);

/// A named point of the actions overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionFeature {
    pub name: String,
    pub point: LatLng,
}

impl ActionFeature {
    pub fn fallback() -> Self {
        Self {
            name: FALLBACK_ACTION_LABEL.to_string(),
            point: FALLBACK_ACTION_POSITION,
        }
    }

    pub fn to_marker(&self) -> PointMarker {
        PointMarker::new(self.point, MarkerStyle::ACTION).with_popup(Popup::new(self.name.clone()))
    }
}

/// Retrieves the raw overlay payload. Implementations must not borrow from
/// `self` in the returned future so it can outlive the call.
pub trait OverlaySource {
    fn fetch(&self, url: &str) -> LocalBoxFuture<'static, Result<String, FetchError>>;
}

pub fn parse_actions(payload: &str) -> Result<Vec<ActionFeature>, OverlayLoadError> {
    let collection = FeatureCollection::from_geojson_str(payload)?;
    if collection.skipped > 0 {
        debug!(skipped = collection.skipped, "ignoring non-point action features");
    }
    Ok(collection
        .features
        .iter()
        .map(|f| ActionFeature {
            name: f
                .label("name")
                .unwrap_or_else(|| DEFAULT_ACTION_LABEL.to_string()),
            point: f.position,
        })
        .collect())
}

pub fn build_actions_overlay(features: &[ActionFeature]) -> OverlayLayer {
    OverlayLayer::with_markers(
        ACTIONS_LAYER.0,
        features.iter().map(ActionFeature::to_marker).collect(),
    )
}

/// Loads the actions overlay once per session.
///
/// The first [`OverlayLoader::ensure_loaded`] call claims the load before
/// any await point; every later call, finished or still pending, shares the
/// same task. Failures never escape: they are logged and replaced by the
/// fallback feature. There is no retry.
pub struct OverlayLoader {
    source: Rc<dyn OverlaySource>,
    url: String,
    flight: SingleFlight<Rc<OverlayLayer>>,
}

impl std::fmt::Debug for OverlayLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayLoader")
            .field("url", &self.url)
            .field("flight", &self.flight)
            .finish()
    }
}

impl OverlayLoader {
    pub fn new(source: Rc<dyn OverlaySource>, url: impl Into<String>) -> Self {
        Self {
            source,
            url: url.into(),
            flight: SingleFlight::new(),
        }
    }

    pub fn layer_id(&self) -> LayerId {
        ACTIONS_LAYER
    }

    /// The overlay, if a load has completed.
    pub fn loaded(&self) -> Option<Rc<OverlayLayer>> {
        self.flight.peek().cloned()
    }

    pub fn ensure_loaded(&mut self) -> SharedTask<Rc<OverlayLayer>> {
        let source = &self.source;
        let url = &self.url;
        self.flight.get_or_start(|| {
            info!(%url, "loading actions overlay");
            let fetch = source.fetch(url);
            async move {
                let features = match fetch_actions(fetch).await {
                    Ok(features) => {
                        info!(count = features.len(), "actions overlay loaded");
                        features
                    }
                    Err(err) => {
                        warn!(error = %err, "using fallback actions sample");
                        vec![ActionFeature::fallback()]
                    }
                };
                let overlay = build_actions_overlay(&features);
                if overlay.is_empty() {
                    debug!("actions overlay has no points");
                }
                Rc::new(overlay)
            }
        })
    }
}

async fn fetch_actions(
    fetch: LocalBoxFuture<'static, Result<String, FetchError>>,
) -> Result<Vec<ActionFeature>, OverlayLoadError> {
    let payload = fetch.await?;
    parse_actions(&payload)
}
