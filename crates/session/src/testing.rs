//! Test doubles shared by the module tests.

use std::cell::RefCell;

use foundation::geo::LatLng;
use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use layers::{Layer, LayerId, MarkerStyle, OverlayLayer};

use crate::error::FetchError;
use crate::overlay_loader::OverlaySource;
use crate::view::{MapView, ViewState};

/// Overlay source that answers every fetch with the same scripted result.
pub struct ScriptedSource {
    response: Result<String, FetchError>,
    urls: RefCell<Vec<String>>,
}

impl ScriptedSource {
    pub fn ok(payload: &str) -> Self {
        Self {
            response: Ok(payload.to_string()),
            urls: RefCell::new(Vec::new()),
        }
    }

    pub fn err(err: FetchError) -> Self {
        Self {
            response: Err(err),
            urls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.urls.borrow().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.borrow().clone()
    }
}

impl OverlaySource for ScriptedSource {
    fn fetch(&self, url: &str) -> LocalBoxFuture<'static, Result<String, FetchError>> {
        self.urls.borrow_mut().push(url.to_string());
        let response = self.response.clone();
        async move { response }.boxed_local()
    }
}

/// Map widget double that records every call.
#[derive(Debug)]
pub struct RecordingMap {
    pub view: ViewState,
    pub set_views: Vec<(LatLng, f64, bool)>,
    pub user_marker: Option<LatLng>,
    pub user_marker_moves: usize,
    /// Attached overlay ids in attach order; duplicates would show up here.
    pub attached: Vec<LayerId>,
    pub last_attached: Option<OverlayLayer>,
}

impl RecordingMap {
    pub fn at_zoom(zoom: f64) -> Self {
        Self {
            view: ViewState {
                center: LatLng::new(0.0, 0.0),
                zoom,
            },
            set_views: Vec::new(),
            user_marker: None,
            user_marker_moves: 0,
            attached: Vec::new(),
            last_attached: None,
        }
    }

    /// Simulate the user zooming the widget.
    pub fn zoom_to(&mut self, zoom: f64) {
        self.view.zoom = zoom;
    }
}

impl MapView for RecordingMap {
    fn view(&self) -> ViewState {
        self.view
    }

    fn set_view(&mut self, center: LatLng, zoom: f64, animate: bool) {
        self.view = ViewState { center, zoom };
        self.set_views.push((center, zoom, animate));
    }

    fn place_user_marker(&mut self, at: LatLng, _style: &MarkerStyle) {
        if self.user_marker.is_some() {
            self.user_marker_moves += 1;
        }
        self.user_marker = Some(at);
    }

    fn attach_overlay(&mut self, overlay: &OverlayLayer) {
        self.attached.push(overlay.id());
        self.last_attached = Some(overlay.clone());
    }

    fn detach_overlay(&mut self, id: LayerId) {
        self.attached.retain(|a| *a != id);
    }

    fn has_overlay(&self, id: LayerId) -> bool {
        self.attached.contains(&id)
    }
}
