//! Bindings to the Leaflet global `L` and the [`MapView`] it backs.

use std::collections::BTreeMap;

use foundation::geo::LatLng;
use js_sys::{Array, Function};
use layers::Layer as _;
use layers::{LayerId, MarkerStyle, OverlayLayer, PointMarker};
use session::{BasemapConfig, MapView, ViewState, ZoomOrigin};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::options::{MapOptions, SetViewOptions, TileOptions, to_js};

#[wasm_bindgen]
extern "C" {
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn new_map(container_id: &str, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &JsValue, zoom: f64, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &Map) -> f64;

    #[wasm_bindgen(method, js_name = getCenter)]
    fn get_center(this: &Map) -> JsLatLng;

    #[wasm_bindgen(method, js_name = addLayer)]
    fn add_layer(this: &Map, layer: &Layer) -> Map;

    #[wasm_bindgen(method, js_name = removeLayer)]
    fn remove_layer(this: &Map, layer: &Layer) -> Map;

    #[wasm_bindgen(method, js_name = hasLayer)]
    fn has_layer(this: &Map, layer: &Layer) -> bool;

    #[wasm_bindgen(method)]
    fn on(this: &Map, events: &str, handler: &Function) -> Map;

    pub type JsLatLng;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &JsLatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &JsLatLng) -> f64;

    pub type Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(extends = Layer)]
    pub type CircleMarker;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    fn circle_marker(at: &JsValue, options: &JsValue) -> CircleMarker;

    #[wasm_bindgen(method, js_name = setLatLng)]
    fn set_lat_lng(this: &CircleMarker, at: &JsValue) -> CircleMarker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &CircleMarker, html: &str, options: &JsValue) -> CircleMarker;

    #[wasm_bindgen(extends = Layer)]
    pub type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    fn layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = addLayer)]
    fn add_marker(this: &LayerGroup, layer: &Layer) -> LayerGroup;
}

fn js_lat_lng(at: LatLng) -> JsValue {
    Array::of2(&at.lat_deg.into(), &at.lng_deg.into()).into()
}

fn style_options(style: &MarkerStyle) -> JsValue {
    to_js(style).unwrap_or_else(|err| {
        warn!(?err, "marker style conversion failed");
        JsValue::UNDEFINED
    })
}

fn build_marker(marker: &PointMarker) -> CircleMarker {
    let circle = circle_marker(&js_lat_lng(marker.position), &style_options(&marker.style));
    if let Some(popup) = &marker.popup {
        let options = to_js(&popup.options()).unwrap_or(JsValue::UNDEFINED);
        circle.bind_popup(&popup.html(), &options);
    }
    circle
}

/// Leaflet-backed map view.
///
/// Overlay groups are built on first attach and reused afterwards, so
/// reattaching an overlay never duplicates its markers.
pub struct LeafletView {
    map: Map,
    user_marker: Option<CircleMarker>,
    overlays: BTreeMap<LayerId, LayerGroup>,
    zoom_origin: ZoomOrigin,
}

impl LeafletView {
    /// Create the map in `container_id` with the basemap attached.
    pub fn mount(container_id: &str, basemap: &BasemapConfig) -> Result<Self, JsValue> {
        let map = new_map(container_id, &to_js(&MapOptions::default())?);
        let tiles = tile_layer(&basemap.url_template, &to_js(&TileOptions::from(basemap))?);
        map.add_layer(&tiles);
        Ok(Self {
            map,
            user_marker: None,
            overlays: BTreeMap::new(),
            zoom_origin: ZoomOrigin::new(),
        })
    }

    /// Armed by [`MapView::set_view`]; its `zoomstart` is not a user gesture.
    pub fn zoom_origin(&self) -> ZoomOrigin {
        self.zoom_origin.clone()
    }

    /// Register a handler for space-separated Leaflet event names. The
    /// handler lives as long as the page.
    pub fn on(&self, events: &str, handler: impl FnMut() + 'static) {
        let closure = Closure::<dyn FnMut()>::new(handler);
        self.map.on(events, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

impl MapView for LeafletView {
    fn view(&self) -> ViewState {
        let center = self.map.get_center();
        ViewState {
            center: LatLng::new(center.lat(), center.lng()),
            zoom: self.map.get_zoom(),
        }
    }

    fn set_view(&mut self, center: LatLng, zoom: f64, animate: bool) {
        self.zoom_origin.arm(self.map.get_zoom(), zoom);
        let options = to_js(&SetViewOptions { animate }).unwrap_or(JsValue::UNDEFINED);
        self.map.set_view(&js_lat_lng(center), zoom, &options);
    }

    fn place_user_marker(&mut self, at: LatLng, style: &MarkerStyle) {
        match &self.user_marker {
            Some(marker) => {
                marker.set_lat_lng(&js_lat_lng(at));
            }
            None => {
                let marker = circle_marker(&js_lat_lng(at), &style_options(style));
                self.map.add_layer(&marker);
                self.user_marker = Some(marker);
            }
        }
    }

    fn attach_overlay(&mut self, overlay: &OverlayLayer) {
        let group = self.overlays.entry(overlay.id()).or_insert_with(|| {
            let group = layer_group();
            for marker in overlay.markers() {
                group.add_marker(&build_marker(marker));
            }
            group
        });
        if !self.map.has_layer(group) {
            self.map.add_layer(group);
        }
    }

    fn detach_overlay(&mut self, id: LayerId) {
        if let Some(group) = self.overlays.get(&id) {
            self.map.remove_layer(group);
        }
    }

    fn has_overlay(&self, id: LayerId) -> bool {
        self.overlays
            .get(&id)
            .is_some_and(|group| self.map.has_layer(group))
    }
}
