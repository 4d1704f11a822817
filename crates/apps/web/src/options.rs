//! Option objects passed to the map widget, built as serde structs so they
//! can be checked without a browser.

use serde::Serialize;
use session::BasemapConfig;
use wasm_bindgen::JsValue;

/// Map construction: no visible controls, canvas renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub zoom_control: bool,
    pub attribution_control: bool,
    pub prefer_canvas: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            zoom_control: false,
            attribution_control: false,
            prefer_canvas: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileOptions {
    pub max_zoom: u8,
}

impl From<&BasemapConfig> for TileOptions {
    fn from(cfg: &BasemapConfig) -> Self {
        Self {
            max_zoom: cfg.max_zoom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SetViewOptions {
    pub animate: bool,
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Convert through JSON into a plain JS object.
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let text = to_json(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&text)
}

#[cfg(test)]
mod tests {
    use super::{MapOptions, SetViewOptions, TileOptions, to_json};
    use layers::{MarkerStyle, Popup};
    use pretty_assertions::assert_eq;
    use session::BasemapConfig;

    #[test]
    fn map_options_hide_all_controls() {
        assert_eq!(
            to_json(&MapOptions::default()).expect("json"),
            r#"{"zoomControl":false,"attributionControl":false,"preferCanvas":true}"#
        );
    }

    #[test]
    fn tile_and_view_options() {
        let tiles = TileOptions::from(&BasemapConfig::default());
        assert_eq!(to_json(&tiles).expect("json"), r#"{"maxZoom":19}"#);
        assert_eq!(
            to_json(&SetViewOptions { animate: true }).expect("json"),
            r#"{"animate":true}"#
        );
    }

    #[test]
    fn marker_and_popup_options() {
        assert_eq!(
            to_json(&MarkerStyle::ACTION).expect("json"),
            r#"{"radius":6.0,"weight":1.0,"opacity":0.9,"fillOpacity":0.9}"#
        );
        assert_eq!(
            to_json(&Popup::new("x").options()).expect("json"),
            r#"{"closeButton":false}"#
        );
    }
}
