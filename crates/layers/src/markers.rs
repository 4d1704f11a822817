use foundation::geo::LatLng;
use serde::Serialize;

use crate::symbology::MarkerStyle;

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Popup content. The label is plain text; markup is only produced by
/// [`Popup::html`], which escapes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub label: String,
    pub close_button: bool,
}

/// Options object handed to the widget alongside the popup HTML.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupOptions {
    pub close_button: bool,
}

impl Popup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            close_button: false,
        }
    }

    pub fn html(&self) -> String {
        format!(
            r#"<div style="font-size:13px;line-height:1.2">{}</div>"#,
            escape_html(&self.label)
        )
    }

    pub fn options(&self) -> PopupOptions {
        PopupOptions {
            close_button: self.close_button,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointMarker {
    pub position: LatLng,
    pub style: MarkerStyle,
    pub popup: Option<Popup>,
}

impl PointMarker {
    pub fn new(position: LatLng, style: MarkerStyle) -> Self {
        Self {
            position,
            style,
            popup: None,
        }
    }

    pub fn with_popup(mut self, popup: Popup) -> Self {
        self.popup = Some(popup);
        self
    }
}
