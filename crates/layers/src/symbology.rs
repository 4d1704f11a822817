use serde::Serialize;

/// Circle marker symbology. Field names serialize to the option keys web map
/// widgets expect (`fillOpacity`, ...).
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    /// Radius in screen pixels.
    pub radius: f64,
    /// Stroke width in screen pixels.
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl MarkerStyle {
    pub const fn new(radius: f64, weight: f64, opacity: f64, fill_opacity: f64) -> Self {
        Self {
            radius,
            weight,
            opacity,
            fill_opacity,
        }
    }

    /// The live user position dot.
    pub const USER: MarkerStyle = MarkerStyle::new(7.0, 1.0, 0.9, 0.9);

    /// Points of the actions overlay.
    pub const ACTION: MarkerStyle = MarkerStyle::new(6.0, 1.0, 0.9, 0.9);
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::ACTION
    }
}

#[cfg(test)]
mod tests {
    use super::MarkerStyle;

    #[test]
    fn serializes_widget_option_names() {
        let json = serde_json::to_value(MarkerStyle::USER).expect("serialize");
        assert_eq!(json["radius"], 7.0);
        assert_eq!(json["weight"], 1.0);
        assert_eq!(json["fillOpacity"], 0.9);
        assert!(json.get("fill_opacity").is_none());
    }
}
