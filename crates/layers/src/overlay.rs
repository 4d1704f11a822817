use crate::layer::{Layer, LayerId};
use crate::markers::PointMarker;

/// A group of markers shown or hidden as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer {
    id: LayerId,
    markers: Vec<PointMarker>,
}

impl OverlayLayer {
    pub fn with_markers(id: u64, markers: Vec<PointMarker>) -> Self {
        Self {
            id: LayerId(id),
            markers,
        }
    }

    pub fn markers(&self) -> &[PointMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Layer for OverlayLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn feature_count(&self) -> usize {
        self.markers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::OverlayLayer;
    use crate::layer::{Layer, LayerId};
    use crate::markers::{PointMarker, Popup};
    use crate::symbology::MarkerStyle;
    use foundation::geo::LatLng;
    use pretty_assertions::assert_eq;

    #[test]
    fn collects_markers_under_one_id() {
        assert!(OverlayLayer::with_markers(4, Vec::new()).is_empty());

        let layer = OverlayLayer::with_markers(
            4,
            vec![PointMarker::new(LatLng::new(1.0, 2.0), MarkerStyle::ACTION).with_popup(Popup::new("a"))],
        );
        assert_eq!(layer.id(), LayerId(4));
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.feature_count(), 1);
        assert_eq!(layer.id().to_string(), "layer#4");
        assert_eq!(layer.markers()[0].popup.as_ref().map(|p| p.label.as_str()), Some("a"));
    }
}
