use std::cell::Cell;
use std::rc::Rc;

use foundation::geo::LatLng;
use layers::{LayerId, MarkerStyle, OverlayLayer};

/// Center and zoom of the map view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    pub center: LatLng,
    /// Widgets report zoom as a number; with integer snapping it is whole.
    pub zoom: f64,
}

/// What a session needs from the host map widget.
///
/// Tile loading, projection and gesture handling stay inside the widget; the
/// host forwards "gesture started" and "view settled" as session events.
pub trait MapView {
    fn view(&self) -> ViewState;

    fn set_view(&mut self, center: LatLng, zoom: f64, animate: bool);

    /// Create the user position marker on first call, move it afterwards.
    fn place_user_marker(&mut self, at: LatLng, style: &MarkerStyle);

    fn attach_overlay(&mut self, overlay: &OverlayLayer);

    fn detach_overlay(&mut self, id: LayerId);

    fn has_overlay(&self, id: LayerId) -> bool;
}

/// Tells zooms requested through [`MapView::set_view`] apart from user zooms.
///
/// Widgets that announce both with the same "zoom start" event arm the mark
/// before a programmatic zoom change; the next zoom start consumes it instead
/// of counting as a gesture. Clones share the mark, so the view and its event
/// handlers can each hold one.
#[derive(Debug, Clone, Default)]
pub struct ZoomOrigin {
    programmatic: Rc<Cell<bool>>,
}

impl ZoomOrigin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an upcoming view change from `current` to `target` zoom. Returns
    /// whether a zoom start is expected.
    pub fn arm(&self, current: f64, target: f64) -> bool {
        let changes = current != target;
        if changes {
            self.programmatic.set(true);
        }
        changes
    }

    /// Classify a zoom start, consuming a pending mark.
    pub fn zoom_start_is_gesture(&self) -> bool {
        !self.programmatic.replace(false)
    }

    /// Zoom finished. Drops a mark whose zoom start never arrived.
    pub fn settle(&self) {
        self.programmatic.set(false);
    }

    pub fn is_armed(&self) -> bool {
        self.programmatic.get()
    }
}

#[cfg(test)]
mod tests {
    use super::ZoomOrigin;

    #[test]
    fn programmatic_zoom_start_is_consumed_once() {
        let origin = ZoomOrigin::new();
        assert!(origin.arm(13.0, 15.0));
        assert!(!origin.zoom_start_is_gesture());
        // The next zoom start comes from the user.
        assert!(origin.zoom_start_is_gesture());
        assert!(origin.zoom_start_is_gesture());
    }

    #[test]
    fn same_zoom_expects_no_zoom_start() {
        let origin = ZoomOrigin::new();
        assert!(!origin.arm(15.0, 15.0));
        assert!(!origin.is_armed());
        assert!(origin.zoom_start_is_gesture());
    }

    #[test]
    fn settle_drops_an_unused_mark_for_all_clones() {
        let origin = ZoomOrigin::new();
        let handler = origin.clone();
        origin.arm(f64::NAN, 13.0);
        assert!(handler.is_armed());
        handler.settle();
        assert!(!origin.is_armed());
        assert!(origin.zoom_start_is_gesture());
    }
}
