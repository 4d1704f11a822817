use foundation::geo::LatLng;

use crate::error::LocationError;
use crate::lens::Lens;

/// Everything a host can feed into a session.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    PositionUpdated(LatLng),
    PositionFailed(LocationError),
    /// Drag start or zoom start by the user.
    GestureStarted,
    /// The view came to rest after a pan or zoom.
    ViewSettled,
    LensSelected(Lens),
    RecenterRequested,
    MenuToggled,
}

impl AppEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            AppEvent::PositionUpdated(_) => "position",
            AppEvent::PositionFailed(_) => "position_error",
            AppEvent::GestureStarted => "gesture",
            AppEvent::ViewSettled => "view_settled",
            AppEvent::LensSelected(_) => "lens",
            AppEvent::RecenterRequested => "recenter",
            AppEvent::MenuToggled => "menu",
        }
    }
}
