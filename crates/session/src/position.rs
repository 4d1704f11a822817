use foundation::geo::{LatLng, haversine_m};
use foundation::time::Time;

/// Latest fix from the location feed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UserPosition {
    pub coord: LatLng,
    pub at: Time,
}

/// Keeps the most recent fix (no history) and the time of the last manual
/// map gesture.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PositionTracker {
    latest: Option<UserPosition>,
    last_interaction: Option<Time>,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current fix. Returns meters moved since the previous one.
    pub fn update(&mut self, coord: LatLng, at: Time) -> Option<f64> {
        let moved = self.latest.map(|prev| haversine_m(prev.coord, coord));
        self.latest = Some(UserPosition { coord, at });
        moved
    }

    pub fn latest(&self) -> Option<UserPosition> {
        self.latest
    }

    pub fn record_interaction(&mut self, at: Time) {
        self.last_interaction = Some(at);
    }

    pub fn last_interaction(&self) -> Option<Time> {
        self.last_interaction
    }

    /// Seconds since the last manual gesture, `None` if there never was one.
    pub fn since_interaction(&self, now: Time) -> Option<f64> {
        self.last_interaction.map(|t| now.since(t))
    }
}

#[cfg(test)]
mod tests {
    use super::PositionTracker;
    use foundation::geo::LatLng;
    use foundation::time::Time;

    #[test]
    fn latest_fix_wins() {
        let mut tracker = PositionTracker::new();
        assert_eq!(tracker.update(LatLng::new(43.0, 11.0), Time(1.0)), None);
        let moved = tracker.update(LatLng::new(43.001, 11.0), Time(2.0)).expect("moved");
        assert!((moved - 111.2).abs() < 1.0, "{moved}");

        let latest = tracker.latest().expect("fix");
        assert_eq!(latest.coord, LatLng::new(43.001, 11.0));
        assert_eq!(latest.at, Time(2.0));
    }

    #[test]
    fn interaction_recency() {
        let mut tracker = PositionTracker::new();
        assert_eq!(tracker.since_interaction(Time(100.0)), None);
        tracker.record_interaction(Time(90.0));
        tracker.record_interaction(Time(95.0));
        assert_eq!(tracker.last_interaction(), Some(Time(95.0)));
        assert_eq!(tracker.since_interaction(Time(100.0)), Some(5.0));
    }
}
