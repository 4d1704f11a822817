use foundation::geo::LatLng;
use foundation::time::Time;

use crate::position::PositionTracker;

/// A programmatic view change requested by the follow logic.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Recenter {
    pub center: LatLng,
    pub zoom: f64,
    pub animate: bool,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FollowDecision {
    Recenter(Recenter),
    /// The user took over the view and has not asked to recenter.
    NotFollowing,
    /// A manual gesture happened less than the grace period ago.
    WithinGrace { remaining_s: f64 },
}

/// Soft follow: recenter on each fix unless the user recently moved the map.
///
/// Once a gesture clears the follow flag, only an explicit recenter sets it
/// again; the grace period additionally holds off automatic recentering
/// right after any gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowController {
    following: bool,
    grace_s: f64,
    min_zoom: f64,
}

impl Default for FollowController {
    fn default() -> Self {
        Self::new(12.0, 15.0)
    }
}

impl FollowController {
    pub fn new(grace_s: f64, min_zoom: f64) -> Self {
        Self {
            following: true,
            grace_s,
            min_zoom,
        }
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    pub fn grace_s(&self) -> f64 {
        self.grace_s
    }

    /// Any drag or zoom start by the user.
    pub fn on_gesture(&mut self, tracker: &mut PositionTracker, now: Time) {
        self.following = false;
        tracker.record_interaction(now);
    }

    /// Decide what to do with the fix just stored in `tracker`.
    pub fn on_position(
        &self,
        tracker: &PositionTracker,
        current_zoom: f64,
        now: Time,
    ) -> FollowDecision {
        if !self.following {
            return FollowDecision::NotFollowing;
        }
        if let Some(elapsed) = tracker.since_interaction(now) {
            if elapsed < self.grace_s {
                return FollowDecision::WithinGrace {
                    remaining_s: self.grace_s - elapsed,
                };
            }
        }
        match tracker.latest() {
            Some(fix) => FollowDecision::Recenter(self.recenter_on(fix.coord, current_zoom)),
            None => FollowDecision::NotFollowing,
        }
    }

    /// Explicit recenter: resumes following and ignores the grace period.
    /// Returns `None` when no fix has been received yet.
    pub fn recenter(&mut self, tracker: &PositionTracker, current_zoom: f64) -> Option<Recenter> {
        self.following = true;
        tracker
            .latest()
            .map(|fix| self.recenter_on(fix.coord, current_zoom))
    }

    fn recenter_on(&self, center: LatLng, current_zoom: f64) -> Recenter {
        Recenter {
            center,
            zoom: current_zoom.max(self.min_zoom),
            animate: true,
        }
    }
}
