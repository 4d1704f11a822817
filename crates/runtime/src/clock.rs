use std::cell::Cell;
use std::rc::Rc;

use foundation::time::Time;

/// Source of "now" for everything time-dependent in a session.
///
/// The grace window and the intro whisper only ever compare two readings of
/// the same clock, so the epoch is irrelevant.
pub trait Clock {
    fn now(&self) -> Time;
}

/// Clock that only moves when told to. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: Time) -> Self {
        Self {
            now: Rc::new(Cell::new(start.0)),
        }
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Time {
        Time(self.now.get())
    }
}
