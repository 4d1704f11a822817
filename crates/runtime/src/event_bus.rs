use std::collections::VecDeque;

use foundation::time::Time;

/// One dispatched input, kept as text so hosts can dump a session trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub at: Time,
    pub kind: &'static str,
    pub message: String,
}

/// Bounded trace of recent events. Oldest entries are dropped first.
#[derive(Debug)]
pub struct EventBus {
    events: VecDeque<Event>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
        }
    }

    pub fn emit(&mut self, at: Time, kind: &'static str, message: impl Into<String>) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(Event {
            at,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn count_kind(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use foundation::time::Time;

    #[test]
    fn records_events_with_timestamp() {
        let mut bus = EventBus::new();
        bus.emit(Time(2.0), "test", "hello");
        let events: Vec<_> = bus.events().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].at, Time(2.0));
        assert_eq!(events[0].kind, "test");
        assert_eq!(events[0].message, "hello");
    }

    #[test]
    fn drops_oldest_when_full() {
        let mut bus = EventBus::with_capacity(2);
        bus.emit(Time(0.0), "a", "1");
        bus.emit(Time(1.0), "b", "2");
        bus.emit(Time(2.0), "b", "3");
        let msgs: Vec<_> = bus.events().map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, vec!["2", "3"]);
        assert_eq!(bus.count_kind("b"), 2);
        assert_eq!(bus.count_kind("a"), 0);
    }
}
