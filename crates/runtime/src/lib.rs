pub mod clock;
pub mod event_bus;
pub mod single_flight;

pub use clock::*;
pub use event_bus::*;
pub use single_flight::*;
