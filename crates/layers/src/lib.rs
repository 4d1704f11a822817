pub mod layer;
pub mod markers;
pub mod overlay;
pub mod symbology;

pub use layer::*;
pub use markers::*;
pub use overlay::*;
pub use symbology::*;
