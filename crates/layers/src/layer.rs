use std::fmt;

/// Stable handle of a layer the host map can show or hide.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

pub trait Layer {
    fn id(&self) -> LayerId;

    /// Drawable features in the layer.
    fn feature_count(&self) -> usize;
}
