use std::fmt;
use std::str::FromStr;

/// Category filter picked from the side panel.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Lens {
    #[default]
    Nearby,
    Culture,
    Urban,
    Actions,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lens: {0:?}")]
pub struct UnknownLens(pub String);

impl Lens {
    pub const ALL: [Lens; 4] = [Lens::Nearby, Lens::Culture, Lens::Urban, Lens::Actions];

    pub fn name(self) -> &'static str {
        match self {
            Lens::Nearby => "nearby",
            Lens::Culture => "culture",
            Lens::Urban => "urban",
            Lens::Actions => "actions",
        }
    }

    /// Lens for a menu button name. Unknown names behave like `nearby`.
    pub fn from_name_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: UnknownLens| {
            tracing::warn!(%err, "treating unknown lens as nearby");
            Lens::Nearby
        })
    }

    /// Whether this lens shows the actions overlay.
    pub fn shows_actions(self) -> bool {
        self == Lens::Actions
    }
}

impl FromStr for Lens {
    type Err = UnknownLens;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearby" => Ok(Lens::Nearby),
            "culture" => Ok(Lens::Culture),
            "urban" => Ok(Lens::Urban),
            "actions" => Ok(Lens::Actions),
            _ => Err(UnknownLens(s.to_string())),
        }
    }
}

impl fmt::Display for Lens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
