use crate::lens::Lens;
use crate::status::StatusDisplay;

/// What the status line should do after an evaluation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Speech {
    Silent,
    Visible(&'static str),
}

impl Speech {
    pub fn text(self) -> Option<&'static str> {
        match self {
            Speech::Silent => None,
            Speech::Visible(text) => Some(text),
        }
    }

    pub fn apply_to<S: StatusDisplay + ?Sized>(self, status: &mut S) {
        match self {
            Speech::Silent => status.hide(),
            Speech::Visible(text) => status.show(text),
        }
    }
}

/// Fixed line spoken for each lens.
pub fn line_for(lens: Lens) -> &'static str {
    match lens {
        Lens::Actions => "Human actions are present in this area.",
        Lens::Culture => "Cultural places are present in this area.",
        Lens::Urban => "Urban spaces are present in this area.",
        Lens::Nearby => "Look around. The map responds.",
    }
}

/// Zoom-gated speech policy.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpeakGate {
    threshold: f64,
}

impl Default for SpeakGate {
    fn default() -> Self {
        Self::new(14.0)
    }
}

impl SpeakGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Silent below the threshold whatever `_force` says: forcing only skips
    /// waiting for a zoom/pan trigger, never the zoom level itself.
    pub fn evaluate(&self, zoom: f64, lens: Lens, _force: bool) -> Speech {
        if zoom.is_nan() || zoom < self.threshold {
            return Speech::Silent;
        }
        Speech::Visible(line_for(lens))
    }
}

#[cfg(test)]
mod tests {
    use super::{SpeakGate, Speech, line_for};
    use crate::lens::Lens;
    use crate::status::{StatusDisplay, StatusLine};

    #[test]
    fn silent_below_threshold_for_every_lens_and_force() {
        let gate = SpeakGate::default();
        for zoom in [0.0, 5.0, 10.0, 13.0, 13.99] {
            for lens in Lens::ALL {
                for force in [false, true] {
                    assert_eq!(gate.evaluate(zoom, lens, force), Speech::Silent, "z={zoom}");
                }
            }
        }
        assert_eq!(gate.evaluate(f64::NAN, Lens::Nearby, true), Speech::Silent);
    }

    #[test]
    fn speaks_the_lens_line_at_or_above_threshold() {
        let gate = SpeakGate::default();
        for zoom in [14.0, 15.0, 19.0] {
            for lens in Lens::ALL {
                for force in [false, true] {
                    assert_eq!(gate.evaluate(zoom, lens, force), Speech::Visible(line_for(lens)));
                }
            }
        }
    }

    #[test]
    fn fixed_lines() {
        let gate = SpeakGate::default();
        assert_eq!(
            gate.evaluate(15.0, Lens::Culture, false).text(),
            Some("Cultural places are present in this area.")
        );
        assert_eq!(
            gate.evaluate(14.0, Lens::Actions, false).text(),
            Some("Human actions are present in this area.")
        );
        assert_eq!(
            gate.evaluate(16.0, Lens::Urban, false).text(),
            Some("Urban spaces are present in this area.")
        );
        assert_eq!(
            gate.evaluate(14.0, Lens::Nearby, false).text(),
            Some("Look around. The map responds.")
        );
    }

    #[test]
    fn applying_overwrites_the_status_line() {
        let mut status = StatusLine::default();
        status.show("Location permission needed to test the MVP.");
        Speech::Visible("Look around. The map responds.").apply_to(&mut status);
        assert_eq!(status.text(), Some("Look around. The map responds."));
        Speech::Silent.apply_to(&mut status);
        assert!(!status.is_visible());
        assert_eq!(status.text(), None);
    }
}
