/// Visibility of the one-shot introductory whisper.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IntroPhase {
    Visible,
    Fading,
    Removed,
}

/// Timing of the intro whisper: shown at startup, faded out once, removed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IntroWhisper {
    pub visible_s: f64,
    pub fade_s: f64,
}

impl Default for IntroWhisper {
    fn default() -> Self {
        Self {
            visible_s: 3.2,
            fade_s: 0.8,
        }
    }
}

impl IntroWhisper {
    pub fn new(visible_s: f64, fade_s: f64) -> Self {
        Self { visible_s, fade_s }
    }

    /// Seconds after startup at which the element is removed.
    pub fn removed_after_s(&self) -> f64 {
        self.visible_s + self.fade_s
    }

    pub fn phase(&self, elapsed_s: f64) -> IntroPhase {
        if elapsed_s < self.visible_s {
            IntroPhase::Visible
        } else if elapsed_s < self.removed_after_s() {
            IntroPhase::Fading
        } else {
            IntroPhase::Removed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IntroPhase, IntroWhisper};

    #[test]
    fn fades_once_then_disappears() {
        let intro = IntroWhisper::default();
        assert_eq!(intro.phase(0.0), IntroPhase::Visible);
        assert_eq!(intro.phase(3.19), IntroPhase::Visible);
        assert_eq!(intro.phase(3.2), IntroPhase::Fading);
        assert_eq!(intro.phase(3.9), IntroPhase::Fading);
        assert_eq!(intro.phase(4.01), IntroPhase::Removed);
        assert_eq!(intro.phase(600.0), IntroPhase::Removed);
    }
}
