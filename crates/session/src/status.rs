/// Single-line status sink. Each call replaces whatever was shown before.
pub trait StatusDisplay {
    fn show(&mut self, text: &str);
    fn hide(&mut self);
}

/// In-memory status line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusLine {
    text: String,
    visible: bool,
}

impl StatusLine {
    pub fn text(&self) -> Option<&str> {
        self.visible.then_some(self.text.as_str())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl StatusDisplay for StatusLine {
    fn show(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.visible = true;
    }

    fn hide(&mut self) {
        self.text.clear();
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{StatusDisplay, StatusLine};

    #[test]
    fn last_write_wins() {
        let mut line = StatusLine::default();
        assert_eq!(line.text(), None);
        line.show("a");
        line.show("b");
        assert_eq!(line.text(), Some("b"));
        line.hide();
        assert!(!line.is_visible());
        line.show("c");
        assert_eq!(line.text(), Some("c"));
    }
}
