use super::page::Page;
use crate::domain::selection::SelectionAnchor;

/// Remembers the last non-empty selection and where to show the popup for it.
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    anchor_offset: f64,
    text: Option<String>,
    anchor: SelectionAnchor,
}

impl SelectionTracker {
    pub fn new(anchor_offset: f64) -> Self {
        Self {
            anchor_offset,
            text: None,
            anchor: SelectionAnchor::default(),
        }
    }

    /// Returns `true` when the stored selection changed.
    pub fn on_pointer_up(&mut self, page: &dyn Page) -> bool {
        let Some(selection) = page.selection() else {
            return false;
        };
        let text = selection.text.trim();
        if text.is_empty() {
            return false;
        }

        self.text = Some(text.to_string());
        self.anchor = SelectionAnchor::below(selection.bounds, self.anchor_offset);
        true
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn anchor(&self) -> SelectionAnchor {
        self.anchor
    }

    pub fn clear(&mut self) {
        self.text = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::Rect;
    use crate::test_support::FakePage;

    #[test]
    fn test_records_trimmed_text_and_anchor() {
        let mut page = FakePage::new(1024.0, 768.0);
        page.select("  hello world ", Rect::new(50.0, 200.0, 80.0, 20.0));

        let mut tracker = SelectionTracker::new(10.0);
        assert!(tracker.on_pointer_up(&page));
        assert_eq!(tracker.selected_text(), Some("hello world"));
        assert_eq!(tracker.anchor(), SelectionAnchor { x: 50.0, y: 230.0 });
    }

    #[test]
    fn test_empty_selection_keeps_previous_state() {
        let mut page = FakePage::new(1024.0, 768.0);
        page.select("first", Rect::new(5.0, 5.0, 10.0, 10.0));
        let mut tracker = SelectionTracker::new(10.0);
        tracker.on_pointer_up(&page);

        page.select("   ", Rect::new(300.0, 300.0, 0.0, 0.0));
        assert!(!tracker.on_pointer_up(&page));
        page.clear_selection();
        assert!(!tracker.on_pointer_up(&page));

        assert_eq!(tracker.selected_text(), Some("first"));
        assert_eq!(tracker.anchor(), SelectionAnchor { x: 5.0, y: 25.0 });
    }

    #[test]
    fn test_clear_drops_text_only() {
        let mut page = FakePage::new(1024.0, 768.0);
        page.select("word", Rect::new(1.0, 2.0, 3.0, 4.0));
        let mut tracker = SelectionTracker::new(10.0);
        tracker.on_pointer_up(&page);

        tracker.clear();
        assert!(tracker.selected_text().is_none());
        assert_eq!(tracker.anchor(), SelectionAnchor { x: 1.0, y: 16.0 });
    }
}
