//! Tracking of the editable field the commands operate on.

use crate::host::{ElementEvent, TEXT_INPUT_KIND};
use tracing::trace;

/// Remembers the last text-input element reported as focused or edited.
///
/// The handle is kept as-is: no liveness check happens here. Whoever uses
/// `current_field()` must cope with a stale handle.
#[derive(Debug, Clone)]
pub struct FocusTracker<F> {
    current: Option<F>,
    text_input_kinds: Vec<String>,
}

impl<F: Clone> FocusTracker<F> {
    /// Tracker accepting only `"text-input"` elements.
    pub fn new() -> Self {
        Self::with_kinds(vec![TEXT_INPUT_KIND.to_string()])
    }

    /// Tracker accepting any of the given element kinds.
    pub fn with_kinds(text_input_kinds: Vec<String>) -> Self {
        Self {
            current: None,
            text_input_kinds,
        }
    }

    /// Update from a `Focused` or `TextChanged` event.
    ///
    /// Returns `true` if the event replaced the current field.
    pub fn observe(&mut self, event: &ElementEvent<F>) -> bool {
        let Some(source) = &event.source else {
            trace!("focus event without source element");
            return false;
        };
        if !self.accepts(event.element_kind.as_deref()) {
            trace!(kind = ?event.element_kind, "focus event from non text-input element");
            return false;
        }
        self.current = Some(source.clone());
        true
    }

    pub fn current_field(&self) -> Option<&F> {
        self.current.as_ref()
    }

    pub fn has_field(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    fn accepts(&self, kind: Option<&str>) -> bool {
        kind.is_some_and(|k| self.text_input_kinds.iter().any(|accepted| accepted == k))
    }
}

impl<F: Clone> Default for FocusTracker<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_has_no_field() {
        let tracker: FocusTracker<u32> = FocusTracker::new();
        assert!(!tracker.has_field());
        assert_eq!(tracker.current_field(), None);
    }

    #[test]
    fn test_text_input_becomes_current() {
        let mut tracker = FocusTracker::new();
        assert!(tracker.observe(&ElementEvent::text_input(1u32)));
        assert_eq!(tracker.current_field(), Some(&1));

        assert!(tracker.observe(&ElementEvent::text_input(2u32)));
        assert_eq!(tracker.current_field(), Some(&2));
    }

    #[test]
    fn test_filter_rejects_other_kinds_and_missing_source() {
        let mut tracker = FocusTracker::new();
        tracker.observe(&ElementEvent::text_input(1u32));

        assert!(!tracker.observe(&ElementEvent::new(Some(2u32), Some("button"))));
        assert!(!tracker.observe(&ElementEvent::new(Some(3u32), None)));
        assert!(!tracker.observe(&ElementEvent::new(None, Some(TEXT_INPUT_KIND))));

        assert_eq!(tracker.current_field(), Some(&1));
    }

    #[test]
    fn test_custom_kinds() {
        let mut tracker = FocusTracker::with_kinds(vec![
            "android.widget.EditText".to_string(),
            "search-box".to_string(),
        ]);
        assert!(!tracker.observe(&ElementEvent::text_input(1u32)));
        assert!(tracker.observe(&ElementEvent::new(Some(2u32), Some("search-box"))));
        assert_eq!(tracker.current_field(), Some(&2));
    }

    #[test]
    fn test_clear() {
        let mut tracker = FocusTracker::new();
        tracker.observe(&ElementEvent::text_input(1u32));
        tracker.clear();
        assert!(!tracker.has_field());
    }
}
