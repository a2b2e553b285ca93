//! Single-slot undo buffer.

use serde::{Deserialize, Serialize};

/// What happens to the slot when an undo is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UndoPolicy {
    /// The slot takes the text that was replaced, so a second undo redoes.
    #[default]
    Exchange,
    /// The slot is emptied after restoring; a second undo does nothing.
    Consume,
}

/// Holds at most one earlier text value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoSlot {
    value: Option<String>,
    policy: UndoPolicy,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: UndoPolicy) -> Self {
        Self {
            value: None,
            policy,
        }
    }

    pub fn policy(&self) -> UndoPolicy {
        self.policy
    }

    /// Remember the text as it was before a modification.
    pub fn record(&mut self, before: String) {
        self.value = Some(before);
    }

    pub fn peek(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Take the value to restore, given the text currently in the field.
    ///
    /// Returns `None` (and changes nothing) when the slot is empty. Otherwise
    /// the slot is refilled with `current` under `Exchange`, or emptied under
    /// `Consume`.
    pub fn exchange(&mut self, current: String) -> Option<String> {
        let restore = self.value.take()?;
        if self.policy == UndoPolicy::Exchange {
            self.value = Some(current);
        }
        Some(restore)
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let mut slot = UndoSlot::new();
        assert!(!slot.is_set());
        assert_eq!(slot.exchange("now".to_string()), None);
        assert!(!slot.is_set());
    }

    #[test]
    fn test_record_overwrites() {
        let mut slot = UndoSlot::new();
        slot.record("one".to_string());
        slot.record("two".to_string());
        assert_eq!(slot.peek(), Some("two"));
    }

    #[test]
    fn test_exchange_swaps() {
        let mut slot = UndoSlot::new();
        slot.record("S0".to_string());
        assert_eq!(slot.exchange("T0".to_string()), Some("S0".to_string()));
        assert_eq!(slot.peek(), Some("T0"));
        assert_eq!(slot.exchange("S0".to_string()), Some("T0".to_string()));
        assert_eq!(slot.peek(), Some("S0"));
    }

    #[test]
    fn test_consume_clears() {
        let mut slot = UndoSlot::with_policy(UndoPolicy::Consume);
        slot.record("S0".to_string());
        assert_eq!(slot.exchange("T0".to_string()), Some("S0".to_string()));
        assert!(!slot.is_set());
        assert_eq!(slot.exchange("S0".to_string()), None);
    }

    #[test]
    fn test_clear_keeps_policy() {
        let mut slot = UndoSlot::with_policy(UndoPolicy::Consume);
        slot.record("x".to_string());
        slot.clear();
        assert!(!slot.is_set());
        assert_eq!(slot.policy(), UndoPolicy::Consume);
    }
}
