//! Panel visibility driven by keyboard presence.
//!
//! The controller only decides; it returns a `PanelRequest` and leaves the
//! attach/detach call to the caller that owns the `PanelSurface`.

use crate::host::{Anchor, PanelLayout, WindowInfo, WindowKind};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    #[default]
    Hidden,
    Visible,
}

/// Action the panel surface should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRequest {
    Attach(PanelLayout),
    Detach,
}

#[derive(Debug, Clone)]
pub struct VisibilityController {
    state: VisibilityState,
    anchor: Anchor,
    /// Added to the keyboard height
    extra_offset: i32,
}

impl VisibilityController {
    pub fn new() -> Self {
        Self::with_placement(Anchor::BottomEnd, 0)
    }

    pub fn with_placement(anchor: Anchor, extra_offset: i32) -> Self {
        Self {
            state: VisibilityState::Hidden,
            anchor,
            extra_offset,
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == VisibilityState::Visible
    }

    /// Process a window snapshot.
    ///
    /// The first input-method window in the snapshot determines the offset.
    /// Returns `None` when the keyboard's presence matches the current state.
    pub fn observe(&mut self, windows: &[WindowInfo]) -> Option<PanelRequest> {
        let keyboard = windows.iter().find(|w| w.kind == WindowKind::InputMethod);

        match (self.state, keyboard) {
            (VisibilityState::Hidden, Some(keyboard)) => {
                let offset = keyboard.bounds.height().saturating_add(self.extra_offset);
                debug!(offset, "keyboard shown, attaching panel");
                self.state = VisibilityState::Visible;
                Some(PanelRequest::Attach(PanelLayout::wrap_content(
                    self.anchor,
                    offset,
                )))
            }
            (VisibilityState::Visible, None) => {
                debug!("keyboard hidden, detaching panel");
                self.state = VisibilityState::Hidden;
                Some(PanelRequest::Detach)
            }
            (VisibilityState::Hidden, None) | (VisibilityState::Visible, Some(_)) => None,
        }
    }

    /// Forced teardown: always detach and fall back to `Hidden`.
    pub fn interrupt(&mut self) -> PanelRequest {
        debug!(was = ?self.state, "interrupted, detaching panel");
        self.state = VisibilityState::Hidden;
        PanelRequest::Detach
    }

    /// Detach request if the panel is currently shown; used on shutdown.
    pub fn hide(&mut self) -> Option<PanelRequest> {
        if self.is_visible() {
            self.state = VisibilityState::Hidden;
            Some(PanelRequest::Detach)
        } else {
            None
        }
    }
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new()
    }
}
