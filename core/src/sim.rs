//! In-memory host used by tests and the CLI.
//!
//! `SimHost` owns the elements; `SimField` handles only hold weak references,
//! so destroying an element through the host makes its handles stale exactly
//! like a recycled view on a real platform.

use crate::host::{
    FieldHandle, PanelLayout, PanelSurface, Rect, WindowInfo, WindowKind, TEXT_INPUT_KIND,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Simulated screen size, in pixels.
pub const SCREEN_WIDTH: i32 = 1080;
pub const SCREEN_HEIGHT: i32 = 2400;

/// Keyboard window `height` pixels tall along the bottom of the simulated
/// screen.
pub fn keyboard_window(height: i32) -> WindowInfo {
    let top = SCREEN_HEIGHT.saturating_sub(height);
    WindowInfo::new(
        WindowKind::InputMethod,
        Rect::new(0, top, SCREEN_WIDTH, SCREEN_HEIGHT),
    )
}

#[derive(Debug)]
struct SimElement {
    kind: String,
    text: String,
}

/// Owner of simulated UI elements and the shared clipboard.
#[derive(Debug, Default)]
pub struct SimHost {
    elements: RefCell<Vec<Rc<RefCell<SimElement>>>>,
    clipboard: Rc<RefCell<String>>,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element of the given kind.
    pub fn add_field(&self, kind: &str, text: &str) -> SimField {
        let element = Rc::new(RefCell::new(SimElement {
            kind: kind.to_string(),
            text: text.to_string(),
        }));
        let handle = SimField {
            element: Rc::downgrade(&element),
            clipboard: Rc::clone(&self.clipboard),
        };
        self.elements.borrow_mut().push(element);
        handle
    }

    pub fn add_text_input(&self, text: &str) -> SimField {
        self.add_field(TEXT_INPUT_KIND, text)
    }

    /// Drop the element behind `field`. Returns `false` if it was already gone.
    pub fn destroy(&self, field: &SimField) -> bool {
        let mut elements = self.elements.borrow_mut();
        let before = elements.len();
        elements.retain(|e| !std::ptr::eq(Rc::as_ptr(e), field.element.as_ptr()));
        elements.len() != before
    }

    /// Text of a live element, as the user would see it.
    pub fn text_of(&self, field: &SimField) -> Option<String> {
        field.read_text()
    }

    /// Simulate the user typing over the field's content.
    pub fn set_text(&self, field: &SimField, text: &str) -> bool {
        field.write_text(text)
    }

    pub fn set_clipboard(&self, text: &str) {
        *self.clipboard.borrow_mut() = text.to_string();
    }

    pub fn clipboard(&self) -> String {
        self.clipboard.borrow().clone()
    }

    pub fn element_count(&self) -> usize {
        self.elements.borrow().len()
    }
}

/// Weak handle to a `SimHost` element.
#[derive(Debug, Clone)]
pub struct SimField {
    element: Weak<RefCell<SimElement>>,
    clipboard: Rc<RefCell<String>>,
}

impl SimField {
    pub fn is_alive(&self) -> bool {
        self.element.strong_count() > 0
    }

    pub fn kind(&self) -> Option<String> {
        self.element.upgrade().map(|e| e.borrow().kind.clone())
    }
}

impl PartialEq for SimField {
    fn eq(&self, other: &Self) -> bool {
        self.element.ptr_eq(&other.element)
    }
}

impl FieldHandle for SimField {
    fn read_text(&self) -> Option<String> {
        self.element.upgrade().map(|e| e.borrow().text.clone())
    }

    fn write_text(&self, text: &str) -> bool {
        match self.element.upgrade() {
            Some(e) => {
                e.borrow_mut().text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Appends the clipboard, as if the cursor sat at the end of the text.
    fn invoke_native_paste(&self) {
        if let Some(e) = self.element.upgrade() {
            e.borrow_mut().text.push_str(&self.clipboard.borrow());
        }
    }
}

/// Panel request as recorded by `SimPanel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    Attached(PanelLayout),
    Detached,
}

/// Panel surface that records every request.
#[derive(Debug, Clone, Default)]
pub struct SimPanel {
    events: Vec<PanelEvent>,
    attached: Option<PanelLayout>,
}

impl SimPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PanelEvent] {
        &self.events
    }

    /// Remove and return the recorded requests.
    pub fn drain_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    pub fn layout(&self) -> Option<&PanelLayout> {
        self.attached.as_ref()
    }
}

impl PanelSurface for SimPanel {
    fn attach(&mut self, layout: PanelLayout) {
        self.events.push(PanelEvent::Attached(layout));
        self.attached = Some(layout);
    }

    fn detach(&mut self) {
        self.events.push(PanelEvent::Detached);
        self.attached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Anchor;

    #[test]
    fn test_field_read_write() {
        let host = SimHost::new();
        let field = host.add_text_input("abc");
        assert_eq!(field.read_text().as_deref(), Some("abc"));
        assert!(field.write_text("xyz"));
        assert_eq!(host.text_of(&field).as_deref(), Some("xyz"));
        assert_eq!(field.kind().as_deref(), Some(TEXT_INPUT_KIND));
    }

    #[test]
    fn test_destroy_makes_handle_stale() {
        let host = SimHost::new();
        let field = host.add_text_input("abc");
        let copy = field.clone();
        assert_eq!(field, copy);

        assert!(host.destroy(&field));
        assert!(!host.destroy(&field));
        assert!(!copy.is_alive());
        assert_eq!(copy.read_text(), None);
        assert!(!copy.write_text("x"));
        copy.invoke_native_paste();
        assert_eq!(host.element_count(), 0);
    }

    #[test]
    fn test_paste_appends_clipboard() {
        let host = SimHost::new();
        let field = host.add_text_input("abc");
        host.set_clipboard("def");
        field.invoke_native_paste();
        assert_eq!(host.text_of(&field).as_deref(), Some("abcdef"));
        assert_eq!(host.clipboard(), "def");
    }

    #[test]
    fn test_keyboard_window() {
        let w = keyboard_window(480);
        assert_eq!(w.kind, WindowKind::InputMethod);
        assert_eq!(w.bounds.width(), SCREEN_WIDTH);
        assert_eq!(w.bounds.height(), 480);
        assert_eq!(w.bounds.bottom, SCREEN_HEIGHT);

        // Out-of-range heights clamp instead of wrapping
        assert_eq!(keyboard_window(i32::MIN).bounds.top, i32::MAX);
        assert_eq!(keyboard_window(i32::MAX).bounds.top, SCREEN_HEIGHT - i32::MAX);
    }

    #[test]
    fn test_panel_records_requests() {
        let mut panel = SimPanel::new();
        let layout = PanelLayout::wrap_content(Anchor::BottomEnd, 480);
        panel.attach(layout);
        assert_eq!(panel.layout(), Some(&layout));
        panel.detach();
        assert!(!panel.is_attached());
        assert_eq!(
            panel.drain_events(),
            vec![PanelEvent::Attached(layout), PanelEvent::Detached]
        );
        assert!(panel.events().is_empty());
    }
}
