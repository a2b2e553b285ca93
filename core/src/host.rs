//! Host-facing interface.
//!
//! The host owns the UI tree, the window manager and the event stream. This
//! module defines the capabilities the extension needs from it (`FieldHandle`,
//! `PanelSurface`) and the data the host hands over (`Notification`,
//! `WindowInfo`). Platforms implement the traits; the extension never owns the
//! underlying elements.

use serde::{Deserialize, Serialize};

/// Element kind reported for editable text inputs.
pub const TEXT_INPUT_KIND: &str = "text-input";

/// Capability reference to one editable element in the host UI.
///
/// A handle may go stale at any moment (element destroyed, view recycled).
/// Implementations report staleness through `None`/`false` instead of
/// failing; callers treat it as a no-op.
pub trait FieldHandle: Clone {
    /// Current text of the element, or `None` if the handle is stale.
    fn read_text(&self) -> Option<String>;

    /// Replace the element's whole text. Returns `false` if the handle is stale.
    fn write_text(&self, text: &str) -> bool;

    /// Trigger the host's own paste action on the element.
    ///
    /// Fire-and-forget: the host gives no completion signal and may insert at
    /// the cursor rather than replace the text.
    fn invoke_native_paste(&self);
}

/// Surface the control panel is drawn on.
pub trait PanelSurface {
    fn attach(&mut self, layout: PanelLayout);

    /// Must tolerate being called while not attached.
    fn detach(&mut self);
}

/// Size policy for one panel dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    /// Fit the panel's content
    #[default]
    WrapContent,
    Exact(u32),
}

/// Screen corner the panel is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    BottomStart,
    #[default]
    BottomEnd,
    TopStart,
    TopEnd,
}

/// Placement parameters sent with an attach request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub width: Dimension,
    pub height: Dimension,
    pub anchor: Anchor,
    /// Distance from the anchored edge, in pixels
    pub vertical_offset: i32,
}

impl PanelLayout {
    /// Content-sized panel at `anchor`, shifted by `vertical_offset`.
    pub fn wrap_content(anchor: Anchor, vertical_offset: i32) -> Self {
        Self {
            width: Dimension::WrapContent,
            height: Dimension::WrapContent,
            anchor,
            vertical_offset,
        }
    }
}

/// Screen rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Saturates instead of overflowing on extreme host coordinates.
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Type of an on-screen window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowKind {
    Application,
    /// The virtual keyboard
    InputMethod,
    System,
    AccessibilityOverlay,
    SplitScreenDivider,
}

/// One window in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    #[serde(rename = "type")]
    pub kind: WindowKind,
    pub bounds: Rect,
}

impl WindowInfo {
    pub fn new(kind: WindowKind, bounds: Rect) -> Self {
        Self { kind, bounds }
    }
}

/// Source element of a focus or text-change notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementEvent<F> {
    pub source: Option<F>,
    /// Host class of the element, e.g. `"text-input"`
    pub element_kind: Option<String>,
}

impl<F> ElementEvent<F> {
    pub fn new(source: Option<F>, element_kind: Option<&str>) -> Self {
        Self {
            source,
            element_kind: element_kind.map(str::to_string),
        }
    }

    /// Event from a text-input element.
    pub fn text_input(source: F) -> Self {
        Self::new(Some(source), Some(TEXT_INPUT_KIND))
    }
}

/// Notifications delivered serially by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification<F> {
    Focused(ElementEvent<F>),
    TextChanged(ElementEvent<F>),
    /// The full set of windows currently on screen
    WindowsChanged(Vec<WindowInfo>),
    /// The host is forcibly tearing the service down
    Interrupted,
}

impl<F> Notification<F> {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Focused(_) => "focused",
            Notification::TextChanged(_) => "text-changed",
            Notification::WindowsChanged(_) => "windows-changed",
            Notification::Interrupted => "interrupted",
        }
    }
}
