//! keyboard-extension-core
//!
//! Coordination logic for a floating control panel that accompanies the
//! on-screen keyboard and acts on the focused text field.
//!
//! The host platform feeds notifications (focus, text changes, window
//! snapshots, interruption) and button presses into a `KeyboardExtension`.
//! The extension keeps track of the target field, shows or hides the panel as
//! the keyboard comes and goes, and runs three commands on the field:
//! paste, diacritic folding and a single-slot undo.
//!
//! Public API:
//! - `KeyboardExtension` - Context object with `start`/`stop`, notification routing and commands
//! - `FieldHandle` / `PanelSurface` - Capabilities the host implements
//! - `FoldTable` / `normalize` - Multi-script diacritic folding
//! - `UndoSlot` - Single-slot undo with exchange semantics
//! - `Config` - TOML-backed configuration
//! - `sim` - In-memory host for tests and tooling

pub mod config;
pub use config::{Config, ConfigError};

pub mod fold;
pub use fold::{normalize, FoldGroup, FoldTable};

pub mod host;
pub use host::{
    Anchor, Dimension, ElementEvent, FieldHandle, Notification, PanelLayout, PanelSurface, Rect,
    WindowInfo, WindowKind, TEXT_INPUT_KIND,
};

pub mod focus;
pub use focus::FocusTracker;

pub mod undo;
pub use undo::{UndoPolicy, UndoSlot};

pub mod visibility;
pub use visibility::{PanelRequest, VisibilityController, VisibilityState};

pub mod extension;
pub use extension::{Command, CommandOutcome, KeyboardExtension};

pub mod sim;
