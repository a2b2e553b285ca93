//! The keyboard extension context object.
//!
//! `KeyboardExtension` ties the focus tracker, undo slot, visibility
//! controller and fold table together. The host feeds it notifications and
//! panel button presses, one at a time, from a single dispatch context.
//!
//! ```
//! use keyboard_extension_core::sim::{SimHost, SimPanel};
//! use keyboard_extension_core::{Command, Config, ElementEvent, KeyboardExtension, Notification};
//!
//! let host = SimHost::new();
//! let field = host.add_text_input("Café");
//!
//! let mut ext = KeyboardExtension::new(Config::default(), SimPanel::new());
//! ext.start();
//! ext.handle_notification(Notification::Focused(ElementEvent::text_input(field.clone())));
//! ext.execute(Command::Normalize);
//! assert_eq!(host.text_of(&field).as_deref(), Some("cafe"));
//! ```

use crate::config::Config;
use crate::focus::FocusTracker;
use crate::fold::FoldTable;
use crate::host::{FieldHandle, Notification, PanelSurface};
use crate::undo::UndoSlot;
use crate::visibility::{PanelRequest, VisibilityController, VisibilityState};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// User-invocable panel actions, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Undo,
    Paste,
    Normalize,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::Undo, Command::Paste, Command::Normalize];

    pub fn id(&self) -> &'static str {
        match self {
            Command::Undo => "undo",
            Command::Paste => "paste",
            Command::Normalize => "normalize",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// What a command did. Informational only; none of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// No text input has been focused yet
    NoField,
    /// The remembered field no longer exists
    StaleField,
    /// Undo with an empty slot
    NothingToUndo,
}

pub struct KeyboardExtension<F: FieldHandle, P: PanelSurface> {
    focus: FocusTracker<F>,
    undo: UndoSlot,
    visibility: VisibilityController,
    fold: FoldTable,
    panel: P,
    running: bool,
}

impl<F: FieldHandle, P: PanelSurface> KeyboardExtension<F, P> {
    pub fn new(config: Config, panel: P) -> Self {
        let fold = config.fold_table();
        Self {
            focus: FocusTracker::with_kinds(config.text_input_kinds),
            undo: UndoSlot::with_policy(config.undo_policy),
            visibility: VisibilityController::with_placement(
                config.panel_anchor,
                config.panel_extra_offset,
            ),
            fold,
            panel,
            running: false,
        }
    }

    /// Begin accepting notifications.
    pub fn start(&mut self) {
        if !self.running {
            debug!("keyboard extension started");
            self.running = true;
        }
    }

    /// Detach the panel if shown and forget focus and undo state.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        if let Some(request) = self.visibility.hide() {
            self.apply(request);
        }
        self.focus.clear();
        self.undo.clear();
        self.running = false;
        debug!("keyboard extension stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Route one host notification. Ignored while stopped.
    pub fn handle_notification(&mut self, notification: Notification<F>) {
        if !self.running {
            trace!(kind = notification.kind(), "notification while stopped");
            return;
        }
        match notification {
            Notification::Focused(event) | Notification::TextChanged(event) => {
                if self.focus.observe(&event) {
                    trace!("tracking new text field");
                }
            }
            Notification::WindowsChanged(windows) => {
                if let Some(request) = self.visibility.observe(&windows) {
                    self.apply(request);
                }
            }
            Notification::Interrupted => {
                let request = self.visibility.interrupt();
                self.apply(request);
            }
        }
    }

    /// Run a panel command against the current field.
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        let Some(field) = self.focus.current_field().cloned() else {
            debug!(%command, "no field focused");
            return CommandOutcome::NoField;
        };
        let outcome = match command {
            Command::Paste => self.paste(&field),
            Command::Normalize => self.normalize(&field),
            Command::Undo => self.undo(&field),
        };
        debug!(%command, ?outcome, "command executed");
        outcome
    }

    fn paste(&mut self, field: &F) -> CommandOutcome {
        let Some(before) = field.read_text() else {
            return CommandOutcome::StaleField;
        };
        self.undo.record(before);
        field.invoke_native_paste();
        CommandOutcome::Applied
    }

    fn normalize(&mut self, field: &F) -> CommandOutcome {
        let Some(before) = field.read_text() else {
            return CommandOutcome::StaleField;
        };
        let folded = self.fold.fold(&before);
        self.undo.record(before);
        if field.write_text(&folded) {
            CommandOutcome::Applied
        } else {
            CommandOutcome::StaleField
        }
    }

    fn undo(&mut self, field: &F) -> CommandOutcome {
        if !self.undo.is_set() {
            return CommandOutcome::NothingToUndo;
        }
        let Some(before) = field.read_text() else {
            return CommandOutcome::StaleField;
        };
        // Slot takes the pre-undo text before the field is rewritten
        let Some(restore) = self.undo.exchange(before) else {
            return CommandOutcome::NothingToUndo;
        };
        if field.write_text(&restore) {
            CommandOutcome::Applied
        } else {
            CommandOutcome::StaleField
        }
    }

    pub fn current_field(&self) -> Option<&F> {
        self.focus.current_field()
    }

    pub fn undo_slot(&self) -> &UndoSlot {
        &self.undo
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility.state()
    }

    pub fn fold_table(&self) -> &FoldTable {
        &self.fold
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    fn apply(&mut self, request: PanelRequest) {
        match request {
            PanelRequest::Attach(layout) => self.panel.attach(layout),
            PanelRequest::Detach => self.panel.detach(),
        }
    }
}
