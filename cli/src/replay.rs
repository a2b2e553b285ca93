//! Scripted session replay against the simulated host.
//!
//! A script declares the fields on screen, the clipboard content and a list of
//! steps. Each step is either a host notification, a user action on the
//! simulated UI, or a panel command:
//!
//! ```json
//! {
//!   "clipboard": " world",
//!   "fields": [{ "id": "message", "text": "Hello" }],
//!   "steps": [
//!     { "op": "focus", "field": "message" },
//!     { "op": "keyboard", "height": 480 },
//!     { "op": "command", "command": "normalize" },
//!     { "op": "command", "command": "undo" },
//!     { "op": "windows", "windows": [] }
//!   ]
//! }
//! ```

use anyhow::{bail, Context, Result};
use keyboard_extension_core::sim::{keyboard_window, PanelEvent, SimField, SimHost, SimPanel};
use keyboard_extension_core::{
    Command, CommandOutcome, Config, ElementEvent, KeyboardExtension, Notification, WindowInfo,
    TEXT_INPUT_KIND,
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub clipboard: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    TEXT_INPUT_KIND.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Focus notification for a declared field
    Focus { field: String },
    /// Text-change notification for a declared field
    TextChanged { field: String },
    /// User edits the field directly (no notification)
    Type { field: String, text: String },
    /// Full window snapshot
    Windows { windows: Vec<WindowInfo> },
    /// Snapshot containing only a keyboard of the given height
    Keyboard { height: i32 },
    Interrupt,
    /// Remove the field from the UI tree; its handle goes stale
    Destroy { field: String },
    Clipboard { text: String },
    Command { command: Command },
}

/// State observed after one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: usize,
    pub outcome: Option<CommandOutcome>,
    pub fields: Vec<(String, Option<String>)>,
    pub undo_slot: Option<String>,
    pub panel: Vec<PanelEvent>,
}

struct Session {
    host: SimHost,
    fields: Vec<(String, SimField)>,
    extension: KeyboardExtension<SimField, SimPanel>,
}

impl Session {
    fn new(script: &Script, config: Config) -> Self {
        let host = SimHost::new();
        host.set_clipboard(&script.clipboard);
        let fields = script
            .fields
            .iter()
            .map(|spec| (spec.id.clone(), host.add_field(&spec.kind, &spec.text)))
            .collect();
        let mut extension = KeyboardExtension::new(config, SimPanel::new());
        extension.start();
        Self {
            host,
            fields,
            extension,
        }
    }

    fn field(&self, id: &str) -> Result<SimField> {
        match self.fields.iter().find(|(name, _)| name == id) {
            Some((_, field)) => Ok(field.clone()),
            None => bail!("unknown field '{}'", id),
        }
    }

    fn element_event(&self, id: &str) -> Result<ElementEvent<SimField>> {
        let field = self.field(id)?;
        let kind = field.kind();
        Ok(ElementEvent {
            source: field.is_alive().then_some(field),
            element_kind: kind,
        })
    }

    fn apply(&mut self, step: &Step) -> Result<Option<CommandOutcome>> {
        match step {
            Step::Focus { field } => {
                let event = self.element_event(field)?;
                self.extension
                    .handle_notification(Notification::Focused(event));
            }
            Step::TextChanged { field } => {
                let event = self.element_event(field)?;
                self.extension
                    .handle_notification(Notification::TextChanged(event));
            }
            Step::Type { field, text } => {
                let handle = self.field(field)?;
                self.host.set_text(&handle, text);
            }
            Step::Windows { windows } => {
                self.extension
                    .handle_notification(Notification::WindowsChanged(windows.clone()));
            }
            Step::Keyboard { height } => {
                self.extension
                    .handle_notification(Notification::WindowsChanged(vec![
                        keyboard_window(*height),
                    ]));
            }
            Step::Interrupt => self.extension.handle_notification(Notification::Interrupted),
            Step::Destroy { field } => {
                let handle = self.field(field)?;
                self.host.destroy(&handle);
            }
            Step::Clipboard { text } => self.host.set_clipboard(text),
            Step::Command { command } => return Ok(Some(self.extension.execute(*command))),
        }
        Ok(None)
    }

    fn report(&mut self, step: usize, outcome: Option<CommandOutcome>) -> StepReport {
        StepReport {
            step,
            outcome,
            fields: self
                .fields
                .iter()
                .map(|(id, field)| (id.clone(), self.host.text_of(field)))
                .collect(),
            undo_slot: self.extension.undo_slot().peek().map(str::to_string),
            panel: self.extension.panel_mut().drain_events(),
        }
    }
}

/// Run every step and collect the state after each one.
pub fn replay(script: &Script, config: Config) -> Result<Vec<StepReport>> {
    let mut session = Session::new(script, config);
    let mut reports = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        let outcome = session
            .apply(step)
            .with_context(|| format!("step {}", index + 1))?;
        reports.push(session.report(index + 1, outcome));
    }
    session.extension.stop();
    Ok(reports)
}

pub fn parse_script(content: &str) -> Result<Script> {
    serde_json::from_str(content).context("parsing replay script")
}

fn print_report(step: &Step, report: &StepReport) {
    println!("[{}] {:?}", report.step, step);
    if let Some(outcome) = report.outcome {
        println!("    outcome: {:?}", outcome);
    }
    for (id, text) in &report.fields {
        match text {
            Some(text) => println!("    field {}: {:?}", id, text),
            None => println!("    field {}: (destroyed)", id),
        }
    }
    match &report.undo_slot {
        Some(slot) => println!("    undo slot: {:?}", slot),
        None => println!("    undo slot: (empty)"),
    }
    for event in &report.panel {
        match event {
            PanelEvent::Attached(layout) => println!(
                "    panel: attach anchor={:?} offset={}",
                layout.anchor, layout.vertical_offset
            ),
            PanelEvent::Detached => println!("    panel: detach"),
        }
    }
}

pub fn run(path: &Path, config: Config) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let script = parse_script(&content)?;
    info!(steps = script.steps.len(), fields = script.fields.len(), "replaying script");

    let reports = replay(&script, config)?;
    for (step, report) in script.steps.iter().zip(&reports) {
        print_report(step, report);
    }
    Ok(())
}
