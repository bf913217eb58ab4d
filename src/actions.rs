use crate::error::HotkeyError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Actions that can be bound to a hotkey from the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickAction {
    ToggleOverlay,
    InsertSnippet,
    FormatCode,
    GenerateDocstring,
    RefactorSelection,
}

impl QuickAction {
    pub const ALL: [QuickAction; 5] = [
        QuickAction::ToggleOverlay,
        QuickAction::InsertSnippet,
        QuickAction::FormatCode,
        QuickAction::GenerateDocstring,
        QuickAction::RefactorSelection,
    ];

    pub fn from_name(name: &str) -> Result<Self, HotkeyError> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| HotkeyError::UnknownAction(name.to_string()))
    }

    /// Identifier used as the key in the `hotkeys` settings map.
    pub fn name(self) -> &'static str {
        match self {
            QuickAction::ToggleOverlay => "toggle_overlay",
            QuickAction::InsertSnippet => "insert_snippet",
            QuickAction::FormatCode => "format_code",
            QuickAction::GenerateDocstring => "generate_docstring",
            QuickAction::RefactorSelection => "refactor_selection",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuickAction::ToggleOverlay => "Toggle Overlay",
            QuickAction::InsertSnippet => "Insert Snippet",
            QuickAction::FormatCode => "Format Code",
            QuickAction::GenerateDocstring => "Generate Docstring",
            QuickAction::RefactorSelection => "Refactor Selection",
        }
    }
}

/// Where actions that produce text send it.
#[derive(Debug, Clone, Default)]
pub enum ActionOutput {
    #[default]
    Log,
    Capture(Arc<Mutex<Vec<String>>>),
}

impl ActionOutput {
    pub fn capture() -> (Self, Arc<Mutex<Vec<String>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (ActionOutput::Capture(buf.clone()), buf)
    }

    pub fn emit(&self, text: &str) {
        match self {
            ActionOutput::Log => tracing::info!("{text}"),
            ActionOutput::Capture(buf) => match buf.lock() {
                Ok(mut b) => b.push(text.to_string()),
                Err(poisoned) => poisoned.into_inner().push(text.to_string()),
            },
        }
    }
}
