use crate::actions::{ActionOutput, QuickAction};
use crate::hotkey::KeyCombo;
use crate::overlay::{Overlay, OverlayConfig};
use crate::registry::{Binding, HotkeyAction, HotkeyRegistry};
use crate::settings::Settings;
use crate::snippets::SnippetStore;
use std::sync::{Arc, Mutex};

/// One companion session: the hotkey registry plus the overlay and snippet
/// state its actions operate on.
pub struct Companion {
    settings: Settings,
    registry: HotkeyRegistry,
    overlay: Overlay,
    snippets: Arc<Mutex<SnippetStore>>,
    output: ActionOutput,
    running: bool,
}

impl Companion {
    pub fn new(settings: Settings) -> Self {
        Self::with_output(settings, ActionOutput::default())
    }

    pub fn with_output(settings: Settings, output: ActionOutput) -> Self {
        let overlay = Overlay::new(OverlayConfig::from(&settings.window));
        let snippets = SnippetStore::from_settings(&settings.snippets);
        Self {
            registry: HotkeyRegistry::with_policy(settings.match_policy()),
            overlay,
            snippets: Arc::new(Mutex::new(snippets)),
            output,
            running: false,
            settings,
        }
    }

    /// Register every hotkey from the settings. Returns how many were
    /// registered; a second call while running registers nothing.
    pub fn start(&mut self) -> usize {
        if self.running {
            tracing::debug!("companion already running");
            return 0;
        }
        let mut count = 0;
        for (name, combo) in self.settings.hotkey_combos() {
            let binding = match QuickAction::from_name(&name) {
                Ok(action) => Binding::from_combo(combo.clone())
                    .with_hotkey_action(Some(self.action_for(action)))
                    .with_description(action.label()),
                Err(e) => {
                    tracing::warn!("{e}; hotkey {combo} will do nothing");
                    Binding::from_combo(combo.clone()).with_description(name.clone())
                }
            };
            if self.registry.register(binding) {
                tracing::info!("Registered hotkey: {combo} ({name})");
                count += 1;
            } else {
                tracing::warn!("Failed to register hotkey {combo} ({name}): already bound");
            }
        }
        self.running = true;
        count
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        for binding in self.registry.list() {
            tracing::info!("Unregistered hotkey: {}", binding.combo());
        }
        self.registry.clear();
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle_key(&self, key: &str, modifiers: &[&str]) -> bool {
        self.registry.process(key, modifiers)
    }

    pub fn handle_combo(&self, combo: &KeyCombo) -> bool {
        self.registry.process_combo(combo)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &HotkeyRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HotkeyRegistry {
        &mut self.registry
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Run a closure while holding the snippet store lock.
    pub fn with_snippets<R>(&self, f: impl FnOnce(&mut SnippetStore) -> R) -> R {
        match self.snippets.lock() {
            Ok(mut s) => f(&mut s),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    fn action_for(&self, action: QuickAction) -> HotkeyAction {
        match action {
            QuickAction::ToggleOverlay => {
                let overlay = self.overlay.clone();
                HotkeyAction::new(move || {
                    overlay.toggle();
                })
            }
            QuickAction::InsertSnippet => {
                let snippets = self.snippets.clone();
                let output = self.output.clone();
                HotkeyAction::new(move || {
                    let code = match snippets.lock() {
                        Ok(s) => s.first().map(|s| s.code.clone()),
                        Err(poisoned) => poisoned.into_inner().first().map(|s| s.code.clone()),
                    };
                    match code {
                        Some(code) => output.emit(&code),
                        None => output.emit("No snippets configured"),
                    }
                })
            }
            other => {
                let output = self.output.clone();
                let label = other.label();
                HotkeyAction::new(move || output.emit(&format!("{label} action")))
            }
        }
    }
}
