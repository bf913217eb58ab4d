use crate::error::HotkeyError;
use crate::hotkey::{validate_key, validate_modifier, KeyCombo, MatchPolicy};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Zero-argument callback bound to a hotkey.
///
/// Actions run synchronously on the thread that calls
/// [`HotkeyRegistry::process`]. Anything that may block should hand its work
/// off to another thread.
#[derive(Clone)]
pub struct HotkeyAction(Arc<dyn Fn() + Send + Sync>);

impl HotkeyAction {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn invoke(&self) {
        (self.0)()
    }
}

impl fmt::Debug for HotkeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HotkeyAction(..)")
    }
}

#[derive(Debug, Clone)]
pub struct Binding {
    combo: KeyCombo,
    action: Option<HotkeyAction>,
    description: String,
}

impl Binding {
    /// Build a binding without an action. Fails if the key or a modifier is
    /// malformed.
    pub fn new<I, S>(key: impl Into<String>, modifiers: I) -> Result<Self, HotkeyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::from_combo(KeyCombo::new(key, modifiers)?))
    }

    pub fn from_combo(combo: KeyCombo) -> Self {
        Self {
            combo,
            action: None,
            description: String::new(),
        }
    }

    pub fn with_action(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.action = Some(HotkeyAction::new(f));
        self
    }

    pub fn with_hotkey_action(mut self, action: Option<HotkeyAction>) -> Self {
        self.action = action;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn combo(&self) -> &KeyCombo {
        &self.combo
    }

    pub fn key(&self) -> &str {
        self.combo.key()
    }

    pub fn modifiers(&self) -> &BTreeSet<String> {
        self.combo.modifiers()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Run the bound action. Returns `false` for a dead binding.
    pub fn trigger(&self) -> bool {
        match &self.action {
            Some(action) => {
                action.invoke();
                true
            }
            None => false,
        }
    }
}

/// Ordered set of hotkey bindings with a global on/off switch.
///
/// No two bindings share the same `(key, modifiers)` pair under the
/// registry's [`MatchPolicy`]. The registry has no internal locking; callers
/// delivering events from another thread wrap it in
/// [`SharedRegistry`](crate::dispatch::SharedRegistry) or move it onto a
/// [`Dispatcher`](crate::dispatch::Dispatcher).
#[derive(Debug)]
pub struct HotkeyRegistry {
    bindings: Vec<Binding>,
    enabled: bool,
    policy: MatchPolicy,
}

impl HotkeyRegistry {
    pub fn new() -> Self {
        Self::with_policy(MatchPolicy::Exact)
    }

    pub fn with_policy(policy: MatchPolicy) -> Self {
        Self {
            bindings: Vec::new(),
            enabled: true,
            policy,
        }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Add `binding` unless its key combination is already taken. An existing
    /// binding is never replaced.
    pub fn register(&mut self, binding: Binding) -> bool {
        let policy = self.policy;
        if self
            .bindings
            .iter()
            .any(|b| b.combo.conflicts_with(&binding.combo, policy))
        {
            return false;
        }
        self.bindings.push(binding);
        true
    }

    /// Remove the first binding matching `key` and `modifiers`.
    pub fn unregister(&mut self, key: &str, modifiers: &[&str]) -> bool {
        let policy = self.policy;
        let folded = policy.modifier_set(modifiers);
        match self
            .bindings
            .iter()
            .position(|b| b.combo.matches_set(key, &folded, policy))
        {
            Some(pos) => {
                self.bindings.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn unregister_combo(&mut self, combo: &KeyCombo) -> bool {
        let mods: Vec<&str> = combo.modifiers().iter().map(String::as_str).collect();
        self.unregister(combo.key(), &mods)
    }

    /// Dispatch a key event to the first matching binding.
    ///
    /// Returns `true` only when a binding matched and had an action to run.
    /// A disabled registry returns `false` without scanning.
    pub fn process(&self, key: &str, modifiers: &[&str]) -> bool {
        if !self.enabled {
            return false;
        }
        self.find(key, modifiers).map_or(false, Binding::trigger)
    }

    /// [`HotkeyRegistry::process`] for raw input from an input source.
    /// Malformed keys or modifiers are rejected before the registry is
    /// consulted.
    pub fn try_process(&self, key: &str, modifiers: &[&str]) -> Result<bool, HotkeyError> {
        validate_event(key, modifiers)?;
        Ok(self.process(key, modifiers))
    }

    /// [`HotkeyRegistry::unregister`] for raw input; malformed input is
    /// rejected without touching the bindings.
    pub fn try_unregister(&mut self, key: &str, modifiers: &[&str]) -> Result<bool, HotkeyError> {
        validate_event(key, modifiers)?;
        Ok(self.unregister(key, modifiers))
    }

    pub fn process_combo(&self, combo: &KeyCombo) -> bool {
        let mods: Vec<&str> = combo.modifiers().iter().map(String::as_str).collect();
        self.process(combo.key(), &mods)
    }

    /// Look up a binding regardless of the enabled flag.
    pub fn find(&self, key: &str, modifiers: &[&str]) -> Option<&Binding> {
        let policy = self.policy;
        let folded = policy.modifier_set(modifiers);
        self.bindings
            .iter()
            .find(|b| b.combo.matches_set(key, &folded, policy))
    }

    /// Snapshot of the bindings in registration order.
    pub fn list(&self) -> Vec<Binding> {
        self.bindings.clone()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

fn validate_event(key: &str, modifiers: &[&str]) -> Result<(), HotkeyError> {
    validate_key(key)?;
    modifiers.iter().try_for_each(|m| validate_modifier(m))
}

impl Default for HotkeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_binding_matches_but_does_not_trigger() {
        let mut registry = HotkeyRegistry::default();
        assert!(registry.register(Binding::new("a", Vec::<String>::new()).unwrap()));
        assert!(registry.find("a", &[]).is_some());
        assert!(!registry.process("a", &[]));
    }
}
