use crate::error::HotkeyError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

static KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s+]+$").expect("invalid key regex"));

static MODIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("invalid modifier regex"));

/// How key and modifier names are compared when matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Names must be identical, so `Ctrl+A` and `ctrl+a` are different hotkeys.
    #[default]
    Exact,
    /// Names are compared after ASCII lowercasing.
    IgnoreCase,
}

impl MatchPolicy {
    pub fn fold(self, name: &str) -> String {
        match self {
            MatchPolicy::Exact => name.to_string(),
            MatchPolicy::IgnoreCase => name.to_ascii_lowercase(),
        }
    }

    pub fn key_eq(self, a: &str, b: &str) -> bool {
        match self {
            MatchPolicy::Exact => a == b,
            MatchPolicy::IgnoreCase => a.eq_ignore_ascii_case(b),
        }
    }

    /// Fold a modifier list into a set. Duplicates collapse and order is
    /// irrelevant.
    pub fn modifier_set(self, modifiers: &[&str]) -> BTreeSet<String> {
        modifiers.iter().map(|m| self.fold(m)).collect()
    }
}

pub fn validate_key(key: &str) -> Result<(), HotkeyError> {
    if key.is_empty() {
        return Err(HotkeyError::EmptyKey);
    }
    if !KEY_REGEX.is_match(key) {
        return Err(HotkeyError::InvalidKey(key.to_string()));
    }
    Ok(())
}

pub fn validate_modifier(modifier: &str) -> Result<(), HotkeyError> {
    if modifier.is_empty() {
        return Err(HotkeyError::EmptyModifier);
    }
    if !MODIFIER_REGEX.is_match(modifier) {
        return Err(HotkeyError::InvalidModifier(modifier.to_string()));
    }
    Ok(())
}

/// A primary key together with the set of modifiers held with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    key: String,
    modifiers: BTreeSet<String>,
    // lowercased copy used by `MatchPolicy::IgnoreCase`
    folded_modifiers: BTreeSet<String>,
}

impl KeyCombo {
    pub fn new<I, S>(key: impl Into<String>, modifiers: I) -> Result<Self, HotkeyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into();
        validate_key(&key)?;
        let mut set = BTreeSet::new();
        for m in modifiers {
            let m = m.into();
            validate_modifier(&m)?;
            set.insert(m);
        }
        let folded_modifiers = set.iter().map(|m| m.to_ascii_lowercase()).collect();
        Ok(Self {
            key,
            modifiers: set,
            folded_modifiers,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn modifiers(&self) -> &BTreeSet<String> {
        &self.modifiers
    }

    /// Compare against an incoming key event.
    pub fn matches(&self, key: &str, modifiers: &[&str], policy: MatchPolicy) -> bool {
        self.matches_set(key, &policy.modifier_set(modifiers), policy)
    }

    /// Like [`KeyCombo::matches`] with the event modifiers already folded
    /// through [`MatchPolicy::modifier_set`].
    pub fn matches_set(&self, key: &str, folded: &BTreeSet<String>, policy: MatchPolicy) -> bool {
        policy.key_eq(&self.key, key) && self.modifiers_for(policy) == folded
    }

    /// Whether both combos name the same hotkey under `policy`.
    pub fn conflicts_with(&self, other: &KeyCombo, policy: MatchPolicy) -> bool {
        policy.key_eq(&self.key, &other.key)
            && self.modifiers_for(policy) == other.modifiers_for(policy)
    }

    fn modifiers_for(&self, policy: MatchPolicy) -> &BTreeSet<String> {
        match policy {
            MatchPolicy::Exact => &self.modifiers,
            MatchPolicy::IgnoreCase => &self.folded_modifiers,
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.modifiers {
            write!(f, "{}+", m)?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyCombo {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hotkey(s)
    }
}

/// Parse a combination string like "ctrl+shift+o" into a [`KeyCombo`].
///
/// Every token before the last is a modifier and the last token is the
/// primary key. Tokens are trimmed but their case is preserved.
pub fn parse_hotkey(s: &str) -> Result<KeyCombo, HotkeyError> {
    let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
    let key = parts.pop().unwrap_or_default();
    if key.is_empty() {
        return Err(HotkeyError::EmptyKey);
    }
    KeyCombo::new(key, parts)
}

pub fn is_valid_key_combo(input: &str) -> bool {
    parse_hotkey(input).is_ok()
}
