use crate::hotkey::{parse_hotkey, KeyCombo, MatchPolicy};
use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_SETTINGS_FILE: &str = "config/default_settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WindowSettings {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_position")]
    pub x_position: i32,
    #[serde(default = "default_position")]
    pub y_position: i32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// When false the overlay refuses to become visible.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            x_position: default_position(),
            y_position: default_position(),
            opacity: default_opacity(),
            enabled: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SnippetSettings {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ThemeSettings {
    pub background: String,
    pub foreground: String,
    pub accent: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            background: "#2b2b2b".into(),
            foreground: "#ffffff".into(),
            accent: "#007acc".into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeatureSettings {
    #[serde(default = "default_true")]
    pub handbrake_integration: bool,
    #[serde(default = "default_true")]
    pub auto_format: bool,
    #[serde(default = "default_true")]
    pub snippet_suggestions: bool,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            handbrake_integration: true,
            auto_format: true,
            snippet_suggestions: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub window: WindowSettings,
    /// Map of action name to key combination string, e.g.
    /// `"toggle_overlay": "ctrl+shift+o"`. File order is kept; it decides
    /// which action wins when two share a combination.
    #[serde(default = "default_hotkeys")]
    pub hotkeys: LinkedHashMap<String, String>,
    #[serde(default = "default_snippets")]
    pub snippets: Vec<SnippetSettings>,
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default)]
    pub features: FeatureSettings,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file receiving a copy of the log output.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Compare hotkey names exactly. When false `Ctrl+A` and `ctrl+a` are the
    /// same hotkey.
    #[serde(default = "default_true")]
    pub case_sensitive_hotkeys: bool,
    /// Any other top-level keys, kept so they survive a save.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_true() -> bool {
    true
}

fn default_width() -> u32 {
    400
}

fn default_height() -> u32 {
    600
}

fn default_position() -> i32 {
    100
}

fn default_opacity() -> f32 {
    0.95
}

fn default_hotkeys() -> LinkedHashMap<String, String> {
    [
        ("toggle_overlay", "ctrl+shift+o"),
        ("insert_snippet", "ctrl+shift+s"),
        ("format_code", "ctrl+shift+f"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_snippets() -> Vec<SnippetSettings> {
    vec![
        SnippetSettings {
            name: "Python Function".into(),
            code: "def function_name(param):\n    \"\"\"Docstring\"\"\"\n    pass".into(),
        },
        SnippetSettings {
            name: "JavaScript Function".into(),
            code: "function functionName(param) {\n    // Comment\n    return value;\n}".into(),
        },
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            hotkeys: default_hotkeys(),
            snippets: default_snippets(),
            theme: ThemeSettings::default(),
            features: FeatureSettings::default(),
            debug_logging: false,
            log_file: None,
            case_sensitive_hotkeys: true,
            extra: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing or empty file yields the defaults;
    /// malformed JSON is an error.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read any top-level entry of the settings blob, typed sections
    /// included.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        if let Some(v) = self.extra.get(key) {
            return Some(v.clone());
        }
        serde_json::to_value(self).ok()?.get(key).cloned()
    }

    /// Write a top-level entry. Names of typed sections (`window`,
    /// `hotkeys`, ...) replace that section and must deserialize into it;
    /// on error the settings are left unchanged.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> anyhow::Result<()> {
        let key = key.into();
        let value = value.into();
        let mut blob = serde_json::to_value(&*self)?;
        let typed = !self.extra.contains_key(&key)
            && blob.as_object().is_some_and(|o| o.contains_key(&key));
        if !typed {
            self.extra.insert(key, value);
            return Ok(());
        }
        blob[key.as_str()] = value;
        *self = serde_json::from_value(blob)?;
        Ok(())
    }

    /// Like [`Settings::load`] but falls back to the defaults, handing back
    /// the load error so it can be reported once logging is up.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<anyhow::Error>) {
        match Self::load(path) {
            Ok(s) => (s, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn match_policy(&self) -> MatchPolicy {
        if self.case_sensitive_hotkeys {
            MatchPolicy::Exact
        } else {
            MatchPolicy::IgnoreCase
        }
    }

    /// Parse every configured hotkey in file order. Entries that do not
    /// parse are skipped with a warning.
    pub fn hotkey_combos(&self) -> Vec<(String, KeyCombo)> {
        self.hotkeys
            .iter()
            .filter_map(|(action, combo)| match parse_hotkey(combo) {
                Ok(k) => Some((action.clone(), k)),
                Err(e) => {
                    tracing::warn!(
                        "provided hotkey string '{}' for '{}' is invalid: {}; ignoring",
                        combo,
                        action,
                        e
                    );
                    None
                }
            })
            .collect()
    }
}
