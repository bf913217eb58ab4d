//! Core of the AicodeX companion overlay: hotkey bindings and their dispatch,
//! plus the settings, overlay, snippet and action state those hotkeys drive.

pub mod actions;
pub mod companion;
pub mod dispatch;
pub mod error;
pub mod hotkey;
pub mod logging;
pub mod overlay;
pub mod registry;
pub mod settings;
pub mod snippets;

pub use companion::Companion;
pub use error::HotkeyError;
pub use hotkey::{parse_hotkey, KeyCombo, MatchPolicy};
pub use registry::{Binding, HotkeyAction, HotkeyRegistry};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
