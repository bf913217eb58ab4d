/// Malformed input rejected at a boundary call before any registry state is
/// touched. Duplicate registrations and missing bindings are not errors; the
/// registry reports those through its boolean returns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotkeyError {
    #[error("hotkey key must not be empty")]
    EmptyKey,
    #[error("invalid hotkey key '{0}'")]
    InvalidKey(String),
    #[error("hotkey modifier must not be empty")]
    EmptyModifier,
    #[error("invalid hotkey modifier '{0}'")]
    InvalidModifier(String),
    #[error("unknown action '{0}'")]
    UnknownAction(String),
}
