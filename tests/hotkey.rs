use aicodex::hotkey::{is_valid_key_combo, parse_hotkey, KeyCombo, MatchPolicy};
use aicodex::HotkeyError;

#[test]
fn parse_single_key() {
    let hk = parse_hotkey("F2").expect("should parse F2");
    assert_eq!(hk.key(), "F2");
    assert!(hk.modifiers().is_empty());
}

#[test]
fn parse_combo_hotkey() {
    let hk = parse_hotkey("ctrl+shift+o").expect("should parse combination");
    assert_eq!(hk.key(), "o");
    assert!(hk.modifiers().contains("ctrl"));
    assert!(hk.modifiers().contains("shift"));
    assert_eq!(hk.modifiers().len(), 2);
}

#[test]
fn parse_trims_and_keeps_case() {
    let hk = parse_hotkey(" Ctrl + Shift + A ").unwrap();
    assert_eq!(hk.key(), "A");
    assert!(hk.modifiers().contains("Ctrl"));
    assert!(hk.modifiers().contains("Shift"));
}

#[test]
fn duplicate_modifiers_collapse() {
    let hk = parse_hotkey("ctrl+ctrl+a").unwrap();
    assert_eq!(hk.modifiers().len(), 1);
    assert_eq!(hk, KeyCombo::new("a", ["ctrl"]).unwrap());
}

#[test]
fn parse_invalid_hotkey() {
    assert_eq!(parse_hotkey(""), Err(HotkeyError::EmptyKey));
    assert_eq!(parse_hotkey("ctrl+"), Err(HotkeyError::EmptyKey));
    assert_eq!(parse_hotkey("ctrl++a"), Err(HotkeyError::EmptyModifier));
    assert_eq!(
        parse_hotkey("ctrl-alt+a"),
        Err(HotkeyError::InvalidModifier("ctrl-alt".into()))
    );
    assert!(!is_valid_key_combo("+"));
    assert!(is_valid_key_combo("alt+F4"));
}

#[test]
fn key_with_whitespace_is_rejected() {
    assert_eq!(
        KeyCombo::new("page down", Vec::<String>::new()),
        Err(HotkeyError::InvalidKey("page down".into()))
    );
}

#[test]
fn from_str_matches_parse() {
    let combo: KeyCombo = "shift+ctrl+s".parse().unwrap();
    assert_eq!(combo.to_string(), "ctrl+shift+s");
}

#[test]
fn modifier_order_is_irrelevant() {
    let combo = parse_hotkey("ctrl+shift+s").unwrap();
    assert!(combo.matches("s", &["shift", "ctrl"], MatchPolicy::Exact));
    assert!(combo.matches("s", &["shift", "ctrl", "shift"], MatchPolicy::Exact));
    assert!(!combo.matches("s", &["ctrl"], MatchPolicy::Exact));
    assert!(!combo.matches("S", &["ctrl", "shift"], MatchPolicy::Exact));
}
