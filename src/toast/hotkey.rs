// SPDX-License-Identifier: MPL-2.0
//! Keyboard shortcut that expands and focuses the toast stack.

use crate::error::{Error, Result};
use iced::keyboard::{self, key::Named, Key, Modifiers};
use std::fmt;
use std::str::FromStr;

/// Non-modifier part of a shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyKey {
    /// Single character, stored lowercase.
    Char(String),
    Named(Named),
}

/// A modifier set plus one key, e.g. `Alt+T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    modifiers: Modifiers,
    key: HotkeyKey,
}

impl Default for Hotkey {
    fn default() -> Self {
        Self {
            modifiers: Modifiers::ALT,
            key: HotkeyKey::Char("t".to_string()),
        }
    }
}

impl Hotkey {
    #[must_use]
    pub fn new(modifiers: Modifiers, key: HotkeyKey) -> Self {
        Self { modifiers, key }
    }

    /// Whether a key press triggers this shortcut.
    ///
    /// Every configured modifier must be held; extra modifiers are allowed.
    #[must_use]
    pub fn matches(&self, key: &Key, modifiers: Modifiers) -> bool {
        if !modifiers.contains(self.modifiers) {
            return false;
        }
        match (&self.key, key) {
            (HotkeyKey::Char(expected), Key::Character(pressed)) => {
                pressed.as_str().to_lowercase() == *expected
            }
            (HotkeyKey::Named(expected), Key::Named(pressed)) => expected == pressed,
            _ => false,
        }
    }

    /// Human readable form used for the stack's accessible label.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Modifiers::CTRL, "Ctrl"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::LOGO, "Meta"),
        ];
        for (modifier, name) in names {
            if self.modifiers.contains(modifier) {
                write!(f, "{name}+")?;
            }
        }
        match &self.key {
            HotkeyKey::Char(c) => f.write_str(&c.to_uppercase()),
            HotkeyKey::Named(named) => write!(f, "{named:?}"),
        }
    }
}

impl FromStr for Hotkey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut modifiers = Modifiers::empty();
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "" => return Err(Error::Config(format!("empty hotkey segment in `{s}`"))),
                "alt" | "option" => modifiers.insert(Modifiers::ALT),
                "ctrl" | "control" => modifiers.insert(Modifiers::CTRL),
                "shift" => modifiers.insert(Modifiers::SHIFT),
                "meta" | "super" | "cmd" | "logo" => modifiers.insert(Modifiers::LOGO),
                other => {
                    if key.is_some() {
                        return Err(Error::Config(format!("hotkey `{s}` names more than one key")));
                    }
                    key = Some(parse_key(other).ok_or_else(|| {
                        Error::Config(format!("unknown key `{part}` in hotkey `{s}`"))
                    })?);
                }
            }
        }

        let key = key.ok_or_else(|| Error::Config(format!("hotkey `{s}` has no key")))?;
        Ok(Self { modifiers, key })
    }
}

fn parse_key(name: &str) -> Option<HotkeyKey> {
    // Accept DOM-style codes such as `KeyT` and `Digit1`.
    let name = name
        .strip_prefix("key")
        .or_else(|| name.strip_prefix("digit"))
        .filter(|rest| rest.chars().count() == 1)
        .unwrap_or(name);

    if name.chars().count() == 1 {
        return Some(HotkeyKey::Char(name.to_string()));
    }

    let named = match name {
        "escape" | "esc" => Named::Escape,
        "enter" => Named::Enter,
        "space" => Named::Space,
        "tab" => Named::Tab,
        "f1" => Named::F1,
        "f2" => Named::F2,
        "f3" => Named::F3,
        "f4" => Named::F4,
        "f5" => Named::F5,
        "f6" => Named::F6,
        "f7" => Named::F7,
        "f8" => Named::F8,
        "f9" => Named::F9,
        "f10" => Named::F10,
        "f11" => Named::F11,
        "f12" => Named::F12,
        _ => return None,
    };
    Some(HotkeyKey::Named(named))
}

/// Escape collapses a focused stack.
#[must_use]
pub fn is_escape(key: &Key) -> bool {
    matches!(key, keyboard::Key::Named(Named::Escape))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_key(c: &str) -> Key {
        Key::Character(c.into())
    }

    #[test]
    fn default_is_alt_t() {
        let hotkey = Hotkey::default();
        assert_eq!(hotkey.label(), "Alt+T");
        assert!(hotkey.matches(&char_key("t"), Modifiers::ALT));
        assert!(hotkey.matches(&char_key("T"), Modifiers::ALT | Modifiers::SHIFT));
        assert!(!hotkey.matches(&char_key("t"), Modifiers::empty()));
        assert!(!hotkey.matches(&char_key("y"), Modifiers::ALT));
    }

    #[test]
    fn parses_modifiers_and_dom_codes() {
        let hotkey: Hotkey = "Ctrl+Shift+KeyK".parse().unwrap();
        assert_eq!(
            hotkey,
            Hotkey::new(
                Modifiers::CTRL | Modifiers::SHIFT,
                HotkeyKey::Char("k".into())
            )
        );
        assert_eq!(hotkey.label(), "Ctrl+Shift+K");
    }

    #[test]
    fn parses_named_keys() {
        let hotkey: Hotkey = "alt+F2".parse().unwrap();
        assert!(hotkey.matches(&Key::Named(Named::F2), Modifiers::ALT));
    }

    #[test]
    fn rejects_malformed_shortcuts() {
        assert!("Alt+".parse::<Hotkey>().is_err());
        assert!("Alt".parse::<Hotkey>().is_err());
        assert!("A+B".parse::<Hotkey>().is_err());
        assert!("Alt+Banana".parse::<Hotkey>().is_err());
    }

    #[test]
    fn escape_detection() {
        assert!(is_escape(&Key::Named(Named::Escape)));
        assert!(!is_escape(&char_key("e")));
    }
}
