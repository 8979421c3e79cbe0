// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Platform-neutral keyboard events for the tree view.
//!
//! A [`KeyEvent`] carries the key, the held modifiers, and whether a text input had focus when it
//! was pressed.  Navigation shortcuts only apply when no text input is focused.

use std::fmt;
use std::str::FromStr;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModifierKeys: u8 {
        const CAPSLOCK = 1 << 0;
        const SHIFT    = 1 << 1;
        const CONTROL  = 1 << 2;
        const OPTION   = 1 << 3;
        const COMMAND  = 1 << 4;
        const NUMPAD   = 1 << 5;
        const HELP     = 1 << 6;
        const FUNCTION = 1 << 7;
    }
}

impl ModifierKeys {
    /// Modifiers that change what a key means.  Caps lock and the numpad flag do not.
    pub fn chord(self) -> Self {
        self & (Self::SHIFT | Self::CONTROL | Self::OPTION | Self::COMMAND | Self::FUNCTION)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Delete,
    Char(char),
}

impl Key {
    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        )
    }

    /// True for the given letter in either case.
    pub fn is_letter(self, letter: char) -> bool {
        matches!(self, Key::Char(c) if c.eq_ignore_ascii_case(&letter))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError(String);

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized key `{}`", self.0)
    }
}

impl std::error::Error for ParseKeyError {}

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_lowercase().as_str() {
            "arrowup" | "up" => Key::ArrowUp,
            "arrowdown" | "down" => Key::ArrowDown,
            "arrowleft" | "left" => Key::ArrowLeft,
            "arrowright" | "right" => Key::ArrowRight,
            "escape" | "esc" => Key::Escape,
            "enter" | "return" => Key::Enter,
            "delete" | "del" | "backspace" => Key::Delete,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(ParseKeyError(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: ModifierKeys,
    /// Set when a text field had focus; such keys belong to the field.
    pub text_input_focused: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: ModifierKeys::empty(),
            text_input_focused: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: ModifierKeys) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn in_text_input(mut self) -> Self {
        self.text_input_focused = true;
        self
    }

    /// No chord modifiers held.
    pub fn is_plain(&self) -> bool {
        self.modifiers.chord().is_empty()
    }

    /// Control on Linux/Windows or Command on macOS.
    pub fn has_primary(&self) -> bool {
        self.modifiers
            .intersects(ModifierKeys::CONTROL | ModifierKeys::COMMAND)
    }

    pub fn has_shift(&self) -> bool {
        self.modifiers.contains(ModifierKeys::SHIFT)
    }
}

impl FromStr for KeyEvent {
    type Err = ParseKeyError;

    /// Parses chords like `ArrowUp`, `ctrl+z` or `cmd+shift+z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key_part = parts.pop().filter(|part| !part.is_empty());
        let Some(key_part) = key_part else {
            return Err(ParseKeyError(s.to_string()));
        };

        let mut modifiers = ModifierKeys::empty();
        for part in parts {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "shift" => ModifierKeys::SHIFT,
                "ctrl" | "control" => ModifierKeys::CONTROL,
                "alt" | "option" => ModifierKeys::OPTION,
                "cmd" | "command" | "meta" => ModifierKeys::COMMAND,
                "fn" => ModifierKeys::FUNCTION,
                _ => return Err(ParseKeyError(s.to_string())),
            };
        }

        Ok(KeyEvent::new(key_part.parse()?).with_modifiers(modifiers))
    }
}


// End of File
