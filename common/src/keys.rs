use serde::{Deserialize, Serialize};
use std::fmt;

/// A key as delivered by the input device, before shift is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Other,
}

/// A key after normalization. This is what command bindings match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    /// Sentinel for keys outside the supported set. Never bound.
    Unsupported,
}

impl Key {
    pub fn as_char(self) -> Option<char> {
        match self {
            Key::Char(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_digit(self) -> bool {
        matches!(self, Key::Char(c) if c.is_ascii_digit())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => f.pad("space"),
            Key::Char(c) => f.pad(c.encode_utf8(&mut [0; 4])),
            Key::Enter => f.pad("enter"),
            Key::Esc => f.pad("esc"),
            Key::Backspace => f.pad("bksp"),
            Key::Unsupported => f.pad("?"),
        }
    }
}

/// Apply the shift modifier to a raw key code (US layout).
///
/// Letters map to lower case unless shifted. Digits and unshifted
/// punctuation map to their shifted symbol when shift is held. Characters
/// that are already shifted symbols pass through unchanged, so terminals that
/// report both the symbol and the modifier normalize the same way as those
/// that only report the symbol. Anything outside printable ASCII is
/// `Key::Unsupported`.
pub fn normalize(code: KeyCode, shift: bool) -> Key {
    match code {
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            if shift {
                Key::Char(c.to_ascii_uppercase())
            } else {
                Key::Char(c.to_ascii_lowercase())
            }
        }
        KeyCode::Char(' ') => Key::Char(' '),
        KeyCode::Char(c) if c.is_ascii_graphic() => {
            if shift {
                Key::Char(shifted_symbol(c).unwrap_or(c))
            } else {
                Key::Char(c)
            }
        }
        KeyCode::Char(_) => Key::Unsupported,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab | KeyCode::Other => Key::Unsupported,
    }
}

fn shifted_symbol(c: char) -> Option<char> {
    let shifted = match c {
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        '-' => '_',
        '=' => '+',
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        ';' => ':',
        '\'' => '"',
        ',' => '<',
        '.' => '>',
        '/' => '?',
        '`' => '~',
        _ => return None,
    };
    Some(shifted)
}
