//! Keyboard input primitives.
use std::ops::Add;

/// Modifier key state.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift is active.
    pub shift: bool,
    /// Control is active.
    pub ctrl: bool,
    /// Alt is active.
    pub alt: bool,
}

impl Add<KeyCode> for Mods {
    type Output = Key;

    fn add(self, key: KeyCode) -> Self::Output {
        Key { mods: self, key }
    }
}

impl Add<char> for Mods {
    type Output = Key;

    fn add(self, other: char) -> Self::Output {
        Key {
            mods: self,
            key: other.into(),
        }
    }
}

impl Add<Self> for Mods {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            shift: self.shift || other.shift,
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
        }
    }
}

/// No modifiers pressed.
#[allow(non_upper_case_globals)]
pub const Empty: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: false,
};

/// Shift-only modifier state.
#[allow(non_upper_case_globals)]
pub const Shift: Mods = Mods {
    shift: true,
    ctrl: false,
    alt: false,
};

/// Control-only modifier state.
#[allow(non_upper_case_globals)]
pub const Ctrl: Mods = Mods {
    shift: false,
    ctrl: true,
    alt: false,
};

/// Alt-only modifier state.
#[allow(non_upper_case_globals)]
pub const Alt: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: true,
};

/// Logical key codes.
#[derive(Debug, PartialOrd, PartialEq, Hash, Eq, Clone, Copy)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Enter/return key.
    Enter,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up key.
    PageUp,
    /// Page down key.
    PageDown,
    /// Tab key.
    Tab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
    /// F key. `F(1)` is F1.
    F(u8),
    /// A character. Space is `Char(' ')`.
    Char(char),
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

/// A keystroke along with modifiers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Key {
    /// Modifier state.
    pub mods: Mods,
    /// Key code.
    pub key: KeyCode,
}

impl Key {
    /// Normalise a keystroke for accelerator matching. Letters compare
    /// case-insensitively and carry shift as an explicit modifier, so
    /// "shift + a", "shift + A" and "A" all become "shift + a". Shift on
    /// anything else is kept as-is.
    pub fn normalize(&self) -> Self {
        match self.key {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => Self {
                mods: Mods {
                    shift: self.mods.shift || c.is_ascii_uppercase(),
                    ..self.mods
                },
                key: KeyCode::Char(c.to_ascii_lowercase()),
            },
            _ => *self,
        }
    }
}

impl PartialEq<KeyCode> for Key {
    fn eq(&self, c: &KeyCode) -> bool {
        // If there are modifiers, we never match.
        if self.mods != Empty {
            return false;
        }
        *c == self.key
    }
}

impl PartialEq<char> for Key {
    fn eq(&self, c: &char) -> bool {
        *self == KeyCode::Char(*c)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self {
            mods: Empty,
            key: KeyCode::Char(c),
        }
    }
}

impl From<KeyCode> for Key {
    fn from(c: KeyCode) -> Self {
        Self {
            mods: Empty,
            key: c,
        }
    }
}
