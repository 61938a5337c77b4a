use std::str::FromStr;

use crate::{
    NodeId,
    error::{Error, Result},
    event::{
        Event,
        key::{Key, KeyCode, Mods},
    },
    input::focus::FocusManager,
    tree::Core,
};

/// An accelerator bound to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Normalised keystroke.
    pub key: Key,
    /// Name delivered in [`Event::Accelerator`].
    pub name: String,
    /// Fires regardless of where focus is.
    pub global: bool,
}

/// A parsed accelerator chord such as `"Ctrl+Shift+S"` or `"F5"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chord(pub Key);

impl FromStr for Chord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::Accelerator(s.to_string());
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        // "Ctrl++" binds the plus key.
        if s.ends_with("++") {
            parts.truncate(parts.len().saturating_sub(2));
            parts.push("+");
        }
        let (last, mods) = parts.split_last().ok_or_else(bad)?;
        let mut m = Mods::default();
        for part in mods {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => m.ctrl = true,
                "shift" => m.shift = true,
                "alt" => m.alt = true,
                _ => return Err(bad()),
            }
        }
        let code = parse_key(last).ok_or_else(bad)?;
        Ok(Self(Key { mods: m, key: code }.normalize()))
    }
}

/// Parse a single key name.
fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c.to_ascii_lowercase()));
    }
    let lower = s.to_ascii_lowercase();
    Some(match lower.as_str() {
        "backspace" => KeyCode::Backspace,
        "enter" | "return" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "tab" => KeyCode::Tab,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        _ => {
            let n: u8 = lower.strip_prefix('f')?.parse().ok()?;
            if !(1..=24).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
    })
}

impl Core {
    /// Bind an accelerator that fires while `node` or one of its descendants
    /// holds focus.
    pub fn add_accelerator(&mut self, node: NodeId, chord: &str, name: impl Into<String>) -> Result<()> {
        self.bind(node, chord, name.into(), false)
    }

    /// Bind an accelerator that fires wherever focus is, as long as `node` is
    /// visible and enabled.
    pub fn add_global_accelerator(
        &mut self,
        node: NodeId,
        chord: &str,
        name: impl Into<String>,
    ) -> Result<()> {
        self.bind(node, chord, name.into(), true)
    }

    /// Remove every binding for `chord` on `node`.
    pub fn remove_accelerator(&mut self, node: NodeId, chord: &str) -> Result<()> {
        let Chord(key) = chord.parse()?;
        self.get_mut(node)?.accelerators.retain(|b| b.key != key);
        Ok(())
    }

    /// Record a binding.
    fn bind(&mut self, node: NodeId, chord: &str, name: String, global: bool) -> Result<()> {
        let Chord(key) = chord.parse()?;
        self.get_mut(node)?.accelerators.push(Binding { key, name, global });
        Ok(())
    }

    /// The first binding on `node` matching `key`.
    fn binding_for(&self, node: NodeId, key: Key, global_only: bool) -> Option<String> {
        self.nodes
            .get(node)?
            .accelerators
            .iter()
            .find(|b| b.key == key && (!global_only || b.global))
            .map(|b| b.name.clone())
    }

    /// Route a keystroke to accelerators: first from the focused node up to
    /// the root, then global bindings anywhere in the visible tree in
    /// pre-order. The first match fires. Returns true if one did.
    pub(crate) fn route_accelerator(&mut self, key: Key) -> Result<bool> {
        let key = key.normalize();
        let mut current = self.focus();
        while let Some(id) = current {
            if self.is_enabled(id)
                && let Some(name) = self.binding_for(id, key, false)
            {
                return self.fire_accelerator(id, name);
            }
            current = self.parent(id);
        }
        for id in self.walk(self.root) {
            if !self.is_visible(id) || !self.is_enabled(id) {
                continue;
            }
            if let Some(name) = self.binding_for(id, key, true) {
                return self.fire_accelerator(id, name);
            }
        }
        Ok(false)
    }

    /// Deliver a matched accelerator.
    fn fire_accelerator(&mut self, id: NodeId, name: String) -> Result<bool> {
        tracing::debug!(?id, %name, "accelerator");
        self.deliver(id, &Event::Accelerator(name))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::key::{Alt, Ctrl, Empty, Shift};

    fn chord(s: &str) -> Key {
        s.parse::<Chord>().map(|c| c.0).unwrap()
    }

    #[test]
    fn parse_chords() {
        assert_eq!(chord("Ctrl+S"), Ctrl + 's');
        assert_eq!(chord("ctrl + shift + s"), Ctrl + Shift + 's');
        assert_eq!(chord("Alt+F4"), Alt + KeyCode::F(4));
        assert_eq!(chord("Esc"), Empty + KeyCode::Esc);
        assert_eq!(chord("Ctrl+Space"), Ctrl + ' ');
        assert_eq!(chord("Ctrl++"), Ctrl + '+');
        for bad in ["", "Ctrl+", "Hyper+x", "F0", "F25", "Ctrl+Nope"] {
            assert!(matches!(bad.parse::<Chord>(), Err(Error::Accelerator(_))), "{bad}");
        }
    }
}
