//! Engine tunables. Every field has a default, so a host only needs to spell
//! out what it changes.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunable constants for layout and input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Thickness of scroll region scrollbars.
    pub scrollbar_thickness: u32,
    /// Thickness of the bars between split sections.
    pub splitter_bar_size: u32,
    /// Thickness of the resize handles around a resizable window.
    pub resizer_border: u32,
    /// Distance the pointer must travel from a press before a drag starts.
    pub drag_threshold: u32,
    /// Pixels scrolled per unit of wheel delta.
    pub wheel_step: u32,
    /// Initial extent of a freshly created dock branch.
    pub dock_default_size: u32,
    /// Fraction of a dock area's extent, from each edge, that targets that
    /// edge when a panel is dropped.
    pub dock_edge_fraction: f32,
    /// Upper bound on scrollbar negotiation iterations.
    pub scroll_iterations: u32,
    /// Whether Tab and Shift+Tab move focus.
    pub tab_key_navigation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scrollbar_thickness: 13,
            splitter_bar_size: 5,
            resizer_border: 6,
            drag_threshold: 5,
            wheel_step: 20,
            dock_default_size: 200,
            dock_edge_fraction: 0.25,
            scroll_iterations: 3,
            tab_key_navigation: true,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn partial_json_keeps_defaults() -> Result<()> {
        let c = Config::from_json(r#"{"scrollbar_thickness": 9, "tab_key_navigation": false}"#)?;
        assert_eq!(c.scrollbar_thickness, 9);
        assert!(!c.tab_key_navigation);
        assert_eq!(c.splitter_bar_size, Config::default().splitter_bar_size);
        Ok(())
    }

    #[test]
    fn unknown_fields_rejected() {
        let e = Config::from_json(r#"{"scrollbar_thikness": 9}"#);
        assert!(matches!(e, Err(Error::Parse(_))));
    }

    #[test]
    fn roundtrip() -> Result<()> {
        let c = Config {
            wheel_step: 3,
            ..Config::default()
        };
        assert_eq!(Config::from_json(&c.to_json()?)?, c);
        Ok(())
    }
}
