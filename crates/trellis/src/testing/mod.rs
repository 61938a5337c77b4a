//! Test utilities: a harness that drives a canvas like a host would, probe
//! widgets that record what they receive, and a recording skin.

/// The canvas test harness.
pub mod harness;
/// Probe widgets.
pub mod probe;

use crate::{
    NodeId,
    error::Result,
    geom::Rect,
    render::{DrawNode, Skin},
};

/// A skin that records what it is asked to draw.
#[derive(Debug, Default)]
pub struct RecordingSkin {
    /// Drawn nodes in order, with their canvas bounds.
    pub drawn: Vec<(NodeId, String, Rect)>,
}

impl RecordingSkin {
    /// Names of drawn nodes, in draw order. Unnamed nodes are skipped.
    pub fn names(&self) -> Vec<&str> {
        self.drawn
            .iter()
            .filter(|(_, n, _)| !n.is_empty())
            .map(|(_, n, _)| n.as_str())
            .collect()
    }
}

impl Skin for RecordingSkin {
    fn draw(&mut self, node: &DrawNode<'_>) -> Result<()> {
        self.drawn.push((node.id, node.name.to_string(), node.bounds));
        Ok(())
    }
}
