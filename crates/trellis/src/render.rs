use crate::{
    NodeId,
    error::Result,
    geom::{Point, Rect},
    input::focus::FocusManager,
    node::Kind,
    tree::Core,
    widget::Widget,
};

/// The trait implemented by skins. A skin draws one node at a time from its
/// final geometry and state; it never influences layout.
pub trait Skin {
    /// Draw a node. Nodes arrive back to front: parents before children,
    /// earlier siblings before later ones.
    fn draw(&mut self, node: &DrawNode<'_>) -> Result<()>;
}

/// A read-only view of a node handed to a skin.
pub struct DrawNode<'a> {
    /// The node.
    pub id: NodeId,
    /// Node name.
    pub name: &'a str,
    /// Node kind.
    pub kind: &'a Kind,
    /// Bounds in canvas coordinates.
    pub bounds: Rect,
    /// The visible part of `bounds`, after clipping by every ancestor.
    pub clip: Rect,
    /// Depth below the root.
    pub depth: usize,
    /// Holds keyboard focus.
    pub focused: bool,
    /// Under the pointer.
    pub hovered: bool,
    /// Disabled, directly or through an ancestor.
    pub disabled: bool,
    /// Changed since the last render.
    pub dirty: bool,
    /// For scrollbars, the thumb rect in canvas coordinates.
    pub thumb: Option<Rect>,
    /// The widget, for widget nodes.
    pub widget: Option<&'a dyn Widget>,
}

impl Core {
    /// Walk every visible, arranged node back to front and hand it to the
    /// skin, then clear redraw flags. Nodes that were never arranged are
    /// skipped.
    pub fn render(&mut self, skin: &mut dyn Skin) -> Result<()> {
        let Some(root) = self.nodes.get(self.root) else {
            return Ok(());
        };
        let clip = root.bounds;
        let mut drawn = Vec::new();
        self.render_node(skin, self.root, Point::zero(), clip, 0, false, &mut drawn)?;
        for id in drawn {
            if let Some(n) = self.nodes.get_mut(id) {
                n.needs_redraw = false;
            }
        }
        self.redraw = false;
        Ok(())
    }

    /// Draw one node and recurse into its children.
    #[allow(clippy::too_many_arguments)]
    fn render_node(
        &self,
        skin: &mut dyn Skin,
        id: NodeId,
        origin: Point,
        clip: Rect,
        depth: usize,
        disabled: bool,
        drawn: &mut Vec<NodeId>,
    ) -> Result<()> {
        let Some(node) = self.nodes.get(id) else {
            return Ok(());
        };
        let f = node.flags;
        if f.hidden || f.collapsed || !node.layout_done || node.pending_delete {
            return Ok(());
        }
        let bounds = node.bounds.shift(origin.x, origin.y);
        let Some(clip) = bounds.intersect(&clip) else {
            return Ok(());
        };
        let disabled = disabled || f.disabled;
        let thumb = match node.kind {
            Kind::Scrollbar(_) => Some(self.scrollbar_thumb(id)?.shift(bounds.tl.x, bounds.tl.y)),
            _ => None,
        };
        let widget = match &node.kind {
            Kind::Widget(Some(w)) => Some(&**w),
            _ => None,
        };
        skin.draw(&DrawNode {
            id,
            name: &node.name,
            kind: &node.kind,
            bounds,
            clip,
            depth,
            focused: self.is_focused(id),
            hovered: self.input.hovered == Some(id),
            disabled,
            dirty: node.needs_redraw,
            thumb,
            widget,
        })?;
        drawn.push(id);
        for child in &node.children {
            self.render_node(skin, *child, bounds.tl, clip, depth + 1, disabled, drawn)?;
        }
        Ok(())
    }
}
