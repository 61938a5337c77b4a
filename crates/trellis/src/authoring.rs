//! Declarative construction. A [`NodeSpec`] describes a subtree; building it
//! only calls the public construction and setter operations on [`Core`].

use serde::{Deserialize, Serialize};

use crate::{
    NodeId,
    dock::DockSide,
    error::{Error, Result},
    geom::{Axis, Edges, Expanse, Rect},
    layout::{Align, DesiredBounds, Dock, Layout},
    split::SplitMode,
    tree::Core,
    widget::Widget,
};

/// Resolves widget names in a description to widget instances.
pub trait WidgetFactory {
    /// Create the named widget, or `None` if the name is unknown.
    fn create(&self, name: &str) -> Option<Box<dyn Widget>>;
}

impl<F> WidgetFactory for F
where
    F: Fn(&str) -> Option<Box<dyn Widget>>,
{
    fn create(&self, name: &str) -> Option<Box<dyn Widget>> {
        self(name)
    }
}

/// The kind of node to build.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KindSpec {
    /// A plain container.
    #[default]
    Container,
    /// A widget produced by the factory.
    Widget {
        /// Factory name.
        widget: String,
    },
    /// A scroll region. Children go into its content.
    Scroll {
        /// Allow horizontal scrolling.
        #[serde(default = "yes")]
        horizontal: bool,
        /// Allow vertical scrolling.
        #[serde(default = "yes")]
        vertical: bool,
    },
    /// A split. Children fill sections in order.
    Split {
        /// Section arrangement.
        #[serde(default)]
        mode: SplitMode,
        /// Horizontal and vertical bar fractions.
        #[serde(default)]
        fraction: Option<[f32; 2]>,
    },
    /// A dock area. Children are docked on their `panel` side, or placed in
    /// the center.
    Dock,
    /// A resizable window at the node's x/y/w/h. Children go into its
    /// content.
    Resizable {
        /// Keep the window inside its parent while resizing.
        #[serde(default)]
        clamp: bool,
    },
}

/// Serde default helper.
fn yes() -> bool {
    true
}

/// An accelerator binding in a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccelSpec {
    /// Chord, e.g. `"Ctrl+S"`.
    pub chord: String,
    /// Name delivered when the chord fires.
    pub name: String,
    /// Fire regardless of focus.
    #[serde(default)]
    pub global: bool,
}

/// A node and its subtree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeSpec {
    /// Node name.
    pub name: Option<String>,
    /// Node kind.
    pub kind: KindSpec,
    /// Docking mode.
    pub dock: Dock,
    /// Horizontal alignment.
    pub h_align: Align,
    /// Vertical alignment.
    pub v_align: Align,
    /// Margin as `[left, top, right, bottom]`.
    pub margin: Option<[u32; 4]>,
    /// Padding as `[left, top, right, bottom]`.
    pub padding: Option<[u32; 4]>,
    /// Desired left edge.
    pub x: Option<i32>,
    /// Desired top edge.
    pub y: Option<i32>,
    /// Desired width.
    pub w: Option<u32>,
    /// Desired height.
    pub h: Option<u32>,
    /// Minimum size as `[w, h]`.
    pub min: Option<[u32; 2]>,
    /// Maximum size as `[w, h]`.
    pub max: Option<[u32; 2]>,
    /// Start hidden.
    pub hidden: bool,
    /// Start collapsed.
    pub collapsed: bool,
    /// Start disabled.
    pub disabled: bool,
    /// Join the tab cycle.
    pub tabable: bool,
    /// Accept pointer input.
    pub pointer: bool,
    /// Side to dock on, when the parent is a dock area.
    pub panel: Option<DockSide>,
    /// Accelerator bindings.
    pub accelerators: Vec<AccelSpec>,
    /// Child nodes.
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// The layout this description asks for.
    fn layout(&self) -> Layout {
        let edges = |e: Option<[u32; 4]>| e.map_or_else(Edges::zero, |[l, t, r, b]| Edges::new(l, t, r, b));
        let mut layout = Layout::new()
            .dock(self.dock)
            .align(self.h_align, self.v_align)
            .margin(edges(self.margin))
            .padding(edges(self.padding));
        layout.desired = DesiredBounds {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        };
        if let Some([w, h]) = self.min {
            layout.min = Expanse::new(w, h);
        }
        if let Some([w, h]) = self.max {
            layout.max = Expanse::new(w, h);
        }
        layout
    }
}

/// Parse a description from JSON.
pub fn parse(json: &str) -> Result<NodeSpec> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a description and build it under `parent`.
pub fn load_json(
    core: &mut Core,
    parent: NodeId,
    json: &str,
    factory: &dyn WidgetFactory,
) -> Result<NodeId> {
    let spec = parse(json)?;
    build(core, parent, &spec, factory)
}

/// Build a description as the last child of `parent`.
pub fn build(
    core: &mut Core,
    parent: NodeId,
    spec: &NodeSpec,
    factory: &dyn WidgetFactory,
) -> Result<NodeId> {
    let layout = spec.layout();
    let id = match &spec.kind {
        KindSpec::Container => core.add_container(parent, layout)?,
        KindSpec::Widget { widget } => {
            let w = factory
                .create(widget)
                .ok_or_else(|| Error::Parse(format!("unknown widget: {widget}")))?;
            core.add_widget(parent, layout, w)?
        }
        KindSpec::Scroll {
            horizontal,
            vertical,
        } => {
            let id = core.add_scroll_region(parent, layout)?;
            core.set_scroll_enabled(id, Axis::Horizontal, *horizontal)?;
            core.set_scroll_enabled(id, Axis::Vertical, *vertical)?;
            id
        }
        KindSpec::Split { mode, fraction } => {
            let id = core.add_split(parent, layout, *mode)?;
            if let Some([h, v]) = fraction {
                core.set_split_fraction(id, Axis::Horizontal, *h)?;
                core.set_split_fraction(id, Axis::Vertical, *v)?;
            }
            id
        }
        KindSpec::Dock => core.add_dock_area(parent, layout)?,
        KindSpec::Resizable { clamp } => {
            let rect = Rect::new(
                spec.x.unwrap_or(0),
                spec.y.unwrap_or(0),
                spec.w.unwrap_or(0),
                spec.h.unwrap_or(0),
            );
            core.add_resizable(parent, rect, *clamp)?
        }
    };

    if let Some(name) = &spec.name {
        core.set_name(id, name.clone())?;
    }
    core.set_hidden(id, spec.hidden)?;
    core.set_collapsed(id, spec.collapsed)?;
    core.set_disabled(id, spec.disabled)?;
    if spec.tabable {
        core.set_tabable(id, true)?;
    }
    if spec.pointer {
        core.set_pointer_input(id, true)?;
    }
    for a in &spec.accelerators {
        if a.global {
            core.add_global_accelerator(id, &a.chord, a.name.clone())?;
        } else {
            core.add_accelerator(id, &a.chord, a.name.clone())?;
        }
    }

    for child in &spec.children {
        match &spec.kind {
            KindSpec::Container | KindSpec::Widget { .. } => {
                build(core, id, child, factory)?;
            }
            KindSpec::Scroll { .. } => {
                let content = core.scroll_content(id)?;
                build(core, content, child, factory)?;
            }
            KindSpec::Resizable { .. } => {
                let content = core.resizable_content(id)?;
                build(core, content, child, factory)?;
            }
            KindSpec::Split { .. } => {
                let c = build(core, id, child, factory)?;
                core.detach(c)?;
                core.add_section(id, c)?;
            }
            KindSpec::Dock => {
                let center = core.dock_center(id)?;
                let c = build(core, center, child, factory)?;
                if let Some(side) = child.panel.filter(|s| *s != DockSide::Center) {
                    core.detach(c)?;
                    core.dock_panel(id, side, c)?;
                }
            }
        }
    }
    tracing::trace!(?id, kind = ?spec.kind, "built node");
    Ok(id)
}
