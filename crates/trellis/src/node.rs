use crate::{
    NodeId,
    dock::DockArea,
    geom::{Expanse, Rect},
    input::accel::Binding,
    layout::Layout,
    resize::{Dragger, Resizable, Resizer},
    scroll::{ScrollRegion, Scrollbar},
    split::{Split, SplitterBar},
    widget::Widget,
};

/// What a node is. Containers and widgets use the default dock layout; every
/// other kind carries the state of a built-in composite.
pub enum Kind {
    /// A plain container.
    Container,
    /// A node with user behaviour. The slot is empty while the widget is
    /// borrowed for a callback.
    Widget(Option<Box<dyn Widget>>),
    /// A scrolling viewport over a content child.
    ScrollRegion(ScrollRegion),
    /// A scroll region's scrollbar.
    Scrollbar(Scrollbar),
    /// A container split into fixed sections.
    Split(Split),
    /// The draggable bar between split sections.
    SplitterBar(SplitterBar),
    /// A handle that resizes its target when dragged.
    Resizer(Resizer),
    /// A handle that moves its target when dragged.
    Dragger(Dragger),
    /// A window framed by eight resizers.
    Resizable(Resizable),
    /// A dockable area with lazily created edge branches.
    DockArea(DockArea),
}

impl Kind {
    /// A short name for dumps, logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Widget(_) => "widget",
            Self::ScrollRegion(_) => "scroll",
            Self::Scrollbar(_) => "scrollbar",
            Self::Split(_) => "split",
            Self::SplitterBar(_) => "splitter",
            Self::Resizer(_) => "resizer",
            Self::Dragger(_) => "dragger",
            Self::Resizable(_) => "resizable",
            Self::DockArea(_) => "dock",
        }
    }

    /// Is `child` a part this composite built for itself? Such parts live
    /// and die with their owner.
    pub(crate) fn owns(&self, child: NodeId) -> bool {
        match self {
            Self::ScrollRegion(s) => [s.content, s.h_bar, s.v_bar].contains(&child),
            Self::Resizable(r) => r.content == child || r.resizers.contains(&child),
            Self::Split(s) => s.bars.contains(&Some(child)),
            Self::DockArea(d) => d.center == child,
            _ => false,
        }
    }

    /// Forget `child` in any slot that names it.
    pub(crate) fn release(&mut self, child: NodeId) {
        let slots = match self {
            Self::Split(s) => &mut s.sections,
            Self::DockArea(d) => &mut d.branches,
            _ => return,
        };
        for slot in slots.iter_mut().filter(|s| **s == Some(child)) {
            *slot = None;
        }
    }
}

/// Behavioural flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    /// Not drawn and not hit, but still occupies layout space.
    pub hidden: bool,
    /// Removed from layout entirely.
    pub collapsed: bool,
    /// Receives no input; excluded from tab order.
    pub disabled: bool,
    /// Part of the tab cycle.
    pub tabable: bool,
    /// Eligible as a hit-test result.
    pub pointer_input: bool,
    /// Eligible for keyboard focus.
    pub keyboard_input: bool,
    /// Re-laid-out in isolation once its first layout has completed.
    pub virtual_control: bool,
    /// Closed by a press outside its bounds.
    pub popup: bool,
}

/// Node data stored in the arena.
pub struct Node {
    /// Kind and kind-specific state.
    pub(crate) kind: Kind,
    /// Name for lookup and dumps.
    pub(crate) name: String,

    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in insertion order. Later children draw on top.
    pub(crate) children: Vec<NodeId>,

    /// Layout properties.
    pub(crate) layout: Layout,
    /// Behavioural flags.
    pub(crate) flags: Flags,

    /// Layout is dirty.
    pub(crate) needs_layout: bool,
    /// At least one arrange has completed.
    pub(crate) layout_done: bool,
    /// Size requested by the last measure, margins included.
    pub(crate) measured: Expanse,
    /// The available size passed to the last measure.
    pub(crate) measured_with: Option<Expanse>,
    /// The slot passed to the last arrange.
    pub(crate) slot: Option<Rect>,
    /// Bounds relative to the parent, margins excluded.
    pub(crate) bounds: Rect,

    /// Bounds or appearance changed since the last render.
    pub(crate) needs_redraw: bool,
    /// Detached and waiting to be purged.
    pub(crate) pending_delete: bool,

    /// Keyboard accelerators bound on this node.
    pub(crate) accelerators: Vec<Binding>,
}

impl Node {
    /// A fresh, detached node.
    pub(crate) fn new(kind: Kind, layout: Layout) -> Self {
        Self {
            kind,
            name: String::new(),
            parent: None,
            children: Vec::new(),
            layout,
            flags: Flags::default(),
            needs_layout: true,
            layout_done: false,
            measured: Expanse::default(),
            measured_with: None,
            slot: None,
            bounds: Rect::zero(),
            needs_redraw: true,
            pending_delete: false,
            accelerators: Vec::new(),
        }
    }

    /// Return the node's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the node's kind.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the layout properties.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Return the behavioural flags.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Bounds relative to the parent.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Bounds in the node's own coordinate space.
    pub fn render_bounds(&self) -> Rect {
        Rect::new(0, 0, self.bounds.w, self.bounds.h)
    }

    /// The size requested by the last measure, margins included.
    pub fn measured(&self) -> Expanse {
        self.measured
    }

    /// Is the layout dirty?
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Has the node been arranged at least once?
    pub fn layout_done(&self) -> bool {
        self.layout_done
    }

    /// Is the node waiting to be purged?
    pub fn pending_delete(&self) -> bool {
        self.pending_delete
    }
}
