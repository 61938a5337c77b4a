use std::{any::Any, fmt, mem};

use crate::{
    NodeId,
    context::CoreContext,
    error::Result,
    event::Event,
    geom::Point,
    node::Kind,
    tree::Core,
};

/// The payload exchanged during a drag-and-drop operation.
pub struct Package {
    /// Name drop targets match on.
    pub name: String,
    /// A package that is not draggable never leaves the press point.
    pub draggable: bool,
    /// Opaque payload.
    payload: Option<Box<dyn Any + Send>>,
}

impl Package {
    /// A draggable package with no payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            draggable: true,
            payload: None,
        }
    }

    /// Attach a payload.
    pub fn with_payload<T: Any + Send>(mut self, payload: T) -> Self {
        self.payload = Some(Box::new(payload));
        self
    }

    /// Mark the package as not draggable.
    pub fn fixed(mut self) -> Self {
        self.draggable = false;
        self
    }

    /// Borrow the payload if it has type `T`.
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_ref().and_then(|p| p.downcast_ref())
    }

    /// Take the payload out if it has type `T`.
    pub fn take_payload<T: Any>(&mut self) -> Option<T> {
        match self.payload.take()?.downcast::<T>() {
            Ok(v) => Some(*v),
            Err(other) => {
                self.payload = Some(other);
                None
            }
        }
    }
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("name", &self.name)
            .field("draggable", &self.draggable)
            .field("payload", &self.payload.is_some())
            .finish()
    }
}

/// How a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The package was accepted by the given target.
    Completed(NodeId),
    /// No target accepted the package; it went back to its source.
    Cancelled,
}

/// Drag-and-drop state machine.
#[derive(Debug, Default)]
pub(crate) enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A source offered a package on press; the pointer has not yet moved
    /// past the drag threshold.
    Pending {
        /// The offering node.
        source: NodeId,
        /// The offered package.
        package: Package,
        /// Press position, in canvas coordinates.
        origin: Point,
    },
    /// A drag is underway.
    Dragging {
        /// The offering node.
        source: NodeId,
        /// The package being dragged.
        package: Package,
        /// The drop target currently hovered.
        target: Option<NodeId>,
    },
}

impl DragState {
    /// Drop references to removed nodes. A drag whose source was removed is
    /// abandoned.
    pub(crate) fn forget(&mut self, removed: &[NodeId]) {
        match self {
            Self::Pending { source, .. } | Self::Dragging { source, .. }
                if removed.contains(&*source) =>
            {
                *self = Self::Idle;
            }
            Self::Dragging { target, .. } => {
                if target.is_some_and(|t| removed.contains(&t)) {
                    *target = None;
                }
            }
            _ => {}
        }
    }
}

impl Core {
    /// Is a drag underway?
    pub fn is_dragging(&self) -> bool {
        matches!(self.input.drag, DragState::Dragging { .. })
    }

    /// The drop target currently under a drag.
    pub fn drag_target(&self) -> Option<NodeId> {
        match self.input.drag {
            DragState::Dragging { target, .. } => target,
            _ => None,
        }
    }

    /// How the most recent drag ended.
    pub fn last_drop(&self) -> Option<DropOutcome> {
        self.input.last_drop
    }

    /// Ask the nearest widget at or above `hit` for a package. A widget that
    /// answers stops the search, whether or not its package is draggable.
    pub(crate) fn offer_drag(&mut self, hit: NodeId, pos: Point) -> Result<()> {
        let mut current = Some(hit);
        while let Some(id) = current {
            let node = self.get(id)?;
            current = node.parent;
            if !matches!(node.kind, Kind::Widget(Some(_))) {
                continue;
            }
            let local = self.to_local(id, pos)?;
            let Some(package) = self.with_widget_mut(id, |w, _| w.drag_package(local))? else {
                continue;
            };
            if package.draggable {
                tracing::trace!(?id, name = %package.name, "drag pending");
                self.input.drag = DragState::Pending {
                    source: id,
                    package,
                    origin: pos,
                };
            }
            return Ok(());
        }
        Ok(())
    }

    /// Advance the drag state for a pointer move. Returns true while the drag
    /// owns the pointer.
    pub(crate) fn drag_motion(&mut self, pos: Point) -> Result<bool> {
        match &self.input.drag {
            DragState::Idle => Ok(false),
            DragState::Pending { origin, .. } => {
                let moved = (pos.x - origin.x).unsigned_abs().max((pos.y - origin.y).unsigned_abs());
                if moved <= self.config.drag_threshold {
                    return Ok(false);
                }
                let DragState::Pending {
                    source, package, ..
                } = mem::take(&mut self.input.drag)
                else {
                    return Ok(false);
                };
                tracing::debug!(?source, name = %package.name, "drag started");
                self.input.drag = DragState::Dragging {
                    source,
                    package,
                    target: None,
                };
                self.input.captured = None;
                self.deliver(source, &Event::DragStarted)?;
                self.hover_drag_target(pos)?;
                Ok(true)
            }
            DragState::Dragging { .. } => {
                self.hover_drag_target(pos)?;
                Ok(true)
            }
        }
    }

    /// The drop target under `pos`: the deepest visible node there, or its
    /// nearest ancestor that takes drops.
    fn drop_target_at(&self, pos: Point) -> Option<NodeId> {
        let mut current = self.pick(pos, false);
        while let Some(id) = current {
            let node = self.nodes.get(id)?;
            let takes_drops = match &node.kind {
                Kind::Widget(Some(w)) => w.accepts_drops(),
                Kind::DockArea(_) => true,
                _ => false,
            };
            if takes_drops {
                return Some(id);
            }
            current = node.parent;
        }
        None
    }

    /// Move the hovered drop target, delivering leave, enter and over events.
    fn hover_drag_target(&mut self, pos: Point) -> Result<()> {
        let next = self.drop_target_at(pos);
        let DragState::Dragging {
            target, package, ..
        } = &mut self.input.drag
        else {
            return Ok(());
        };
        let previous = mem::replace(target, next);
        let name = package.name.clone();
        if previous != next {
            if let Some(p) = previous {
                self.deliver(p, &Event::DragLeave)?;
            }
            if let Some(n) = next {
                self.deliver(n, &Event::DragEnter { package: name })?;
            }
        }
        if let Some(n) = next {
            let local = self.to_local(n, pos)?;
            self.deliver(n, &Event::DragOver { pos: local })?;
        }
        Ok(())
    }

    /// Does a drop target take this package?
    fn can_accept(&self, target: NodeId, package: &Package) -> bool {
        match self.nodes.get(target).map(|n| &n.kind) {
            Some(Kind::Widget(Some(w))) => w.can_accept(package),
            Some(Kind::DockArea(_)) => self.dock_can_accept(package),
            _ => false,
        }
    }

    /// Hand a package to a drop target at canvas position `pos`.
    fn handle_drop(&mut self, target: NodeId, package: &Package, pos: Point) -> Result<bool> {
        let local = self.to_local(target, pos)?;
        if matches!(self.get(target)?.kind, Kind::DockArea(_)) {
            return self.dock_drop(target, package, local);
        }
        self.with_widget_mut(target, |w, core| {
            let mut ctx = CoreContext::new(core, target);
            w.handle_drop(package, local, &mut ctx)
        })?
    }

    /// Finish a drag on release. Returns `None` if no drag was underway, in
    /// which case the release is routed normally.
    pub(crate) fn finish_drag(&mut self, pos: Point) -> Result<Option<DropOutcome>> {
        let DragState::Dragging {
            source,
            package,
            target,
        } = mem::take(&mut self.input.drag)
        else {
            self.input.drag = DragState::Idle;
            return Ok(None);
        };
        let target = self.drop_target_at(pos).or(target);
        let accepted = match target {
            Some(t) if self.can_accept(t, &package) => self.handle_drop(t, &package, pos)?,
            _ => false,
        };
        if let Some(t) = target {
            self.deliver(t, &Event::DragLeave)?;
        }
        let outcome = match (accepted, target) {
            (true, Some(t)) => {
                self.deliver(source, &Event::DragCompleted { target: t })?;
                DropOutcome::Completed(t)
            }
            _ => {
                self.deliver(source, &Event::DragCancelled(package))?;
                DropOutcome::Cancelled
            }
        };
        tracing::debug!(?source, ?outcome, "drag finished");
        self.input.last_drop = Some(outcome);
        Ok(Some(outcome))
    }

    /// Abandon a drag, returning the package to its source. Cancelling when
    /// no drag is underway does nothing. Returns true if a drag was cancelled.
    pub fn cancel_drag(&mut self) -> Result<bool> {
        match mem::take(&mut self.input.drag) {
            DragState::Dragging {
                source,
                package,
                target,
            } => {
                if let Some(t) = target {
                    self.deliver(t, &Event::DragLeave)?;
                }
                self.deliver(source, &Event::DragCancelled(package))?;
                self.input.last_drop = Some(DropOutcome::Cancelled);
                tracing::debug!(?source, "drag cancelled");
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
