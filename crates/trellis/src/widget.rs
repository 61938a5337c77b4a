//! Widget trait and event outcome types.

use std::any::{Any, type_name};

use crate::{
    context::Context,
    error::Result,
    event::Event,
    geom::{Expanse, Point},
    input::drag::Package,
};

/// The result of an event handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was processed and propagation stops.
    Handle,
    /// The event was processed without a state change and propagation stops.
    Consume,
    /// The event was not handled and will bubble up the tree.
    Ignore,
}

/// Behaviour attached to a widget node.
///
/// Methods fall into optional capabilities. Every method has a default, so a
/// widget implements only what it takes part in:
///
/// - content sizing: [`Widget::measure`]
/// - input: [`Widget::on_event`]
/// - drag source: [`Widget::drag_package`]
/// - drop target: [`Widget::accepts_drops`], [`Widget::can_accept`],
///   [`Widget::handle_drop`]
/// - teardown: [`Widget::on_unmount`]
pub trait Widget: Any + Send {
    /// Intrinsic content size given the space available inside the node's
    /// padding. Children are measured separately; the node's content size is
    /// the larger of the two.
    fn measure(&self, _available: Expanse) -> Expanse {
        Expanse::default()
    }

    /// Handle an event.
    fn on_event(&mut self, _event: &Event, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Offer a package when the primary button is pressed at `pos`. Returning
    /// `None` means this widget is not a drag source at that point.
    fn drag_package(&mut self, _pos: Point) -> Option<Package> {
        None
    }

    /// Whether this widget is a drop target at all.
    fn accepts_drops(&self) -> bool {
        false
    }

    /// Whether this drop target takes the given package.
    fn can_accept(&self, _package: &Package) -> bool {
        false
    }

    /// Receive a dropped package at local position `pos`. Returns `true` if
    /// the drop succeeded.
    fn handle_drop(
        &mut self,
        _package: &Package,
        _pos: Point,
        _ctx: &mut dyn Context,
    ) -> Result<bool> {
        Ok(false)
    }

    /// Called once when the node is purged from the tree.
    fn on_unmount(&mut self) {}

    /// Name used in dumps and logs.
    fn name(&self) -> String {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name).to_string()
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
