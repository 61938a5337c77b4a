//! The input router: hit-testing, hover, pointer capture, focus, tab
//! cycling, accelerators and drag-and-drop, all driven from raw host events.

/// Accelerator chords and routing.
pub mod accel;
/// Drag-and-drop state machine.
pub mod drag;
/// Keyboard focus and the tab cycle.
pub mod focus;
/// Hit-testing.
mod hit;

use std::mem;

use crate::{
    NodeId,
    error::Result,
    event::{
        Event,
        key::{Key, KeyCode},
        pointer::Button,
    },
    geom::{Axis, Point},
    node::Kind,
    tree::Core,
    widget::EventOutcome,
};

use drag::{DragState, DropOutcome};
use focus::FocusManager;

/// Router state owned by the tree. Every field is written only by the router.
#[derive(Debug, Default)]
pub(crate) struct InputState {
    /// Keyboard focus holder.
    pub(crate) focus: Option<NodeId>,
    /// Node under the pointer.
    pub(crate) hovered: Option<NodeId>,
    /// Node holding the pointer capture while a button is down.
    pub(crate) captured: Option<NodeId>,
    /// Last known pointer position, in canvas coordinates.
    pub(crate) pointer: Point,
    /// Drag-and-drop state.
    pub(crate) drag: DragState,
    /// How the most recent drag ended.
    pub(crate) last_drop: Option<DropOutcome>,
}

impl InputState {
    /// Drop every reference to removed nodes.
    pub(crate) fn forget(&mut self, removed: &[NodeId]) {
        for slot in [&mut self.focus, &mut self.hovered, &mut self.captured] {
            if slot.is_some_and(|id| removed.contains(&id)) {
                *slot = None;
            }
        }
        self.drag.forget(removed);
    }
}

/// Built-in behaviour for engine node kinds.
#[derive(Clone, Copy)]
enum Engine {
    /// Resizes its target.
    Resizer,
    /// Moves its target.
    Dragger,
    /// Moves a split fraction.
    Splitter,
    /// Scrolls its region.
    Scrollbar,
    /// Scrolls on wheel input.
    Region,
}

impl Core {
    /// Handle an event on a built-in node kind.
    pub(crate) fn engine_event(&mut self, id: NodeId, event: &Event) -> Result<EventOutcome> {
        let engine = match self.get(id)?.kind {
            Kind::Resizer(_) => Engine::Resizer,
            Kind::Dragger(_) => Engine::Dragger,
            Kind::SplitterBar(_) => Engine::Splitter,
            Kind::Scrollbar(_) => Engine::Scrollbar,
            Kind::ScrollRegion(_) => Engine::Region,
            _ => return Ok(EventOutcome::Ignore),
        };
        Ok(match (engine, event) {
            (Engine::Region, Event::Wheel { delta, .. }) => {
                let step = i32::try_from(self.config.wheel_step).unwrap_or(i32::MAX);
                if self.scroll_by(id, Axis::Vertical, delta.saturating_mul(step).saturating_neg())? {
                    EventOutcome::Handle
                } else {
                    EventOutcome::Ignore
                }
            }
            (Engine::Region, _) => EventOutcome::Ignore,
            (
                _,
                Event::PointerDown {
                    button: Button::Left,
                    ..
                }
                | Event::PointerUp {
                    button: Button::Left,
                    ..
                },
            ) => EventOutcome::Consume,
            (
                engine,
                Event::PointerMove {
                    delta, held: true, ..
                },
            ) => {
                match engine {
                    Engine::Resizer => {
                        self.resize_by(id, *delta)?;
                    }
                    Engine::Dragger => {
                        self.drag_by(id, *delta)?;
                    }
                    Engine::Splitter => {
                        self.drag_splitter(id, *delta)?;
                    }
                    Engine::Scrollbar => {
                        self.drag_scrollbar(id, *delta)?;
                    }
                    Engine::Region => {}
                }
                EventOutcome::Handle
            }
            _ => EventOutcome::Ignore,
        })
    }

    /// The node under the pointer.
    pub fn hovered(&self) -> Option<NodeId> {
        self.input.hovered
    }

    /// The node holding the pointer capture.
    pub fn captured(&self) -> Option<NodeId> {
        self.input.captured
    }

    /// Last known pointer position.
    pub fn pointer(&self) -> Point {
        self.input.pointer
    }

    /// Move the hover to `next`, telling the old and new nodes.
    fn set_hover(&mut self, next: Option<NodeId>) -> Result<()> {
        if self.input.hovered == next {
            return Ok(());
        }
        let previous = mem::replace(&mut self.input.hovered, next);
        if let Some(p) = previous {
            self.deliver(p, &Event::PointerLeave)?;
        }
        if let Some(n) = next {
            self.deliver(n, &Event::PointerEnter)?;
        }
        Ok(())
    }

    /// The live capture holder, if any.
    fn live_capture(&self) -> Option<NodeId> {
        self.input.captured.filter(|c| self.is_attached(*c))
    }

    /// Route a pointer move to canvas position `pos`. Returns true if a node
    /// handled it.
    pub fn pointer_moved(&mut self, pos: Point, delta: Point) -> Result<bool> {
        self.input.pointer = pos;
        if self.drag_motion(pos)? {
            return Ok(true);
        }
        let hit = self.hit_test(pos);
        let captured = self.live_capture();
        // A captured drag keeps the hover where the press happened.
        if captured.is_none() {
            self.set_hover(hit)?;
        }
        let (target, held) = match captured {
            Some(c) => (c, true),
            None => match hit {
                Some(h) => (h, false),
                None => return Ok(false),
            },
        };
        let outcome = self.dispatch_at(target, pos, |p| Event::PointerMove { pos: p, delta, held })?;
        self.apply_pending_focus()?;
        Ok(outcome != EventOutcome::Ignore)
    }

    /// Route a button press or release at the current pointer position.
    pub fn pointer_button(&mut self, button: Button, down: bool) -> Result<bool> {
        let pos = self.input.pointer;
        let outcome = if down {
            self.close_popups_outside(pos)?;
            let Some(hit) = self.hit_test(pos) else {
                return Ok(false);
            };
            if let Some(f) = self.focus_target(hit) {
                self.set_focus(f)?;
            }
            if button == Button::Left {
                self.offer_drag(hit, pos)?;
            }
            self.input.captured = Some(hit);
            self.dispatch_at(hit, pos, |p| Event::PointerDown { button, pos: p })?
        } else {
            if button == Button::Left && self.finish_drag(pos)?.is_some() {
                self.input.captured = None;
                return Ok(true);
            }
            let target = self.live_capture().or_else(|| self.hit_test(pos));
            self.input.captured = None;
            let Some(target) = target else {
                return Ok(false);
            };
            self.dispatch_at(target, pos, |p| Event::PointerUp { button, pos: p })?
        };
        self.apply_pending_focus()?;
        Ok(outcome != EventOutcome::Ignore)
    }

    /// Route a wheel turn. Bubbles from the node under the pointer until a
    /// scroll region can move.
    pub fn wheel(&mut self, delta: i32) -> Result<bool> {
        let pos = self.input.pointer;
        let Some(hit) = self.pick(pos, false) else {
            return Ok(false);
        };
        let outcome = self.dispatch_at(hit, pos, |p| Event::Wheel { delta, pos: p })?;
        Ok(outcome != EventOutcome::Ignore)
    }

    /// Route a keystroke. Escape cancels a drag; accelerators fire next; Tab
    /// and Shift+Tab walk the tab cycle; everything else bubbles from the
    /// focused node.
    pub fn key(&mut self, key: Key, down: bool) -> Result<bool> {
        if down {
            if key.key == KeyCode::Esc && self.cancel_drag()? {
                return Ok(true);
            }
            if self.route_accelerator(key)? {
                self.apply_pending_focus()?;
                return Ok(true);
            }
            if key.key == KeyCode::Tab
                && self.config.tab_key_navigation
                && !key.mods.ctrl
                && !key.mods.alt
            {
                return if key.mods.shift {
                    self.focus_prev()
                } else {
                    self.focus_next()
                };
            }
        }
        let Some(focus) = self.focus() else {
            return Ok(false);
        };
        let outcome = self.dispatch_event(focus, &Event::Key { key, down })?;
        self.apply_pending_focus()?;
        Ok(outcome != EventOutcome::Ignore)
    }

    /// Route text input to the focused node.
    pub fn char_input(&mut self, c: char) -> Result<bool> {
        let Some(focus) = self.focus() else {
            return Ok(false);
        };
        let outcome = self.dispatch_event(focus, &Event::Char(c))?;
        self.apply_pending_focus()?;
        Ok(outcome != EventOutcome::Ignore)
    }

    /// Close every open popup that does not contain canvas point `pos`.
    fn close_popups_outside(&mut self, pos: Point) -> Result<()> {
        for popup in self.open_popups() {
            if !self.absolute_bounds(popup)?.contains_point(pos) {
                self.close_popup(popup)?;
            }
        }
        Ok(())
    }
}
