use std::{
    mem,
    sync::{Arc, Mutex},
};

use crate::{
    context::Context,
    error::Result,
    event::Event,
    geom::{Expanse, Point},
    input::drag::Package,
    widget::{EventOutcome, Widget},
};

/// A shared event log.
pub type Log = Arc<Mutex<Vec<String>>>;

/// Create an empty log.
pub fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

/// Take every entry out of a log.
pub fn drain(log: &Log) -> Vec<String> {
    log.lock().map(|mut l| mem::take(&mut *l)).unwrap_or_default()
}

/// A widget with a fixed content size and no behaviour.
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub Expanse);

impl Fixed {
    /// A fixed widget of the given size.
    pub fn new(w: u32, h: u32) -> Self {
        Self(Expanse::new(w, h))
    }
}

impl Widget for Fixed {
    fn measure(&self, _available: Expanse) -> Expanse {
        self.0
    }
}

/// A widget that records every event it receives as a short string
/// prefixed with its label.
pub struct Probe {
    /// Log prefix.
    label: String,
    /// Shared log.
    log: Log,
    /// Content size.
    size: Expanse,
    /// Handle input events instead of letting them bubble.
    consume: bool,
    /// Package offered on press.
    package: Option<String>,
    /// Package names accepted as a drop target.
    accepts: Vec<String>,
    /// Ask for focus on press.
    focus_on_press: bool,
    /// Re-invalidate whenever bounds change.
    invalidate_on_bounds: bool,
}

impl Probe {
    /// A probe writing to `log`.
    pub fn new(label: impl Into<String>, log: &Log) -> Self {
        Self {
            label: label.into(),
            log: log.clone(),
            size: Expanse::default(),
            consume: false,
            package: None,
            accepts: Vec::new(),
            focus_on_press: false,
            invalidate_on_bounds: false,
        }
    }

    /// Set the content size.
    pub fn size(mut self, w: u32, h: u32) -> Self {
        self.size = Expanse::new(w, h);
        self
    }

    /// Handle input events.
    pub fn consume(mut self) -> Self {
        self.consume = true;
        self
    }

    /// Offer a package with this name on press.
    pub fn drag_source(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Accept drops of packages with this name.
    pub fn drop_target(mut self, package: impl Into<String>) -> Self {
        self.accepts.push(package.into());
        self
    }

    /// Request focus when pressed.
    pub fn focus_on_press(mut self) -> Self {
        self.focus_on_press = true;
        self
    }

    /// Invalidate from inside every bounds change.
    pub fn invalidate_on_bounds(mut self) -> Self {
        self.invalidate_on_bounds = true;
        self
    }

    /// Append an entry.
    fn record(&self, entry: String) {
        if let Ok(mut l) = self.log.lock() {
            l.push(format!("{}: {entry}", self.label));
        }
    }
}

/// A short description of an event.
fn describe(event: &Event) -> String {
    match event {
        Event::PointerMove { pos, held, .. } => {
            format!("move {},{}{}", pos.x, pos.y, if *held { " held" } else { "" })
        }
        Event::PointerDown { pos, .. } => format!("down {},{}", pos.x, pos.y),
        Event::PointerUp { pos, .. } => format!("up {},{}", pos.x, pos.y),
        Event::Wheel { delta, .. } => format!("wheel {delta}"),
        Event::PointerEnter => "enter".into(),
        Event::PointerLeave => "leave".into(),
        Event::Key { key, down } => format!("key {:?} {}", key.key, if *down { "down" } else { "up" }),
        Event::Char(c) => format!("char {c}"),
        Event::FocusGained => "focus".into(),
        Event::FocusLost => "blur".into(),
        Event::BoundsChanged { new, .. } => format!("bounds {},{} {}x{}", new.tl.x, new.tl.y, new.w, new.h),
        Event::Accelerator(name) => format!("accel {name}"),
        Event::Closed => "closed".into(),
        Event::DragStarted => "drag-start".into(),
        Event::DragEnter { package } => format!("drag-enter {package}"),
        Event::DragOver { .. } => "drag-over".into(),
        Event::DragLeave => "drag-leave".into(),
        Event::DragCompleted { .. } => "drag-done".into(),
        Event::DragCancelled(p) => format!("drag-cancel {}", p.name),
    }
}

impl Widget for Probe {
    fn measure(&self, _available: Expanse) -> Expanse {
        self.size
    }

    fn on_event(&mut self, event: &Event, ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.record(describe(event));
        Ok(match event {
            Event::BoundsChanged { .. } => {
                if self.invalidate_on_bounds {
                    ctx.invalidate();
                }
                EventOutcome::Ignore
            }
            Event::PointerDown { .. } => {
                if self.focus_on_press {
                    ctx.request_focus();
                }
                self.outcome()
            }
            Event::PointerMove { .. }
            | Event::PointerUp { .. }
            | Event::Wheel { .. }
            | Event::Key { .. }
            | Event::Char(_) => self.outcome(),
            Event::Accelerator(_) => EventOutcome::Handle,
            _ => EventOutcome::Ignore,
        })
    }

    fn drag_package(&mut self, _pos: Point) -> Option<Package> {
        self.package.as_ref().map(Package::new)
    }

    fn accepts_drops(&self) -> bool {
        !self.accepts.is_empty()
    }

    fn can_accept(&self, package: &Package) -> bool {
        self.accepts.contains(&package.name)
    }

    fn handle_drop(&mut self, package: &Package, pos: Point, _ctx: &mut dyn Context) -> Result<bool> {
        self.record(format!("drop {} {},{}", package.name, pos.x, pos.y));
        Ok(true)
    }

    fn name(&self) -> String {
        self.label.clone()
    }
}

impl Probe {
    /// Outcome for input events.
    fn outcome(&self) -> EventOutcome {
        if self.consume {
            EventOutcome::Handle
        } else {
            EventOutcome::Ignore
        }
    }
}
