//! Property animations advanced once per tick.

use std::time::Duration;

use crate::{NodeId, error::Result, geom::Rect, tree::Core};

/// A node property that can be animated. Animations drive the node's desired
/// bounds, so the result flows through normal layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// Desired left edge.
    X,
    /// Desired top edge.
    Y,
    /// Desired width.
    Width,
    /// Desired height.
    Height,
}

impl Property {
    /// Read the property from arranged bounds.
    fn read(self, r: Rect) -> f32 {
        match self {
            Self::X => r.tl.x as f32,
            Self::Y => r.tl.y as f32,
            Self::Width => r.w as f32,
            Self::Height => r.h as f32,
        }
    }
}

/// A single property animation.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Animated node.
    node: NodeId,
    /// Animated property.
    property: Property,
    /// Target value.
    to: f32,
    /// Value at the end of the delay, captured lazily.
    from: Option<f32>,
    /// Time from start of delay to completion is `delay + duration`.
    delay: Duration,
    /// Running time after the delay.
    duration: Duration,
    /// Progress exponent: `progress = t^ease`.
    ease: f32,
    /// Hide the node once the animation completes.
    hide_when_done: bool,
    /// Time advanced so far, delay included.
    elapsed: Duration,
}

impl Animation {
    /// Animate `property` of `node` to `to` over `duration`.
    pub fn new(node: NodeId, property: Property, to: i32, duration: Duration) -> Self {
        Self {
            node,
            property,
            to: to as f32,
            from: None,
            delay: Duration::ZERO,
            duration,
            ease: 1.0,
            hide_when_done: false,
            elapsed: Duration::ZERO,
        }
    }

    /// Wait before starting.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the ease exponent. Values above one start slowly; below one start
    /// quickly.
    pub fn ease(mut self, ease: f32) -> Self {
        self.ease = ease.max(f32::EPSILON);
        self
    }

    /// Hide the node when the animation finishes.
    pub fn hide_when_done(mut self) -> Self {
        self.hide_when_done = true;
        self
    }

    /// The animated node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Eased progress in `[0, 1]`, or `None` while still delayed.
    fn progress(&self) -> Option<f32> {
        let running = self.elapsed.checked_sub(self.delay)?;
        if self.duration.is_zero() {
            return Some(1.0);
        }
        let t = (running.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        Some(t.powf(self.ease))
    }

    /// Advance by `dt` and write the new value. Returns true when finished.
    fn step(&mut self, core: &mut Core, dt: Duration) -> Result<bool> {
        self.elapsed = self.elapsed.saturating_add(dt);
        let Some(p) = self.progress() else {
            return Ok(false);
        };
        let from = match self.from {
            Some(v) => v,
            None => {
                let v = self.property.read(core.bounds(self.node)?);
                self.from = Some(v);
                v
            }
        };
        let value = (from + (self.to - from) * p).round();
        let property = self.property;
        core.update_layout(self.node, |l| match property {
            Property::X => l.desired.x = Some(value as i32),
            Property::Y => l.desired.y = Some(value as i32),
            Property::Width => l.desired.w = Some(value.max(0.0) as u32),
            Property::Height => l.desired.h = Some(value.max(0.0) as u32),
        })?;
        let done = p >= 1.0;
        if done && self.hide_when_done {
            core.set_hidden(self.node, true)?;
        }
        Ok(done)
    }
}

/// The set of running animations.
#[derive(Debug, Default)]
pub struct Animator {
    /// Running animations, in start order.
    running: Vec<Animation>,
}

impl Animator {
    /// Start an animation.
    pub fn add(&mut self, animation: Animation) {
        self.running.push(animation);
    }

    /// Number of running animations.
    pub fn len(&self) -> usize {
        self.running.len()
    }

    /// Are no animations running?
    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Stop every animation on `node`.
    pub fn cancel(&mut self, node: NodeId) {
        self.running.retain(|a| a.node != node);
    }

    /// Advance every animation by `dt`. Finished animations are removed, as
    /// are animations whose node no longer exists.
    pub fn advance(&mut self, core: &mut Core, dt: Duration) -> Result<()> {
        let mut keep = Vec::with_capacity(self.running.len());
        for mut a in self.running.drain(..) {
            if !core.contains(a.node) {
                tracing::trace!(node = ?a.node, "dropping animation for removed node");
                continue;
            }
            if !a.step(core, dt)? {
                keep.push(a);
            }
        }
        self.running = keep;
        Ok(())
    }
}
