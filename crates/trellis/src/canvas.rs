//! The root scheduler. A [`Canvas`] owns the tree, runs one tick per host
//! frame and is the single entry point for host input.

use std::time::Duration;

use crate::{
    NodeId,
    animation::{Animation, Animator},
    authoring::{self, WidgetFactory},
    config::Config,
    error::Result,
    event::{key::Key, pointer::Button},
    geom::{Expanse, Point},
    render::Skin,
    tree::Core,
};

/// The root of a node tree plus its per-tick scheduler.
pub struct Canvas {
    /// The node tree.
    pub core: Core,
    /// Running property animations.
    animator: Animator,
    /// Canvas size; the full layout pass is bounded to it.
    size: Expanse,
}

impl Canvas {
    /// A canvas of the given size with default configuration.
    pub fn new(size: Expanse) -> Self {
        Self::with_config(Config::default(), size)
    }

    /// A canvas with explicit configuration.
    pub fn with_config(config: Config, size: Expanse) -> Self {
        Self {
            core: Core::new(config),
            animator: Animator::default(),
            size,
        }
    }

    /// The canvas size.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Resize the canvas. The next tick re-lays out the whole tree.
    pub fn set_size(&mut self, size: Expanse) {
        if size != self.size {
            self.size = size;
            let root = self.core.root();
            self.core.invalidate(root);
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.core.root()
    }

    /// Start a property animation.
    pub fn animate(&mut self, animation: Animation) {
        self.animator.add(animation);
    }

    /// Running animations.
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Stop every animation on `node`.
    pub fn cancel_animations(&mut self, node: NodeId) {
        self.animator.cancel(node);
    }

    /// Run one tick, `dt` after the previous one:
    ///
    /// 1. advance animations
    /// 2. reset the tab cycle
    /// 3. purge nodes deleted since the last tick
    /// 4. rebuild the tab cycle and check the focus holder is still reachable
    /// 5. full measure and arrange if the root is dirty
    /// 6. re-lay out queued virtual controls
    ///
    /// Invalidations raised during layout, and focus requested from widget
    /// callbacks, are applied last so the next tick picks them up.
    pub fn do_think(&mut self, dt: Duration) -> Result<()> {
        let span = tracing::trace_span!("tick", ?dt);
        let _enter = span.enter();

        self.animator.advance(&mut self.core, dt)?;
        self.core.tab.reset();
        self.core.purge_deletions();
        self.core.rebuild_tab_cycle()?;

        let root = self.core.root();
        if self.core.needs_layout(root)? {
            tracing::debug!(size = ?self.size, "full layout");
            self.core.layout(self.size)?;
        }
        self.core.drain_measure_queue()?;

        self.core.apply_deferred_invalidations();
        self.core.apply_pending_focus()?;
        Ok(())
    }

    /// Has anything changed since the last render?
    pub fn needs_redraw(&self) -> bool {
        self.core.redraw
    }

    /// Draw the tree through a skin.
    pub fn render(&mut self, skin: &mut dyn Skin) -> Result<()> {
        self.core.render(skin)
    }

    /// Build nodes from a JSON description under `parent`.
    pub fn load_json(
        &mut self,
        parent: NodeId,
        json: &str,
        factory: &dyn WidgetFactory,
    ) -> Result<NodeId> {
        authoring::load_json(&mut self.core, parent, json, factory)
    }

    /// Host pointer motion to canvas position `pos`.
    pub fn input_pointer_move(&mut self, pos: Point, delta: Point) -> Result<bool> {
        self.core.pointer_moved(pos, delta)
    }

    /// Host button press or release.
    pub fn input_pointer_button(&mut self, button: Button, down: bool) -> Result<bool> {
        self.core.pointer_button(button, down)
    }

    /// Host wheel turn.
    pub fn input_wheel(&mut self, delta: i32) -> Result<bool> {
        self.core.wheel(delta)
    }

    /// Host key press or release.
    pub fn input_key(&mut self, key: impl Into<Key>, down: bool) -> Result<bool> {
        self.core.key(key.into(), down)
    }

    /// Host text input.
    pub fn input_char(&mut self, c: char) -> Result<bool> {
        self.core.char_input(c)
    }
}
