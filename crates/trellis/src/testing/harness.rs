use std::time::Duration;

use crate::{
    Canvas, NodeId,
    config::Config,
    dump::dump_plain,
    error::Result,
    event::{key::Key, pointer::Button},
    geom::{Expanse, Point},
    testing::RecordingSkin,
};

/// Install a test-writer tracing subscriber. Safe to call repeatedly.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init()
        .ok();
}

/// A harness that owns a [`Canvas`] and drives it the way a host would:
/// every input helper is followed by a tick, so tests observe settled
/// layout.
pub struct Harness {
    /// The canvas under test.
    pub canvas: Canvas,
    /// Time advanced per tick.
    pub frame: Duration,
}

impl Harness {
    /// A harness over a canvas of the given size.
    pub fn new(w: u32, h: u32) -> Self {
        Self::with_config(Config::default(), w, h)
    }

    /// A harness with explicit configuration.
    pub fn with_config(config: Config, w: u32, h: u32) -> Self {
        init_tracing();
        Self {
            canvas: Canvas::with_config(config, Expanse::new(w, h)),
            frame: Duration::from_millis(16),
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.canvas.root()
    }

    /// Run one tick.
    pub fn tick(&mut self) -> Result<()> {
        self.canvas.do_think(self.frame)
    }

    /// Run `n` ticks.
    pub fn ticks(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    /// Move the pointer to an absolute position.
    pub fn move_to(&mut self, x: i32, y: i32) -> Result<bool> {
        let from = self.canvas.core.pointer();
        let to = Point::new(x, y);
        let handled = self
            .canvas
            .input_pointer_move(to, Point::new(x - from.x, y - from.y))?;
        self.tick()?;
        Ok(handled)
    }

    /// Press a button at the current pointer position.
    pub fn press(&mut self, button: Button) -> Result<bool> {
        let handled = self.canvas.input_pointer_button(button, true)?;
        self.tick()?;
        Ok(handled)
    }

    /// Release a button at the current pointer position.
    pub fn release(&mut self, button: Button) -> Result<bool> {
        let handled = self.canvas.input_pointer_button(button, false)?;
        self.tick()?;
        Ok(handled)
    }

    /// Move to a point and click the left button there.
    pub fn click(&mut self, x: i32, y: i32) -> Result<()> {
        self.move_to(x, y)?;
        self.press(Button::Left)?;
        self.release(Button::Left)?;
        Ok(())
    }

    /// Press the left button at one point, move to another in a single step
    /// and release there.
    pub fn drag(&mut self, from: (i32, i32), to: (i32, i32)) -> Result<()> {
        self.move_to(from.0, from.1)?;
        self.press(Button::Left)?;
        self.move_to(to.0, to.1)?;
        self.release(Button::Left)?;
        Ok(())
    }

    /// Turn the wheel at the current pointer position.
    pub fn wheel(&mut self, delta: i32) -> Result<bool> {
        let handled = self.canvas.input_wheel(delta)?;
        self.tick()?;
        Ok(handled)
    }

    /// Press and release a key.
    pub fn key(&mut self, key: impl Into<Key>) -> Result<bool> {
        let key = key.into();
        let handled = self.canvas.input_key(key, true)?;
        self.canvas.input_key(key, false)?;
        self.tick()?;
        Ok(handled)
    }

    /// Type a string.
    pub fn chars(&mut self, s: &str) -> Result<()> {
        for c in s.chars() {
            self.canvas.input_char(c)?;
        }
        self.tick()
    }

    /// Render through a recording skin.
    pub fn render(&mut self) -> Result<RecordingSkin> {
        let mut skin = RecordingSkin::default();
        self.canvas.render(&mut skin)?;
        Ok(skin)
    }

    /// A plain-text dump of the whole tree.
    pub fn dump(&self) -> Result<String> {
        dump_plain(&self.canvas.core, self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layout::Layout,
        testing::probe::{Probe, drain, log},
    };

    #[test]
    fn click_reaches_widget() -> Result<()> {
        let mut h = Harness::new(40, 20);
        let l = log();
        let root = h.root();
        let w = h
            .canvas
            .core
            .add_widget(root, Layout::fill(), Probe::new("p", &l).consume())?;
        h.canvas.core.set_pointer_input(w, true)?;
        h.tick()?;
        drain(&l);
        h.click(3, 4)?;
        assert_eq!(drain(&l), vec!["p: enter", "p: move 3,4", "p: down 3,4", "p: up 3,4"]);
        let skin = h.render()?;
        assert_eq!(skin.drawn.len(), 2);
        Ok(())
    }
}
