#![allow(clippy::new_without_default, clippy::multiple_inherent_impl)]
//! A retained-mode layout and composition engine: a node tree with
//! two-pass measure/arrange layout, dirty tracking with isolated re-layout,
//! scroll regions, splits, resizable windows, docking, and an input router
//! for hit-testing, focus, accelerators and drag-and-drop.

pub mod animation;
pub mod authoring;
pub mod canvas;
pub mod config;
mod context;
pub mod dock;
pub mod dump;
pub mod error;
pub mod event;
mod id;
pub mod input;
mod invalidate;
pub mod layout;
mod measure;
pub mod node;
pub mod render;
pub mod resize;
pub mod scroll;
pub mod split;
pub mod testing;
pub mod tree;
pub mod widget;

pub use geom;

// Public exports
pub use canvas::Canvas;
pub use config::Config;
pub use context::Context;
pub use error::{Error, Result};
pub use id::NodeId;
pub use input::{
    drag::{DropOutcome, Package},
    focus::FocusManager,
};
pub use layout::{Align, Dock, Layout};
pub use node::{Flags, Kind, Node};
pub use render::{DrawNode, Skin};
pub use tree::Core;
pub use widget::{EventOutcome, Widget};

// Export commonly used geometry types at the root
pub use geom::{Axis, Edges, Expanse, Point, Rect};
