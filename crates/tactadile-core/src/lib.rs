pub mod action;
pub mod config;
pub mod drag;
pub mod hotkey;
pub mod input;
pub mod keys;
pub mod log;
pub mod manipulator;
pub mod monitor;
pub mod placement;
pub mod rect;
pub mod target;
pub mod window;
pub mod zone;

#[cfg(test)]
mod testing;

pub use action::{Action, ActionRequest};
pub use config::Config;
pub use input::{Chord, ModifierFlags};
pub use manipulator::WindowManipulator;
pub use monitor::Monitor;
pub use rect::{Point, Rect};
pub use window::{Desktop, WindowResult};
pub use zone::Zone;
