//! Conway's Game of Life in a resizable window
//!
//! The [`Grid`] holds the cells and knows the rules. The [`Game`] loop owns a grid, draws it
//! through a [`Backend`], and turns input into edits, pauses, and resizes.

pub mod backend;
pub mod config;
pub mod framebuffer;
pub mod game;
pub mod grid;

mod error;

/// A minifb window for [`Game::run()`]
#[cfg(feature = "minifb")]
pub mod window;

pub use backend::{Backend, Event, Headless, InputLatch, Key};
pub use error::Error;
pub use game::Game;
pub use grid::Grid;

#[cfg(feature = "minifb")]
pub use window::WindowBackend;
