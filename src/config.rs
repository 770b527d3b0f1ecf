//! Compile-time settings for the simulation and its window

/// Width and height in pixels of one cell
pub const CELL_SIZE: usize = 10;

pub const WINDOW_TITLE: &str = "👾 Life~!";
pub const WINDOW_WIDTH: usize = 800;
pub const WINDOW_HEIGHT: usize = 600;

/// How many times per second the loop renders, steps, and reads input
pub const TICKS_PER_SECOND: usize = 10;

/// How many times per tick the window's event queue is pumped
///
/// A click shorter than one pump can still be missed, so this keeps pumps well under a typical
/// click length.
pub const PUMPS_PER_TICK: usize = 6;

pub const LIVE_COLOR: u32 = 0xff_ff_ff;
pub const BACKGROUND_COLOR: u32 = 0x00_00_00;

pub const PAUSED_LABEL: &str = "Paused";

/// The "Paused" label is centered this far left of the right edge...
pub const PAUSED_LABEL_INSET_X: i32 = 50;
/// ...and this far up from the bottom edge.
pub const PAUSED_LABEL_INSET_Y: i32 = 20;

/// Seed for the randomize edit. Deterministic so a session can be reproduced.
pub const RNG_SEED: u64 = 7;
