//! The seam between the simulation loop and whatever puts pixels on a screen

use std::collections::VecDeque;

use crate::framebuffer::Framebuffer;
use crate::Error;

/// Keys the loop cares about. Everything else arrives as [`Key::Other`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    P,
    Space,
    C,
    R,
    Q,
    Escape,
    Other,
}

/// Input observed by a [`Backend`] since the last time it was polled
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The user asked to close the window
    Quit,

    KeyDown(Key),

    /// The primary pointer button went down at this pixel position.
    ///
    /// The position may be outside of the surface (e.g. over window decorations).
    PointerDown { x: i32, y: i32 },

    /// The window's drawable area is now this many pixels
    WindowResized { width: usize, height: usize },
}

/// Everything the loop needs from a window
///
/// Colors are `0x00RRGGBB`. Drawing happens on an offscreen surface until [`Backend::present()`].
pub trait Backend {
    fn clear(&mut self, color: u32);

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: u32);

    /// Draws one line of text centered on `(cx, cy)`
    fn draw_text_centered(&mut self, text: &str, cx: i32, cy: i32, color: u32);

    /// Shows everything drawn since the last present
    fn present(&mut self) -> Result<(), Error>;

    /// Blocks until the next tick is due
    fn wait_for_tick(&mut self);

    /// Drains all input received since the last poll
    fn poll_events(&mut self) -> Vec<Event>;

    /// Reallocates the drawing surface to match a new window size
    fn resize(&mut self, width: usize, height: usize);

    fn set_title(&mut self, title: &str) {
        let _ = title;
    }
}

/// Turns sampled input state into [`Event`]s
///
/// Windowing libraries that only report button levels lose a click whose press and release land
/// between two polls. Sampling after every pump of the window's event queue and keeping the
/// rising edges, each with the pointer position at that pump, catches them.
#[derive(Debug, Default)]
pub struct InputLatch {
    pending: Vec<Event>,
    button_was_down: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the input state seen by one pump
    ///
    /// `keys` are the keys that went down during the pump. `pointer` is where the pointer was, if
    /// the window knows.
    pub fn observe(
        &mut self,
        keys: impl IntoIterator<Item = Key>,
        button_is_down: bool,
        pointer: Option<(f32, f32)>,
    ) {
        self.pending.extend(keys.into_iter().map(Event::KeyDown));

        if button_is_down && !self.button_was_down {
            match pointer {
                Some((x, y)) => self.pending.push(Event::PointerDown {
                    x: x.floor() as i32,
                    y: y.floor() as i32,
                }),
                None => log::trace!("Pointer went down with no position"),
            }
        }
        self.button_was_down = button_is_down;
    }

    /// Takes everything observed since the last drain, oldest first
    pub fn drain(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.pending)
    }
}

/// A [`Backend`] with no window
///
/// Draws into a [`Framebuffer`] and replays scripted input, one batch per poll. Once the script
/// runs out, polls return nothing. Ticks never sleep, they are only counted.
pub struct Headless {
    frame: Framebuffer,
    script: VecDeque<Vec<Event>>,
    presented: usize,
    waited: usize,
    title: String,
}

impl Headless {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            frame: Framebuffer::new(width, height),
            script: VecDeque::new(),
            presented: 0,
            waited: 0,
            title: String::new(),
        }
    }

    /// Queues the events returned by one future [`Backend::poll_events()`] call
    pub fn push_events(&mut self, events: impl IntoIterator<Item = Event>) {
        self.script.push_back(events.into_iter().collect());
    }

    /// The last frame drawn
    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    /// How many frames have been presented
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// How many times the loop has waited for a tick
    pub fn waited(&self) -> usize {
        self.waited
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Backend for Headless {
    fn clear(&mut self, color: u32) {
        self.frame.fill(color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: u32) {
        self.frame.fill_rect(x, y, width, height, color);
    }

    fn draw_text_centered(&mut self, text: &str, cx: i32, cy: i32, color: u32) {
        self.frame.draw_text_centered(text, cx, cy, color);
    }

    fn present(&mut self) -> Result<(), Error> {
        self.presented += 1;
        Ok(())
    }

    fn wait_for_tick(&mut self) {
        self.waited += 1;
    }

    fn poll_events(&mut self) -> Vec<Event> {
        self.script.pop_front().unwrap_or_default()
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.frame.resize(width, height);
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }
}
