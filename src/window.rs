use minifb::{KeyRepeat, MouseButton, MouseMode, Scale, ScaleMode, Window, WindowOptions};

use crate::backend::{Backend, Event, InputLatch, Key};
use crate::config::{PUMPS_PER_TICK, TICKS_PER_SECOND};
use crate::framebuffer::Framebuffer;
use crate::Error;

/// A resizable desktop window, drawn one pixel per pixel
///
/// minifb only reads input while it updates the window, and its rate limiter paces those
/// updates. Each tick is [`PUMPS_PER_TICK`] updates: the present, then the rest inside
/// [`Backend::wait_for_tick()`]. Input is latched after every update.
pub struct WindowBackend {
    window: Window,
    frame: Framebuffer,
    input: InputLatch,
}

impl WindowBackend {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                title: true,
                resize: true,
                scale: Scale::X1,
                scale_mode: ScaleMode::UpperLeft,

                ..WindowOptions::default()
            },
        )?;

        window.set_target_fps(TICKS_PER_SECOND * PUMPS_PER_TICK);

        Ok(Self {
            window,
            frame: Framebuffer::new(width, height),
            input: InputLatch::new(),
        })
    }

    fn latch_input(&mut self) {
        let keys = self.window.get_keys_pressed(KeyRepeat::No);
        let button_is_down = self.window.get_mouse_down(MouseButton::Left);
        let pointer = self.window.get_mouse_pos(MouseMode::Pass);

        self.input
            .observe(keys.into_iter().map(Key::from), button_is_down, pointer);
    }
}

impl From<minifb::Key> for Key {
    fn from(key: minifb::Key) -> Self {
        match key {
            minifb::Key::P => Key::P,
            minifb::Key::Space => Key::Space,
            minifb::Key::C => Key::C,
            minifb::Key::R => Key::R,
            minifb::Key::Q => Key::Q,
            minifb::Key::Escape => Key::Escape,
            _ => Key::Other,
        }
    }
}

impl Backend for WindowBackend {
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
        let result = if self.frame.is_empty() {
            // minifb rejects a buffer with no pixels, but the window still needs its events read
            self.window.update();
            Ok(())
        } else {
            self.window
                .update_with_buffer(self.frame.pixels(), self.frame.width(), self.frame.height())
        };

        self.latch_input();
        result?;
        Ok(())
    }

    fn wait_for_tick(&mut self) {
        for _ in 1..PUMPS_PER_TICK {
            self.window.update();
            self.latch_input();
        }
    }

    fn poll_events(&mut self) -> Vec<Event> {
        if !self.window.is_open() {
            return vec![Event::Quit];
        }

        let mut events = self.input.drain();

        let (width, height) = self.window.get_size();
        if (width, height) != (self.frame.width(), self.frame.height()) {
            events.push(Event::WindowResized { width, height });
        }

        events
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.frame.resize(width, height);
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}
