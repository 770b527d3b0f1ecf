use core::convert::Infallible;

use embedded_graphics::mono_font::{ascii, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

/// Packs a color as `0x00RRGGBB`, the layout minifb presents
pub fn pack(color: Rgb888) -> u32 {
    (color.r() as u32) << 16 | (color.g() as u32) << 8 | color.b() as u32
}

/// Unpacks a `0x00RRGGBB` color
pub fn unpack(color: u32) -> Rgb888 {
    Rgb888::new((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// An in-memory `0x00RRGGBB` pixel surface
///
/// Drawing outside the surface is clipped. The surface can be any size, including zero wide or
/// zero tall, in which case every draw is a no-op.
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    /// Creates a surface with every pixel black
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether the surface has no pixels at all
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row-major pixels, ready for presenting
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width && y < self.height);
        self.pixels[x + y * self.width]
    }

    /// Reallocates the surface. Old contents are not kept, the next frame repaints everything.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: u32) {
        let area = Rectangle::new(Point::new(x, y), Size::new(width, height));
        let _ = self.fill_solid(&area, unpack(color));
    }

    /// Draws a single line of text centered on `(cx, cy)`
    pub fn draw_text_centered(&mut self, text: &str, cx: i32, cy: i32, color: u32) {
        let character_style = MonoTextStyle::new(&ascii::FONT_10X20, unpack(color));
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        let _ = Text::with_text_style(text, Point::new(cx, cy), character_style, text_style)
            .draw(self);
    }
}

// This trait is exposed from `embedded_graphics`
impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

// This trait is exposed from `embedded_graphics`
impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, c) in pixels.into_iter() {
            if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
                self.pixels[x as usize + y as usize * self.width] = pack(c);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            // Nothing left after clipping
            return Ok(());
        };

        let color = pack(color);
        let (x0, x1) = (area.top_left.x as usize, bottom_right.x as usize);
        for y in area.top_left.y as usize..=bottom_right.y as usize {
            let row = y * self.width;
            self.pixels[row + x0..=row + x1].fill(color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(pack(color));
        Ok(())
    }
}
