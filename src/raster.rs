//! Pixel surfaces and the rasterization primitives used by the drawing tools.
//!
//! Coordinates are in surface-local pixels. Pixel `(x, y)` covers the square
//! `[x, x + 1) × [y, y + 1)`, so its center sits at `(x + 0.5, y + 0.5)`.
//! Geometry that reaches outside the surface is clipped, never rejected.

use egui::{Pos2, Vec2};
use image::RgbaImage;

use crate::codec::ImageCodec;
use crate::color::Color;
use crate::error::CodecError;

/// Smallest radius used when covering pixels. Keeps hairline strokes 8-connected.
const MIN_COVER_RADIUS: f32 = 0.5;

/// Any backing store the drawing tools can paint into
pub trait RasterSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Bumped on every mutation; lets renderers skip re-uploads
    fn revision(&self) -> u64;

    /// Paint every pixel whose center lies within `radius` of `center`.
    /// The pixel containing `center` is always painted when it is on the surface.
    fn stamp_circle(&mut self, center: Pos2, radius: f32, color: Color);

    /// Paint a capsule of width `thickness` between two points
    fn stroke_line(&mut self, from: Pos2, to: Pos2, thickness: f32, color: Color);

    /// Color of the pixel containing `point`, clamped to the surface
    fn sample_color(&self, point: Pos2) -> Color;

    fn fill(&mut self, color: Color);

    fn to_rgba_image(&self) -> RgbaImage;

    /// Replace the pixels. The image must match the surface dimensions.
    fn load_rgba_image(&mut self, image: RgbaImage) -> Result<(), CodecError>;

    fn to_encoded_bytes(&self) -> Result<Vec<u8>, CodecError> {
        ImageCodec::new(self.width(), self.height()).encode(&self.to_rgba_image())
    }

    fn load_from_encoded_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        let image = ImageCodec::new(self.width(), self.height()).decode(bytes)?;
        self.load_rgba_image(image)
    }
}

/// In-memory RGBA8 surface
#[derive(Clone)]
pub struct RasterBuffer {
    pixels: RgbaImage,
    revision: u64,
}

impl std::fmt::Debug for RasterBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterBuffer")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("revision", &self.revision)
            .finish()
    }
}

impl RasterBuffer {
    /// A blank (white) surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Color::WHITE.to_rgba()),
            revision: 0,
        }
    }

    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Integer pixel read; out of range coordinates are clamped
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.pixels.width().saturating_sub(1));
        let y = y.min(self.pixels.height().saturating_sub(1));
        Color::from_rgba(*self.pixels.get_pixel(x, y))
    }

    /// Pixel index range covering `[min, max]` on one axis, clipped to `[0, len)`
    fn span(min: f32, max: f32, len: u32) -> Option<(u32, u32)> {
        if len == 0 || max < 0.0 || min >= len as f32 || min.is_nan() || max.is_nan() {
            return None;
        }
        let lo = min.floor().max(0.0) as u32;
        let hi = (max.floor().max(0.0) as u32).min(len - 1);
        (lo <= hi).then_some((lo, hi))
    }

    /// Pixel containing `point`, if it is on the surface
    fn containing_pixel(&self, point: Pos2) -> Option<(u32, u32)> {
        let (w, h) = self.pixels.dimensions();
        if point.x >= 0.0 && point.y >= 0.0 && point.x < w as f32 && point.y < h as f32 {
            Some((point.x as u32, point.y as u32))
        } else {
            None
        }
    }

    /// Paint pixels in the bounding box whose centers satisfy `covers`
    fn paint_where(
        &mut self,
        min: Pos2,
        max: Pos2,
        color: Color,
        covers: impl Fn(Pos2) -> bool,
    ) -> bool {
        let (w, h) = self.pixels.dimensions();
        let (Some((x0, x1)), Some((y0, y1))) =
            (Self::span(min.x, max.x, w), Self::span(min.y, max.y, h))
        else {
            return false;
        };

        let rgba = color.to_rgba();
        let mut painted = false;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if covers(center) {
                    self.pixels.put_pixel(x, y, rgba);
                    painted = true;
                }
            }
        }
        painted
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl RasterSurface for RasterBuffer {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn stamp_circle(&mut self, center: Pos2, radius: f32, color: Color) {
        let radius = radius.max(MIN_COVER_RADIUS);
        let reach = Vec2::splat(radius);
        let radius_sq = radius * radius;

        let mut painted = self.paint_where(center - reach, center + reach, color, |p| {
            (p - center).length_sq() <= radius_sq
        });

        if let Some((x, y)) = self.containing_pixel(center) {
            self.pixels.put_pixel(x, y, color.to_rgba());
            painted = true;
        }

        if painted {
            self.touch();
        }
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, thickness: f32, color: Color) {
        let radius = (thickness / 2.0).max(MIN_COVER_RADIUS);
        let reach = Vec2::splat(radius);
        let radius_sq = radius * radius;

        let min = from.min(to) - reach;
        let max = from.max(to) + reach;
        if self.paint_where(min, max, color, |p| {
            distance_sq_to_segment(p, from, to) <= radius_sq
        }) {
            self.touch();
        }
    }

    fn sample_color(&self, point: Pos2) -> Color {
        let (w, h) = self.pixels.dimensions();
        if w == 0 || h == 0 {
            return Color::WHITE;
        }
        let x = point.x.clamp(0.0, (w - 1) as f32) as u32;
        let y = point.y.clamp(0.0, (h - 1) as f32) as u32;
        Color::from_rgba(*self.pixels.get_pixel(x, y))
    }

    fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba();
        for pixel in self.pixels.pixels_mut() {
            *pixel = rgba;
        }
        self.touch();
    }

    fn to_rgba_image(&self) -> RgbaImage {
        self.pixels.clone()
    }

    fn load_rgba_image(&mut self, image: RgbaImage) -> Result<(), CodecError> {
        if image.dimensions() != self.pixels.dimensions() {
            return Err(CodecError::DimensionMismatch {
                expected: self.pixels.dimensions(),
                found: image.dimensions(),
            });
        }
        self.pixels = image;
        self.touch();
        Ok(())
    }
}

/// Squared distance from a point to a line segment
fn distance_sq_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let line = end - start;
    let len_sq = line.length_sq();
    if len_sq == 0.0 {
        return (point - start).length_sq();
    }

    let t = ((point - start).dot(line) / len_sq).clamp(0.0, 1.0);
    let projection = start + line * t;
    (point - projection).length_sq()
}
