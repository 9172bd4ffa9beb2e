use egui::Color32;
use serde::{Deserialize, Serialize};

/// An opaque RGB color. Equality is component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS style notation, e.g. `rgb(255,150,0)`
    pub fn to_css_string(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, u8::MAX])
    }

    /// Fully transparent pixels read as white so a sampled value is always a real color.
    /// Any other alpha is treated as opaque.
    pub fn from_rgba(pixel: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            Self::WHITE
        } else {
            Self { r, g, b }
        }
    }
}

impl From<Color> for Color32 {
    fn from(color: Color) -> Self {
        Color32::from_rgb(color.r, color.g, color.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.r, self.g, self.b)
    }
}
