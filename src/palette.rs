use crate::color::Color;
use crate::config::COLORS_PER_ROW;

/// A named palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub color: Color,
}

const fn swatch(name: &'static str, r: u8, g: u8, b: u8) -> Swatch {
    Swatch {
        name,
        color: Color::rgb(r, g, b),
    }
}

pub const DEFAULT_SWATCHES: [Swatch; 14] = [
    // red - green
    swatch("Red", 255, 0, 0),
    swatch("Orange", 255, 150, 0),
    swatch("Yellow", 255, 255, 0),
    // green - blue
    swatch("Lime", 75, 255, 0),
    swatch("Green", 0, 150, 0),
    swatch("Teal", 75, 200, 200),
    swatch("Sky", 0, 150, 255),
    // blue - red
    swatch("Blue", 0, 0, 255),
    swatch("Purple", 150, 0, 255),
    swatch("Pink", 255, 0, 150),
    // white - black
    swatch("White", 255, 255, 255),
    swatch("Light Gray", 150, 150, 150),
    swatch("Dark Gray", 75, 75, 75),
    swatch("Black", 0, 0, 0),
];

/// Fixed, ordered color catalog split into display rows.
///
/// Read-only once built. Picking a swatch only changes the active color;
/// the active tool is left alone.
#[derive(Debug, Clone)]
pub struct Palette {
    swatches: Vec<Swatch>,
    row_width: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_SWATCHES.to_vec(), COLORS_PER_ROW)
    }
}

impl Palette {
    /// A zero row width is bumped to one so rows are never empty.
    pub fn new(swatches: Vec<Swatch>, row_width: usize) -> Self {
        Self {
            swatches,
            row_width: row_width.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn row_width(&self) -> usize {
        self.row_width
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn get(&self, index: usize) -> Option<&Swatch> {
        self.swatches.get(index)
    }

    /// Swatches grouped into rows of `row_width`; the last row may be shorter.
    pub fn rows(&self) -> impl Iterator<Item = &[Swatch]> {
        self.swatches.chunks(self.row_width)
    }

    pub fn row_count(&self) -> usize {
        self.swatches.len().div_ceil(self.row_width)
    }

    pub fn is_selected(&self, swatch: &Swatch, active: Color) -> bool {
        swatch.color == active
    }
}
