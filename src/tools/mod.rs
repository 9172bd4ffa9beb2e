use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::CanvasConfig;

/// The drawing tools. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Picker,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Pencil, Tool::Eraser, Tool::Picker];

    pub fn name(self) -> &'static str {
        self.behavior().name
    }

    pub fn icon(self) -> &'static str {
        self.behavior().icon
    }

    pub fn behavior(self) -> &'static ToolBehavior {
        match self {
            Tool::Pencil => &PENCIL,
            Tool::Eraser => &ERASER,
            Tool::Picker => &PICKER,
        }
    }
}

/// What a press does with the pointer position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressAction {
    /// Stamp a dot and start a stroke
    Paint,
    /// Read the color under the pointer into the active color
    Sample,
}

/// Where the paint color comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    ActiveColor,
    Fixed(Color),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Pencil,
    Eraser,
    None,
}

/// Per-tool row of the dispatch table
#[derive(Debug)]
pub struct ToolBehavior {
    pub name: &'static str,
    pub icon: &'static str,
    pub press: PressAction,
    /// Whether moving while held extends the stroke
    pub strokes_on_move: bool,
    /// Whether a finished press/release marks the drawing as modified
    pub destructive: bool,
    pub ink: Ink,
    pub width: Width,
}

static PENCIL: ToolBehavior = ToolBehavior {
    name: "Pencil",
    icon: "✏",
    press: PressAction::Paint,
    strokes_on_move: true,
    destructive: true,
    ink: Ink::ActiveColor,
    width: Width::Pencil,
};

static ERASER: ToolBehavior = ToolBehavior {
    name: "Eraser",
    icon: "⌫",
    press: PressAction::Paint,
    strokes_on_move: true,
    destructive: true,
    ink: Ink::Fixed(Color::WHITE),
    width: Width::Eraser,
};

static PICKER: ToolBehavior = ToolBehavior {
    name: "Picker",
    icon: "💧",
    press: PressAction::Sample,
    strokes_on_move: false,
    destructive: false,
    ink: Ink::None,
    width: Width::None,
};

/// Paint parameters resolved from the active tool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: Color,
    pub thickness: f32,
}

impl Brush {
    pub fn radius(&self) -> f32 {
        self.thickness / 2.0
    }
}

/// Active tool, active color and the tool widths.
///
/// Widths belong to the tools and are not settable on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    active_tool: Tool,
    active_color: Color,
    pencil_thickness: f32,
    eraser_thickness: f32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}

impl ToolState {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            active_tool: Tool::Pencil,
            active_color: Color::BLACK,
            pencil_thickness: config.pencil_thickness,
            eraser_thickness: config.eraser_thickness,
        }
    }

    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn behavior(&self) -> &'static ToolBehavior {
        self.active_tool.behavior()
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if self.active_tool != tool {
            log::info!("Tool selected: {}", tool.name());
        }
        self.active_tool = tool;
    }

    /// Does not touch the active tool.
    pub fn select_color(&mut self, color: Color) {
        self.active_color = color;
    }

    pub fn thickness_of(&self, tool: Tool) -> Option<f32> {
        match tool.behavior().width {
            Width::Pencil => Some(self.pencil_thickness),
            Width::Eraser => Some(self.eraser_thickness),
            Width::None => None,
        }
    }

    pub fn draw_color(&self) -> Option<Color> {
        match self.behavior().ink {
            Ink::ActiveColor => Some(self.active_color),
            Ink::Fixed(color) => Some(color),
            Ink::None => None,
        }
    }

    /// Color and width for painting with the active tool, `None` for non-painting tools
    pub fn brush(&self) -> Option<Brush> {
        Some(Brush {
            color: self.draw_color()?,
            thickness: self.thickness_of(self.active_tool)?,
        })
    }
}
