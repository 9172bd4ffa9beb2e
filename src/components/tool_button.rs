use egui::{Color32, Sense, Stroke, Vec2};

use crate::color::Color;
use crate::tools::Tool;

pub struct ToolButton {
    pub tool: Tool,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(tool: Tool, selected: bool) -> Self {
        Self { tool, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(32.0, 32.0);
        let (rect, response) = ui.allocate_exact_size(button_size, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                Color32::from_rgb(100, 181, 246) // Light blue when selected
            } else if response.hovered() {
                Color32::from_gray(40)
            } else {
                Color32::from_gray(30)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.selected {
                Color32::BLACK
            } else {
                Color32::WHITE
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.tool.icon(),
                egui::FontId::proportional(20.0),
                text_color,
            );

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    Stroke::new(2.0, Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response.on_hover_text(self.tool.name())
    }
}

/// A clickable palette swatch
pub struct SwatchButton<'a> {
    pub name: &'a str,
    pub color: Color,
    pub selected: bool,
}

impl SwatchButton<'_> {
    const SIZE: Vec2 = Vec2::splat(24.0);

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(Self::SIZE, Sense::click());

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(rect, 3.0, Color32::from(self.color));

            let outline = if self.selected {
                Stroke::new(3.0, Color32::from_rgb(33, 150, 243))
            } else if response.hovered() {
                Stroke::new(1.5, Color32::from_gray(200))
            } else {
                Stroke::new(1.0, Color32::from_gray(90))
            };
            ui.painter().rect_stroke(rect, 3.0, outline);
        }

        response.on_hover_text(format!("{} {}", self.name, self.color.to_css_string()))
    }
}
