use egui::{Align2, Color32, FontId, PointerButton, Pos2, Rect, Sense, Stroke, pos2, vec2};

use crate::DrawHeroApp;
use crate::input::PointerEvent;
use crate::session::SessionState;

pub fn central_panel(app: &mut DrawHeroApp, ctx: &egui::Context) {
    let canvas_size = app.config().canvas_size_f32();

    egui::CentralPanel::default().show(ctx, |ui| {
        let (texture, session) = app.canvas_parts();
        let Some(session) = session else {
            ui.centered_and_justified(|ui| {
                ui.label("Pick a hero to start drawing");
            });
            return;
        };

        let (rect, _response) =
            ui.allocate_exact_size(vec2(canvas_size, canvas_size), Sense::click_and_drag());
        session.set_surface_origin(rect.min);

        // Other panels may cover part of the canvas in a small window
        let visible = rect.intersect(ui.clip_rect());
        let layer = ui.layer_id();
        for event in ctx.input(|input| canvas_events(&input.events, visible)) {
            if let PointerEvent::Down { position } = event {
                if ctx.layer_id_at(position).is_some_and(|top| top != layer) {
                    continue;
                }
            }
            session.handle_pointer(event);
        }

        let texture_id = texture.texture_id(ctx, session.id(), session.surface());
        let painter = ui.painter();
        painter.image(
            texture_id,
            rect,
            Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0)),
            Color32::WHITE,
        );
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::from_gray(90)));

        if session.state() == SessionState::Loading {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Loading…",
                FontId::proportional(18.0),
                Color32::GRAY,
            );
        }
    });
}

/// Primary-button presses inside the visible part of the canvas, every
/// release, and every move. The pointer controller decides which moves paint.
pub(crate) fn canvas_events(events: &[egui::Event], visible: Rect) -> Vec<PointerEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: true,
                ..
            } if visible.contains(*pos) => Some(PointerEvent::Down { position: *pos }),
            egui::Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: false,
                ..
            } => Some(PointerEvent::Up { position: *pos }),
            egui::Event::PointerMoved(pos) => Some(PointerEvent::Move { position: *pos }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Modifiers;

    fn button(pos: Pos2, button: PointerButton, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn test_presses_outside_canvas_are_dropped() {
        let canvas = Rect::from_min_size(pos2(100.0, 100.0), vec2(500.0, 500.0));
        let events = [
            button(pos2(50.0, 50.0), PointerButton::Primary, true),
            egui::Event::PointerMoved(pos2(150.0, 150.0)),
            button(pos2(150.0, 150.0), PointerButton::Secondary, true),
            button(pos2(150.0, 150.0), PointerButton::Primary, true),
            button(pos2(700.0, 150.0), PointerButton::Primary, false),
        ];

        assert_eq!(
            canvas_events(&events, canvas),
            vec![
                PointerEvent::Move {
                    position: pos2(150.0, 150.0)
                },
                PointerEvent::Down {
                    position: pos2(150.0, 150.0)
                },
                PointerEvent::Up {
                    position: pos2(700.0, 150.0)
                },
            ]
        );
    }

    #[test]
    fn test_presses_on_covered_canvas_are_dropped() {
        let canvas = Rect::from_min_size(pos2(100.0, 100.0), vec2(500.0, 500.0));
        let panel_clip = Rect::from_min_max(pos2(0.0, 0.0), pos2(800.0, 450.0));
        let visible = canvas.intersect(panel_clip);
        let events = [
            button(pos2(300.0, 520.0), PointerButton::Primary, true),
            button(pos2(300.0, 520.0), PointerButton::Primary, false),
            button(pos2(300.0, 300.0), PointerButton::Primary, true),
        ];

        assert_eq!(
            canvas_events(&events, visible),
            vec![
                PointerEvent::Up {
                    position: pos2(300.0, 520.0)
                },
                PointerEvent::Down {
                    position: pos2(300.0, 300.0)
                },
            ]
        );
    }
}
