use egui::Pos2;

use crate::raster::RasterSurface;
use crate::tools::{PressAction, ToolState};

/// Raw pointer events in device (screen) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed
    Down { position: Pos2 },
    /// Pointer moved, with or without the button held
    Move { position: Pos2 },
    /// Primary button released
    Up { position: Pos2 },
}

impl PointerEvent {
    pub fn position(&self) -> Pos2 {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => *position,
        }
    }
}

/// What handling a pointer event did to the drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Nothing happened
    Ignored,
    /// Pixels were painted
    Painted,
    /// The picker read a color into the active color
    Picked(crate::color::Color),
    /// The pointer was released after a press
    Released {
        /// Whether the tool that was active modifies the drawing
        destructive: bool,
    },
}

/// Turns press/move/release sequences into strokes on a surface.
///
/// Moves only paint between a press and its release, so stray events from
/// outside the canvas never draw.
#[derive(Debug, Clone, Default)]
pub struct PointerController {
    origin: Pos2,
    held: bool,
    last_point: Option<Pos2>,
}

impl PointerController {
    pub fn new(origin: Pos2) -> Self {
        Self {
            origin,
            held: false,
            last_point: None,
        }
    }

    /// Screen position of the surface's top-left corner
    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Pos2) {
        self.origin = origin;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn last_point(&self) -> Option<Pos2> {
        self.last_point
    }

    /// Convert device coordinates into surface-local coordinates
    pub fn to_local(&self, device: Pos2) -> Pos2 {
        Pos2::ZERO + (device - self.origin)
    }

    /// Convert surface-local coordinates back into device coordinates
    pub fn to_device(&self, local: Pos2) -> Pos2 {
        self.origin + local.to_vec2()
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        tools: &mut ToolState,
        surface: &mut impl RasterSurface,
    ) -> PointerOutcome {
        match event {
            PointerEvent::Down { position } => self.press(position, tools, surface),
            PointerEvent::Move { position } => self.drag(position, tools, surface),
            PointerEvent::Up { .. } => self.release(tools),
        }
    }

    pub fn press(
        &mut self,
        device: Pos2,
        tools: &mut ToolState,
        surface: &mut impl RasterSurface,
    ) -> PointerOutcome {
        self.held = true;
        let point = self.to_local(device);

        match tools.behavior().press {
            PressAction::Paint => {
                let Some(brush) = tools.brush() else {
                    return PointerOutcome::Ignored;
                };
                surface.stamp_circle(point, brush.radius(), brush.color);
                self.last_point = Some(point);
                PointerOutcome::Painted
            }
            PressAction::Sample => {
                let color = surface.sample_color(point);
                tools.select_color(color);
                self.last_point = None;
                PointerOutcome::Picked(color)
            }
        }
    }

    pub fn drag(
        &mut self,
        device: Pos2,
        tools: &ToolState,
        surface: &mut impl RasterSurface,
    ) -> PointerOutcome {
        if !self.held || !tools.behavior().strokes_on_move {
            return PointerOutcome::Ignored;
        }
        let (Some(last), Some(brush)) = (self.last_point, tools.brush()) else {
            return PointerOutcome::Ignored;
        };

        let point = self.to_local(device);
        surface.stroke_line(last, point, brush.thickness, brush.color);
        surface.stamp_circle(point, brush.radius(), brush.color);
        self.last_point = Some(point);
        PointerOutcome::Painted
    }

    pub fn release(&mut self, tools: &ToolState) -> PointerOutcome {
        let was_held = std::mem::replace(&mut self.held, false);
        self.last_point = None;

        if was_held {
            PointerOutcome::Released {
                destructive: tools.behavior().destructive,
            }
        } else {
            PointerOutcome::Ignored
        }
    }

    /// Drop any in-progress stroke without reporting a release
    pub fn cancel(&mut self) {
        self.held = false;
        self.last_point = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::raster::RasterBuffer;
    use crate::tools::Tool;
    use egui::pos2;

    fn setup() -> (PointerController, ToolState, RasterBuffer) {
        (
            PointerController::new(pos2(100.0, 50.0)),
            ToolState::default(),
            RasterBuffer::square(500),
        )
    }

    #[test]
    fn test_device_to_local_translation() {
        let controller = PointerController::new(pos2(100.0, 50.0));
        assert_eq!(controller.to_local(pos2(110.0, 60.0)), pos2(10.0, 10.0));
        assert_eq!(controller.to_device(pos2(10.0, 10.0)), pos2(110.0, 60.0));
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let (mut controller, tools, mut buffer) = setup();
        let outcome = controller.drag(pos2(150.0, 150.0), &tools, &mut buffer);
        assert_eq!(outcome, PointerOutcome::Ignored);
        assert_eq!(buffer.revision(), 0);
    }

    #[test]
    fn test_press_stamps_and_tracks_last_point() {
        let (mut controller, mut tools, mut buffer) = setup();
        let outcome = controller.press(pos2(110.0, 60.0), &mut tools, &mut buffer);

        assert_eq!(outcome, PointerOutcome::Painted);
        assert!(controller.is_held());
        assert_eq!(controller.last_point(), Some(pos2(10.0, 10.0)));
        assert_eq!(buffer.sample_color(pos2(10.0, 10.0)), Color::BLACK);
    }

    #[test]
    fn test_release_clears_state() {
        let (mut controller, mut tools, mut buffer) = setup();
        controller.press(pos2(110.0, 60.0), &mut tools, &mut buffer);
        let outcome = controller.release(&tools);

        assert_eq!(outcome, PointerOutcome::Released { destructive: true });
        assert!(!controller.is_held());
        assert_eq!(controller.last_point(), None);
        assert_eq!(controller.release(&tools), PointerOutcome::Ignored);
    }

    #[test]
    fn test_picker_press_samples_color() {
        let (mut controller, mut tools, mut buffer) = setup();
        let teal = Color::rgb(75, 200, 200);
        buffer.stamp_circle(pos2(40.0, 40.0), 4.0, teal);
        tools.select_tool(Tool::Picker);

        let revision = buffer.revision();
        let outcome = controller.press(pos2(140.0, 90.0), &mut tools, &mut buffer);
        assert_eq!(outcome, PointerOutcome::Picked(teal));
        assert_eq!(tools.active_color(), teal);

        // Dragging with the picker never paints
        let outcome = controller.drag(pos2(200.0, 200.0), &tools, &mut buffer);
        assert_eq!(outcome, PointerOutcome::Ignored);
        assert_eq!(buffer.revision(), revision);
        assert_eq!(
            controller.release(&tools),
            PointerOutcome::Released { destructive: false }
        );
    }

    #[test]
    fn test_handle_dispatches_events() {
        let (mut controller, mut tools, mut buffer) = setup();
        let events = [
            PointerEvent::Down {
                position: pos2(110.0, 60.0),
            },
            PointerEvent::Move {
                position: pos2(130.0, 60.0),
            },
            PointerEvent::Up {
                position: pos2(130.0, 60.0),
            },
        ];
        let outcomes: Vec<_> = events
            .iter()
            .map(|&e| controller.handle(e, &mut tools, &mut buffer))
            .collect();

        assert_eq!(
            outcomes,
            vec![
                PointerOutcome::Painted,
                PointerOutcome::Painted,
                PointerOutcome::Released { destructive: true }
            ]
        );
        for x in 10..30 {
            assert_eq!(buffer.pixel(x, 10), Color::BLACK, "gap at x={x}");
        }
    }
}
