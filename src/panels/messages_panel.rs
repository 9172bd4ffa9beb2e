use egui::{Color32, RichText};

use crate::DrawHeroApp;
use crate::messages::MessageKind;
use crate::util::time::clock_string;

fn kind_color(kind: MessageKind) -> Color32 {
    match kind {
        MessageKind::Output => Color32::LIGHT_GRAY,
        MessageKind::Info => Color32::from_rgb(100, 181, 246),
        MessageKind::Warning => Color32::from_rgb(255, 193, 7),
        MessageKind::Error => Color32::from_rgb(239, 83, 80),
    }
}

pub fn messages_panel(app: &mut DrawHeroApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("messages_panel")
        .resizable(true)
        .default_height(120.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Messages");
                if ui.small_button("Clear").clicked() {
                    app.messages_mut().clear();
                }
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for message in app.messages().iter() {
                        ui.horizontal(|ui| {
                            ui.monospace(clock_string(message.timestamp));
                            ui.label(RichText::new(&message.text).color(kind_color(message.kind)));
                        });
                    }
                });
        });
}
