use crate::DrawHeroApp;
use crate::components::tool_button::{SwatchButton, ToolButton};
use crate::tools::Tool;

pub fn tools_panel(app: &mut DrawHeroApp, ctx: &egui::Context) {
    let mut save_clicked = false;

    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        let hero_name = app
            .session()
            .and_then(|session| app.store().hero_name(session.hero()));
        let Some(session) = app.session_mut() else {
            ui.heading("Hero Sketch");
            return;
        };
        ui.heading(format!(
            "Draw {}",
            hero_name.unwrap_or_default().to_uppercase()
        ));

        ui.horizontal(|ui| {
            let active = session.tools().active_tool();
            for tool in Tool::ALL {
                if ToolButton::new(tool, tool == active).show(ui).clicked() {
                    session.select_tool(tool);
                }
            }

            ui.separator();

            if ui.button("Clear").clicked() {
                if let Err(err) = session.clear() {
                    log::warn!("Clear ignored: {err}");
                }
            }
            save_clicked = ui
                .add_enabled(session.can_save(), egui::Button::new("Save"))
                .clicked();
        });

        let active_color = session.tools().active_color();
        let palette = session.palette();
        let mut picked = None;
        for (row_index, row) in palette.rows().enumerate() {
            ui.horizontal(|ui| {
                for (column, swatch) in row.iter().enumerate() {
                    let button = SwatchButton {
                        name: swatch.name,
                        color: swatch.color,
                        selected: palette.is_selected(swatch, active_color),
                    };
                    if button.show(ui).clicked() {
                        picked = Some(row_index * palette.row_width() + column);
                    }
                }
            });
        }
        if let Some(index) = picked {
            session.select_swatch(index);
        }

        ui.horizontal(|ui| {
            ui.label("Color:");
            let color = session.tools().active_color();
            SwatchButton {
                name: "Active",
                color,
                selected: false,
            }
            .show(ui);
            ui.monospace(color.to_css_string());
        });
    });

    if save_clicked {
        app.save_drawing();
    }
}
