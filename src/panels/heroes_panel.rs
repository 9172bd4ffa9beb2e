use crate::DrawHeroApp;

pub fn heroes_panel(app: &mut DrawHeroApp, ctx: &egui::Context) {
    let mut open = None;

    egui::SidePanel::left("heroes_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Heroes");
            ui.separator();

            let current = app.session().map(|session| session.hero());
            egui::ScrollArea::vertical()
                .max_height(ui.available_height() - 60.0)
                .show(ui, |ui| {
                    for hero in app.store().hero_ids() {
                        let name = app.store().hero_name(hero).unwrap_or_default();
                        let marker = match app.store().is_drawn(hero) {
                            Some(true) => "✏ ",
                            Some(false) => "🖼 ",
                            None => "",
                        };
                        let label = format!("{marker}{hero}  {name}");
                        if ui.selectable_label(current == Some(hero), label).clicked() {
                            open = Some(hero);
                        }
                    }
                });

            ui.separator();
            ui.horizontal(|ui| {
                let field = ui.add(
                    egui::TextEdit::singleline(app.new_hero_name_mut())
                        .hint_text("New hero")
                        .desired_width(110.0),
                );
                let submitted =
                    field.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
                if ui.button("Add").clicked() || submitted {
                    app.add_hero();
                }
            });
        });

    if let Some(hero) = open.filter(|hero| app.session().map(|s| s.hero()) != Some(*hero)) {
        app.open_hero(hero);
    }
}
