use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::CanvasConfig;
use crate::messages::MessageLog;
use crate::panels::{central_panel, heroes_panel, messages_panel, tools_panel};
use crate::request::{Reply, poll_reply, spawn_request};
use crate::session::{DrawingSession, SaveTicket};
use crate::store::{HeroId, HeroImageStore, MemoryHeroStore, PersistedImage};
use crate::texture_manager::CanvasTexture;

/// Storage key for the hero roster (JSON)
const HEROES_KEY: &str = "hero_sketch_heroes";

/// Settings restored when the app restarts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct AppSettings {
    pub config: CanvasConfig,
    pub selected_hero: Option<HeroId>,
}

pub struct DrawHeroApp {
    settings: AppSettings,
    store: MemoryHeroStore,
    session: Option<DrawingSession>,
    pending_load: Option<Reply<Option<PersistedImage>>>,
    pending_save: Option<(SaveTicket, Reply<()>)>,
    texture: CanvasTexture,
    messages: MessageLog,
    new_hero_name: String,
}

impl Default for DrawHeroApp {
    fn default() -> Self {
        Self::with_store(MemoryHeroStore::with_default_heroes(), AppSettings::default())
    }
}

impl DrawHeroApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut settings = AppSettings::default();
        let mut store = MemoryHeroStore::with_default_heroes();

        if let Some(storage) = cc.storage {
            if let Some(saved) = eframe::get_value::<AppSettings>(storage, eframe::APP_KEY) {
                settings = saved;
            }
            if let Some(json) = storage.get_string(HEROES_KEY) {
                match MemoryHeroStore::from_json(&json) {
                    Ok(saved) => store = saved,
                    Err(err) => log::warn!("Ignoring saved heroes: {err}"),
                }
            }
        }

        Self::with_store(store, settings)
    }

    pub fn with_store(store: MemoryHeroStore, mut settings: AppSettings) -> Self {
        if let Err(err) = settings.config.validate() {
            log::warn!("Invalid canvas config ({err}), using defaults");
            settings.config = CanvasConfig::default();
        }

        let reopen = settings
            .selected_hero
            .take()
            .filter(|hero| store.hero_name(*hero).is_some());
        let mut app = Self {
            settings,
            store,
            session: None,
            pending_load: None,
            pending_save: None,
            texture: CanvasTexture::default(),
            messages: MessageLog::default(),
            new_hero_name: String::new(),
        };
        if let Some(hero) = reopen {
            app.open_hero(hero);
        }
        app
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.settings.config
    }

    pub fn store(&self) -> &MemoryHeroStore {
        &self.store
    }

    pub fn session(&self) -> Option<&DrawingSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut DrawingSession> {
        self.session.as_mut()
    }

    /// The canvas texture together with the session it shows
    pub(crate) fn canvas_parts(&mut self) -> (&mut CanvasTexture, Option<&mut DrawingSession>) {
        (&mut self.texture, self.session.as_mut())
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }

    pub(crate) fn new_hero_name_mut(&mut self) -> &mut String {
        &mut self.new_hero_name
    }

    pub fn is_busy(&self) -> bool {
        self.pending_load.is_some() || self.pending_save.is_some()
    }

    pub fn add_hero(&mut self) {
        let name = self.new_hero_name.trim();
        if name.is_empty() {
            return;
        }
        match self.store.add_hero(name) {
            Ok(id) => {
                self.messages.output(format!("Added hero id={id}"));
                self.new_hero_name.clear();
            }
            Err(err) => self.messages.error(format!("Failed to add hero: {err}")),
        }
    }

    /// Open a drawing session for `hero`, discarding the current one
    pub fn open_hero(&mut self, hero: HeroId) {
        self.close_session();

        self.session = Some(DrawingSession::new(hero, &self.settings.config));
        self.pending_load = Some(spawn_request(self.store.fetch_image(hero)));
        self.settings.selected_hero = Some(hero);
    }

    pub fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            let mut log = session.close();
            self.messages.append(&mut log);
        }
        self.pending_load = None;
        self.pending_save = None;
        self.settings.selected_hero = None;
        self.texture.invalidate();
    }

    pub fn save_drawing(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };
        match session.begin_save() {
            Ok(pending) => {
                let (ticket, request) = pending.submit(&self.store);
                self.pending_save = Some((ticket, spawn_request(request)));
            }
            Err(err) => log::warn!("Save not started: {err}"),
        }
    }

    /// Apply store answers that arrived since the last frame
    pub fn poll_requests(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };

        if let Some(fetched) = self.pending_load.as_mut().and_then(poll_reply) {
            self.pending_load = None;
            match session.finish_load(fetched) {
                Ok(outcome) => log::debug!("Session {} loaded: {outcome:?}", session.id()),
                Err(err) => log::warn!("Session {} starts blank: {err}", session.id()),
            }
        }

        let saved = self
            .pending_save
            .as_mut()
            .and_then(|(ticket, reply)| poll_reply(reply).map(|result| (*ticket, result)));
        if let Some((ticket, result)) = saved {
            self.pending_save = None;
            if let Err(err) = session.finish_save(ticket, result) {
                log::warn!("Save for session {} failed: {err}", session.id());
            }
        }

        self.messages.append(session.messages_mut());
    }
}

impl eframe::App for DrawHeroApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
        match self.store.to_json() {
            Ok(json) => storage.set_string(HEROES_KEY, json),
            Err(err) => log::error!("Failed to persist heroes: {err}"),
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_requests();
        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(30));
        }

        heroes_panel(self, ctx);
        tools_panel(self, ctx);
        messages_panel(self, ctx);
        central_panel(self, ctx);

        if let Some(session) = &mut self.session {
            self.messages.append(session.messages_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerEvent;
    use crate::session::SessionState;
    use egui::pos2;

    /// Pump the app until no store request is pending
    fn settle(app: &mut DrawHeroApp) {
        for _ in 0..500 {
            app.poll_requests();
            if !app.is_busy() {
                return;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        panic!("store requests never completed");
    }

    #[test]
    fn test_open_draw_save_reopen() {
        let mut app = DrawHeroApp::default();
        app.open_hero(15);
        settle(&mut app);

        let session = app.session_mut().unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        session.handle_pointer(PointerEvent::Down {
            position: pos2(30.0, 30.0),
        });
        session.handle_pointer(PointerEvent::Up {
            position: pos2(30.0, 30.0),
        });

        app.save_drawing();
        assert!(app.is_busy());
        settle(&mut app);
        assert!(!app.session().unwrap().is_dirty());
        assert_eq!(app.store().is_drawn(15), Some(true));

        app.open_hero(15);
        settle(&mut app);
        let session = app.session().unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(
            crate::raster::RasterSurface::sample_color(session.surface(), pos2(30.0, 30.0)),
            crate::color::Color::BLACK
        );
    }

    #[test]
    fn test_add_hero_ignores_blank_names() {
        let mut app = DrawHeroApp::default();
        let before = app.store().hero_ids().len();

        *app.new_hero_name_mut() = "   ".to_owned();
        app.add_hero();
        assert_eq!(app.store().hero_ids().len(), before);

        *app.new_hero_name_mut() = "Captain Canvas".to_owned();
        app.add_hero();
        assert_eq!(app.store().hero_ids().len(), before + 1);
        assert!(app.new_hero_name_mut().is_empty());
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let settings = AppSettings {
            config: CanvasConfig {
                canvas_size: 4_000_000,
                ..Default::default()
            },
            selected_hero: Some(12),
        };
        let app = DrawHeroApp::with_store(MemoryHeroStore::with_default_heroes(), settings);
        assert_eq!(app.config(), &CanvasConfig::default());
        assert_eq!(app.session().map(|s| s.hero()), Some(12));
    }
}
