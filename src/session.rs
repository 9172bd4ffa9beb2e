//! A drawing session for one hero.
//!
//! The session owns the surface, the tool state and the dirty flag. It moves
//! through three states:
//!
//! - `Loading`: waiting for the stored image. Pointer input is ignored.
//! - `Ready`: the user paints freely.
//! - `Saving`: an encoded drawing is on its way to the store. Painting is
//!   still allowed but another save is not.
//!
//! Saving is split into [`DrawingSession::begin_save`] and
//! [`DrawingSession::finish_save`] so a UI can keep painting while the store
//! request is pending. [`DrawingSession::save`] runs both back to back.

use egui::Pos2;
use uuid::Uuid;

use crate::color::Color;
use crate::config::CanvasConfig;
use crate::error::{SessionError, SessionResult, StoreError};
use crate::input::{PointerController, PointerEvent, PointerOutcome};
use crate::messages::{MessageKind, MessageLog};
use crate::palette::Palette;
use crate::raster::{RasterBuffer, RasterSurface};
use crate::store::{HeroId, HeroImageStore, PersistedImage, StoreFuture};
use crate::tools::{Tool, ToolState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Ready,
    Saving,
}

/// How the surface was seeded when the session opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The hero had no image; the canvas starts blank
    Blank,
    /// The hero's drawing was decoded into the canvas
    Restored,
    /// The hero has an uploaded picture, which is never opened for editing
    SkippedUpload,
}

/// Identifies one in-flight save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    session: Uuid,
    edits: u64,
}

/// An encoded drawing ready to be handed to the store
#[derive(Debug)]
pub struct PendingSave {
    hero: HeroId,
    bytes: Vec<u8>,
    ticket: SaveTicket,
}

impl PendingSave {
    pub fn hero(&self) -> HeroId {
        self.hero
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn ticket(&self) -> SaveTicket {
        self.ticket
    }

    /// Send the drawing to the store, flagged as drawn
    pub fn submit(self, store: &dyn HeroImageStore) -> (SaveTicket, StoreFuture<()>) {
        (self.ticket, store.save_image(self.hero, self.bytes, true))
    }
}

#[derive(Debug)]
pub struct DrawingSession<S: RasterSurface = RasterBuffer> {
    id: Uuid,
    hero: HeroId,
    state: SessionState,
    surface: S,
    tools: ToolState,
    pointer: PointerController,
    palette: Palette,
    dirty: bool,
    /// Number of modifications since the session opened
    edits: u64,
    pending_save: Option<SaveTicket>,
    messages: MessageLog,
}

impl DrawingSession<RasterBuffer> {
    /// A session with a blank in-memory canvas, waiting for its image
    pub fn new(hero: HeroId, config: &CanvasConfig) -> Self {
        Self::with_surface(hero, config, RasterBuffer::square(config.canvas_size))
    }

    /// Create a session and seed it from the store
    pub async fn open(
        hero: HeroId,
        config: &CanvasConfig,
        store: &dyn HeroImageStore,
    ) -> (Self, SessionResult<LoadOutcome>) {
        let mut session = Self::new(hero, config);
        let outcome = session.load(store).await;
        (session, outcome)
    }
}

impl<S: RasterSurface> DrawingSession<S> {
    pub fn with_surface(hero: HeroId, config: &CanvasConfig, surface: S) -> Self {
        let id = Uuid::new_v4();
        log::debug!(
            "[{id}] Drawing session for hero id={hero} ({}x{})",
            surface.width(),
            surface.height()
        );
        Self {
            id,
            hero,
            state: SessionState::Loading,
            surface,
            tools: ToolState::new(config),
            pointer: PointerController::default(),
            palette: Palette::new(
                crate::palette::DEFAULT_SWATCHES.to_vec(),
                config.colors_per_row,
            ),
            dirty: false,
            edits: 0,
            pending_save: None,
            messages: MessageLog::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn hero(&self) -> HeroId {
        self.hero
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Save is offered only when there are unsaved changes and no save is pending
    pub fn can_save(&self) -> bool {
        self.state == SessionState::Ready && self.dirty
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn pointer(&self) -> &PointerController {
        &self.pointer
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }

    /// Screen position of the canvas' top-left corner
    pub fn set_surface_origin(&mut self, origin: Pos2) {
        self.pointer.set_origin(origin);
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tools.select_tool(tool);
    }

    pub fn select_color(&mut self, color: Color) {
        self.tools.select_color(color);
    }

    /// Make a palette entry the active color. The active tool is unchanged.
    pub fn select_swatch(&mut self, index: usize) -> Option<Color> {
        let color = self.palette.get(index)?.color;
        self.tools.select_color(color);
        Some(color)
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        if self.state == SessionState::Loading {
            return PointerOutcome::Ignored;
        }

        let outcome = self.pointer.handle(event, &mut self.tools, &mut self.surface);
        match outcome {
            PointerOutcome::Picked(color) => {
                self.messages.output(format!("Picked color {color}"));
            }
            PointerOutcome::Released { destructive: true } => self.mark_dirty(),
            _ => {}
        }
        outcome
    }

    /// Paint the whole canvas white
    pub fn clear(&mut self) -> SessionResult<()> {
        if self.state == SessionState::Loading {
            return Err(SessionError::InvalidState(self.state));
        }
        self.surface.fill(Color::WHITE);
        self.mark_dirty();
        self.messages.output("Cleared drawing");
        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.edits += 1;
    }

    /// Reset to a blank canvas and wait for the stored image
    pub fn begin_load(&mut self) -> SessionResult<()> {
        if self.state == SessionState::Saving {
            return Err(SessionError::SaveInFlight);
        }
        self.pointer.cancel();
        self.surface.fill(Color::WHITE);
        self.dirty = false;
        self.state = SessionState::Loading;
        Ok(())
    }

    /// Apply the store's answer to a fetch. The session is `Ready` afterwards,
    /// with a blank canvas whenever nothing could be restored.
    pub fn finish_load(
        &mut self,
        fetched: Result<Option<PersistedImage>, StoreError>,
    ) -> SessionResult<LoadOutcome> {
        if self.state != SessionState::Loading {
            return Err(SessionError::InvalidState(self.state));
        }
        self.state = SessionState::Ready;
        self.dirty = false;

        let image = match fetched {
            Ok(Some(image)) => image,
            Ok(None) => {
                log::info!("[{}] Hero id={} has no image", self.id, self.hero);
                return Ok(LoadOutcome::Blank);
            }
            Err(err) => {
                self.messages.error(format!("Failed to load drawing: {err}"));
                return Err(err.into());
            }
        };

        if !image.is_engine_drawn {
            self.messages.add(
                MessageKind::Info,
                "Hero picture was uploaded; starting a new drawing",
            );
            return Ok(LoadOutcome::SkippedUpload);
        }

        match self.restore(&image) {
            Ok(()) => {
                log::info!("[{}] Restored drawing for hero id={}", self.id, self.hero);
                Ok(LoadOutcome::Restored)
            }
            Err(err) => {
                self.surface.fill(Color::WHITE);
                self.messages.error(format!("Failed to load drawing: {err}"));
                Err(err)
            }
        }
    }

    pub async fn load(&mut self, store: &dyn HeroImageStore) -> SessionResult<LoadOutcome> {
        self.begin_load()?;
        let fetched = store.fetch_image(self.hero).await;
        self.finish_load(fetched)
    }

    /// Decode a stored drawing into the canvas. Uploaded pictures are refused.
    /// Only allowed while `Ready`; a pending save must not race a restore.
    pub fn restore(&mut self, image: &PersistedImage) -> SessionResult<()> {
        if self.state != SessionState::Ready {
            return Err(SessionError::InvalidState(self.state));
        }
        if !image.is_engine_drawn {
            return Err(SessionError::NotEngineDrawn);
        }
        self.surface.load_from_encoded_bytes(&image.bytes)?;
        self.dirty = false;
        Ok(())
    }

    /// Encode the canvas and enter `Saving`.
    ///
    /// Nothing is sent anywhere; the caller submits the returned
    /// [`PendingSave`] and reports the answer to [`Self::finish_save`].
    pub fn begin_save(&mut self) -> SessionResult<PendingSave> {
        match self.state {
            SessionState::Ready => {}
            SessionState::Saving => return Err(SessionError::SaveInFlight),
            SessionState::Loading => return Err(SessionError::InvalidState(self.state)),
        }
        if !self.dirty {
            return Err(SessionError::NotDirty);
        }

        let bytes = match self.surface.to_encoded_bytes() {
            Ok(bytes) => bytes,
            Err(err) => {
                self.messages.error(err.to_string());
                return Err(err.into());
            }
        };

        let ticket = SaveTicket {
            session: self.id,
            edits: self.edits,
        };
        self.pending_save = Some(ticket);
        self.state = SessionState::Saving;
        log::info!(
            "[{}] Saving {} byte drawing for hero id={}",
            self.id,
            bytes.len(),
            self.hero
        );

        Ok(PendingSave {
            hero: self.hero,
            bytes,
            ticket,
        })
    }

    /// Record the store's answer to a save.
    ///
    /// On success the dirty flag is cleared unless the drawing changed while
    /// the save was pending. On failure the dirty flag is kept so the user can retry.
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<(), StoreError>,
    ) -> SessionResult<()> {
        if self.pending_save != Some(ticket) {
            return Err(SessionError::StaleTicket);
        }
        self.pending_save = None;
        self.state = SessionState::Ready;

        match result {
            Ok(()) => {
                if self.edits == ticket.edits {
                    self.dirty = false;
                }
                self.messages.output("Drawing saved successfully");
                Ok(())
            }
            Err(err) => {
                self.messages.error(format!("Failed to save drawing: {err}"));
                Err(err.into())
            }
        }
    }

    pub async fn save(&mut self, store: &dyn HeroImageStore) -> SessionResult<()> {
        let (ticket, request) = self.begin_save()?.submit(store);
        let result = request.await;
        self.finish_save(ticket, result)
    }

    /// End the session, dropping any unsaved changes
    pub fn close(self) -> MessageLog {
        if self.dirty {
            log::info!(
                "[{}] Discarding unsaved drawing for hero id={}",
                self.id,
                self.hero
            );
        }
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryHeroStore;
    use egui::pos2;
    use futures::executor::block_on;

    fn ready_session() -> DrawingSession {
        let mut session = DrawingSession::new(1, &CanvasConfig::default());
        session.finish_load(Ok(None)).unwrap();
        session
    }

    fn scribble(session: &mut DrawingSession) {
        session.handle_pointer(PointerEvent::Down {
            position: pos2(20.0, 20.0),
        });
        session.handle_pointer(PointerEvent::Up {
            position: pos2(20.0, 20.0),
        });
    }

    #[test]
    fn test_new_session_is_loading() {
        let mut session = DrawingSession::new(1, &CanvasConfig::default());
        assert_eq!(session.state(), SessionState::Loading);
        assert!(!session.can_save());

        let outcome = session.handle_pointer(PointerEvent::Down {
            position: pos2(5.0, 5.0),
        });
        assert_eq!(outcome, PointerOutcome::Ignored);
        assert!(matches!(
            session.clear(),
            Err(SessionError::InvalidState(SessionState::Loading))
        ));
    }

    #[test]
    fn test_finish_load_only_once() {
        let mut session = ready_session();
        assert!(matches!(
            session.finish_load(Ok(None)),
            Err(SessionError::InvalidState(SessionState::Ready))
        ));
    }

    #[test]
    fn test_second_save_waits_for_first() {
        let mut session = ready_session();
        scribble(&mut session);

        let pending = session.begin_save().unwrap();
        assert_eq!(session.state(), SessionState::Saving);
        assert!(!session.can_save());
        assert!(matches!(
            session.begin_save(),
            Err(SessionError::SaveInFlight)
        ));

        session.finish_save(pending.ticket(), Ok(())).unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_painting_during_save_keeps_dirty() {
        let mut session = ready_session();
        scribble(&mut session);
        let pending = session.begin_save().unwrap();

        // Painting is still allowed while the save is in flight
        scribble(&mut session);
        session.finish_save(pending.ticket(), Ok(())).unwrap();

        assert!(session.is_dirty());
        assert!(session.can_save());
    }

    #[test]
    fn test_stale_ticket_is_rejected() {
        let mut session = ready_session();
        scribble(&mut session);
        let pending = session.begin_save().unwrap();
        let ticket = pending.ticket();
        session.finish_save(ticket, Ok(())).unwrap();

        assert!(matches!(
            session.finish_save(ticket, Ok(())),
            Err(SessionError::StaleTicket)
        ));
    }

    #[test]
    fn test_swatch_selection_keeps_tool() {
        let mut session = ready_session();
        session.select_tool(Tool::Eraser);
        assert_eq!(session.select_swatch(2), Some(Color::rgb(255, 255, 0)));
        assert_eq!(session.tools().active_tool(), Tool::Eraser);
        assert_eq!(session.select_swatch(99), None);
    }

    #[test]
    fn test_open_seeds_from_store() {
        let store = MemoryHeroStore::with_default_heroes();
        let (session, outcome) =
            block_on(DrawingSession::open(12, &CanvasConfig::default(), &store));
        assert_eq!(outcome.unwrap(), LoadOutcome::Blank);
        assert_eq!(session.state(), SessionState::Ready);
        assert!(!session.is_dirty());
    }
}
