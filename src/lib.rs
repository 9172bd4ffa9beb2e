#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod codec;
pub mod color;
pub mod components;
pub mod config;
pub mod error;
pub mod input;
pub mod messages;
pub mod palette;
pub mod panels;
pub mod raster;
pub mod request;
pub mod session;
pub mod store;
pub mod texture_manager;
pub mod tools;
pub mod util;

pub use app::{AppSettings, DrawHeroApp};
pub use codec::ImageCodec;
pub use color::Color;
pub use config::CanvasConfig;
pub use error::{CodecError, SessionError, StoreError};
pub use input::{PointerEvent, PointerOutcome};
pub use messages::{MessageKind, MessageLog};
pub use palette::Palette;
pub use raster::{RasterBuffer, RasterSurface};
pub use session::{DrawingSession, LoadOutcome, SessionState};
pub use store::{HeroId, HeroImageStore, MemoryHeroStore, PersistedImage};
pub use tools::{Tool, ToolState};
