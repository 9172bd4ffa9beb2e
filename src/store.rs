//! The hero image store the drawing panel loads from and saves to.
//!
//! The store is an asynchronous key-value slot keyed by hero id. It is
//! responsible for durability; the drawing session only ever issues one
//! request and awaits its answer.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub type HeroId = u32;

/// Encoded image bytes plus their provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedImage {
    pub bytes: Vec<u8>,
    /// `true` when the bytes came from the drawing panel, `false` for uploads
    pub is_engine_drawn: bool,
}

impl PersistedImage {
    pub fn drawn(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            is_engine_drawn: true,
        }
    }

    pub fn uploaded(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            is_engine_drawn: false,
        }
    }
}

pub type StoreFuture<T> = BoxFuture<'static, Result<T, StoreError>>;

/// Outbound interface to wherever hero images live
pub trait HeroImageStore: Send + Sync {
    /// `Ok(None)` when the hero has no image yet
    fn fetch_image(&self, hero: HeroId) -> StoreFuture<Option<PersistedImage>>;

    fn save_image(&self, hero: HeroId, bytes: Vec<u8>, is_engine_drawn: bool) -> StoreFuture<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroRecord {
    pub id: HeroId,
    pub name: String,
    #[serde(default)]
    pub image: Option<PersistedImage>,
}

/// In-process store shared between the UI and pending requests
#[derive(Debug, Clone, Default)]
pub struct MemoryHeroStore {
    heroes: Arc<RwLock<BTreeMap<HeroId, HeroRecord>>>,
}

impl MemoryHeroStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = HeroRecord>) -> Self {
        let heroes = records.into_iter().map(|r| (r.id, r)).collect();
        Self {
            heroes: Arc::new(RwLock::new(heroes)),
        }
    }

    /// The starter roster
    pub fn with_default_heroes() -> Self {
        let names = [
            (12, "Nice Guy"),
            (13, "Bombasto"),
            (14, "Celeritas"),
            (15, "Magneta"),
            (16, "RubberMan"),
            (17, "Dynama"),
            (18, "Dr. IQ"),
            (19, "Magma Man"),
            (20, "Tornadude"),
        ];
        Self::from_records(names.into_iter().map(|(id, name)| HeroRecord {
            id,
            name: name.to_owned(),
            image: None,
        }))
    }

    /// Adds a hero with the id after the highest one in use
    pub fn add_hero(&self, name: impl Into<String>) -> Result<HeroId, StoreError> {
        let mut heroes = self.heroes.write();
        let id = match heroes.keys().next_back() {
            Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted)?,
            None => 1,
        };
        let name = name.into();
        log::info!("Added hero id={id} ({name})");
        heroes.insert(
            id,
            HeroRecord {
                id,
                name,
                image: None,
            },
        );
        Ok(id)
    }

    pub fn hero_ids(&self) -> Vec<HeroId> {
        self.heroes.read().keys().copied().collect()
    }

    pub fn hero_name(&self, hero: HeroId) -> Option<String> {
        self.heroes.read().get(&hero).map(|r| r.name.clone())
    }

    pub fn image(&self, hero: HeroId) -> Option<PersistedImage> {
        self.heroes.read().get(&hero).and_then(|r| r.image.clone())
    }

    /// `Some(true)` for a drawn image, `Some(false)` for an upload, `None` without an image
    pub fn is_drawn(&self, hero: HeroId) -> Option<bool> {
        self.heroes
            .read()
            .get(&hero)
            .and_then(|r| r.image.as_ref())
            .map(|image| image.is_engine_drawn)
    }

    /// Store an externally uploaded picture. The drawing panel will not open it for editing.
    pub fn upload_image(&self, hero: HeroId, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.put_image(hero, PersistedImage::uploaded(bytes))
    }

    fn put_image(&self, hero: HeroId, image: PersistedImage) -> Result<(), StoreError> {
        let mut heroes = self.heroes.write();
        let record = heroes.get_mut(&hero).ok_or(StoreError::UnknownHero(hero))?;
        log::info!(
            "Stored {} byte image for hero id={hero} (drawn: {})",
            image.bytes.len(),
            image.is_engine_drawn
        );
        record.image = Some(image);
        Ok(())
    }

    pub fn records(&self) -> Vec<HeroRecord> {
        self.heroes.read().values().cloned().collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records())
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let records: Vec<HeroRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }
}

impl HeroImageStore for MemoryHeroStore {
    fn fetch_image(&self, hero: HeroId) -> StoreFuture<Option<PersistedImage>> {
        let result = match self.heroes.read().get(&hero) {
            Some(record) => Ok(record.image.clone()),
            None => Err(StoreError::UnknownHero(hero)),
        };
        futures::future::ready(result).boxed()
    }

    fn save_image(&self, hero: HeroId, bytes: Vec<u8>, is_engine_drawn: bool) -> StoreFuture<()> {
        let store = self.clone();
        async move {
            store.put_image(
                hero,
                PersistedImage {
                    bytes,
                    is_engine_drawn,
                },
            )
        }
        .boxed()
    }
}
