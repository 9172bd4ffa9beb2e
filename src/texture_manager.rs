use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use uuid::Uuid;

use crate::raster::{RasterBuffer, RasterSurface};

/// GPU copy of the canvas, re-uploaded only when the surface changes
#[derive(Default)]
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
    /// Session id and surface revision of the uploaded pixels
    uploaded: Option<(Uuid, u64)>,
}

impl std::fmt::Debug for CanvasTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasTexture")
            .field("has_handle", &self.handle.is_some())
            .field("uploaded", &self.uploaded)
            .finish()
    }
}

impl CanvasTexture {
    pub fn needs_upload(&self, session: Uuid, surface: &RasterBuffer) -> bool {
        self.handle.is_none() || self.uploaded != Some((session, surface.revision()))
    }

    pub fn texture_id(
        &mut self,
        ctx: &Context,
        session: Uuid,
        surface: &RasterBuffer,
    ) -> TextureId {
        if self.needs_upload(session, surface) {
            let size = [surface.width() as usize, surface.height() as usize];
            let image = ColorImage::from_rgba_unmultiplied(size, surface.as_raw());
            match &mut self.handle {
                Some(handle) => handle.set(image, TextureOptions::NEAREST),
                None => {
                    self.handle = Some(ctx.load_texture("hero_canvas", image, TextureOptions::NEAREST));
                }
            }
            self.uploaded = Some((session, surface.revision()));
        }

        match &self.handle {
            Some(handle) => handle.id(),
            None => TextureId::default(),
        }
    }

    /// Forget the uploaded pixels, e.g. when the session closes
    pub fn invalidate(&mut self) {
        self.uploaded = None;
    }
}
