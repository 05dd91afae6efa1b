// src/app/gfx.rs
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use eframe::egui::{self as eg, ColorImage, TextureHandle};
use tracing::debug;

use super::cache::{find_cached, load_rgba, url_to_cache_key};
use super::types::PosterState;

pub const MAX_UPLOADS_PER_FRAME: usize = 4;

/// Upload an RGBA image to a GPU texture. (UI thread only)
pub fn upload_rgba(ctx: &eg::Context, w: u32, h: u32, bytes: &[u8], name: &str) -> TextureHandle {
    let img = ColorImage::from_rgba_unmultiplied([w as usize, h as usize], bytes);
    ctx.load_texture(name.to_string(), img, eg::TextureOptions::LINEAR)
}

struct PosterSlot {
    key: String,
    path: Option<PathBuf>,
    tex: Option<TextureHandle>,
    state: PosterState,
}

/// Artwork textures keyed by URL, uploaded lazily from the disk cache.
pub struct Posters {
    dir: PathBuf,
    slots: HashMap<String, PosterSlot>,
    uploads_left: usize,
}

impl Posters {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            slots: HashMap::new(),
            uploads_left: MAX_UPLOADS_PER_FRAME,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reset the per-frame upload budget.
    pub fn begin_frame(&mut self) {
        self.uploads_left = MAX_UPLOADS_PER_FRAME;
    }

    fn slot(&mut self, url: &str) -> &mut PosterSlot {
        let dir = &self.dir;
        self.slots.entry(url.to_string()).or_insert_with(|| {
            let key = url_to_cache_key(url);
            let path = find_cached(dir, &key);
            let state = if path.is_some() {
                PosterState::Cached
            } else {
                PosterState::Pending
            };
            PosterSlot {
                key,
                path,
                tex: None,
                state,
            }
        })
    }

    pub fn state(&mut self, url: &str) -> PosterState {
        self.slot(url).state
    }

    pub fn mark_cached(&mut self, url: &str, path: PathBuf) {
        let slot = self.slot(url);
        slot.path = Some(path);
        if slot.state != PosterState::Ready {
            slot.state = PosterState::Cached;
        }
    }

    pub fn mark_failed(&mut self, url: &str) {
        let slot = self.slot(url);
        if slot.state != PosterState::Ready {
            slot.state = PosterState::Failed;
        }
    }

    /// Texture for `url` if it is on disk; uploads count against this frame's budget.
    pub fn texture(&mut self, ctx: &eg::Context, url: &str) -> Option<TextureHandle> {
        if url.is_empty() {
            return None;
        }
        let can_upload = self.uploads_left > 0;
        let slot = self.slot(url);
        if let Some(tex) = &slot.tex {
            return Some(tex.clone());
        }
        if slot.state != PosterState::Cached || !can_upload {
            return None;
        }
        let path = slot.path.clone()?;
        match load_rgba(&path) {
            Ok((w, h, bytes)) => {
                let tex = upload_rgba(ctx, w, h, &bytes, &slot.key);
                slot.tex = Some(tex.clone());
                slot.state = PosterState::Ready;
                self.uploads_left -= 1;
                Some(tex)
            }
            Err(e) => {
                debug!("poster upload failed: {e}");
                slot.state = PosterState::Failed;
                None
            }
        }
    }
}

/// Paint `tex` into `rect`, cropping it to the rect's aspect ratio.
pub fn paint_cover(painter: &eg::Painter, rect: eg::Rect, tex: &TextureHandle, tint: eg::Color32) {
    let [tw, th] = tex.size();
    let tex_ar = tw as f32 / th.max(1) as f32;
    let rect_ar = rect.width() / rect.height().max(1.0);
    let uv = if tex_ar > rect_ar {
        let w = rect_ar / tex_ar;
        eg::Rect::from_min_max(eg::pos2(0.5 - w / 2.0, 0.0), eg::pos2(0.5 + w / 2.0, 1.0))
    } else {
        let h = tex_ar / rect_ar;
        eg::Rect::from_min_max(eg::pos2(0.0, 0.5 - h / 2.0), eg::pos2(1.0, 0.5 + h / 2.0))
    };
    painter.image(tex.id(), rect, uv, tint);
}

/// Grey placeholder with a centred caption.
pub fn paint_placeholder(painter: &eg::Painter, rect: eg::Rect, caption: &str) {
    painter.rect_filled(rect, 4.0, eg::Color32::from_gray(40));
    painter.text(
        rect.center(),
        eg::Align2::CENTER_CENTER,
        caption,
        eg::FontId::proportional(14.0),
        eg::Color32::from_gray(170),
    );
}

/// Vertical fade from `top` to `bottom` colour across `rect`.
pub fn paint_fade(painter: &eg::Painter, rect: eg::Rect, top: eg::Color32, bottom: eg::Color32) {
    let mut mesh = eg::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(2, 1, 3);
    painter.add(eg::Shape::mesh(mesh));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_urls_start_pending_and_track_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let mut posters = Posters::new(dir.path().to_path_buf());
        assert_eq!(posters.state("https://x/a.jpg"), PosterState::Pending);

        posters.mark_failed("https://x/a.jpg");
        assert_eq!(posters.state("https://x/a.jpg"), PosterState::Failed);

        posters.mark_cached("https://x/b.jpg", dir.path().join("b.jpg"));
        assert_eq!(posters.state("https://x/b.jpg"), PosterState::Cached);
    }

    #[test]
    fn files_already_on_disk_are_cached() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://x/c.jpg";
        std::fs::write(dir.path().join(format!("{}.jpg", url_to_cache_key(url))), b"x").unwrap();
        let mut posters = Posters::new(dir.path().to_path_buf());
        assert_eq!(posters.state(url), PosterState::Cached);
    }
}
