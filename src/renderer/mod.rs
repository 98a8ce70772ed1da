pub mod display_list;
pub mod raster;

use egui::{Color32, ColorImage, Context, Painter, Pos2, Rect, TextureHandle, TextureOptions, Vec2};

pub use display_list::{Blend, DrawOp, build_display_list, shape_paths, smooth_stroke};
pub use raster::Raster;

use crate::scene::Scene;
use crate::stroke::MutableStroke;

const CANVAS_TEXTURE_NAME: &str = "draft_pad_canvas";

/// The GPU side of the canvas. It exists only while the pad is open;
/// dropping it releases the texture.
struct CanvasSurface {
    ctx: Context,
    texture: Option<TextureHandle>,
}

/// Repaints the canvas from the scene on demand.
///
/// Mutations call [`Renderer::schedule`]. Any number of schedules before the
/// next frame collapse into a single redraw, performed by
/// [`Renderer::redraw_if_pending`].
pub struct Renderer {
    pending: bool,
    redraw_count: u64,
    canvas_size: Vec2,
    pixels_per_point: f32,
    raster: Option<Raster>,
    surface: Option<CanvasSurface>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            pending: false,
            redraw_count: 0,
            canvas_size: Vec2::ZERO,
            pixels_per_point: 1.0,
            raster: None,
            surface: None,
        }
    }

    /// Binds the renderer to an egui context for the lifetime of one open pad.
    pub fn attach(&mut self, ctx: &Context) {
        self.surface = Some(CanvasSurface {
            ctx: ctx.clone(),
            texture: None,
        });
        self.schedule();
    }

    /// Releases the canvas texture and forgets any pending redraw.
    pub fn detach(&mut self) {
        self.surface = None;
        self.pending = false;
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Marks the canvas dirty and asks egui for a frame, once per batch.
    pub fn schedule(&mut self) {
        if self.pending {
            return;
        }
        self.pending = true;
        if let Some(surface) = &self.surface {
            surface.ctx.request_repaint();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn redraw_count(&self) -> u64 {
        self.redraw_count
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    /// Matches the backing raster to the surface size in points and the
    /// device pixel ratio. Content is redrawn from the scene, not resampled.
    pub fn resize(&mut self, size: Vec2, pixels_per_point: f32) {
        if size == self.canvas_size && pixels_per_point == self.pixels_per_point && self.raster.is_some() {
            return;
        }
        self.canvas_size = size;
        self.pixels_per_point = pixels_per_point;

        let width = (size.x * pixels_per_point).round().max(1.0) as u32;
        let height = (size.y * pixels_per_point).round().max(1.0) as u32;
        log::debug!("Resizing canvas to {}x{} px (scale {})", width, height, pixels_per_point);
        self.raster = Some(Raster::new(width, height, pixels_per_point));
        self.schedule();
    }

    /// Performs the scheduled redraw, if any. Returns whether one happened.
    pub fn redraw_if_pending(&mut self, scene: &Scene, active_stroke: Option<&MutableStroke>) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;

        let Some(raster) = self.raster.as_mut() else {
            return false;
        };
        raster.clear();
        raster.draw(&build_display_list(scene, active_stroke));
        self.redraw_count += 1;

        if let Some(surface) = self.surface.as_mut() {
            let image = ColorImage::from_rgba_unmultiplied(raster.size(), raster.image().as_raw());
            match surface.texture.as_mut() {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => {
                    surface.texture =
                        Some(surface.ctx.load_texture(CANVAS_TEXTURE_NAME, image, TextureOptions::LINEAR));
                }
            }
        }
        true
    }

    /// Paints the last uploaded frame into `rect`.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let Some(texture) = self.surface.as_ref().and_then(|s| s.texture.as_ref()) else {
            return;
        };
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        painter.image(texture.id(), rect, uv, Color32::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedules_coalesce_into_one_redraw() {
        let mut renderer = Renderer::new();
        renderer.resize(Vec2::new(20.0, 20.0), 1.0);
        renderer.schedule();
        renderer.schedule();

        let scene = Scene::new();
        assert!(renderer.redraw_if_pending(&scene, None));
        assert!(!renderer.redraw_if_pending(&scene, None));
        assert_eq!(renderer.redraw_count(), 1);
    }

    #[test]
    fn resize_scales_backing_store() {
        let mut renderer = Renderer::new();
        renderer.resize(Vec2::new(30.0, 10.0), 2.0);
        assert_eq!(renderer.raster().map(|r| r.size()), Some([60, 20]));
        assert!(renderer.is_pending());
    }

    #[test]
    fn detach_drops_pending_redraw() {
        let mut renderer = Renderer::new();
        renderer.attach(&Context::default());
        assert!(renderer.is_attached());
        renderer.detach();
        assert!(!renderer.is_attached());
        assert!(!renderer.is_pending());
    }
}
