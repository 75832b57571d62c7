//! Canvas-2D implementation of [`Surface`]

use web_sys::CanvasRenderingContext2d;

use super::{Sprite, Surface};
use crate::assets::AssetSet;

/// Draws onto a 2D canvas context using preloaded sprite images.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    assets: AssetSet,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, assets: AssetSet, width: f64, height: f64) -> Self {
        Self {
            ctx,
            assets,
            width,
            height,
        }
    }

    /// Track a canvas resize so `clear` covers the whole surface.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn sprite_width(&self, sprite: Sprite) -> f32 {
        self.assets
            .image(sprite)
            .map(|img| img.natural_width() as f32)
            .unwrap_or(0.0)
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32, w: f32, h: f32, mirrored: bool) {
        let Some(img) = self.assets.image(sprite) else {
            return;
        };
        if !mirrored {
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                x as f64,
                y as f64,
                w as f64,
                h as f64,
            );
            return;
        }

        // Flip around the sprite's vertical center line
        self.ctx.save();
        let _ = self
            .ctx
            .translate((x + w / 2.0) as f64, (y + h / 2.0) as f64);
        let _ = self.ctx.scale(-1.0, 1.0);
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            (-w / 2.0) as f64,
            (-h / 2.0) as f64,
            w as f64,
            h as f64,
        );
        self.ctx.restore();
    }

    fn fill_rect(&mut self, color: &str, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(x as f64, y as f64, w as f64, h as f64);
    }
}
