//! Frame composition over an abstract drawing surface
//!
//! [`draw_frame`] turns a [`GameState`](crate::sim::GameState) into an
//! ordered sequence of draw calls against a [`Surface`]. Keeping the pass
//! behind a trait keeps layering and camera math testable without a canvas;
//! the wasm backend lives in [`canvas`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use crate::Settings;
use crate::consts::PARALLAX_FACTOR;
use crate::sim::GameState;

/// Sprite identifiers, one per loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Ground,
    Background,
    Monster,
    Bean,
    Milk,
}

/// Drawing backend for one frame. Coordinates are screen-space pixels;
/// `draw_frame` applies the camera before calling in.
pub trait Surface {
    fn clear(&mut self);
    /// Natural width of a sprite's image, used for background tiling.
    fn sprite_width(&self, sprite: Sprite) -> f32;
    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32, w: f32, h: f32, mirrored: bool);
    fn fill_rect(&mut self, color: &str, x: f32, y: f32, w: f32, h: f32);
}

const GOAL_COLOR: &str = "#f1c40f";

/// Compose one frame back to front: background, platforms, goal, monsters,
/// pickups, player.
pub fn draw_frame(state: &GameState, settings: &Settings, surface: &mut impl Surface) {
    surface.clear();
    let cam_x = state.camera.x;

    // Background scrolls at half camera speed and tiles across the viewport.
    // f32 `%` keeps the dividend's sign, so `x` starts in (-bg_w, 0].
    if settings.parallax {
        let bg_w = surface.sprite_width(Sprite::Background);
        if bg_w > 0.0 {
            let mut x = -(cam_x * PARALLAX_FACTOR) % bg_w;
            while x < state.viewport_w {
                surface.draw_sprite(Sprite::Background, x, 0.0, bg_w, state.viewport_h, false);
                x += bg_w;
            }
        }
    }

    for platform in &state.level.platforms {
        surface.draw_sprite(
            Sprite::Ground,
            platform.x - cam_x,
            platform.y,
            platform.w,
            platform.h,
            false,
        );
    }

    let goal = &state.level.goal;
    surface.fill_rect(GOAL_COLOR, goal.x - cam_x, goal.y, goal.w, goal.h);

    for patroller in &state.level.patrollers {
        surface.draw_sprite(
            Sprite::Monster,
            patroller.aabb.x - cam_x,
            patroller.aabb.y,
            patroller.aabb.w,
            patroller.aabb.h,
            patroller.moving_left(),
        );
    }

    for collectible in &state.level.collectibles {
        let sprite = match collectible.kind {
            crate::sim::CollectibleKind::Bean => Sprite::Bean,
            crate::sim::CollectibleKind::Milk => Sprite::Milk,
        };
        let bob = if settings.reduced_motion {
            0.0
        } else {
            collectible.bob()
        };
        surface.draw_sprite(
            sprite,
            collectible.aabb.x - cam_x,
            collectible.aabb.y + bob,
            collectible.aabb.w,
            collectible.aabb.h,
            false,
        );
    }

    let player = &state.player;
    surface.draw_sprite(
        Sprite::Player,
        player.aabb.x - cam_x,
        player.aabb.y,
        player.aabb.w,
        player.aabb.h,
        !player.facing_right,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Sprite(Sprite, f32, f32, bool),
        Rect(f32, f32),
    }

    /// Surface that records calls instead of drawing.
    struct RecordingSurface {
        calls: Vec<Call>,
        background_width: f32,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                background_width: 512.0,
            }
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn sprite_width(&self, sprite: Sprite) -> f32 {
            match sprite {
                Sprite::Background => self.background_width,
                _ => 64.0,
            }
        }

        fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32, _w: f32, _h: f32, mirrored: bool) {
            self.calls.push(Call::Sprite(sprite, x, y, mirrored));
        }

        fn fill_rect(&mut self, _color: &str, x: f32, y: f32, _w: f32, _h: f32) {
            self.calls.push(Call::Rect(x, y));
        }
    }

    fn state() -> GameState {
        let mut state = GameState::new(3, 800.0, 600.0);
        state.start(3);
        state.drain_events();
        state
    }

    #[test]
    fn test_frame_starts_with_clear_and_ends_with_player() {
        let state = state();
        let mut surface = RecordingSurface::new();
        draw_frame(&state, &Settings::default(), &mut surface);

        assert_eq!(surface.calls.first(), Some(&Call::Clear));
        assert!(matches!(
            surface.calls.last(),
            Some(Call::Sprite(Sprite::Player, ..))
        ));
    }

    #[test]
    fn test_camera_offsets_world_sprites() {
        let mut state = state();
        state.camera.x = 250.0;
        let first_platform = state.level.platforms[0];

        let mut surface = RecordingSurface::new();
        draw_frame(&state, &Settings::default(), &mut surface);

        let drawn = surface
            .calls
            .iter()
            .find_map(|c| match c {
                Call::Sprite(Sprite::Ground, x, y, _) => Some((*x, *y)),
                _ => None,
            })
            .unwrap();
        assert_eq!(drawn, (first_platform.x - 250.0, first_platform.y));
    }

    #[test]
    fn test_background_tiles_cover_the_viewport() {
        let mut state = state();
        state.camera.x = 1234.0;
        let mut surface = RecordingSurface::new();
        draw_frame(&state, &Settings::default(), &mut surface);

        let tiles: Vec<f32> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Sprite(Sprite::Background, x, ..) => Some(*x),
                _ => None,
            })
            .collect();
        assert!(!tiles.is_empty());
        // First tile starts at or left of the screen edge, and tiling
        // continues past the right edge
        assert!(tiles[0] <= 0.0);
        assert!(tiles.last().unwrap() + 512.0 >= 800.0);
        for pair in tiles.windows(2) {
            assert_eq!(pair[1] - pair[0], 512.0);
        }
    }

    #[test]
    fn test_parallax_off_skips_the_background() {
        let state = state();
        let mut surface = RecordingSurface::new();
        let settings = Settings {
            parallax: false,
            ..Default::default()
        };
        draw_frame(&state, &settings, &mut surface);

        assert!(
            !surface
                .calls
                .iter()
                .any(|c| matches!(c, Call::Sprite(Sprite::Background, ..)))
        );
    }

    #[test]
    fn test_player_mirrors_when_facing_left() {
        let mut state = state();
        state.player.facing_right = false;
        let mut surface = RecordingSurface::new();
        draw_frame(&state, &Settings::default(), &mut surface);

        assert!(matches!(
            surface.calls.last(),
            Some(Call::Sprite(Sprite::Player, _, _, true))
        ));
    }

    #[test]
    fn test_reduced_motion_freezes_the_bob() {
        let mut state = state();
        for c in &mut state.level.collectibles {
            for _ in 0..4 {
                c.step();
            }
        }
        let Some(first) = state.level.collectibles.first() else {
            return;
        };
        let base_y = first.aabb.y;

        let mut surface = RecordingSurface::new();
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        draw_frame(&state, &settings, &mut surface);

        let drawn_y = surface
            .calls
            .iter()
            .find_map(|c| match c {
                Call::Sprite(Sprite::Bean | Sprite::Milk, _, y, _) => Some(*y),
                _ => None,
            })
            .unwrap();
        assert_eq!(drawn_y, base_y);
    }
}
