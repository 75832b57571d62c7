//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical tick per display frame
//! - Seeded RNG only (threaded through the level generator)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod level;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, Side, overlaps, resolve};
pub use level::{Collectible, CollectibleKind, Level, Patroller};
pub use state::{Camera, GameEvent, GameState, InputState, Phase, Player};
pub use tick::tick;
