//! Session state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::aabb::Aabb;
use super::level::Level;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Start screen; nothing simulates until the host starts a session
    Waiting,
    /// Active gameplay
    Running,
    /// Out of lives; frozen until restart
    GameOver,
}

/// Boolean key flags, written by the host's event handlers and read once
/// per frame. Passing the value in explicitly keeps the simulation free of
/// ambient input state.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub aabb: Aabb,
    pub vel: Vec2,
    /// True when the previous frame resolved a landing against a platform
    pub grounded: bool,
    pub facing_right: bool,
    /// Latch so a held jump key fires at most once per press
    pub jump_held: bool,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            aabb: Aabb::new(x, y, PLAYER_SIZE, PLAYER_SIZE),
            vel: Vec2::ZERO,
            grounded: false,
            facing_right: true,
            jump_held: false,
        }
    }
}

/// Render-time offset, derived from the player position every frame and
/// never independently mutated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

/// Notifications for the UI collaborator. The simulation buffers these and
/// the host drains them once per frame; the core never touches the DOM.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    /// New score total
    ScoreChanged(u32),
    /// New lives total
    LivesChanged(u32),
    /// New jump power value
    JumpPowerChanged(f32),
    /// Final score
    GameOver(u32),
    /// Final score
    Won(u32),
}

/// Complete session state. Exactly one player and one level are live while
/// the phase is `Running`.
#[derive(Debug)]
pub struct GameState {
    pub phase: Phase,
    pub score: u32,
    pub lives: u32,
    /// Grows by a fixed step on each airborne jump, resets on landing
    pub current_jump_power: f32,
    /// Derived from the viewport height; clamps `current_jump_power`
    pub max_jump_power: f32,
    pub viewport_w: f32,
    pub viewport_h: f32,
    pub camera: Camera,
    pub player: Player,
    pub level: Level,
    pub seed: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a waiting session. A level is generated up front so there is
    /// always something to draw behind the start screen.
    pub fn new(seed: u64, viewport_w: f32, viewport_h: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = Level::generate(&mut rng, viewport_h);
        Self {
            phase: Phase::Waiting,
            score: 0,
            lives: STARTING_LIVES,
            current_jump_power: BASE_JUMP_POWER,
            max_jump_power: crate::max_jump_power(viewport_h),
            viewport_w,
            viewport_h,
            camera: Camera::default(),
            player: Player::new(SPAWN_X, viewport_h - SPAWN_Y_OFFSET),
            level,
            seed,
            events: Vec::new(),
        }
    }

    /// Start (or restart) a session: regenerate the level, reset the player
    /// and counters, enter `Running`.
    pub fn start(&mut self, seed: u64) {
        self.seed = seed;
        let mut rng = Pcg32::seed_from_u64(seed);
        self.level = Level::generate(&mut rng, self.viewport_h);
        self.player = Player::new(SPAWN_X, self.viewport_h - SPAWN_Y_OFFSET);
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.current_jump_power = BASE_JUMP_POWER;
        self.camera = Camera::default();
        self.phase = Phase::Running;

        self.events.clear();
        self.push_event(GameEvent::Started);
        self.push_event(GameEvent::ScoreChanged(0));
        self.push_event(GameEvent::LivesChanged(STARTING_LIVES));
        self.push_event(GameEvent::JumpPowerChanged(BASE_JUMP_POWER));
        log::info!("session started (seed {seed})");
    }

    /// Move the player back to the spawn point in place, keeping score and
    /// the rest of the level untouched. Used after a non-final death.
    pub fn respawn(&mut self) {
        self.player.aabb.x = SPAWN_X;
        self.player.aabb.y = self.viewport_h - SPAWN_Y_OFFSET;
        self.player.vel = Vec2::ZERO;
    }

    /// Adopt a new viewport size and rederive the jump power ceiling.
    pub fn set_viewport(&mut self, w: f32, h: f32) {
        self.viewport_w = w;
        self.viewport_h = h;
        self.max_jump_power = crate::max_jump_power(h);
        if self.current_jump_power > self.max_jump_power {
            self.current_jump_power = self.max_jump_power;
            let power = self.current_jump_power;
            self.push_event(GameEvent::JumpPowerChanged(power));
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand buffered notifications to the UI collaborator.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_resets_the_session() {
        let mut state = GameState::new(5, 800.0, 600.0);
        assert_eq!(state.phase, Phase::Waiting);

        state.score = 123;
        state.lives = 1;
        state.start(6);

        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.current_jump_power, BASE_JUMP_POWER);
        assert_eq!(state.player.aabb.x, SPAWN_X);
        assert_eq!(state.player.aabb.y, 600.0 - SPAWN_Y_OFFSET);

        let events: Vec<_> = state.drain_events().collect();
        assert!(events.contains(&GameEvent::Started));
        assert!(events.contains(&GameEvent::ScoreChanged(0)));
        assert!(events.contains(&GameEvent::LivesChanged(STARTING_LIVES)));
    }

    #[test]
    fn test_set_viewport_clamps_jump_power() {
        let mut state = GameState::new(5, 800.0, 900.0);
        state.current_jump_power = state.max_jump_power; // 36 at h=900

        // Shrinking the viewport lowers the ceiling and clamps the current power
        state.set_viewport(800.0, 400.0);
        assert!(state.current_jump_power <= state.max_jump_power);
        assert!(
            state
                .drain_events()
                .any(|e| matches!(e, GameEvent::JumpPowerChanged(_)))
        );
    }

    #[test]
    fn test_respawn_keeps_score_and_level() {
        let mut state = GameState::new(5, 800.0, 600.0);
        state.start(5);
        state.score = 70;
        state.player.aabb.x = 4000.0;
        state.player.vel = glam::Vec2::new(5.0, -3.0);
        let platform_count = state.level.platforms.len();

        state.respawn();

        assert_eq!(state.player.aabb.x, SPAWN_X);
        assert_eq!(state.player.vel, glam::Vec2::ZERO);
        assert_eq!(state.score, 70);
        assert_eq!(state.level.platforms.len(), platform_count);
    }
}
