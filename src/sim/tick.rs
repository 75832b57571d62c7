//! Per-frame simulation step
//!
//! One call to [`tick`] advances the whole world by one display frame:
//! player physics, platform contacts, pickups, monsters, the goal, the
//! camera, and ambient animation. Order matters and is fixed; see the
//! body of [`tick`] for the sequence.

use super::aabb::{Side, overlaps, resolve};
use super::state::{GameEvent, GameState, InputState, Phase};
use crate::consts::*;

/// Advance the simulation by one frame. Does nothing unless the phase is
/// `Running`.
pub fn tick(state: &mut GameState, input: InputState) {
    if state.phase != Phase::Running {
        return;
    }

    step_player(state, input);
    if state.phase != Phase::Running {
        // Death or win mid-step; leave the rest of the world frozen
        return;
    }

    for patroller in &mut state.level.patrollers {
        patroller.step();
    }
    for collectible in &mut state.level.collectibles {
        collectible.step();
    }

    update_camera(state);
}

fn step_player(state: &mut GameState, input: InputState) {
    // Horizontal drive: accelerate toward the held direction, cap, then
    // bleed speed with friction. Both keys held cancel out.
    if input.right {
        state.player.vel.x = (state.player.vel.x + RUN_ACCEL).min(MAX_RUN_SPEED);
        state.player.facing_right = true;
    }
    if input.left {
        state.player.vel.x = (state.player.vel.x - RUN_ACCEL).max(-MAX_RUN_SPEED);
        state.player.facing_right = false;
    }
    state.player.vel.x *= FRICTION;

    // Jump fires on the press edge only; holding the key does nothing
    // until it is released. Airborne presses jump again with more power.
    if input.up && !state.player.jump_held {
        state.player.vel.y = -state.current_jump_power;
        state.player.grounded = false;
        state.current_jump_power =
            (state.current_jump_power + JUMP_POWER_STEP).min(state.max_jump_power);
        let power = state.current_jump_power;
        state.push_event(GameEvent::JumpPowerChanged(power));
    }
    state.player.jump_held = input.up;

    state.player.vel.y += GRAVITY;
    state.player.aabb.x += state.player.vel.x;
    state.player.aabb.y += state.player.vel.y;

    // Platform contacts. Grounded is re-proven every frame; walking off a
    // ledge clears it without any extra bookkeeping.
    state.player.grounded = false;
    let mut landed = false;
    for platform in &state.level.platforms {
        match resolve(&mut state.player.aabb, platform) {
            Some(Side::Bottom) => {
                state.player.grounded = true;
                state.player.vel.y = 0.0;
                landed = true;
            }
            Some(Side::Top) => {
                // Head bump: bounce straight back down
                state.player.vel.y = -state.player.vel.y;
            }
            // Side contacts: push-out only, horizontal speed persists and
            // decays through friction
            Some(Side::Left) | Some(Side::Right) | None => {}
        }
    }
    if landed && state.current_jump_power != BASE_JUMP_POWER {
        state.current_jump_power = BASE_JUMP_POWER;
        state.push_event(GameEvent::JumpPowerChanged(BASE_JUMP_POWER));
    }

    // Monsters kill on touch; no push-out, the overlap itself is lethal
    let player_box = state.player.aabb;
    if state
        .level
        .patrollers
        .iter()
        .any(|m| overlaps(&player_box, &m.aabb))
    {
        handle_death(state);
        return;
    }

    // Pickups: collect everything touched this frame in one pass
    let mut gained = 0;
    state.level.collectibles.retain(|c| {
        if overlaps(&player_box, &c.aabb) {
            gained += c.kind.score();
            false
        } else {
            true
        }
    });
    if gained > 0 {
        state.score += gained;
        let score = state.score;
        state.push_event(GameEvent::ScoreChanged(score));
    }

    if overlaps(&player_box, &state.level.goal) {
        state.phase = Phase::Waiting;
        let score = state.score;
        state.push_event(GameEvent::Won(score));
        log::info!("level cleared with score {score}");
        return;
    }

    // Fell into a pit
    if state.player.aabb.y > state.viewport_h + FALL_MARGIN {
        handle_death(state);
        return;
    }

    // Ceiling clamp keeps extreme jumps from leaving the world
    if state.player.aabb.y < 0.0 {
        state.player.aabb.y = 0.0;
        state.player.vel.y = 0.0;
    }
}

fn handle_death(state: &mut GameState) {
    debug_assert!(state.lives > 0);
    state.lives -= 1;
    let lives = state.lives;
    state.push_event(GameEvent::LivesChanged(lives));

    if state.lives == 0 {
        state.phase = Phase::GameOver;
        let score = state.score;
        state.push_event(GameEvent::GameOver(score));
        log::info!("game over with score {score}");
    } else {
        state.respawn();
    }
}

/// Keep the player horizontally centered, clamped to the level edges. The
/// camera never moves vertically. A viewport wider than the level pins the
/// camera at the left edge.
fn update_camera(state: &mut GameState) {
    let target = state.player.aabb.x - state.viewport_w / 2.0;
    let max_x = (state.level.width - state.viewport_w).max(0.0);
    state.camera.x = target.clamp(0.0, max_x);
    state.camera.y = 0.0;
}
