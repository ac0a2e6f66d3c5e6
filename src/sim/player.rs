//! The player: a kinematic body plus lives, score and damage bookkeeping.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::*;

/// Logical movement input for one step, already decoded from whatever device
/// the presentation layer polls.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Hover modifier (suspends gravity while the airborne budget lasts)
    pub float_hold: bool,
}

/// Player state. Created once per process; `reset` and `respawn` return it to
/// the level start with different amounts of bookkeeping preserved.
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub vel_y: f32,
    pub on_ground: bool,
    /// Remaining lives
    pub eggs: u8,
    /// Farthest x reached; monotonic non-decreasing within a run
    pub score: i32,
    /// Damage is a no-op until this timestamp (ms)
    pub invincible_until: i64,
    /// Airborne hover budget consumed so far (ms); restored on landing
    pub float_used_ms: i64,
    pub is_floating: bool,
}

impl Player {
    pub fn new() -> Self {
        Self {
            rect: Self::start_rect(),
            vel_y: 0.0,
            on_ground: false,
            eggs: 3,
            score: 0,
            invincible_until: 0,
            float_used_ms: 0,
            is_floating: false,
        }
    }

    fn start_rect() -> Rect {
        Rect::new(
            PLAYER_START_X,
            GROUND_Y - PLAYER_SIZE,
            PLAYER_SIZE,
            PLAYER_SIZE,
        )
    }

    /// Apply one step of input-driven movement and gravity.
    ///
    /// Horizontal displacement is a constant per step (not mass-based). A jump
    /// replaces vertical velocity with a fixed upward impulse and is only
    /// honored when grounded. Floating zeroes vertical velocity and suspends
    /// gravity while the cumulative airborne budget lasts.
    pub fn integrate(&mut self, input: MoveInput, frame_ms: i64) {
        if input.left {
            self.rect.pos.x -= PLAYER_SPEED;
        }
        if input.right {
            self.rect.pos.x += PLAYER_SPEED;
        }
        if input.jump && self.on_ground {
            self.vel_y = -JUMP_POWER;
            self.on_ground = false;
            self.is_floating = false;
        }

        if !self.on_ground && input.float_hold && self.float_used_ms < MAX_FLOAT_MS {
            self.vel_y = 0.0;
            self.is_floating = true;
            self.float_used_ms += frame_ms;
        } else {
            self.is_floating = false;
        }

        if !self.is_floating {
            self.vel_y += GRAVITY;
        }
        self.rect.pos.y += self.vel_y;
    }

    /// Record the farthest x reached. Call after movement and clamping.
    pub fn update_score(&mut self) {
        self.score = self.score.max(self.rect.pos.x as i32);
    }

    /// Land on a surface whose top edge is at `y`: snap, stop, ground, and
    /// restore the hover budget.
    pub fn land_on(&mut self, y: f32) {
        self.rect.set_bottom(y);
        self.vel_y = 0.0;
        self.on_ground = true;
        self.is_floating = false;
        self.float_used_ms = 0;
    }

    /// Ground-plane fallback: snap when the feet are at or below `ground_y`.
    pub fn check_ground(&mut self, ground_y: f32) {
        if self.rect.bottom() >= ground_y {
            self.land_on(ground_y);
        }
    }

    /// The contact rectangle used for hazard checks, shrunk to avoid
    /// edge-grazing false positives. The single damage margin in the game.
    pub fn hitbox(&self) -> Rect {
        self.rect.shrink(HITBOX_SHRINK)
    }

    /// The single gate for all damage sources. Decrements a life and opens a
    /// grace window, or reports a no-op while the previous window is open.
    pub fn hit(&mut self, now: i64) -> bool {
        if now >= self.invincible_until {
            self.eggs = self.eggs.saturating_sub(1);
            self.invincible_until = now + INVINCIBILITY_MS;
            log::debug!("player hit at t={now}ms, eggs left: {}", self.eggs);
            true
        } else {
            false
        }
    }

    /// Full reset: level start, full lives, zero score.
    pub fn reset(&mut self) {
        self.rect = Self::start_rect();
        self.vel_y = 0.0;
        self.on_ground = false;
        self.eggs = 3;
        self.score = 0;
        self.invincible_until = 0;
        self.float_used_ms = 0;
        self.is_floating = false;
    }

    /// Return to level start preserving eggs and score, with a short grace
    /// window so the player is not hit the instant they reappear.
    pub fn respawn(&mut self, now: i64) {
        self.rect = Self::start_rect();
        self.vel_y = 0.0;
        self.on_ground = false;
        self.invincible_until = now + INVINCIBILITY_MS;
        self.float_used_ms = 0;
        self.is_floating = false;
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
