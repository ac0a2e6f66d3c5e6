//! Enemy emplacements ("mayonnaise machines") and their projectiles.
//!
//! A machine is a stationary hazard that periodically emits one projectile
//! along a fixed axis. Firing is self-scheduled against the simulation clock,
//! with the first interval randomized so multiple machines stay out of phase.
//! Each machine exclusively owns its live projectiles and culls them once they
//! leave world bounds with a generous margin.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;

/// Firing axis of an emplacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireDirection {
    Down,
    Up,
}

impl FireDirection {
    /// Decode the wire value used by level resources (1 = down, -1 = up).
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            1 => Some(FireDirection::Down),
            -1 => Some(FireDirection::Up),
            _ => None,
        }
    }

    /// Sign along the y axis (y grows downward).
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            FireDirection::Down => 1.0,
            FireDirection::Up => -1.0,
        }
    }
}

/// A short-lived projectile moving at constant velocity.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Projectile {
    pub fn new(x: f32, y: f32, vel: Vec2) -> Self {
        Self {
            rect: Rect::new(x, y, PROJECTILE_SIZE, PROJECTILE_SIZE),
            vel,
        }
    }

    pub fn integrate(&mut self, dt: f32) {
        self.rect.pos += self.vel * dt;
    }
}

/// A stationary firing emplacement.
#[derive(Debug, Clone)]
pub struct Machine {
    pub rect: Rect,
    pub direction: FireDirection,
    pub shoot_interval: i64,
    last_shot: i64,
    pub projectile_speed: f32,
    pub projectiles: Vec<Projectile>,
}

impl Machine {
    /// Place a machine at `(x, y)`. The first firing interval is randomized
    /// backwards from `now` to desynchronize machines built together.
    pub fn new(
        x: f32,
        y: f32,
        direction: FireDirection,
        shoot_interval: i64,
        projectile_speed: f32,
        now: i64,
        rng: &mut Pcg32,
    ) -> Self {
        let jitter = rng.random_range(0..shoot_interval.max(1));
        Self {
            rect: Rect::new(x, y, MACHINE_SIZE, MACHINE_SIZE),
            direction,
            shoot_interval,
            last_shot: now - jitter,
            projectile_speed,
            projectiles: Vec::new(),
        }
    }

    /// Fire on cadence, integrate owned projectiles, and cull the ones that
    /// left the world (filter pass, never index removal mid-iteration).
    pub fn update(&mut self, now: i64, dt: f32, world_width: f32, rng: &mut Pcg32) {
        if now - self.last_shot >= self.shoot_interval {
            self.shoot(rng);
            self.last_shot = now;
        }

        for p in &mut self.projectiles {
            p.integrate(dt);
        }

        self.projectiles.retain(|p| {
            let x = p.rect.pos.x;
            let y = p.rect.pos.y;
            (-CULL_MARGIN_X < x && x < world_width + CULL_MARGIN_X)
                && (-CULL_MARGIN_Y < y && y < VIEW_H + CULL_MARGIN_Y)
        });
    }

    /// Emit exactly one projectile from the muzzle, with a small randomized
    /// speed variance around the configured base.
    fn shoot(&mut self, rng: &mut Pcg32) {
        let variance = rng.random::<f32>() * SHOT_SPEED_VARIANCE;
        let speed = self.projectile_speed * (SHOT_SPEED_BASE + variance);
        let sign = self.direction.sign();
        let center = self.rect.center();
        let vel = Vec2::new(0.0, speed * sign);
        self.projectiles
            .push(Projectile::new(center.x, center.y + sign * MUZZLE_OFFSET, vel));
    }

    /// Remove the projectile at `index` after it struck the player.
    pub fn remove_projectile(&mut self, index: usize) {
        self.projectiles.remove(index);
    }
}
