//! Chicken World - a side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collision resolution, levels,
//!   enemy emplacements, progression)
//! - `levels`: Filesystem discovery and parsing of JSON level resources
//!
//! Rendering, audio and raw input polling are external collaborators: the
//! simulation exposes rectangles and state, and is driven by logical button
//! input plus an elapsed-time value per tick.

pub mod levels;
pub mod sim;

pub use levels::load_level_library;
pub use sim::{GameState, LevelLibrary, Phase, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions (pixels)
    pub const VIEW_W: f32 = 900.0;
    pub const VIEW_H: f32 = 500.0;

    /// Top of the default ground plane
    pub const GROUND_Y: f32 = VIEW_H - 50.0;

    /// Nominal frame duration at 60 FPS; `dt` is frame_ms / DT_SCALE_MS
    pub const FRAME_MS: i64 = 16;
    pub const DT_SCALE_MS: f32 = 16.0;

    /// Player movement
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const JUMP_POWER: f32 = 14.0;
    pub const GRAVITY: f32 = 0.8;
    pub const PLAYER_SIZE: f32 = 48.0;
    pub const PLAYER_START_X: f32 = 50.0;

    /// Damage grace window after a successful hit (ms)
    pub const INVINCIBILITY_MS: i64 = 1000;

    /// Cumulative airborne hover budget (ms), restored on landing
    pub const MAX_FLOAT_MS: i64 = 500;

    /// Jump pads launch at this multiple of the normal jump impulse
    pub const JUMP_PAD_BOOST: f32 = 1.8;

    /// Hazard contact rectangle is shrunk this much per side
    pub const HITBOX_SHRINK: f32 = 3.0;

    /// Camera leads the player by this margin before clamping
    pub const CAMERA_LEAD: f32 = 200.0;

    /// Emplacements and their projectiles
    pub const MACHINE_SIZE: f32 = 48.0;
    pub const PROJECTILE_SIZE: f32 = 16.0;
    /// Muzzle offset from the machine center along the firing axis
    pub const MUZZLE_OFFSET: f32 = 20.0;
    /// Per-shot speed is `projectile_speed * (SHOT_SPEED_BASE + rand(0..SHOT_SPEED_VARIANCE))`
    pub const SHOT_SPEED_BASE: f32 = 6.0;
    pub const SHOT_SPEED_VARIANCE: f32 = 0.6;
    /// Projectiles are culled this far outside world/viewport bounds
    pub const CULL_MARGIN_X: f32 = 50.0;
    pub const CULL_MARGIN_Y: f32 = 200.0;

    /// Level defaults (see the level resource schema)
    pub const DEFAULT_WORLD_WIDTH: f32 = 1600.0;
    pub const GROUND_THICKNESS: f32 = 50.0;
    pub const FINISH_W: f32 = 40.0;
    pub const FINISH_H: f32 = 120.0;
    pub const FINISH_MARGIN: f32 = 80.0;
    pub const DEFAULT_SHOOT_INTERVAL: i64 = 1800;
    pub const DEFAULT_PROJECTILE_SPEED: f32 = 3.0;
}
