//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step order only (horizontal resolve before landing before hazards
//!   before camera - the ordering is load-bearing)
//! - Seeded RNG only
//! - No rendering, filesystem or platform dependencies

pub mod collision;
pub mod effects;
pub mod level;
pub mod machine;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{find_landing, jump_pad_landing, over_hole, resolve_horizontal};
pub use effects::Particle;
pub use level::{InvalidLevel, LevelDefinition, LevelLibrary, LevelSpec, MachineSpec};
pub use machine::{FireDirection, Machine, Projectile};
pub use player::Player;
pub use rect::Rect;
pub use state::{GameState, Phase};
pub use tick::{TickInput, tick};
