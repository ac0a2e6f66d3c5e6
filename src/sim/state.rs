//! Game state and progression.
//!
//! All simulation state lives in one explicit struct owned by the caller and
//! advanced by `tick` - no ambient globals. Ownership is tree-shaped: the
//! state owns one player and one active level definition, the definition owns
//! its machines, each machine owns its projectiles.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::effects::Particle;
use super::level::{LevelDefinition, LevelLibrary};
use super::player::Player;
use crate::consts::*;

/// Current phase of a run. Exactly one applies at a time; the source's
/// overlapping booleans are gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Normal play
    InProgress,
    /// Lives exhausted; waits for explicit restart
    GameOver,
    /// Goal reached this tick; advanced to the next level within the tick
    LevelWon,
    /// All data-driven levels exhausted; waits for explicit restart
    FinalVictory,
}

impl Phase {
    /// Terminal phases wait for a restart input and tick nothing else.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver | Phase::FinalVictory)
    }
}

/// Complete simulation state for one run.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Data-driven level resources; bounds the final-victory trigger
    pub library: LevelLibrary,
    /// Active level index, 1-based
    pub level_index: u32,
    /// The active level, always replaced as a whole unit
    pub level: LevelDefinition,
    pub player: Player,
    /// Camera horizontal offset, recomputed (never integrated) each tick
    pub camera_x: f32,
    pub phase: Phase,
    /// Cosmetic damage particles
    pub particles: Vec<Particle>,
    /// Simulation clock (ms), advanced by the caller-supplied frame duration
    pub time_ms: i64,
    /// Run seed, kept for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Start a run at level 1 with the given seed and level resources.
    pub fn new(seed: u64, library: LevelLibrary) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = library.build(1, 0, &mut rng);
        Self {
            library,
            level_index: 1,
            level,
            player: Player::new(),
            camera_x: 0.0,
            phase: Phase::InProgress,
            particles: Vec::new(),
            time_ms: 0,
            seed,
            rng,
        }
    }

    /// Rebuild the active level definition wholesale for the current index.
    pub fn rebuild_level(&mut self) {
        self.level = self
            .library
            .build(self.level_index, self.time_ms, &mut self.rng);
    }

    /// Explicit restart from a terminal phase: rebuild the current level
    /// (level 1 after a final victory, since the index was already reset) and
    /// fully reset the player.
    pub fn restart(&mut self) {
        log::info!("restart requested; rebuilding level {}", self.level_index);
        self.camera_x = 0.0;
        self.rebuild_level();
        self.player.reset();
        self.phase = Phase::InProgress;
    }

    /// Advance past a completed level. Exhausting the data-driven set is the
    /// final victory (index returns to 1, nothing is rebuilt); otherwise the
    /// next level is built and the player respawns at its start keeping eggs
    /// and score.
    pub fn advance_level(&mut self) {
        self.level_index += 1;
        let total = self.library.len();
        if total > 0 && self.level_index > total {
            log::info!("all {total} levels complete: final victory");
            self.phase = Phase::FinalVictory;
            self.level_index = 1;
            return;
        }
        log::info!("advancing to level {}", self.level_index);
        self.camera_x = 0.0;
        self.rebuild_level();
        self.player.respawn(self.time_ms);
        self.phase = Phase::InProgress;
    }

    /// Camera follows the player with a fixed lead margin, clamped to the
    /// world. Always recomputed from the player position.
    pub fn update_camera(&mut self) {
        let max_offset = (self.level.world_width - VIEW_W).max(0.0);
        self.camera_x = (self.player.rect.pos.x - CAMERA_LEAD).clamp(0.0, max_offset);
    }
}
