//! Fixed-order simulation tick.
//!
//! One call advances the run by one frame. The ordering inside is
//! load-bearing: input and integration, then over-hole determination, then
//! horizontal resolution, then landing, then machines and hazards, then the
//! goal, then jump pads, then camera and the final world clamp.

use super::collision;
use super::effects::{self, FATAL_BURST, HIT_BURST};
use super::player::MoveInput;
use super::state::{GameState, Phase};
use crate::consts::*;

/// Logical button state for a single tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Hover modifier (held)
    pub float_hold: bool,
    /// Restart from a terminal phase
    pub restart: bool,
}

/// Advance the simulation by one frame of `frame_ms` milliseconds.
///
/// `dt` scales projectile and particle motion; player horizontal speed and
/// gravity are constant per step.
pub fn tick(state: &mut GameState, input: &TickInput, frame_ms: i64) {
    state.time_ms += frame_ms;
    let now = state.time_ms;
    let dt = frame_ms as f32 / DT_SCALE_MS;

    // Particles are cosmetic and animate in every phase
    effects::update_particles(&mut state.particles, dt);

    match state.phase {
        Phase::GameOver | Phase::FinalVictory => {
            if input.restart {
                state.restart();
            }
            return;
        }
        // Transient: normally advanced within the winning tick, but a caller
        // observing LevelWon across a tick boundary still makes progress
        Phase::LevelWon => {
            state.advance_level();
            return;
        }
        Phase::InProgress => {}
    }

    let prev_bottom = state.player.rect.bottom();
    let prev_left = state.player.rect.left();
    let prev_right = state.player.rect.right();

    state.player.integrate(
        MoveInput {
            left: input.left,
            right: input.right,
            jump: input.jump,
            float_hold: input.float_hold,
        },
        frame_ms,
    );
    state.player.rect.clamp_x(state.level.world_width);
    state.player.update_score();

    let over_hole = collision::over_hole(state.player.rect.center().x, &state.level.holes).copied();

    collision::resolve_horizontal(
        &mut state.player.rect,
        prev_left,
        prev_right,
        state.level.platforms.iter().chain(&state.level.obstacles),
    );

    let landing = collision::find_landing(
        &state.player.rect,
        prev_bottom,
        state.player.vel_y,
        &state.level.platforms,
        &state.level.obstacles,
        over_hole.is_some(),
    );
    if let Some(surface_top) = landing {
        state.player.land_on(surface_top);
    } else if over_hole.is_none() {
        state.player.check_ground(GROUND_Y);
    } else {
        // Over a gap with nothing underfoot: keep falling. Past the bottom of
        // the viewport the fall is fatal and bypasses the ordinary damage gate.
        state.player.on_ground = false;
        if state.player.rect.top() > VIEW_H {
            effects::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                state.player.center(),
                FATAL_BURST,
            );
            state.player.eggs = 0;
            state.phase = Phase::GameOver;
            log::info!("fatal fall at x={:.0}; game over", state.player.rect.pos.x);
        }
    }

    // Machines fire and move their projectiles; contact uses the shrunk
    // hitbox and goes through the single damage gate
    let hitbox = state.player.hitbox();
    let world_width = state.level.world_width;
    for machine in &mut state.level.machines {
        machine.update(now, dt, world_width, &mut state.rng);

        let mut struck = None;
        for (i, projectile) in machine.projectiles.iter().enumerate() {
            if struck.is_none()
                && hitbox.intersects(&projectile.rect)
                && state.player.hit(now)
            {
                struck = Some(i);
            }
        }
        if let Some(i) = struck {
            machine.remove_projectile(i);
            effects::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                state.player.center(),
                HIT_BURST,
            );
        }
    }

    // Goal contact wins the level and advances immediately
    if state.phase == Phase::InProgress && state.player.rect.intersects(&state.level.finish) {
        log::info!("level {} complete", state.level_index);
        state.phase = Phase::LevelWon;
        state.advance_level();
        return;
    }

    for spike in &state.level.spikes {
        if hitbox.intersects(spike) && state.player.hit(now) {
            effects::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                state.player.center(),
                HIT_BURST,
            );
        }
    }

    for pad in &state.level.jump_pads {
        if collision::jump_pad_landing(&state.player.rect, prev_bottom, state.player.vel_y, pad) {
            state.player.vel_y = -JUMP_POWER * JUMP_PAD_BOOST;
            state.player.on_ground = true;
        }
    }

    state.update_camera();
    state.player.rect.clamp_x(state.level.world_width);

    if state.player.eggs == 0 {
        state.phase = Phase::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{LevelDefinition, LevelLibrary, LevelSpec};
    use crate::sim::machine::{FireDirection, Machine, Projectile};
    use crate::sim::rect::Rect;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn flat_level(world_width: f32) -> LevelDefinition {
        LevelDefinition {
            world_width,
            platforms: vec![Rect::new(0.0, GROUND_Y, world_width, GROUND_THICKNESS)],
            obstacles: Vec::new(),
            holes: Vec::new(),
            spikes: Vec::new(),
            jump_pads: Vec::new(),
            machines: Vec::new(),
            finish: Rect::new(
                world_width - FINISH_MARGIN,
                GROUND_Y - FINISH_H,
                FINISH_W,
                FINISH_H,
            ),
            checkpoints: Vec::new(),
        }
    }

    fn state_with(level: LevelDefinition) -> GameState {
        let mut state = GameState::new(9, LevelLibrary::empty());
        state.level = level;
        state
    }

    #[test]
    fn landing_is_idempotent_on_flat_ground() {
        let mut state = state_with(flat_level(1600.0));
        let idle = TickInput::default();

        tick(&mut state, &idle, FRAME_MS);
        let settled = state.player.rect;
        assert!(state.player.on_ground);
        assert_eq!(state.player.rect.bottom(), GROUND_Y);

        for _ in 0..50 {
            tick(&mut state, &idle, FRAME_MS);
            assert_eq!(state.player.rect, settled);
            assert!(state.player.on_ground);
            assert_eq!(state.player.vel_y, 0.0);
        }
    }

    #[test]
    fn walking_into_an_obstacle_blocks() {
        let mut level = flat_level(1600.0);
        // Wall just right of the player start
        level.obstacles.push(Rect::new(110.0, GROUND_Y - 100.0, 30.0, 100.0));
        let mut state = state_with(level);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..20 {
            tick(&mut state, &right, FRAME_MS);
        }
        assert_eq!(state.player.rect.right(), 110.0);
    }

    #[test]
    fn spike_contact_respects_invincibility_window() {
        let mut level = flat_level(1600.0);
        // Spike directly under the player start
        level.spikes.push(Rect::new(60.0, GROUND_Y - 16.0, 32.0, 16.0));
        let mut state = state_with(level);
        let idle = TickInput::default();

        // t=400: first contact applies
        tick(&mut state, &idle, 400);
        assert_eq!(state.player.eggs, 2);
        // t=800, t=1200: inside the window opened at t=400, no-ops
        tick(&mut state, &idle, 400);
        assert_eq!(state.player.eggs, 2);
        tick(&mut state, &idle, 400);
        assert_eq!(state.player.eggs, 2);
        // t=1600: window closed, damage applies again
        tick(&mut state, &idle, 400);
        assert_eq!(state.player.eggs, 1);
    }

    #[test]
    fn eggs_exhausted_by_spikes_is_game_over() {
        let mut level = flat_level(1600.0);
        level.spikes.push(Rect::new(60.0, GROUND_Y - 16.0, 32.0, 16.0));
        let mut state = state_with(level);
        let idle = TickInput::default();

        for _ in 0..8 {
            tick(&mut state, &idle, 1100);
        }
        assert_eq!(state.player.eggs, 0);
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn fatal_hole_fall_zeroes_eggs_and_ends_the_run() {
        let mut level = flat_level(1600.0);
        level.holes.push(Rect::new(40.0, GROUND_Y, 120.0, GROUND_THICKNESS));
        let mut state = state_with(level);
        assert_eq!(state.player.eggs, 3);
        let idle = TickInput::default();

        for _ in 0..200 {
            tick(&mut state, &idle, FRAME_MS);
            if state.phase == Phase::GameOver {
                break;
            }
            assert!(!state.player.on_ground);
        }
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.player.eggs, 0);
        assert!(state.player.rect.top() > VIEW_H);
        // The fatal burst is visible
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn projectile_strike_damages_and_removes_the_projectile() {
        let mut level = flat_level(1600.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut machine = Machine::new(
            400.0,
            GROUND_Y - 220.0,
            FireDirection::Down,
            1800,
            3.0,
            0,
            &mut rng,
        );
        // A stationary projectile already overlapping the player start
        machine
            .projectiles
            .push(Projectile::new(60.0, GROUND_Y - 30.0, Vec2::ZERO));
        level.machines.push(machine);
        let mut state = state_with(level);

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.player.eggs, 2);
        // The struck projectile is gone; anything else the machine fired on
        // its own schedule is moving
        assert!(
            state.level.machines[0]
                .projectiles
                .iter()
                .all(|p| p.vel != Vec2::ZERO)
        );
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn jump_pad_bounce_only_on_genuine_landing() {
        let mut level = flat_level(1600.0);
        level
            .jump_pads
            .push(Rect::new(50.0, GROUND_Y - 8.0, 48.0, 8.0));
        let mut state = state_with(level);
        // Drop the player onto the pad
        state.player.rect.pos.y = GROUND_Y - 8.0 - PLAYER_SIZE - 20.0;
        state.player.on_ground = false;
        let idle = TickInput::default();

        let mut bounced = false;
        for _ in 0..40 {
            tick(&mut state, &idle, FRAME_MS);
            if state.player.vel_y < -JUMP_POWER {
                bounced = true;
                break;
            }
        }
        assert!(bounced);
        assert_eq!(state.player.vel_y, -JUMP_POWER * JUMP_PAD_BOOST);
    }

    #[test]
    fn rising_through_a_pad_does_not_bounce() {
        let mut level = flat_level(1600.0);
        level
            .jump_pads
            .push(Rect::new(50.0, GROUND_Y - 200.0, 48.0, 8.0));
        let mut state = state_with(level);
        // Launch upward through the pad
        state.player.vel_y = -JUMP_POWER * 2.0;
        state.player.on_ground = false;
        let idle = TickInput::default();

        for _ in 0..10 {
            let rising = state.player.vel_y < 0.0;
            tick(&mut state, &idle, FRAME_MS);
            if rising {
                assert!(state.player.vel_y >= -JUMP_POWER * 2.0);
                assert_ne!(state.player.vel_y, -JUMP_POWER * JUMP_PAD_BOOST);
            }
        }
    }

    #[test]
    fn goal_contact_advances_to_the_next_level() {
        let mut state = GameState::new(
            5,
            LevelLibrary::new(vec![LevelSpec::default(), LevelSpec::default()]),
        );
        state.player.hit(0);
        let finish = state.level.finish;
        state.player.rect.pos.x = finish.left();
        state.player.rect.pos.y = finish.top();

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.level_index, 2);
        assert_eq!(state.phase, Phase::InProgress);
        assert_eq!(state.player.eggs, 2);
        assert_eq!(state.player.rect.pos.x, PLAYER_START_X);
        assert_eq!(state.camera_x, 0.0);
    }

    #[test]
    fn goal_on_last_level_is_final_victory() {
        let mut state = GameState::new(5, LevelLibrary::new(vec![LevelSpec::default()]));
        let finish = state.level.finish;
        state.player.rect.pos.x = finish.left();
        state.player.rect.pos.y = finish.top();

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.phase, Phase::FinalVictory);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.player.eggs, 3);
    }

    #[test]
    fn restart_only_honored_in_terminal_phases() {
        let mut state = state_with(flat_level(1600.0));
        state.player.rect.pos.x = 400.0;
        state.player.update_score();

        // Mid-run restart is ignored
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, FRAME_MS);
        assert_eq!(state.phase, Phase::InProgress);
        assert_eq!(state.player.score, 400);

        state.phase = Phase::GameOver;
        tick(&mut state, &restart, FRAME_MS);
        assert_eq!(state.phase, Phase::InProgress);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.eggs, 3);
    }

    #[test]
    fn terminal_phase_freezes_the_world() {
        let mut state = state_with(flat_level(1600.0));
        state.phase = Phase::GameOver;
        let before = state.player.rect;
        tick(
            &mut state,
            &TickInput {
                right: true,
                jump: true,
                ..Default::default()
            },
            FRAME_MS,
        );
        assert_eq!(state.player.rect, before);
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn float_hold_hovers_then_gravity_resumes() {
        let mut state = state_with(flat_level(1600.0));
        state.player.vel_y = 0.0;
        state.player.on_ground = false;
        state.player.rect.pos.y = 100.0;
        let float_input = TickInput {
            float_hold: true,
            ..Default::default()
        };

        tick(&mut state, &float_input, FRAME_MS);
        let hover_y = state.player.rect.pos.y;
        assert!(state.player.is_floating);
        assert_eq!(hover_y, 100.0);

        // Budget is 500ms; at 16ms per tick it runs out within ~32 ticks
        for _ in 0..40 {
            tick(&mut state, &float_input, FRAME_MS);
        }
        assert!(!state.player.is_floating);
        assert!(state.player.rect.pos.y > hover_y);
    }

    proptest! {
        #[test]
        fn camera_always_within_world_bounds(x in 0.0f32..3000.0) {
            let mut state = state_with(flat_level(3000.0));
            state.player.rect.pos.x = x;
            state.player.rect.clamp_x(3000.0);
            state.update_camera();
            prop_assert!(state.camera_x >= 0.0);
            prop_assert!(state.camera_x <= 3000.0 - VIEW_W);
        }

        #[test]
        fn score_is_monotonic_over_any_input_sequence(
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..80)
        ) {
            let mut state = state_with(flat_level(1600.0));
            let mut last_score = state.player.score;
            for (left, right, jump) in moves {
                let input = TickInput { left, right, jump, ..Default::default() };
                tick(&mut state, &input, FRAME_MS);
                prop_assert!(state.player.score >= last_score);
                last_score = state.player.score;
            }
        }
    }
}
