//! Chicken World entry point.
//!
//! Runs the simulation headless with a small autopilot so the crate can be
//! exercised end to end without a renderer: the autopilot holds right, jumps
//! ahead of obstacles and gaps, and floats across wide holes.
//!
//! Usage: `chicken-world [levels_dir] [seed]`

use std::path::PathBuf;

use chicken_world::consts::*;
use chicken_world::sim::{GameState, TickInput, tick};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let levels_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("levels"));
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xC41C);

    let library = chicken_world::load_level_library(&levels_dir);
    log::info!(
        "starting run: seed {seed}, {} data-driven level(s)",
        library.len()
    );
    let mut state = GameState::new(seed, library);

    // Five simulated minutes, tops
    let max_ticks = 5 * 60 * 60;
    for t in 0..max_ticks {
        let input = autopilot(&state);
        tick(&mut state, &input, FRAME_MS);

        if t % 60 == 0 {
            log::info!(
                "t={:>3}s level {} eggs {} score {} x={:.0} camera={:.0} phase {:?}",
                t / 60,
                state.level_index,
                state.player.eggs,
                state.player.score,
                state.player.rect.pos.x,
                state.camera_x,
                state.phase,
            );
        }
        if state.phase.is_terminal() {
            break;
        }
    }

    println!(
        "run finished: phase {:?}, level {}, score {}, eggs {}",
        state.phase, state.level_index, state.player.score, state.player.eggs
    );
}

/// Trivial demo pilot: always run right, jump when something solid, spiked or
/// hollow is coming up, and spend the float budget while over a gap.
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let from = player.rect.right();
    let to = from + 90.0;

    let solid_ahead = state
        .level
        .obstacles
        .iter()
        .chain(&state.level.spikes)
        .any(|r| r.left() < to && r.right() > from);
    let hole_ahead = state
        .level
        .holes
        .iter()
        .any(|h| h.left() < to + 60.0 && h.right() > from);
    let over_hole = state
        .level
        .holes
        .iter()
        .any(|h| h.left() <= player.rect.center().x && player.rect.center().x <= h.right());

    TickInput {
        right: true,
        jump: player.on_ground && (solid_ahead || hole_ahead),
        float_hold: !player.on_ground && over_hole,
        ..Default::default()
    }
}
