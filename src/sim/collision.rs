//! Collision resolution for the player against terrain and hazards.
//!
//! Axis-separated: horizontal clamping against solids runs first, then a
//! feet-probe landing pass, then the ground-plane fallback (handled by the
//! caller). The tie-break order here is load-bearing; see `tick`.

use super::rect::Rect;
use crate::consts::GROUND_Y;

/// Feet probe geometry: inset from the body sides, raised slightly above the
/// previous bottom edge so landings stay reliable at high fall speeds.
const FEET_INSET: f32 = 6.0;
const FEET_RAISE: f32 = 4.0;
const FEET_HEIGHT: f32 = 6.0;

/// Ground-level platforms are those within this tolerance of the ground line;
/// they are skipped for landing while the player is over a hole.
const GROUND_TOLERANCE: f32 = 4.0;

/// Clamp `rect` horizontally against every solid it overlaps, using the
/// previous-edge positions to decide the approach side. A body whose trailing
/// edge was at or before a solid's leading edge is pushed back to that edge;
/// symmetric for the other direction. Overlaps with no horizontal approach
/// (e.g. dropping onto a solid from above) are left for the landing pass.
pub fn resolve_horizontal<'a>(
    rect: &mut Rect,
    prev_left: f32,
    prev_right: f32,
    solids: impl Iterator<Item = &'a Rect>,
) {
    for solid in solids {
        if rect.intersects(solid) {
            if prev_right <= solid.left() {
                rect.set_right(solid.left());
            } else if prev_left >= solid.right() {
                rect.set_left(solid.right());
            }
        }
    }
}

/// The hole (if any) the horizontal center currently lies over. Edge contact
/// counts: a center exactly on a hole boundary is over the hole.
pub fn over_hole(center_x: f32, holes: &[Rect]) -> Option<&Rect> {
    holes
        .iter()
        .find(|h| h.left() <= center_x && center_x <= h.right())
}

/// Thin probe at the previous bottom edge used for landing tests.
pub fn feet_probe(rect: &Rect, prev_bottom: f32) -> Rect {
    Rect::new(
        rect.left() + FEET_INSET,
        prev_bottom - FEET_RAISE,
        rect.width() - FEET_INSET * 2.0,
        FEET_HEIGHT,
    )
}

/// Find the surface the player lands on this step, if any.
///
/// Platforms are tested before obstacles; the first intersecting surface wins
/// (no multi-surface averaging). Landing requires non-negative vertical
/// velocity. While over a hole, ground-level platforms are excluded so the
/// gap actually lets the player through; raised platforms and obstacles still
/// resolve normally.
pub fn find_landing(
    rect: &Rect,
    prev_bottom: f32,
    vel_y: f32,
    platforms: &[Rect],
    obstacles: &[Rect],
    skip_ground_platforms: bool,
) -> Option<f32> {
    if vel_y < 0.0 {
        return None;
    }
    let feet = feet_probe(rect, prev_bottom);

    for plat in platforms {
        if skip_ground_platforms && plat.top() >= GROUND_Y - GROUND_TOLERANCE {
            continue;
        }
        if feet.intersects(plat) {
            return Some(plat.top());
        }
    }
    for obs in obstacles {
        if feet.intersects(obs) {
            return Some(obs.top());
        }
    }
    None
}

/// Jump pads fire only on a genuine landing: the previous bottom edge at or
/// above the pad's top, with non-negative vertical velocity. Rising through a
/// pad or brushing it sideways must not trigger it.
pub fn jump_pad_landing(rect: &Rect, prev_bottom: f32, vel_y: f32, pad: &Rect) -> bool {
    rect.intersects(pad) && prev_bottom <= pad.top() && vel_y >= 0.0
}
