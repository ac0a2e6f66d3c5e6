//! Level definitions and construction.
//!
//! A level is built wholesale from one of two strategies: a typed resource
//! spec (parsed from JSON by the `levels` loader) or a procedural fallback
//! keyed on the level index. Definitions are never mutated in place; the
//! active level is always replaced as a unit.

use std::fmt;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::machine::{FireDirection, Machine};
use super::rect::Rect;
use crate::consts::*;

/// Typed form of the on-disk level schema. Every key is optional; missing
/// keys take the schema defaults when the definition is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelSpec {
    pub world_width: Option<f32>,
    #[serde(default)]
    pub platforms: Vec<[f32; 4]>,
    #[serde(default)]
    pub obstacles: Vec<[f32; 4]>,
    #[serde(default)]
    pub holes: Vec<[f32; 4]>,
    #[serde(default)]
    pub spikes: Vec<[f32; 4]>,
    #[serde(default)]
    pub jump_pads: Vec<[f32; 4]>,
    #[serde(default)]
    pub machines: Vec<MachineSpec>,
    pub finish_x: Option<f32>,
    #[serde(default)]
    pub checkpoints: Vec<[f32; 4]>,
}

/// One emplacement in a level resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSpec {
    pub x: f32,
    pub y: f32,
    /// 1 = down, -1 = up
    #[serde(default = "default_direction")]
    pub direction: i64,
    #[serde(default = "default_interval")]
    pub shoot_interval: i64,
    #[serde(default = "default_projectile_speed")]
    pub projectile_speed: f32,
}

fn default_direction() -> i64 {
    1
}

fn default_interval() -> i64 {
    DEFAULT_SHOOT_INTERVAL
}

fn default_projectile_speed() -> f32 {
    DEFAULT_PROJECTILE_SPEED
}

/// Why a level resource was rejected. Never propagated past level
/// construction: every rejection is logged and recovered by the procedural
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidLevel(pub &'static str);

impl fmt::Display for InvalidLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A fully built level: validated geometry, live machines, goal.
/// `world_width` is required and authoritative; there is no ambient fallback.
#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub world_width: f32,
    pub platforms: Vec<Rect>,
    pub obstacles: Vec<Rect>,
    pub holes: Vec<Rect>,
    pub spikes: Vec<Rect>,
    pub jump_pads: Vec<Rect>,
    pub machines: Vec<Machine>,
    pub finish: Rect,
    /// Declared respawn candidates. Parsed and stored but not consulted by
    /// respawn logic; kept as data.
    pub checkpoints: Vec<Rect>,
}

fn parse_rect(raw: &[f32; 4], what: &'static str) -> Result<Rect, InvalidLevel> {
    let r = Rect::new(raw[0], raw[1], raw[2], raw[3]);
    if r.is_valid() {
        Ok(r)
    } else {
        Err(InvalidLevel(what))
    }
}

fn parse_rects(raw: &[[f32; 4]], what: &'static str) -> Result<Vec<Rect>, InvalidLevel> {
    raw.iter().map(|r| parse_rect(r, what)).collect()
}

fn default_checkpoints(world_width: f32) -> Vec<Rect> {
    let cx = (world_width * 0.2).max(50.0);
    vec![Rect::new(cx, GROUND_Y - 40.0, 24.0, 40.0)]
}

impl LevelDefinition {
    /// Build from a resource spec, applying schema defaults and validating
    /// geometry. Any malformed field rejects the whole spec.
    pub fn from_spec(spec: &LevelSpec, now: i64, rng: &mut Pcg32) -> Result<Self, InvalidLevel> {
        let world_width = spec.world_width.unwrap_or(DEFAULT_WORLD_WIDTH);
        if !world_width.is_finite() || world_width < VIEW_W {
            return Err(InvalidLevel("world_width below viewport width"));
        }

        let platforms = if spec.platforms.is_empty() {
            vec![Rect::new(0.0, GROUND_Y, world_width, GROUND_THICKNESS)]
        } else {
            parse_rects(&spec.platforms, "malformed platform rect")?
        };
        let obstacles = parse_rects(&spec.obstacles, "malformed obstacle rect")?;
        let holes = parse_rects(&spec.holes, "malformed hole rect")?;
        let spikes = parse_rects(&spec.spikes, "malformed spike rect")?;
        let jump_pads = parse_rects(&spec.jump_pads, "malformed jump pad rect")?;

        let mut machines = Vec::with_capacity(spec.machines.len());
        for m in &spec.machines {
            let direction =
                FireDirection::from_raw(m.direction).ok_or(InvalidLevel("bad machine direction"))?;
            if m.shoot_interval <= 0 {
                return Err(InvalidLevel("non-positive shoot interval"));
            }
            if !m.projectile_speed.is_finite() || m.projectile_speed <= 0.0 {
                return Err(InvalidLevel("bad projectile speed"));
            }
            if !m.x.is_finite() || !m.y.is_finite() {
                return Err(InvalidLevel("non-finite machine position"));
            }
            machines.push(Machine::new(
                m.x,
                m.y,
                direction,
                m.shoot_interval,
                m.projectile_speed,
                now,
                rng,
            ));
        }

        let finish_x = spec.finish_x.unwrap_or(world_width - FINISH_MARGIN);
        if !finish_x.is_finite() || finish_x < 0.0 || finish_x + FINISH_W > world_width {
            return Err(InvalidLevel("finish outside world bounds"));
        }
        let finish = Rect::new(finish_x, GROUND_Y - FINISH_H, FINISH_W, FINISH_H);

        let checkpoints = if spec.checkpoints.is_empty() {
            default_checkpoints(world_width)
        } else {
            parse_rects(&spec.checkpoints, "malformed checkpoint rect")?
        };

        Ok(Self {
            world_width,
            platforms,
            obstacles,
            holes,
            spikes,
            jump_pads,
            machines,
            finish,
            checkpoints,
        })
    }

    /// Procedural fallback. World width grows linearly with the level index;
    /// obstacle heights are randomized with a reachability guarantee (every
    /// tall obstacle gets a jump pad shortly before it); machine intervals
    /// shrink as the index grows.
    pub fn procedural(index: u32, now: i64, rng: &mut Pcg32) -> Self {
        let lv = index.max(1);
        let world_width = DEFAULT_WORLD_WIDTH + (lv - 1) as f32 * 600.0;

        let platforms = vec![Rect::new(0.0, GROUND_Y, world_width, GROUND_THICKNESS)];

        let mut obstacles = Vec::new();
        let mut jump_pads = Vec::new();
        let seed_x = 280.0;
        for i in 0..(5 + lv / 2) {
            let w = rng.random_range(80.0..=180.0);
            let h_off = [80.0, 100.0, 140.0, 160.0][rng.random_range(0..4usize)];
            let x = seed_x + i as f32 * 260.0;
            obstacles.push(Rect::new(x, GROUND_Y - h_off, w, 16.0));
            // Reachability: tall obstacles get a pad shortly before them
            if h_off >= 140.0 {
                jump_pads.push(Rect::new((x - 80.0).max(50.0), GROUND_Y - 16.0, 40.0, 8.0));
            }
        }

        let mut holes = Vec::new();
        for i in 0..(lv / 2).max(1) {
            let hx = 400.0 + i as f32 * 450.0;
            holes.push(Rect::new(hx, GROUND_Y, rng.random_range(60.0..=120.0), 50.0));
        }

        let mut spikes = Vec::new();
        for i in 0..(lv / 2).max(1) {
            spikes.push(Rect::new(600.0 + i as f32 * 340.0, GROUND_Y - 16.0, 32.0, 16.0));
        }

        let mut machines = Vec::new();
        for (idx, frac) in [0.25, 0.5, 0.78].into_iter().enumerate() {
            let interval = (1800 - lv as i64 * 100 + idx as i64 * 200).max(600);
            machines.push(Machine::new(
                world_width * frac,
                GROUND_Y - 220.0,
                FireDirection::Down,
                interval,
                DEFAULT_PROJECTILE_SPEED,
                now,
                rng,
            ));
        }

        let finish = Rect::new(
            world_width - FINISH_MARGIN,
            GROUND_Y - FINISH_H,
            FINISH_W,
            FINISH_H,
        );

        Self {
            world_width,
            platforms,
            obstacles,
            holes,
            spikes,
            jump_pads,
            machines,
            finish,
            checkpoints: default_checkpoints(world_width),
        }
    }
}

/// The ordered set of data-driven level resources for a run. Index 1 is the
/// first level; the number of slots bounds how many levels can be completed
/// before final victory. A slot can be empty: a resource file that exists but
/// failed to parse still counts toward the total, it just builds procedurally.
#[derive(Debug, Clone, Default)]
pub struct LevelLibrary {
    slots: Vec<Option<LevelSpec>>,
}

impl LevelLibrary {
    pub fn new(specs: Vec<LevelSpec>) -> Self {
        Self {
            slots: specs.into_iter().map(Some).collect(),
        }
    }

    pub fn from_slots(slots: Vec<Option<LevelSpec>>) -> Self {
        Self { slots }
    }

    /// A library with no data-driven levels; every build is procedural.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> u32 {
        self.slots.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resource for a 1-based level index.
    pub fn get(&self, index: u32) -> Option<&LevelSpec> {
        if index == 0 {
            return None;
        }
        self.slots.get(index as usize - 1).and_then(|s| s.as_ref())
    }

    /// Build the definition for `index`: the resource if one exists and is
    /// valid, the procedural fallback otherwise. Never fails.
    pub fn build(&self, index: u32, now: i64, rng: &mut Pcg32) -> LevelDefinition {
        if let Some(spec) = self.get(index) {
            match LevelDefinition::from_spec(spec, now, rng) {
                Ok(def) => {
                    log::info!(
                        "built level {index} from resource (world {}px, {} machines)",
                        def.world_width,
                        def.machines.len()
                    );
                    return def;
                }
                Err(e) => {
                    log::warn!("level {index} resource rejected ({e}); falling back to procedural");
                }
            }
        }
        let def = LevelDefinition::procedural(index, now, rng);
        log::info!(
            "built procedural level {index} (world {}px)",
            def.world_width
        );
        def
    }
}
