//! Data-driven game balance
//!
//! Every constant the simulations use lives here. A JSON file only needs the
//! fields it changes: it is laid over a preset, nested objects included.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::STARTING_LIVES;
use crate::error::{Result, TuningError};
use crate::sim::geometry::CatchZone;
use crate::sim::modifier::{ModifierKind, ModifierTuning};
use crate::sim::state::{SpecialKind, TrashKind};

/// Playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 550.0,
        }
    }
}

/// How the spawn interval shrinks over time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DifficultyRamp {
    /// Every `every_ms`, drop the interval by `step_ms`
    Timed { every_ms: f32, step_ms: f32 },
    /// Every spawn drops the interval by `step_ms`
    PerSpawn { step_ms: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub interval_ms: f32,
    pub min_interval_ms: f32,
    /// Extra wait before the first spawn
    pub initial_delay_ms: f32,
    pub ramp: DifficultyRamp,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            interval_ms: 1500.0,
            min_interval_ms: 600.0,
            initial_delay_ms: 0.0,
            ramp: DifficultyRamp::Timed {
                every_ms: 10_000.0,
                step_ms: 100.0,
            },
        }
    }
}

/// Catch avatar sizing (it starts large and shrinks with level)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatchAvatarTuning {
    pub base_width: f32,
    pub min_width: f32,
    pub shrink_per_level: f32,
    /// Width cap as a fraction of playfield width
    pub max_width_ratio: f32,
    /// Width cap while the growth modifier is active
    pub grown_width_ratio: f32,
    /// height = width * aspect
    pub aspect: f32,
    /// Gap between the avatar's feet and the bottom of the playfield
    pub ground_margin: f32,
    pub speed: f32,
}

impl Default for CatchAvatarTuning {
    fn default() -> Self {
        Self {
            base_width: 120.0,
            min_width: 60.0,
            shrink_per_level: 5.0,
            max_width_ratio: 0.45,
            grown_width_ratio: 0.9,
            aspect: 1.25,
            ground_margin: 20.0,
            speed: 0.15,
        }
    }
}

/// Fall speed curve: `min(max, base + (level-1) * per_level) + random(0, jitter)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallTuning {
    pub base_speed: f32,
    pub per_level: f32,
    pub max_speed: f32,
    pub jitter: f32,
}

impl Default for FallTuning {
    fn default() -> Self {
        Self {
            base_speed: 1.0,
            per_level: 0.15,
            max_speed: 5.0,
            jitter: 1.0,
        }
    }
}

/// A mundane item and its point value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrashEntry {
    pub kind: TrashKind,
    pub points: u64,
}

/// When a special item may appear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecialRule {
    pub kind: SpecialKind,
    pub min_level: u32,
    /// First appearance: `min_level + random(first_delay.0 ..= first_delay.1)`
    pub first_delay: (u32, u32),
    /// Later appearances: `level + random(respawn_gap.0 ..= respawn_gap.1)`
    pub respawn_gap: (u32, u32),
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatchTuning {
    pub playfield: Playfield,
    pub lives: u32,
    pub points_per_level: u64,
    pub avatar: CatchAvatarTuning,
    pub catch_zone: CatchZone,
    pub spawn: SpawnTuning,
    pub fall: FallTuning,
    /// Mundane item size range
    pub trash_size: (f32, f32),
    pub special_size: f32,
    /// Spin is `(random - 0.5) * spin`
    pub spin: f32,
    pub trash: Vec<TrashEntry>,
    /// Checked in order; put the rarest first
    pub specials: Vec<SpecialRule>,
    pub modifiers: Vec<ModifierTuning>,
}

impl Default for CatchTuning {
    fn default() -> Self {
        Self::deluxe()
    }
}

impl CatchTuning {
    /// Levels, a shrinking avatar, and the three power-ups
    pub fn deluxe() -> Self {
        Self {
            playfield: Playfield::default(),
            lives: STARTING_LIVES,
            points_per_level: 100,
            avatar: CatchAvatarTuning::default(),
            catch_zone: CatchZone::FullBody,
            spawn: SpawnTuning::default(),
            fall: FallTuning::default(),
            trash_size: (35.0, 50.0),
            special_size: 45.0,
            spin: 0.1,
            trash: default_trash(),
            specials: vec![
                SpecialRule {
                    kind: SpecialKind::GreenFish,
                    min_level: 18,
                    first_delay: (3, 6),
                    respawn_gap: (5, 8),
                    points: 0,
                },
                SpecialRule {
                    kind: SpecialKind::RedBerry,
                    min_level: 15,
                    first_delay: (3, 6),
                    respawn_gap: (5, 8),
                    points: 0,
                },
                SpecialRule {
                    kind: SpecialKind::GoldenSneaker,
                    min_level: 10,
                    first_delay: (5, 10),
                    respawn_gap: (8, 12),
                    points: 0,
                },
            ],
            modifiers: vec![
                ModifierTuning {
                    kind: ModifierKind::SpeedBoost,
                    duration_ms: 15_000.0,
                    multiplier: 1.5,
                },
                ModifierTuning {
                    kind: ModifierKind::Grow,
                    duration_ms: 10_000.0,
                    multiplier: 3.0,
                },
                ModifierTuning {
                    kind: ModifierKind::Shrink,
                    duration_ms: 10_000.0,
                    multiplier: 0.3,
                },
            ],
        }
    }

    /// The plain game: no power-ups, fixed-size avatar, and only the trash
    /// can it carries catches
    pub fn classic() -> Self {
        Self {
            avatar: CatchAvatarTuning {
                base_width: 80.0,
                min_width: 80.0,
                shrink_per_level: 0.0,
                ..CatchAvatarTuning::default()
            },
            catch_zone: CatchZone::BottomBand { fraction: 0.45 },
            specials: Vec::new(),
            modifiers: Vec::new(),
            ..Self::deluxe()
        }
    }

    /// Overrides on top of the deluxe preset
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_over(&Self::deluxe(), json)
    }

    /// Overrides on top of `preset`; fields the JSON leaves out keep the
    /// preset's values
    pub fn from_json_over(preset: &Self, json: &str) -> Result<Self> {
        let tuning = overlay_json(preset, json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_over(&Self::deluxe(), path)
    }

    pub fn load_over(preset: &Self, path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_over(preset, &std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_playfield(&self.playfield)?;
        validate_spawn(&self.spawn)?;
        check(self.lives > 0, "lives must be at least 1")?;
        check(self.points_per_level > 0, "points_per_level must be positive")?;
        check(
            self.avatar.speed > 0.0 && self.avatar.speed <= 1.0,
            "avatar.speed must be in (0, 1]",
        )?;
        check(
            self.avatar.min_width > 0.0 && self.avatar.min_width <= self.avatar.base_width,
            "avatar.min_width must be positive and no larger than base_width",
        )?;
        check(self.avatar.aspect > 0.0, "avatar.aspect must be positive")?;
        check(
            self.trash_size.0 > 0.0 && self.trash_size.0 <= self.trash_size.1,
            "trash_size must be a positive, ordered range",
        )?;
        check(
            self.trash_size.1 < self.playfield.width && self.special_size < self.playfield.width,
            "item sizes must fit the playfield",
        )?;
        check(self.special_size > 0.0, "special_size must be positive")?;
        check(
            self.avatar.max_width_ratio > 0.0
                && self.avatar.max_width_ratio <= self.avatar.grown_width_ratio
                && self.avatar.grown_width_ratio <= 1.0,
            "avatar width ratios must satisfy 0 < max_width_ratio <= grown_width_ratio <= 1",
        )?;
        check(!self.trash.is_empty(), "trash table must not be empty")?;
        check(
            self.fall.base_speed > 0.0 && self.fall.max_speed >= self.fall.base_speed,
            "fall speeds must be positive with max_speed >= base_speed",
        )?;
        check(
            self.fall.jitter >= 0.0 && self.fall.per_level >= 0.0,
            "fall.jitter and fall.per_level must not be negative",
        )?;
        for rule in &self.specials {
            check(
                rule.first_delay.0 <= rule.first_delay.1 && rule.respawn_gap.0 <= rule.respawn_gap.1,
                "special delay ranges must be ordered",
            )?;
            check(
                rule.respawn_gap.0 > 0,
                "special respawn_gap must be at least one level",
            )?;
            let effect = rule.kind.effect();
            check(
                self.modifiers.iter().any(|m| m.kind == effect),
                &format!("special {:?} needs a {:?} modifier", rule.kind, effect),
            )?;
        }
        for m in &self.modifiers {
            check(
                m.duration_ms > 0.0 && m.multiplier > 0.0,
                "modifier duration and multiplier must be positive",
            )?;
        }
        Ok(())
    }
}

fn default_trash() -> Vec<TrashEntry> {
    TrashKind::ALL
        .iter()
        .map(|&kind| TrashEntry {
            kind,
            points: kind.points(),
        })
        .collect()
}

/// Base raccoon for the stack game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackAvatarTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Default for StackAvatarTuning {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 75.0,
            speed: 0.12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WobbleTuning {
    /// Wobble added per stacked entry
    pub per_entry: f32,
    pub max: f32,
    /// Phase advance per millisecond
    pub speed: f32,
    /// Fraction of steering speed lost at maximum wobble
    pub control_penalty: f32,
    /// Sway of stacked entries relative to the wobble amount
    pub cascade: f32,
    /// Phase offset between neighbouring entries
    pub entry_phase_step: f32,
}

impl Default for WobbleTuning {
    fn default() -> Self {
        Self {
            per_entry: 1.5,
            max: 15.0,
            speed: 0.03,
            control_penalty: 0.5,
            cascade: 0.3,
            entry_phase_step: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityTuning {
    /// Stacks this tall or shorter never collapse
    pub safe_height: u32,
    /// Stability threshold as a fraction of base width
    pub threshold_ratio: f32,
    /// Height that doubles the risk factor
    pub height_scale: f32,
    /// Per-frame collapse probability per entry, once over the threshold
    pub roll_per_entry: f32,
}

impl Default for StabilityTuning {
    fn default() -> Self {
        Self {
            safe_height: 5,
            threshold_ratio: 0.6,
            height_scale: 20.0,
            roll_per_entry: 0.001,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Keep the stack top below this fraction of the playfield height
    pub view_ratio: f32,
    /// Fraction of the remaining gap closed per update
    pub smoothing: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            view_ratio: 0.4,
            smoothing: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackTuning {
    pub playfield: Playfield,
    pub lives: u32,
    /// Ground line distance from the bottom of the playfield
    pub ground_offset: f32,
    pub avatar: StackAvatarTuning,
    pub spawn: SpawnTuning,
    /// Downward acceleration per reference tick
    pub gravity: f32,
    /// Initial fall speed range
    pub launch_speed: (f32, f32),
    /// Falling critter width as a fraction of base width
    pub size_range: (f32, f32),
    /// Spawn this far above the visible top
    pub spawn_margin: f32,
    pub spin: f32,
    /// Vertical overlap: each entry sits `height * stack_step` above the last
    pub stack_step: f32,
    /// Landing tolerance as a fraction of base width
    pub landing_tolerance: f32,
    /// Items this far below the ground count as missed
    pub miss_margin: f32,
    /// Hard cap on frame delta before integration
    pub max_frame_ms: f32,
    pub meters_per_entry: f32,
    pub wobble: WobbleTuning,
    pub stability: StabilityTuning,
    pub camera: CameraTuning,
}

impl Default for StackTuning {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            lives: STARTING_LIVES,
            ground_offset: 30.0,
            avatar: StackAvatarTuning::default(),
            spawn: SpawnTuning {
                interval_ms: 2500.0,
                min_interval_ms: 1500.0,
                initial_delay_ms: 1500.0,
                ramp: DifficultyRamp::PerSpawn { step_ms: 20.0 },
            },
            gravity: 0.25,
            launch_speed: (1.0, 3.0),
            size_range: (0.8, 1.2),
            spawn_margin: 50.0,
            spin: 0.05,
            stack_step: 0.7,
            landing_tolerance: 0.8,
            miss_margin: 50.0,
            max_frame_ms: 100.0,
            meters_per_entry: 0.5,
            wobble: WobbleTuning::default(),
            stability: StabilityTuning::default(),
            camera: CameraTuning::default(),
        }
    }
}

impl StackTuning {
    /// Overrides on top of the default stack tuning
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_over(&Self::default(), json)
    }

    pub fn from_json_over(preset: &Self, json: &str) -> Result<Self> {
        let tuning = overlay_json(preset, json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_playfield(&self.playfield)?;
        validate_spawn(&self.spawn)?;
        check(self.lives > 0, "lives must be at least 1")?;
        check(
            self.avatar.speed > 0.0 && self.avatar.speed <= 1.0,
            "avatar.speed must be in (0, 1]",
        )?;
        check(
            self.avatar.width > 0.0 && self.avatar.height > 0.0,
            "avatar size must be positive",
        )?;
        check(
            self.avatar.width * self.size_range.1 < self.playfield.width,
            "falling critters must fit the playfield",
        )?;
        check(
            self.size_range.0 > 0.0 && self.size_range.0 <= self.size_range.1,
            "size_range must be a positive, ordered range",
        )?;
        check(
            self.launch_speed.0 <= self.launch_speed.1,
            "launch_speed must be ordered",
        )?;
        check(self.stack_step > 0.0, "stack_step must be positive")?;
        check(self.max_frame_ms > 0.0, "max_frame_ms must be positive")?;
        check(self.wobble.max > 0.0, "wobble.max must be positive")?;
        check(
            (0.0..=1.0).contains(&self.wobble.control_penalty),
            "wobble.control_penalty must be in [0, 1]",
        )?;
        check(
            self.stability.threshold_ratio > 0.0 && self.stability.height_scale > 0.0,
            "stability ratios must be positive",
        )?;
        check(
            (0.0..=1.0).contains(&self.camera.smoothing),
            "camera.smoothing must be in [0, 1]",
        )?;
        Ok(())
    }
}

/// Serialize `preset`, merge the JSON object over it and read the result back
fn overlay_json<T: Serialize + DeserializeOwned>(preset: &T, json: &str) -> Result<T> {
    let mut merged = serde_json::to_value(preset)?;
    let patch: Value = serde_json::from_str(json)?;
    merge(&mut merged, patch);
    Ok(serde_json::from_value(merged)?)
}

/// Objects merge key by key; anything else (numbers, arrays, ranges) replaces
fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

fn validate_playfield(p: &Playfield) -> Result<()> {
    check(
        p.width > 0.0 && p.height > 0.0,
        "playfield dimensions must be positive",
    )
}

fn validate_spawn(s: &SpawnTuning) -> Result<()> {
    check(
        s.min_interval_ms > 0.0 && s.interval_ms >= s.min_interval_ms,
        "spawn.interval_ms must be >= spawn.min_interval_ms > 0",
    )?;
    check(s.initial_delay_ms >= 0.0, "spawn.initial_delay_ms must not be negative")?;
    match s.ramp {
        DifficultyRamp::Timed { every_ms, step_ms } => check(
            every_ms > 0.0 && step_ms >= 0.0,
            "timed ramp needs every_ms > 0 and step_ms >= 0",
        ),
        DifficultyRamp::PerSpawn { step_ms } => {
            check(step_ms >= 0.0, "per-spawn ramp step_ms must not be negative")
        }
    }
}

fn check(ok: bool, msg: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(TuningError::Invalid(msg.to_string()))
    }
}
