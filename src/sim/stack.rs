//! Stack game simulation
//!
//! Critters fall from above the camera and land on the base raccoon, building
//! a swaying tower. The taller it gets, the harder it sways, the slower the
//! base responds, and past a safe height the tower may topple.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::autopilot;
use super::avatar::Avatar;
use super::random::{RandomSource, SeededRng};
use super::session::{Session, Simulation};
use super::snapshot::{BoxView, ItemView, StackSnapshot};
use super::spawn::SpawnClock;
use super::state::{EndCause, FallingItem, GameEvent, GameOverStats, GamePhase, ItemKind};
use crate::highscores::HighScores;
use crate::tuning::{StabilityTuning, StackTuning, WobbleTuning};
use crate::{frame_ticks, sanitize_dt};

/// A landed critter. Position is re-derived every frame from the base and
/// the wobble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    pub id: u32,
    /// Top-left corner, world space
    pub pos: Vec2,
    pub size: Vec2,
}

impl From<&StackEntry> for BoxView {
    fn from(e: &StackEntry) -> Self {
        Self {
            x: e.pos.x,
            y: e.pos.y,
            width: e.size.x,
            height: e.size.y,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Wobble {
    /// Radians, grows with time
    pub phase: f32,
    /// Horizontal sway in pixels
    pub amount: f32,
}

impl Wobble {
    pub fn advance(&mut self, dt_ms: f32, stack_len: usize, tuning: &WobbleTuning) {
        self.phase += tuning.speed * dt_ms;
        self.amount = (stack_len as f32 * tuning.per_entry).min(tuning.max);
    }

    /// Steering speed once sway has eaten into the base's control
    pub fn control_factor(&self, tuning: &WobbleTuning) -> f32 {
        1.0 - (self.amount / tuning.max) * tuning.control_penalty
    }
}

/// Vertical scroll that keeps the top of the stack in view
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub y: f32,
}

impl Camera {
    pub fn target_for(top_y: f32, view_threshold: f32) -> f32 {
        if top_y < view_threshold {
            view_threshold - top_y
        } else {
            0.0
        }
    }

    pub fn follow(&mut self, top_y: f32, view_threshold: f32, smoothing: f32) {
        let target = Self::target_for(top_y, view_threshold);
        self.y += (target - self.y) * smoothing;
    }
}

/// Y of the surface the next critter lands on
#[inline]
pub fn stack_top_y(base_y: f32, stack_len: usize, entry_height: f32, step: f32) -> f32 {
    base_y - stack_len as f32 * entry_height * step
}

/// Collapse risk factor for a stack of `stack_len`; the tower can only fall
/// while this is above 1.0. Always zero at or below the safe height.
pub fn collapse_risk(
    stack_len: usize,
    wobble: Wobble,
    base_width: f32,
    sway: &WobbleTuning,
    stability: &StabilityTuning,
) -> f32 {
    if stack_len <= stability.safe_height as usize {
        return 0.0;
    }
    let n = stack_len as f32;
    let top_sway = ((wobble.phase + n * sway.entry_phase_step).sin() * wobble.amount).abs();
    let threshold = base_width * stability.threshold_ratio;
    top_sway / threshold * n / stability.height_scale
}

/// Height in meters, rounded to one decimal
#[inline]
pub fn height_meters(stack_len: usize, meters_per_entry: f32) -> f32 {
    (stack_len as f32 * meters_per_entry * 10.0).round() / 10.0
}

pub struct StackSimulation<R: RandomSource = SeededRng> {
    tuning: StackTuning,
    rng: R,
    session: Session,
    /// The base raccoon
    pub avatar: Avatar,
    /// Bottom entry first
    pub stack: Vec<StackEntry>,
    pub falling: Vec<FallingItem>,
    wobble: Wobble,
    camera: Camera,
    spawner: SpawnClock,
    next_id: u32,
}

impl StackSimulation<SeededRng> {
    pub fn with_seed(tuning: StackTuning, seed: u64) -> Self {
        Self::new(tuning, SeededRng::new(seed))
    }
}

impl<R: RandomSource> StackSimulation<R> {
    pub fn new(tuning: StackTuning, rng: R) -> Self {
        let size = Vec2::new(tuning.avatar.width, tuning.avatar.height);
        let mut sim = Self {
            session: Session::new(tuning.lives),
            avatar: Avatar::new(size, tuning.avatar.speed),
            stack: Vec::new(),
            falling: Vec::new(),
            wobble: Wobble::default(),
            camera: Camera::default(),
            spawner: SpawnClock::new(tuning.spawn),
            next_id: 1,
            tuning,
            rng,
        };
        sim.restart();
        sim
    }

    /// Reset the run; the session high score board is kept
    pub fn restart(&mut self) {
        self.session.reset();
        self.stack.clear();
        self.falling.clear();
        self.wobble = Wobble::default();
        self.camera = Camera::default();
        self.spawner.reset();
        self.next_id = 1;

        let t = self.tuning.avatar;
        self.avatar = Avatar::new(Vec2::new(t.width, t.height), t.speed);
        self.avatar.pos.y = self.ground_y() - t.height;
        self.avatar.center_in(self.tuning.playfield.width);
        log::info!("Stack run started ({} lives)", self.session.lives());
    }

    pub fn tuning(&self) -> &StackTuning {
        &self.tuning
    }

    pub fn score(&self) -> u64 {
        self.session.score()
    }

    pub fn lives(&self) -> u32 {
        self.session.lives()
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn wobble(&self) -> Wobble {
        self.wobble
    }

    pub fn camera_y(&self) -> f32 {
        self.camera.y
    }

    pub fn spawn_interval_ms(&self) -> f32 {
        self.spawner.interval_ms()
    }

    pub fn high_scores(&self) -> &HighScores {
        self.session.high_scores()
    }

    pub fn last_result(&self) -> Option<&GameOverStats> {
        self.session.result()
    }

    pub fn ground_y(&self) -> f32 {
        self.tuning.playfield.height - self.tuning.ground_offset
    }

    pub fn stack_top_y(&self) -> f32 {
        stack_top_y(
            self.avatar.pos.y,
            self.stack.len(),
            self.avatar.size.y,
            self.tuning.stack_step,
        )
    }

    pub fn height_m(&self) -> f32 {
        height_meters(self.stack.len(), self.tuning.meters_per_entry)
    }

    pub fn collapse_risk(&self) -> f32 {
        collapse_risk(
            self.stack.len(),
            self.wobble,
            self.avatar.size.x,
            &self.tuning.wobble,
            &self.tuning.stability,
        )
    }

    /// Desired base left edge
    pub fn set_target_x(&mut self, x: f32) {
        if x.is_finite() {
            self.avatar.target_x = x;
            self.avatar.clamp_to(self.tuning.playfield.width);
        }
    }

    /// Pointer position: center the base under `x`
    pub fn aim_center(&mut self, x: f32) {
        self.set_target_x(x - self.avatar.size.x / 2.0);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    pub fn update(&mut self, dt_ms: f32) {
        if !self.session.is_running() {
            return;
        }
        let dt = sanitize_dt(dt_ms).min(self.tuning.max_frame_ms);
        self.session.advance_clock(dt);

        let sway = self.tuning.wobble;
        self.wobble.advance(dt, self.stack.len(), &sway);
        self.avatar.speed = self.tuning.avatar.speed * self.wobble.control_factor(&sway);

        let field_width = self.tuning.playfield.width;
        let swayed_target = self.avatar.target_x + self.wobble.phase.sin() * self.wobble.amount;
        self.avatar.steer_toward(swayed_target, dt);
        self.avatar.clamp_to(field_width);

        self.layout_stack();

        let view_threshold = self.tuning.playfield.height * self.tuning.camera.view_ratio;
        self.camera
            .follow(self.stack_top_y(), view_threshold, self.tuning.camera.smoothing);

        if self.spawner.advance(dt) {
            self.spawn_critter();
        }

        self.update_falling(dt);

        if self.session.is_running() {
            self.check_stability();
        }
    }

    /// Place every entry above the base, swaying more toward the top
    fn layout_stack(&mut self) {
        let n = self.stack.len() as f32;
        let base = self.avatar.pos;
        let size = self.avatar.size;
        let max_x = self.avatar.max_x(self.tuning.playfield.width);
        let sway = &self.tuning.wobble;

        for (i, entry) in self.stack.iter_mut().enumerate() {
            let i = i as f32;
            let offset = (self.wobble.phase + i * sway.entry_phase_step).sin()
                * (self.wobble.amount * sway.cascade * (i + 1.0) / n);
            entry.size = size;
            entry.pos.x = (base.x + offset).clamp(0.0, max_x);
            entry.pos.y = base.y - (i + 1.0) * size.y * self.tuning.stack_step;
        }
    }

    fn spawn_critter(&mut self) {
        let t = &self.tuning;
        let width = t.avatar.width * self.rng.range(t.size_range.0, t.size_range.1);
        let height = width * 1.25;
        let max_x = (t.playfield.width - width).max(0.0);
        let x = self.rng.range(0.0, max_x);
        let y = -self.camera.y - height - t.spawn_margin;
        let vy = self.rng.range(t.launch_speed.0, t.launch_speed.1);
        let spin = (self.rng.unit() - 0.5) * t.spin;

        let id = self.next_id;
        self.next_id += 1;
        log::debug!("Spawn critter #{} at x={:.0} vy={:.2}", id, x, vy);
        self.falling.push(FallingItem {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            vy,
            rotation: 0.0,
            spin,
            kind: ItemKind::Critter,
            points: 1,
        });
    }

    fn update_falling(&mut self, dt: f32) {
        let ticks = frame_ticks(dt);
        let gravity = self.tuning.gravity;
        let miss_y = self.ground_y() + self.tuning.miss_margin;
        let tolerance = self.avatar.size.x * self.tuning.landing_tolerance;
        let mut top_y = self.stack_top_y();

        let mut pending = std::mem::take(&mut self.falling).into_iter();
        let mut kept = Vec::with_capacity(pending.len());

        while let Some(mut item) = pending.next() {
            item.vy += gravity * ticks;
            item.advance(ticks);

            let aligned = (item.center_x() - self.avatar.center_x()).abs() < tolerance;
            if item.bottom() >= top_y && aligned {
                self.stack.push(StackEntry {
                    id: item.id,
                    pos: Vec2::new(self.avatar.pos.x, top_y - self.avatar.size.y),
                    size: self.avatar.size,
                });
                let stack_len = self.stack.len() as u32;
                self.session.record_landing(item.id, stack_len);
                log::debug!("Critter #{} landed, stack {}", item.id, stack_len);
                top_y = self.stack_top_y();
                continue;
            }

            if item.pos.y > miss_y {
                if self.session.record_miss(item.id, item.kind, true) {
                    kept.extend(pending);
                    self.falling = kept;
                    self.end(EndCause::OutOfLives);
                    return;
                }
                continue;
            }

            kept.push(item);
        }
        self.falling = kept;
        self.layout_stack();
    }

    /// Roll for a collapse once the stack is tall and swaying hard enough
    fn check_stability(&mut self) {
        if self.collapse_risk() <= 1.0 {
            return;
        }
        let chance = self.tuning.stability.roll_per_entry * self.stack.len() as f32;
        if self.rng.unit() < chance {
            log::info!("Stack of {} collapsed", self.stack.len());
            self.end(EndCause::StackCollapsed);
        }
    }

    fn end(&mut self, cause: EndCause) {
        let height = self.height_m();
        self.session.finish(self.stack.len() as u32, Some(height), cause);
    }

    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot {
            phase: self.session.phase(),
            avatar: BoxView::from(&self.avatar),
            stack: self.stack.iter().map(BoxView::from).collect(),
            falling: self.falling.iter().map(ItemView::from).collect(),
            stacked: self.stack.len() as u32,
            height_m: self.height_m(),
            lives: self.session.lives(),
            wobble: self.wobble.amount,
            collapse_risk: self.collapse_risk(),
            camera_y: self.camera.y,
            high_score: self.session.high_scores().best(),
        }
    }
}

impl<R: RandomSource> Simulation for StackSimulation<R> {
    type Snapshot = StackSnapshot;

    fn restart(&mut self) {
        StackSimulation::restart(self);
    }

    fn update(&mut self, dt_ms: f32) {
        StackSimulation::update(self, dt_ms);
    }

    fn set_target_x(&mut self, x: f32) {
        StackSimulation::set_target_x(self, x);
    }

    fn snapshot(&self) -> StackSnapshot {
        StackSimulation::snapshot(self)
    }

    fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        StackSimulation::drain_events(self)
    }

    fn autopilot_target(&self) -> Option<f32> {
        autopilot::stack_target(&self.avatar, &self.falling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandom;

    fn sim() -> StackSimulation {
        StackSimulation::with_seed(StackTuning::default(), 77)
    }

    fn critter(id: u32, x: f32, y: f32) -> FallingItem {
        FallingItem {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::new(60.0, 75.0),
            vy: 1.0,
            rotation: 0.0,
            spin: 0.0,
            kind: ItemKind::Critter,
            points: 1,
        }
    }

    fn pile(s: &mut StackSimulation<impl RandomSource>, n: u32) {
        for id in 0..n {
            s.stack.push(StackEntry {
                id: 1000 + id,
                pos: s.avatar.pos,
                size: s.avatar.size,
            });
        }
    }

    /// Drop a critter just above the stack top, centered on the base
    fn drop_aligned(s: &mut StackSimulation<impl RandomSource>, id: u32) {
        let top = s.stack_top_y();
        let x = s.avatar.pos.x;
        s.falling.push(critter(id, x, top - 75.0 - 1.0));
    }

    #[test]
    fn test_initial_layout() {
        let s = sim();
        assert_eq!(s.ground_y(), 520.0);
        assert_eq!(s.avatar.pos, Vec2::new(170.0, 445.0));
        assert_eq!(s.stack_top_y(), 445.0);
        assert_eq!(s.phase(), GamePhase::Running);
        assert_eq!(s.lives(), 3);
    }

    #[test]
    fn test_landing_raises_stack_top() {
        let mut s = sim();
        let mut tops = vec![s.stack_top_y()];
        for id in 1..=4 {
            drop_aligned(&mut s, id);
            s.update(16.0);
            tops.push(s.stack_top_y());
        }
        assert_eq!(s.stack.len(), 4);
        assert_eq!(s.score(), 4);
        for pair in tops.windows(2) {
            assert!((pair[0] - pair[1] - 75.0 * 0.7).abs() < 1e-3);
        }

        let landed: Vec<u32> = s
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::ItemLanded { stack_len, .. } => Some(stack_len),
                _ => None,
            })
            .collect();
        assert_eq!(landed, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_entries_sit_above_base() {
        let mut s = sim();
        pile(&mut s, 3);
        s.update(16.0);
        for (i, entry) in s.stack.iter().enumerate() {
            let expected = s.avatar.pos.y - (i as f32 + 1.0) * 75.0 * 0.7;
            assert!((entry.pos.y - expected).abs() < 1e-3);
            assert!(entry.pos.x >= 0.0 && entry.pos.x <= 340.0);
        }
    }

    #[test]
    fn test_misaligned_critter_misses() {
        let mut s = sim();
        // Base center is 200; a critter centered at 30 is far outside 48px
        s.falling.push(critter(1, 0.0, 580.0));
        s.update(16.0);
        assert!(s.stack.is_empty());
        assert!(s.falling.is_empty());
        assert_eq!(s.lives(), 2);
        assert!(s.drain_events().contains(&GameEvent::ItemMissed {
            id: 1,
            kind: ItemKind::Critter,
            life_lost: true,
        }));
    }

    #[test]
    fn test_game_over_once_out_of_lives() {
        let mut s = sim();
        drop_aligned(&mut s, 1);
        s.update(16.0);
        for id in 2..=5 {
            s.falling.push(critter(id, 0.0, 580.0));
        }
        s.update(16.0);
        assert_eq!(s.phase(), GamePhase::Ended);
        // Fifth critter was never processed
        assert_eq!(s.falling.len(), 1);

        let events = s.drain_events();
        let overs: Vec<&GameOverStats> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GameOver(stats) => Some(stats),
                _ => None,
            })
            .collect();
        assert_eq!(overs.len(), 1);
        assert_eq!(overs[0].cause, EndCause::OutOfLives);
        assert_eq!(overs[0].reached, 1);
        assert_eq!(overs[0].height_m, Some(0.5));
        assert_eq!(overs[0].final_score, 1);

        // Frozen afterwards
        let before = s.snapshot();
        s.update(16.0);
        assert_eq!(s.snapshot(), before);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_wobble_slows_the_base() {
        let mut s = sim();
        pile(&mut s, 4);
        s.update(16.0);
        assert!((s.wobble().amount - 6.0).abs() < 1e-4);
        assert!((s.avatar.speed - 0.12 * 0.8).abs() < 1e-6);

        pile(&mut s, 20);
        s.update(16.0);
        assert_eq!(s.wobble().amount, 15.0);
        assert!((s.avatar.speed - 0.06).abs() < 1e-6);
    }

    #[test]
    fn test_sway_pushes_base_off_target() {
        let mut tuning = StackTuning::default();
        tuning.avatar.speed = 1.0;
        tuning.wobble.control_penalty = 0.0;
        let mut s = StackSimulation::with_seed(tuning, 3);
        pile(&mut s, 4);
        s.wobble.phase = std::f32::consts::FRAC_PI_2 - 0.03 * 16.0;
        s.update(16.0);

        // Full-speed smoothing over one tick lands exactly on the swayed target
        let phase = s.wobble().phase;
        assert!((phase - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(s.wobble().amount, 6.0);
        assert!((s.avatar.pos.x - (170.0 + phase.sin() * 6.0)).abs() < 1e-3);
        // The input target itself is untouched
        assert_eq!(s.avatar.target_x, 170.0);
    }

    #[test]
    fn test_entries_cascade_sway() {
        let mut s = sim();
        pile(&mut s, 4);
        s.wobble.phase = 1.0;
        s.update(16.0);

        let Wobble { phase, amount } = s.wobble();
        let base_x = s.avatar.pos.x;
        let offsets: Vec<f32> = s.stack.iter().map(|e| e.pos.x - base_x).collect();
        for (i, offset) in offsets.iter().enumerate() {
            let i = i as f32;
            let expected = (phase + i * 0.3).sin() * (amount * 0.3 * (i + 1.0) / 4.0);
            assert!((offset - expected).abs() < 1e-3, "entry {i}: {offset} vs {expected}");
        }
        assert!(offsets[3].abs() > offsets[0].abs());
    }

    #[test]
    fn test_collapse_risk_grows_with_height() {
        let t = StackTuning::default();
        let mut last = 0.0;
        for n in 0..80usize {
            // Peak sway for this height
            let phase = std::f32::consts::FRAC_PI_2 - n as f32 * t.wobble.entry_phase_step;
            let amount = (n as f32 * t.wobble.per_entry).min(t.wobble.max);
            let risk = collapse_risk(
                n,
                Wobble { phase, amount },
                t.avatar.width,
                &t.wobble,
                &t.stability,
            );
            if n <= 5 {
                assert_eq!(risk, 0.0);
            }
            assert!(risk >= last, "risk dropped at {n}");
            last = risk;
        }
        assert!(last > 1.0);
    }

    #[test]
    fn test_tall_stack_collapses() {
        let mut tuning = StackTuning::default();
        tuning.stability.height_scale = 1.0;
        let mut s = StackSimulation::new(tuning, ScriptedRandom::constant(0.0));
        pile(&mut s, 10);
        for _ in 0..100 {
            s.update(16.0);
            if s.phase() == GamePhase::Ended {
                break;
            }
        }
        assert_eq!(s.phase(), GamePhase::Ended);
        let stats = s.last_result().unwrap();
        assert_eq!(stats.cause, EndCause::StackCollapsed);
        assert_eq!(stats.reached, 10);
        assert_eq!(stats.height_m, Some(5.0));
    }

    #[test]
    fn test_safe_height_never_collapses() {
        let mut tuning = StackTuning::default();
        tuning.stability.height_scale = 0.001;
        let mut s = StackSimulation::new(tuning, ScriptedRandom::constant(0.0));
        pile(&mut s, 5);
        for _ in 0..200 {
            s.update(16.0);
        }
        assert_eq!(s.phase(), GamePhase::Running);
    }

    #[test]
    fn test_camera_follows_tall_stack() {
        let mut s = sim();
        s.update(16.0);
        assert_eq!(s.camera_y(), 0.0);

        pile(&mut s, 8);
        // top = 445 - 8 * 52.5 = 25, threshold 220
        s.update(16.0);
        assert!((s.camera_y() - 195.0 * 0.05).abs() < 1e-3);
        for _ in 0..199 {
            s.update(16.0);
        }
        assert!((s.camera_y() - 195.0).abs() < 0.05);
    }

    #[test]
    fn test_frame_delta_capped() {
        let mut a = sim();
        let mut b = sim();
        a.falling.push(critter(1, 0.0, 0.0));
        b.falling.push(critter(1, 0.0, 0.0));
        a.update(10_000.0);
        b.update(100.0);
        assert_eq!(a.falling[0].pos, b.falling[0].pos);
        assert_eq!(a.session.elapsed_ms(), 100.0);
    }

    #[test]
    fn test_gravity_accelerates() {
        let mut s = sim();
        s.falling.push(critter(1, 0.0, 0.0));
        s.update(16.0);
        assert!((s.falling[0].vy - 1.25).abs() < 1e-6);
        assert!((s.falling[0].pos.y - 1.25).abs() < 1e-6);
        s.update(32.0);
        assert!((s.falling[0].vy - 1.75).abs() < 1e-6);
        assert!((s.falling[0].pos.y - 4.75).abs() < 1e-5);
    }

    #[test]
    fn test_first_spawn_after_delay() {
        let mut s = sim();
        for _ in 0..39 {
            s.update(100.0);
        }
        assert!(s.falling.is_empty());
        s.update(100.0);
        assert_eq!(s.falling.len(), 1);
        assert_eq!(s.spawn_interval_ms(), 2480.0);

        let c = &s.falling[0];
        assert_eq!(c.kind, ItemKind::Critter);
        assert!((48.0..=72.0).contains(&c.size.x));
        assert!((c.size.y - c.size.x * 1.25).abs() < 1e-4);
        assert!(c.pos.x >= 0.0 && c.pos.x + c.size.x <= 400.0);
        assert!(c.pos.y < 0.0);
    }

    #[test]
    fn test_restart_keeps_best_only() {
        let mut s = sim();
        drop_aligned(&mut s, 1);
        s.update(16.0);
        pile(&mut s, 8);
        for id in 2..=4 {
            s.falling.push(critter(id, 0.0, 580.0));
        }
        s.update(16.0);
        assert_eq!(s.phase(), GamePhase::Ended);

        s.restart();
        assert_eq!(s.phase(), GamePhase::Running);
        assert!(s.stack.is_empty());
        assert!(s.falling.is_empty());
        assert_eq!(s.lives(), 3);
        assert_eq!(s.score(), 0);
        assert_eq!(s.camera_y(), 0.0);
        assert_eq!(s.wobble(), Wobble::default());
        assert_eq!(s.high_scores().best(), 1);
        assert_eq!(s.avatar.pos, Vec2::new(170.0, 445.0));
    }

    #[test]
    fn test_target_clamped() {
        let mut s = sim();
        s.set_target_x(-500.0);
        assert_eq!(s.avatar.target_x, 0.0);
        s.aim_center(1000.0);
        assert_eq!(s.avatar.target_x, 340.0);
        s.set_target_x(f32::NAN);
        assert_eq!(s.avatar.target_x, 340.0);
    }

    #[test]
    fn test_height_meters() {
        assert_eq!(height_meters(0, 0.5), 0.0);
        assert_eq!(height_meters(7, 0.5), 3.5);
        assert_eq!(height_meters(3, 0.33), 1.0);
    }
}
