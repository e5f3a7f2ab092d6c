//! Catch game simulation
//!
//! One type covers both catch variants; the tuning decides whether levels
//! shrink the avatar, which part of it catches, and which power-ups exist.

use glam::Vec2;

use super::autopilot;
use super::avatar::Avatar;
use super::modifier::{ModifierKind, ModifierSet};
use super::random::{RandomSource, SeededRng};
use super::session::{Session, Simulation};
use super::snapshot::{BoxView, CatchSnapshot, ItemView, ModifierView};
use super::spawn::{SpawnClock, SpecialSchedule, choose_kind, schedules_for};
use super::state::{EndCause, FallingItem, GameEvent, GameOverStats, GamePhase, ItemKind};
use crate::highscores::HighScores;
use crate::tuning::CatchTuning;
use crate::{frame_ticks, sanitize_dt};

/// Level is derived from score, never stored independently of it
#[inline]
pub fn level_for_score(score: u64, points_per_level: u64) -> u32 {
    (score / points_per_level.max(1)) as u32 + 1
}

pub struct CatchSimulation<R: RandomSource = SeededRng> {
    tuning: CatchTuning,
    rng: R,
    session: Session,
    level: u32,
    pub avatar: Avatar,
    modifiers: ModifierSet,
    spawner: SpawnClock,
    schedules: Vec<SpecialSchedule>,
    /// Falling items, oldest first
    pub items: Vec<FallingItem>,
    next_id: u32,
}

impl CatchSimulation<SeededRng> {
    pub fn with_seed(tuning: CatchTuning, seed: u64) -> Self {
        Self::new(tuning, SeededRng::new(seed))
    }
}

impl<R: RandomSource> CatchSimulation<R> {
    /// Create a simulation with a running session
    pub fn new(tuning: CatchTuning, rng: R) -> Self {
        let mut sim = Self {
            session: Session::new(tuning.lives),
            level: 1,
            avatar: Avatar::new(Vec2::ZERO, tuning.avatar.speed),
            modifiers: ModifierSet::new(&tuning.modifiers),
            spawner: SpawnClock::new(tuning.spawn),
            schedules: Vec::new(),
            items: Vec::new(),
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
        self.level = 1;
        self.items.clear();
        self.next_id = 1;
        self.spawner.reset();
        self.modifiers.clear();
        self.schedules = schedules_for(&self.tuning.specials, &mut self.rng);
        self.recompute_avatar_geometry();
        self.avatar.center_in(self.tuning.playfield.width);
        log::info!(
            "Catch run started ({} lives, avatar {:.0}px)",
            self.session.lives(),
            self.avatar.size.x
        );
    }

    pub fn tuning(&self) -> &CatchTuning {
        &self.tuning
    }

    pub fn score(&self) -> u64 {
        self.session.score()
    }

    pub fn lives(&self) -> u32 {
        self.session.lives()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    pub fn schedules(&self) -> &[SpecialSchedule] {
        &self.schedules
    }

    pub fn spawn_interval_ms(&self) -> f32 {
        self.spawner.interval_ms()
    }

    pub fn high_scores(&self) -> &HighScores {
        self.session.high_scores()
    }

    /// Stats of the run that just ended, if it has
    pub fn last_result(&self) -> Option<&GameOverStats> {
        self.session.result()
    }

    /// Desired avatar left edge
    pub fn set_target_x(&mut self, x: f32) {
        if x.is_finite() {
            self.avatar.target_x = x;
            self.avatar.clamp_to(self.tuning.playfield.width);
        }
    }

    /// Pointer position: center the avatar under `x`
    pub fn aim_center(&mut self, x: f32) {
        self.set_target_x(x - self.avatar.size.x / 2.0);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    /// Advance the simulation by one frame
    pub fn update(&mut self, dt_ms: f32) {
        if !self.session.is_running() {
            return;
        }
        let dt = sanitize_dt(dt_ms);
        self.session.advance_clock(dt);
        self.sync_level();

        let expired = self.modifiers.tick(dt);
        if !expired.is_empty() {
            for kind in expired {
                log::debug!("{:?} expired", kind);
                self.session.emit(GameEvent::ModifierExpired(kind));
            }
            self.recompute_avatar_geometry();
        }

        let field_width = self.tuning.playfield.width;
        self.avatar.clamp_to(field_width);
        self.avatar.steer_toward(self.avatar.target_x, dt);
        self.avatar.clamp_to(field_width);

        if self.spawner.advance(dt) {
            self.spawn_item();
        }

        self.update_items(dt);

        if self.session.is_running() {
            self.sync_level();
        }
    }

    /// Recompute level from score; resize the avatar when it changes
    fn sync_level(&mut self) {
        let level = level_for_score(self.session.score(), self.tuning.points_per_level);
        if level != self.level {
            self.level = level;
            self.recompute_avatar_geometry();
            log::info!("Level {} (avatar {:.0}px)", level, self.avatar.size.x);
            self.session.emit(GameEvent::LevelUp { level });
        }
    }

    /// The single place avatar size and speed are derived from level and
    /// active modifiers
    fn recompute_avatar_geometry(&mut self) {
        let t = &self.tuning.avatar;
        let field = self.tuning.playfield;

        let shrink = (self.level - 1) as f32 * t.shrink_per_level;
        let level_width = (t.base_width - shrink).max(t.min_width);
        let cap_ratio = if self.modifiers.is_active(ModifierKind::Grow) {
            t.grown_width_ratio
        } else {
            t.max_width_ratio
        };
        let width = (level_width * self.modifiers.size_multiplier()).min(field.width * cap_ratio);
        let height = width * t.aspect;

        self.avatar.size = Vec2::new(width, height);
        self.avatar.pos.y = field.height - height - t.ground_margin;
        self.avatar.speed = t.speed * self.modifiers.speed_multiplier();
        self.avatar.clamp_to(field.width);
    }

    fn activate_modifier(&mut self, kind: ModifierKind) {
        if self.modifiers.activate(kind) {
            log::debug!("{:?} active", kind);
            self.session.emit(GameEvent::ModifierStarted(kind));
            self.recompute_avatar_geometry();
        }
    }

    fn spawn_item(&mut self) {
        let (kind, points) = choose_kind(
            self.level,
            &self.tuning.specials,
            &mut self.schedules,
            &self.tuning.trash,
            &mut self.rng,
        );

        let size = if kind.is_special() {
            self.tuning.special_size
        } else {
            self.rng.range(self.tuning.trash_size.0, self.tuning.trash_size.1)
        };

        let fall = &self.tuning.fall;
        let level_speed = fall.base_speed + (self.level - 1) as f32 * fall.per_level;
        let vy = level_speed.min(fall.max_speed) + self.rng.range(0.0, fall.jitter);

        let max_x = (self.tuning.playfield.width - size).max(0.0);
        let x = self.rng.range(0.0, max_x);
        let rotation = self.rng.range(0.0, std::f32::consts::TAU);
        let spin = (self.rng.unit() - 0.5) * self.tuning.spin;

        let id = self.next_id;
        self.next_id += 1;
        log::debug!("Spawn #{} {:?} at x={:.0} vy={:.2}", id, kind, x, vy);
        self.items.push(FallingItem {
            id,
            pos: Vec2::new(x, -size),
            size: Vec2::splat(size),
            vy,
            rotation,
            spin,
            kind,
            points,
        });
    }

    fn update_items(&mut self, dt: f32) {
        let ticks = frame_ticks(dt);
        let floor = self.tuning.playfield.height;
        let mut zone = self.tuning.catch_zone.resolve(self.avatar.rect());

        let mut pending = std::mem::take(&mut self.items).into_iter();
        let mut kept = Vec::with_capacity(pending.len());

        while let Some(mut item) = pending.next() {
            item.advance(ticks);

            if item.rect().overlaps(&zone) {
                self.session.record_catch(item.id, item.kind, item.points);
                if let ItemKind::Special(special) = item.kind {
                    self.activate_modifier(special.effect());
                    zone = self.tuning.catch_zone.resolve(self.avatar.rect());
                }
                continue;
            }

            if item.pos.y > floor {
                let costs_life =
                    !item.kind.is_special() && !self.modifiers.is_active(ModifierKind::SpeedBoost);
                if self.session.record_miss(item.id, item.kind, costs_life) {
                    // Frozen from here on: leave the rest untouched
                    kept.extend(pending);
                    self.items = kept;
                    self.session.finish(self.level, None, EndCause::OutOfLives);
                    return;
                }
                continue;
            }

            kept.push(item);
        }
        self.items = kept;
    }

    pub fn snapshot(&self) -> CatchSnapshot {
        CatchSnapshot {
            phase: self.session.phase(),
            avatar: BoxView::from(&self.avatar),
            modifiers: self
                .modifiers
                .iter()
                .filter(|m| m.is_active())
                .map(|m| ModifierView {
                    kind: m.tuning.kind,
                    remaining_ms: m.remaining_ms(),
                })
                .collect(),
            items: self.items.iter().map(ItemView::from).collect(),
            score: self.session.score(),
            lives: self.session.lives(),
            level: self.level,
            high_score: self.session.high_scores().best(),
        }
    }
}

impl<R: RandomSource> Simulation for CatchSimulation<R> {
    type Snapshot = CatchSnapshot;

    fn restart(&mut self) {
        CatchSimulation::restart(self);
    }

    fn update(&mut self, dt_ms: f32) {
        CatchSimulation::update(self, dt_ms);
    }

    fn set_target_x(&mut self, x: f32) {
        CatchSimulation::set_target_x(self, x);
    }

    fn snapshot(&self) -> CatchSnapshot {
        CatchSimulation::snapshot(self)
    }

    fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        CatchSimulation::drain_events(self)
    }

    fn autopilot_target(&self) -> Option<f32> {
        let shielded = self.modifiers.is_active(ModifierKind::SpeedBoost);
        autopilot::catch_target(&self.avatar, &self.items, shielded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::CatchZone;
    use crate::sim::random::ScriptedRandom;
    use crate::sim::state::{SpecialKind, TrashKind};

    fn sim() -> CatchSimulation {
        CatchSimulation::with_seed(CatchTuning::deluxe(), 1234)
    }

    fn item(id: u32, x: f32, y: f32, size: f32, kind: ItemKind, points: u64) -> FallingItem {
        FallingItem {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::splat(size),
            vy: 0.0,
            rotation: 0.0,
            spin: 0.0,
            kind,
            points,
        }
    }

    fn game_overs(events: &[GameEvent]) -> Vec<&GameOverStats> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GameOver(stats) => Some(stats),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_level_for_score() {
        let levels: Vec<u32> = [0, 99, 100, 250]
            .iter()
            .map(|&s| level_for_score(s, 100))
            .collect();
        assert_eq!(levels, vec![1, 1, 2, 3]);
    }

    #[test]
    fn test_level_tracks_score() {
        let mut s = sim();
        for (score, expected) in [(0, 1), (99, 1), (100, 2), (250, 3)] {
            s.session.reset();
            s.session.record_catch(0, ItemKind::Trash(TrashKind::Can), score);
            s.update(0.0);
            assert_eq!(s.level(), expected);
            assert_eq!(s.snapshot().level, expected);
        }
    }

    #[test]
    fn test_initial_layout() {
        let s = sim();
        assert_eq!(s.phase(), GamePhase::Running);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.level(), 1);
        // Level 1 width 120, cap 0.45 * 400 = 180
        assert_eq!(s.avatar.size, Vec2::new(120.0, 150.0));
        assert_eq!(s.avatar.pos, Vec2::new(140.0, 550.0 - 150.0 - 20.0));
        assert_eq!(s.avatar.target_x, 140.0);
    }

    #[test]
    fn test_collision_scenario() {
        let mut s = sim();
        s.avatar.pos = Vec2::new(100.0, 500.0);
        s.avatar.size = Vec2::new(80.0, 100.0);
        s.avatar.target_x = 100.0;
        s.items.push(item(7, 150.0, 490.0, 35.0, ItemKind::Trash(TrashKind::Box), 20));

        s.update(0.0);
        assert!(s.items.is_empty());
        assert_eq!(s.score(), 20);

        let caught: Vec<_> = s
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ItemCaught { id: 7, .. }))
            .collect();
        assert_eq!(caught.len(), 1);

        // Nothing fires again on the next frame
        s.update(0.0);
        assert_eq!(s.score(), 20);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_catch_zone_is_configurable() {
        let mut tuning = CatchTuning::classic();
        tuning.catch_zone = CatchZone::BottomBand { fraction: 0.5 };
        let mut s = CatchSimulation::with_seed(tuning, 1);
        s.avatar.pos = Vec2::new(100.0, 400.0);
        s.avatar.size = Vec2::new(80.0, 100.0);
        s.avatar.target_x = 100.0;
        // Overlaps the head but not the bottom half
        s.items.push(item(1, 120.0, 380.0, 30.0, ItemKind::Trash(TrashKind::Can), 10));
        s.update(0.0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.items.len(), 1);

        // Now inside the container band
        s.items[0].pos.y = 440.0;
        s.update(0.0);
        assert_eq!(s.score(), 10);
    }

    #[test]
    fn test_miss_costs_one_life() {
        let mut s = sim();
        s.items.push(item(1, 0.0, 551.0, 35.0, ItemKind::Trash(TrashKind::Can), 10));
        s.update(0.0);
        assert_eq!(s.lives(), 2);
        assert!(s.items.is_empty());
        assert_eq!(s.phase(), GamePhase::Running);
    }

    #[test]
    fn test_game_over_fires_once_with_final_score() {
        let mut s = sim();
        s.session.record_catch(0, ItemKind::Trash(TrashKind::Tire), 70);
        for id in 1..=3 {
            s.items.push(item(id, 0.0, 600.0, 35.0, ItemKind::Trash(TrashKind::Can), 10));
            s.update(0.0);
        }
        assert_eq!(s.lives(), 0);
        assert_eq!(s.phase(), GamePhase::Ended);

        // Further updates are frozen
        s.items.push(item(9, 0.0, 600.0, 35.0, ItemKind::Trash(TrashKind::Can), 10));
        s.update(16.0);
        s.update(16.0);
        assert_eq!(s.items.len(), 1);

        let events = s.drain_events();
        let overs = game_overs(&events);
        assert_eq!(overs.len(), 1);
        assert_eq!(overs[0].final_score, 70);
        assert_eq!(overs[0].cause, EndCause::OutOfLives);
        assert!(overs[0].new_best);
        assert_eq!(s.snapshot().high_score, 70);
    }

    #[test]
    fn test_game_over_stops_remaining_items() {
        let mut s = sim();
        s.session.record_miss(0, ItemKind::Trash(TrashKind::Can), true);
        s.session.record_miss(0, ItemKind::Trash(TrashKind::Can), true);
        s.items.push(item(1, 0.0, 600.0, 35.0, ItemKind::Trash(TrashKind::Can), 10));
        s.items.push(item(2, 0.0, 600.0, 35.0, ItemKind::Trash(TrashKind::Can), 10));
        s.update(0.0);
        assert_eq!(s.phase(), GamePhase::Ended);
        assert_eq!(s.items.len(), 1);
        assert_eq!(s.items[0].id, 2);
    }

    #[test]
    fn test_special_miss_is_free() {
        let mut s = sim();
        s.items.push(item(
            1,
            0.0,
            600.0,
            45.0,
            ItemKind::Special(SpecialKind::RedBerry),
            0,
        ));
        s.update(0.0);
        assert_eq!(s.lives(), 3);
        assert!(s.items.is_empty());
    }

    #[test]
    fn test_speed_boost_protects_lives() {
        let mut s = sim();
        s.activate_modifier(ModifierKind::SpeedBoost);
        assert!((s.avatar.speed - 0.225).abs() < 1e-6);
        s.items.push(item(1, 0.0, 600.0, 35.0, ItemKind::Trash(TrashKind::Can), 10));
        s.update(0.0);
        assert_eq!(s.lives(), 3);

        s.update(15_000.0);
        assert!(!s.modifiers().is_active(ModifierKind::SpeedBoost));
        assert!((s.avatar.speed - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_catching_special_applies_effect() {
        let mut s = sim();
        let x = s.avatar.pos.x;
        let y = s.avatar.pos.y;
        s.items.push(item(
            1,
            x + 10.0,
            y + 10.0,
            45.0,
            ItemKind::Special(SpecialKind::RedBerry),
            0,
        ));
        s.update(0.0);
        assert!(s.modifiers().is_active(ModifierKind::Grow));
        // 120 * 3 = 360, capped at 0.9 * 400
        assert_eq!(s.avatar.size.x, 360.0);
        assert!(s.avatar.pos.x + s.avatar.size.x <= 400.0);

        let events = s.drain_events();
        assert!(events.contains(&GameEvent::ModifierStarted(ModifierKind::Grow)));

        s.update(10_000.0);
        assert!(!s.modifiers().is_active(ModifierKind::Grow));
        assert_eq!(s.avatar.size.x, 120.0);
        assert!(s.drain_events().contains(&GameEvent::ModifierExpired(ModifierKind::Grow)));
    }

    #[test]
    fn test_grow_cancels_shrink() {
        let mut s = sim();
        s.activate_modifier(ModifierKind::Shrink);
        assert!((s.avatar.size.x - 36.0).abs() < 1e-4);
        s.activate_modifier(ModifierKind::Grow);
        assert!(s.modifiers().is_active(ModifierKind::Grow));
        assert!(!s.modifiers().is_active(ModifierKind::Shrink));
        assert_eq!(s.snapshot().modifiers.len(), 1);
    }

    #[test]
    fn test_level_up_shrinks_avatar() {
        let mut s = sim();
        s.avatar.target_x = 400.0;
        s.avatar.pos.x = 280.0;
        s.session.record_catch(0, ItemKind::Trash(TrashKind::Box), 300);
        s.update(0.0);
        assert_eq!(s.level(), 4);
        assert_eq!(s.avatar.size.x, 105.0);
        assert!(s.drain_events().contains(&GameEvent::LevelUp { level: 4 }));

        s.session.record_catch(0, ItemKind::Trash(TrashKind::Box), 5000);
        s.update(0.0);
        // Floored at min width
        assert_eq!(s.avatar.size.x, 60.0);
        assert!(s.avatar.pos.x <= 400.0 - 60.0);
    }

    #[test]
    fn test_fall_speed_by_level() {
        // All randomness pinned to 0: speed is exactly the level curve
        let mut s = CatchSimulation::new(CatchTuning::deluxe(), ScriptedRandom::constant(0.0));
        s.spawn_item();
        assert_eq!(s.items[0].vy, 1.0);
        s.session.record_catch(0, ItemKind::Trash(TrashKind::Can), 1000);
        s.update(0.0);
        s.spawn_item();
        assert!((s.items.last().unwrap().vy - 2.5).abs() < 1e-5);
        s.session.record_catch(0, ItemKind::Trash(TrashKind::Can), 10_000);
        s.update(0.0);
        s.spawn_item();
        assert_eq!(s.items.last().unwrap().vy, 5.0);
    }

    #[test]
    fn test_spawned_item_geometry() {
        let mut s = CatchSimulation::new(CatchTuning::deluxe(), ScriptedRandom::constant(0.5));
        s.spawn_item();
        let it = &s.items[0];
        assert!((it.size.x - 42.5).abs() < 1e-4);
        assert_eq!(it.pos.y, -it.size.y);
        assert!(it.pos.x >= 0.0 && it.pos.x + it.size.x <= 400.0);
        assert_eq!(it.spin, 0.0);
    }

    #[test]
    fn test_spawn_interval_ramps() {
        let mut s = sim();
        for _ in 0..(10_000 / 16 + 1) {
            s.items.clear();
            s.update(16.0);
        }
        assert_eq!(s.phase(), GamePhase::Running);
        assert_eq!(s.spawn_interval_ms(), 1400.0);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut s = sim();
        s.session.record_catch(0, ItemKind::Trash(TrashKind::Tire), 450);
        s.update(0.0);
        s.activate_modifier(ModifierKind::Shrink);
        s.session.record_miss(0, ItemKind::Trash(TrashKind::Can), true);
        for _ in 0..200 {
            s.update(16.0);
        }
        assert!(!s.items.is_empty());

        s.restart();
        assert_eq!(s.score(), 0);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.level(), 1);
        assert!(s.items.is_empty());
        assert_eq!(s.spawn_interval_ms(), 1500.0);
        assert!(s.modifiers().iter().all(|m| !m.is_active()));
        assert_eq!(s.avatar.size.x, 120.0);
        assert_eq!(s.phase(), GamePhase::Running);
        assert!(s.drain_events().is_empty());
        assert!(s.last_result().is_none());

        // Restart twice in a row lands in the same state
        s.restart();
        assert_eq!(s.score(), 0);
        assert!(s.items.is_empty());
    }

    #[test]
    fn test_target_clamped() {
        let mut s = sim();
        s.set_target_x(10_000.0);
        assert_eq!(s.avatar.target_x, 400.0 - s.avatar.size.x);
        s.set_target_x(f32::NAN);
        assert_eq!(s.avatar.target_x, 400.0 - s.avatar.size.x);
        s.aim_center(0.0);
        assert_eq!(s.avatar.target_x, 0.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = sim();
        let mut b = sim();
        for frame in 0..600 {
            let target = (frame as f32 * 0.05).sin() * 200.0 + 150.0;
            a.set_target_x(target);
            b.set_target_x(target);
            a.update(16.7);
            b.update(16.7);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
