//! Sandbox state and core simulation types
//!
//! The bubble collection is held as an immutable [`Snapshot`]. Every change
//! (tick, pointer event, reset, add) builds a new collection and publishes it
//! with a bumped version; readers keep whatever snapshot they cloned.

use std::sync::Arc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bubble::Bubble;
use super::layout::{Pattern, layout};
use super::physics::PhysicsEngine;
use crate::catalog::Catalog;
use crate::consts::ADD_SPEED;

/// Whether the integration and collision passes run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}

/// Immutable view of the full bubble collection at one tick
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub bubbles: Arc<[Bubble]>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            version: 0,
            bubbles: Arc::from(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }
}

/// Pointer hold on one bubble
#[derive(Debug, Clone, PartialEq)]
pub struct Drag {
    pub bubble_id: String,
    /// Most recent pointer position (surface space)
    pub last_point: Vec2,
    /// Timestamp of `last_point`, milliseconds
    pub last_time_ms: f64,
}

/// Complete sandbox state
#[derive(Debug, Clone)]
pub struct SandboxState {
    snapshot: Snapshot,
    pub phase: SimPhase,
    pub drag: Option<Drag>,
    pub pattern: Pattern,
    rng: Pcg32,
    /// Suffix for ids of bubbles added at runtime
    next_serial: u64,
}

impl SandboxState {
    /// Empty sandbox; call [`SandboxState::reset`] to populate it
    pub fn new(seed: u64, pattern: Pattern) -> Self {
        Self {
            snapshot: Snapshot::empty(),
            phase: SimPhase::Running,
            drag: None,
            pattern,
            rng: Pcg32::seed_from_u64(seed),
            next_serial: 0,
        }
    }

    /// Latest published snapshot (cheap clone)
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.snapshot.bubbles
    }

    pub fn version(&self) -> u64 {
        self.snapshot.version
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SimPhase::Paused
    }

    /// Replace the collection and bump the version
    pub fn publish(&mut self, bubbles: Vec<Bubble>) {
        self.snapshot = Snapshot {
            version: self.snapshot.version + 1,
            bubbles: Arc::from(bubbles),
        };
    }

    /// Swap the bubble with `updated.id` for `updated`
    fn publish_replacing(&mut self, updated: Bubble) {
        let bubbles = self
            .snapshot
            .bubbles
            .iter()
            .map(|b| if b.id == updated.id { updated.clone() } else { b.clone() })
            .collect();
        self.publish(bubbles);
    }

    pub fn pause(&mut self) {
        if self.phase != SimPhase::Paused {
            self.phase = SimPhase::Paused;
            log::info!("Physics paused at version {}", self.snapshot.version);
        }
    }

    pub fn resume(&mut self) {
        if self.phase != SimPhase::Running {
            self.phase = SimPhase::Running;
            log::info!("Physics resumed at version {}", self.snapshot.version);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            SimPhase::Running => self.pause(),
            SimPhase::Paused => self.resume(),
        }
    }

    /// Discard every bubble and lay out the catalog afresh
    pub fn reset(&mut self, catalog: &Catalog, engine: &PhysicsEngine, bounds: Vec2) {
        let bubbles = layout(
            self.pattern,
            catalog.entries(),
            bounds.x,
            bounds.y,
            engine,
            &mut self.rng,
        );
        log::info!(
            "Laid out {} bubbles ({} pattern, {}x{})",
            bubbles.len(),
            self.pattern.as_str(),
            bounds.x,
            bounds.y
        );
        self.drag = None;
        self.publish(bubbles);
    }

    /// Add one bubble for a random catalog entry at a random spot.
    /// Returns the new id, or None for an empty catalog.
    pub fn add_random(
        &mut self,
        catalog: &Catalog,
        engine: &PhysicsEngine,
        bounds: Vec2,
    ) -> Option<String> {
        let (key, tech) = catalog.sample(&mut self.rng)?;
        // Catalog ids may already look like `<key>-<n>`; skip taken ones
        let id = loop {
            self.next_serial += 1;
            let id = format!("{key}-{}", self.next_serial);
            if self.snapshot.get(&id).is_none() {
                break id;
            }
        };

        let pos = Vec2::new(self.rng.random::<f32>(), self.rng.random::<f32>()) * bounds;
        let vel = Vec2::new(
            (self.rng.random::<f32>() - 0.5) * 2.0 * ADD_SPEED,
            (self.rng.random::<f32>() - 0.5) * 2.0 * ADD_SPEED,
        );
        let bubble = engine.spawn(id.clone(), tech.clone(), pos, Some(vel), &mut self.rng);
        log::debug!("Added bubble {} at ({:.0}, {:.0})", id, pos.x, pos.y);

        let mut bubbles = self.snapshot.bubbles.to_vec();
        bubbles.push(bubble);
        self.publish(bubbles);
        Some(id)
    }

    /// First bubble in collection order containing `point`
    pub fn bubble_at(&self, engine: &PhysicsEngine, point: Vec2) -> Option<&Bubble> {
        self.snapshot
            .bubbles
            .iter()
            .find(|b| engine.contains_point(point, b))
    }

    /// Pointer down. Grabs at most one bubble: its velocity is zeroed and
    /// physics leaves it alone until release. Returns the grabbed id.
    pub fn press(&mut self, engine: &PhysicsEngine, point: Vec2, time_ms: f64) -> Option<String> {
        if self.drag.is_some() {
            return None;
        }
        let grabbed = self.bubble_at(engine, point)?.grabbed();
        let id = grabbed.id.clone();
        log::debug!("Grabbed {} ({})", id, grabbed.tech.name);

        self.drag = Some(Drag {
            bubble_id: id.clone(),
            last_point: point,
            last_time_ms: time_ms,
        });
        self.publish_replacing(grabbed);
        Some(id)
    }

    /// Pointer move. The dragged bubble's centre follows the pointer.
    pub fn drag_to(&mut self, point: Vec2, time_ms: f64) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.last_point = point;
        drag.last_time_ms = time_ms;

        let id = drag.bubble_id.clone();
        if let Some(bubble) = self.snapshot.get(&id) {
            let moved = bubble.with_pos(point);
            self.publish_replacing(moved);
        }
    }

    /// Pointer up (or leave). Hands the bubble back to physics with a fling
    /// velocity from the last move to the release point.
    pub fn release(&mut self, engine: &PhysicsEngine, point: Vec2, time_ms: f64) -> Option<Vec2> {
        let drag = self.drag.take()?;
        let elapsed = (time_ms - drag.last_time_ms) as f32;
        let fling = engine.fling_velocity(drag.last_point, point, elapsed);

        let released = self.snapshot.get(&drag.bubble_id)?.released(fling);
        log::debug!(
            "Released {} with velocity ({:.2}, {:.2})",
            released.id,
            fling.x,
            fling.y
        );
        self.publish_replacing(released);
        Some(fling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bubble::fixtures::bubble;

    fn state_with(bubbles: Vec<Bubble>) -> SandboxState {
        let mut state = SandboxState::new(1, Pattern::Circle);
        state.publish(bubbles);
        state
    }

    #[test]
    fn test_publish_bumps_version_and_keeps_old_snapshot() {
        let mut state = state_with(vec![bubble("a", 100.0, 100.0, 1.0, 0.0, 40.0)]);
        let before = state.snapshot();
        state.publish(Vec::new());
        assert_eq!(state.version(), before.version + 1);
        assert_eq!(before.len(), 1);
        assert!(state.snapshot().is_empty());
    }

    #[test]
    fn test_reset_lays_out_catalog() {
        let catalog = Catalog::builtin();
        let engine = PhysicsEngine::default();
        let mut state = SandboxState::new(3, Pattern::Spiral);
        state.reset(&catalog, &engine, Vec2::new(800.0, 600.0));
        assert_eq!(state.bubbles().len(), 15);
        assert_eq!(state.bubbles()[0].id, "react");
    }

    #[test]
    fn test_add_random_ids_are_unique() {
        let catalog = Catalog::builtin();
        let engine = PhysicsEngine::default();
        let mut state = SandboxState::new(3, Pattern::Circle);
        state.reset(&catalog, &engine, Vec2::new(800.0, 600.0));

        let mut ids: Vec<String> = state.bubbles().iter().map(|b| b.id.clone()).collect();
        for _ in 0..20 {
            let id = state
                .add_random(&catalog, &engine, Vec2::new(800.0, 600.0))
                .unwrap();
            assert!(!ids.contains(&id));
            ids.push(id);
        }
        assert_eq!(state.bubbles().len(), 35);
        for b in &state.bubbles()[15..] {
            assert!(b.vel.x.abs() <= 5.0 && b.vel.y.abs() <= 5.0);
            assert!(b.pos.x >= 0.0 && b.pos.x <= 800.0);
        }
    }

    #[test]
    fn test_add_random_skips_ids_taken_by_catalog() {
        let catalog = Catalog::from_json(
            r##"[
                {"id": "react", "name": "React", "icon": "devicon-react-original", "color": "#61DAFB", "category": "Frontend", "description": ""},
                {"id": "react-1", "name": "React 1", "icon": "devicon-react-plain", "color": "#61DAFB", "category": "Frontend", "description": ""}
            ]"##,
        )
        .unwrap();
        let engine = PhysicsEngine::default();
        let bounds = Vec2::new(800.0, 600.0);

        for seed in 0..16 {
            let mut state = SandboxState::new(seed, Pattern::Circle);
            state.reset(&catalog, &engine, bounds);
            let id = state.add_random(&catalog, &engine, bounds).unwrap();

            let copies = state.bubbles().iter().filter(|b| b.id == id).count();
            assert_eq!(copies, 1, "seed {seed} produced duplicate id {id}");
            assert_ne!(id, "react-1");

            // Dragging the new bubble leaves the others in place
            let before: Vec<Vec2> = state.bubbles()[..2].iter().map(|b| b.pos).collect();
            let at = state.snapshot().get(&id).unwrap().pos;
            state.press(&engine, at, 0.0);
            if state.drag.as_ref().map(|d| d.bubble_id.as_str()) == Some(id.as_str()) {
                state.drag_to(Vec2::new(5.0, 5.0), 16.0);
                let after: Vec<Vec2> = state.bubbles()[..2].iter().map(|b| b.pos).collect();
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn test_add_random_on_empty_catalog() {
        let mut state = SandboxState::new(3, Pattern::Circle);
        let engine = PhysicsEngine::default();
        assert!(
            state
                .add_random(&Catalog::new(), &engine, Vec2::new(800.0, 600.0))
                .is_none()
        );
        assert_eq!(state.version(), 0);
    }

    #[test]
    fn test_press_first_match_wins() {
        let engine = PhysicsEngine::default();
        let mut state = state_with(vec![
            bubble("a", 100.0, 100.0, 3.0, 3.0, 40.0),
            bubble("b", 120.0, 100.0, 3.0, 3.0, 40.0),
        ]);

        assert_eq!(state.press(&engine, Vec2::new(110.0, 100.0), 0.0).as_deref(), Some("a"));
        let a = state.snapshot().get("a").cloned().unwrap();
        assert!(a.is_dragging);
        assert_eq!(a.vel, Vec2::ZERO);
        assert!(!state.snapshot().get("b").unwrap().is_dragging);
    }

    #[test]
    fn test_press_on_empty_space_grabs_nothing() {
        let engine = PhysicsEngine::default();
        let mut state = state_with(vec![bubble("a", 100.0, 100.0, 3.0, 3.0, 40.0)]);
        let version = state.version();
        assert!(state.press(&engine, Vec2::new(500.0, 500.0), 0.0).is_none());
        assert!(state.drag.is_none());
        assert_eq!(state.version(), version);
    }

    #[test]
    fn test_drag_and_fling() {
        let engine = PhysicsEngine::default();
        let mut state = state_with(vec![bubble("a", 250.0, 150.0, 0.0, 0.0, 40.0)]);

        state.press(&engine, Vec2::new(250.0, 150.0), 1000.0);
        state.drag_to(Vec2::new(260.0, 160.0), 1010.0);
        assert_eq!(state.snapshot().get("a").unwrap().pos, Vec2::new(260.0, 160.0));

        // 500ms after the last move: 2x multiplier, 40 * 0.2 * 2 = 16 -> capped 15
        let fling = state
            .release(&engine, Vec2::new(300.0, 170.0), 1510.0)
            .unwrap();
        assert_eq!(fling.x, 15.0);
        assert!((fling.y - 4.0).abs() < 1e-5);

        let a = state.snapshot().get("a").cloned().unwrap();
        assert!(!a.is_dragging);
        assert_eq!(a.vel, fling);
        assert!(state.drag.is_none());
    }

    #[test]
    fn test_release_without_drag_is_ignored() {
        let engine = PhysicsEngine::default();
        let mut state = state_with(vec![bubble("a", 100.0, 100.0, 1.0, 0.0, 40.0)]);
        assert!(state.release(&engine, Vec2::ZERO, 0.0).is_none());
        assert_eq!(state.version(), 1);
    }

    #[test]
    fn test_toggle_pause() {
        let mut state = SandboxState::new(1, Pattern::Circle);
        assert!(!state.is_paused());
        state.toggle_pause();
        assert!(state.is_paused());
        state.toggle_pause();
        assert_eq!(state.phase, SimPhase::Running);
    }
}
