//! Initial bubble placement
//!
//! A placement pattern maps the i-th of N entities to a starting position.
//! Patterns are interchangeable behind [`Placement`] and are picked by name.

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bubble::Bubble;
use super::physics::PhysicsEngine;
use crate::catalog::TechEntity;
use crate::consts::*;

/// Strategy for computing initial positions
pub trait Placement {
    fn position(&self, index: usize, count: usize, bounds: Vec2, rng: &mut Pcg32) -> Vec2;
}

/// Ring around the centre with per-axis jitter
#[derive(Debug, Clone, Copy, Default)]
pub struct CirclePlacement;

impl Placement for CirclePlacement {
    fn position(&self, index: usize, count: usize, bounds: Vec2, rng: &mut Pcg32) -> Vec2 {
        let angle = index as f32 / count.max(1) as f32 * TAU;
        let ring = bounds.min_element() * CIRCLE_RING_FRACTION;
        let jitter = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * CIRCLE_JITTER,
            (rng.random::<f32>() - 0.5) * 2.0 * CIRCLE_JITTER,
        );
        bounds * 0.5 + Vec2::from_angle(angle) * ring + jitter
    }
}

/// Archimedean spiral out from the centre
#[derive(Debug, Clone, Copy, Default)]
pub struct SpiralPlacement;

impl Placement for SpiralPlacement {
    fn position(&self, index: usize, _count: usize, bounds: Vec2, _rng: &mut Pcg32) -> Vec2 {
        let i = index as f32;
        let angle = i * SPIRAL_ANGLE_STEP;
        let radius = i * SPIRAL_RADIUS_STEP + SPIRAL_BASE_RADIUS;
        bounds * 0.5 + Vec2::from_angle(angle) * radius
    }
}

/// Uniform inside the inset rectangle
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlacement;

impl Placement for RandomPlacement {
    fn position(&self, _index: usize, _count: usize, bounds: Vec2, rng: &mut Pcg32) -> Vec2 {
        let span = bounds - Vec2::splat(LAYOUT_INSET * 2.0);
        Vec2::splat(LAYOUT_INSET) + Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * span
    }
}

/// Row-major grid spread over the inset rectangle
#[derive(Debug, Clone, Copy, Default)]
pub struct GridPlacement;

impl Placement for GridPlacement {
    fn position(&self, index: usize, count: usize, bounds: Vec2, _rng: &mut Pcg32) -> Vec2 {
        let cols = (count.max(1) as f32).sqrt().ceil() as usize;
        let rows = count.max(1).div_ceil(cols);
        let span = bounds - Vec2::splat(LAYOUT_INSET * 2.0);
        let cell = Vec2::new(span.x / cols as f32, span.y / rows as f32);
        let (col, row) = (index % cols, index / cols);
        Vec2::splat(LAYOUT_INSET) + Vec2::new(col as f32 + 0.5, row as f32 + 0.5) * cell
    }
}

/// Named placement pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    #[default]
    Circle,
    Spiral,
    Random,
    Grid,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Circle => "circle",
            Pattern::Spiral => "spiral",
            Pattern::Random => "random",
            Pattern::Grid => "grid",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "circle" => Some(Pattern::Circle),
            "spiral" => Some(Pattern::Spiral),
            "random" => Some(Pattern::Random),
            "grid" => Some(Pattern::Grid),
            _ => None,
        }
    }

    pub fn placement(&self) -> &'static dyn Placement {
        match self {
            Pattern::Circle => &CirclePlacement,
            Pattern::Spiral => &SpiralPlacement,
            Pattern::Random => &RandomPlacement,
            Pattern::Grid => &GridPlacement,
        }
    }
}

/// Build a fresh population, one bubble per entry, ids taken from the entries
pub fn layout(
    pattern: Pattern,
    entries: &[(String, Arc<TechEntity>)],
    width: f32,
    height: f32,
    engine: &PhysicsEngine,
    rng: &mut Pcg32,
) -> Vec<Bubble> {
    let placement = pattern.placement();
    let bounds = Vec2::new(width, height);
    let count = entries.len();

    entries
        .iter()
        .enumerate()
        .map(|(i, (id, tech))| {
            let pos = placement.position(i, count, bounds, rng);
            engine.spawn(id.clone(), tech.clone(), pos, None, rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use rand::SeedableRng;

    #[test]
    fn test_pattern_names() {
        for pattern in [Pattern::Circle, Pattern::Spiral, Pattern::Random, Pattern::Grid] {
            assert_eq!(Pattern::from_name(pattern.as_str()), Some(pattern));
        }
        assert_eq!(Pattern::from_name(" Spiral "), Some(Pattern::Spiral));
        assert_eq!(Pattern::from_name("hexagon"), None);
    }

    #[test]
    fn test_circle_ring_with_jitter() {
        let mut rng = Pcg32::seed_from_u64(1);
        let bounds = Vec2::new(800.0, 600.0);
        let centre = bounds * 0.5;
        for i in 0..12 {
            let pos = CirclePlacement.position(i, 12, bounds, &mut rng);
            let ideal = centre + Vec2::from_angle(i as f32 / 12.0 * TAU) * 180.0;
            let off = pos - ideal;
            assert!(off.x.abs() <= 50.0 + 1e-3 && off.y.abs() <= 50.0 + 1e-3);
        }
    }

    #[test]
    fn test_spiral_positions() {
        let mut rng = Pcg32::seed_from_u64(1);
        let bounds = Vec2::new(800.0, 600.0);
        let first = SpiralPlacement.position(0, 5, bounds, &mut rng);
        assert_eq!(first, Vec2::new(450.0, 300.0));
        let third = SpiralPlacement.position(2, 5, bounds, &mut rng);
        assert!(((third - bounds * 0.5).length() - 80.0).abs() < 1e-3);
    }

    #[test]
    fn test_random_stays_inset() {
        let mut rng = Pcg32::seed_from_u64(3);
        let bounds = Vec2::new(800.0, 600.0);
        for i in 0..100 {
            let pos = RandomPlacement.position(i, 100, bounds, &mut rng);
            assert!(pos.x >= 100.0 && pos.x <= 700.0);
            assert!(pos.y >= 100.0 && pos.y <= 500.0);
        }
    }

    #[test]
    fn test_grid_cells_are_distinct() {
        let mut rng = Pcg32::seed_from_u64(3);
        let bounds = Vec2::new(800.0, 600.0);
        let cells: Vec<Vec2> = (0..5)
            .map(|i| GridPlacement.position(i, 5, bounds, &mut rng))
            .collect();
        // 3 columns, 2 rows over a 600 x 400 area
        assert_eq!(cells[0], Vec2::new(200.0, 200.0));
        assert_eq!(cells[4], Vec2::new(400.0, 400.0));
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_layout_uses_catalog_ids_in_order() {
        let catalog = Catalog::builtin();
        let engine = PhysicsEngine::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let bubbles = layout(Pattern::Circle, catalog.entries(), 800.0, 600.0, &engine, &mut rng);
        assert_eq!(bubbles.len(), catalog.len());
        for (bubble, (id, tech)) in bubbles.iter().zip(catalog.entries()) {
            assert_eq!(&bubble.id, id);
            assert_eq!(bubble.tech.name, tech.name);
            assert!(bubble.radius >= 40.0 && bubble.radius <= 60.0);
        }
    }

    #[test]
    fn test_layout_is_reproducible_for_a_seed() {
        let catalog = Catalog::builtin();
        let engine = PhysicsEngine::default();
        let a = layout(
            Pattern::Random,
            catalog.entries(),
            800.0,
            600.0,
            &engine,
            &mut Pcg32::seed_from_u64(5),
        );
        let b = layout(
            Pattern::Random,
            catalog.entries(),
            800.0,
            600.0,
            &engine,
            &mut Pcg32::seed_from_u64(5),
        );
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.vel, y.vel);
            assert_eq!(x.radius, y.radius);
        }
    }
}
