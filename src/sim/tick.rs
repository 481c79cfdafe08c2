//! One simulation step
//!
//! Integrate every bubble, then resolve pairwise collisions among the
//! non-dragged ones, then publish the result as a single snapshot. The
//! renderer only ever sees the published result.

use glam::Vec2;

use super::physics::PhysicsEngine;
use super::state::SandboxState;

/// Advance the sandbox by one frame inside `bounds`.
///
/// Returns false (and leaves the snapshot untouched) while paused. There is
/// no elapsed-time input, so resuming never replays the paused interval.
pub fn tick(state: &mut SandboxState, engine: &PhysicsEngine, bounds: Vec2) -> bool {
    if state.is_paused() {
        return false;
    }

    let mut bubbles: Vec<_> = state
        .bubbles()
        .iter()
        .map(|b| engine.integrate(b, bounds.x, bounds.y))
        .collect();

    let mut contacts = 0usize;
    for i in 0..bubbles.len() {
        for j in (i + 1)..bubbles.len() {
            if bubbles[i].is_dragging || bubbles[j].is_dragging {
                continue;
            }
            let result = engine.detect_collision(&bubbles[i], &bubbles[j]);
            if result.hit {
                let (a, b) = engine.resolve_collision(&result);
                bubbles[i] = a;
                bubbles[j] = b;
                contacts += 1;
            }
        }
    }

    if contacts > 0 {
        log::trace!("Resolved {} contacts", contacts);
    }

    state.publish(bubbles);
    true
}
