// Defines the body struct (position, mass, transient force, kinematic
// parameters, trail) and its methods for controlled mutation. The kinematic
// parameters are the previous-boundary samples for trapezoidal integration,
// not current-frame values.

use ultraviolet::DVec2;

use crate::trail::Trail;

use std::sync::atomic::{AtomicU64, Ordering};
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Cumulative integration state for one body.
///
/// `acceleration`, `velocity` and `movement` hold the running integrals used
/// as the previous boundary sample of the trapezoid rule. `base_velocity` is
/// a constant drift set at creation (e.g. an initial orbital velocity); it is
/// never touched by integration and never folded into `velocity` — it enters
/// only at position-integration time.
#[derive(Clone, Copy, Debug)]
pub struct Kinematics {
    pub acceleration: DVec2,
    pub velocity: DVec2,
    pub base_velocity: DVec2,
    pub movement: DVec2,
}

impl Kinematics {
    pub fn with_base_velocity(base_velocity: DVec2) -> Self {
        Self {
            acceleration: DVec2::zero(),
            velocity: DVec2::zero(),
            base_velocity,
            movement: DVec2::zero(),
        }
    }
}

impl Default for Kinematics {
    fn default() -> Self {
        Self::with_base_velocity(DVec2::zero())
    }
}

#[derive(Clone, Debug)]
pub struct Body {
    pub pos: DVec2,
    pub mass: f64,
    /// Scratch state, cleared and rebuilt every sub-step. Has no meaning
    /// between update calls.
    pub force: DVec2,
    pub kin: Kinematics,
    pub trail: Trail,
    pub id: u64,
}

impl Body {
    pub fn new(pos: DVec2, mass: f64, base_velocity: DVec2) -> Self {
        Self {
            pos,
            mass,
            force: DVec2::zero(),
            kin: Kinematics::with_base_velocity(base_velocity),
            trail: Trail::new(),
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Accumulate into the transient force.
    pub fn add_force(&mut self, f: DVec2) {
        self.force += f;
    }

    /// Reset the transient force; called once per sub-step before force
    /// accumulation.
    pub fn clear_force(&mut self) {
        self.force = DVec2::zero();
    }

    /// Move the body, appending the pre-move position to the trail. The
    /// trail therefore always lags the current position by one move.
    pub fn move_to(&mut self, pos: DVec2) {
        self.trail.push(self.pos);
        self.pos = pos;
    }

    /// Drift plus accelerated velocity; what a renderer should draw as the
    /// body's velocity vector.
    pub fn full_velocity(&self) -> DVec2 {
        self.kin.base_velocity + self.kin.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_ids_are_unique() {
        let a = Body::new(DVec2::zero(), 1.0, DVec2::zero());
        let b = Body::new(DVec2::zero(), 1.0, DVec2::zero());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn force_accumulates_and_clears() {
        let mut b = Body::new(DVec2::zero(), 1.0, DVec2::zero());
        b.add_force(DVec2::new(1.0, 2.0));
        b.add_force(DVec2::new(-0.5, 1.0));
        assert_eq!(b.force, DVec2::new(0.5, 3.0));
        b.clear_force();
        assert_eq!(b.force, DVec2::zero());
    }

    #[test]
    fn move_to_records_previous_position() {
        let mut b = Body::new(DVec2::new(1.0, 1.0), 1.0, DVec2::zero());
        b.move_to(DVec2::new(2.0, 3.0));
        assert_eq!(b.pos, DVec2::new(2.0, 3.0));
        assert_eq!(b.trail.latest(), Some(DVec2::new(1.0, 1.0)));
        b.move_to(DVec2::new(4.0, 4.0));
        assert_eq!(b.trail.latest(), Some(DVec2::new(2.0, 3.0)));
        assert_eq!(b.trail.len(), 2);
    }

    #[test]
    fn full_velocity_includes_base() {
        let mut b = Body::new(DVec2::zero(), 1.0, DVec2::new(0.0, 100.0));
        b.kin.velocity = DVec2::new(3.0, -1.0);
        assert_eq!(b.full_velocity(), DVec2::new(3.0, 99.0));
    }
}
