// Shared state between the simulation loop and an external driver
// (renderer / interaction layer). The driver never holds a reference into
// the engine's bodies; it reads published BodyView snapshots and feeds new
// bodies through the SPAWN queue, which the loop drains at a single point
// per tick.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::Sender;

use ultraviolet::DVec2;

use crate::body::Body;
use crate::config;

/// Time-scale factor read by the loop before every update.
pub static SPEED_FACTOR: Lazy<Mutex<f64>> = Lazy::new(|| Mutex::new(config::DEFAULT_SPEED));
pub static PAUSED: Lazy<AtomicBool> = Lazy::new(|| AtomicBool::new(false));
/// Bodies created by the interaction layer, pending insertion.
pub static SPAWN: Lazy<Mutex<Vec<Body>>> = Lazy::new(|| Mutex::new(Vec::new()));
/// Read-only snapshots published after every tick.
pub static BODIES: Lazy<Mutex<Vec<BodyView>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Immutable per-body snapshot for the rendering collaborator: everything a
/// renderer needs to draw the body, its velocity vector, and its trail.
#[derive(Clone, Debug)]
pub struct BodyView {
    pub id: u64,
    pub position: DVec2,
    pub mass: f64,
    /// Full velocity: base drift plus accelerated velocity.
    pub velocity: DVec2,
    /// Running movement integral, for optional movement-vector display.
    pub movement: DVec2,
    pub trail: Vec<DVec2>,
}

impl BodyView {
    pub fn of(body: &Body) -> Self {
        Self {
            id: body.id,
            position: body.pos,
            mass: body.mass,
            velocity: body.full_velocity(),
            movement: body.kin.movement,
            trail: body.trail.to_vec(),
        }
    }
}

// Simulation commands
// These are sent to the simulation loop from the driving thread.
pub enum SimCommand {
    AddBody { body: Body },
    /// Create a body on a circular orbit around an existing body.
    AddOrbiting { x: f64, y: f64, mass: f64, center_id: u64 },
    /// Grow or shrink a body's mass (e.g. while a pointer is held on it).
    ChangeMass { id: u64, delta: f64 },
    SetMass { id: u64, mass: f64 },
    Remove { id: u64 },
    DeleteAll,
    SetSpeed { speed: f64 },
    ResetClock,
    /// Advance one max-length sub-step while paused.
    StepOnce,
}

pub static SIM_COMMAND_SENDER: Lazy<Mutex<Option<Sender<SimCommand>>>> =
    Lazy::new(|| Mutex::new(None));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_view_copies_render_state() {
        let mut body = Body::new(DVec2::new(1.0, 2.0), 3.0, DVec2::new(0.0, 10.0));
        body.kin.velocity = DVec2::new(5.0, 0.0);
        body.move_to(DVec2::new(2.0, 2.0));
        let view = BodyView::of(&body);
        assert_eq!(view.id, body.id);
        assert_eq!(view.position, DVec2::new(2.0, 2.0));
        assert_eq!(view.velocity, DVec2::new(5.0, 10.0));
        assert_eq!(view.trail, vec![DVec2::new(1.0, 2.0)]);
        // snapshot, not alias: mutating the body leaves the view untouched
        body.move_to(DVec2::new(9.0, 9.0));
        assert_eq!(view.position, DVec2::new(2.0, 2.0));
    }
}
