// Contains the simulation struct and its methods for advancing the bodies.
// Owns the body collection and splits real elapsed time into bounded
// sub-steps; each sub-step recomputes pairwise gravity and integrates
// acceleration -> velocity -> position with the trapezoid rule.

use std::time::Instant;

use ultraviolet::DVec2;

use crate::body::Body;
use crate::config;
use crate::error::{SimError, SimResult};
use crate::units;
use crate::utils;

pub struct Simulation {
    pub bodies: Vec<Body>,
    /// Gravitational constant.
    pub g: f64,
    /// Upper bound on a single integration sub-step, milliseconds.
    pub max_sub_step_ms: f64,
    pub frame: usize,
    speed: f64,
    last_update: Option<Instant>,
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_parameters(config::DEFAULT_G, config::MAX_SUB_STEP_MS, config::DEFAULT_SPEED)
    }

    pub fn with_parameters(g: f64, max_sub_step_ms: f64, speed: f64) -> Self {
        Self {
            bodies: Vec::new(),
            g,
            max_sub_step_ms,
            frame: 0,
            speed: speed.max(0.0),
            last_update: None,
        }
    }

    /// Time-scale factor applied to elapsed wall-clock time.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.max(0.0);
    }

    /// Re-anchor the elapsed-time baseline. Called instead of `update` while
    /// the driver is paused so that resuming does not integrate the gap.
    pub fn reset_clock(&mut self) {
        self.last_update = Some(Instant::now());
    }

    /// Insert a body, handing back its id. Rejects non-positive mass (the
    /// force->acceleration conversion divides by it) and duplicate ids.
    pub fn add_body(&mut self, body: Body) -> SimResult<u64> {
        if !(body.mass > 0.0) {
            return Err(SimError::NonPositiveMass { id: body.id, mass: body.mass });
        }
        if self.bodies.iter().any(|b| b.id == body.id) {
            return Err(SimError::DuplicateBody(body.id));
        }
        let id = body.id;
        self.bodies.push(body);
        Ok(id)
    }

    pub fn remove_body(&mut self, id: u64) -> SimResult<Body> {
        let i = self.index_of(id)?;
        Ok(self.bodies.remove(i))
    }

    pub fn body(&self, id: u64) -> SimResult<&Body> {
        self.bodies
            .iter()
            .find(|b| b.id == id)
            .ok_or(SimError::BodyNotFound(id))
    }

    pub fn body_mut(&mut self, id: u64) -> SimResult<&mut Body> {
        self.bodies
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(SimError::BodyNotFound(id))
    }

    pub fn set_mass(&mut self, id: u64, mass: f64) -> SimResult<()> {
        if !(mass > 0.0) {
            return Err(SimError::NonPositiveMass { id, mass });
        }
        self.body_mut(id)?.mass = mass;
        Ok(())
    }

    /// Adjust a body's mass by `delta` (e.g. growing a held body), handing
    /// back the new mass. The result must stay positive.
    pub fn change_mass(&mut self, id: u64, delta: f64) -> SimResult<f64> {
        let mass = self.body(id)?.mass + delta;
        self.set_mass(id, mass)?;
        Ok(mass)
    }

    /// Net gravitational force on `id` from every other body, by the current
    /// positions. `G * m1 * m2 / d²` directed from the body toward the other.
    pub fn compute_force(&self, id: u64) -> SimResult<DVec2> {
        let i = self.index_of(id)?;
        Ok(self.net_force(i))
    }

    /// Advance by real elapsed time since the last call, scaled by the speed
    /// factor. The first call only anchors the clock.
    pub fn update(&mut self) -> SimResult<()> {
        let now = Instant::now();
        let elapsed_ms = match self.last_update {
            Some(prev) => now.duration_since(prev).as_secs_f64() * units::MS_PER_S * self.speed,
            None => 0.0,
        };
        self.last_update = Some(now);
        self.advance(elapsed_ms)
    }

    /// Advance every body by an already-scaled elapsed time in milliseconds.
    /// A failed per-body step aborts the remainder of the pass.
    pub fn advance(&mut self, elapsed_ms: f64) -> SimResult<()> {
        let ids: Vec<u64> = self.bodies.iter().map(|b| b.id).collect();
        for id in ids {
            self.step_body(id, elapsed_ms)?;
        }
        self.frame += 1;
        Ok(())
    }

    /// Integrate one body over `elapsed_ms`, split into sub-steps no longer
    /// than `max_sub_step_ms`. Chunks are processed sequentially; forces are
    /// recomputed from the collection's current positions each sub-step.
    pub fn step_body(&mut self, id: u64, elapsed_ms: f64) -> SimResult<()> {
        let i = self.index_of(id)?;
        if elapsed_ms <= 0.0 {
            return Ok(());
        }
        let chunk_count = (elapsed_ms / self.max_sub_step_ms).ceil() as usize;
        for chunk in 0..chunk_count {
            let sub_ms =
                (elapsed_ms - chunk as f64 * self.max_sub_step_ms).min(self.max_sub_step_ms);
            let h = sub_ms / units::MS_PER_S;

            let net = self.net_force(i);
            let body = &mut self.bodies[i];
            body.clear_force();
            body.add_force(net);

            let acc = body.force / body.mass;
            // Trapezoid over the stored boundary sample and the fresh one.
            let velocity = utils::trapeze_vec(body.kin.acceleration, acc, h);
            let new_velocity = body.kin.velocity + velocity;
            // base_velocity enters only here, at position integration; the
            // stored velocity integral stays accelerated-velocity-only.
            let base = body.kin.base_velocity;
            let movement =
                utils::trapeze_vec(body.kin.velocity + base, new_velocity + base, h);

            let new_pos = body.pos + movement;
            body.move_to(new_pos);
            body.kin.acceleration = acc;
            body.kin.velocity = new_velocity;
            body.kin.movement += movement;
        }
        Ok(())
    }

    fn index_of(&self, id: u64) -> SimResult<usize> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .ok_or(SimError::BodyNotFound(id))
    }

    fn net_force(&self, i: usize) -> DVec2 {
        let pos = self.bodies[i].pos;
        let mass = self.bodies[i].mass;
        let mut force = DVec2::zero();
        for (j, other) in self.bodies.iter().enumerate() {
            if j == i {
                continue;
            }
            let d = other.pos - pos;
            let r_sq = d.mag_sq();
            if r_sq <= 0.0 {
                // coincident bodies contribute no force
                continue;
            }
            let mag = self.g * mass * other.mass / r_sq;
            force += d / r_sq.sqrt() * mag;
        }
        force
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn force_pulls_toward_the_other_body() {
    let mut sim = Simulation::new();
    let a = sim
        .add_body(Body::new(DVec2::zero(), 1e15, DVec2::zero()))
        .unwrap();
    sim.add_body(Body::new(DVec2::new(100.0, 0.0), 1e15, DVec2::zero()))
        .unwrap();
    let f = sim.compute_force(a).unwrap();
    assert!(f.x > 0.0, "attraction must pull toward +x, got {}", f.x);
    assert_eq!(f.y, 0.0);
}

#[test]
fn lone_body_never_moves() {
    let mut sim = Simulation::new();
    let id = sim
        .add_body(Body::new(DVec2::new(42.0, -7.0), 5.0, DVec2::zero()))
        .unwrap();
    for _ in 0..50 {
        sim.advance(10.0).unwrap();
    }
    let body = sim.body(id).unwrap();
    assert_eq!(body.pos, DVec2::new(42.0, -7.0));
    assert_eq!(body.kin.velocity, DVec2::zero());
    assert_eq!(body.kin.acceleration, DVec2::zero());
}

#[test]
fn zero_elapsed_is_a_no_op() {
    let mut sim = Simulation::new();
    let a = sim
        .add_body(Body::new(DVec2::zero(), 2e16, DVec2::zero()))
        .unwrap();
    let b = sim
        .add_body(Body::new(DVec2::new(200.0, 0.0), 1e15, DVec2::new(0.0, 100.0)))
        .unwrap();
    sim.advance(0.0).unwrap();
    sim.advance(0.0).unwrap();
    assert_eq!(sim.body(a).unwrap().pos, DVec2::zero());
    let light = sim.body(b).unwrap();
    assert_eq!(light.pos, DVec2::new(200.0, 0.0));
    assert_eq!(light.kin.velocity, DVec2::zero());
    assert!(light.trail.is_empty());
}

#[test]
fn two_bodies_stay_mirrored_about_the_midpoint() {
    let mut sim = Simulation::new();
    let a = sim
        .add_body(Body::new(DVec2::new(-100.0, 0.0), 1e15, DVec2::zero()))
        .unwrap();
    let b = sim
        .add_body(Body::new(DVec2::new(100.0, 0.0), 1e15, DVec2::zero()))
        .unwrap();
    for _ in 0..100 {
        sim.advance(10.0).unwrap();
    }
    let pa = sim.body(a).unwrap().pos;
    let pb = sim.body(b).unwrap().pos;
    // the pair must actually have attracted each other
    assert!(pa.x > -100.0 + 0.1, "left body barely moved: {}", pa.x);
    assert!(pb.x < 100.0 - 0.1, "right body barely moved: {}", pb.x);
    assert!((pa.x + pb.x).abs() < 0.01, "x midpoint drifted: {}", pa.x + pb.x);
    assert!((pa.y + pb.y).abs() < 0.01, "y midpoint drifted: {}", pa.y + pb.y);
}

#[test]
fn chunking_matches_a_single_large_step() {
    let setup = |sim: &mut Simulation| {
        sim.add_body(Body::new(DVec2::zero(), 2e16, DVec2::zero())).unwrap();
        sim.add_body(Body::new(DVec2::new(200.0, 0.0), 1e15, DVec2::new(0.0, 100.0)))
            .unwrap()
    };
    let mut whole = Simulation::new();
    let light_whole = setup(&mut whole);
    let mut split = Simulation::new();
    let light_split = setup(&mut split);

    whole.advance(40.0).unwrap();
    for _ in 0..4 {
        split.advance(10.0).unwrap();
    }

    let pw = whole.body(light_whole).unwrap().pos;
    let ps = split.body(light_split).unwrap().pos;
    assert!((pw - ps).mag() < 1e-6, "diverged by {}", (pw - ps).mag());
}

#[test]
fn orbit_scenario_stays_bounded() {
    // Heavy body at origin, light body on a near-circular path. Guards the
    // sign and direction of the force computation: any sign error ejects or
    // collapses the light body well outside [50, 500] within 10 seconds.
    let mut sim = Simulation::new();
    sim.add_body(Body::new(DVec2::zero(), 2e16, DVec2::zero())).unwrap();
    let light = sim
        .add_body(Body::new(DVec2::new(200.0, 0.0), 1e15, DVec2::new(0.0, 100.0)))
        .unwrap();
    for tick in 0..1000 {
        sim.advance(10.0).unwrap();
        let r = sim.body(light).unwrap().pos.mag();
        assert!(
            (50.0..=500.0).contains(&r),
            "tick {}: light body at distance {}",
            tick,
            r
        );
    }
}

#[test]
fn trail_lags_by_one_move_and_caps_at_255() {
    let mut sim = Simulation::new();
    let id = sim
        .add_body(Body::new(DVec2::zero(), 1.0, DVec2::new(1.0, 0.0)))
        .unwrap();
    for _ in 0..300 {
        sim.advance(10.0).unwrap();
    }
    let body = sim.body(id).unwrap();
    assert_eq!(body.trail.len(), 255);
    // drift of 1.0/s over 10 ms ticks: the oldest retained point is the
    // position as of exactly 255 moves ago, i.e. after 45 ticks
    let oldest = body.trail.oldest().unwrap();
    assert!((oldest.x - 0.45).abs() < 1e-9, "oldest.x = {}", oldest.x);
    let newest = body.trail.latest().unwrap();
    assert!((newest.x - (body.pos.x - 0.01)).abs() < 1e-9);
}

#[test]
fn per_body_operations_fail_fast_for_unknown_ids() {
    let mut sim = Simulation::new();
    let id = sim
        .add_body(Body::new(DVec2::zero(), 1.0, DVec2::zero()))
        .unwrap();
    sim.remove_body(id).unwrap();

    assert!(matches!(sim.compute_force(id), Err(SimError::BodyNotFound(_))));
    assert!(matches!(sim.step_body(id, 10.0), Err(SimError::BodyNotFound(_))));
    assert!(matches!(sim.set_mass(id, 2.0), Err(SimError::BodyNotFound(_))));
    assert!(matches!(sim.body(id), Err(SimError::BodyNotFound(_))));
}

#[test]
fn insertion_rejects_bad_bodies() {
    let mut sim = Simulation::new();
    let err = sim.add_body(Body::new(DVec2::zero(), 0.0, DVec2::zero()));
    assert!(matches!(err, Err(SimError::NonPositiveMass { .. })));

    let body = Body::new(DVec2::zero(), 1.0, DVec2::zero());
    let twin = body.clone();
    sim.add_body(body).unwrap();
    assert!(matches!(sim.add_body(twin), Err(SimError::DuplicateBody(_))));
}

#[test]
fn change_mass_keeps_mass_positive() {
    let mut sim = Simulation::new();
    let id = sim
        .add_body(Body::new(DVec2::zero(), 10.0, DVec2::zero()))
        .unwrap();
    assert_eq!(sim.change_mass(id, 5.0).unwrap(), 15.0);
    assert!(matches!(
        sim.change_mass(id, -20.0),
        Err(SimError::NonPositiveMass { .. })
    ));
    assert_eq!(sim.body(id).unwrap().mass, 15.0);
}
