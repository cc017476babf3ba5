use ultraviolet::DVec2;

use crate::body::Body;
use crate::error::{SimError, SimResult};
use crate::simulation::Simulation;

/// Circular-orbit speed around `central_mass` at distance `r`:
/// v = sqrt(G * m / r).
pub fn circular_orbit_speed(g: f64, central_mass: f64, r: f64) -> f64 {
    (g * central_mass / r).sqrt()
}

/// Insert a body on a counter-clockwise circular orbit around an existing
/// body. The orbit speed becomes the new body's constant base velocity, on
/// top of the center's own drift.
pub fn orbiting_body(
    simulation: &mut Simulation,
    x: f64,
    y: f64,
    mass: f64,
    center_id: u64,
) -> SimResult<u64> {
    let center = simulation.body(center_id)?;
    let pos = DVec2::new(x, y);
    let offset = pos - center.pos;
    let r = offset.mag();
    if r <= 0.0 {
        return Err(SimError::Config(format!(
            "orbiting body placed on top of body {}",
            center_id
        )));
    }
    let v = circular_orbit_speed(simulation.g, center.mass, r);
    let tangent = DVec2::new(-offset.y, offset.x) / r;
    let base_velocity = tangent * v + center.full_velocity();
    simulation.add_body(Body::new(pos, mass, base_velocity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbiting_body_gets_tangential_base_velocity() {
        let mut sim = Simulation::new();
        let center = sim
            .add_body(Body::new(DVec2::zero(), 2e16, DVec2::zero()))
            .unwrap();
        let id = orbiting_body(&mut sim, 200.0, 0.0, 1e15, center).unwrap();

        let body = sim.body(id).unwrap();
        let base = body.kin.base_velocity;
        let expected = circular_orbit_speed(sim.g, 2e16, 200.0);
        assert!((base.mag() - expected).abs() < 1e-9);
        // perpendicular to the radius vector
        assert!(base.dot(body.pos).abs() < 1e-9);
    }

    #[test]
    fn orbiting_body_requires_existing_center() {
        let mut sim = Simulation::new();
        let err = orbiting_body(&mut sim, 100.0, 0.0, 1.0, 77);
        assert!(matches!(err, Err(SimError::BodyNotFound(77))));
    }

    #[test]
    fn orbiting_body_rejects_zero_radius() {
        let mut sim = Simulation::new();
        let center = sim
            .add_body(Body::new(DVec2::zero(), 2e16, DVec2::zero()))
            .unwrap();
        let err = orbiting_body(&mut sim, 0.0, 0.0, 1.0, center);
        assert!(matches!(err, Err(SimError::Config(_))));
    }
}
