// Module providing aggregate diagnostics over the body collection, used for
// the periodic status line and for tests.

use ultraviolet::DVec2;

use crate::body::Body;

/// Aggregate snapshot of the system for one frame.
#[derive(Clone, Copy, Debug)]
pub struct SystemStats {
    pub body_count: usize,
    pub total_mass: f64,
    pub kinetic_energy: f64,
    pub momentum: DVec2,
    pub center_of_mass: DVec2,
}

impl SystemStats {
    pub fn measure(bodies: &[Body]) -> Self {
        let mut total_mass = 0.0;
        let mut kinetic_energy = 0.0;
        let mut momentum = DVec2::zero();
        let mut weighted_pos = DVec2::zero();

        for body in bodies {
            let v = body.full_velocity();
            total_mass += body.mass;
            kinetic_energy += 0.5 * body.mass * v.mag_sq();
            momentum += v * body.mass;
            weighted_pos += body.pos * body.mass;
        }

        let center_of_mass = if total_mass > 0.0 {
            weighted_pos / total_mass
        } else {
            DVec2::zero()
        };

        Self {
            body_count: bodies.len(),
            total_mass,
            kinetic_energy,
            momentum,
            center_of_mass,
        }
    }
}
