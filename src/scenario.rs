// Initial body sets: a two-body orbit preset, a randomized orbiting cloud,
// and conversion from the TOML initial setup.

use ultraviolet::DVec2;

use crate::body::Body;
use crate::config::InitConfig;

/// Heavy primary at the origin with one light body on a near-circular orbit.
/// The default setup when no config file is present.
pub fn two_body() -> Vec<Body> {
    vec![
        Body::new(DVec2::zero(), 2e16, DVec2::zero()),
        Body::new(DVec2::new(200.0, 0.0), 1e15, DVec2::new(0.0, 100.0)),
    ]
}

/// Heavy primary at the origin plus `n` light bodies scattered on an annulus,
/// each given a tangential base velocity for a circular orbit around the
/// primary: v = sqrt(G * M / r).
pub fn orbiting_cloud(n: usize, g: f64) -> Vec<Body> {
    fastrand::seed(0);
    let central_mass = 2e16;
    let inner_radius = 120.0;
    let outer_radius = 320.0;

    let mut bodies = Vec::with_capacity(n + 1);
    bodies.push(Body::new(DVec2::zero(), central_mass, DVec2::zero()));

    while bodies.len() < n + 1 {
        let a = fastrand::f64() * std::f64::consts::TAU;
        let (sin, cos) = a.sin_cos();
        let r = inner_radius + fastrand::f64() * (outer_radius - inner_radius);
        let pos = DVec2::new(cos, sin) * r;

        let v = (g * central_mass / r).sqrt();
        // tangential, counter-clockwise
        let base_velocity = DVec2::new(-sin, cos) * v;

        let mass = 1e13 + fastrand::f64() * 9e13;
        bodies.push(Body::new(pos, mass, base_velocity));
    }

    bodies
}

/// Bodies described by the initial-setup file. Mass validation happens at
/// engine insertion.
pub fn from_config(config: &InitConfig) -> Vec<Body> {
    config
        .bodies
        .iter()
        .map(|b| Body::new(DVec2::new(b.x, b.y), b.mass, DVec2::new(b.vx, b.vy)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units;

    #[test]
    fn two_body_preset_shape() {
        let bodies = two_body();
        assert_eq!(bodies.len(), 2);
        assert!(bodies[0].mass > bodies[1].mass);
        assert_eq!(bodies[1].kin.base_velocity, DVec2::new(0.0, 100.0));
    }

    #[test]
    fn orbiting_cloud_velocities_are_tangential() {
        let bodies = orbiting_cloud(16, units::GRAVITATIONAL_CONSTANT);
        assert_eq!(bodies.len(), 17);
        for body in &bodies[1..] {
            let r = body.pos.mag();
            assert!((120.0..=320.0).contains(&r));
            // base velocity perpendicular to the radius vector
            let radial = body.kin.base_velocity.dot(body.pos) / r;
            assert!(radial.abs() < 1e-9, "radial component {}", radial);
        }
    }

    #[test]
    fn from_config_maps_fields() {
        let config: InitConfig = toml::from_str(
            r#"
            [[bodies]]
            x = 1.0
            y = 2.0
            mass = 3.0
            vx = 4.0
            vy = 5.0
            "#,
        )
        .unwrap();
        let bodies = from_config(&config);
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].pos, DVec2::new(1.0, 2.0));
        assert_eq!(bodies[0].mass, 3.0);
        assert_eq!(bodies[0].kin.base_velocity, DVec2::new(4.0, 5.0));
    }
}
