use ultraviolet::DVec2;

/// Trapezoidal-rule area between two integrand samples `b1` and `b2` over a
/// step of width `h`: the samples are the parallel sides of a trapezoid and
/// `h` is its height. Used to integrate acceleration into velocity and
/// velocity into position over one sub-step.
pub fn trapeze_area(b1: f64, b2: f64, h: f64) -> f64 {
    (b1 + b2) * h / 2.0
}

/// Componentwise `trapeze_area` over both axes.
pub fn trapeze_vec(b1: DVec2, b2: DVec2, h: f64) -> DVec2 {
    DVec2::new(trapeze_area(b1.x, b2.x, h), trapeze_area(b1.y, b2.y, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapeze_area_matches_rectangle_for_equal_samples() {
        assert_eq!(trapeze_area(3.0, 3.0, 2.0), 6.0);
    }

    #[test]
    fn trapeze_area_averages_unequal_samples() {
        // (1 + 3) / 2 * 0.5
        assert_eq!(trapeze_area(1.0, 3.0, 0.5), 1.0);
    }

    #[test]
    fn trapeze_area_zero_width_is_zero() {
        assert_eq!(trapeze_area(10.0, -4.0, 0.0), 0.0);
    }

    #[test]
    fn trapeze_vec_is_componentwise() {
        let a = trapeze_vec(DVec2::new(1.0, -2.0), DVec2::new(3.0, 2.0), 1.0);
        assert_eq!(a, DVec2::new(2.0, 0.0));
    }
}
