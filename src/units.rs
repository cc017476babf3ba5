//! Physical unit definitions and conversions.
//!
//! Base units:
//! - Length: simulation unit (one drawing-surface unit)
//! - Time: millisecond for elapsed-time bookkeeping, second for integration
//! - Mass: kilogram

/// Milliseconds per second. Elapsed time arrives from the driver clock in
/// milliseconds and is divided by this before integration.
pub const MS_PER_S: f64 = 1.0e3;

/// Newtonian gravitational constant, rounded.
/// F = G * m1 * m2 / r²
pub const GRAVITATIONAL_CONSTANT: f64 = 6.68e-11;
