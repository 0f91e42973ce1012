//! Angle helpers
//!
//! Angles are in degrees. 0° points up and angles grow clockwise in screen
//! space (y pointing down).

use std::f64::consts::PI;

pub fn degrees_to_radians(angle: f64) -> f64 {
    angle * PI / 180.0
}

/// X component of a vector of length `radius` rotated by `angle` from "up"
pub fn offset_x(angle: f64, radius: f64) -> f64 {
    degrees_to_radians(angle).sin() * radius
}

/// Y component of a vector of length `radius` rotated by `angle` from "up"
pub fn offset_y(angle: f64, radius: f64) -> f64 {
    -degrees_to_radians(angle).cos() * radius
}
