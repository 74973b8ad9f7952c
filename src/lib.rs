pub mod consts;
pub mod error;

pub mod tuple;
pub mod matrix;
pub mod ray;

pub mod geometry;
pub mod intersect;
pub mod light;
pub mod world;
pub mod camera;
pub mod scene;

pub mod color;
pub mod canvas;

pub mod parallel;

use crate::consts::FEQ_EPSILON;

pub fn feq(left: f64, right: f64) -> bool {
    left == right || (left - right).abs() < FEQ_EPSILON
}
