// Runtime parameters
pub const NUM_THREADS: usize = 4;
pub const CANVAS_WIDTH: usize = 600;
pub const CANVAS_HEIGHT: usize = 600;
pub const OUT_FILE: &'static str = "./out.ppm";

// Viewport, in camera space
pub const VIEWPORT_SIZE: f64 = 1.0;
pub const PROJECTION_PLANE_Z: f64 = 1.0;

// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Minimum `t` for secondary (shadow and reflection) rays, keeps a surface from
// occluding itself
pub const EPSILON: f64 = 0.001;

// Maximum recursion depth
pub const RECURSION_DEPTH: i32 = 3;
