use std::ops::Range;

use crate::ray::Ray3D;
use crate::tuple::Tuple3D;
use crate::matrix::Matrix3D;
use crate::color::Color;
use crate::world::World;
use crate::canvas::{ Canvas, PixelSink };
use crate::consts::{ VIEWPORT_SIZE, PROJECTION_PLANE_Z };

/// Maps a canvas pixel onto the projection plane, in camera space.
///
/// Pixel coordinates are offsets from the canvas center with y pointing up.
/// The returned point doubles as the ray direction from the camera; it is not
/// normalized, so `t = 1` along it lands exactly on the projection plane.
///
/// ```
/// # use sphere_tracer::camera::canvas_to_viewport;
/// # use sphere_tracer::tuple::Tuple3D;
/// let v = canvas_to_viewport(300, -150, 600, 600, 1.0, 1.0);
/// assert_eq!(v, Tuple3D::new(0.5, -0.25, 1.0));
/// ```
pub fn canvas_to_viewport(px: i64, py: i64, canvas_width: usize,
    canvas_height: usize, viewport_size: f64, projection_plane_z: f64)
    -> Tuple3D {
    Tuple3D::new(
        px as f64 * viewport_size / canvas_width as f64,
        py as f64 * viewport_size / canvas_height as f64,
        projection_plane_z,
    )
}

/// Centered pixel coordinates along an axis of `size` pixels.
///
/// For an even size this is `-size/2 .. size/2`; an odd size gets the extra
/// pixel on the positive side.
pub fn centered_range(size: usize) -> Range<i64> {
    let half = (size / 2) as i64;
    -half..(size as i64 - half)
}

/// A camera record for generating a canvas.
///
/// The camera sits at `position` and looks down its local `+z` axis; the
/// `rotation` matrix maps camera-space directions into world space. The
/// viewport is a `viewport_size` square at distance `projection_plane_z`,
/// stretched over a canvas of `hsize` by `vsize` pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Tuple3D,

    /// Must be orthonormal, or reflected rays are skewed.
    pub rotation: Matrix3D,

    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    pub viewport_size: f64,
    pub projection_plane_z: f64,
}

impl Camera {
    /// Creates a camera at the origin, looking down `+z`, with the default
    /// viewport.
    pub fn new(hsize: usize, vsize: usize) -> Camera {
        Camera {
            position: Tuple3D::zero(),
            rotation: Matrix3D::identity(),
            hsize,
            vsize,
            viewport_size: VIEWPORT_SIZE,
            projection_plane_z: PROJECTION_PLANE_Z,
        }
    }

    /// Builds the world-space primary ray through a centered pixel.
    pub fn ray_for_pixel(&self, px: i64, py: i64) -> Ray3D {
        let local = canvas_to_viewport(px, py, self.hsize, self.vsize,
            self.viewport_size, self.projection_plane_z);

        Ray3D::new(self.position, self.rotation * local)
    }

    /// Renders one row of the canvas, left to right.
    pub fn render_row(&self, w: &World, py: i64, depth: i32) -> Vec<Color> {
        centered_range(self.hsize)
            .map(|px| w.color_at(&self.ray_for_pixel(px, py), depth).clamp())
            .collect()
    }

    /// Renders the world into a pixel sink, one pixel at a time.
    ///
    /// Every centered pixel of the canvas is traced and written to `sink`
    /// exactly once, already clamped.
    pub fn render_into<S: PixelSink>(&self, w: &World, depth: i32,
        sink: &mut S) {
        for py in centered_range(self.vsize) {
            for px in centered_range(self.hsize) {
                let ray = self.ray_for_pixel(px, py);
                let color = w.color_at(&ray, depth).clamp();
                sink.put_pixel(px, py, color);
            }
        }
    }

    pub fn render(&self, w: &World, depth: i32) -> Canvas {
        let mut image = Canvas::new(self.hsize, self.vsize);
        self.render_into(w, depth, &mut image);
        image
    }
}

#[test]
fn centered_ranges() {
    assert_eq!(centered_range(4), -2..2);
    assert_eq!(centered_range(5), -2..3);
    assert_eq!(centered_range(1), 0..1);
    assert_eq!(centered_range(0), 0..0);
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101);
    let r = c.ray_for_pixel(0, 0);

    assert_eq!(r.origin, Tuple3D::zero());
    assert_eq!(r.direction, Tuple3D::new(0.0, 0.0, 1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(200, 100);
    let r = c.ray_for_pixel(-100, 50);

    assert_eq!(r.direction, Tuple3D::new(-0.5, 0.5, 1.0));
}

#[test]
fn ray_when_camera_transformed() {
    let mut c = Camera::new(100, 100);
    c.position = Tuple3D::new(3.0, 0.0, 1.0);
    c.rotation = Matrix3D::rotation_y(std::f64::consts::PI / 2.0);

    let r = c.ray_for_pixel(0, 0);

    assert_eq!(r.origin, Tuple3D::new(3.0, 0.0, 1.0));
    assert_eq!(r.direction, Tuple3D::new(1.0, 0.0, 0.0));
}

#[test]
fn render_world_with_camera() {
    use crate::geometry::Sphere;
    use crate::light::Light;

    let w = World::new(
        vec![Sphere::new(Tuple3D::new(0.0, -1.0, 3.0), 1.0, Color::red())],
        vec![Light::ambient(1.0)],
        Color::black(),
    );
    let c = Camera::new(10, 10);

    let image = c.render(&w, 3);

    // Centered (0, 0) lands on row 4, column 5
    assert_eq!(image.read_pixel(5, 4).unwrap(), Color::red());
    // The top row looks over the sphere
    assert_eq!(image.read_pixel(5, 0).unwrap(), Color::black());
}

#[test]
fn render_writes_each_pixel_once() {
    struct Counter {
        seen: std::collections::HashMap<(i64, i64), usize>,
    }

    impl PixelSink for Counter {
        fn put_pixel(&mut self, x: i64, y: i64, _color: Color) {
            *self.seen.entry((x, y)).or_insert(0) += 1;
        }
    }

    let w = World::empty();
    let c = Camera::new(7, 4);
    let mut counter = Counter { seen: Default::default() };

    c.render_into(&w, 3, &mut counter);

    assert_eq!(counter.seen.len(), 28);
    assert!(counter.seen.values().all(|n| *n == 1));
    assert!(counter.seen.contains_key(&(-3, -2)));
    assert!(counter.seen.contains_key(&(3, 1)));
}

#[test]
fn render_clamps_overexposed_colors() {
    use crate::geometry::Sphere;
    use crate::light::Light;

    let w = World::new(
        vec![Sphere::new(Tuple3D::new(0.0, 0.0, 3.0), 1.0,
            Color::rgb(200.0, 100.0, 0.0))],
        vec![Light::ambient(2.0)],
        Color::black(),
    );
    let c = Camera::new(1, 1);

    let row = c.render_row(&w, 0, 0);
    assert_eq!(row, vec![Color::rgb(255.0, 200.0, 0.0)]);
}
