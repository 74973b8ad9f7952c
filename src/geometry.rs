use crate::tuple::Tuple3D;
use crate::ray::Ray3D;
use crate::color::Color;

/// A sphere, together with its surface properties.
///
/// Spheres are defined directly in world space; there is no object transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Tuple3D,
    pub radius: f64,

    /// Surface color, on the `0.0..=255.0` scale.
    pub color: Color,

    /// Phong exponent of the specular highlight, or `None` for a matte
    /// surface.
    pub specular: Option<f64>,

    /// Fraction of the final color taken from the mirror reflection, in
    /// `0.0..=1.0`. Zero means not reflective at all.
    pub reflective: f64,
}

impl Default for Sphere {
    fn default() -> Sphere {
        Sphere {
            center: Tuple3D::zero(),
            radius: 1.0,
            color: Color::white(),
            specular: None,
            reflective: 0.0,
        }
    }
}

impl Sphere {
    /// Creates a matte, non-reflective sphere.
    pub fn new(center: Tuple3D, radius: f64, color: Color) -> Sphere {
        Sphere { center, radius, color, ..Default::default() }
    }

    /// Solves for the ray parameters where a ray crosses this sphere.
    ///
    /// Substituting the ray into `|P - C|^2 = r^2` gives a quadratic in `t`.
    /// Both roots are returned, larger first. A ray that misses produces
    /// `(+inf, +inf)`, which every finite range check rejects, so callers
    /// need no separate "no hit" path. A tangent ray yields a double root.
    pub fn intersect(&self, ray: &Ray3D) -> (f64, f64) {
        let oc = ray.origin - self.center;

        let k1 = ray.direction.dot(&ray.direction);
        let k2 = 2.0 * oc.dot(&ray.direction);
        let k3 = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = k2 * k2 - 4.0 * k1 * k3;
        if discriminant < 0.0 {
            return (f64::INFINITY, f64::INFINITY);
        }

        let t1 = (-k2 + discriminant.sqrt()) / (2.0 * k1);
        let t2 = (-k2 - discriminant.sqrt()) / (2.0 * k1);
        (t1, t2)
    }

    /// The outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Tuple3D) -> Tuple3D {
        (point - self.center).normalize()
    }
}

#[test]
fn ray_pierces_sphere() {
    let r = Ray3D::new(Tuple3D::new(0.0, 0.0, -5.0),
                       Tuple3D::new(0.0, 0.0, 1.0));
    let s = Sphere::new(Tuple3D::zero(), 1.0, Color::red());

    assert_eq!(s.intersect(&r), (6.0, 4.0));
}

#[test]
fn ray_is_tangent_to_sphere() {
    let r = Ray3D::new(Tuple3D::new(0.0, 1.0, -5.0),
                       Tuple3D::new(0.0, 0.0, 1.0));
    let s = Sphere::new(Tuple3D::zero(), 1.0, Color::red());

    assert_eq!(s.intersect(&r), (5.0, 5.0));
}

#[test]
fn ray_misses_sphere() {
    let r = Ray3D::new(Tuple3D::new(0.0, 2.0, -5.0),
                       Tuple3D::new(0.0, 0.0, 1.0));
    let s = Sphere::new(Tuple3D::zero(), 1.0, Color::red());

    assert_eq!(s.intersect(&r), (f64::INFINITY, f64::INFINITY));
}

#[test]
fn ray_is_inside_sphere() {
    let r = Ray3D::new(Tuple3D::zero(),
                       Tuple3D::new(1.0, 0.0, 0.0));
    let s = Sphere::new(Tuple3D::zero(), 1.0, Color::red());
    let (t1, t2) = s.intersect(&r);

    assert_eq!((t1, t2), (1.0, -1.0));
    assert!(t1 > 0.0 && t2 < 0.0);
}

#[test]
fn sphere_is_behind_ray() {
    let r = Ray3D::new(Tuple3D::new(0.0, 0.0, 5.0),
                       Tuple3D::new(0.0, 0.0, 1.0));
    let s = Sphere::new(Tuple3D::zero(), 1.0, Color::red());

    assert_eq!(s.intersect(&r), (-4.0, -6.0));
}

#[test]
fn ray_hits_translated_sphere_with_long_direction() {
    // A direction twice as long halves every root.
    let r = Ray3D::new(Tuple3D::zero(),
                       Tuple3D::new(0.0, 0.0, 2.0));
    let s = Sphere::new(Tuple3D::new(0.0, 0.0, 10.0), 2.0, Color::red());

    assert_eq!(s.intersect(&r), (6.0, 4.0));
}

#[test]
fn normal_on_sphere_nonaxial() {
    let s = Sphere::new(Tuple3D::new(1.0, 1.0, 1.0), 3.0f64.sqrt(), Color::red());
    let n = s.normal_at(Tuple3D::new(2.0, 2.0, 2.0));
    let k = 3.0f64.sqrt() / 3.0;

    assert_eq!(n, Tuple3D::new(k, k, k));
}
