use crate::ray::Ray3D;
use crate::geometry::Sphere;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is analogous to `t` for a ray (the offset from the ray origin, in multiples
/// of the ray direction).
///
/// The `what` parameter borrows the sphere that was hit from the world it
/// lives in.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub what: &'a Sphere,
}

/// Implements partial equality on an Intersection.
///
/// Two Intersection structures are equal if the offsets `t` of the
/// intersections are equivalent, and if the underlying *pointers* of the
/// intersections are equivalent.
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.what, other.what)
    }
}

/// Finds the nearest sphere along a ray within an open range of `t`.
///
/// Both roots of every sphere are considered; the smallest one lying strictly
/// between `min_t` and `max_t` wins. Spheres are scanned in order and a later
/// sphere only replaces the current hit if it is strictly closer, so exact
/// ties go to the sphere listed first.
///
/// `min_t` keeps hits behind the origin (or, with a small positive bound, on
/// the surface the ray starts from) out of the result. `max_t` bounds the
/// search; shadow rays towards a point light use `1.0` so that only blockers
/// between the point and the light count.
pub fn closest_intersection<'a>(spheres: &'a [Sphere], ray: &Ray3D,
    min_t: f64, max_t: f64) -> Option<Intersection<'a>> {
    let mut closest: Option<Intersection<'a>> = None;

    for sphere in spheres.iter() {
        let (t1, t2) = sphere.intersect(ray);

        for t in [t1, t2].iter().copied() {
            let in_range = t > min_t && t < max_t;
            let closer = closest.map_or(true, |c| t < c.t);

            if in_range && closer {
                closest = Some(Intersection { t, what: sphere });
            }
        }
    }

    closest
}

#[cfg(test)]
use crate::tuple::Tuple3D;
#[cfg(test)]
use crate::color::Color;

#[test]
fn nearest_of_two_spheres() {
    let spheres = vec![
        Sphere::new(Tuple3D::new(0.0, 0.0, 10.0), 1.0, Color::red()),
        Sphere::new(Tuple3D::new(0.0, 0.0, 5.0), 1.0, Color::blue()),
    ];
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));

    let hit = closest_intersection(&spheres, &r, 1.0, f64::INFINITY)
        .expect("Ray should hit a sphere.");

    assert_eq!(hit.t, 4.0);
    assert!(std::ptr::eq(hit.what, &spheres[1]));
}

#[test]
fn miss_returns_none() {
    let spheres = vec![
        Sphere::new(Tuple3D::new(0.0, 0.0, 10.0), 1.0, Color::red()),
    ];
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0));

    assert_eq!(closest_intersection(&spheres, &r, 1.0, f64::INFINITY), None);
}

#[test]
fn empty_world_has_no_hit() {
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));

    assert_eq!(closest_intersection(&[], &r, 0.0, f64::INFINITY), None);
}

#[test]
fn inside_sphere_picks_positive_root() {
    let spheres = vec![
        Sphere::new(Tuple3D::zero(), 2.0, Color::red()),
    ];
    let r = Ray3D::new(Tuple3D::new(0.5, 0.0, 0.0),
                       Tuple3D::new(1.0, 0.0, 0.0));

    let hit = closest_intersection(&spheres, &r, 0.001, f64::INFINITY)
        .expect("Ray from inside should hit the sphere wall.");

    assert_eq!(hit.t, 1.5);
}

#[test]
fn range_bounds_are_exclusive() {
    let spheres = vec![
        Sphere::new(Tuple3D::new(0.0, 0.0, 5.0), 1.0, Color::red()),
    ];
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));

    // Roots are exactly 4 and 6.
    assert_eq!(closest_intersection(&spheres, &r, 4.0, 6.0), None);
    assert_eq!(closest_intersection(&spheres, &r, 4.0, 7.0).unwrap().t, 6.0);
    assert_eq!(closest_intersection(&spheres, &r, 0.0, 4.0), None);
}

#[test]
fn ties_go_to_first_sphere() {
    let spheres = vec![
        Sphere::new(Tuple3D::new(0.0, 0.0, 5.0), 1.0, Color::red()),
        Sphere::new(Tuple3D::new(0.0, 0.0, 5.0), 1.0, Color::green()),
    ];
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));

    let hit = closest_intersection(&spheres, &r, 0.0, f64::INFINITY).unwrap();

    assert!(std::ptr::eq(hit.what, &spheres[0]));
}
