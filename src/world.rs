use crate::ray::Ray3D;
use crate::tuple::Tuple3D;
use crate::color::Color;
use crate::geometry::Sphere;
use crate::light::{ Light, lighting };
use crate::intersect::{ Intersection, closest_intersection };
use crate::consts::EPSILON;

/// A world with spheres and lights.
///
/// Worlds collect all objects as well as light for rendering. Most logic is
/// performed within worlds for the ray tracer. A world is never mutated while
/// a frame is rendered, so it can be shared freely between render threads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct World {
    /// Spheres, scanned in order on every intersection query.
    pub spheres: Vec<Sphere>,

    pub lights: Vec<Light>,

    /// Color returned for rays that escape the scene.
    pub background: Color,
}

impl World {
    pub fn new(spheres: Vec<Sphere>, lights: Vec<Light>, background: Color)
        -> World {
        World { spheres, lights, background }
    }

    /// Creates an empty world with no spheres, no lights and a black
    /// background.
    pub fn empty() -> World {
        Default::default()
    }

    /// Finds the nearest sphere hit by a ray, with `t` strictly inside
    /// `(min_t, max_t)`.
    pub fn closest_intersection(&self, r: &Ray3D, min_t: f64, max_t: f64)
        -> Option<Intersection> {
        closest_intersection(&self.spheres, r, min_t, max_t)
    }

    /// Determines whether anything blocks `lightv` from point `p`.
    ///
    /// The shadow ray starts at `EPSILON` rather than zero, otherwise the
    /// surface `p` lies on would be found at `t ~ 0` and shadow itself.
    pub fn is_shadowed(&self, p: Tuple3D, lightv: Tuple3D, max_t: f64) -> bool {
        let r = Ray3D::new(p, lightv);
        self.closest_intersection(&r, EPSILON, max_t).is_some()
    }

    /// Sums the light intensity reaching a surface point from every light.
    ///
    /// Ambient light always counts. Point and directional lights are skipped
    /// entirely when shadowed, otherwise they add their diffuse and specular
    /// terms. The result is not capped at `1.0`.
    pub fn compute_lighting(&self, point: Tuple3D, normalv: Tuple3D,
        eyev: Tuple3D, specular: Option<f64>) -> f64 {
        let mut intensity = 0.0;

        for light in self.lights.iter() {
            match light.vector_from(point) {
                None => intensity += light.intensity(),
                Some((lightv, max_t)) => {
                    if self.is_shadowed(point, lightv, max_t) {
                        continue;
                    }

                    intensity += lighting(light.intensity(), normalv, eyev,
                        lightv, specular);
                }
            }
        }

        intensity
    }

    /// Calculates the locally lit color of a hit, without reflections.
    pub fn shade_hit(&self, point: Tuple3D, normalv: Tuple3D, eyev: Tuple3D,
        sphere: &Sphere) -> Color {
        let intensity = self.compute_lighting(point, normalv, eyev,
            sphere.specular);
        sphere.color * intensity
    }

    /// Traces a ray through the world and returns the color it sees.
    ///
    /// Rays that hit nothing in `(min_t, max_t)` see the background. Otherwise
    /// the hit is shaded locally; if `depth` is still positive and the sphere
    /// is reflective, a mirrored ray is traced from the hit point with one
    /// less bounce left, and the two colors are blended by the sphere's
    /// reflectivity. `depth` is the only termination guarantee.
    pub fn trace_ray(&self, r: &Ray3D, min_t: f64, max_t: f64, depth: i32)
        -> Color {
        let hit = match self.closest_intersection(r, min_t, max_t) {
            Some(i) => i,
            None => return self.background,
        };

        let sphere = hit.what;
        let point = r.position(hit.t);
        let normalv = sphere.normal_at(point);
        let eyev = -r.direction;

        let local_color = self.shade_hit(point, normalv, eyev, sphere);

        let reflective = sphere.reflective;
        if depth <= 0 || reflective <= 0.0 {
            return local_color;
        }

        let reflected_ray = Ray3D::new(point, eyev.reflect(&normalv));
        let reflected_color = self.trace_ray(&reflected_ray, EPSILON,
            f64::INFINITY, depth - 1);

        local_color * (1.0 - reflective) + reflected_color * reflective
    }

    /// Determines the color seen by a primary ray.
    ///
    /// Primary rays start at the camera and have their direction pointing at
    /// the projection plane, so hits closer than `t = 1` (between the camera
    /// and the plane) are ignored.
    pub fn color_at(&self, r: &Ray3D, depth: i32) -> Color {
        self.trace_ray(r, 1.0, f64::INFINITY, depth)
    }
}

#[cfg(test)]
fn ambient_red_world() -> World {
    let mut sphere = Sphere::new(Tuple3D::new(0.0, -1.0, 3.0), 1.0,
        Color::red());
    sphere.specular = None;
    sphere.reflective = 0.0;

    World::new(vec![sphere], vec![Light::ambient(1.0)], Color::black())
}

#[test]
fn color_ray_miss() {
    let mut w = ambient_red_world();
    w.background = Color::rgb(10.0, 20.0, 30.0);

    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0));

    assert_eq!(w.color_at(&r, 3), Color::rgb(10.0, 20.0, 30.0));
}

#[test]
fn color_ray_hit_ambient_only() {
    let w = ambient_red_world();

    // Through the canvas center, grazing the top of the sphere
    let hit = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));
    assert_eq!(w.color_at(&hit, 3), Color::rgb(255.0, 0.0, 0.0));

    let away = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, -1.0));
    assert_eq!(w.color_at(&away, 3), Color::black());
}

#[test]
fn ambient_plus_head_on_point_light() {
    let sphere = Sphere::new(Tuple3D::new(0.0, 0.0, 3.0), 1.0,
        Color::rgb(100.0, 200.0, 50.0));
    let w = World::new(
        vec![sphere],
        vec![Light::ambient(0.2), Light::point(0.6, Tuple3D::zero())],
        Color::black()
    );

    let p = Tuple3D::new(0.0, 0.0, 2.0);
    let n = sphere.normal_at(p);
    let intensity = w.compute_lighting(p, n, Tuple3D::new(0.0, 0.0, -1.0), None);
    assert!(crate::feq(intensity, 0.8));

    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));
    assert_eq!(w.color_at(&r, 3), Color::rgb(80.0, 160.0, 40.0));
}

#[test]
fn directional_light() {
    let sphere = Sphere::new(Tuple3D::new(0.0, 0.0, 3.0), 1.0, Color::white());
    let w = World::new(
        vec![sphere],
        vec![Light::directional(0.5, Tuple3D::new(0.0, 0.0, -4.0))],
        Color::black()
    );

    let p = Tuple3D::new(0.0, 0.0, 2.0);
    let n = sphere.normal_at(p);

    assert!(crate::feq(w.compute_lighting(p, n, -n, None), 0.5));

    // The far side of the sphere faces away, and is also shadowed by itself
    let back = Tuple3D::new(0.0, 0.0, 4.0);
    let back_n = sphere.normal_at(back);
    assert_eq!(w.compute_lighting(back, back_n, -back_n, None), 0.0);
}

#[test]
fn shadow_keeps_ambient_only() {
    let surface = Sphere::new(Tuple3D::new(0.0, 0.0, 3.0), 1.0, Color::white());
    let blocker = Sphere::new(Tuple3D::new(0.0, 0.0, -5.0), 1.0, Color::white());

    let lights = vec![
        Light::ambient(0.2),
        Light::point(0.6, Tuple3D::new(0.0, 0.0, -10.0)),
    ];
    let p = Tuple3D::new(0.0, 0.0, 2.0);
    let n = surface.normal_at(p);
    let eyev = Tuple3D::new(0.0, 0.0, -1.0);

    let lit = World::new(vec![surface], lights.clone(), Color::black());
    assert!(crate::feq(lit.compute_lighting(p, n, eyev, Some(10.0)), 1.4));

    let shadowed = World::new(vec![surface, blocker], lights, Color::black());
    assert!(crate::feq(shadowed.compute_lighting(p, n, eyev, Some(10.0)), 0.2));
}

#[test]
fn blocker_behind_point_light_casts_no_shadow() {
    let surface = Sphere::new(Tuple3D::new(0.0, 0.0, 3.0), 1.0, Color::white());
    let behind = Sphere::new(Tuple3D::new(0.0, 0.0, -20.0), 1.0, Color::white());
    let w = World::new(
        vec![surface, behind],
        vec![Light::point(0.6, Tuple3D::new(0.0, 0.0, -10.0))],
        Color::black()
    );

    let p = Tuple3D::new(0.0, 0.0, 2.0);
    assert!(!w.is_shadowed(p, Tuple3D::new(0.0, 0.0, -12.0), 1.0));
    assert!(crate::feq(w.compute_lighting(p, surface.normal_at(p),
        Tuple3D::new(0.0, 0.0, -1.0), None), 0.6));
}

#[test]
fn surface_does_not_shadow_itself() {
    let surface = Sphere::new(Tuple3D::new(0.0, 0.0, 3.0), 1.0, Color::white());
    let w = World::new(vec![surface], vec![], Color::black());

    // A point slightly off the surface through rounding still sees the light
    let p = Tuple3D::new(0.0, 0.0, 2.0 + 1e-9);
    assert!(!w.is_shadowed(p, Tuple3D::new(0.0, 0.0, -12.0), 1.0));
}

#[test]
fn non_reflective_returns_local_color() {
    let sphere = Sphere::new(Tuple3D::new(0.0, 0.0, 3.0), 1.0,
        Color::rgb(100.0, 200.0, 50.0));
    let mirror = Sphere {
        center: Tuple3D::new(0.0, 0.0, -3.0),
        reflective: 1.0,
        ..Sphere::new(Tuple3D::zero(), 1.0, Color::white())
    };
    let w = World::new(
        vec![sphere, mirror],
        vec![Light::ambient(0.5)],
        Color::rgb(0.0, 0.0, 255.0)
    );

    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));
    assert_eq!(w.trace_ray(&r, 1.0, f64::INFINITY, 3),
        Color::rgb(50.0, 100.0, 25.0));
}

#[test]
fn reflection_blends_with_background() {
    let mirror = Sphere {
        reflective: 0.25,
        ..Sphere::new(Tuple3D::new(0.0, 0.0, 3.0), 1.0,
            Color::rgb(200.0, 200.0, 200.0))
    };
    let w = World::new(
        vec![mirror],
        vec![Light::ambient(1.0)],
        Color::rgb(0.0, 0.0, 100.0)
    );

    // Head-on hit reflects straight back out into the background
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));
    assert_eq!(w.trace_ray(&r, 1.0, f64::INFINITY, 1),
        Color::rgb(150.0, 150.0, 175.0));

    // With no bounces left, only the local color remains
    assert_eq!(w.trace_ray(&r, 1.0, f64::INFINITY, 0),
        Color::rgb(200.0, 200.0, 200.0));
}

#[test]
fn depth_bounds_mirror_recursion() {
    // Two facing mirrors; the ray bounces between them until depth runs out
    let front = Sphere {
        reflective: 0.5,
        ..Sphere::new(Tuple3D::new(0.0, 0.0, 3.0), 1.0, Color::rgb(100.0, 0.0, 0.0))
    };
    let back = Sphere {
        reflective: 0.5,
        ..Sphere::new(Tuple3D::new(0.0, 0.0, -3.0), 1.0, Color::rgb(0.0, 100.0, 0.0))
    };
    let w = World::new(vec![front, back], vec![Light::ambient(1.0)],
        Color::black());

    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));

    // depth 0: front only
    assert_eq!(w.trace_ray(&r, 0.0, f64::INFINITY, 0),
        Color::rgb(100.0, 0.0, 0.0));

    // depth 1: half front, half back's local color
    assert_eq!(w.trace_ray(&r, 0.0, f64::INFINITY, 1),
        Color::rgb(50.0, 50.0, 0.0));

    // depth 2: back itself reflects the front once more
    assert_eq!(w.trace_ray(&r, 0.0, f64::INFINITY, 2),
        Color::rgb(75.0, 25.0, 0.0));
}
