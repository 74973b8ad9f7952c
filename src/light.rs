use crate::tuple::Tuple3D;

/// A light source.
///
/// Intensities are plain scalars; a light has no color of its own, it scales
/// the color of whatever surface it falls on. Intensities of all the lights in
/// a world may sum past `1.0`, the final color is clamped instead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Light {
    /// Light reaching every surface equally, regardless of orientation or
    /// occlusion.
    Ambient { intensity: f64 },

    /// Light radiating from a single position.
    Point { intensity: f64, position: Tuple3D },

    /// Light arriving from infinitely far away. `direction` points *towards*
    /// the light, it is not a location.
    Directional { intensity: f64, direction: Tuple3D },
}

impl Light {
    pub fn ambient(intensity: f64) -> Light {
        Light::Ambient { intensity }
    }

    pub fn point(intensity: f64, position: Tuple3D) -> Light {
        Light::Point { intensity, position }
    }

    pub fn directional(intensity: f64, direction: Tuple3D) -> Light {
        Light::Directional { intensity, direction }
    }

    pub fn intensity(&self) -> f64 {
        match *self {
            Light::Ambient { intensity } => intensity,
            Light::Point { intensity, .. } => intensity,
            Light::Directional { intensity, .. } => intensity,
        }
    }

    /// The (unnormalized) vector from `point` towards this light, and the
    /// largest ray parameter along that vector at which a blocker still casts
    /// a shadow.
    ///
    /// For a point light the vector reaches exactly to the light, so anything
    /// past `t = 1` is behind it. A directional light is blocked by anything
    /// along the ray. Ambient light has no direction and is never shadowed.
    pub fn vector_from(&self, point: Tuple3D) -> Option<(Tuple3D, f64)> {
        match *self {
            Light::Ambient { .. } => None,
            Light::Point { position, .. } => Some((position - point, 1.0)),
            Light::Directional { direction, .. } => Some((direction, f64::INFINITY)),
        }
    }
}

/// Calculates the diffuse and specular intensity a single unshadowed light
/// contributes at a surface point.
///
/// `normalv` is the unit surface normal, `eyev` points from the surface
/// towards the viewer and `lightv` from the surface towards the light. Neither
/// of the latter two needs to be unit length; the cosines are formed by
/// dividing through by their lengths.
///
/// A light behind the surface contributes nothing. A surface without a
/// specular exponent only gets the diffuse term.
pub fn lighting(intensity: f64, normalv: Tuple3D, eyev: Tuple3D,
    lightv: Tuple3D, specular: Option<f64>) -> f64 {
    let mut total = 0.0;

    // Diffuse, Lambert's cosine law
    let n_dot_l = normalv.dot(&lightv);
    if n_dot_l > 0.0 {
        total += intensity * n_dot_l / (normalv.magnitude() * lightv.magnitude());
    }

    // Specular, Phong highlight around the mirrored light vector
    if let Some(exponent) = specular {
        let reflectv = lightv.reflect(&normalv);
        let r_dot_v = reflectv.dot(&eyev);

        if r_dot_v > 0.0 {
            let cos = r_dot_v / (reflectv.magnitude() * eyev.magnitude());
            total += intensity * cos.powf(exponent);
        }
    }

    total
}

#[cfg(test)]
use crate::feq;

#[test]
fn light_head_on() {
    let normalv = Tuple3D::new(0.0, 0.0, -1.0);
    let eyev = Tuple3D::new(0.0, 0.0, -1.0);
    let lightv = Tuple3D::new(0.0, 0.0, -10.0);

    assert!(feq(lighting(0.6, normalv, eyev, lightv, None), 0.6));
    assert!(feq(lighting(0.6, normalv, eyev, lightv, Some(10.0)), 1.2));
}

#[test]
fn light_behind_surface() {
    let normalv = Tuple3D::new(0.0, 0.0, -1.0);
    let eyev = Tuple3D::new(0.0, 0.0, -1.0);
    let lightv = Tuple3D::new(0.0, 0.0, 10.0);

    assert_eq!(lighting(1.0, normalv, eyev, lightv, Some(10.0)), 0.0);
}

#[test]
fn light_at_45_degrees() {
    let normalv = Tuple3D::new(0.0, 0.0, -1.0);
    let eyev = Tuple3D::new(0.0, 0.0, -1.0);
    let lightv = Tuple3D::new(0.0, 10.0, -10.0);

    let expected = 2.0f64.sqrt() / 2.0;
    assert!(feq(lighting(1.0, normalv, eyev, lightv, None), expected));
}

#[test]
fn eye_in_path_of_reflection() {
    let normalv = Tuple3D::new(0.0, 0.0, -1.0);
    let eyev = Tuple3D::new(0.0, -1.0, -1.0);
    let lightv = Tuple3D::new(0.0, 10.0, -10.0);

    // Diffuse is cos 45, the mirrored light points straight at the eye
    let k = 2.0f64.sqrt() / 2.0;
    assert!(feq(lighting(1.0, normalv, eyev, lightv, Some(1.0)), 1.0 + k));
    assert!(feq(lighting(1.0, normalv, eyev, lightv, Some(500.0)), 1.0 + k));
}

#[test]
fn specular_falls_off_with_exponent() {
    let normalv = Tuple3D::new(0.0, 0.0, -1.0);
    let eyev = Tuple3D::new(0.0, 0.0, -1.0);
    let lightv = Tuple3D::new(0.0, 10.0, -10.0);

    // Mirrored light is 45 degrees off the eye, a sharp highlight vanishes
    let diffuse_only = lighting(1.0, normalv, eyev, lightv, None);
    assert!(feq(lighting(1.0, normalv, eyev, lightv, Some(500.0)), diffuse_only));
}

#[test]
fn vectors_towards_lights() {
    let p = Tuple3D::new(1.0, 1.0, 1.0);

    assert_eq!(Light::ambient(0.2).vector_from(p), None);
    assert_eq!(
        Light::point(0.6, Tuple3D::new(2.0, 1.0, 0.0)).vector_from(p),
        Some((Tuple3D::new(1.0, 0.0, -1.0), 1.0))
    );
    assert_eq!(
        Light::directional(0.2, Tuple3D::new(1.0, 4.0, 4.0)).vector_from(p),
        Some((Tuple3D::new(1.0, 4.0, 4.0), f64::INFINITY))
    );
}
