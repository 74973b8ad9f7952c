use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{ Serialize, Deserialize };

use crate::tuple::Tuple3D;
use crate::matrix::Matrix3D;
use crate::color::{ Color, CHANNEL_MAX };
use crate::geometry::Sphere;
use crate::light::Light;
use crate::world::World;
use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT, VIEWPORT_SIZE,
    PROJECTION_PLANE_Z, RECURSION_DEPTH };
use crate::error::{ Error, Result };

/// Everything needed to render a frame.
///
/// A scene is built once, then only read while rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,

    /// Number of reflection bounces traced per primary ray.
    pub recursion_depth: i32,
}

impl Scene {
    /// The built-in demonstration scene.
    ///
    /// Three colored spheres resting on a huge yellow one acting as the floor,
    /// lit by ambient, point and directional light, and viewed from the right
    /// at a 45 degree angle. Every sphere is somewhat reflective.
    pub fn reference() -> Scene {
        let spheres = vec![
            Sphere {
                center: Tuple3D::new(0.0, -1.0, 3.0),
                radius: 1.0,
                color: Color::rgb(255.0, 0.0, 0.0),
                specular: Some(500.0),
                reflective: 0.2,
            },
            Sphere {
                center: Tuple3D::new(2.0, 0.0, 4.0),
                radius: 1.0,
                color: Color::rgb(0.0, 0.0, 255.0),
                specular: Some(500.0),
                reflective: 0.3,
            },
            Sphere {
                center: Tuple3D::new(-2.0, 0.0, 4.0),
                radius: 1.0,
                color: Color::rgb(0.0, 255.0, 0.0),
                specular: Some(10.0),
                reflective: 0.4,
            },
            Sphere {
                center: Tuple3D::new(0.0, -5001.0, 0.0),
                radius: 5000.0,
                color: Color::rgb(255.0, 255.0, 0.0),
                specular: Some(1000.0),
                reflective: 0.5,
            },
        ];

        let lights = vec![
            Light::ambient(0.2),
            Light::point(0.6, Tuple3D::new(2.0, 1.0, 0.0)),
            Light::directional(0.2, Tuple3D::new(1.0, 4.0, 4.0)),
        ];

        let mut camera = Camera::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        camera.position = Tuple3D::new(3.0, 0.0, 1.0);
        camera.rotation = Matrix3D::from_rows([
            [0.7071, 0.0, -0.7071],
            [0.0,    1.0,  0.0   ],
            [0.7071, 0.0,  0.7071],
        ]);

        Scene {
            world: World::new(spheres, lights, Color::black()),
            camera,
            recursion_depth: RECURSION_DEPTH,
        }
    }

    /// Loads and validates a JSON scene description.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let path = path.as_ref();
        debug!("Loading scene description from {}", path.display());

        let text = fs::read_to_string(path)?;
        Scene::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Scene> {
        let scene_json: SceneJson = serde_json::from_str(text)?;
        let scene = Scene::try_from(scene_json)?;

        debug!("Scene has {} spheres and {} lights, camera at {:?}, rotation\n{}",
            scene.world.spheres.len(), scene.world.lights.len(),
            scene.camera.position, scene.camera.rotation);

        Ok(scene)
    }

    pub fn render(&self) -> Canvas {
        self.camera.render(&self.world, self.recursion_depth)
    }
}

fn invalid<T>(msg: String) -> Result<T> {
    Err(Error::InvalidScene(msg))
}

/// The on-disk form of a scene.
///
/// Vectors and colors are written as plain arrays of three numbers, the
/// camera rotation as three rows. Fields left out fall back to the built-in
/// defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneJson {
    #[serde(default = "default_canvas_width")]
    canvas_width: usize,
    #[serde(default = "default_canvas_height")]
    canvas_height: usize,
    #[serde(default = "default_viewport_size")]
    viewport_size: f64,
    #[serde(default = "default_projection_plane_z")]
    projection_plane_z: f64,
    #[serde(default = "default_recursion_depth")]
    recursion_depth: i32,

    #[serde(default)]
    background: [f64; 3],

    #[serde(default)]
    camera: CameraJson,
    spheres: Vec<SphereJson>,
    lights: Vec<LightJson>,
}

fn default_canvas_width() -> usize { CANVAS_WIDTH }
fn default_canvas_height() -> usize { CANVAS_HEIGHT }
fn default_viewport_size() -> f64 { VIEWPORT_SIZE }
fn default_projection_plane_z() -> f64 { PROJECTION_PLANE_Z }
fn default_recursion_depth() -> i32 { RECURSION_DEPTH }

#[derive(Clone, Debug, Serialize, Deserialize)]
struct CameraJson {
    position: [f64; 3],
    rotation: [[f64; 3]; 3],
}

impl Default for CameraJson {
    fn default() -> CameraJson {
        CameraJson {
            position: [0.0; 3],
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct SphereJson {
    center: [f64; 3],
    radius: f64,
    color: [f64; 3],

    /// A specular exponent, or `-1`/`null`/missing for a matte surface.
    #[serde(default)]
    specular: Option<f64>,

    #[serde(default)]
    reflective: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum LightJson {
    Ambient { intensity: f64 },
    Point { intensity: f64, position: [f64; 3] },
    Directional { intensity: f64, direction: [f64; 3] },
}

impl TryFrom<SphereJson> for Sphere {
    type Error = Error;

    fn try_from(s: SphereJson) -> Result<Sphere> {
        if !(s.radius > 0.0) {
            return invalid(format!("sphere radius must be positive, got {}",
                s.radius));
        }

        if !(0.0..=1.0).contains(&s.reflective) {
            return invalid(format!("sphere reflectivity must be within \
                [0, 1], got {}", s.reflective));
        }

        if s.color.iter().any(|c| !(0.0..=CHANNEL_MAX).contains(c)) {
            return invalid(format!("sphere color channels must be within \
                [0, 255], got {:?}", s.color));
        }

        // -1 is accepted as the conventional "no highlight" marker
        let specular = match s.specular {
            None => None,
            Some(e) if e == -1.0 => None,
            Some(e) if e >= 0.0 => Some(e),
            Some(e) => {
                return invalid(format!("sphere specular exponent must be \
                    non-negative or -1, got {}", e));
            }
        };

        Ok(Sphere {
            center: s.center.into(),
            radius: s.radius,
            color: s.color.into(),
            specular,
            reflective: s.reflective,
        })
    }
}

impl From<LightJson> for Light {
    fn from(l: LightJson) -> Light {
        match l {
            LightJson::Ambient { intensity } => Light::ambient(intensity),
            LightJson::Point { intensity, position } =>
                Light::point(intensity, position.into()),
            LightJson::Directional { intensity, direction } =>
                Light::directional(intensity, direction.into()),
        }
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = Error;

    fn try_from(scene_json: SceneJson) -> Result<Scene> {
        if scene_json.canvas_width == 0 || scene_json.canvas_height == 0 {
            return invalid(format!("canvas must not be empty, got {}x{}",
                scene_json.canvas_width, scene_json.canvas_height));
        }

        if scene_json.recursion_depth < 0 {
            return invalid(format!("recursion depth must not be negative, \
                got {}", scene_json.recursion_depth));
        }

        let rotation = Matrix3D::from_rows(scene_json.camera.rotation);
        if !rotation.is_orthonormal() {
            return invalid(format!("camera rotation must be orthonormal, \
                got\n{}", rotation));
        }

        // Create the camera.
        let camera = Camera {
            position: scene_json.camera.position.into(),
            rotation,
            hsize: scene_json.canvas_width,
            vsize: scene_json.canvas_height,
            viewport_size: scene_json.viewport_size,
            projection_plane_z: scene_json.projection_plane_z,
        };

        // Create the world.
        let spheres = scene_json.spheres.into_iter()
            .map(Sphere::try_from)
            .collect::<Result<Vec<Sphere>>>()?;
        let lights = scene_json.lights.into_iter().map(|x| x.into()).collect();
        let world = World::new(spheres, lights, scene_json.background.into());

        Ok(Scene {
            world,
            camera,
            recursion_depth: scene_json.recursion_depth,
        })
    }
}

#[test]
fn reference_scene_is_well_formed() {
    let scene = Scene::reference();

    assert_eq!(scene.world.spheres.len(), 4);
    assert_eq!(scene.world.lights.len(), 3);
    assert_eq!(scene.recursion_depth, 3);
    assert!(scene.camera.rotation.is_orthonormal());
}

#[test]
fn reference_scene_floor_is_visible() {
    let mut scene = Scene::reference();
    scene.camera.hsize = 16;
    scene.camera.vsize = 16;

    let image = scene.render();

    // The bottom row looks down onto the yellow floor
    let floor = image.read_pixel(8, 15).unwrap();
    assert!(floor.r > 0.0 && floor.g > 0.0);
}

#[test]
fn parse_minimal_scene() {
    let text = r#"{
        "canvas_width": 8,
        "canvas_height": 6,
        "background": [10, 20, 30],
        "spheres": [
            { "center": [0, -1, 3], "radius": 1, "color": [255, 0, 0],
              "specular": -1 },
            { "center": [2, 0, 4], "radius": 1, "color": [0, 0, 255],
              "specular": 500, "reflective": 0.3 }
        ],
        "lights": [
            { "type": "ambient", "intensity": 0.2 },
            { "type": "point", "intensity": 0.6, "position": [2, 1, 0] },
            { "type": "directional", "intensity": 0.2, "direction": [1, 4, 4] }
        ]
    }"#;

    let scene = Scene::from_json(text).unwrap();

    assert_eq!(scene.camera.hsize, 8);
    assert_eq!(scene.camera.vsize, 6);
    assert_eq!(scene.camera.rotation, Matrix3D::identity());
    assert_eq!(scene.recursion_depth, RECURSION_DEPTH);
    assert_eq!(scene.world.background, Color::rgb(10.0, 20.0, 30.0));

    assert_eq!(scene.world.spheres[0].specular, None);
    assert_eq!(scene.world.spheres[0].reflective, 0.0);
    assert_eq!(scene.world.spheres[1].specular, Some(500.0));
    assert_eq!(scene.world.spheres[1].reflective, 0.3);

    assert_eq!(scene.world.lights[2],
        Light::directional(0.2, Tuple3D::new(1.0, 4.0, 4.0)));
}

#[test]
fn reject_invalid_spheres() {
    let bad_radius = r#"{ "spheres": [
        { "center": [0, 0, 3], "radius": 0, "color": [255, 0, 0] }
    ], "lights": [] }"#;
    let bad_reflective = r#"{ "spheres": [
        { "center": [0, 0, 3], "radius": 1, "color": [255, 0, 0],
          "reflective": 1.5 }
    ], "lights": [] }"#;
    let bad_specular = r#"{ "spheres": [
        { "center": [0, 0, 3], "radius": 1, "color": [255, 0, 0],
          "specular": -3 }
    ], "lights": [] }"#;

    for text in [bad_radius, bad_reflective, bad_specular].iter() {
        match Scene::from_json(text) {
            Err(Error::InvalidScene(_)) => (),
            other => panic!("Expected an invalid scene, got {:?}", other),
        }
    }
}

#[test]
fn reject_skewed_camera() {
    let text = r#"{
        "camera": { "position": [0, 0, 0],
                    "rotation": [[2, 0, 0], [0, 1, 0], [0, 0, 1]] },
        "spheres": [], "lights": []
    }"#;

    assert!(matches!(Scene::from_json(text), Err(Error::InvalidScene(_))));
}

#[test]
fn reject_malformed_json() {
    let text = r#"{ "spheres": [ { "center": [0, 0] } ], "lights": [] }"#;

    assert!(matches!(Scene::from_json(text), Err(Error::Json(_))));
}

#[test]
fn reject_unknown_light_type() {
    let text = r#"{ "spheres": [],
        "lights": [ { "type": "spot", "intensity": 1 } ] }"#;

    assert!(matches!(Scene::from_json(text), Err(Error::Json(_))));
}
