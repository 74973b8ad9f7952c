use std::ops::{ Add, Mul };

use crate::feq;

/// The largest value a color channel may take once written to a sink.
pub const CHANNEL_MAX: f64 = 255.0;

/// A color.
///
/// Represented conventionally with red-green-blue (RGB) values, on the same
/// `0.0..=255.0` scale as the final image. Intermediate colors produced while
/// tracing may leave that range (lights are free to sum past `1.0`); they are
/// only brought back into range by `clamp` right before reaching a sink.
///
/// # Examples
///
/// Blend a lit surface color with a reflected one:
///
/// ```
/// # use sphere_tracer::color::Color;
/// let local = Color::rgb(200.0, 0.0, 0.0);
/// let reflected = Color::rgb(0.0, 0.0, 100.0);
/// let blend = local * 0.75 + reflected * 0.25;
/// assert_eq!(blend, Color::rgb(150.0, 0.0, 25.0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// Similar to the `PartialEq` implementation on `Tuple3D`, `Color`s are
/// compared component-wise, accounting for possible floating point error in
/// comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl From<[f64; 3]> for Color {
    fn from(data: [f64; 3]) -> Color {
        Color { r: data[0], g: data[1], b: data[2] }
    }
}

/// Clamps a single channel value to `0.0..=255.0`.
///
/// NaN channels map to `0.0`.
pub fn clamp(v: f64) -> f64 {
    f64::min(CHANNEL_MAX, f64::max(0.0, v))
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// The color black.
    pub fn black() -> Color {
        Color { r: 0.0, g: 0.0, b: 0.0 }
    }

    /// The color white.
    pub fn white() -> Color {
        Color { r: CHANNEL_MAX, g: CHANNEL_MAX, b: CHANNEL_MAX }
    }

    /// The color red.
    pub fn red() -> Color {
        Color { r: CHANNEL_MAX, g: 0.0, b: 0.0 }
    }

    /// The color green.
    pub fn green() -> Color {
        Color { r: 0.0, g: CHANNEL_MAX, b: 0.0 }
    }

    /// The color blue.
    pub fn blue() -> Color {
        Color { r: 0.0, g: 0.0, b: CHANNEL_MAX }
    }

    /// Clamps every channel to the canonical color range.
    ///
    /// ```
    /// # use sphere_tracer::color::Color;
    /// let c = Color::rgb(300.0, -4.0, 17.5);
    /// assert_eq!(c.clamp(), Color::rgb(255.0, 0.0, 17.5));
    /// ```
    pub fn clamp(&self) -> Color {
        Color {
            r: clamp(self.r),
            g: clamp(self.g),
            b: clamp(self.b),
        }
    }

    /// Converts to 8-bit channels, clamping and rounding to nearest.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.clamp();
        [c.r.round() as u8, c.g.round() as u8, c.b.round() as u8]
    }
}

/// Adds two colors together.
///
/// Components are added together individually.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

/// Multiplies a color by a scalar.
///
/// Each component is multiplied by the scalar. This is how a light intensity
/// is applied to a surface color.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

/// Multiplies a scalar by a color.
impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other * self
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(90.0, 60.0, 75.0);
    let c2 = Color::rgb(70.0, 10.0, 25.0);

    assert_eq!(c1 + c2, Color::rgb(160.0, 70.0, 100.0));
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(20.0, 30.0, 40.0);

    assert_eq!(c1 * 2.0, Color::rgb(40.0, 60.0, 80.0));
    assert_eq!(0.5 * c1, Color::rgb(10.0, 15.0, 20.0));
}

#[test]
fn clamp_identity_in_range() {
    for v in [0.0, 0.5, 1.0, 127.25, 254.999, 255.0].iter() {
        assert_eq!(clamp(*v), *v);
    }
}

#[test]
fn clamp_out_of_range() {
    assert_eq!(clamp(-0.001), 0.0);
    assert_eq!(clamp(-1e9), 0.0);
    assert_eq!(clamp(255.001), 255.0);
    assert_eq!(clamp(f64::INFINITY), 255.0);
    assert_eq!(clamp(f64::NEG_INFINITY), 0.0);
}

#[test]
fn clamp_idempotent() {
    for v in [-300.0, -1.0, 0.0, 12.5, 255.0, 256.0, 1e12].iter() {
        assert_eq!(clamp(clamp(*v)), clamp(*v));
    }

    let c = Color::rgb(512.0, -3.0, 99.0);
    assert_eq!(c.clamp().clamp(), c.clamp());
}

#[test]
fn to_rgb8_rounds() {
    let c = Color::rgb(254.6, 0.4, 400.0);

    assert_eq!(c.to_rgb8(), [255, 0, 255]);
}
