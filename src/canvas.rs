use std::io::{ BufWriter, Write };
use std::fs::File;
use std::path::Path;

use crate::color::Color;
use crate::error::Result;

/// Anything a frame can be drawn into.
///
/// Coordinates are centered: `(0, 0)` is the middle of the canvas and `y`
/// grows upwards. Renderers call `put_pixel` exactly once per canvas pixel
/// with an already clamped color.
pub trait PixelSink {
    fn put_pixel(&mut self, x: i64, y: i64, color: Color);
}

/// A canvas for drawing pixels.
///
/// This structure mostly stores the results of the ray tracer. Once the user
/// specifies the desired image width and height, the `Camera` generates rays
/// which are cast onto a `World`'s spheres.
///
/// The canvas stores the resulant colors for each pixel ray. Once execution
/// finishes, the `Canvas` can be used to save the pixels to an image file.
///
/// For now, only PPM images are supported.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector, top row first.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new canvas with specified width and height.
    ///
    /// This function allocates a `Vec<Color>` of size `width * height`, which
    /// may take up a decent amount of memory, depending on image size.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// Saves a canvas to a PPM file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut out)?;
        out.flush()?;

        Ok(())
    }

    /// Writes the canvas as a plain (`P3`) PPM image.
    ///
    /// Lines in the PPM file are clamped to 70 columns. If some color exceeds
    /// the 70 column mark on a line, it is moved to the next line over.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> Result<()> {
        // Write PPM header, as well as metadata
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?; // Maximum color value

        // Write pixels, making sure that no line exceeds 70 columns
        let mut col = 0;
        for pixel in self.pixels.iter() {
            for channel in pixel.to_rgb8().iter() {
                let s = channel.to_string();

                if col == 0 {
                    write!(out, "{}", s)?;
                    col = s.len();
                } else if col + 1 + s.len() > 70 {
                    write!(out, "\n{}", s)?;
                    col = s.len();
                } else {
                    write!(out, " {}", s)?;
                    col += 1 + s.len();
                }
            }
        }

        // Terminate the PPM file with a newline
        writeln!(out)?;

        Ok(())
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. Pixels are specified in row-column
    /// order, where `y` is the row of the pixel, and `x` is the column. Rows
    /// and columns are zero-indexed from the top left.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use sphere_tracer::color::Color;
    /// # use sphere_tracer::canvas::Canvas;
    /// let purple = Color::rgb(255.0, 0.0, 255.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        // Silently ignore out-of-bounds pixels
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// Pixels are specified in row-column order, where `y` is the row of the
    /// pixel, and `x` is the column. If the specified pixel location is
    /// out-of-bounds, `None` is returned by this function.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        // Return nothing if pixel is out-of-bounds
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Converts centered, y-up coordinates into a column and row.
    ///
    /// Returns `None` for coordinates falling outside the canvas.
    pub fn to_storage(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        let (w, h) = (self.width as i64, self.height as i64);
        let col = x + w / 2;
        let row = (h - 1) - (y + h / 2);

        if col < 0 || col >= w || row < 0 || row >= h {
            return None;
        }

        Some((col as usize, row as usize))
    }
}

impl PixelSink for Canvas {
    fn put_pixel(&mut self, x: i64, y: i64, color: Color) {
        if let Some((col, row)) = self.to_storage(x, y) {
            self.write_pixel(col, row, &color);
        }
    }
}

#[test]
fn centered_coordinates_even() {
    let c = Canvas::new(4, 4);

    assert_eq!(c.to_storage(0, 0), Some((2, 1)));
    assert_eq!(c.to_storage(-2, 1), Some((0, 0)));
    assert_eq!(c.to_storage(1, -2), Some((3, 3)));
    assert_eq!(c.to_storage(2, 0), None);
    assert_eq!(c.to_storage(0, 2), None);
}

#[test]
fn centered_coordinates_odd() {
    let c = Canvas::new(5, 3);

    assert_eq!(c.to_storage(-2, 1), Some((0, 0)));
    assert_eq!(c.to_storage(2, -1), Some((4, 2)));
    assert_eq!(c.to_storage(0, 0), Some((2, 1)));
    assert_eq!(c.to_storage(3, 0), None);
}

#[test]
fn put_pixel_ignores_out_of_bounds() {
    let mut c = Canvas::new(2, 2);
    c.put_pixel(5, 5, Color::red());
    c.put_pixel(-1, 0, Color::green());

    assert_eq!(c.read_pixel(0, 0).unwrap(), Color::green());
    assert_eq!(c, {
        let mut e = Canvas::new(2, 2);
        e.write_pixel(0, 0, &Color::green());
        e
    });
}

#[test]
fn ppm_header_and_pixels() {
    let mut c = Canvas::new(3, 1);
    c.write_pixel(0, 0, &Color::rgb(255.0, 0.0, 0.0));
    c.write_pixel(1, 0, &Color::rgb(0.0, 127.6, 0.0));
    c.write_pixel(2, 0, &Color::rgb(-5.0, 0.0, 999.0));

    let mut out: Vec<u8> = Vec::new();
    c.write_ppm(&mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "P3\n3 1\n255\n255 0 0 0 128 0 0 0 255\n");
}

#[test]
fn ppm_lines_wrap_at_70_columns() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, &Color::rgb(255.0, 204.0, 153.0));
        }
    }

    let mut out: Vec<u8> = Vec::new();
    c.write_ppm(&mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.lines().all(|l| l.len() <= 70));
    assert!(text.ends_with('\n'));
    assert_eq!(text.split_whitespace().count(), 4 + 10 * 2 * 3);
}
