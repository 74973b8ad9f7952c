use std::fmt;
use std::ops::{ Index, IndexMut, Mul };

use crate::feq;
use crate::tuple::Tuple3D;

/// A 3x3 matrix.
///
/// Used as the camera rotation: it maps camera-space ray directions into
/// world space. Storage is row-major, so `m[(row, col)]` indexes as expected
/// and a matrix can be built directly from its rows.
///
/// # Examples
///
/// Rotating a vector a quarter turn about the y axis:
///
/// ```
/// # use sphere_tracer::matrix::Matrix3D;
/// # use sphere_tracer::tuple::Tuple3D;
/// let m = Matrix3D::rotation_y(std::f64::consts::PI / 2.0);
/// let v = m * Tuple3D::new(0.0, 0.0, 1.0);
/// assert_eq!(v, Tuple3D::new(1.0, 0.0, 0.0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Matrix3D {
    data: [f64; 9],
}

impl PartialEq for Matrix3D {
    fn eq(&self, other: &Matrix3D) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(a, b)| feq(*a, *b))
    }
}

impl Matrix3D {
    /// Creates a new `Matrix3D`. All elements are initialized to `0.0`.
    pub fn new() -> Matrix3D {
        Matrix3D { data: [0.0; 9] }
    }

    /// Instantiates a 3x3 identity matrix.
    pub fn identity() -> Matrix3D {
        let mut buf = [0.0; 9];
        buf[0] = 1.0; buf[4] = 1.0; buf[8] = 1.0;

        Matrix3D { data: buf }
    }

    /// Builds a matrix from its three rows.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Matrix3D {
        let mut m = Matrix3D::new();
        for r in 0..3 {
            for c in 0..3 {
                m[(r, c)] = rows[r][c];
            }
        }

        m
    }

    pub fn row(&self, row: usize) -> Tuple3D {
        Tuple3D::new(self[(row, 0)], self[(row, 1)], self[(row, 2)])
    }

    /// Creates a rotation about the x axis, by `r` radians.
    pub fn rotation_x(r: f64) -> Matrix3D {
        Matrix3D::from_rows([
            [1.0, 0.0,      0.0     ],
            [0.0, r.cos(), -r.sin() ],
            [0.0, r.sin(),  r.cos() ],
        ])
    }

    /// Creates a rotation about the y axis, by `r` radians.
    pub fn rotation_y(r: f64) -> Matrix3D {
        Matrix3D::from_rows([
            [ r.cos(), 0.0, r.sin() ],
            [ 0.0,     1.0, 0.0     ],
            [-r.sin(), 0.0, r.cos() ],
        ])
    }

    /// Creates a rotation about the z axis, by `r` radians.
    pub fn rotation_z(r: f64) -> Matrix3D {
        Matrix3D::from_rows([
            [r.cos(), -r.sin(), 0.0 ],
            [r.sin(),  r.cos(), 0.0 ],
            [0.0,      0.0,     1.0 ],
        ])
    }

    /// Turns this matrix into its own transpose.
    pub fn transpose(&mut self) {
        for r in 0..3 {
            for c in (r + 1)..3 {
                self.data.swap(r * 3 + c, c * 3 + r);
            }
        }
    }

    /// Produces the transpose of this matrix.
    ///
    /// For a rotation, the transpose is also the inverse.
    pub fn transposition(&self) -> Matrix3D {
        let mut m = *self;
        m.transpose();
        m
    }

    /// Calculates the determinant of a `Matrix3D`.
    pub fn determinant(&self) -> f64 {
        self.row(0).dot(&self.row(1).cross(&self.row(2)))
    }

    /// Checks whether the matrix is a pure rotation.
    ///
    /// Rows must be unit length and mutually perpendicular, and the
    /// determinant must be `1` (no mirroring). Scale or shear in the camera
    /// rotation would skew reflected rays.
    pub fn is_orthonormal(&self) -> bool {
        let (r0, r1, r2) = (self.row(0), self.row(1), self.row(2));

        feq(r0.dot(&r0), 1.0) && feq(r1.dot(&r1), 1.0) && feq(r2.dot(&r2), 1.0)
            && feq(r0.dot(&r1), 0.0)
            && feq(r0.dot(&r2), 0.0)
            && feq(r1.dot(&r2), 0.0)
            && feq(self.determinant(), 1.0)
    }
}

impl From<[f64; 9]> for Matrix3D {
    fn from(data: [f64; 9]) -> Matrix3D {
        Matrix3D { data }
    }
}

impl Index<(usize, usize)> for Matrix3D {
    type Output = f64;

    fn index<'a>(&'a self, index: (usize, usize)) -> &'a f64 {
        &self.data[(index.0 * 3) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix3D {
    fn index_mut<'a>(&'a mut self, index: (usize, usize)) -> &'a mut f64 {
        &mut self.data[(index.0 * 3) + index.1]
    }
}

impl Mul<Matrix3D> for Matrix3D {
    type Output = Matrix3D;

    fn mul(self, other: Matrix3D) -> Matrix3D {
        let mut m = Matrix3D::new();
        for r in 0..3 {
            for c in 0..3 {
                m[(r, c)] = self[(r, 0)] * other[(0, c)]
                    + self[(r, 1)] * other[(1, c)]
                    + self[(r, 2)] * other[(2, c)];
            }
        }

        m
    }
}

impl Mul<Tuple3D> for Matrix3D {
    type Output = Tuple3D;

    fn mul(self, other: Tuple3D) -> Tuple3D {
        Tuple3D {
            x: self.row(0).dot(&other),
            y: self.row(1).dot(&other),
            z: self.row(2).dot(&other),
        }
    }
}

impl fmt::Display for Matrix3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..3 {
            writeln!(f, "[{:8.4} {:8.4} {:8.4}]",
                self[(r, 0)], self[(r, 1)], self[(r, 2)])?;
        }

        Ok(())
    }
}

#[test]
fn identity() {
    let v = Tuple3D::new(1.0, 2.0, 3.0);

    assert_eq!(Matrix3D::identity() * v, v);
    assert_eq!(Matrix3D::identity().determinant(), 1.0);
}

#[test]
fn mul_vector_row_major() {
    let m: Matrix3D = [
        1.0, 2.0, 3.0,
        4.0, 5.0, 6.0,
        7.0, 8.0, 9.0,
    ].into();
    let v = Tuple3D::new(1.0, 0.0, -1.0);

    assert_eq!(m * v, Tuple3D::new(-2.0, -2.0, -2.0));
}

#[test]
fn transpose() {
    let m = Matrix3D::from_rows([
        [1.0, 2.0, 3.0],
        [4.0, 5.0, 6.0],
        [7.0, 8.0, 9.0],
    ]);
    let t = Matrix3D::from_rows([
        [1.0, 4.0, 7.0],
        [2.0, 5.0, 8.0],
        [3.0, 6.0, 9.0],
    ]);

    assert_eq!(m.transposition(), t);
}

#[test]
fn rotation_inverse_is_transpose() {
    let m = Matrix3D::rotation_x(0.3) * Matrix3D::rotation_z(1.1);

    assert_eq!(m * m.transposition(), Matrix3D::identity());
}

#[test]
fn rotate_x() {
    let v = Tuple3D::new(0.0, 1.0, 0.0);
    let m = Matrix3D::rotation_x(std::f64::consts::PI / 2.0);

    assert_eq!(m * v, Tuple3D::new(0.0, 0.0, 1.0));
}

#[test]
fn rotate_z() {
    let v = Tuple3D::new(0.0, 1.0, 0.0);
    let m = Matrix3D::rotation_z(std::f64::consts::PI / 2.0);

    assert_eq!(m * v, Tuple3D::new(-1.0, 0.0, 0.0));
}

#[test]
fn orthonormal_rotations() {
    assert!(Matrix3D::identity().is_orthonormal());
    assert!(Matrix3D::rotation_y(-std::f64::consts::PI / 4.0).is_orthonormal());
    assert!(Matrix3D::from_rows([
        [0.7071, 0.0, -0.7071],
        [0.0,    1.0,  0.0   ],
        [0.7071, 0.0,  0.7071],
    ]).is_orthonormal());
}

#[test]
fn scaled_or_mirrored_not_orthonormal() {
    let scaled = Matrix3D::from_rows([
        [2.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]);
    let mirrored = Matrix3D::from_rows([
        [-1.0, 0.0, 0.0],
        [ 0.0, 1.0, 0.0],
        [ 0.0, 0.0, 1.0],
    ]);

    assert!(!scaled.is_orthonormal());
    assert!(!mirrored.is_orthonormal());
}
