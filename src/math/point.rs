use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use tracing::debug;

use crate::error::{InputError, Result};

/// A mutable 3D point with componentwise arithmetic.
///
/// Arithmetic accepts anything convertible into a `Point3` (another point,
/// `[f64; 3]`, `(f64, f64, f64)`), and raw arrays and tuples can appear on
/// either side of `+` and `-`. Equality is exact and also holds against
/// plain 3-element coordinate sequences.
///
/// ```
/// use acad_geometry::Point3;
///
/// let mut p = Point3::xy(10.0, 10.0);
/// assert_eq!(p + p, Point3::new(20.0, 20.0, 0.0));
/// p -= [1.0, 1.0, 1.0];
/// assert_eq!(p, [9.0, 9.0, -1.0]);
/// assert_eq!(p.to_string(), "Point3(9.00, 9.00, -1.00)");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// Creates a new point from explicit coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a point in the XY plane (`z = 0`).
    #[must_use]
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Returns the point at the origin.
    #[must_use]
    pub fn origin() -> Self {
        Self::default()
    }

    /// Builds a point from a 2- or 3-element coordinate sequence.
    ///
    /// A missing `z` defaults to `0`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::CoordinateCount`] for any other length.
    pub fn from_coords(coords: &[f64]) -> Result<Self> {
        match *coords {
            [x, y] => Ok(Self::xy(x, y)),
            [x, y, z] => Ok(Self::new(x, y, z)),
            _ => {
                debug!(found = coords.len(), "rejected coordinate sequence");
                Err(InputError::CoordinateCount {
                    expected: "2 or 3",
                    found: coords.len(),
                }
                .into())
            }
        }
    }

    /// Returns the coordinates as `[x, y, z]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean distance to another point or coordinate triple.
    #[must_use]
    pub fn distance_to(&self, other: impl Into<Point3>) -> f64 {
        let other: Point3 = other.into();
        nalgebra::distance(
            &nalgebra::Point3::<f64>::from(*self),
            &nalgebra::Point3::<f64>::from(other),
        )
    }

    /// Returns whether every component differs from `other` by at most `tolerance`.
    #[must_use]
    pub fn is_close(&self, other: impl Into<Point3>, tolerance: f64) -> bool {
        let other = other.into();
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }

    /// Adds `rhs` componentwise in place and returns `self` for chaining.
    pub fn add_in_place(&mut self, rhs: impl Into<Point3>) -> &mut Self {
        let rhs = rhs.into();
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
        self
    }

    /// Subtracts `rhs` componentwise in place and returns `self` for chaining.
    pub fn sub_in_place(&mut self, rhs: impl Into<Point3>) -> &mut Self {
        let rhs = rhs.into();
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
        self
    }

    /// Scales every component in place and returns `self` for chaining.
    pub fn mul_in_place(&mut self, factor: f64) -> &mut Self {
        self.x *= factor;
        self.y *= factor;
        self.z *= factor;
        self
    }

    /// Divides every component in place and returns `self` for chaining.
    ///
    /// Follows IEEE-754: dividing by zero yields infinities or NaN.
    pub fn div_in_place(&mut self, divisor: f64) -> &mut Self {
        self.x /= divisor;
        self.y /= divisor;
        self.z /= divisor;
        self
    }
}

/// Returns the Euclidean distance between two points.
#[must_use]
pub fn distance(p1: impl Into<Point3>, p2: impl Into<Point3>) -> f64 {
    p1.into().distance_to(p2)
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point3({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// --- conversions ---

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Point3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<&Point3> for Point3 {
    fn from(p: &Point3) -> Self {
        *p
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

impl From<Point3> for (f64, f64, f64) {
    fn from(p: Point3) -> Self {
        (p.x, p.y, p.z)
    }
}

impl From<nalgebra::Point3<f64>> for Point3 {
    fn from(p: nalgebra::Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Point3> for nalgebra::Point3<f64> {
    fn from(p: Point3) -> Self {
        nalgebra::Point3::new(p.x, p.y, p.z)
    }
}

impl From<nalgebra::Vector3<f64>> for Point3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point3> for nalgebra::Vector3<f64> {
    fn from(p: Point3) -> Self {
        nalgebra::Vector3::new(p.x, p.y, p.z)
    }
}

impl TryFrom<&[f64]> for Point3 {
    type Error = crate::error::AcadGeometryError;

    /// Strict conversion: the slice must hold exactly three coordinates.
    fn try_from(coords: &[f64]) -> Result<Self> {
        match *coords {
            [x, y, z] => Ok(Self::new(x, y, z)),
            _ => Err(InputError::CoordinateCount {
                expected: "3",
                found: coords.len(),
            }
            .into()),
        }
    }
}

/// Conversion from point-like input that may fail.
///
/// Accepts typed points as well as raw coordinate sequences of length 2 or 3,
/// the shape in which an automation layer usually hands coordinates over.
pub trait IntoPoint3 {
    /// Converts `self` into a [`Point3`].
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the input does not describe a point.
    fn into_point3(self) -> Result<Point3>;
}

impl IntoPoint3 for Point3 {
    fn into_point3(self) -> Result<Point3> {
        Ok(self)
    }
}

impl IntoPoint3 for &Point3 {
    fn into_point3(self) -> Result<Point3> {
        Ok(*self)
    }
}

impl IntoPoint3 for [f64; 2] {
    fn into_point3(self) -> Result<Point3> {
        Ok(Point3::xy(self[0], self[1]))
    }
}

impl IntoPoint3 for [f64; 3] {
    fn into_point3(self) -> Result<Point3> {
        Ok(self.into())
    }
}

impl IntoPoint3 for (f64, f64) {
    fn into_point3(self) -> Result<Point3> {
        Ok(Point3::xy(self.0, self.1))
    }
}

impl IntoPoint3 for (f64, f64, f64) {
    fn into_point3(self) -> Result<Point3> {
        Ok(self.into())
    }
}

impl IntoPoint3 for &[f64] {
    fn into_point3(self) -> Result<Point3> {
        Point3::from_coords(self)
    }
}

impl IntoPoint3 for Vec<f64> {
    fn into_point3(self) -> Result<Point3> {
        Point3::from_coords(&self)
    }
}

impl IntoPoint3 for &Vec<f64> {
    fn into_point3(self) -> Result<Point3> {
        Point3::from_coords(self)
    }
}

impl<P: IntoPoint3> IntoPoint3 for Option<P> {
    fn into_point3(self) -> Result<Point3> {
        match self {
            Some(p) => p.into_point3(),
            None => Err(InputError::MissingPoint.into()),
        }
    }
}

// --- equality against raw sequences ---

impl PartialEq<[f64; 3]> for Point3 {
    fn eq(&self, other: &[f64; 3]) -> bool {
        self.to_array() == *other
    }
}

impl PartialEq<(f64, f64, f64)> for Point3 {
    fn eq(&self, other: &(f64, f64, f64)) -> bool {
        self.to_array() == [other.0, other.1, other.2]
    }
}

impl PartialEq<[f64]> for Point3 {
    fn eq(&self, other: &[f64]) -> bool {
        other.len() == 3 && self.to_array()[..] == *other
    }
}

impl PartialEq<&[f64]> for Point3 {
    fn eq(&self, other: &&[f64]) -> bool {
        *self == **other
    }
}

impl PartialEq<Vec<f64>> for Point3 {
    fn eq(&self, other: &Vec<f64>) -> bool {
        *self == other[..]
    }
}

impl PartialEq<Point3> for [f64; 3] {
    fn eq(&self, other: &Point3) -> bool {
        other == self
    }
}

impl PartialEq<Point3> for (f64, f64, f64) {
    fn eq(&self, other: &Point3) -> bool {
        other == self
    }
}

impl PartialEq<Point3> for Vec<f64> {
    fn eq(&self, other: &Point3) -> bool {
        other == self
    }
}

// --- arithmetic ---

impl<R: Into<Point3>> Add<R> for Point3 {
    type Output = Point3;

    fn add(mut self, rhs: R) -> Point3 {
        self.add_in_place(rhs);
        self
    }
}

impl<R: Into<Point3>> Sub<R> for Point3 {
    type Output = Point3;

    fn sub(mut self, rhs: R) -> Point3 {
        self.sub_in_place(rhs);
        self
    }
}

impl Add<Point3> for [f64; 3] {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::from(self) + rhs
    }
}

impl Sub<Point3> for [f64; 3] {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::from(self) - rhs
    }
}

impl Add<Point3> for (f64, f64, f64) {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::from(self) + rhs
    }
}

impl Sub<Point3> for (f64, f64, f64) {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::from(self) - rhs
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;

    fn mul(mut self, rhs: f64) -> Point3 {
        self.mul_in_place(rhs);
        self
    }
}

impl Mul<Point3> for f64 {
    type Output = Point3;

    fn mul(self, rhs: Point3) -> Point3 {
        rhs * self
    }
}

impl Div<f64> for Point3 {
    type Output = Point3;

    fn div(mut self, rhs: f64) -> Point3 {
        self.div_in_place(rhs);
        self
    }
}

impl Neg for Point3 {
    type Output = Point3;

    fn neg(self) -> Point3 {
        self * -1.0
    }
}

impl<R: Into<Point3>> AddAssign<R> for Point3 {
    fn add_assign(&mut self, rhs: R) {
        self.add_in_place(rhs);
    }
}

impl<R: Into<Point3>> SubAssign<R> for Point3 {
    fn sub_assign(&mut self, rhs: R) {
        self.sub_in_place(rhs);
    }
}

impl MulAssign<f64> for Point3 {
    fn mul_assign(&mut self, rhs: f64) {
        self.mul_in_place(rhs);
    }
}

impl DivAssign<f64> for Point3 {
    fn div_assign(&mut self, rhs: f64) {
        self.div_in_place(rhs);
    }
}

impl Index<usize> for Point3 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Point3 index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Point3 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Point3 index out of range: {index}"),
        }
    }
}
