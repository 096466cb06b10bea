use std::fmt;

use crate::error::Result;
use crate::math::{IntoPoint3, Point3, VectorN};

/// A 3D line segment between two points.
///
/// ```
/// use acad_geometry::Line;
///
/// let line = Line::new([10.0, 10.0], [20.0, 20.0]).unwrap();
/// assert_eq!(
///     line.to_string(),
///     "Line(Point3(10.00, 10.00, 0.00), Point3(20.00, 20.00, 0.00))"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point3,
    pub end: Point3,
}

impl Line {
    /// Creates a segment from two point-likes.
    ///
    /// Each endpoint may be a [`Point3`] or a 2- or 3-element coordinate
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint cannot be converted to a point.
    pub fn new(start: impl IntoPoint3, end: impl IntoPoint3) -> Result<Self> {
        Ok(Self {
            start: start.into_point3()?,
            end: end.into_point3()?,
        })
    }

    /// Creates a unit-length segment starting at `origin` along `direction`.
    ///
    /// `direction` must be three-dimensional. A zero direction yields a
    /// degenerate segment whose endpoints coincide.
    ///
    /// # Errors
    ///
    /// Returns an error if `direction` is not three-dimensional or `origin`
    /// is not a point.
    pub fn from_vector(direction: &VectorN, origin: impl IntoPoint3) -> Result<Self> {
        let start = origin.into_point3()?;
        let offset = Point3::try_from(&direction.normalized()?)?;
        Ok(Self {
            start,
            end: start + offset,
        })
    }

    /// Returns the length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Returns the midpoint of the segment.
    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        Point3::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
            (self.start.z + self.end.z) / 2.0,
        )
    }

    /// Returns the unit direction from start to end.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint coordinate is not finite.
    pub fn direction(&self) -> Result<VectorN> {
        VectorN::new((self.end - self.start).to_array())?.normalized()
    }

    /// Returns the segment with start and end swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({}, {})", self.start, self.end)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use approx::assert_relative_eq;

    #[test]
    fn display_from_coordinate_pairs() {
        let line = Line::new([10.0, 10.0], [20.0, 20.0]).unwrap();
        assert_eq!(
            line.to_string(),
            "Line(Point3(10.00, 10.00, 0.00), Point3(20.00, 20.00, 0.00))"
        );
    }

    #[test]
    fn accepts_points_and_sequences() {
        let a = Line::new(Point3::xy(1.0, 2.0), vec![3.0, 4.0, 5.0]).unwrap();
        assert_eq!(a.start, (1.0, 2.0, 0.0));
        assert_eq!(a.end, (3.0, 4.0, 5.0));
        assert!(Line::new(&[1.0][..], [0.0, 0.0]).is_err());
    }

    #[test]
    fn midpoint() {
        let line = Line::new([10.0, 10.0], [20.0, 20.0]).unwrap();
        assert_eq!(line.midpoint(), Point3::new(15.0, 15.0, 0.0));
    }

    #[test]
    fn length() {
        let line = Line::new([10.0, 10.0], [20.0, 20.0]).unwrap();
        assert_relative_eq!(line.length(), 200.0_f64.sqrt());
    }

    #[test]
    fn from_vector_matches_unit_offset() {
        let origin = Point3::new(1.0, 0.0, 0.0);
        let direction = VectorN::new([3, 4, 0]).unwrap();
        let from_vector = Line::from_vector(&direction, origin).unwrap();
        let expected = Line::new(origin, origin + [0.6, 0.8, 0.0]).unwrap();

        assert_eq!(from_vector.start, expected.start);
        assert!(from_vector.end.is_close(expected.end, TOLERANCE));
        assert_relative_eq!(from_vector.length(), 1.0);
    }

    #[test]
    fn from_zero_vector_is_degenerate() {
        let origin = Point3::new(1.0, 2.0, 3.0);
        let line = Line::from_vector(&VectorN::new([0, 0, 0]).unwrap(), origin).unwrap();
        assert_eq!(line.start, line.end);
    }

    #[test]
    fn from_vector_requires_three_dimensions() {
        let direction = VectorN::new([1, 0]).unwrap();
        assert!(Line::from_vector(&direction, Point3::origin()).is_err());
    }

    #[test]
    fn direction_and_reversed() {
        let line = Line::new([0.0, 0.0], [0.0, 5.0]).unwrap();
        let dir = line.direction().unwrap().to_f64_vec();
        assert_relative_eq!(dir[1], 1.0);
        let back = line.reversed();
        assert_eq!(back.start, line.end);
        assert_eq!(back.end, line.start);
    }
}
