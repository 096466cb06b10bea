use std::fmt;

use crate::error::Result;
use crate::geometry::Line;
use crate::math::{IntoPoint3, Point3};

/// An open polyline through an ordered list of vertices.
///
/// Vertices keep their insertion order; consecutive vertices form the
/// straight segments of the polyline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    vertices: Vec<Point3>,
}

impl Polyline {
    /// Creates an empty polyline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a polyline from point-likes, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if any element cannot be converted to a point.
    pub fn from_points<P: IntoPoint3>(points: impl IntoIterator<Item = P>) -> Result<Self> {
        let vertices = points
            .into_iter()
            .map(IntoPoint3::into_point3)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { vertices })
    }

    /// Appends a vertex if one is given; `None` leaves the polyline unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is neither a point nor a 2- or
    /// 3-element coordinate sequence.
    pub fn append<P: IntoPoint3>(&mut self, point: Option<P>) -> Result<&mut Self> {
        match point {
            Some(p) => self.push(p),
            None => Ok(self),
        }
    }

    /// Appends a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is neither a point nor a 2- or
    /// 3-element coordinate sequence.
    pub fn push(&mut self, point: impl IntoPoint3) -> Result<&mut Self> {
        self.vertices.push(point.into_point3()?);
        Ok(self)
    }

    /// Returns the vertices in insertion order.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns whether the polyline has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over the segments between consecutive vertices.
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.vertices.windows(2).map(|w| Line {
            start: w[0],
            end: w[1],
        })
    }

    /// Returns the total length of all segments.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// Flattens the vertices to `[x0, y0, z0, x1, y1, z1, ...]`.
    #[must_use]
    pub fn to_flat_coords(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(Point3::to_array).collect()
    }
}

impl FromIterator<Point3> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        Self {
            vertices: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({:.2}, {:.2}, {:.2})", p.x, p.y, p.z)?;
        }
        Ok(())
    }
}
