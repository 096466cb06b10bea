use std::f64::consts::{PI, TAU};
use std::fmt;

use tracing::debug;

use crate::error::{InputError, Result};
use crate::math::{IntoPoint3, Point3, TOLERANCE};

/// A circle lying in a plane parallel to XY.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point3,
    radius: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Arguments
    ///
    /// * `center` - Center point; `None` is rejected
    /// * `radius` - Radius (must be positive)
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingPoint`] when the center is absent and
    /// [`InputError::NonPositiveRadius`] when the radius is not positive.
    pub fn new(center: impl IntoPoint3, radius: f64) -> Result<Self> {
        let center = center.into_point3()?;
        if radius.is_nan() || radius <= 0.0 {
            debug!(radius, "rejected circle radius");
            return Err(InputError::NonPositiveRadius(radius).into());
        }
        Ok(Self { center, radius })
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the diameter (twice the radius).
    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Returns the circumference.
    #[must_use]
    pub fn circumference(&self) -> f64 {
        TAU * self.radius
    }

    /// Returns the enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Returns whether `point` lies on or inside the circle, in the circle's plane.
    ///
    /// # Errors
    ///
    /// Returns an error if `point` cannot be converted to a point.
    pub fn contains(&self, point: impl IntoPoint3) -> Result<bool> {
        let p = point.into_point3()?;
        if (p.z - self.center.z).abs() > TOLERANCE {
            return Ok(false);
        }
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        Ok(dx.hypot(dy) <= self.radius + TOLERANCE)
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle(Center={}, radius={:.2})", self.center, self.radius)
    }
}
