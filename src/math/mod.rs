pub mod point;
pub mod vector;

pub use point::{distance, IntoPoint3, Point3};
pub use vector::{Component, VectorN, VectorOperand};

/// Global geometric tolerance for approximate point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Default per-component tolerance used by [`VectorN`] equality.
///
/// Deliberately huge: any two vectors of the same dimension whose components
/// differ by less than ten billion compare equal unless a tighter tolerance
/// is passed to [`VectorN::with_tolerance`].
pub const DEFAULT_VECTOR_TOLERANCE: u64 = 10_000_000_000;
