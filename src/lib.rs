pub mod error;
pub mod geometry;
pub mod math;

pub use error::{AcadGeometryError, InputError, OperandError, Result};
pub use geometry::{Circle, Line, Polyline};
pub use math::{distance, IntoPoint3, Point3, VectorN};
