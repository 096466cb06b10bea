use thiserror::Error;

/// Top-level error type for the geometry kernel.
#[derive(Debug, Error)]
pub enum AcadGeometryError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Operand(#[from] OperandError),
}

/// Errors raised while validating constructor input.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("the coordinates must be nonempty")]
    EmptyCoordinates,

    #[error("coordinate {index} is not a number: {value:?}")]
    NonNumeric { index: usize, value: String },

    #[error("expected {expected} coordinates, found {found}")]
    CoordinateCount { expected: &'static str, found: usize },

    #[error("point is missing")]
    MissingPoint,

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
}

/// Errors raised when an arithmetic operand cannot be combined with the receiver.
#[derive(Debug, Error, PartialEq)]
pub enum OperandError {
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("division by zero")]
    DivisionByZero,
}

/// Convenience type alias for results using [`AcadGeometryError`].
pub type Result<T> = std::result::Result<T, AcadGeometryError>;
