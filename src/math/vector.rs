use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use bigdecimal::{BigDecimal, One, ToPrimitive, Zero};
use tracing::debug;

use crate::error::{AcadGeometryError, InputError, OperandError, Result};
use crate::math::{Point3, DEFAULT_VECTOR_TOLERANCE};

/// A value that can become one exact decimal vector component.
///
/// Non-finite floats and strings that do not parse as a decimal number
/// produce `None`. Finite floats convert through their shortest round-trip
/// decimal form, so `0.6_f64` becomes exactly `0.6`.
pub trait Component: fmt::Display {
    /// Converts `self` to a [`BigDecimal`].
    fn to_decimal(&self) -> Option<BigDecimal>;
}

impl Component for BigDecimal {
    fn to_decimal(&self) -> Option<BigDecimal> {
        Some(self.clone())
    }
}

impl Component for f64 {
    fn to_decimal(&self) -> Option<BigDecimal> {
        if !self.is_finite() {
            return None;
        }
        BigDecimal::from_str(&self.to_string()).ok()
    }
}

impl Component for f32 {
    fn to_decimal(&self) -> Option<BigDecimal> {
        if !self.is_finite() {
            return None;
        }
        BigDecimal::from_str(&self.to_string()).ok()
    }
}

impl Component for i32 {
    fn to_decimal(&self) -> Option<BigDecimal> {
        Some(BigDecimal::from(*self))
    }
}

impl Component for i64 {
    fn to_decimal(&self) -> Option<BigDecimal> {
        Some(BigDecimal::from(*self))
    }
}

impl Component for u32 {
    fn to_decimal(&self) -> Option<BigDecimal> {
        Some(BigDecimal::from(*self))
    }
}

impl Component for u64 {
    fn to_decimal(&self) -> Option<BigDecimal> {
        Some(BigDecimal::from(*self))
    }
}

impl Component for str {
    fn to_decimal(&self) -> Option<BigDecimal> {
        BigDecimal::from_str(self.trim()).ok()
    }
}

impl Component for String {
    fn to_decimal(&self) -> Option<BigDecimal> {
        self.as_str().to_decimal()
    }
}

impl<T: Component + ?Sized> Component for &T {
    fn to_decimal(&self) -> Option<BigDecimal> {
        (**self).to_decimal()
    }
}

/// Converts a sequence of components, reporting the first non-numeric one.
fn decimals<C: Component>(items: impl IntoIterator<Item = C>) -> Result<Vec<BigDecimal>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, c)| {
            c.to_decimal().ok_or_else(|| {
                let value = c.to_string();
                debug!(index, %value, "rejected non-numeric component");
                AcadGeometryError::from(InputError::NonNumeric { index, value })
            })
        })
        .collect()
}

/// Converts a single scalar operand.
fn scalar(value: &impl Component) -> Result<BigDecimal> {
    value.to_decimal().ok_or_else(|| {
        let value = value.to_string();
        debug!(%value, "rejected non-numeric scalar");
        InputError::NonNumeric { index: 0, value }.into()
    })
}

/// Right-hand operand of [`VectorN`] addition and subtraction.
///
/// Implemented for vectors and for plain numeric sequences, so that
/// `v.try_add([1, 2, 3])` works the same as adding another vector.
pub trait VectorOperand {
    /// Returns the operand's components as decimals.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NonNumeric`] if a component is not a number.
    fn operand_components(&self) -> Result<Vec<BigDecimal>>;
}

impl VectorOperand for VectorN {
    fn operand_components(&self) -> Result<Vec<BigDecimal>> {
        Ok(self.coordinates.clone())
    }
}

impl<C: Component> VectorOperand for [C] {
    fn operand_components(&self) -> Result<Vec<BigDecimal>> {
        decimals(self)
    }
}

impl<C: Component, const N: usize> VectorOperand for [C; N] {
    fn operand_components(&self) -> Result<Vec<BigDecimal>> {
        decimals(self)
    }
}

impl<C: Component> VectorOperand for Vec<C> {
    fn operand_components(&self) -> Result<Vec<BigDecimal>> {
        decimals(self)
    }
}

impl<T: VectorOperand + ?Sized> VectorOperand for &T {
    fn operand_components(&self) -> Result<Vec<BigDecimal>> {
        (**self).operand_components()
    }
}

/// An immutable N-dimensional vector with arbitrary-precision decimal components.
///
/// Equality is approximate: two vectors of the same dimension are equal when
/// every pair of components differs by at most the tolerance of the
/// **left-hand** vector. With different tolerances `a == b` and `b == a` can
/// disagree.
///
/// ```
/// use acad_geometry::VectorN;
///
/// let v = VectorN::new([3, 4, 0]).unwrap();
/// assert_eq!(v.magnitude(), 5.0);
/// assert_eq!(v.to_string(), "Vector(3, 4, 0)");
/// ```
#[derive(Debug, Clone)]
pub struct VectorN {
    coordinates: Vec<BigDecimal>,
    tolerance: BigDecimal,
}

impl VectorN {
    /// Creates a vector with the default equality tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyCoordinates`] for an empty sequence and
    /// [`InputError::NonNumeric`] if any element is not a number.
    pub fn new<C: Component>(coordinates: impl IntoIterator<Item = C>) -> Result<Self> {
        let coordinates = decimals(coordinates)?;
        if coordinates.is_empty() {
            debug!("rejected empty coordinate sequence");
            return Err(InputError::EmptyCoordinates.into());
        }
        Ok(Self::from_decimals(coordinates))
    }

    /// Creates a vector with an explicit equality tolerance.
    ///
    /// # Errors
    ///
    /// Same as [`VectorN::new`], plus [`InputError::InvalidTolerance`] when
    /// `tolerance` is negative or not finite.
    pub fn with_tolerance<C: Component>(
        coordinates: impl IntoIterator<Item = C>,
        tolerance: f64,
    ) -> Result<Self> {
        let mut vector = Self::new(coordinates)?;
        vector.tolerance = Some(tolerance)
            .filter(|t| *t >= 0.0)
            .and_then(|t| t.to_decimal())
            .ok_or(InputError::InvalidTolerance(tolerance))?;
        Ok(vector)
    }

    /// Wraps computed components; results carry the default tolerance.
    fn from_decimals(coordinates: Vec<BigDecimal>) -> Self {
        Self {
            coordinates,
            tolerance: BigDecimal::from(DEFAULT_VECTOR_TOLERANCE),
        }
    }

    /// Returns the number of components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    /// Returns the components.
    #[must_use]
    pub fn coordinates(&self) -> &[BigDecimal] {
        &self.coordinates
    }

    /// Returns the tolerance used when this vector is the left side of `==`.
    #[must_use]
    pub fn tolerance(&self) -> &BigDecimal {
        &self.tolerance
    }

    /// Returns the `i`-th component, or `None` if out of range.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&BigDecimal> {
        self.coordinates.get(i)
    }

    /// Returns the components converted to `f64`.
    #[must_use]
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.coordinates
            .iter()
            .map(|c| c.to_f64().unwrap_or(f64::NAN))
            .collect()
    }

    fn zip_with(
        &self,
        rhs: &impl VectorOperand,
        op: impl Fn(&BigDecimal, &BigDecimal) -> BigDecimal,
    ) -> Result<Vec<BigDecimal>> {
        let other = rhs.operand_components()?;
        if other.len() != self.dimension() {
            return Err(OperandError::DimensionMismatch {
                left: self.dimension(),
                right: other.len(),
            }
            .into());
        }
        Ok(self
            .coordinates
            .iter()
            .zip(&other)
            .map(|(a, b)| op(a, b))
            .collect())
    }

    fn scaled(&self, factor: &BigDecimal) -> Self {
        Self::from_decimals(self.coordinates.iter().map(|c| c * factor).collect())
    }

    /// Componentwise sum with a vector or numeric sequence of equal length.
    ///
    /// # Errors
    ///
    /// Returns [`OperandError::DimensionMismatch`] when the lengths differ.
    pub fn try_add(&self, rhs: impl VectorOperand) -> Result<Self> {
        self.zip_with(&rhs, |a, b| a + b).map(Self::from_decimals)
    }

    /// Componentwise difference with a vector or numeric sequence of equal length.
    ///
    /// # Errors
    ///
    /// Returns [`OperandError::DimensionMismatch`] when the lengths differ.
    pub fn try_sub(&self, rhs: impl VectorOperand) -> Result<Self> {
        self.zip_with(&rhs, |a, b| a - b).map(Self::from_decimals)
    }

    /// Multiplies every component by `factor` in decimal arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NonNumeric`] if `factor` is not a number.
    pub fn try_mul(&self, factor: impl Component) -> Result<Self> {
        Ok(self.scaled(&scalar(&factor)?))
    }

    /// Multiplies by the reciprocal of `divisor`.
    ///
    /// # Errors
    ///
    /// Returns [`OperandError::DivisionByZero`] when `divisor` is zero and
    /// [`InputError::NonNumeric`] if it is not a number.
    pub fn try_div(&self, divisor: impl Component) -> Result<Self> {
        let divisor = scalar(&divisor)?;
        if divisor.is_zero() {
            return Err(OperandError::DivisionByZero.into());
        }
        Ok(self.scaled(&(BigDecimal::one() / divisor)))
    }

    /// Dot product with a vector or numeric sequence of equal length.
    ///
    /// # Errors
    ///
    /// Returns [`OperandError::DimensionMismatch`] when the lengths differ.
    pub fn dot(&self, rhs: impl VectorOperand) -> Result<BigDecimal> {
        Ok(self.zip_with(&rhs, |a, b| a * b)?.into_iter().sum())
    }

    /// Exact sum of squared components.
    fn squared_norm(&self) -> BigDecimal {
        self.coordinates.iter().map(BigDecimal::square).sum()
    }

    /// Euclidean norm.
    ///
    /// Squares are summed exactly and the root is taken in `f64`. When the
    /// sum falls outside the normal `f64` range the root is taken in decimal
    /// first, so tiny or huge vectors still report their true length.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        let squared = self.squared_norm();
        match squared.to_f64() {
            Some(s) if s.is_normal() => s.sqrt(),
            _ => squared
                .sqrt()
                .and_then(|root| root.to_f64())
                .unwrap_or(0.0),
        }
    }

    /// Returns the unit vector in the same direction.
    ///
    /// The zero vector normalizes to the zero vector of the same dimension.
    ///
    /// # Errors
    ///
    /// Returns [`OperandError::DivisionByZero`] only if the decimal norm of
    /// a non-zero vector cannot be formed.
    pub fn normalized(&self) -> Result<Self> {
        if self.coordinates.iter().all(BigDecimal::is_zero) {
            debug!(dimension = self.dimension(), "normalizing zero vector");
            return Ok(Self::from_decimals(vec![
                BigDecimal::zero();
                self.dimension()
            ]));
        }
        let norm = self
            .squared_norm()
            .sqrt()
            .filter(|n| !n.is_zero())
            .ok_or(OperandError::DivisionByZero)?;
        Ok(self.scaled(&(BigDecimal::one() / norm)))
    }
}

impl Index<usize> for VectorN {
    type Output = BigDecimal;

    fn index(&self, index: usize) -> &BigDecimal {
        &self.coordinates[index]
    }
}

impl PartialEq for VectorN {
    fn eq(&self, other: &Self) -> bool {
        self.dimension() == other.dimension()
            && self
                .coordinates
                .iter()
                .zip(&other.coordinates)
                .all(|(a, b)| (a - b).abs() <= self.tolerance)
    }
}

impl fmt::Display for VectorN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector(")?;
        for (i, c) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

impl TryFrom<&VectorN> for Point3 {
    type Error = AcadGeometryError;

    fn try_from(v: &VectorN) -> Result<Self> {
        Point3::try_from(v.to_f64_vec().as_slice())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn empty_is_rejected() {
        let err = VectorN::new(Vec::<f64>::new()).unwrap_err();
        assert!(matches!(
            err,
            AcadGeometryError::Input(InputError::EmptyCoordinates)
        ));
    }

    #[test]
    fn non_numeric_is_rejected() {
        init_tracing();
        let err = VectorN::new(["a"]).unwrap_err();
        assert!(matches!(
            err,
            AcadGeometryError::Input(InputError::NonNumeric { index: 0, .. })
        ));
        let err = VectorN::new([1.0, f64::NAN]).unwrap_err();
        assert!(matches!(
            err,
            AcadGeometryError::Input(InputError::NonNumeric { index: 1, .. })
        ));
        assert!(VectorN::new([f64::INFINITY]).is_err());
    }

    #[test]
    fn accepts_mixed_sources() {
        let from_str = VectorN::new(["1.5", " 2 ", "1e2"]).unwrap();
        assert_eq!(from_str.coordinates(), &[dec("1.5"), dec("2"), dec("100")]);
        assert_eq!(VectorN::new([1, 2, 3]).unwrap().dimension(), 3);
        assert_eq!(VectorN::new(&[0.5_f64][..]).unwrap()[0], dec("0.5"));
    }

    #[test]
    fn floats_convert_to_shortest_decimal() {
        let v = VectorN::new([0.6, 0.1]).unwrap();
        assert_eq!(v.coordinates(), &[dec("0.6"), dec("0.1")]);
    }

    #[test]
    fn add_vectors() {
        let v1 = VectorN::new([1, 2, 3]).unwrap();
        let v2 = VectorN::new([2, 2, 2]).unwrap();
        let sum = v1.try_add(&v2).unwrap();
        assert_eq!(sum.coordinates(), &[dec("3"), dec("4"), dec("5")]);
    }

    #[test]
    fn add_and_sub_plain_sequences() {
        let v = VectorN::new([1, 2, 3]).unwrap();
        let sum = v.try_add([1.0, 1.0, 1.0]).unwrap();
        assert_eq!(sum.coordinates(), &[dec("2"), dec("3"), dec("4")]);
        let diff = v.try_sub(vec![1, 2, 3]).unwrap();
        assert!(diff.coordinates().iter().all(BigDecimal::is_zero));
    }

    #[test]
    fn dimension_mismatch_fails() {
        let v = VectorN::new([1, 2, 3]).unwrap();
        let err = v.try_add([1, 2]).unwrap_err();
        assert!(matches!(
            err,
            AcadGeometryError::Operand(OperandError::DimensionMismatch { left: 3, right: 2 })
        ));
        assert!(v.try_sub(&VectorN::new([1]).unwrap()).is_err());
    }

    #[test]
    fn scale_and_divide() {
        let v = VectorN::new([1, 2, 3]).unwrap();
        let doubled = v.try_mul(2).unwrap();
        assert_eq!(doubled.coordinates(), &[dec("2"), dec("4"), dec("6")]);
        let halved = v.try_div(2).unwrap();
        assert_eq!(halved.coordinates(), &[dec("0.5"), dec("1"), dec("1.5")]);
    }

    #[test]
    fn divide_by_zero_fails() {
        let v = VectorN::new([1, 2, 3]).unwrap();
        let err = v.try_div(0).unwrap_err();
        assert!(matches!(
            err,
            AcadGeometryError::Operand(OperandError::DivisionByZero)
        ));
    }

    #[test]
    fn non_numeric_scalar_fails() {
        let v = VectorN::new([1, 2, 3]).unwrap();
        assert!(matches!(
            v.try_mul(f64::NAN).unwrap_err(),
            AcadGeometryError::Input(InputError::NonNumeric { .. })
        ));
    }

    #[test]
    fn magnitude() {
        assert_eq!(VectorN::new([3, 4, 0]).unwrap().magnitude(), 5.0);
        assert_relative_eq!(
            VectorN::new([1, 2, 3]).unwrap().magnitude(),
            14.0_f64.sqrt()
        );
    }

    #[test]
    fn tiny_components_are_kept() {
        let v = VectorN::new([1e-15, 0.0, 0.0]).unwrap();
        assert_eq!(v[0], dec("0.000000000000001"));
        assert_relative_eq!(v.magnitude(), 1e-15);

        let v = VectorN::new([1e-30, 2.0]).unwrap();
        assert!(!v[0].is_zero());
        assert_eq!(v[0], dec("1e-30"));
    }

    #[test]
    fn huge_components_are_accepted() {
        let v = VectorN::new([1e30, 0.0]).unwrap();
        assert_eq!(v[0], dec("1e30"));
        assert_relative_eq!(v.magnitude(), 1e30);

        let unit = v.normalized().unwrap().to_f64_vec();
        assert_relative_eq!(unit[0], 1.0);
        assert_relative_eq!(unit[1], 0.0);
    }

    #[test]
    fn magnitude_below_f64_square_range() {
        let v = VectorN::new([1e-200, 0.0]).unwrap();
        assert_relative_eq!(v.magnitude(), 1e-200);
    }

    #[test]
    fn normalizes_tiny_vector() {
        let unit = VectorN::new([1e-15, 0.0, 0.0])
            .unwrap()
            .normalized()
            .unwrap()
            .to_f64_vec();
        assert_relative_eq!(unit[0], 1.0);
        assert_relative_eq!(unit[1], 0.0);

        let unit = VectorN::new([0.0, 1e-200]).unwrap().normalized().unwrap();
        assert_relative_eq!(unit.to_f64_vec()[1], 1.0);
    }

    #[test]
    fn normalized_unit_vector() {
        let unit = VectorN::new([3, 4, 0]).unwrap().normalized().unwrap();
        let expected = VectorN::with_tolerance([0.6, 0.8, 0.0], 1e-20).unwrap();
        assert_eq!(expected, unit);
        assert_relative_eq!(unit.magnitude(), 1.0);
    }

    #[test]
    fn normalized_zero_vector_is_zero() {
        init_tracing();
        let zero = VectorN::new([0, 0, 0]).unwrap();
        let n = zero.normalized().unwrap();
        assert_eq!(n, VectorN::new([0, 0, 0]).unwrap());
        assert!(n.coordinates().iter().all(BigDecimal::is_zero));

        let zero_2d = VectorN::new([0, 0]).unwrap().normalized().unwrap();
        assert_eq!(zero_2d.dimension(), 2);
    }

    #[test]
    fn default_tolerance_is_loose() {
        let a = VectorN::new([1, 2, 3]).unwrap();
        let b = VectorN::new([1000, 2000, 3000]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, VectorN::new([1, 2]).unwrap());
    }

    #[test]
    fn tolerance_comes_from_left_operand() {
        let strict = VectorN::with_tolerance([1.0, 2.0], 1e-6).unwrap();
        let loose = VectorN::new([1.5, 2.0]).unwrap();
        assert!(strict != loose);
        assert!(loose == strict);
    }

    #[test]
    fn invalid_tolerance_is_rejected() {
        assert!(VectorN::with_tolerance([1.0], -1.0).is_err());
        assert!(VectorN::with_tolerance([1.0], f64::INFINITY).is_err());
        assert!(VectorN::with_tolerance([1.0], f64::NAN).is_err());
    }

    #[test]
    fn index_and_get() {
        let v = VectorN::new([7, 8, 9]).unwrap();
        assert_eq!(v[1], dec("8"));
        assert_eq!(v.get(2), Some(&dec("9")));
        assert_eq!(v.get(3), None);
    }

    #[test]
    fn dot_product() {
        let v = VectorN::new([1, 2, 3]).unwrap();
        assert_eq!(v.dot([4, 5, 6]).unwrap(), dec("32"));
    }

    #[test]
    fn display() {
        assert_eq!(
            VectorN::new(["1.5", "-2", "0"]).unwrap().to_string(),
            "Vector(1.5, -2, 0)"
        );
    }

    #[test]
    fn converts_to_point() {
        let v = VectorN::new([1, 2, 3]).unwrap();
        assert_eq!(Point3::try_from(&v).unwrap(), (1.0, 2.0, 3.0));
        assert!(Point3::try_from(&VectorN::new([1, 2]).unwrap()).is_err());
    }
}
