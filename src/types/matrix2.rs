use crate::types::Vector2;
use core::fmt::{Debug, Formatter};
use core::ops::{Add, Mul, Sub};
use num_traits::float::FloatCore;
use uniform_array_derive::UniformArray;

/// A 2×2 matrix, stored row-major.
///
/// These are the only matrix routines the filter needs for its two-dimensional
/// state; anything larger is out of scope for this crate.
#[derive(UniformArray, Copy)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Matrix2<T> {
    /// Row 1, column 1.
    pub m11: T,
    /// Row 1, column 2.
    pub m12: T,
    /// Row 2, column 1.
    pub m21: T,
    /// Row 2, column 2.
    pub m22: T,
}

impl<T> Matrix2<T> {
    /// Initializes a new [`Matrix2`] instance from its rows.
    #[inline(always)]
    pub const fn new(m11: T, m12: T, m21: T, m22: T) -> Self {
        Self { m11, m12, m21, m22 }
    }

    /// Builds a symmetric matrix from its diagonal and the shared off-diagonal term.
    #[inline(always)]
    pub fn symmetric(m11: T, off_diagonal: T, m22: T) -> Self
    where
        T: Clone,
    {
        Self::new(m11, off_diagonal.clone(), off_diagonal, m22)
    }

    /// Builds a diagonal matrix.
    #[inline(always)]
    pub fn diagonal(m11: T, m22: T) -> Self
    where
        T: num_traits::Zero,
    {
        Self::new(m11, T::zero(), T::zero(), m22)
    }

    /// Returns the identity matrix.
    #[inline(always)]
    pub fn identity() -> Self
    where
        T: num_traits::Zero + num_traits::One,
    {
        Self::diagonal(T::one(), T::one())
    }

    /// Returns the zero matrix.
    #[inline(always)]
    pub fn zero() -> Self
    where
        T: num_traits::Zero,
    {
        Self::diagonal(T::zero(), T::zero())
    }

    /// Gets the element at the specified row and column.
    ///
    /// ## Panics
    /// Panics if `row` or `col` is not `0` or `1`.
    #[inline]
    pub fn get_at(&self, row: usize, col: usize) -> T
    where
        T: Copy,
    {
        match (row, col) {
            (0, 0) => self.m11,
            (0, 1) => self.m12,
            (1, 0) => self.m21,
            (1, 1) => self.m22,
            _ => panic!("Index out of bounds"),
        }
    }
}

impl<T> Matrix2<T>
where
    T: Copy + Add<T, Output = T> + Sub<T, Output = T> + Mul<T, Output = T>,
{
    /// Returns the transposed matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::new(self.m11, self.m21, self.m12, self.m22)
    }

    /// Calculates the determinant.
    #[inline]
    pub fn determinant(&self) -> T {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    /// Calculates the trace, i.e. the sum of the diagonal.
    #[inline]
    pub fn trace(&self) -> T {
        self.m11 + self.m22
    }

    /// Multiplies every element by a scalar.
    #[inline]
    pub fn scale(&self, factor: T) -> Self {
        Self::new(
            self.m11 * factor,
            self.m12 * factor,
            self.m21 * factor,
            self.m22 * factor,
        )
    }

    /// Calculates `self × other × selfᵀ`, the congruence transform used to
    /// propagate a covariance through a linear map.
    #[inline]
    pub fn congruence(&self, other: &Matrix2<T>) -> Self {
        *self * *other * self.transpose()
    }
}

impl<T> Matrix2<T>
where
    T: FloatCore,
{
    /// Calculates the inverse, or `None` if the matrix is singular or its determinant is
    /// not finite.
    ///
    /// The matrix is treated as singular when the determinant is vanishingly small compared
    /// to the magnitude of the diagonal product.
    pub fn try_inverse(&self) -> Option<Self> {
        let det = self.determinant();
        let scale = FloatCore::abs(self.m11 * self.m22) + FloatCore::abs(self.m12 * self.m21);
        if !FloatCore::is_finite(det) || FloatCore::abs(det) <= T::epsilon() * scale {
            return None;
        }

        let inv_det = T::one() / det;
        Some(Self::new(
            self.m22 * inv_det,
            -self.m12 * inv_det,
            -self.m21 * inv_det,
            self.m11 * inv_det,
        ))
    }

    /// Returns a copy with the off-diagonal terms replaced by their mean.
    #[inline]
    pub fn symmetrized(&self) -> Self {
        let two = T::one() + T::one();
        let off = (self.m12 + self.m21) / two;
        Self::new(self.m11, off, off, self.m22)
    }

    /// Determines whether the off-diagonal terms agree within `tolerance`.
    #[inline]
    pub fn is_symmetric(&self, tolerance: T) -> bool {
        FloatCore::abs(self.m12 - self.m21) <= tolerance
    }
}

impl<T> Default for Matrix2<T>
where
    T: Default,
{
    #[inline]
    fn default() -> Self {
        Self::new(
            Default::default(),
            Default::default(),
            Default::default(),
            Default::default(),
        )
    }
}

impl<T> Clone for Matrix2<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            m11: self.m11.clone(),
            m12: self.m12.clone(),
            m21: self.m21.clone(),
            m22: self.m22.clone(),
        }
    }
}

impl<T> Debug for Matrix2<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Matrix2")
            .field(&[&self.m11, &self.m12])
            .field(&[&self.m21, &self.m22])
            .finish()
    }
}

impl<T> PartialEq for Matrix2<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.m11 == other.m11
            && self.m12 == other.m12
            && self.m21 == other.m21
            && self.m22 == other.m22
    }
}

impl<T> Add<Matrix2<T>> for Matrix2<T>
where
    T: Add<T, Output = T>,
{
    type Output = Matrix2<T>;

    #[inline]
    fn add(self, rhs: Matrix2<T>) -> Self::Output {
        Self::new(
            self.m11 + rhs.m11,
            self.m12 + rhs.m12,
            self.m21 + rhs.m21,
            self.m22 + rhs.m22,
        )
    }
}

impl<T> Sub<Matrix2<T>> for Matrix2<T>
where
    T: Sub<T, Output = T>,
{
    type Output = Matrix2<T>;

    #[inline]
    fn sub(self, rhs: Matrix2<T>) -> Self::Output {
        Self::new(
            self.m11 - rhs.m11,
            self.m12 - rhs.m12,
            self.m21 - rhs.m21,
            self.m22 - rhs.m22,
        )
    }
}

/// Implements the matrix product.
impl<T> Mul<Matrix2<T>> for Matrix2<T>
where
    T: Copy + Add<T, Output = T> + Mul<T, Output = T>,
{
    type Output = Matrix2<T>;

    #[inline]
    fn mul(self, rhs: Matrix2<T>) -> Self::Output {
        Self::new(
            self.m11 * rhs.m11 + self.m12 * rhs.m21,
            self.m11 * rhs.m12 + self.m12 * rhs.m22,
            self.m21 * rhs.m11 + self.m22 * rhs.m21,
            self.m21 * rhs.m12 + self.m22 * rhs.m22,
        )
    }
}

/// Implements the matrix-vector product.
impl<T> Mul<Vector2<T>> for Matrix2<T>
where
    T: Copy + Add<T, Output = T> + Mul<T, Output = T>,
{
    type Output = Vector2<T>;

    #[inline]
    fn mul(self, rhs: Vector2<T>) -> Self::Output {
        Vector2::new(
            self.m11 * rhs.x + self.m12 * rhs.y,
            self.m21 * rhs.x + self.m22 * rhs.y,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_index() {
        let mat = Matrix2::<f32>::new(1.0, 2.0, 3.0, 4.0);

        assert_eq!(mat[0], 1.0);
        assert_eq!(mat[1], 2.0);
        assert_eq!(mat[2], 3.0);
        assert_eq!(mat[3], 4.0);
        assert_eq!(mat.get_at(1, 0), 3.0);
    }

    #[test]
    fn test_products() {
        let a = Matrix2::new(1.0_f64, 2.0, 3.0, 4.0);
        let b = Matrix2::new(0.0_f64, 1.0, 1.0, 0.0);

        assert_eq!(a * b, Matrix2::new(2.0, 1.0, 4.0, 3.0));
        assert_eq!(a * Vector2::new(1.0, 1.0), Vector2::new(3.0, 7.0));
        assert_eq!(a.transpose(), Matrix2::new(1.0, 3.0, 2.0, 4.0));
        assert_eq!(a * Matrix2::identity(), a);
    }

    #[test]
    fn test_inverse() {
        let a = Matrix2::new(4.0_f64, 7.0, 2.0, 6.0);
        let inv = a.try_inverse().expect("matrix is invertible");
        let product = a * inv;

        assert_relative_eq!(product.m11, 1.0, epsilon = 1e-12);
        assert_relative_eq!(product.m12, 0.0, epsilon = 1e-12);
        assert_relative_eq!(product.m21, 0.0, epsilon = 1e-12);
        assert_relative_eq!(product.m22, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_inverse() {
        let singular = Matrix2::new(1.0_f64, 2.0, 2.0, 4.0);
        assert!(singular.try_inverse().is_none());
        assert!(Matrix2::<f64>::zero().try_inverse().is_none());
        assert!(Matrix2::new(f64::NAN, 0.0, 0.0, 1.0)
            .try_inverse()
            .is_none());
    }

    #[test]
    fn test_symmetrized() {
        let a = Matrix2::new(1.0_f64, 0.2, 0.4, 2.0);
        assert!(!a.is_symmetric(1e-9));

        let s = a.symmetrized();
        assert!(s.is_symmetric(0.0));
        assert_relative_eq!(s.m12, 0.3, epsilon = 1e-12);
        assert_eq!(s.trace(), 3.0);
    }

    #[test]
    fn test_congruence() {
        let f = Matrix2::new(1.0_f64, 0.5, 0.0, 1.0);
        let p = Matrix2::diagonal(2.0_f64, 4.0);

        // F·P·Fᵀ for a constant-velocity transition.
        let fpf = f.congruence(&p);
        assert_relative_eq!(fpf.m11, 3.0, epsilon = 1e-12);
        assert_relative_eq!(fpf.m12, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fpf.m21, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fpf.m22, 4.0, epsilon = 1e-12);
    }
}
