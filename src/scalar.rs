use minikalman::matrix::MatrixDataType;
use num_traits::float::FloatCore;
use num_traits::FloatConst;

/// The scalar type the estimator operates on; implemented for `f32` and `f64`.
///
/// Only operations available without `std` are required, so the filter runs unchanged on
/// targets without a floating-point math library.
pub trait Scalar: MatrixDataType + FloatCore + FloatConst + Default + core::fmt::Debug {}

impl<T> Scalar for T where T: MatrixDataType + FloatCore + FloatConst + Default + core::fmt::Debug {}

pub trait NormalizeAngle<T = Self> {
    type Output;

    /// Wraps the angle (provided in radians) into the range `(-π, π]`.
    fn normalize_angle(self) -> Self::Output;
}

impl<T> NormalizeAngle<T> for T
where
    T: FloatCore + FloatConst,
{
    type Output = T;

    #[inline]
    fn normalize_angle(self) -> Self::Output {
        let pi = T::PI();
        let two_pi = pi + pi;
        let wrapped = self - two_pi * FloatCore::floor((self + pi) / two_pi);
        if wrapped == -pi {
            pi
        } else {
            wrapped
        }
    }
}
