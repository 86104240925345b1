use core::fmt::{Debug, Formatter};
use core::ops::{Add, Mul, Neg, Sub};
use uniform_array_derive::UniformArray;

/// A two-dimensional column vector.
///
/// In the filter this carries either the state `[position, rate]`, a measurement
/// of the same shape, or a control input.
#[derive(UniformArray, Copy)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

impl<T> Vector2<T> {
    /// Initializes a new [`Vector2`] instance.
    #[inline(always)]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> Vector2<T> {
    /// Returns the zero vector.
    #[inline(always)]
    pub fn zero() -> Self
    where
        T: num_traits::Zero,
    {
        Self::new(T::zero(), T::zero())
    }

    /// Calculates the squared vector length.
    #[inline(always)]
    pub fn norm_sq(&self) -> T
    where
        T: Copy + Mul<T, Output = T> + Add<T, Output = T>,
    {
        self.x * self.x + self.y * self.y
    }
}

impl<T> Default for Vector2<T>
where
    T: Default,
{
    #[inline]
    fn default() -> Self {
        Self::new(Default::default(), Default::default())
    }
}

impl<T> Clone for Vector2<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            x: self.x.clone(),
            y: self.y.clone(),
        }
    }
}

impl<T> Debug for Vector2<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Vector2")
            .field(&self.x)
            .field(&self.y)
            .finish()
    }
}

impl<T> PartialEq for Vector2<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Implements the unary negation.
impl<T> Neg for Vector2<T>
where
    T: Neg<Output = T>,
{
    type Output = Vector2<T>;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<T> Add<Vector2<T>> for Vector2<T>
where
    T: Add<T, Output = T>,
{
    type Output = Vector2<T>;

    #[inline]
    fn add(self, rhs: Vector2<T>) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T> Sub<Vector2<T>> for Vector2<T>
where
    T: Sub<T, Output = T>,
{
    type Output = Vector2<T>;

    #[inline]
    fn sub(self, rhs: Vector2<T>) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<T> Mul<T> for Vector2<T>
where
    T: Mul<T, Output = T> + Clone,
{
    type Output = Vector2<T>;

    #[inline]
    fn mul(self, rhs: T) -> Self::Output {
        Self {
            x: self.x * rhs.clone(),
            y: self.y * rhs,
        }
    }
}
