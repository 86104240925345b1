use crate::types::Vector2;
use core::fmt::{Debug, Formatter};
use core::ops::Sub;
use uniform_array_derive::UniformArray;

/// A single reading of the platform's heading sensor, taken once per tick.
#[derive(UniformArray, Copy)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct AngularSample<T> {
    /// The heading angle, in radians.
    pub heading: T,
    /// The rate of change of the heading, in radians per second.
    pub heading_rate: T,
}

impl<T> AngularSample<T> {
    /// Initializes a new [`AngularSample`] instance.
    #[inline(always)]
    pub const fn new(heading: T, heading_rate: T) -> Self {
        Self {
            heading,
            heading_rate,
        }
    }
}

impl<T> Default for AngularSample<T>
where
    T: Default,
{
    #[inline]
    fn default() -> Self {
        Self::new(Default::default(), Default::default())
    }
}

impl<T> Clone for AngularSample<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            heading: self.heading.clone(),
            heading_rate: self.heading_rate.clone(),
        }
    }
}

impl<T> Debug for AngularSample<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("AngularSample")
            .field(&self.heading)
            .field(&self.heading_rate)
            .finish()
    }
}

impl<T> PartialEq for AngularSample<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.heading == other.heading && self.heading_rate == other.heading_rate
    }
}

/// The change between two samples, as a `[Δheading, Δheading_rate]` vector.
impl<T> Sub<AngularSample<T>> for AngularSample<T>
where
    T: Sub<T, Output = T>,
{
    type Output = Vector2<T>;

    #[inline]
    fn sub(self, rhs: AngularSample<T>) -> Self::Output {
        Vector2::new(
            self.heading - rhs.heading,
            self.heading_rate - rhs.heading_rate,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_index() {
        let sample = AngularSample::<f32> {
            heading: 1.0,
            heading_rate: 2.0,
        };

        assert_eq!(sample[0], 1.0);
        assert_eq!(sample[1], 2.0);
    }

    #[test]
    fn test_difference() {
        let newer = AngularSample::new(0.5_f64, 0.25);
        let older = AngularSample::new(0.25_f64, 0.5);

        assert_eq!(newer - older, Vector2::new(0.25, -0.25));
    }
}
