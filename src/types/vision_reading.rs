use core::fmt::{Debug, Formatter};
use uniform_array_derive::UniformArray;

/// A lateral position report from the vision sensor.
///
/// The vision pipeline publishes asynchronously; the same reading (and therefore the same
/// `timestamp`) is observed on every tick until a new frame has been processed.
#[derive(UniformArray, Copy)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct VisionReading<T> {
    /// The lateral target offset, in normalized image units (`-1` to `1` across the
    /// horizontal field of view).
    pub position: T,
    /// The capture time of the frame, in seconds on the same clock passed to
    /// [`VisionFilter::tick`](crate::VisionFilter::tick).
    ///
    /// Use a monotonic clock that starts near zero (e.g. seconds since boot). Wall-clock
    /// epoch seconds exceed the precision of `f32`, where a single step is then larger than
    /// the tick period.
    pub timestamp: T,
}

impl<T> VisionReading<T> {
    /// Initializes a new [`VisionReading`] instance.
    #[inline(always)]
    pub const fn new(position: T, timestamp: T) -> Self {
        Self {
            position,
            timestamp,
        }
    }
}

impl<T> Default for VisionReading<T>
where
    T: Default,
{
    #[inline]
    fn default() -> Self {
        Self::new(Default::default(), Default::default())
    }
}

impl<T> Clone for VisionReading<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            position: self.position.clone(),
            timestamp: self.timestamp.clone(),
        }
    }
}

impl<T> Debug for VisionReading<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("VisionReading")
            .field(&self.position)
            .field(&self.timestamp)
            .finish()
    }
}

impl<T> PartialEq for VisionReading<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.timestamp == other.timestamp
    }
}
