use core::fmt::{Debug, Formatter};

/// A copy of the fused target estimate, handed to steering and telemetry consumers.
#[derive(Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate<T> {
    /// The estimated lateral offset, in normalized image units.
    pub position: T,
    /// The estimated rate of change of the lateral offset, in normalized image units per second.
    pub rate: T,
    /// The steering bearing to the target, in radians.
    pub bearing: T,
}

impl<T> Estimate<T> {
    /// Initializes a new [`Estimate`] instance.
    #[inline(always)]
    pub const fn new(position: T, rate: T, bearing: T) -> Self {
        Self {
            position,
            rate,
            bearing,
        }
    }
}

impl<T> Clone for Estimate<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            position: self.position.clone(),
            rate: self.rate.clone(),
            bearing: self.bearing.clone(),
        }
    }
}

impl<T> Debug for Estimate<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Estimate")
            .field("position", &self.position)
            .field("rate", &self.rate)
            .field("bearing", &self.bearing)
            .finish()
    }
}

impl<T> PartialEq for Estimate<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.rate == other.rate && self.bearing == other.bearing
    }
}
