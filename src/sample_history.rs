use crate::history::BoundedHistory;
use crate::types::{AngularSample, Vector2};
use crate::{NormalizeAngle, Scalar};

/// The default number of heading samples retained.
pub const DEFAULT_SAMPLE_CAPACITY: usize = 50;

/// The most recent heading samples, one per tick.
///
/// The filter's rate channel is driven by the change in heading between consecutive ticks:
/// turning the platform shifts the target sideways in the camera frame, which is exactly the
/// motion the vision sensor cannot see while its report is still in flight.
#[derive(Debug, Clone)]
pub struct SampleHistory<T, const N: usize = DEFAULT_SAMPLE_CAPACITY> {
    samples: BoundedHistory<AngularSample<T>, N>,
}

impl<T, const N: usize> SampleHistory<T, N> {
    /// Creates an empty history.
    pub fn new() -> Self
    where
        T: Copy + Default,
    {
        Self {
            samples: BoundedHistory::new(),
        }
    }

    /// Appends the sample taken this tick, evicting the oldest one when full.
    #[inline]
    pub fn push(&mut self, sample: AngularSample<T>) {
        self.samples.push(sample);
    }

    /// Discards all samples but `sample`, which becomes the only (and newest) entry.
    pub fn reset_to(&mut self, sample: AngularSample<T>) {
        self.samples.clear();
        self.samples.push(sample);
    }

    /// Gets the sample taken `back` ticks before the most recent one.
    #[inline]
    pub fn newest(&self, back: usize) -> Option<AngularSample<T>>
    where
        T: Copy,
    {
        self.samples.newest(back).copied()
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Computes the control input for the predict step that advanced the filter over the
    /// tick ending `back` ticks ago, i.e. `scale · (sample[back] - sample[back + 1])`.
    ///
    /// The heading component is wrapped into `(-π, π]` so crossing the heading seam does not
    /// look like a full turn. If the older of the two samples is no longer retained, the
    /// platform is assumed not to have turned and the input is zero.
    pub fn control_input(&self, back: usize, scale: T) -> Vector2<T>
    where
        T: Scalar,
    {
        match (self.newest(back), self.newest(back + 1)) {
            (Some(newer), Some(older)) => {
                let delta = newer - older;
                Vector2::new(delta.x.normalize_angle(), delta.y) * scale
            }
            _ => Vector2::zero(),
        }
    }
}

impl<T, const N: usize> Default for SampleHistory<T, N>
where
    T: Copy + Default,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
