use crate::error::Error;
use crate::types::Matrix2;
use crate::Scalar;
use num_traits::float::FloatCore;

/// Tuning constants of the vision filter.
///
/// All values are fixed at construction; the filter derives its noise matrices from them on
/// every reset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisionFilterConfig<T> {
    /// The initial variance of the rate estimate after a reset.
    pub initial_rate_variance: T,
    /// The variance (sigma-squared) of the vision position measurements.
    pub vision_position_variance: T,
    /// The variance of the unmodeled acceleration impulse driving the process noise.
    pub acceleration_variance: T,
    /// The control loop period, in seconds.
    pub tick_period: T,
    /// The disagreement between vision and estimate, in vision units, above which the
    /// filter is re-seeded instead of corrected.
    pub reset_threshold: T,
    /// The measurement age, in ticks, above which vision data is not fused.
    pub stale_threshold: usize,
    /// The horizontal field of view of the camera, in radians.
    pub horizontal_fov: T,
    /// The conversion from a heading change, in radians, to lateral motion in vision units.
    pub heading_to_position_scale: T,
}

macro_rules! impl_default_config {
    ($type:ty) => {
        impl Default for VisionFilterConfig<$type> {
            fn default() -> Self {
                // Raspberry Pi camera module v1.
                let horizontal_fov: $type = 53.5 * (core::f64::consts::PI as $type) / 180.0;
                Self {
                    initial_rate_variance: 0.01,
                    vision_position_variance: 0.0005,
                    acceleration_variance: 0.25,
                    tick_period: 1.0 / 50.0,
                    reset_threshold: 0.2,
                    stale_threshold: 10,
                    horizontal_fov,
                    // Vision units span [-1, 1] across the field of view.
                    heading_to_position_scale: 2.0 / horizontal_fov,
                }
            }
        }
    };
}

impl_default_config!(f32);
impl_default_config!(f64);

impl<T> VisionFilterConfig<T>
where
    T: Scalar,
{
    /// Checks that every noise term and period is usable and that a snapshot stack of
    /// `history_depth` entries can roll back over the whole stale-data window.
    pub fn validate(&self, history_depth: usize) -> Result<(), Error> {
        let positive = [
            ("initial_rate_variance", self.initial_rate_variance),
            ("vision_position_variance", self.vision_position_variance),
            ("acceleration_variance", self.acceleration_variance),
            ("tick_period", self.tick_period),
            ("reset_threshold", self.reset_threshold),
            ("horizontal_fov", self.horizontal_fov),
        ];
        for (name, value) in positive {
            if !is_positive_finite(value) {
                return Err(Error::InvalidParameter { name });
            }
        }

        if !FloatCore::is_finite(self.heading_to_position_scale) {
            return Err(Error::InvalidParameter {
                name: "heading_to_position_scale",
            });
        }

        // Rolling back `n` ticks restores the snapshot preceding the newest `n`.
        let required = self.stale_threshold + 1;
        if required > history_depth {
            return Err(Error::InsufficientHistoryDepth {
                stale_threshold: self.stale_threshold,
                required,
                depth: history_depth,
            });
        }

        Ok(())
    }

    /// The constant-velocity state transition matrix `F` for one tick.
    pub fn state_transition(&self) -> Matrix2<T> {
        Matrix2::new(T::one(), self.tick_period, T::zero(), T::one())
    }

    /// The initial estimate covariance `P₀` used on every reset.
    pub fn initial_covariance(&self) -> Matrix2<T> {
        Matrix2::diagonal(self.vision_position_variance, self.initial_rate_variance)
    }

    /// The process noise `Q` of a piecewise-constant acceleration impulse over one tick.
    pub fn process_noise(&self) -> Matrix2<T> {
        let dt = self.tick_period;
        let dt2 = dt * dt;
        let dt3 = dt2 * dt;
        let dt4 = dt2 * dt2;
        let two = T::one() + T::one();
        let four = two + two;

        Matrix2::symmetric(dt4 / four, dt3 / two, dt2).scale(self.acceleration_variance)
    }

    /// The measurement noise `R` of a `[position, rate]` vision measurement.
    ///
    /// The rate is differenced from consecutive positions, so its error is correlated
    /// with the position error and considerably larger.
    pub fn measurement_noise(&self) -> Matrix2<T> {
        let six = T::one() + T::one() + T::one() + T::one() + T::one() + T::one();
        let variance = self.vision_position_variance;
        Matrix2::symmetric(variance, variance, variance * six)
    }
}

#[inline]
fn is_positive_finite<T>(value: T) -> bool
where
    T: FloatCore,
{
    FloatCore::is_finite(value) && value > T::zero()
}
