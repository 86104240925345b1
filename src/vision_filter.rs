use num_traits::float::FloatCore;

use crate::config::VisionFilterConfig;
use crate::error::Error;
use crate::kalman::{LateralKalmanFilter, DEFAULT_HISTORY_DEPTH};
use crate::sample_history::{SampleHistory, DEFAULT_SAMPLE_CAPACITY};
use crate::sensors::{HeadingSource, VisionSource};
use crate::types::{AngularSample, Estimate, Matrix2, Vector2, VisionReading};
use crate::Scalar;

/// The tracking state of a [`VisionFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// No valid vision reading has been seen since construction or the last enable.
    Uninitialized,
    /// The estimate is being predicted and corrected.
    Tracking,
    /// The latest vision reading is too old to be trusted; the estimate is frozen until a
    /// fresh reading arrives.
    Stale,
}

/// What a single [`VisionFilter::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome<T> {
    /// The vision sensor has no valid reading; the estimate, if any, was held.
    NoVision,
    /// The vision reading is older than the stale threshold; the estimate was held.
    Stale {
        /// The age of the reading, in ticks.
        latency: usize,
    },
    /// The filter was re-seeded from the raw vision position.
    Reset {
        /// The position the filter was seeded with.
        position: T,
    },
    /// The estimate was predicted forward; no new vision data was available.
    Predicted,
    /// A new vision reading was fused at the time it was captured and the estimate
    /// replayed to the present.
    Fused {
        /// The age of the reading, in ticks.
        latency: usize,
        /// The number of prediction steps actually rolled back and replayed.
        replayed: usize,
    },
}

/// Estimates the lateral offset and rate of a visually tracked target by fusing delayed
/// vision reports with the platform's heading.
///
/// The vision pipeline reports positions several ticks after the frame was captured. Each
/// new report is applied to the estimate as it was at capture time and the heading changes
/// since then are replayed on top, so the estimate stays current despite the delay.
///
/// The filter is driven by calling [`tick`](Self::tick) exactly once per control cycle.
pub struct VisionFilter<
    T,
    V,
    H,
    const DEPTH: usize = DEFAULT_HISTORY_DEPTH,
    const SAMPLES: usize = DEFAULT_SAMPLE_CAPACITY,
> {
    config: VisionFilterConfig<T>,
    vision: V,
    heading: H,
    filter: Option<LateralKalmanFilter<T, DEPTH>>,
    samples: SampleHistory<T, SAMPLES>,
    /// The vision reading most recently fused or used for seeding.
    last_vision: Option<VisionReading<T>>,
    state: TrackingState,
}

impl<T, V, H, const DEPTH: usize, const SAMPLES: usize> VisionFilter<T, V, H, DEPTH, SAMPLES>
where
    T: Scalar,
    V: VisionSource<T>,
    H: HeadingSource<T>,
{
    /// Initializes a new instance of the [`VisionFilter`] struct.
    ///
    /// If the vision sensor already has a reading, the filter is seeded from it right away.
    ///
    /// ## Arguments
    /// * `config` - The tuning constants.
    /// * `vision` - The source of vision reports.
    /// * `heading` - The source of heading samples.
    ///
    /// ## Errors
    /// Returns an error if the configuration is invalid, or if `DEPTH` snapshots are not
    /// enough to roll back over `config.stale_threshold` ticks.
    pub fn new(config: VisionFilterConfig<T>, vision: V, heading: H) -> Result<Self, Error> {
        config.validate(DEPTH)?;

        let mut filter = Self {
            config,
            vision,
            heading,
            filter: None,
            samples: SampleHistory::new(),
            last_vision: None,
            state: TrackingState::Uninitialized,
        };
        filter.reset();
        Ok(filter)
    }

    /// Re-seeds the filter from the current vision reading, with zero rate and all history
    /// discarded. Returns `false` and becomes [`TrackingState::Uninitialized`] if the vision
    /// sensor has no reading.
    pub fn reset(&mut self) -> bool {
        let sample = self.heading.read();
        match self.vision.latest() {
            Some(reading) => {
                self.reseed(reading, sample);
                true
            }
            None => {
                self.filter = None;
                self.last_vision = None;
                self.samples.reset_to(sample);
                self.state = TrackingState::Uninitialized;
                false
            }
        }
    }

    /// Handles the platform being (re-)enabled; the filter starts over from the current
    /// vision reading.
    pub fn on_enable(&mut self) -> bool {
        self.reset()
    }

    /// Runs one control cycle.
    ///
    /// ## Arguments
    /// * `now` - The current time, in seconds on the clock the vision timestamps use. See
    ///   [`VisionReading::timestamp`] for the clock's requirements.
    ///
    /// ## Errors
    /// Returns [`Error::SingularInnovationCovariance`] if the measurement update fails,
    /// which indicates malformed noise parameters.
    pub fn tick(&mut self, now: T) -> Result<TickOutcome<T>, Error> {
        let sample = self.heading.read();
        self.samples.push(sample);

        let Some(reading) = self.vision.latest() else {
            self.hold();
            return Ok(TickOutcome::NoVision);
        };

        let latency = self.latency_ticks(now, reading.timestamp);
        if latency > self.config.stale_threshold {
            log::debug!("Vision reading is {latency} ticks old, skipping fusion");
            if self.state == TrackingState::Tracking {
                self.state = TrackingState::Stale;
            }
            self.hold();
            return Ok(TickOutcome::Stale { latency });
        }

        let Some(filter) = self.filter.as_mut() else {
            self.reseed(reading, sample);
            return Ok(TickOutcome::Reset {
                position: reading.position,
            });
        };

        let divergence = FloatCore::abs(reading.position - filter.state().x);
        if divergence > self.config.reset_threshold {
            log::info!(
                "Vision disagrees with the estimate by {divergence:?}, resetting the filter"
            );
            self.reseed(reading, sample);
            return Ok(TickOutcome::Reset {
                position: reading.position,
            });
        }

        self.state = TrackingState::Tracking;

        let transition = self.config.state_transition();
        let control = Matrix2::identity();
        let scale = self.config.heading_to_position_scale;
        filter.predict(
            &transition,
            &self.samples.control_input(0, scale),
            &control,
        );

        let last = match self.last_vision {
            Some(last) if reading.timestamp > last.timestamp => last,
            _ => return Ok(TickOutcome::Predicted),
        };

        // Apply the measurement where it was captured, then bring it back to the present.
        let replayed = filter.rollback(latency);
        let rate = (reading.position - last.position) / (reading.timestamp - last.timestamp);
        filter.update(&Vector2::new(reading.position, rate), &Matrix2::identity())?;
        for step in 0..replayed {
            let back = replayed - 1 - step;
            filter.predict(
                &transition,
                &self.samples.control_input(back, scale),
                &control,
            );
        }

        log::debug!("Fused vision reading {latency} ticks old, replayed {replayed} steps");
        self.last_vision = Some(reading);
        Ok(TickOutcome::Fused { latency, replayed })
    }

    /// Keeps the snapshot stack aligned with the heading samples on a tick without a
    /// prediction, so a later rollback by `n` ticks lands on the estimate held `n` ticks ago.
    fn hold(&mut self) {
        if let Some(filter) = self.filter.as_mut() {
            filter.hold();
        }
    }

    /// Number of whole ticks elapsed since `captured`; unrepresentable ages count as
    /// infinitely stale.
    fn latency_ticks(&self, now: T, captured: T) -> usize {
        let ticks = FloatCore::floor((now - captured) / self.config.tick_period);
        if !FloatCore::is_finite(ticks) {
            return usize::MAX;
        }
        FloatCore::max(ticks, T::zero())
            .to_usize()
            .unwrap_or(usize::MAX)
    }

    fn reseed(&mut self, reading: VisionReading<T>, sample: AngularSample<T>) {
        log::info!("Seeding vision filter at position {:?}", reading.position);
        self.filter = Some(LateralKalmanFilter::new(
            Vector2::new(reading.position, T::zero()),
            self.config.initial_covariance(),
            self.config.process_noise(),
            self.config.measurement_noise(),
        ));
        self.samples.reset_to(sample);
        self.last_vision = Some(reading);
        self.state = TrackingState::Tracking;
    }
}

impl<T, V, H, const DEPTH: usize, const SAMPLES: usize> VisionFilter<T, V, H, DEPTH, SAMPLES>
where
    T: Scalar,
{
    /// Gets the tracking state.
    #[inline]
    pub fn tracking_state(&self) -> TrackingState {
        self.state
    }

    /// Gets the configuration the filter was built with.
    #[inline]
    pub fn config(&self) -> &VisionFilterConfig<T> {
        &self.config
    }

    /// Gets a copy of the current estimate, or `None` before the first vision reading.
    pub fn estimate(&self) -> Option<Estimate<T>> {
        let state = self.filter.as_ref()?.state();
        Some(Estimate::new(state.x, state.y, self.bearing_of(state.x)))
    }

    /// Obtains the estimated lateral offset of the target, in vision units.
    pub fn position(&self) -> Option<T> {
        self.filter.as_ref().map(|filter| filter.state().x)
    }

    /// Obtains the estimated rate of change of the lateral offset, in vision units per second.
    pub fn rate(&self) -> Option<T> {
        self.filter.as_ref().map(|filter| filter.state().y)
    }

    /// Obtains the steering bearing to the target, in radians.
    ///
    /// A target right of center (positive position) yields a negative bearing.
    pub fn bearing(&self) -> Option<T> {
        self.position().map(|position| self.bearing_of(position))
    }

    /// Gets a copy of the estimate covariance.
    pub fn covariance(&self) -> Option<Matrix2<T>> {
        self.filter.as_ref().map(|filter| filter.covariance())
    }

    /// Obtains the estimation variance (uncertainty) of the position, in vision units².
    ///
    /// ## Interpretation
    /// - Low Variance: Indicates high certainty in the estimate. The state estimate is
    ///   considered to be precise, as it doesn't vary much from the mean.
    /// - High Variance: Indicates high uncertainty in the estimate. The state estimate is
    ///   considered to be less precise, as it has a wide spread around the mean.
    pub fn position_variance(&self) -> Option<T> {
        self.covariance().map(|p| p.m11)
    }

    /// Obtains the estimation variance (uncertainty) of the rate.
    pub fn rate_variance(&self) -> Option<T> {
        self.covariance().map(|p| p.m22)
    }

    /// Obtains the covariance between the position and rate estimates.
    pub fn position_rate_covariance(&self) -> Option<T> {
        self.covariance().map(|p| p.m12)
    }

    fn bearing_of(&self, position: T) -> T {
        let two = T::one() + T::one();
        -(position * (self.config.horizontal_fov / two))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::cell::Cell;

    /// An exactly representable tick period keeps the latency arithmetic free of rounding.
    const DT: f64 = 1.0 / 32.0;

    type TestFilter<'a> = VisionFilter<
        f64,
        &'a Cell<Option<VisionReading<f64>>>,
        &'a Cell<AngularSample<f64>>,
    >;

    fn config() -> VisionFilterConfig<f64> {
        VisionFilterConfig {
            tick_period: DT,
            ..Default::default()
        }
    }

    fn at(tick: u32) -> f64 {
        tick as f64 * DT
    }

    fn sensors(
        reading: Option<VisionReading<f64>>,
    ) -> (Cell<Option<VisionReading<f64>>>, Cell<AngularSample<f64>>) {
        (Cell::new(reading), Cell::new(AngularSample::new(0.0, 0.0)))
    }

    #[test]
    fn test_uninitialized_without_vision() {
        let (vision, heading) = sensors(None);
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();

        assert_eq!(filter.tracking_state(), TrackingState::Uninitialized);
        assert_eq!(filter.estimate(), None);
        assert_eq!(filter.tick(at(1)).unwrap(), TickOutcome::NoVision);
        assert_eq!(filter.position(), None);

        // The first valid reading seeds the filter.
        vision.set(Some(VisionReading::new(0.3, at(1))));
        assert_eq!(
            filter.tick(at(2)).unwrap(),
            TickOutcome::Reset { position: 0.3 }
        );
        assert_eq!(filter.tracking_state(), TrackingState::Tracking);
        assert_eq!(filter.position(), Some(0.3));
        assert_eq!(filter.rate(), Some(0.0));
    }

    #[test]
    fn test_rejects_insufficient_history_depth() {
        let (vision, heading) = sensors(None);
        let result = VisionFilter::<f64, _, _, 8>::new(config(), &vision, &heading);
        assert!(matches!(
            result,
            Err(Error::InsufficientHistoryDepth { required: 11, .. })
        ));
    }

    #[test]
    fn test_holds_position_without_new_vision() {
        let (vision, heading) = sensors(Some(VisionReading::new(1.0, at(0))));
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();
        assert_eq!(filter.position(), Some(1.0));

        for tick in 1..=10 {
            assert_eq!(filter.tick(at(tick)).unwrap(), TickOutcome::Predicted);
        }

        assert_relative_eq!(filter.position().unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(filter.rate().unwrap(), 0.0, epsilon = 1e-12);
        assert_eq!(filter.tracking_state(), TrackingState::Tracking);

        // Uncertainty grows without measurements.
        assert!(filter.position_variance().unwrap() > 0.0005);
    }

    #[test]
    fn test_resets_on_divergence() {
        let (vision, heading) = sensors(Some(VisionReading::new(0.0, at(0))));
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();
        filter.tick(at(1)).unwrap();
        filter.tick(at(2)).unwrap();

        vision.set(Some(VisionReading::new(5.0, at(2))));
        assert_eq!(
            filter.tick(at(3)).unwrap(),
            TickOutcome::Reset { position: 5.0 }
        );

        assert_eq!(filter.position(), Some(5.0));
        assert_eq!(filter.rate(), Some(0.0));
        assert_eq!(filter.covariance(), Some(config().initial_covariance()));
        assert_eq!(filter.tracking_state(), TrackingState::Tracking);

        // The seeding reading is not fused a second time.
        assert_eq!(filter.tick(at(4)).unwrap(), TickOutcome::Predicted);
        assert_eq!(filter.position(), Some(5.0));
    }

    #[test]
    fn test_skips_stale_vision() {
        let (vision, heading) = sensors(Some(VisionReading::new(0.5, at(0))));
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();
        filter.tick(at(1)).unwrap();
        let before = filter.estimate();
        let covariance = filter.covariance();

        heading.set(AngularSample::new(0.2, 0.0));
        assert_eq!(
            filter.tick(at(12)).unwrap(),
            TickOutcome::Stale { latency: 12 }
        );
        assert_eq!(filter.estimate(), before);
        assert_eq!(filter.covariance(), covariance);
        assert_eq!(filter.tracking_state(), TrackingState::Stale);

        // Fresh data brings the filter back.
        vision.set(Some(VisionReading::new(0.5, at(12))));
        assert!(matches!(
            filter.tick(at(13)).unwrap(),
            TickOutcome::Fused { latency: 1, .. }
        ));
        assert_eq!(filter.tracking_state(), TrackingState::Tracking);
    }

    #[test]
    fn test_fuses_against_estimate_held_while_stale() {
        const STEP: f64 = 1.0 / 64.0;
        let config = config();
        let scale = config.heading_to_position_scale;

        let (vision, heading) = sensors(Some(VisionReading::new(0.0, at(0))));
        let mut filter: TestFilter = VisionFilter::new(config, &vision, &heading).unwrap();

        // The platform turns during the last ticks before the reading goes stale.
        for tick in 1..=10u32 {
            let turned = tick.saturating_sub(7) as f64;
            heading.set(AngularSample::new(STEP * turned, 0.0));
            assert_eq!(filter.tick(at(tick)).unwrap(), TickOutcome::Predicted);
        }
        for tick in 11..=30 {
            assert!(matches!(
                filter.tick(at(tick)).unwrap(),
                TickOutcome::Stale { .. }
            ));
        }
        let held = filter.position().unwrap();

        // A frame captured two ticks ago, agreeing with the held estimate.
        vision.set(Some(VisionReading::new(held, at(29))));
        assert_eq!(
            filter.tick(at(31)).unwrap(),
            TickOutcome::Fused {
                latency: 2,
                replayed: 2
            }
        );

        let mut reference: LateralKalmanFilter<f64> = LateralKalmanFilter::new(
            Vector2::zero(),
            config.initial_covariance(),
            config.process_noise(),
            config.measurement_noise(),
        );
        let transition = config.state_transition();
        for tick in 1..=10 {
            let input = if tick > 7 {
                Vector2::new(STEP, 0.0) * scale
            } else {
                Vector2::zero()
            };
            reference.predict(&transition, &input, &Matrix2::identity());
        }
        let rate = held / at(29);
        reference
            .update(&Vector2::new(held, rate), &Matrix2::identity())
            .unwrap();
        for _ in 0..2 {
            reference.predict(&transition, &Vector2::zero(), &Matrix2::identity());
        }

        let expected = reference.state();
        let estimate = filter.estimate().unwrap();
        assert_relative_eq!(estimate.position, expected.x, epsilon = 1e-12);
        assert_relative_eq!(estimate.rate, expected.y, epsilon = 1e-12);

        let expected = reference.covariance();
        let covariance = filter.covariance().unwrap();
        assert_relative_eq!(covariance.m11, expected.m11, epsilon = 1e-12);
        assert_relative_eq!(covariance.m22, expected.m22, epsilon = 1e-12);
    }

    #[test]
    fn test_vision_ahead_of_clock_counts_as_fresh() {
        let (vision, heading) = sensors(Some(VisionReading::new(0.0, at(0))));
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();
        filter.tick(at(1)).unwrap();

        vision.set(Some(VisionReading::new(0.01, at(5))));
        assert_eq!(
            filter.tick(at(3)).unwrap(),
            TickOutcome::Fused {
                latency: 0,
                replayed: 0
            }
        );
        assert_eq!(filter.tracking_state(), TrackingState::Tracking);
    }

    #[test]
    fn test_non_finite_timestamp_is_stale() {
        let (vision, heading) = sensors(Some(VisionReading::new(0.0, at(0))));
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();
        filter.tick(at(1)).unwrap();
        let before = filter.estimate();

        vision.set(Some(VisionReading::new(0.0, f64::NAN)));
        assert_eq!(
            filter.tick(at(2)).unwrap(),
            TickOutcome::Stale {
                latency: usize::MAX
            }
        );
        assert_eq!(filter.tracking_state(), TrackingState::Stale);
        assert_eq!(filter.estimate(), before);
    }

    #[test]
    fn test_f32_on_a_session_clock() {
        let config = VisionFilterConfig::<f32> {
            tick_period: 0.25,
            ..Default::default()
        };
        let vision = Cell::new(Some(VisionReading::new(0.0_f32, 0.0)));
        let heading = Cell::new(AngularSample::new(0.0_f32, 0.0));
        let mut filter: VisionFilter<f32, _, _> =
            VisionFilter::new(config, &vision, &heading).unwrap();

        for tick in 1..=4 {
            filter.tick(tick as f32 * 0.25).unwrap();
        }
        vision.set(Some(VisionReading::new(0.02, 0.5)));
        assert_eq!(
            filter.tick(1.25).unwrap(),
            TickOutcome::Fused {
                latency: 3,
                replayed: 3
            }
        );
        assert!(filter.position().unwrap() > 0.0);
    }

    #[test]
    fn test_stale_threshold_is_inclusive() {
        let (vision, heading) = sensors(Some(VisionReading::new(0.5, at(0))));
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();

        assert_eq!(filter.tick(at(10)).unwrap(), TickOutcome::Predicted);
        assert_eq!(
            filter.tick(at(11)).unwrap(),
            TickOutcome::Stale { latency: 11 }
        );
    }

    #[test]
    fn test_heading_change_moves_estimate() {
        let (vision, heading) = sensors(Some(VisionReading::new(0.0, at(0))));
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();
        let scale = config().heading_to_position_scale;

        for tick in 1..=5 {
            heading.set(AngularSample::new(0.01 * tick as f64, 0.0));
            filter.tick(at(tick)).unwrap();
        }

        assert_relative_eq!(filter.position().unwrap(), 0.05 * scale, epsilon = 1e-9);
    }

    #[test]
    fn test_fuses_delayed_vision() {
        let (vision, heading) = sensors(Some(VisionReading::new(0.0, at(0))));
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();
        for tick in 1..=4 {
            filter.tick(at(tick)).unwrap();
        }

        // A frame captured three ticks ago.
        vision.set(Some(VisionReading::new(0.05, at(2))));
        assert_eq!(
            filter.tick(at(5)).unwrap(),
            TickOutcome::Fused {
                latency: 3,
                replayed: 3
            }
        );

        let estimate = filter.estimate().unwrap();
        assert!(estimate.position > 0.0 && estimate.position < 0.1);
        assert!(estimate.rate > 0.0);

        // The same reading is not fused twice.
        assert_eq!(filter.tick(at(6)).unwrap(), TickOutcome::Predicted);
    }

    #[test]
    fn test_latency_compensation_tracks_moving_target() {
        const DELAY: u32 = 3;
        let speed = 0.2;
        let truth = |tick: u32| 0.1 + speed * at(tick);

        let (vision, heading) = sensors(Some(VisionReading::new(truth(0), at(0))));
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();

        for tick in 1..=320 {
            // A new frame every third tick, arriving `DELAY` ticks after capture.
            if tick >= DELAY && tick % 3 == 0 {
                let captured = tick - DELAY;
                vision.set(Some(VisionReading::new(truth(captured), at(captured))));
            }
            filter.tick(at(tick)).unwrap();
        }

        let now = 320;
        let lag_error = truth(now) - truth(now - DELAY);
        let error = FloatCore::abs(filter.position().unwrap() - truth(now));
        assert!(error < lag_error / 4.0, "error {error} vs. lag {lag_error}");
        assert_relative_eq!(filter.rate().unwrap(), speed, epsilon = 0.02);
    }

    #[test]
    fn test_rollback_is_clamped_after_reset() {
        let (vision, heading) = sensors(Some(VisionReading::new(0.0, at(0))));
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();
        filter.tick(at(1)).unwrap();

        // Captured five ticks before now, but only two predictions have happened since seeding.
        vision.set(Some(VisionReading::new(0.01, at(1))));
        assert_eq!(
            filter.tick(at(6)).unwrap(),
            TickOutcome::Fused {
                latency: 5,
                replayed: 2
            }
        );
    }

    #[test]
    fn test_bearing() {
        let (vision, heading) = sensors(Some(VisionReading::new(0.1, at(0))));
        let filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();
        let fov = config().horizontal_fov;

        assert_relative_eq!(filter.bearing().unwrap(), -0.1 * fov / 2.0, epsilon = 1e-12);
        assert_eq!(
            filter.estimate().unwrap().bearing,
            filter.bearing().unwrap()
        );
    }

    #[test]
    fn test_on_enable_reseeds() {
        let (vision, heading) = sensors(Some(VisionReading::new(0.0, at(0))));
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();
        filter.tick(at(1)).unwrap();

        vision.set(Some(VisionReading::new(0.15, at(1))));
        assert!(filter.on_enable());
        assert_eq!(filter.position(), Some(0.15));
        assert_eq!(filter.rate(), Some(0.0));

        vision.set(None);
        assert!(!filter.on_enable());
        assert_eq!(filter.tracking_state(), TrackingState::Uninitialized);
        assert_eq!(filter.estimate(), None);
    }

    #[test]
    fn test_estimate_is_a_copy() {
        let (vision, heading) = sensors(Some(VisionReading::new(0.1, at(0))));
        let mut filter: TestFilter = VisionFilter::new(config(), &vision, &heading).unwrap();

        let mut estimate = filter.estimate().unwrap();
        estimate.position = 0.9;
        let mut covariance = filter.covariance().unwrap();
        covariance.m11 = 42.0;

        assert_eq!(filter.position(), Some(0.1));
        assert_eq!(filter.position_variance(), Some(0.0005));
        assert_eq!(filter.position_rate_covariance(), Some(0.0));
        assert_eq!(filter.rate_variance(), Some(0.01));
        assert_eq!(filter.tick(at(1)).unwrap(), TickOutcome::Predicted);
    }
}
