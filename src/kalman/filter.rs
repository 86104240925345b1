use minikalman::buffers::types::*;
use minikalman::prelude::*;
use minikalman::regular::{ControlBuilder, RegularKalmanBuilder, RegularObservationBuilder};
use num_traits::float::FloatCore;

use crate::error::Error;
use crate::history::BoundedHistory;
use crate::kalman::types::*;
use crate::types::{Matrix2, Vector2};
use crate::Scalar;

/// A linear Kalman filter of lateral position and rate that keeps a bounded stack of past
/// estimates, so a delayed measurement can be applied at the time it was captured.
///
/// Every [`predict`](Self::predict) or [`hold`](Self::hold) records a [`HistoryEntry`];
/// [`rollback`](Self::rollback) rewinds to one of them.
pub struct LateralKalmanFilter<T, const DEPTH: usize = DEFAULT_HISTORY_DEPTH> {
    filter: OwnedKalmanFilter<T>,
    control: OwnedControlInput<T>,
    measurement: OwnedObservation<T>,
    /// A copy of the measurement noise, used to check the innovation covariance.
    measurement_noise: Matrix2<T>,
    history: BoundedHistory<HistoryEntry<T>, DEPTH>,
}

impl<T, const DEPTH: usize> LateralKalmanFilter<T, DEPTH> {
    /// Initializes a new instance of the [`LateralKalmanFilter`] struct.
    ///
    /// The initial estimate is recorded as the oldest history entry.
    ///
    /// ## Arguments
    /// * `state` - The initial state estimate `[position, rate]`.
    /// * `covariance` - The initial estimate covariance `P`.
    /// * `process_noise` - The process noise covariance `Q`, added on every prediction.
    /// * `measurement_noise` - The measurement noise covariance `R`.
    pub fn new(
        state: Vector2<T>,
        covariance: Matrix2<T>,
        process_noise: Matrix2<T>,
        measurement_noise: Matrix2<T>,
    ) -> Self
    where
        T: Scalar,
    {
        let filter = Self::build_filter(&state, &covariance, &process_noise);
        let control = Self::build_control();
        let measurement = Self::build_measurement(&measurement_noise);

        let mut history = BoundedHistory::new();
        history.push(HistoryEntry::new(state, covariance));

        Self {
            filter,
            control,
            measurement,
            measurement_noise,
            history,
        }
    }
}

impl<T, const DEPTH: usize> LateralKalmanFilter<T, DEPTH> {
    /// Gets a copy of the current state estimate `[position, rate]`.
    pub fn state(&self) -> Vector2<T>
    where
        T: Copy,
    {
        let state = self.filter.state_vector();
        Vector2::new(state.get_row(0), state.get_row(1))
    }

    /// Gets a copy of the current estimate covariance.
    pub fn covariance(&self) -> Matrix2<T>
    where
        T: Copy,
    {
        let p = self.filter.estimate_covariance();
        Matrix2::new(
            p.get_at(0, 0),
            p.get_at(0, 1),
            p.get_at(1, 0),
            p.get_at(1, 1),
        )
    }

    /// The number of snapshots currently available for rolling back.
    #[inline]
    pub const fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The maximum number of snapshots kept.
    #[inline]
    pub const fn history_capacity(&self) -> usize {
        DEPTH
    }

    /// Gets the snapshot recorded `back` predictions ago.
    #[inline]
    pub fn history_entry(&self, back: usize) -> Option<HistoryEntry<T>>
    where
        T: Copy,
    {
        self.history.newest(back).copied()
    }
}

impl<T, const DEPTH: usize> LateralKalmanFilter<T, DEPTH> {
    /// Performs a prediction step, `x ← F·x + B·u` and `P ← F·P·Fᵀ + Q`, and records the
    /// result in the history.
    ///
    /// ## Arguments
    /// * `transition` - The state transition matrix `F`.
    /// * `input` - The control input `u`.
    /// * `control` - The control matrix `B`.
    pub fn predict(&mut self, transition: &Matrix2<T>, input: &Vector2<T>, control: &Matrix2<T>)
    where
        T: Scalar,
    {
        self.filter.state_transition_mut().apply(|mat| {
            mat.set_at(0, 0, transition.m11);
            mat.set_at(0, 1, transition.m12);
            mat.set_at(1, 0, transition.m21);
            mat.set_at(1, 1, transition.m22);
        });

        self.control.control_matrix_mut().apply(|mat| {
            mat.set_at(0, 0, control.m11);
            mat.set_at(0, 1, control.m12);
            mat.set_at(1, 0, control.m21);
            mat.set_at(1, 1, control.m22);
        });

        self.control.control_vector_mut().apply(|vec| {
            vec.set_row(0, input.x);
            vec.set_row(1, input.y);
        });

        // Regular prediction, then the control input on top of it.
        self.filter.predict();
        self.filter.control(&mut self.control);
        self.repair_covariance();

        self.history.push(self.snapshot());
    }

    /// Performs a correction step with measurement `z` observed through `H`.
    ///
    /// The newest history entry is replaced by the corrected estimate so that a later
    /// rollback to this point keeps the measurement.
    ///
    /// ## Errors
    /// Returns [`Error::SingularInnovationCovariance`] if `H·P·Hᵀ + R` cannot be inverted;
    /// the estimate is left untouched in that case.
    pub fn update(
        &mut self,
        measurement: &Vector2<T>,
        observation: &Matrix2<T>,
    ) -> Result<(), Error>
    where
        T: Scalar,
    {
        let innovation_covariance =
            observation.congruence(&self.covariance()) + self.measurement_noise;
        if innovation_covariance.try_inverse().is_none() {
            let determinant = innovation_covariance.determinant();
            return Err(Error::SingularInnovationCovariance {
                determinant: determinant.to_f64().unwrap_or(f64::NAN),
            });
        }

        self.measurement.observation_matrix_mut().apply(|mat| {
            mat.set_at(0, 0, observation.m11);
            mat.set_at(0, 1, observation.m12);
            mat.set_at(1, 0, observation.m21);
            mat.set_at(1, 1, observation.m22);
        });

        self.measurement.measurement_vector_mut().apply(|vec| {
            vec.set_row(0, measurement.x);
            vec.set_row(1, measurement.y);
        });

        self.filter.correct(&mut self.measurement);
        self.repair_covariance();

        let snapshot = self.snapshot();
        if let Some(newest) = self.history.newest_mut(0) {
            *newest = snapshot;
        }

        Ok(())
    }

    /// Records the unchanged estimate as the snapshot of a tick on which no prediction ran,
    /// so that snapshots stay one per tick.
    pub fn hold(&mut self)
    where
        T: Copy,
    {
        self.history.push(self.snapshot());
    }

    /// Discards the `steps` most recent snapshots and restores the estimate to the one
    /// preceding them, i.e. the estimate as of `steps` ticks ago.
    ///
    /// Requests deeper than the recorded history are clamped to the oldest snapshot and
    /// logged. Returns the number of steps actually rolled back.
    pub fn rollback(&mut self, steps: usize) -> usize
    where
        T: Scalar,
    {
        let available = self.history.len().saturating_sub(1);
        let steps = if steps > available {
            log::warn!(
                "Requested rollback of {steps} steps exceeds recorded history, clamping to {available}"
            );
            available
        } else {
            steps
        };

        self.history.drop_newest(steps);
        if let Some(entry) = self.history.newest(0).copied() {
            self.restore(&entry);
        }

        steps
    }

    /// Takes a snapshot of the current estimate.
    fn snapshot(&self) -> HistoryEntry<T>
    where
        T: Copy,
    {
        HistoryEntry::new(self.state(), self.covariance())
    }

    /// Overwrites the current estimate from a snapshot.
    fn restore(&mut self, entry: &HistoryEntry<T>)
    where
        T: Scalar,
    {
        self.filter.state_vector_mut().apply(|vec| {
            vec.set_row(0, entry.state.x);
            vec.set_row(1, entry.state.y);
        });
        self.write_covariance(&entry.covariance);
    }

    /// Keeps the estimate covariance symmetric with a non-negative diagonal.
    fn repair_covariance(&mut self)
    where
        T: Scalar,
    {
        let p = self.covariance();
        let mut repaired = p.symmetrized();

        if repaired.m11 < T::zero() || repaired.m22 < T::zero() {
            log::warn!("Clamping negative estimate variance in {p:?}");
            repaired.m11 = FloatCore::max(repaired.m11, T::zero());
            repaired.m22 = FloatCore::max(repaired.m22, T::zero());
        }

        if repaired != p {
            self.write_covariance(&repaired);
        }
    }

    fn write_covariance(&mut self, covariance: &Matrix2<T>)
    where
        T: Scalar,
    {
        self.filter.estimate_covariance_mut().apply(|mat| {
            mat.set_at(0, 0, covariance.m11);
            mat.set_at(0, 1, covariance.m12);
            mat.set_at(1, 0, covariance.m21);
            mat.set_at(1, 1, covariance.m22);
        });
    }
}

impl<T, const DEPTH: usize> LateralKalmanFilter<T, DEPTH> {
    /// Builds the Kalman filter used for prediction.
    fn build_filter(
        state: &Vector2<T>,
        covariance: &Matrix2<T>,
        process_noise_value: &Matrix2<T>,
    ) -> OwnedKalmanFilter<T>
    where
        T: Scalar,
    {
        let zero = T::default();

        // State vector.
        let mut state_vec =
            StateVectorBuffer::<STATES, T, _>::new(MatrixData::new_array::<STATES, 1, STATES, T>(
                [zero; STATES],
            ));
        state_vec.apply(|vec| {
            vec.set_row(0, state.x);
            vec.set_row(1, state.y);
        });

        // State transition matrix; set on every prediction.
        let mut state_transition =
            StateTransitionMatrixMutBuffer::<STATES, T, _>::new(MatrixData::new_array::<
                STATES,
                STATES,
                { STATES * STATES },
                T,
            >(
                [zero; { STATES * STATES }]
            ));
        state_transition.make_identity();

        // Estimate covariance matrix.
        let mut estimate_covariance =
            EstimateCovarianceMatrixBuffer::<STATES, T, _>::new(MatrixData::new_array::<
                STATES,
                STATES,
                { STATES * STATES },
                T,
            >(
                [zero; { STATES * STATES }]
            ));
        estimate_covariance.apply(|mat| {
            mat.set_at(0, 0, covariance.m11);
            mat.set_at(0, 1, covariance.m12);
            mat.set_at(1, 0, covariance.m21);
            mat.set_at(1, 1, covariance.m22);
        });

        // Process noise matrix.
        let mut process_noise = DirectProcessNoiseCovarianceMatrixMutBuffer::<STATES, T, _>::new(
            MatrixData::new_array::<STATES, STATES, { STATES * STATES }, T>(
                [zero; { STATES * STATES }],
            ),
        );
        process_noise.apply(|mat| {
            mat.set_at(0, 0, process_noise_value.m11);
            mat.set_at(0, 1, process_noise_value.m12);
            mat.set_at(1, 0, process_noise_value.m21);
            mat.set_at(1, 1, process_noise_value.m22);
        });

        // Predicted state vector.
        let predicted_state =
            PredictedStateEstimateVectorBuffer::<STATES, T, _>::new(MatrixData::new_array::<
                STATES,
                1,
                STATES,
                T,
            >([zero; STATES]));

        // Temporary estimate covariance matrix.
        let temp_state_matrix =
            TemporaryStateMatrixBuffer::<STATES, T, _>::new(MatrixData::new_array::<
                STATES,
                STATES,
                { STATES * STATES },
                T,
            >(
                [zero; { STATES * STATES }]
            ));

        RegularKalmanBuilder::new::<STATES, T>(
            state_transition,
            state_vec,
            estimate_covariance,
            process_noise,
            predicted_state,
            temp_state_matrix,
        )
    }

    /// Builds the control input; the heading change enters without extra process noise,
    /// which is already accounted for by `Q`.
    fn build_control() -> OwnedControlInput<T>
    where
        T: Scalar,
    {
        let zero = T::default();

        // Control vector.
        let control_vector = ControlVectorBuffer::<CONTROLS, T, _>::new(MatrixData::new_array::<
            CONTROLS,
            1,
            CONTROLS,
            T,
        >([zero; CONTROLS]));

        // Control matrix; set on every prediction.
        let mut control_matrix =
            ControlMatrixMutBuffer::<STATES, CONTROLS, T, _>::new(MatrixData::new_array::<
                STATES,
                CONTROLS,
                { STATES * CONTROLS },
                T,
            >(
                [zero; STATES * CONTROLS]
            ));
        control_matrix.apply(|mat| {
            mat.set_at(0, 0, T::one());
            mat.set_at(1, 1, T::one());
        });

        // Control process noise matrix.
        let process_noise = ControlProcessNoiseCovarianceMatrixMutBuffer::<CONTROLS, T, _>::new(
            MatrixData::new_array::<CONTROLS, CONTROLS, { CONTROLS * CONTROLS }, T>(
                [zero; CONTROLS * CONTROLS],
            ),
        );

        // Temporary matrix.
        let temp = TemporaryBQMatrixBuffer::<STATES, CONTROLS, T, _>::new(MatrixData::new_array::<
            STATES,
            CONTROLS,
            { STATES * CONTROLS },
            T,
        >(
            [zero; STATES * CONTROLS],
        ));

        ControlBuilder::new::<STATES, CONTROLS, T>(
            control_matrix,
            control_vector,
            process_noise,
            temp,
        )
    }

    /// Builds the Kalman filter observation of position and rate.
    fn build_measurement(measurement_noise: &Matrix2<T>) -> OwnedObservation<T>
    where
        T: Scalar,
    {
        let zero = T::default();

        // Measurement vector
        let measurement =
            MeasurementVectorBuffer::<OBSERVATIONS, T, _>::new(MatrixData::new_array::<
                OBSERVATIONS,
                1,
                OBSERVATIONS,
                T,
            >([zero; OBSERVATIONS]));

        // Observation matrix; set on every correction.
        let mut observation_matrix =
            ObservationMatrixMutBuffer::<OBSERVATIONS, STATES, T, _>::new(MatrixData::new_array::<
                OBSERVATIONS,
                STATES,
                { OBSERVATIONS * STATES },
                T,
            >(
                [zero; { OBSERVATIONS * STATES }],
            ));
        observation_matrix.apply(|mat| {
            mat.set_at(0, 0, T::one());
            mat.set_at(1, 1, T::one());
        });

        // Measurement noise covariance
        let mut noise_covariance =
            MeasurementNoiseCovarianceMatrixBuffer::<OBSERVATIONS, T, _>::new(
                MatrixData::new_array::<
                    OBSERVATIONS,
                    OBSERVATIONS,
                    { OBSERVATIONS * OBSERVATIONS },
                    T,
                >([zero; { OBSERVATIONS * OBSERVATIONS }]),
            );
        noise_covariance.apply(|mat| {
            mat.set_at(0, 0, measurement_noise.m11);
            mat.set_at(0, 1, measurement_noise.m12);
            mat.set_at(1, 0, measurement_noise.m21);
            mat.set_at(1, 1, measurement_noise.m22);
        });

        // Innovation vector
        let innovation_vector =
            InnovationVectorBuffer::<OBSERVATIONS, T, _>::new(MatrixData::new_array::<
                OBSERVATIONS,
                1,
                OBSERVATIONS,
                T,
            >([zero; OBSERVATIONS]));

        // Innovation covariance matrix
        let innovation_covariance =
            InnovationCovarianceMatrixBuffer::<OBSERVATIONS, T, _>::new(MatrixData::new_array::<
                OBSERVATIONS,
                OBSERVATIONS,
                { OBSERVATIONS * OBSERVATIONS },
                T,
            >(
                [zero; { OBSERVATIONS * OBSERVATIONS }],
            ));

        // Kalman Gain matrix
        let kalman_gain =
            KalmanGainMatrixBuffer::<STATES, OBSERVATIONS, T, _>::new(MatrixData::new_array::<
                STATES,
                OBSERVATIONS,
                { STATES * OBSERVATIONS },
                T,
            >(
                [zero; { STATES * OBSERVATIONS }],
            ));

        // Temporary residual covariance inverted matrix
        let temp_sinv = TemporaryResidualCovarianceInvertedMatrixBuffer::<OBSERVATIONS, T, _>::new(
            MatrixData::new_array::<OBSERVATIONS, OBSERVATIONS, { OBSERVATIONS * OBSERVATIONS }, T>(
                [zero; { OBSERVATIONS * OBSERVATIONS }],
            ),
        );

        // Temporary H×P matrix
        let temp_hp =
            TemporaryHPMatrixBuffer::<OBSERVATIONS, STATES, T, _>::new(MatrixData::new_array::<
                OBSERVATIONS,
                STATES,
                { OBSERVATIONS * STATES },
                T,
            >(
                [zero; { OBSERVATIONS * STATES }],
            ));

        // Temporary P×Hᵀ matrix
        let temp_pht =
            TemporaryPHTMatrixBuffer::<STATES, OBSERVATIONS, T, _>::new(MatrixData::new_array::<
                STATES,
                OBSERVATIONS,
                { STATES * OBSERVATIONS },
                T,
            >(
                [zero; { STATES * OBSERVATIONS }],
            ));

        // Temporary K×(H×P) matrix
        let temp_khp = TemporaryKHPMatrixBuffer::<STATES, T, _>::new(MatrixData::new_array::<
            STATES,
            STATES,
            { STATES * STATES },
            T,
        >(
            [zero; { STATES * STATES }]
        ));

        RegularObservationBuilder::new::<STATES, OBSERVATIONS, T>(
            observation_matrix,
            measurement,
            noise_covariance,
            innovation_vector,
            innovation_covariance,
            kalman_gain,
            temp_sinv,
            temp_hp,
            temp_pht,
            temp_khp,
        )
    }
}
