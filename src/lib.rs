//! Latency-compensated estimation of a visually tracked target's lateral offset.
//!
//! A vision pipeline reports where the target sits in the camera frame, but only several
//! control ticks after the frame was captured. The [`VisionFilter`] keeps a short history
//! of its own estimates and of the platform heading, applies each report at the time it
//! was captured, and replays the heading changes since then, yielding a current estimate
//! of position, rate and steering bearing.

// Enable no_std mode.
#![cfg_attr(not(feature = "std"), no_std)]
// Ensure allow(unsafe_code) / forbid(unsafe_code) markers.
#![cfg_attr(feature = "unsafe", allow(unsafe_code))]
#![cfg_attr(not(feature = "unsafe"), forbid(unsafe_code))]
// Only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;
mod history;
pub mod kalman;
mod sample_history;
mod scalar;
mod sensors;
pub mod types;
mod vision_filter;

pub use crate::config::VisionFilterConfig;
pub use crate::error::Error;
pub use crate::history::BoundedHistory;
pub use crate::kalman::{HistoryEntry, LateralKalmanFilter, DEFAULT_HISTORY_DEPTH};
pub use crate::sample_history::{SampleHistory, DEFAULT_SAMPLE_CAPACITY};
pub use crate::scalar::{NormalizeAngle, Scalar};
pub use crate::sensors::{HeadingSource, VisionSource};
pub use crate::types::{AngularSample, Estimate, Matrix2, Vector2, VisionReading};
pub use crate::vision_filter::{TickOutcome, TrackingState, VisionFilter};
