mod filter;
mod types;

pub use crate::kalman::filter::LateralKalmanFilter;
pub use crate::kalman::types::{HistoryEntry, DEFAULT_HISTORY_DEPTH};
