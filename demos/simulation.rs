use std::cell::Cell;
use std::collections::VecDeque;
use std::error::Error;
use std::io;

use serde::Serialize;

use vision_filter::{AngularSample, TickOutcome, VisionFilter, VisionFilterConfig, VisionReading};

/// Number of ticks to simulate.
const TICKS: u32 = 1500;

/// Ticks between captured frames.
const FRAME_INTERVAL: u32 = 3;

/// Ticks between capturing a frame and its report reaching the filter.
const VISION_DELAY: u32 = 4;

/// One row of the output table.
#[derive(Debug, Serialize)]
struct Row {
    time: f64,
    heading: f64,
    true_position: f64,
    reported_position: Option<f64>,
    estimated_position: Option<f64>,
    estimated_rate: Option<f64>,
    bearing: Option<f64>,
    position_variance: Option<f64>,
    outcome: &'static str,
}

/// A tiny deterministic noise source so runs are reproducible.
struct Noise(u64);

impl Noise {
    fn next(&mut self, amplitude: f64) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let unit = (self.0 >> 11) as f64 / (1u64 << 53) as f64;
        (unit * 2.0 - 1.0) * amplitude
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = VisionFilterConfig::<f64>::default();
    let dt = config.tick_period;
    let scale = config.heading_to_position_scale;

    // The target drifts slowly while the platform sways left and right; in the camera frame
    // the heading change adds directly to the target's apparent offset.
    let heading_at = |t: f64| 0.15 * (0.8 * t).sin();
    let heading_rate_at = |t: f64| 0.12 * (0.8 * t).cos();
    let target_at = |t: f64| 0.1 + 0.05 * (0.3 * t).sin();
    let position_at = |t: f64| target_at(t) + scale * heading_at(t);

    let vision: Cell<Option<VisionReading<f64>>> = Cell::new(None);
    let heading = Cell::new(AngularSample::new(heading_at(0.0), heading_rate_at(0.0)));
    let mut filter = VisionFilter::<f64, _, _>::new(config, &vision, &heading)?;

    let mut noise = Noise(0x5eed);
    let mut in_flight = VecDeque::new();
    let mut writer = csv::Writer::from_writer(io::stdout());

    for tick in 0..TICKS {
        let now = tick as f64 * dt;

        if tick % FRAME_INTERVAL == 0 {
            let reading = VisionReading::new(position_at(now) + noise.next(0.02), now);
            in_flight.push_back((tick + VISION_DELAY, reading));
        }
        while let Some(&(arrival, reading)) = in_flight.front() {
            if arrival > tick {
                break;
            }
            vision.set(Some(reading));
            in_flight.pop_front();
        }

        heading.set(AngularSample::new(heading_at(now), heading_rate_at(now)));
        let outcome = filter.tick(now)?;

        let estimate = filter.estimate();
        writer.serialize(Row {
            time: now,
            heading: heading_at(now),
            true_position: position_at(now),
            reported_position: vision.get().map(|reading| reading.position),
            estimated_position: estimate.map(|e| e.position),
            estimated_rate: estimate.map(|e| e.rate),
            bearing: estimate.map(|e| e.bearing),
            position_variance: filter.position_variance(),
            outcome: outcome_name(&outcome),
        })?;
    }

    writer.flush()?;
    Ok(())
}

fn outcome_name(outcome: &TickOutcome<f64>) -> &'static str {
    match outcome {
        TickOutcome::NoVision => "no-vision",
        TickOutcome::Stale { .. } => "stale",
        TickOutcome::Reset { .. } => "reset",
        TickOutcome::Predicted => "predicted",
        TickOutcome::Fused { .. } => "fused",
    }
}
