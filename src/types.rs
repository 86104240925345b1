mod angular_sample;
mod estimate;
mod matrix2;
mod vector2;
mod vision_reading;

pub use crate::types::angular_sample::AngularSample;
pub use crate::types::estimate::Estimate;
pub use crate::types::matrix2::Matrix2;
pub use crate::types::vector2::Vector2;
pub use crate::types::vision_reading::VisionReading;
