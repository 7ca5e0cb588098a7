pub mod rotation;
pub mod stats;
pub mod vector;

pub use rotation::{Axis, Quaternion};
pub use stats::StatsHelper;
pub use vector::Vec3;
