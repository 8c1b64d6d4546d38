pub mod orient;
pub mod pose;

pub use orient::{blend_direction, radial, rotation_to};
pub use pose::Pose;
