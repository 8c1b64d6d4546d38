use crate::tree::config::TreeConfig;
use bevy::math::{Mat4, Quat, Vec3};
use transform_math::Pose;

/// One cone of the tree, in world space.
///
/// `scale` is `(radius_x, height, radius_z)` applied to the unit cone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
	pub position: Vec3,
	pub rotation: Quat,
	pub scale: Vec3,
	pub level: u32,
}

impl Segment {
	/// The trunk: at the origin, upright, sized from the config.
	pub fn root(config: &TreeConfig) -> Self {
		Self {
			position: Vec3::ZERO,
			rotation: Quat::IDENTITY,
			scale: Vec3::new(config.radius, config.height, config.radius),
			level: 0,
		}
	}

	pub fn pose(&self) -> Pose {
		Pose { translation: self.position, rotation: self.rotation, scale: self.scale }
	}

	pub fn to_matrix(&self) -> Mat4 {
		self.pose().to_matrix()
	}

	/// The segment's local up axis in world space.
	pub fn up(&self) -> Vec3 {
		self.rotation * Vec3::Y
	}
}
