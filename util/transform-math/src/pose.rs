use bevy::math::{Mat4, Quat, Vec3};

/// A rigid transform with a per-axis scale.
///
/// Matrices produced from a pose are column-major with the translation in the
/// fourth column (flat elements 12, 13 and 14), and compose as `T * R * S`.
/// Anything that stores or reads these matrices as flat floats relies on that layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
	pub translation: Vec3,
	pub rotation: Quat,
	pub scale: Vec3,
}

impl Default for Pose {
	fn default() -> Self {
		Self::IDENTITY
	}
}

impl Pose {
	pub const IDENTITY: Self =
		Self { translation: Vec3::ZERO, rotation: Quat::IDENTITY, scale: Vec3::ONE };

	pub fn from_translation(translation: Vec3) -> Self {
		Self { translation, ..Self::IDENTITY }
	}

	pub fn from_rotation(rotation: Quat) -> Self {
		Self { rotation, ..Self::IDENTITY }
	}

	pub fn with_translation(mut self, translation: Vec3) -> Self {
		self.translation = translation;
		self
	}

	pub fn with_rotation(mut self, rotation: Quat) -> Self {
		self.rotation = rotation;
		self
	}

	pub fn with_scale(mut self, scale: Vec3) -> Self {
		self.scale = scale;
		self
	}

	pub fn to_matrix(&self) -> Mat4 {
		Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
	}

	/// Expresses `child` (given relative to this pose) in this pose's parent frame.
	pub fn compose(&self, child: &Pose) -> Mat4 {
		self.to_matrix() * child.to_matrix()
	}

	/// Maps a point from this pose's local frame into its parent frame.
	pub fn transform_point(&self, point: Vec3) -> Vec3 {
		self.translation + self.rotation * (self.scale * point)
	}
}
