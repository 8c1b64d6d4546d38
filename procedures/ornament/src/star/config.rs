use bevy::math::Vec3;

/// Parameters of a star generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct StarConfig {
	/// Recursion depth. A single core is always produced; spikes need at least 2.
	pub max_level: i32,
	/// Radius of the outermost level.
	pub radius: f32,
	/// Where the renderer places the whole star. Not baked into the geometry.
	pub position: Vec3,
}

impl Default for StarConfig {
	fn default() -> Self {
		Self { max_level: 3, radius: 1.0, position: Vec3::new(0.0, 10.5, 0.0) }
	}
}

impl StarConfig {
	pub fn with_max_level(mut self, max_level: i32) -> Self {
		self.max_level = max_level;
		self
	}

	pub fn with_radius(mut self, radius: f32) -> Self {
		self.radius = radius;
		self
	}

	pub fn with_position(mut self, position: Vec3) -> Self {
		self.position = position;
		self
	}
}
