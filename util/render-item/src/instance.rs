use bevy::math::{Mat4, Vec3};

/// Ordered instance transforms for a shared unit cone.
///
/// The unit cone has a base of radius 1 centered on the origin and its apex at `+Y = 1`.
/// Order is generation order and must be preserved: slot `i` of a serialized set is matrix `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceSet {
	matrices: Vec<Mat4>,
}

impl InstanceSet {
	pub fn new() -> Self {
		Self { matrices: Vec::new() }
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self { matrices: Vec::with_capacity(capacity) }
	}

	pub fn from_matrices(matrices: Vec<Mat4>) -> Self {
		Self { matrices }
	}

	pub fn push(&mut self, matrix: Mat4) {
		self.matrices.push(matrix);
	}

	pub fn len(&self) -> usize {
		self.matrices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.matrices.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Mat4> {
		self.matrices.iter()
	}

	pub fn as_slice(&self) -> &[Mat4] {
		&self.matrices
	}

	pub fn into_matrices(self) -> Vec<Mat4> {
		self.matrices
	}

	/// Compares every matrix element bit for bit.
	pub fn bit_eq(&self, other: &InstanceSet) -> bool {
		self.len() == other.len()
			&& self.matrices.iter().zip(other.matrices.iter()).all(|(a, b)| {
				a.to_cols_array()
					.iter()
					.zip(b.to_cols_array().iter())
					.all(|(x, y)| x.to_bits() == y.to_bits())
			})
	}

	/// Axis-aligned bounds of the instance origins.
	pub fn origin_bounds(&self) -> Option<(Vec3, Vec3)> {
		let mut origins = self.matrices.iter().map(|m| m.w_axis.truncate());
		let first = origins.next()?;
		Some(origins.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
	}
}

impl FromIterator<Mat4> for InstanceSet {
	fn from_iter<I: IntoIterator<Item = Mat4>>(iter: I) -> Self {
		Self { matrices: iter.into_iter().collect() }
	}
}
