use bevy::math::Vec3;
use std::sync::Arc;
use thiserror::Error;
use transform_math::Pose;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
	#[error("position array has {0} floats, which is not a multiple of 3")]
	PositionStride(usize),
	#[error("{attribute} array has {actual} floats, expected {expected}")]
	AttributeLength { attribute: &'static str, expected: usize, actual: usize },
	#[error("index array has {0} entries, which is not a multiple of 3")]
	IndexStride(usize),
	#[error("index {index} at slot {slot} is out of range for {vertex_count} vertices")]
	IndexOutOfRange { slot: usize, index: u32, vertex_count: usize },
}

/// Vertex data of one shape in its own local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
	pub positions: Vec<Vec3>,
	pub normals: Vec<Vec3>,
	/// `None` draws the positions as a flat triangle list.
	pub indices: Option<Vec<u32>>,
}

impl Geometry {
	pub fn vertex_count(&self) -> usize {
		self.positions.len()
	}

	/// Checks that normals line up with positions and that every index is in range.
	pub fn validate(&self) -> Result<(), MeshError> {
		if self.normals.len() != self.positions.len() {
			return Err(MeshError::AttributeLength {
				attribute: "normal",
				expected: self.positions.len() * 3,
				actual: self.normals.len() * 3,
			});
		}
		check_indices(self.indices.as_deref(), self.positions.len())
	}
}

/// Where a node's vertex colors come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSource {
	/// Explicit color per vertex, same length as the geometry's positions.
	/// Shared so that every placement of one shape reuses the same buffer.
	PerVertex(Arc<[Vec3]>),
	/// No vertex colors; every vertex takes the flat material color.
	Material(Vec3),
}

/// A shape placed inside a hierarchy node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMesh {
	pub geometry: Arc<Geometry>,
	/// Placement relative to the owning node's frame.
	pub pose: Pose,
	pub colors: ColorSource,
}

impl NodeMesh {
	pub fn new(geometry: Arc<Geometry>, pose: Pose, colors: ColorSource) -> Self {
		Self { geometry, pose, colors }
	}

	pub fn validate(&self) -> Result<(), MeshError> {
		self.geometry.validate()?;
		match &self.colors {
			ColorSource::PerVertex(colors) if colors.len() != self.geometry.vertex_count() => {
				Err(MeshError::AttributeLength {
					attribute: "color",
					expected: self.geometry.vertex_count() * 3,
					actual: colors.len() * 3,
				})
			}
			_ => Ok(()),
		}
	}
}

/// A whole hierarchy flattened into one set of vertex buffers.
///
/// Invariants: `positions`, `normals` and `colors` all hold `3 * vertex_count` floats
/// and every index is below `vertex_count`. The only way to build one is
/// [`MergedMesh::from_parts`] (or merging), so a held value always satisfies them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedMesh {
	pub(crate) positions: Vec<f32>,
	pub(crate) normals: Vec<f32>,
	pub(crate) colors: Vec<f32>,
	pub(crate) indices: Option<Vec<u32>>,
}

impl MergedMesh {
	pub fn from_parts(
		positions: Vec<f32>,
		normals: Vec<f32>,
		colors: Vec<f32>,
		indices: Option<Vec<u32>>,
	) -> Result<Self, MeshError> {
		if positions.len() % 3 != 0 {
			return Err(MeshError::PositionStride(positions.len()));
		}

		for (attribute, values) in [("normal", &normals), ("color", &colors)] {
			if values.len() != positions.len() {
				return Err(MeshError::AttributeLength {
					attribute,
					expected: positions.len(),
					actual: values.len(),
				});
			}
		}

		check_indices(indices.as_deref(), positions.len() / 3)?;

		Ok(Self { positions, normals, colors, indices })
	}

	pub fn positions(&self) -> &[f32] {
		&self.positions
	}

	pub fn normals(&self) -> &[f32] {
		&self.normals
	}

	pub fn colors(&self) -> &[f32] {
		&self.colors
	}

	pub fn indices(&self) -> Option<&[u32]> {
		self.indices.as_deref()
	}

	pub fn vertex_count(&self) -> usize {
		self.positions.len() / 3
	}

	pub fn triangle_count(&self) -> usize {
		match &self.indices {
			Some(indices) => indices.len() / 3,
			None => self.vertex_count() / 3,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	/// Axis-aligned bounds of all vertex positions.
	pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
		let mut points = self.positions.chunks_exact(3).map(Vec3::from_slice);
		let first = points.next()?;
		Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
	}

	pub fn into_parts(self) -> (Vec<f32>, Vec<f32>, Vec<f32>, Option<Vec<u32>>) {
		(self.positions, self.normals, self.colors, self.indices)
	}
}

fn check_indices(indices: Option<&[u32]>, vertex_count: usize) -> Result<(), MeshError> {
	let Some(indices) = indices else {
		return Ok(());
	};
	if indices.len() % 3 != 0 {
		return Err(MeshError::IndexStride(indices.len()));
	}

	match indices.iter().enumerate().find(|&(_, &index)| index as usize >= vertex_count) {
		Some((slot, &index)) => Err(MeshError::IndexOutOfRange { slot, index, vertex_count }),
		None => Ok(()),
	}
}
