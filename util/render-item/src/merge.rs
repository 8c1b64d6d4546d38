use crate::mesh::{ColorSource, MergedMesh, NodeMesh};
use bevy::math::{Mat3, Mat4, Vec3};
use transform_math::Pose;

/// A tree of frames, each carrying zero or more meshes.
pub trait MeshHierarchy: Sized {
	/// Placement of this node relative to its parent.
	fn frame(&self) -> Pose;

	fn meshes(&self) -> &[NodeMesh];

	fn children(&self) -> &[Self];
}

/// Flattens a hierarchy into one buffer set expressed in the root's frame.
///
/// The root's own frame is not applied, so the result can still be placed as a rigid body.
/// Nodes are concatenated in depth-first order: a node's meshes, then each child in turn.
/// Inconsistent meshes are skipped with a warning so the output invariants always hold.
pub fn merge<H: MeshHierarchy>(root: &H) -> MergedMesh {
	let mut merger = Merger::default();
	merger.visit(root, Mat4::IDENTITY);
	merger.finish()
}

enum IndexRun {
	/// Indices already offset into the merged vertex range.
	Indexed(Vec<u32>),
	/// A non-indexed mesh occupying `count` vertices from `start`.
	Sequential { start: u32, count: u32 },
}

#[derive(Default)]
struct Merger {
	positions: Vec<f32>,
	normals: Vec<f32>,
	colors: Vec<f32>,
	runs: Vec<IndexRun>,
	any_indexed: bool,
}

impl Merger {
	fn vertex_count(&self) -> usize {
		self.positions.len() / 3
	}

	fn visit<H: MeshHierarchy>(&mut self, node: &H, to_root: Mat4) {
		for mesh in node.meshes() {
			self.append(mesh, to_root * mesh.pose.to_matrix());
		}

		for child in node.children() {
			self.visit(child, to_root * child.frame().to_matrix());
		}
	}

	fn append(&mut self, mesh: &NodeMesh, matrix: Mat4) {
		if let Err(error) = mesh.validate() {
			log::warn!("Skipping mesh during merge: {}", error);
			return;
		}

		let geometry = &mesh.geometry;
		let offset = self.vertex_count() as u32;
		let normal_matrix = normal_matrix(matrix);

		for (position, normal) in geometry.positions.iter().zip(geometry.normals.iter()) {
			let position = matrix.transform_point3(*position);
			let normal = (normal_matrix * *normal).normalize_or_zero();
			self.positions.extend_from_slice(&position.to_array());
			self.normals.extend_from_slice(&normal.to_array());
		}

		match &mesh.colors {
			ColorSource::PerVertex(colors) => {
				for color in colors.iter() {
					self.colors.extend_from_slice(&color.to_array());
				}
			}
			ColorSource::Material(color) => {
				for _ in 0..geometry.vertex_count() {
					self.colors.extend_from_slice(&color.to_array());
				}
			}
		}

		match &geometry.indices {
			Some(indices) => {
				self.any_indexed = true;
				self.runs.push(IndexRun::Indexed(indices.iter().map(|i| i + offset).collect()));
			}
			None => self
				.runs
				.push(IndexRun::Sequential { start: offset, count: geometry.vertex_count() as u32 }),
		}
	}

	fn finish(self) -> MergedMesh {
		// mixed input is promoted to a single indexed buffer
		let indices = self.any_indexed.then(|| {
			let mut indices = Vec::new();
			for run in self.runs {
				match run {
					IndexRun::Indexed(run) => indices.extend(run),
					IndexRun::Sequential { start, count } => indices.extend(start..start + count),
				}
			}
			indices
		});

		MergedMesh {
			positions: self.positions,
			normals: self.normals,
			colors: self.colors,
			indices,
		}
	}
}

/// Inverse-transpose of the linear part.
///
/// Only an exactly singular (or non-finite) matrix falls back to the linear part itself;
/// tiny but invertible scales still get the true inverse.
fn normal_matrix(matrix: Mat4) -> Mat3 {
	let linear = Mat3::from_mat4(matrix);
	let determinant = linear.determinant();
	if determinant != 0.0 && determinant.is_finite() {
		let inverse_transpose = linear.inverse().transpose();
		if inverse_transpose.is_finite() {
			return inverse_transpose;
		}
	}
	linear
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mesh::Geometry;
	use bevy::math::Quat;
	use std::sync::Arc;

	#[derive(Debug, Clone)]
	struct Node {
		frame: Pose,
		meshes: Vec<NodeMesh>,
		children: Vec<Node>,
	}

	impl MeshHierarchy for Node {
		fn frame(&self) -> Pose {
			self.frame
		}

		fn meshes(&self) -> &[NodeMesh] {
			&self.meshes
		}

		fn children(&self) -> &[Self] {
			&self.children
		}
	}

	fn triangle(indexed: bool) -> Arc<Geometry> {
		Arc::new(Geometry {
			positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
			normals: vec![Vec3::Z; 3],
			indices: indexed.then(|| vec![0, 1, 2]),
		})
	}

	fn leaf(frame: Pose, mesh: NodeMesh) -> Node {
		Node { frame, meshes: vec![mesh], children: vec![] }
	}

	fn gold() -> ColorSource {
		ColorSource::Material(Vec3::new(1.0, 0.8, 0.0))
	}

	#[test]
	fn test_merge_offsets_indices() {
		let child = leaf(
			Pose::from_translation(Vec3::Y * 2.0),
			NodeMesh::new(triangle(true), Pose::IDENTITY, gold()),
		);
		let root = Node {
			frame: Pose::IDENTITY,
			meshes: vec![NodeMesh::new(triangle(true), Pose::IDENTITY, gold())],
			children: vec![child.clone(), child],
		};

		let merged = merge(&root);
		assert_eq!(merged.vertex_count(), 9);
		assert_eq!(merged.indices(), Some(&[0, 1, 2, 3, 4, 5, 6, 7, 8][..]));
		assert_eq!(merged.positions().len(), merged.normals().len());
		assert_eq!(merged.positions().len(), merged.colors().len());
	}

	#[test]
	fn test_merge_ignores_root_frame() {
		let mut root = leaf(
			Pose::from_translation(Vec3::new(100.0, 0.0, 0.0)),
			NodeMesh::new(triangle(true), Pose::IDENTITY, gold()),
		);
		root.children.push(leaf(
			Pose::from_translation(Vec3::Y),
			NodeMesh::new(triangle(true), Pose::IDENTITY, gold()),
		));

		let merged = merge(&root);
		assert_eq!(&merged.positions()[0..3], &[0.0, 0.0, 0.0]);
		// child frame is relative to the root, the root's own offset is dropped
		assert_eq!(&merged.positions()[9..12], &[0.0, 1.0, 0.0]);
	}

	#[test]
	fn test_merge_composes_nested_frames() {
		let quarter = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
		let grandchild = leaf(
			Pose::from_translation(Vec3::Y),
			NodeMesh::new(triangle(true), Pose::IDENTITY, gold()),
		);
		let child = Node {
			frame: Pose::from_translation(Vec3::Y).with_rotation(quarter),
			meshes: vec![],
			children: vec![grandchild],
		};
		let root = Node { frame: Pose::IDENTITY, meshes: vec![], children: vec![child] };

		let merged = merge(&root);
		let origin = Vec3::from_slice(&merged.positions()[0..3]);
		// one up the root, then one along the child's rotated up axis
		assert!(origin.abs_diff_eq(Vec3::new(-1.0, 1.0, 0.0), 1e-5));

		let normal = Vec3::from_slice(&merged.normals()[0..3]);
		assert!(normal.abs_diff_eq(Vec3::Z, 1e-5));
	}

	#[test]
	fn test_merge_renormalizes_scaled_normals() {
		let geometry = Arc::new(Geometry {
			positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
			normals: vec![Vec3::new(1.0, 1.0, 0.0).normalize(); 3],
			indices: None,
		});
		let root = leaf(
			Pose::IDENTITY,
			NodeMesh::new(geometry, Pose::IDENTITY.with_scale(Vec3::new(1.0, 4.0, 1.0)), gold()),
		);

		let merged = merge(&root);
		let normal = Vec3::from_slice(&merged.normals()[0..3]);
		assert!((normal.length() - 1.0).abs() < 1e-5);
		// stretching along y flattens the normal towards x
		assert!(normal.x > normal.y);
	}

	#[test]
	fn test_merge_normals_independent_of_uniform_size() {
		// a spike-shaped scale at full size and at a hundredth of it
		let normal_at = |size: f32| {
			let geometry = Arc::new(Geometry {
				positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
				normals: vec![Vec3::new(1.0, 1.0, 0.0).normalize(); 3],
				indices: None,
			});
			let scale = Vec3::new(0.12 * size, size, 0.12 * size);
			let root = leaf(
				Pose::IDENTITY,
				NodeMesh::new(geometry, Pose::IDENTITY.with_scale(scale), gold()),
			);
			Vec3::from_slice(&merge(&root).normals()[0..3])
		};

		let full = normal_at(1.0);
		let small = normal_at(0.01);
		assert!(small.abs_diff_eq(full, 1e-4), "{small:?} vs {full:?}");
		// thin along x and z, so the normal leans towards x
		assert!(small.x > small.y);
	}

	#[test]
	fn test_normal_matrix_singular_falls_back() {
		let flat = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
		assert_eq!(normal_matrix(flat), Mat3::from_mat4(flat));
	}

	#[test]
	fn test_merge_synthesizes_material_colors() {
		let root = leaf(Pose::IDENTITY, NodeMesh::new(triangle(true), Pose::IDENTITY, gold()));

		let merged = merge(&root);
		assert_eq!(merged.colors(), &[1.0, 0.8, 0.0, 1.0, 0.8, 0.0, 1.0, 0.8, 0.0]);
	}

	#[test]
	fn test_merge_keeps_vertex_colors() {
		let colors = vec![Vec3::X, Vec3::Y, Vec3::Z];
		let root = leaf(
			Pose::IDENTITY,
			NodeMesh::new(triangle(true), Pose::IDENTITY, ColorSource::PerVertex(colors.into())),
		);

		let merged = merge(&root);
		assert_eq!(merged.colors(), &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
	}

	#[test]
	fn test_merge_unindexed_stays_unindexed() {
		let root = Node {
			frame: Pose::IDENTITY,
			meshes: vec![
				NodeMesh::new(triangle(false), Pose::IDENTITY, gold()),
				NodeMesh::new(triangle(false), Pose::IDENTITY, gold()),
			],
			children: vec![],
		};

		let merged = merge(&root);
		assert_eq!(merged.indices(), None);
		assert_eq!(merged.vertex_count(), 6);
	}

	#[test]
	fn test_merge_promotes_mixed_indexing() {
		let root = Node {
			frame: Pose::IDENTITY,
			meshes: vec![
				NodeMesh::new(triangle(false), Pose::IDENTITY, gold()),
				NodeMesh::new(triangle(true), Pose::IDENTITY, gold()),
			],
			children: vec![],
		};

		let merged = merge(&root);
		assert_eq!(merged.indices(), Some(&[0, 1, 2, 3, 4, 5][..]));
	}

	#[test]
	fn test_merge_skips_inconsistent_mesh() {
		let broken = Arc::new(Geometry {
			positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
			normals: vec![Vec3::Z; 3],
			indices: Some(vec![0, 1, 7]),
		});
		let root = Node {
			frame: Pose::IDENTITY,
			meshes: vec![
				NodeMesh::new(broken, Pose::IDENTITY, gold()),
				NodeMesh::new(triangle(true), Pose::IDENTITY, gold()),
			],
			children: vec![],
		};

		let merged = merge(&root);
		assert_eq!(merged.vertex_count(), 3);
		assert_eq!(merged.indices(), Some(&[0, 1, 2][..]));
	}

	#[test]
	fn test_merge_is_deterministic() {
		let root = leaf(
			Pose::IDENTITY,
			NodeMesh::new(triangle(true), Pose::from_rotation(Quat::from_rotation_x(0.3)), gold()),
		);
		assert_eq!(merge(&root), merge(&root));
	}
}
