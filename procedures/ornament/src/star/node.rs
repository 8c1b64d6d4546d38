use render_item::{MeshHierarchy, NodeMesh};
use transform_math::Pose;

/// One level of the star: a core and its spikes, with a smaller node at each spike tip.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeNode {
	pub level: u32,
	pub radius: f32,
	/// Placement relative to the parent node; identity for the root.
	pub frame: Pose,
	pub meshes: Vec<NodeMesh>,
	pub children: Vec<SpikeNode>,
}

impl SpikeNode {
	/// Nodes in this subtree, including this one.
	pub fn node_count(&self) -> usize {
		1 + self.children.iter().map(SpikeNode::node_count).sum::<usize>()
	}

	/// Meshes in this subtree.
	pub fn mesh_count(&self) -> usize {
		self.meshes.len() + self.children.iter().map(SpikeNode::mesh_count).sum::<usize>()
	}

	/// Vertices the subtree will contribute once merged.
	pub fn vertex_count(&self) -> usize {
		self.meshes.iter().map(|mesh| mesh.geometry.vertex_count()).sum::<usize>()
			+ self.children.iter().map(SpikeNode::vertex_count).sum::<usize>()
	}
}

impl MeshHierarchy for SpikeNode {
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
