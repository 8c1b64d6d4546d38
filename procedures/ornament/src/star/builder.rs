use crate::star::{
	config::StarConfig,
	meshes::{polyhedron::icosahedron, spike::spike_cone},
	node::SpikeNode,
};
use bevy::math::Vec3;
use render_item::{merge, ColorSource, Geometry, MergedMesh, NodeMesh};
use std::sync::Arc;
use transform_math::{rotation_to, Pose};

/// Radius ratio between a node and the nodes on its spike tips.
pub const LEVEL_SHRINK: f32 = 0.45;

/// Core radius as a fraction of the node radius.
pub const CORE_RATIO: f32 = 0.3;

/// Spike length as a fraction of the node radius.
pub const SPIKE_LENGTH_RATIO: f32 = 1.0;

/// Spike base radius as a fraction of the node radius.
pub const SPIKE_WIDTH_RATIO: f32 = 0.12;

pub const SPIKE_SEGMENTS: u32 = 8;

pub const CORE_COLOR: Vec3 = Vec3::new(1.0, 0.84, 0.0);
pub const SPIKE_BASE_COLOR: Vec3 = Vec3::new(1.0, 0.9, 0.35);
pub const SPIKE_TIP_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.85);

const AXES: [Vec3; 6] = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];

/// Expands a [`StarConfig`] into a [`SpikeNode`] hierarchy.
///
/// Core and spike geometry are built once and shared by every node.
#[derive(Debug, Clone)]
pub struct StarBuilder {
	config: StarConfig,
	core: Arc<Geometry>,
	spike: Arc<Geometry>,
	spike_colors: Arc<[Vec3]>,
}

impl StarBuilder {
	pub fn new(config: StarConfig) -> Self {
		let spike = spike_cone(SPIKE_SEGMENTS);

		// gradient from the base of the spike to its tip
		let spike_colors =
			spike.positions.iter().map(|p| SPIKE_BASE_COLOR.lerp(SPIKE_TIP_COLOR, p.y)).collect();

		Self { config, core: Arc::new(icosahedron()), spike: Arc::new(spike), spike_colors }
	}

	pub fn config(&self) -> &StarConfig {
		&self.config
	}

	pub fn build(&self) -> SpikeNode {
		let root = self.expand(0, self.config.radius, Pose::IDENTITY);

		log::debug!(
			"Built star with {} nodes and {} meshes (max level {})",
			root.node_count(),
			root.mesh_count(),
			self.config.max_level
		);

		root
	}

	/// Builds the hierarchy and flattens it into the star's local frame.
	pub fn build_merged(&self) -> MergedMesh {
		merge(&self.build())
	}

	/// Spike directions at `level`: the six axes, plus the eight diagonals at the root.
	pub fn directions(level: u32) -> Vec<Vec3> {
		let mut directions = AXES.to_vec();

		if level == 0 {
			for x in [1.0, -1.0] {
				for y in [1.0, -1.0] {
					for z in [1.0, -1.0] {
						directions.push(Vec3::new(x, y, z).normalize());
					}
				}
			}
		}

		directions
	}

	fn expand(&self, level: u32, radius: f32, frame: Pose) -> SpikeNode {
		let mut meshes = vec![NodeMesh::new(
			self.core.clone(),
			Pose::IDENTITY.with_scale(Vec3::splat(radius * CORE_RATIO)),
			ColorSource::Material(CORE_COLOR),
		)];
		let mut children = Vec::new();

		// spikes only carry on the recursion, so the last level is a bare core
		if (level as i64) < self.config.max_level as i64 - 1 {
			let length = radius * SPIKE_LENGTH_RATIO;
			let width = radius * SPIKE_WIDTH_RATIO;

			for direction in Self::directions(level) {
				let rotation = rotation_to(direction);

				meshes.push(NodeMesh::new(
					self.spike.clone(),
					Pose::from_rotation(rotation).with_scale(Vec3::new(width, length, width)),
					ColorSource::PerVertex(Arc::clone(&self.spike_colors)),
				));

				let tip = Pose::from_translation(direction * length).with_rotation(rotation);
				children.push(self.expand(level + 1, radius * LEVEL_SHRINK, tip));
			}
		}

		SpikeNode { level, radius, frame, meshes, children }
	}
}
