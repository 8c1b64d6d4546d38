use crate::tree::{
	config::{TaperCurve, TreeConfig},
	segment::Segment,
};
use bevy::math::Vec3;
use render_item::InstanceSet;
use std::f32::consts::TAU;
use transform_math::{blend_direction, radial, rotation_to};

/// Exponent of the ring radius taper; above 1 so branch density collects near the base.
const TAPER_EXPONENT: f32 = 1.2;

/// Smallest per-step shrink a child can get from its ring height.
const DECAY_FLOOR: f32 = 0.3;

/// Upper bound on pre-allocation; deeper trees still grow the buffer as needed.
const MAX_PREALLOCATED: usize = 1 << 20;

/// Expands a [`TreeConfig`] into an [`InstanceSet`].
///
/// Output order is pre-order (a segment, then each of its children's subtrees),
/// and the same config always yields bit-identical output.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
	config: TreeConfig,
}

impl TreeBuilder {
	pub fn new(config: TreeConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &TreeConfig {
		&self.config
	}

	pub fn build(&self) -> InstanceSet {
		let expected = expected_instance_count(&self.config);
		let mut instances = InstanceSet::with_capacity(expected.min(MAX_PREALLOCATED));

		self.expand(&Segment::root(&self.config), &mut instances);

		log::debug!(
			"Built tree with {} instances (max level {}, {} rings x {} branches)",
			instances.len(),
			self.config.max_level,
			self.config.ring_count,
			self.config.branches_per_ring
		);

		instances
	}

	/// Ring parameter along the segment for ring `index`; a single ring sits at the base.
	pub fn ring_parameter(index: u32, ring_count: u32) -> f32 {
		if ring_count <= 1 {
			0.0
		} else {
			index as f32 / (ring_count - 1) as f32
		}
	}

	/// Onset-adjusted ring parameter; only [`TaperCurve::Onset`] feeds it into the radius.
	pub fn effective_t(&self, t: f32) -> f32 {
		let start = self.config.taper_start;
		if start >= 1.0 {
			return 0.0;
		}
		((t - start.max(0.0)) / (1.0 - start.max(0.0))).clamp(0.0, 1.0)
	}

	/// Ring radius at height `t` of a segment whose base radius is `radius`.
	pub fn ring_radius(&self, radius: f32, t: f32) -> f32 {
		let effective_t = self.effective_t(t);
		let t = match self.config.taper {
			TaperCurve::Fixed => t,
			TaperCurve::Onset => effective_t,
		};
		radius * (1.0 - t).max(0.0).powf(TAPER_EXPONENT)
	}

	/// Child scale multiplier from ring height: 1 at the base, `DECAY_FLOOR` at the tip.
	pub fn decay(t: f32) -> f32 {
		(1.0 - t) * (1.0 - DECAY_FLOOR) + DECAY_FLOOR
	}

	fn expand(&self, segment: &Segment, instances: &mut InstanceSet) {
		// parent always precedes its children
		instances.push(segment.to_matrix());

		if segment.level as i64 >= self.config.max_level as i64 {
			return;
		}

		for child in self.children(segment) {
			self.expand(&child, instances);
		}
	}

	/// Direct children of a segment, ring by ring, branch by branch.
	pub fn children(&self, segment: &Segment) -> Vec<Segment> {
		let TreeConfig { ring_count, branches_per_ring, ring_offset, scale_factor, .. } =
			self.config;

		if ring_count == 0 || branches_per_ring == 0 {
			return Vec::new();
		}

		let up = segment.up();
		let mut children = Vec::with_capacity(self.config.branching_factor());

		for i in 0..ring_count {
			let t = Self::ring_parameter(i, ring_count);
			let ring_x = self.ring_radius(segment.scale.x, t);
			let ring_z = self.ring_radius(segment.scale.z, t);
			let ring_height = t * segment.scale.y;
			let child_scale = segment.scale * scale_factor * Self::decay(t);

			for j in 0..branches_per_ring {
				let angle = TAU * j as f32 / branches_per_ring as f32 + i as f32 * ring_offset;
				let spoke = radial(angle);

				let local_offset = Vec3::new(spoke.x * ring_x, ring_height, spoke.z * ring_z);
				let position = segment.position + segment.rotation * local_offset;

				// base rings splay outward, tip rings follow the parent
				let outward = segment.rotation * spoke;
				let direction = blend_direction(outward, up, t);

				children.push(Segment {
					position,
					rotation: rotation_to(direction),
					scale: child_scale,
					level: segment.level + 1,
				});
			}
		}

		children
	}
}

/// Closed-form instance count: `1 + f + f^2 + ... + f^L` for branching factor `f`.
///
/// Saturates at `usize::MAX` for configs too large to represent.
pub fn expected_instance_count(config: &TreeConfig) -> usize {
	let factor = config.branching_factor();
	if config.max_level <= 0 || factor == 0 {
		return 1;
	}

	let mut total: usize = 1;
	let mut level_count: usize = 1;
	for _ in 0..config.max_level {
		level_count = level_count.saturating_mul(factor);
		total = total.saturating_add(level_count);
	}
	total
}

/// Deepest `max_level` (capped at the config's own) whose tree stays within `budget` instances.
///
/// Levels `<= 0` and configs without branching are returned unchanged; they only emit the root.
pub fn max_level_within(config: &TreeConfig, budget: usize) -> i32 {
	let factor = config.branching_factor();
	if config.max_level <= 0 || factor == 0 {
		return config.max_level;
	}

	let mut total: usize = 1;
	let mut level_count: usize = 1;
	for level in 1..=config.max_level {
		level_count = level_count.saturating_mul(factor);
		total = total.saturating_add(level_count);
		if total > budget {
			return level - 1;
		}
	}
	config.max_level
}
