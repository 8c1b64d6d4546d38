use artifact::{FractalScene, Provenance};
use bevy::math::Vec3;
use std::fmt;

/// What `load` reports about a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
	pub instance_count: usize,
	pub tree_provenance: Provenance,
	/// Bounds of the instance origins.
	pub tree_bounds: Option<(Vec3, Vec3)>,
	pub vertex_count: usize,
	pub triangle_count: usize,
	pub indexed: bool,
	pub star_provenance: Provenance,
	/// Star bounds in world space, offset by the star's position.
	pub star_bounds: Option<(Vec3, Vec3)>,
}

impl SceneSummary {
	pub fn new(scene: &FractalScene) -> Self {
		Self {
			instance_count: scene.tree.len(),
			tree_provenance: scene.tree_provenance,
			tree_bounds: scene.tree.origin_bounds(),
			vertex_count: scene.star.vertex_count(),
			triangle_count: scene.star.triangle_count(),
			indexed: scene.star.indices().is_some(),
			star_provenance: scene.star_provenance,
			star_bounds: scene
				.star
				.bounds()
				.map(|(min, max)| (min + scene.star_position, max + scene.star_position)),
		}
	}
}

fn provenance(provenance: Provenance) -> &'static str {
	match provenance {
		Provenance::Baked => "baked",
		Provenance::Generated => "generated",
	}
}

fn bounds(f: &mut fmt::Formatter<'_>, bounds: Option<(Vec3, Vec3)>) -> fmt::Result {
	match bounds {
		Some((min, max)) => write!(
			f,
			"[{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
			min.x, min.y, min.z, max.x, max.y, max.z
		),
		None => write!(f, "empty"),
	}
}

impl fmt::Display for SceneSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "tree ({})", provenance(self.tree_provenance))?;
		writeln!(f, "  instances: {}", self.instance_count)?;
		write!(f, "  bounds:    ")?;
		bounds(f, self.tree_bounds)?;
		writeln!(f)?;

		writeln!(f, "star ({})", provenance(self.star_provenance))?;
		writeln!(f, "  vertices:  {}", self.vertex_count)?;
		writeln!(
			f,
			"  triangles: {}{}",
			self.triangle_count,
			if self.indexed { "" } else { " (unindexed)" }
		)?;
		write!(f, "  bounds:    ")?;
		bounds(f, self.star_bounds)
	}
}
