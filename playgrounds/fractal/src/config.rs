use anyhow::Context;
use artifact::{ArtifactPaths, STAR_FILE, TREE_FILE};
use bevy::math::Vec3;
use ornament::StarConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use vegetation::{max_level_within, TaperCurve, TreeConfig};

pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Most tree instances a config may ask for; deeper trees are cut back to fit.
pub const TREE_INSTANCE_BUDGET: usize = 1 << 20;

/// Deepest star. Nodes grow sixfold per level, so level 6 is already about 20k nodes.
pub const STAR_MAX_LEVEL: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaperSetting {
	Fixed,
	Onset,
}

impl From<TaperSetting> for TaperCurve {
	fn from(setting: TaperSetting) -> Self {
		match setting {
			TaperSetting::Fixed => TaperCurve::Fixed,
			TaperSetting::Onset => TaperCurve::Onset,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeSection {
	pub max_level: Option<i32>,
	pub height: Option<f32>,
	pub radius: Option<f32>,
	pub ring_count: Option<u32>,
	pub branches_per_ring: Option<u32>,
	pub scale_factor: Option<f32>,
	pub ring_offset: Option<f32>,
	pub taper_start: Option<f32>,
	pub taper: Option<TaperSetting>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StarSection {
	pub max_level: Option<i32>,
	pub radius: Option<f32>,
	pub position: Option<[f32; 3]>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactSection {
	/// Directory holding both artifacts.
	pub dir: Option<PathBuf>,
	/// Tree file name inside `dir`.
	pub tree: Option<PathBuf>,
	/// Star file name inside `dir`.
	pub star: Option<PathBuf>,
}

/// The playground's TOML file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FractalConfig {
	pub tree: TreeSection,
	pub star: StarSection,
	pub artifacts: ArtifactSection,
}

/// Generator and artifact settings with every default filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
	pub tree: TreeConfig,
	pub star: StarConfig,
	pub artifacts: ArtifactPaths,
}

/// A missing or zero value means "use the default".
fn or_default<T: PartialEq + Default>(value: Option<T>, fallback: T) -> T {
	value.filter(|value| *value != T::default()).unwrap_or(fallback)
}

impl FractalConfig {
	/// Reads the config at `path`. A missing file yields the defaults.
	pub async fn load(path: &Path) -> Result<Self, anyhow::Error> {
		let contents = match tokio::fs::read_to_string(path).await {
			Ok(contents) => contents,
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
				log::info!("No config at {}, using defaults", path.display());
				return Ok(Self::default());
			}
			Err(error) => {
				return Err(error).with_context(|| format!("reading {}", path.display()));
			}
		};

		Self::parse(&contents).with_context(|| format!("parsing {}", path.display()))
	}

	pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(contents)
	}

	/// Fills in defaults. `dir` overrides the configured artifact directory.
	pub fn resolve(&self, dir: Option<&Path>) -> Resolved {
		let tree = &self.tree;
		let base = TreeConfig::default();
		// negative levels pass through; the generator emits just the root for them
		let tree = TreeConfig {
			max_level: or_default(tree.max_level, base.max_level),
			height: or_default(tree.height, base.height),
			radius: or_default(tree.radius, base.radius),
			ring_count: or_default(tree.ring_count, base.ring_count),
			branches_per_ring: or_default(tree.branches_per_ring, base.branches_per_ring),
			scale_factor: or_default(tree.scale_factor, base.scale_factor),
			ring_offset: or_default(tree.ring_offset, base.ring_offset),
			taper_start: or_default(tree.taper_start, base.taper_start),
			taper: tree.taper.map(TaperCurve::from).unwrap_or(base.taper),
		};
		let tree = bound_tree(tree);

		let star = &self.star;
		let base = StarConfig::default();
		let star = StarConfig {
			max_level: or_default(star.max_level, base.max_level),
			radius: or_default(star.radius, base.radius),
			position: star.position.map(Vec3::from_array).unwrap_or(base.position),
		};
		let star = bound_star(star);

		let artifacts = &self.artifacts;
		let dir = dir
			.map(Path::to_path_buf)
			.or_else(|| artifacts.dir.clone())
			.unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_DIR));
		let artifacts = ArtifactPaths {
			tree: dir.join(artifacts.tree.as_deref().unwrap_or(Path::new(TREE_FILE))),
			star: dir.join(artifacts.star.as_deref().unwrap_or(Path::new(STAR_FILE))),
		};

		Resolved { tree, star, artifacts }
	}
}

fn bound_tree(tree: TreeConfig) -> TreeConfig {
	let max_level = max_level_within(&tree, TREE_INSTANCE_BUDGET);
	if max_level < tree.max_level {
		log::warn!(
			"Tree max_level {} exceeds the {} instance budget, using {}",
			tree.max_level,
			TREE_INSTANCE_BUDGET,
			max_level
		);
	}
	tree.with_max_level(max_level)
}

fn bound_star(star: StarConfig) -> StarConfig {
	if star.max_level > STAR_MAX_LEVEL {
		log::warn!("Star max_level {} is too deep, using {}", star.max_level, STAR_MAX_LEVEL);
		return star.with_max_level(STAR_MAX_LEVEL);
	}
	star
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_config_resolves_to_defaults() {
		let resolved = FractalConfig::parse("").unwrap().resolve(None);
		assert_eq!(resolved.tree, TreeConfig::default());
		assert_eq!(resolved.star, StarConfig::default());
		assert_eq!(resolved.artifacts, ArtifactPaths::in_dir(DEFAULT_ARTIFACT_DIR));
	}

	#[test]
	fn test_sections_override_defaults() {
		let config = FractalConfig::parse(
			r#"
			[tree]
			max_level = 2
			ring_count = 1
			branches_per_ring = 6
			taper = "onset"

			[star]
			radius = 2.5
			position = [1.0, 2.0, 3.0]
			"#,
		)
		.unwrap();
		let resolved = config.resolve(None);

		assert_eq!(resolved.tree.max_level, 2);
		assert_eq!(resolved.tree.ring_count, 1);
		assert_eq!(resolved.tree.branches_per_ring, 6);
		assert_eq!(resolved.tree.taper, TaperCurve::Onset);
		assert_eq!(resolved.tree.height, 10.0);
		assert_eq!(resolved.star.radius, 2.5);
		assert_eq!(resolved.star.position, Vec3::new(1.0, 2.0, 3.0));
		assert_eq!(resolved.star.max_level, 3);
	}

	#[test]
	fn test_zero_means_default() {
		let config = FractalConfig::parse(
			r#"
			[tree]
			max_level = 0
			height = 0.0
			branches_per_ring = 0
			ring_offset = 0.0
			"#,
		)
		.unwrap();
		let tree = config.resolve(None).tree;

		assert_eq!(tree.max_level, 4);
		assert_eq!(tree.height, 10.0);
		assert_eq!(tree.branches_per_ring, 4);
		assert_eq!(tree.ring_offset, 0.5);
	}

	#[test]
	fn test_negative_level_passes_through() {
		let config = FractalConfig::parse("[tree]\nmax_level = -2\n[star]\nmax_level = -1\n").unwrap();
		let resolved = config.resolve(None);
		assert_eq!(resolved.tree.max_level, -2);
		assert_eq!(resolved.star.max_level, -1);
	}

	#[test]
	fn test_oversized_levels_are_clamped() {
		let config =
			FractalConfig::parse("[tree]\nmax_level = 12\n[star]\nmax_level = 40\n").unwrap();
		let resolved = config.resolve(None);

		// default branching of 12 per segment fits five levels in the budget
		assert_eq!(resolved.tree.max_level, 5);
		assert!(vegetation::expected_instance_count(&resolved.tree) <= TREE_INSTANCE_BUDGET);
		assert_eq!(resolved.star.max_level, STAR_MAX_LEVEL);
	}

	#[test]
	fn test_clamp_respects_branching() {
		let config = FractalConfig::parse(
			"[tree]\nmax_level = 1000000\nring_count = 1\nbranches_per_ring = 1\n",
		)
		.unwrap();
		let tree = config.resolve(None).tree;

		// one child per segment: a chain of budget instances
		assert_eq!(tree.max_level as usize, TREE_INSTANCE_BUDGET - 1);
	}

	#[test]
	fn test_artifact_paths() {
		let config =
			FractalConfig::parse("[artifacts]\ndir = \"baked\"\nstar = \"ornament.json\"\n").unwrap();

		let resolved = config.resolve(None);
		assert_eq!(resolved.artifacts.tree, Path::new("baked").join(TREE_FILE));
		assert_eq!(resolved.artifacts.star, Path::new("baked").join("ornament.json"));

		let overridden = config.resolve(Some(Path::new("elsewhere")));
		assert_eq!(overridden.artifacts.tree, Path::new("elsewhere").join(TREE_FILE));
	}

	#[test]
	fn test_rejects_unknown_keys() {
		assert!(FractalConfig::parse("[tree]\nbranches = 3\n").is_err());
		assert!(FractalConfig::parse("[tree]\ntaper = \"cubic\"\n").is_err());
	}

	#[tokio::test]
	async fn test_missing_file_is_default() {
		let dir = tempfile::tempdir().unwrap();
		let config = FractalConfig::load(&dir.path().join("absent.toml")).await.unwrap();
		assert_eq!(config, FractalConfig::default());
	}

	#[tokio::test]
	async fn test_load_reports_parse_errors() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("fractal.toml");
		std::fs::write(&path, "[tree\nmax_level = 2").unwrap();

		assert!(FractalConfig::load(&path).await.is_err());
	}
}
