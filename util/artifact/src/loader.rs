use crate::{
	error::ArtifactError,
	star::load_star,
	tree::load_tree,
	STAR_FILE, TREE_FILE,
};
use bevy::math::Vec3;
use ornament::{StarBuilder, StarConfig};
use render_item::{InstanceSet, MergedMesh};
use std::path::{Path, PathBuf};
use vegetation::{TreeBuilder, TreeConfig};

/// Where the two artifacts live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
	pub tree: PathBuf,
	pub star: PathBuf,
}

impl ArtifactPaths {
	/// The default file names inside `dir`.
	pub fn in_dir(dir: impl AsRef<Path>) -> Self {
		let dir = dir.as_ref();
		Self { tree: dir.join(TREE_FILE), star: dir.join(STAR_FILE) }
	}
}

/// Whether a piece of the scene was read from disk or regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
	Baked,
	Generated,
}

/// Everything a renderer needs: tree instances plus the star mesh and its placement.
#[derive(Debug, Clone)]
pub struct FractalScene {
	pub tree: InstanceSet,
	pub star: MergedMesh,
	/// World position of the star's root frame; the merged mesh is relative to it.
	pub star_position: Vec3,
	pub tree_provenance: Provenance,
	pub star_provenance: Provenance,
}

/// Uses a decoded artifact when there is one, otherwise runs `generate`.
///
/// Failures are logged and never returned; `generate` runs at most once.
pub fn or_generate<T>(
	artifact: &str,
	loaded: Result<T, ArtifactError>,
	generate: impl FnOnce() -> T,
) -> (T, Provenance) {
	match loaded {
		Ok(value) => (value, Provenance::Baked),
		Err(error) => {
			log::warn!(
				"{} artifact {:?}, generating instead: {}",
				artifact,
				error.kind(),
				error
			);
			(generate(), Provenance::Generated)
		}
	}
}

async fn fetch(path: &Path) -> Result<Vec<u8>, ArtifactError> {
	tokio::fs::read(path)
		.await
		.map_err(|source| ArtifactError::Unavailable { path: path.to_path_buf(), source })
}

/// Reads baked artifacts, falling back to the generators.
#[derive(Debug, Clone)]
pub struct Loader {
	paths: ArtifactPaths,
}

impl Loader {
	pub fn new(paths: ArtifactPaths) -> Self {
		Self { paths }
	}

	pub fn paths(&self) -> &ArtifactPaths {
		&self.paths
	}

	pub async fn fetch_tree(&self) -> Result<InstanceSet, ArtifactError> {
		let bytes = fetch(&self.paths.tree).await?;
		load_tree(&bytes)
	}

	pub async fn fetch_star(&self) -> Result<MergedMesh, ArtifactError> {
		let bytes = fetch(&self.paths.star).await?;
		load_star(&bytes)
	}

	/// Loads the scene. The configs are only consulted for fallback generation
	/// and for placing the star.
	pub async fn load(&self, tree: &TreeConfig, star: &StarConfig) -> FractalScene {
		let (tree_result, star_result) = tokio::join!(self.fetch_tree(), self.fetch_star());

		let (tree_instances, tree_provenance) =
			or_generate("tree", tree_result, || TreeBuilder::new(tree.clone()).build());
		let (star_mesh, star_provenance) =
			or_generate("star", star_result, || StarBuilder::new(star.clone()).build_merged());

		log::info!(
			"Loaded scene: {} tree instances ({:?}), {} star vertices ({:?})",
			tree_instances.len(),
			tree_provenance,
			star_mesh.vertex_count(),
			star_provenance
		);

		FractalScene {
			tree: tree_instances,
			star: star_mesh,
			star_position: star.position,
			tree_provenance,
			star_provenance,
		}
	}
}
