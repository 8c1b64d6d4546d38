use crate::{
	error::ArtifactError,
	loader::ArtifactPaths,
	star::write_star,
	tree::write_tree,
};
use ornament::{StarBuilder, StarConfig};
use std::path::{Path, PathBuf};
use vegetation::{TreeBuilder, TreeConfig};

/// Summary of a finished bake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakeReport {
	pub tree_path: PathBuf,
	pub star_path: PathBuf,
	pub instance_count: usize,
	pub vertex_count: usize,
	pub tree_bytes: usize,
	pub star_bytes: usize,
}

async fn write(path: &Path, contents: &[u8]) -> Result<(), ArtifactError> {
	let to_error = |source| ArtifactError::Write { path: path.to_path_buf(), source };

	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		tokio::fs::create_dir_all(parent).await.map_err(to_error)?;
	}
	tokio::fs::write(path, contents).await.map_err(to_error)
}

/// Runs both generators and writes their artifacts, creating directories as needed.
pub async fn bake(
	tree: &TreeConfig,
	star: &StarConfig,
	paths: &ArtifactPaths,
) -> Result<BakeReport, ArtifactError> {
	let instances = TreeBuilder::new(tree.clone()).build();
	let mesh = StarBuilder::new(star.clone()).build_merged();

	let tree_blob = write_tree(&instances);
	let star_document = write_star(&mesh)?;

	let (tree_written, star_written) = tokio::join!(
		write(&paths.tree, &tree_blob),
		write(&paths.star, star_document.as_bytes())
	);
	tree_written?;
	star_written?;

	log::info!(
		"Baked {} tree instances to {} and {} star vertices to {}",
		instances.len(),
		paths.tree.display(),
		mesh.vertex_count(),
		paths.star.display()
	);

	Ok(BakeReport {
		tree_path: paths.tree.clone(),
		star_path: paths.star.clone(),
		instance_count: instances.len(),
		vertex_count: mesh.vertex_count(),
		tree_bytes: tree_blob.len(),
		star_bytes: star_document.len(),
	})
}
