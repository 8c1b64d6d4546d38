use render_item::MeshError;
use std::path::PathBuf;
use thiserror::Error;

/// How the caller should treat a failed artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactErrorKind {
	/// Could not be read or written at all.
	Unavailable,
	/// Read, but the content cannot be trusted.
	Malformed,
}

#[derive(Debug, Error)]
pub enum ArtifactError {
	#[error("artifact {path} is unavailable: {source}")]
	Unavailable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to write artifact {path}: {source}")]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("tree artifact is empty")]
	EmptyTree,
	#[error("tree artifact has {len} bytes, which is not a multiple of {}", crate::MATRIX_STRIDE)]
	MisalignedTree { len: usize },
	#[error("star artifact is not a valid document: {0}")]
	StarJson(#[from] serde_json::Error),
	#[error("star artifact is inconsistent: {0}")]
	StarMesh(#[from] MeshError),
	#[error("star {attribute} array holds a non-finite value at {offset}")]
	NonFiniteStar { attribute: &'static str, offset: usize },
}

impl ArtifactError {
	pub fn kind(&self) -> ArtifactErrorKind {
		match self {
			ArtifactError::Unavailable { .. } | ArtifactError::Write { .. } => {
				ArtifactErrorKind::Unavailable
			}
			ArtifactError::EmptyTree
			| ArtifactError::MisalignedTree { .. }
			| ArtifactError::StarJson(_)
			| ArtifactError::StarMesh(_)
			| ArtifactError::NonFiniteStar { .. } => ArtifactErrorKind::Malformed,
		}
	}
}
