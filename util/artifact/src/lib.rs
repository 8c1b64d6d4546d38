//! Baked artifacts: the tree as raw matrices, the star as a JSON mesh.
//!
//! Artifacts are written once by [`bake`] and only read afterwards. Reading never fails
//! the caller: [`Loader::load`] regenerates whatever could not be read.

pub mod bake;
pub mod error;
pub mod loader;
pub mod star;
pub mod tree;

pub use bake::{bake, BakeReport};
pub use error::{ArtifactError, ArtifactErrorKind};
pub use loader::{or_generate, ArtifactPaths, FractalScene, Loader, Provenance};
pub use star::{load_star, write_star};
pub use tree::{load_tree, write_tree, MATRIX_FLOATS, MATRIX_STRIDE};

/// File name of the baked tree inside an artifact directory.
pub const TREE_FILE: &str = "tree.bin";

/// File name of the baked star inside an artifact directory.
pub const STAR_FILE: &str = "star.json";
