//! Render-ready data handed from the generators (or the artifact loader) to a renderer.
//!
//! Nothing in here owns a renderer handle. A consumer builds its own GPU resources
//! from an [`InstanceSet`] or a [`MergedMesh`] and swaps them in wholesale when a
//! new set is generated.

pub mod instance;
pub mod merge;
pub mod mesh;

pub use instance::InstanceSet;
pub use merge::{merge, MeshHierarchy};
pub use mesh::{ColorSource, Geometry, MergedMesh, MeshError, NodeMesh};
