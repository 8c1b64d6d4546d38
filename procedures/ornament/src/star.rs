//! Recursive spike-ball ornament.
//!
//! Every node is a small core with spikes; each spike tip hosts a smaller copy of the
//! node, turned to follow the spike. The hierarchy is kept as plain values and flattened
//! with [`render_item::merge`].

pub mod builder;
pub mod config;
pub mod meshes;
pub mod node;
