pub mod star;

pub use star::{
	builder::StarBuilder,
	config::StarConfig,
	meshes::{polyhedron::icosahedron, spike::spike_cone},
	node::SpikeNode,
};
