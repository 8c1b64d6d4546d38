pub mod tree;

pub use tree::{
	builder::{expected_instance_count, max_level_within, TreeBuilder},
	config::{TaperCurve, TreeConfig},
	segment::Segment,
};
