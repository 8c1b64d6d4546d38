//! Self-similar cone trees.
//!
//! A tree is a root [`segment::Segment`] whose rings sprout smaller segments, each of which
//! sprouts again until the configured depth. The output is a flat
//! [`render_item::InstanceSet`] in pre-order, one matrix per segment.

pub mod builder;
pub mod config;
pub mod segment;
