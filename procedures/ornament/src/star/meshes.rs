pub mod polyhedron;
pub mod spike;
