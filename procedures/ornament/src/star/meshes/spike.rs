use bevy::math::Vec3;
use render_item::Geometry;
use std::f32::consts::TAU;

/// Vertex count of a [`spike_cone`] with `segments` sides.
pub fn spike_vertex_count(segments: u32) -> usize {
	3 * segments as usize + 1
}

/// Unit cone for a spike: base of radius 1 on the origin, apex at `+Y = 1`.
///
/// Layout: `segments` base vertices of the side, `segments` apex copies (one per face so
/// each face keeps its own normal), the cap center, then `segments` cap ring vertices.
pub fn spike_cone(segments: u32) -> Geometry {
	let segments = segments.max(3);
	let n = segments as usize;

	let mut positions = Vec::with_capacity(spike_vertex_count(segments));
	let mut normals = Vec::with_capacity(spike_vertex_count(segments));
	let mut indices = Vec::with_capacity(6 * n);

	let angle = |i: f32| TAU * i / segments as f32;
	let ring = |a: f32| Vec3::new(a.cos(), 0.0, a.sin());
	// radius 1, height 1: the side normal leans up by 45 degrees
	let side_normal = |a: f32| Vec3::new(a.cos(), 1.0, a.sin()).normalize();

	for i in 0..n {
		let a = angle(i as f32);
		positions.push(ring(a));
		normals.push(side_normal(a));
	}

	for i in 0..n {
		positions.push(Vec3::Y);
		normals.push(side_normal(angle(i as f32 + 0.5)));
	}

	let center = positions.len() as u32;
	positions.push(Vec3::ZERO);
	normals.push(Vec3::NEG_Y);

	for i in 0..n {
		positions.push(ring(angle(i as f32)));
		normals.push(Vec3::NEG_Y);
	}

	for i in 0..segments {
		let next = (i + 1) % segments;

		// side: base, apex, next base
		indices.extend([i, segments + i, next]);

		// cap: winds towards -Y
		indices.extend([center, center + 1 + i, center + 1 + next]);
	}

	Geometry { positions, normals, indices: Some(indices) }
}
