use bevy::math::Vec3;
use render_item::Geometry;

/// Vertices of [`icosahedron`].
pub const ICOSAHEDRON_VERTICES: usize = 12;

const FACES: [[u32; 3]; 20] = [
	[0, 11, 5],
	[0, 5, 1],
	[0, 1, 7],
	[0, 7, 10],
	[0, 10, 11],
	[1, 5, 9],
	[5, 11, 4],
	[11, 10, 2],
	[10, 7, 6],
	[7, 1, 8],
	[3, 9, 4],
	[3, 4, 2],
	[3, 2, 6],
	[3, 6, 8],
	[3, 8, 9],
	[4, 9, 5],
	[2, 4, 11],
	[6, 2, 10],
	[8, 6, 7],
	[9, 8, 1],
];

/// Unit icosahedron (circumradius 1) with smooth normals and outward winding.
///
/// This is the core of every star node.
pub fn icosahedron() -> Geometry {
	let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

	let positions: Vec<Vec3> = [
		Vec3::new(-1.0, phi, 0.0),
		Vec3::new(1.0, phi, 0.0),
		Vec3::new(-1.0, -phi, 0.0),
		Vec3::new(1.0, -phi, 0.0),
		Vec3::new(0.0, -1.0, phi),
		Vec3::new(0.0, 1.0, phi),
		Vec3::new(0.0, -1.0, -phi),
		Vec3::new(0.0, 1.0, -phi),
		Vec3::new(phi, 0.0, -1.0),
		Vec3::new(phi, 0.0, 1.0),
		Vec3::new(-phi, 0.0, -1.0),
		Vec3::new(-phi, 0.0, 1.0),
	]
	.iter()
	.map(|v| v.normalize())
	.collect();

	// on a unit sphere the normal is the position
	let normals = positions.clone();
	let indices = FACES.iter().flatten().copied().collect();

	Geometry { positions, normals, indices: Some(indices) }
}
