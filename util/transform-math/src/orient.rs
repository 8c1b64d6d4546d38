use bevy::math::{Quat, Vec3};

/// Unit rotation taking local up (`Vec3::Y`) onto `direction`.
///
/// Degenerate (zero length) directions map to identity.
pub fn rotation_to(direction: Vec3) -> Quat {
	let direction = direction.normalize_or_zero();
	if direction == Vec3::ZERO || direction.abs_diff_eq(Vec3::Y, 1e-6) {
		return Quat::IDENTITY;
	}

	// from_rotation_arc picks a half turn about an orthogonal axis for -Y
	Quat::from_rotation_arc(Vec3::Y, direction)
}

/// Linear blend of two directions, re-normalized.
///
/// Falls back to `to` when the blend collapses to the zero vector.
pub fn blend_direction(from: Vec3, to: Vec3, t: f32) -> Vec3 {
	from.lerp(to, t).normalize_or(to)
}

/// Unit vector in the XZ plane at `angle` radians from +X towards +Z.
pub fn radial(angle: f32) -> Vec3 {
	Vec3::new(angle.cos(), 0.0, angle.sin())
}
