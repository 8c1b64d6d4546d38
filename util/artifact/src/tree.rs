use crate::error::ArtifactError;
use bevy::math::Mat4;
use render_item::InstanceSet;

/// Floats per serialized matrix.
pub const MATRIX_FLOATS: usize = 16;

/// Bytes per serialized matrix.
pub const MATRIX_STRIDE: usize = MATRIX_FLOATS * 4;

/// Packs every matrix as 16 little-endian `f32`s in column-major order.
///
/// There is no header; the instance count is `len / MATRIX_STRIDE`.
pub fn write_tree(instances: &InstanceSet) -> Vec<u8> {
	let mut bytes = Vec::with_capacity(instances.len() * MATRIX_STRIDE);
	for matrix in instances.iter() {
		for value in matrix.to_cols_array() {
			bytes.extend_from_slice(&value.to_le_bytes());
		}
	}
	bytes
}

/// Slices a blob produced by [`write_tree`] back into matrices.
///
/// An empty blob is rejected rather than read as an empty tree.
pub fn load_tree(bytes: &[u8]) -> Result<InstanceSet, ArtifactError> {
	if bytes.is_empty() {
		return Err(ArtifactError::EmptyTree);
	}
	if bytes.len() % MATRIX_STRIDE != 0 {
		return Err(ArtifactError::MisalignedTree { len: bytes.len() });
	}

	let instances = bytes
		.chunks_exact(MATRIX_STRIDE)
		.map(|chunk| {
			let mut cols = [0.0f32; MATRIX_FLOATS];
			for (value, raw) in cols.iter_mut().zip(chunk.chunks_exact(4)) {
				*value = f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
			}
			Mat4::from_cols_array(&cols)
		})
		.collect();

	Ok(instances)
}
