use crate::error::ArtifactError;
use render_item::MergedMesh;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct StarDocumentRef<'a> {
	position: &'a [f32],
	normal: &'a [f32],
	color: &'a [f32],
	indices: Option<&'a [u32]>,
}

/// On-disk star. `indices` may be `null` or left out for a flat triangle list.
#[derive(Deserialize)]
struct StarDocument {
	position: Vec<f32>,
	normal: Vec<f32>,
	color: Vec<f32>,
	#[serde(default)]
	indices: Option<Vec<u32>>,
}

/// Serializes a merged star as four flat arrays.
///
/// JSON has no NaN or infinity, so a mesh holding either is rejected instead of being
/// written as `null`s that could never be read back.
pub fn write_star(mesh: &MergedMesh) -> Result<String, ArtifactError> {
	for (attribute, values) in
		[("position", mesh.positions()), ("normal", mesh.normals()), ("color", mesh.colors())]
	{
		if let Some(offset) = values.iter().position(|value| !value.is_finite()) {
			return Err(ArtifactError::NonFiniteStar { attribute, offset });
		}
	}

	let document = StarDocumentRef {
		position: mesh.positions(),
		normal: mesh.normals(),
		color: mesh.colors(),
		indices: mesh.indices(),
	};
	Ok(serde_json::to_string(&document)?)
}

/// Parses a star document and checks it against the mesh invariants.
pub fn load_star(bytes: &[u8]) -> Result<MergedMesh, ArtifactError> {
	let document: StarDocument = serde_json::from_slice(bytes)?;
	let mesh = MergedMesh::from_parts(
		document.position,
		document.normal,
		document.color,
		document.indices,
	)?;
	Ok(mesh)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ArtifactErrorKind;
	use ornament::{StarBuilder, StarConfig};

	#[test]
	fn test_round_trip_generated_star() {
		let mesh = StarBuilder::new(StarConfig::default().with_max_level(2)).build_merged();
		let json = write_star(&mesh).unwrap();
		assert_eq!(load_star(json.as_bytes()).unwrap(), mesh);
	}

	#[test]
	fn test_round_trip_unindexed() {
		let mesh = MergedMesh::from_parts(
			vec![0.0, 0.5, -1.25, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
			vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
			vec![1.0, 0.84, 0.0, 1.0, 0.84, 0.0, 1.0, 0.84, 0.0],
			None,
		)
		.unwrap();

		let json = write_star(&mesh).unwrap();
		assert!(json.contains("\"indices\":null"));
		assert_eq!(load_star(json.as_bytes()).unwrap(), mesh);
	}

	#[test]
	fn test_document_keys() {
		let json = r#"{
			"position": [0, 0, 0, 1, 0, 0, 0, 1, 0],
			"normal": [0, 0, 1, 0, 0, 1, 0, 0, 1],
			"color": [1, 1, 1, 1, 1, 1, 1, 1, 1],
			"indices": [0, 1, 2]
		}"#;
		let mesh = load_star(json.as_bytes()).unwrap();
		assert_eq!(mesh.vertex_count(), 3);
		assert_eq!(mesh.indices(), Some(&[0, 1, 2][..]));
	}

	#[test]
	fn test_missing_indices_key_is_unindexed() {
		let json = r#"{"position":[0,0,0],"normal":[0,1,0],"color":[1,1,1]}"#;
		assert_eq!(load_star(json.as_bytes()).unwrap().indices(), None);
	}

	#[test]
	fn test_missing_position_is_malformed() {
		let json = r#"{"normal":[0,1,0],"color":[1,1,1],"indices":null}"#;
		let error = load_star(json.as_bytes()).unwrap_err();
		assert!(matches!(error, ArtifactError::StarJson(_)));
		assert_eq!(error.kind(), ArtifactErrorKind::Malformed);
	}

	#[test]
	fn test_mismatched_lengths_are_malformed() {
		let json = r#"{"position":[0,0,0,1,1,1],"normal":[0,1,0],"color":[1,1,1],"indices":null}"#;
		let error = load_star(json.as_bytes()).unwrap_err();
		assert!(matches!(error, ArtifactError::StarMesh(_)));
		assert_eq!(error.kind(), ArtifactErrorKind::Malformed);
	}

	#[test]
	fn test_out_of_range_index_is_malformed() {
		let json = r#"{"position":[0,0,0],"normal":[0,1,0],"color":[1,1,1],"indices":[0,1,0]}"#;
		assert!(matches!(load_star(json.as_bytes()), Err(ArtifactError::StarMesh(_))));
	}

	#[test]
	fn test_partial_triangle_is_malformed() {
		let json = r#"{"position":[0,0,0],"normal":[0,1,0],"color":[1,1,1],"indices":[0]}"#;
		assert!(matches!(load_star(json.as_bytes()), Err(ArtifactError::StarMesh(_))));
	}

	#[test]
	fn test_non_finite_mesh_is_not_written() {
		let mesh = MergedMesh::from_parts(
			vec![0.0, f32::NAN, 0.0],
			vec![0.0, 1.0, 0.0],
			vec![1.0, 1.0, 1.0],
			None,
		)
		.unwrap();

		let error = write_star(&mesh).unwrap_err();
		assert!(matches!(
			error,
			ArtifactError::NonFiniteStar { attribute: "position", offset: 1 }
		));
		assert_eq!(error.kind(), ArtifactErrorKind::Malformed);
	}

	#[test]
	fn test_nan_radius_star_is_not_written() {
		let mesh = StarBuilder::new(StarConfig::default().with_radius(f32::NAN)).build_merged();
		assert!(matches!(write_star(&mesh), Err(ArtifactError::NonFiniteStar { .. })));
	}

	#[test]
	fn test_garbage_is_malformed() {
		assert!(matches!(load_star(b"not json"), Err(ArtifactError::StarJson(_))));
	}
}
