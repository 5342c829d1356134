use serde_json::{json, Value};
use tracing::debug;

use crate::error::ExportError;
use crate::props::RoomStyle;
use crate::scene::room::RoomScene;

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;
const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// `room_luxury_1721399812345.glb` and friends.
pub fn default_file_name(style: RoomStyle) -> String {
    format!("room_{}_{}.glb", style, chrono::Utc::now().timestamp_millis())
}

fn srgb_to_linear(channel: u8) -> f64 {
    (f64::from(channel) / 255.0).powf(2.2)
}

fn pad_to_4(bytes: &mut Vec<u8>, fill: u8) {
    while bytes.len() % 4 != 0 {
        bytes.push(fill);
    }
}

/// Serializes the currently visible scene to a binary glTF 2.0 container:
/// one node per piece, flat-shaded positions/normals, u32 indices.
pub fn export_glb(scene: &RoomScene) -> Result<Vec<u8>, ExportError> {
    let pieces: Vec<_> = scene.visible_pieces().collect();
    if pieces.is_empty() {
        return Err(ExportError::EmptyScene);
    }

    let mut bin: Vec<u8> = Vec::new();
    let mut buffer_views = Vec::new();
    let mut accessors = Vec::new();
    let mut meshes = Vec::new();
    let mut materials = Vec::new();
    let mut nodes = Vec::new();

    for (piece_index, piece) in pieces.iter().enumerate() {
        let mesh = &piece.mesh;
        let (lo, hi) = mesh.bounds().ok_or(ExportError::EmptyScene)?;

        let positions_offset = bin.len();
        for p in &mesh.positions {
            bin.extend_from_slice(&p.x.to_le_bytes());
            bin.extend_from_slice(&p.y.to_le_bytes());
            bin.extend_from_slice(&p.z.to_le_bytes());
        }
        let normals_offset = bin.len();
        for n in &mesh.normals {
            bin.extend_from_slice(&n.x.to_le_bytes());
            bin.extend_from_slice(&n.y.to_le_bytes());
            bin.extend_from_slice(&n.z.to_le_bytes());
        }
        let indices_offset = bin.len();
        for index in &mesh.indices {
            bin.extend_from_slice(&index.to_le_bytes());
        }

        let view_base = buffer_views.len();
        buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": positions_offset,
            "byteLength": mesh.positions.len() * 12,
            "target": ARRAY_BUFFER,
        }));
        buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": normals_offset,
            "byteLength": mesh.normals.len() * 12,
            "target": ARRAY_BUFFER,
        }));
        buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": indices_offset,
            "byteLength": mesh.indices.len() * 4,
            "target": ELEMENT_ARRAY_BUFFER,
        }));

        let accessor_base = accessors.len();
        accessors.push(json!({
            "bufferView": view_base,
            "componentType": FLOAT,
            "count": mesh.positions.len(),
            "type": "VEC3",
            "min": [lo.x, lo.y, lo.z],
            "max": [hi.x, hi.y, hi.z],
        }));
        accessors.push(json!({
            "bufferView": view_base + 1,
            "componentType": FLOAT,
            "count": mesh.normals.len(),
            "type": "VEC3",
        }));
        accessors.push(json!({
            "bufferView": view_base + 2,
            "componentType": UNSIGNED_INT,
            "count": mesh.indices.len(),
            "type": "SCALAR",
        }));

        materials.push(json!({
            "name": format!("material_{piece_index}"),
            "pbrMetallicRoughness": {
                "baseColorFactor": [
                    srgb_to_linear(piece.color.r()),
                    srgb_to_linear(piece.color.g()),
                    srgb_to_linear(piece.color.b()),
                    1.0
                ],
                "metallicFactor": 0.05,
                "roughnessFactor": 0.85,
            },
        }));
        meshes.push(json!({
            "primitives": [{
                "attributes": {
                    "POSITION": accessor_base,
                    "NORMAL": accessor_base + 1,
                },
                "indices": accessor_base + 2,
                "material": piece_index,
                "mode": 4,
            }],
        }));
        nodes.push(json!({
            "mesh": piece_index,
            "name": format!("piece_{piece_index}"),
        }));
    }

    pad_to_4(&mut bin, 0);

    let document: Value = json!({
        "asset": { "version": "2.0", "generator": "atelier" },
        "scene": 0,
        "scenes": [{ "nodes": (0..nodes.len()).collect::<Vec<_>>() }],
        "nodes": nodes,
        "meshes": meshes,
        "materials": materials,
        "accessors": accessors,
        "bufferViews": buffer_views,
        "buffers": [{ "byteLength": bin.len() }],
    });

    let mut json_chunk =
        serde_json::to_vec(&document).map_err(|e| ExportError::Model(e.to_string()))?;
    pad_to_4(&mut json_chunk, b' ');

    let total = 12 + 8 + json_chunk.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json_chunk);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&bin);

    debug!(pieces = pieces.len(), bytes = out.len(), "scene serialized to glb");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::RoomColors;

    fn scene() -> RoomScene {
        RoomScene::build(RoomStyle::Budget, &RoomColors::default())
    }

    #[test]
    fn glb_starts_with_magic_and_version_2() {
        let glb = export_glb(&scene()).unwrap();
        assert_eq!(&glb[0..4], b"glTF");
        assert_eq!(u32::from_le_bytes(glb[4..8].try_into().unwrap()), 2);
        let declared = u32::from_le_bytes(glb[8..12].try_into().unwrap());
        assert_eq!(declared as usize, glb.len());
    }

    #[test]
    fn chunks_are_four_byte_aligned() {
        let glb = export_glb(&scene()).unwrap();
        let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
        assert_eq!(json_len % 4, 0);
        let bin_header = 20 + json_len;
        let bin_len = u32::from_le_bytes(glb[bin_header..bin_header + 4].try_into().unwrap());
        assert_eq!(bin_len % 4, 0);
    }

    #[test]
    fn json_chunk_is_a_gltf_document() {
        let glb = export_glb(&scene()).unwrap();
        let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
        let document: Value = serde_json::from_slice(&glb[20..20 + json_len]).unwrap();
        assert_eq!(document["asset"]["version"], "2.0");
        let accessors = document["accessors"].as_array().unwrap();
        let meshes = document["meshes"].as_array().unwrap();
        assert_eq!(accessors.len(), meshes.len() * 3);
    }

    #[test]
    fn hidden_parts_shrink_the_export() {
        let mut hidden = scene();
        hidden.toggle("bed");
        let full = export_glb(&scene()).unwrap();
        let partial = export_glb(&hidden).unwrap();
        assert!(partial.len() < full.len());
    }

    #[test]
    fn file_name_matches_pattern() {
        let name = default_file_name(RoomStyle::Luxury);
        assert!(name.starts_with("room_luxury_"));
        assert!(name.ends_with(".glb"));
        assert!(default_file_name(RoomStyle::Budget).starts_with("room_budget_"));
    }
}
