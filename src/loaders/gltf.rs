use anyhow::{Context, Result};
use glam::{Mat3, Mat4, Vec3};
use log::debug;

use crate::model::{Geometry, Material, MeshNode, Model, NodeTransform};

/// Decodes a glTF asset (binary `.glb` or embedded `.gltf`) into a model.
///
/// Node transforms are baked into the vertices, so the returned model is a
/// flat list of mesh nodes with identity local transforms.
pub fn decode_gltf(bytes: &[u8]) -> Result<Model> {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).context("Failed to decode glTF data")?;

    debug!(
        "glTF decoded: {} scenes, {} nodes, {} meshes",
        document.scenes().count(),
        document.nodes().count(),
        document.meshes().count()
    );

    let mut nodes = Vec::new();
    for scene in document.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, &mut nodes)?;
        }
    }

    if nodes.is_empty() {
        anyhow::bail!("No triangle geometry found in glTF data");
    }

    Ok(Model::new(nodes))
}

/// Recursively walks glTF nodes, accumulating the global transform
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    nodes: &mut Vec<MeshNode>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, nodes)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, nodes)?;
    }

    Ok(())
}

fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    nodes: &mut Vec<MeshNode>,
) -> Result<()> {
    // Normals do not transform like positions under non-uniform scale
    let normal_matrix = Mat3::from_mat4(*transform).inverse().transpose();

    for (index, primitive) in mesh.primitives().enumerate() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .map(|pos| transform.transform_point3(Vec3::from_array(pos)))
            .collect();

        if positions.is_empty() {
            continue;
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };

        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(normals) => normals
                .map(|n| (normal_matrix * Vec3::from_array(n)).normalize_or_zero())
                .collect(),
            None => compute_vertex_normals(&positions, &indices),
        };

        let pbr = primitive.material().pbr_metallic_roughness();
        let base_color = pbr.base_color_factor();
        let material = Material {
            base_color: Vec3::new(base_color[0], base_color[1], base_color[2]),
            opacity: base_color[3],
            double_sided: primitive.material().double_sided(),
            roughness: pbr.roughness_factor(),
            metalness: pbr.metallic_factor(),
        };

        nodes.push(MeshNode {
            name: format!(
                "{}_{}",
                mesh.name().unwrap_or("mesh"),
                index
            ),
            geometry: Geometry {
                positions,
                normals,
                indices,
            },
            material,
            transform: NodeTransform::default(),
        });
    }

    Ok(())
}

/// Area-weighted vertex normals for primitives that ship without them
fn compute_vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for triangle in indices.chunks(3) {
        if triangle.len() < 3 {
            continue;
        }
        let (a, b, c) = (
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        );
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    for n in &mut normals {
        *n = n.normalize_or_zero();
    }

    normals
}
