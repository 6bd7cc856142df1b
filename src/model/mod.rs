pub mod fallback;
pub mod geometry;

use std::cell::RefCell;
use std::rc::Rc;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::math::Aabb;

/// Shared reference to the renderable model.
///
/// The frame loop is single-threaded and cooperative: the animation
/// controller is the only transform writer, the scene host only reads.
pub type ModelHandle = Rc<RefCell<Model>>;

/// Root transform of a model: translation, Euler rotation, uniform scale
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ),
            self.translation,
        )
    }
}

/// Node-local transform; unlike the root, nodes may scale non-uniformly
#[derive(Debug, Clone, Copy)]
pub struct NodeTransform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl NodeTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ),
            self.translation,
        )
    }
}

/// Triangle mesh data, CPU side
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Surface appearance of a mesh node
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub base_color: Vec3,
    pub opacity: f32,
    pub double_sided: bool,
    pub roughness: f32,
    pub metalness: f32,
}

impl Material {
    pub fn opaque(base_color: Vec3, roughness: f32, metalness: f32) -> Self {
        Self {
            base_color,
            opacity: 1.0,
            double_sided: false,
            roughness,
            metalness,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// One mesh in the model's node list
#[derive(Debug, Clone)]
pub struct MeshNode {
    pub name: String,
    pub geometry: Geometry,
    pub material: Material,
    pub transform: NodeTransform,
}

/// A renderable model: a root transform over a flat list of mesh nodes.
///
/// Created by the model provider, attached to one scene host, mutated
/// (root transform only) by the animation controller.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub transform: Transform,
    pub nodes: Vec<MeshNode>,
}

impl Model {
    pub fn new(nodes: Vec<MeshNode>) -> Self {
        Self {
            transform: Transform::default(),
            nodes,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bounding box of all node geometry in model-local space
    /// (node transforms applied, root transform not)
    pub fn local_bounds(&self) -> Aabb {
        let points = self.nodes.iter().flat_map(|node| {
            let m = node.transform.matrix();
            node.geometry
                .positions
                .iter()
                .map(move |&p| m.transform_point3(p))
        });
        Aabb::from_points(points)
    }

    /// Bounding box in world space, root transform included
    pub fn bounds(&self) -> Aabb {
        let root = self.transform.matrix();
        let points = self.nodes.iter().flat_map(|node| {
            let m = root * node.transform.matrix();
            node.geometry
                .positions
                .iter()
                .map(move |&p| m.transform_point3(p))
        });
        Aabb::from_points(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::geometry::uv_sphere;

    #[test]
    fn test_transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_transform_uniform_scale() {
        let t = Transform {
            scale: 2.0,
            ..Transform::default()
        };
        let p = t.matrix().transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_node_transform_translation() {
        let t = NodeTransform {
            translation: Vec3::new(0.0, 0.5, 0.0),
            ..NodeTransform::default()
        };
        let p = t.matrix().transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_model_bounds_follow_root_translation() {
        let mut model = Model::new(vec![MeshNode {
            name: "body".to_string(),
            geometry: uv_sphere(1.0, 16, 8),
            material: Material::opaque(Vec3::ONE, 0.5, 0.0),
            transform: NodeTransform::default(),
        }]);

        model.transform.translation = Vec3::new(3.0, 0.0, 0.0);
        let center = model.bounds().center();
        assert!((center - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_material_transparency() {
        let mut m = Material::opaque(Vec3::ONE, 0.3, 0.2);
        assert!(!m.is_transparent());
        m.opacity = 0.5;
        assert!(m.is_transparent());
    }
}
