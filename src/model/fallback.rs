//! Procedural stand-in mascot used when asset loading fails.
//!
//! This is the availability fallback, not decoration: it is the only model
//! guaranteed to exist in a network-denied environment, so its geometry
//! constants are part of the contract and the construction is deterministic.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec3;

use crate::config::FallbackConfig;
use crate::model::geometry::{circle_sector, cylinder, uv_sphere};
use crate::model::{Material, MeshNode, Model, NodeTransform};

/// Stripe offsets along the body's long axis
const STRIPE_OFFSETS: [f32; 3] = [-0.6, 0.0, 0.6];

/// Builds the fallback bee: 1 body + 3 stripes + 2 wings + 2 eyes.
pub fn build_fallback(config: &FallbackConfig) -> Model {
    let mut nodes = Vec::with_capacity(8);

    // Body: unit sphere squashed to an ellipsoid, long axis on Z
    nodes.push(MeshNode {
        name: "body".to_string(),
        geometry: uv_sphere(1.0, 32, 16),
        material: Material::opaque(Vec3::from_array(config.body_color), 0.5, 0.2),
        transform: NodeTransform {
            scale: Vec3::new(1.0, 0.7, 1.5),
            ..NodeTransform::default()
        },
    });

    // Stripes: thin rings just wider than the body equator, laid across Z
    for (i, &z) in STRIPE_OFFSETS.iter().enumerate() {
        nodes.push(MeshNode {
            name: format!("stripe_{}", i),
            geometry: cylinder(1.01, 0.2, 32),
            material: Material::opaque(Vec3::from_array(config.stripe_color), 0.5, 0.1),
            transform: NodeTransform {
                translation: Vec3::new(0.0, 0.0, z),
                rotation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
                ..NodeTransform::default()
            },
        });
    }

    // Wings: translucent half circles fanned outward, mirrored left/right
    let wing_material = Material {
        base_color: Vec3::from_array(config.wing_color),
        opacity: config.wing_opacity,
        double_sided: true,
        roughness: 0.3,
        metalness: 0.2,
    };
    for (name, side) in [("wing_left", -1.0f32), ("wing_right", 1.0f32)] {
        nodes.push(MeshNode {
            name: name.to_string(),
            geometry: circle_sector(0.8, 32, std::f32::consts::PI),
            material: wing_material,
            transform: NodeTransform {
                translation: Vec3::new(0.7 * side, 0.5, 0.0),
                rotation: Vec3::new(0.0, -FRAC_PI_4 * side, FRAC_PI_4 * side),
                ..NodeTransform::default()
            },
        });
    }

    // Eyes: small spheres near the front of the body
    for (name, side) in [("eye_left", -1.0f32), ("eye_right", 1.0f32)] {
        nodes.push(MeshNode {
            name: name.to_string(),
            geometry: uv_sphere(0.15, 16, 16),
            material: Material::opaque(Vec3::from_array(config.eye_color), 0.1, 0.1),
            transform: NodeTransform {
                translation: Vec3::new(0.3 * side, 0.3, 1.2),
                ..NodeTransform::default()
            },
        });
    }

    Model::new(nodes)
}
