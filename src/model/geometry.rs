//! Procedural triangle-mesh primitives used by the fallback mascot.

use std::f32::consts::PI;

use glam::Vec3;

use super::Geometry;

/// Latitude/longitude sphere centered at the origin
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for iy in 0..=height_segments {
        let theta = PI * iy as f32 / height_segments as f32;
        let (sin_t, cos_t) = theta.sin_cos();

        for ix in 0..=width_segments {
            let phi = 2.0 * PI * ix as f32 / width_segments as f32;
            let (sin_p, cos_p) = phi.sin_cos();

            let normal = Vec3::new(sin_t * cos_p, cos_t, sin_t * sin_p);
            positions.push(normal * radius);
            normals.push(normal);
        }
    }

    let row = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix;
            let b = a + row;
            indices.extend_from_slice(&[a, b, a + 1]);
            indices.extend_from_slice(&[a + 1, b, b + 1]);
        }
    }

    Geometry {
        positions,
        normals,
        indices,
    }
}

/// Capped cylinder along the Y axis, centered at the origin
pub fn cylinder(radius: f32, height: f32, radial_segments: u32) -> Geometry {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    let half = height * 0.5;

    // Side wall: two rings sharing radial normals
    for &y in &[half, -half] {
        for ix in 0..=radial_segments {
            let phi = 2.0 * PI * ix as f32 / radial_segments as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            positions.push(Vec3::new(radius * cos_p, y, radius * sin_p));
            normals.push(Vec3::new(cos_p, 0.0, sin_p));
        }
    }

    let row = radial_segments + 1;
    for ix in 0..radial_segments {
        let a = ix;
        let b = ix + row;
        indices.extend_from_slice(&[a, b, a + 1]);
        indices.extend_from_slice(&[a + 1, b, b + 1]);
    }

    // Caps: center vertex plus a fan per end
    for &(y, ny) in &[(half, 1.0), (-half, -1.0)] {
        let center = positions.len() as u32;
        positions.push(Vec3::new(0.0, y, 0.0));
        normals.push(Vec3::new(0.0, ny, 0.0));

        let ring_start = positions.len() as u32;
        for ix in 0..=radial_segments {
            let phi = 2.0 * PI * ix as f32 / radial_segments as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            positions.push(Vec3::new(radius * cos_p, y, radius * sin_p));
            normals.push(Vec3::new(0.0, ny, 0.0));
        }
        for ix in 0..radial_segments {
            indices.extend_from_slice(&[center, ring_start + ix, ring_start + ix + 1]);
        }
    }

    Geometry {
        positions,
        normals,
        indices,
    }
}

/// Flat fan in the XY plane spanning `arc` radians from the +X axis,
/// facing +Z. A half circle (`arc = PI`) makes a wing panel.
pub fn circle_sector(radius: f32, segments: u32, arc: f32) -> Geometry {
    let mut positions = vec![Vec3::ZERO];
    let mut normals = vec![Vec3::Z];
    let mut indices = Vec::new();

    for i in 0..=segments {
        let phi = arc * i as f32 / segments as f32;
        let (sin_p, cos_p) = phi.sin_cos();
        positions.push(Vec3::new(radius * cos_p, radius * sin_p, 0.0));
        normals.push(Vec3::Z);
    }

    for i in 1..=segments {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    Geometry {
        positions,
        normals,
        indices,
    }
}
