use glam::Vec3;
use mascot_viewer::config::{FallbackConfig, ViewerConfig};
use mascot_viewer::model::fallback::build_fallback;
use mascot_viewer::provider::ModelProvider;

#[cfg(test)]
mod fallback_composite {
    use super::*;

    #[test]
    fn test_fallback_has_exactly_eight_primitives() {
        let model = build_fallback(&FallbackConfig::default());
        assert_eq!(model.node_count(), 8);

        let body = model.nodes.iter().filter(|n| n.name == "body").count();
        let stripes = model.nodes.iter().filter(|n| n.name.starts_with("stripe")).count();
        let wings = model.nodes.iter().filter(|n| n.name.starts_with("wing")).count();
        let eyes = model.nodes.iter().filter(|n| n.name.starts_with("eye")).count();
        assert_eq!((body, stripes, wings, eyes), (1, 3, 2, 2));
    }

    #[test]
    fn test_fallback_body_is_gold_ellipsoid() {
        let model = build_fallback(&FallbackConfig::default());
        let body = model.nodes.iter().find(|n| n.name == "body").unwrap();

        assert_eq!(body.transform.scale, Vec3::new(1.0, 0.7, 1.5));
        assert!((body.material.base_color - Vec3::new(1.0, 0.843, 0.0)).length() < 1e-4);
        assert_eq!(body.material.opacity, 1.0);
        assert_eq!(body.material.roughness, 0.5);
    }

    #[test]
    fn test_fallback_geometry_is_bit_for_bit_reproducible() {
        let a = build_fallback(&FallbackConfig::default());
        let b = build_fallback(&FallbackConfig::default());

        for (na, nb) in a.nodes.iter().zip(&b.nodes) {
            assert_eq!(na.name, nb.name);
            assert_eq!(na.geometry.positions, nb.geometry.positions);
            assert_eq!(na.geometry.normals, nb.geometry.normals);
            assert_eq!(na.geometry.indices, nb.geometry.indices);
        }
    }

    #[test]
    fn test_fallback_eyes_sit_near_the_front() {
        let model = build_fallback(&FallbackConfig::default());
        for eye in model.nodes.iter().filter(|n| n.name.starts_with("eye")) {
            assert_eq!(eye.transform.translation.z, 1.2);
            assert_eq!(eye.transform.translation.y, 0.3);
        }
    }

    #[test]
    fn test_fallback_palette_is_configurable() {
        let config = FallbackConfig {
            body_color: [0.2, 0.4, 0.9],
            ..FallbackConfig::default()
        };
        let model = build_fallback(&config);
        let body = model.nodes.iter().find(|n| n.name == "body").unwrap();
        assert!((body.material.base_color - Vec3::new(0.2, 0.4, 0.9)).length() < 1e-6);
    }
}

#[cfg(test)]
mod fallback_resolution {
    use super::*;

    #[test]
    fn test_unreachable_locator_resolves_to_fallback_with_unit_scale() {
        let provider = ModelProvider::new(ViewerConfig::default());
        let resolution = pollster::block_on(provider.resolve("/nowhere/unreachable.glb"));

        assert!(resolution.is_fallback());
        assert_eq!(resolution.base_scale(), 1.0);

        let (model, base_scale) = resolution.into_parts();
        assert_eq!(base_scale, 1.0);
        assert_eq!(model.borrow().node_count(), 8);
        assert_eq!(model.borrow().transform.scale, 1.0);
    }
}
