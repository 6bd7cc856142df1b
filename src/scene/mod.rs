pub mod camera;
pub mod controls;
pub mod host;

use glam::Vec3;

use crate::config::{LightingConfig, ViewerConfig};
use crate::model::ModelHandle;

/// Directional light aimed at the origin from `position`
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Unit vector from the light toward the origin
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }
}

/// Fixed lighting rig: one ambient fill plus directional lights
#[derive(Debug, Clone)]
pub struct LightRig {
    pub ambient_intensity: f32,
    pub directional: Vec<DirectionalLight>,
}

impl LightRig {
    pub fn from_config(config: &LightingConfig) -> Self {
        Self {
            ambient_intensity: config.ambient_intensity,
            directional: config
                .directional
                .iter()
                .map(|light| DirectionalLight {
                    position: Vec3::from_array(light.position),
                    intensity: light.intensity,
                })
                .collect(),
        }
    }
}

/// Scene graph root: background, lights, and the attached model slot.
/// Owned exclusively by the scene host.
pub struct Scene {
    pub background: Vec3,
    pub lights: LightRig,
    model: Option<ModelHandle>,
}

impl Scene {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            background: Vec3::from_array(config.background),
            lights: LightRig::from_config(&config.lighting),
            model: None,
        }
    }

    pub fn attach(&mut self, model: ModelHandle) {
        self.model = Some(model);
    }

    pub fn model(&self) -> Option<&ModelHandle> {
        self.model.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::model::Model;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_light_rig_matches_config() {
        let rig = LightRig::from_config(&ViewerConfig::default().lighting);
        assert_eq!(rig.ambient_intensity, 0.8);
        assert_eq!(rig.directional.len(), 3);
        assert_eq!(rig.directional[0].intensity, 1.2);
        assert_eq!(rig.directional[1].intensity, 0.8);
        assert_eq!(rig.directional[2].intensity, 0.6);
    }

    #[test]
    fn test_directional_light_points_at_origin() {
        let light = DirectionalLight {
            position: Vec3::new(0.0, 0.0, 2.0),
            intensity: 1.0,
        };
        assert!((light.direction() + Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_scene_attach_replaces_model() {
        let mut scene = Scene::from_config(&ViewerConfig::default());
        assert!(scene.model().is_none());

        let first: ModelHandle = Rc::new(RefCell::new(Model::default()));
        scene.attach(first.clone());
        assert!(Rc::ptr_eq(scene.model().unwrap(), &first));

        let second: ModelHandle = Rc::new(RefCell::new(Model::default()));
        scene.attach(second.clone());
        assert!(Rc::ptr_eq(scene.model().unwrap(), &second));
    }
}
