//! Viewer configuration.
//!
//! Everything that used to be a scattered constant in the original
//! presentation code lives here: camera placement, the lighting rig,
//! the fallback mascot palette, and the animation stepping constants.
//! Defaults encode the contractual values; a JSON file can override them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Largest bounding-box axis of a loaded model is normalized to this
    pub target_size: f32,
    pub background: [f32; 3],
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub controls: ControlsConfig,
    pub animation: AnimationConfig,
    pub fallback: FallbackConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            target_size: 5.0,
            // bg-gray-50
            background: [0.976, 0.980, 0.984],
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            controls: ControlsConfig::default(),
            animation: AnimationConfig::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial distance from the origin along the view axis
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 65.0,
            near: 0.1,
            far: 1000.0,
            distance: 7.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DirectionalLightConfig {
    pub position: [f32; 3],
    pub intensity: f32,
}

/// Fixed rig: ambient fill plus front-top, back, and side directionals,
/// chosen for even illumination without per-model tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_intensity: f32,
    pub directional: Vec<DirectionalLightConfig>,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.8,
            directional: vec![
                DirectionalLightConfig {
                    position: [0.0, 1.0, 2.0],
                    intensity: 1.2,
                },
                DirectionalLightConfig {
                    position: [0.0, 0.5, -2.0],
                    intensity: 0.8,
                },
                DirectionalLightConfig {
                    position: [2.0, 0.0, 0.0],
                    intensity: 0.6,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Fraction of the remaining distance covered per frame
    pub damping_factor: f32,
    /// Radians of orbit per pixel of pointer drag
    pub rotate_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            rotate_speed: 0.005,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Yaw increment per frame, radians
    pub spin_speed: f32,
    /// Vertical bob increment per frame
    pub bounce_speed: f32,
    /// Upper bound of the bob
    pub bounce_max: f32,
    /// Reaction pulse scale step, as a fraction of base scale per frame
    pub pulse_step: f32,
    /// Lower clamp of the pulse, as a fraction of base scale
    pub pulse_floor: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            spin_speed: 0.005,
            bounce_speed: 0.01,
            bounce_max: 0.2,
            pulse_step: 0.03,
            pulse_floor: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub body_color: [f32; 3],
    pub stripe_color: [f32; 3],
    pub wing_color: [f32; 3],
    pub wing_opacity: f32,
    pub eye_color: [f32; 3],
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            // gold, 0xFFD700
            body_color: [1.0, 0.843, 0.0],
            stripe_color: [0.0, 0.0, 0.0],
            wing_color: [1.0, 1.0, 1.0],
            wing_opacity: 0.5,
            eye_color: [0.0, 0.0, 0.0],
        }
    }
}
