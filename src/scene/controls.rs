use glam::Vec3;

use crate::config::ControlsConfig;

use super::camera::PerspectiveCamera;

/// Keep the orbit off the poles so the view-up vector stays well defined
const ELEVATION_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Damped orbit controls around the origin.
///
/// Pointer drags move a target orientation; each `update` closes a fraction
/// of the remaining distance, giving the glide-to-rest feel. Zoom is
/// disabled: the orbit radius stays at the camera's construction distance,
/// which avoids input conflicts on touch surfaces.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    radius: f32,
    azimuth: f32,
    elevation: f32,
    target_azimuth: f32,
    target_elevation: f32,
    damping_factor: f32,
    rotate_speed: f32,
}

impl OrbitControls {
    pub fn new(config: &ControlsConfig, radius: f32) -> Self {
        Self {
            radius,
            azimuth: 0.0,
            elevation: 0.0,
            target_azimuth: 0.0,
            target_elevation: 0.0,
            damping_factor: config.damping_factor,
            rotate_speed: config.rotate_speed,
        }
    }

    /// Feed a pointer drag, in pixels
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.target_azimuth -= delta_x * self.rotate_speed;
        self.target_elevation = (self.target_elevation + delta_y * self.rotate_speed)
            .clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
    }

    /// Advance the damping by one step and place the camera on the orbit
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        self.azimuth += (self.target_azimuth - self.azimuth) * self.damping_factor;
        self.elevation += (self.target_elevation - self.elevation) * self.damping_factor;

        let (sin_a, cos_a) = self.azimuth.sin_cos();
        let (sin_e, cos_e) = self.elevation.sin_cos();
        camera.position = Vec3::new(
            self.radius * cos_e * sin_a,
            self.radius * sin_e,
            self.radius * cos_e * cos_a,
        );
        camera.target = Vec3::ZERO;
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CameraConfig, ControlsConfig};

    fn rig() -> (OrbitControls, PerspectiveCamera) {
        let camera = PerspectiveCamera::new(&CameraConfig::default(), 800, 600);
        let controls = OrbitControls::new(&ControlsConfig::default(), 7.0);
        (controls, camera)
    }

    #[test]
    fn test_idle_controls_hold_initial_position() {
        let (mut controls, mut camera) = rig();
        for _ in 0..10 {
            controls.update(&mut camera);
        }
        assert!((camera.position - Vec3::new(0.0, 0.0, 7.0)).length() < 1e-5);
    }

    #[test]
    fn test_orbit_radius_is_fixed() {
        let (mut controls, mut camera) = rig();
        controls.rotate(150.0, -80.0);
        for _ in 0..200 {
            controls.update(&mut camera);
            assert!((camera.position.length() - 7.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_damping_converges_to_drag_target() {
        let (mut controls, mut camera) = rig();
        controls.rotate(100.0, 0.0);
        let target = -100.0 * ControlsConfig::default().rotate_speed;

        // One step covers only the damping fraction
        controls.update(&mut camera);
        assert!((controls.azimuth() - target * 0.05).abs() < 1e-6);

        for _ in 0..2000 {
            controls.update(&mut camera);
        }
        assert!((controls.azimuth() - target).abs() < 1e-4);
    }

    #[test]
    fn test_elevation_clamped_off_the_poles() {
        let (mut controls, mut camera) = rig();
        controls.rotate(0.0, 10_000.0);
        for _ in 0..2000 {
            controls.update(&mut camera);
        }
        assert!(controls.elevation() <= ELEVATION_LIMIT + 1e-6);
        assert!(camera.position.y < 7.0);
    }
}
