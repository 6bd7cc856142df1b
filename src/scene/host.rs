//! Scene host: owns the scene graph, camera, lighting, orbit controls, and
//! the renderer for the lifetime of the viewer.

use std::sync::Arc;

use winit::window::Window;

use crate::config::ViewerConfig;
use crate::model::ModelHandle;
use crate::render::Renderer;

use super::camera::PerspectiveCamera;
use super::controls::OrbitControls;
use super::Scene;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub struct SceneHost {
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    renderer: Renderer,
}

impl SceneHost {
    /// Construction assumes a valid surface and non-zero dimensions;
    /// anything else is a caller contract violation.
    pub async fn new(
        window: Arc<Window>,
        width: u32,
        height: u32,
        config: &ViewerConfig,
    ) -> Result<Self> {
        let renderer = Renderer::new(window, width, height).await?;
        let camera = PerspectiveCamera::new(&config.camera, width, height);
        let controls = OrbitControls::new(&config.controls, config.camera.distance);
        let scene = Scene::from_config(config);

        Ok(Self {
            scene,
            camera,
            controls,
            renderer,
        })
    }

    /// Attach a model: uploads its geometry and takes it as the render
    /// subject. Re-attaching replaces the previous model (hot-swap).
    pub fn attach(&mut self, model: ModelHandle) {
        self.renderer.upload_model(&model.borrow());
        self.scene.attach(model);
    }

    /// Advance the damped orbit one step and rasterize the frame.
    /// Called once per display refresh by the owner's frame loop.
    pub fn render_frame(&mut self) -> Result<()> {
        self.controls.update(&mut self.camera);
        self.renderer.render(&self.scene, &self.camera)
    }

    /// Forward a pointer drag to the orbit controls
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.controls.rotate(delta_x, delta_y);
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
        self.renderer.resize(width, height);
    }

    /// Release the output surface. Call exactly once, at teardown.
    pub fn dispose(&mut self) {
        self.renderer.release_surface();
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }
}
