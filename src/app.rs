//! Application owner: composes the model provider, scene host, and
//! animation controller, and drives them from the winit event loop.
//!
//! Per-frame order: advance the animation, then render. A left click (a
//! press and release with no meaningful drag) triggers the reaction pulse;
//! dragging orbits the camera; resizing forwards to the scene host.

use std::sync::Arc;

use log::info;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::animation::AnimationController;
use crate::cli::Cli;
use crate::config::ViewerConfig;
use crate::provider::ModelProvider;
use crate::scene::host::SceneHost;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Drags shorter than this are treated as clicks
const CLICK_SLOP_PIXELS: f32 = 5.0;

struct PointerState {
    position: Option<(f64, f64)>,
    dragging: bool,
    drag_distance: f32,
}

impl PointerState {
    fn new() -> Self {
        Self {
            position: None,
            dragging: false,
            drag_distance: 0.0,
        }
    }
}

pub struct App {
    cli: Cli,
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    host: Option<SceneHost>,
    animator: Option<AnimationController>,
    pointer: PointerState,
}

impl App {
    pub fn new(cli: Cli, config: ViewerConfig) -> Self {
        Self {
            cli,
            config,
            window: None,
            host: None,
            animator: None,
            pointer: PointerState::new(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Mascot Viewer")
                .with_inner_size(winit::dpi::LogicalSize::new(self.cli.width, self.cli.height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                eprintln!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let mut host = match pollster::block_on(SceneHost::new(
            window.clone(),
            size.width,
            size.height,
            &self.config,
        )) {
            Ok(host) => host,
            Err(e) => {
                eprintln!("Failed to initialize scene host: {}", e);
                event_loop.exit();
                return;
            }
        };

        let provider = ModelProvider::new(self.config.clone())
            .with_progress(Box::new(|percent| info!("Model load: {:.0}%", percent)));
        let resolution = pollster::block_on(provider.resolve(&self.cli.model));
        if resolution.is_fallback() {
            info!("Using the procedural fallback mascot");
        }
        let (model, base_scale) = resolution.into_parts();

        host.attach(model.clone());
        self.animator = Some(AnimationController::with_config(
            model,
            base_scale,
            self.config.animation,
        ));
        self.host = Some(host);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(host) = &mut self.host {
                    host.dispose();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                // Minimized windows report zero; the host contract forbids it
                if size.width > 0 && size.height > 0 {
                    if let Some(host) = &mut self.host {
                        host.handle_resize(size.width, size.height);
                    }
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.pointer.dragging = true;
                    self.pointer.drag_distance = 0.0;
                }
                ElementState::Released => {
                    self.pointer.dragging = false;
                    if self.pointer.drag_distance < CLICK_SLOP_PIXELS {
                        if let Some(animator) = &mut self.animator {
                            animator.trigger_reaction();
                        }
                    }
                }
            },
            WindowEvent::CursorMoved { position, .. } => {
                if let Some((last_x, last_y)) = self.pointer.position {
                    if self.pointer.dragging {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        self.pointer.drag_distance += dx.abs() + dy.abs();
                        if let Some(host) = &mut self.host {
                            host.rotate(dx, dy);
                        }
                    }
                }
                self.pointer.position = Some((position.x, position.y));
            }
            WindowEvent::RedrawRequested => {
                if let Some(animator) = &mut self.animator {
                    animator.advance();
                }
                if let Some(host) = &mut self.host {
                    if let Err(e) = host.render_frame() {
                        eprintln!("Render error: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

pub fn run(cli: Cli, config: ViewerConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
