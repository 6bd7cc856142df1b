//! Per-frame mascot animation: idle spin and bob, plus the click-triggered
//! scale pulse.
//!
//! Stepping is per call, not delta-time scaled: the owner's render loop
//! calls `advance` once per frame, which keeps the state machine trivially
//! testable by calling it a known number of times.

use crate::config::AnimationConfig;
use crate::model::ModelHandle;

/// Reaction pulse phase, derived from the animating flag and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseState {
    Idle,
    Shrinking,
    Growing,
}

/// Drives the attached model's root transform, one step per rendered frame.
///
/// Sole writer of the model transform: yaw accumulates forever, vertical
/// position is set absolutely from the bounce height every frame, and scale
/// is written only while a pulse is active.
pub struct AnimationController {
    model: ModelHandle,
    base_scale: f32,
    current_scale: f32,
    scale_direction: f32,
    animating: bool,
    bounce_height: f32,
    bounce_direction: f32,
    config: AnimationConfig,
}

impl AnimationController {
    pub fn new(model: ModelHandle, base_scale: f32) -> Self {
        Self::with_config(model, base_scale, AnimationConfig::default())
    }

    pub fn with_config(model: ModelHandle, base_scale: f32, config: AnimationConfig) -> Self {
        Self {
            model,
            base_scale,
            current_scale: base_scale,
            scale_direction: -1.0,
            animating: false,
            bounce_height: 0.0,
            bounce_direction: 1.0,
            config,
        }
    }

    /// Advance the animation by one frame
    pub fn advance(&mut self) {
        let mut model = self.model.borrow_mut();

        // Slow continuous spin; wraps naturally in the rotation math
        model.transform.rotation.y += self.config.spin_speed;

        // Vertical bob between 0 and bounce_max
        self.bounce_height += self.config.bounce_speed * self.bounce_direction;
        if self.bounce_height >= self.config.bounce_max {
            self.bounce_height = self.config.bounce_max;
            self.bounce_direction = -1.0;
        } else if self.bounce_height <= 0.0 {
            self.bounce_height = 0.0;
            self.bounce_direction = 1.0;
        }
        model.transform.translation.y = self.bounce_height;

        // Reaction pulse: shrink to the floor, then grow back and stop
        if self.animating {
            self.current_scale += self.config.pulse_step * self.scale_direction * self.base_scale;
            let floor = self.config.pulse_floor * self.base_scale;
            if self.current_scale <= floor {
                self.current_scale = floor;
                self.scale_direction = 1.0;
            } else if self.current_scale >= self.base_scale {
                self.current_scale = self.base_scale;
                self.animating = false;
            }
            model.transform.scale = self.current_scale;
        }
    }

    /// Start a reaction pulse; a no-op while one is already running
    pub fn trigger_reaction(&mut self) {
        if !self.animating {
            self.animating = true;
            self.current_scale = self.base_scale;
            self.scale_direction = -1.0;
        }
    }

    /// Swap in a new model and reset the full animation state
    pub fn rebind(&mut self, model: ModelHandle, base_scale: f32) {
        self.model = model;
        self.base_scale = base_scale;
        self.current_scale = base_scale;
        self.scale_direction = -1.0;
        self.animating = false;
        self.bounce_height = 0.0;
        self.bounce_direction = 1.0;
    }

    pub fn animating(&self) -> bool {
        self.animating
    }

    pub fn state(&self) -> PulseState {
        match (self.animating, self.scale_direction < 0.0) {
            (false, _) => PulseState::Idle,
            (true, true) => PulseState::Shrinking,
            (true, false) => PulseState::Growing,
        }
    }

    pub fn current_scale(&self) -> f32 {
        self.current_scale
    }

    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    pub fn bounce_height(&self) -> f32 {
        self.bounce_height
    }
}
