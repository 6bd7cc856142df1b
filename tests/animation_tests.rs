use std::cell::RefCell;
use std::rc::Rc;

use mascot_viewer::animation::{AnimationController, PulseState};
use mascot_viewer::config::FallbackConfig;
use mascot_viewer::model::fallback::build_fallback;
use mascot_viewer::model::ModelHandle;

fn bee_controller(base_scale: f32) -> (AnimationController, ModelHandle) {
    let handle: ModelHandle = Rc::new(RefCell::new(build_fallback(&FallbackConfig::default())));
    handle.borrow_mut().transform.scale = base_scale;
    (
        AnimationController::new(handle.clone(), base_scale),
        handle,
    )
}

#[cfg(test)]
mod idle_motion {
    use super::*;

    #[test]
    fn test_fifty_idle_frames_accumulate_quarter_radian_of_yaw() {
        let (mut ctrl, handle) = bee_controller(1.0);

        for _ in 0..50 {
            ctrl.advance();
        }

        let yaw = handle.borrow().transform.rotation.y;
        assert!((yaw - 50.0 * 0.005).abs() < 1e-5);
        assert_eq!(handle.borrow().transform.scale, 1.0, "idle must not touch scale");
    }

    #[test]
    fn test_idle_never_starts_a_pulse() {
        let (mut ctrl, _handle) = bee_controller(1.0);
        for _ in 0..1000 {
            ctrl.advance();
            assert!(!ctrl.animating());
        }
    }

    #[test]
    fn test_bounce_stays_in_band_over_many_periods() {
        let (mut ctrl, handle) = bee_controller(1.0);
        for _ in 0..1000 {
            ctrl.advance();
            let y = handle.borrow().transform.translation.y;
            assert!(y >= 0.0, "bounce dipped below zero: {}", y);
            assert!(y <= 0.2 + 1e-6, "bounce exceeded max: {}", y);
        }
    }
}

#[cfg(test)]
mod reaction_pulse {
    use super::*;

    #[test]
    fn test_pulse_with_base_scale_two_steps_down_to_clamp() {
        let (mut ctrl, handle) = bee_controller(2.0);
        ctrl.trigger_reaction();

        // 0.03 * 2.0 = 0.06 per frame, down toward the 1.8 clamp
        let expected = [1.94f32, 1.88, 1.82, 1.8, 1.86];
        for &want in &expected {
            ctrl.advance();
            let got = handle.borrow().transform.scale;
            assert!((got - want).abs() < 1e-4, "expected {}, got {}", want, got);
        }
    }

    #[test]
    fn test_pulse_round_trip_returns_to_idle_at_base_scale() {
        let (mut ctrl, handle) = bee_controller(1.0);
        ctrl.trigger_reaction();

        // Each leg needs ceil(0.1 / 0.03) = 4 frames
        for _ in 0..8 {
            ctrl.advance();
        }

        assert!(!ctrl.animating());
        assert_eq!(ctrl.state(), PulseState::Idle);
        assert_eq!(handle.borrow().transform.scale, 1.0);
    }

    #[test]
    fn test_double_trigger_equals_single_trigger() {
        let (mut once, _h1) = bee_controller(1.5);
        let (mut twice, _h2) = bee_controller(1.5);

        once.trigger_reaction();
        twice.trigger_reaction();
        twice.trigger_reaction();

        for _ in 0..12 {
            once.advance();
            twice.advance();
            assert_eq!(once.current_scale(), twice.current_scale());
            assert_eq!(once.state(), twice.state());
        }
    }

    #[test]
    fn test_trigger_after_completion_starts_a_fresh_pulse() {
        let (mut ctrl, _handle) = bee_controller(1.0);

        ctrl.trigger_reaction();
        for _ in 0..8 {
            ctrl.advance();
        }
        assert!(!ctrl.animating());

        ctrl.trigger_reaction();
        assert_eq!(ctrl.state(), PulseState::Shrinking);
        ctrl.advance();
        assert!((ctrl.current_scale() - 0.97).abs() < 1e-5);
    }

    #[test]
    fn test_scale_invariant_holds_under_irregular_triggering() {
        let (mut ctrl, _handle) = bee_controller(2.0);
        for frame in 0..300 {
            if frame % 7 == 0 {
                ctrl.trigger_reaction();
            }
            ctrl.advance();
            assert!(ctrl.current_scale() >= 0.9 * 2.0 - 1e-5);
            assert!(ctrl.current_scale() <= 2.0 + 1e-5);
        }
    }
}

#[cfg(test)]
mod rebind {
    use super::*;

    #[test]
    fn test_rebind_mid_pulse_resets_everything() {
        let (mut ctrl, _old) = bee_controller(1.0);
        ctrl.trigger_reaction();
        for _ in 0..3 {
            ctrl.advance();
        }

        let replacement: ModelHandle =
            Rc::new(RefCell::new(build_fallback(&FallbackConfig::default())));
        ctrl.rebind(replacement.clone(), 4.0);

        assert!(!ctrl.animating());
        assert_eq!(ctrl.current_scale(), 4.0);
        assert_eq!(ctrl.bounce_height(), 0.0);

        ctrl.advance();
        let model = replacement.borrow();
        assert!(model.transform.rotation.y > 0.0);
        assert!((model.transform.translation.y - 0.01).abs() < 1e-6);
    }
}
