//! The core `Animation` trait that every decorative animation must implement.
//!
//! The trait is object-safe so animations can be used as `dyn Animation` for
//! runtime switching between the different scenes.

use crate::error::AnimationError;
use crate::surface::Surface;
use serde_json::Value;

/// Core trait for frame-driven decorative animations.
///
/// Each animation advances its internal state by exactly one frame per
/// [`tick`](Animation::tick) call and paints that frame onto the provided
/// [`Surface`]. The host owns the frame counter and the surface; the
/// animation owns everything else.
///
/// This trait is **object-safe**: you can use `Box<dyn Animation>` or
/// `&dyn Animation` for runtime polymorphism.
pub trait Animation {
    /// Advances the animation by one frame and paints it onto `surface`.
    ///
    /// `frame` is the host's monotonically increasing frame counter. State
    /// that must survive between frames lives inside the animation; the
    /// surface arrives already cleared and is repainted from scratch.
    ///
    /// Returns an `AnimationError` if the surface does not match the
    /// animation's dimensions.
    fn tick(&mut self, surface: &mut Surface, frame: u64) -> Result<(), AnimationError>;

    /// Adopts new viewport dimensions.
    ///
    /// Persistent entities keep their state; only the bounds used for
    /// wrapping, centering, and clipping change.
    fn resize(&mut self, width: usize, height: usize) -> Result<(), AnimationError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use glam::DVec2;
    use serde_json::json;

    /// Minimal animation implementation used to verify trait object safety.
    struct MockAnimation {
        width: usize,
        height: usize,
        tick_count: usize,
    }

    impl MockAnimation {
        fn new() -> Self {
            Self {
                width: 8,
                height: 8,
                tick_count: 0,
            }
        }
    }

    impl Animation for MockAnimation {
        fn tick(&mut self, surface: &mut Surface, _frame: u64) -> Result<(), AnimationError> {
            self.tick_count += 1;
            surface.fill_circle(DVec2::new(4.0, 4.0), 2.0, Rgba::new(1.0, 1.0, 1.0, 1.0));
            Ok(())
        }

        fn resize(&mut self, width: usize, height: usize) -> Result<(), AnimationError> {
            if width == 0 || height == 0 {
                return Err(AnimationError::InvalidDimensions);
            }
            self.width = width;
            self.height = height;
            Ok(())
        }

        fn params(&self) -> Value {
            json!({"tick_count": self.tick_count})
        }

        fn param_schema(&self) -> Value {
            json!({
                "tick_count": {
                    "type": "integer",
                    "default": 0,
                    "description": "Number of frames executed"
                }
            })
        }
    }

    #[test]
    fn animation_trait_is_object_safe() {
        // This test verifies that Animation can be used as a trait object.
        // If the trait were not object-safe, this would fail to compile.
        let mut animation: Box<dyn Animation> = Box::new(MockAnimation::new());
        let mut surface = Surface::new(8, 8).unwrap();
        animation.tick(&mut surface, 0).unwrap();
        assert_eq!(animation.params()["tick_count"], 1);
    }

    #[test]
    fn mock_animation_tick_advances_state() {
        let mut animation = MockAnimation::new();
        let mut surface = Surface::new(8, 8).unwrap();
        assert_eq!(animation.tick_count, 0);
        animation.tick(&mut surface, 0).unwrap();
        animation.tick(&mut surface, 1).unwrap();
        assert_eq!(animation.tick_count, 2);
    }

    #[test]
    fn mock_animation_paints_the_surface() {
        let mut animation = MockAnimation::new();
        let mut surface = Surface::new(8, 8).unwrap();
        animation.tick(&mut surface, 0).unwrap();
        let center = surface.pixel(4, 4).unwrap();
        assert!(center.a > 0.0, "tick should have painted the center pixel");
    }

    #[test]
    fn mock_animation_resize_updates_dimensions() {
        let mut animation = MockAnimation::new();
        animation.resize(16, 12).unwrap();
        assert_eq!(animation.width, 16);
        assert_eq!(animation.height, 12);
    }

    #[test]
    fn mock_animation_resize_rejects_zero_dimensions() {
        let mut animation = MockAnimation::new();
        assert!(animation.resize(0, 12).is_err());
        assert!(animation.resize(16, 0).is_err());
    }

    #[test]
    fn mock_animation_param_schema_has_expected_structure() {
        let animation = MockAnimation::new();
        let schema = animation.param_schema();
        assert!(schema.get("tick_count").is_some());
        assert_eq!(schema["tick_count"]["type"], "integer");
    }

    #[test]
    fn dyn_animation_reference_works() {
        let animation = MockAnimation::new();
        let animation_ref: &dyn Animation = &animation;
        assert_eq!(animation_ref.params()["tick_count"], 0);
    }

    #[test]
    fn dyn_animation_mut_reference_works() {
        let mut animation = MockAnimation::new();
        let mut surface = Surface::new(8, 8).unwrap();
        let animation_ref: &mut dyn Animation = &mut animation;
        animation_ref.tick(&mut surface, 0).unwrap();
        assert_eq!(animation_ref.params()["tick_count"], 1);
    }
}
