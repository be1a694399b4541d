/*
 * Interaction Signal Module
 *
 * Holds at most one pointer sample, in normalized device coordinates, for
 * the next tick. Consuming the sample clears it, so a pointer event disturbs
 * the flock for exactly one frame.
 */

use nannou::prelude::{vec2, vec3, Vec2, Vec3};

#[derive(Debug, Default, Clone)]
pub struct InteractionSignal {
    pending: Option<Vec2>,
}

impl InteractionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    // Later samples in the same frame replace earlier ones
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pending = Some(vec2(x, y));
    }

    pub fn consume(&mut self) -> Option<Vec2> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Project a normalized pointer sample onto the z = 0 plane of the domain.
pub fn predator_target(sample: Vec2, bounds: f32) -> Vec3 {
    vec3(sample.x * bounds, sample.y * bounds, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_visible_once() {
        let mut signal = InteractionSignal::new();
        assert_eq!(signal.consume(), None);

        signal.set_pointer(0.5, -0.25);
        assert!(signal.is_pending());
        assert_eq!(signal.consume(), Some(vec2(0.5, -0.25)));
        assert_eq!(signal.consume(), None);
    }

    #[test]
    fn latest_sample_wins() {
        let mut signal = InteractionSignal::new();
        signal.set_pointer(0.1, 0.1);
        signal.set_pointer(-0.9, 0.4);
        assert_eq!(signal.consume(), Some(vec2(-0.9, 0.4)));
    }

    #[test]
    fn out_of_range_samples_are_accepted() {
        let mut signal = InteractionSignal::new();
        signal.set_pointer(3.0, -7.5);
        let target = predator_target(signal.consume().unwrap(), 500.0);
        assert_eq!(target, vec3(1500.0, -3750.0, 0.0));
    }
}
