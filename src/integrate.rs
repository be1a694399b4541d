/*
 * Position Integration Module
 *
 * Advances every agent by its freshly computed velocity and keeps it inside
 * the cubic domain. The domain is periodic: an agent leaving through one face
 * re-enters through the opposite one with its velocity untouched. When an
 * agent wraps, `freedom` scatters its other two coordinates slightly so
 * re-entering agents do not line up on the same track.
 */

use nannou::prelude::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::agent::{Agent, AgentGrid};
use crate::error::SimulationError;

const SCATTER_FRACTION: f32 = 0.05;

/// Boundary policy for the position kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Containment {
    pub bounds: f32,
    pub freedom: f32,
    pub seed: u64,
}

impl Containment {
    fn scatter_span(&self) -> f32 {
        self.freedom * self.bounds * SCATTER_FRACTION
    }
}

// Map a coordinate into `[-bounds, bounds]` on a periodic axis
// Coordinates already inside the interval are returned unchanged
pub fn wrap_axis(value: f32, bounds: f32) -> f32 {
    if (-bounds..=bounds).contains(&value) {
        return value;
    }

    let width = bounds * 2.0;
    // rem_euclid can round up to `width`
    ((value + bounds).rem_euclid(width) - bounds).clamp(-bounds, bounds)
}

fn scatter_seed(seed: u64, generation: u64, index: usize) -> u64 {
    seed ^ generation.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ (index as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9)
}

// Generation-(t+1) position of one agent from its generation-t position and
// its generation-(t+1) velocity
pub fn integrate(
    index: usize,
    position: Vec3,
    velocity: Vec3,
    dt: f32,
    containment: &Containment,
    generation: u64,
) -> Vec3 {
    let bounds = containment.bounds;
    let mut axes = (position + velocity * dt).to_array();
    let mut wrapped = [false; 3];

    for (axis, did_wrap) in axes.iter_mut().zip(wrapped.iter_mut()) {
        *did_wrap = !(-bounds..=bounds).contains(&*axis);
        *axis = wrap_axis(*axis, bounds);
    }

    let span = containment.scatter_span();
    if span > 0.0 && wrapped.iter().any(|&w| w) {
        let mut rng = StdRng::seed_from_u64(scatter_seed(containment.seed, generation, index));
        for (axis, did_wrap) in axes.iter_mut().zip(wrapped) {
            if !did_wrap {
                *axis = wrap_axis(*axis + rng.gen_range(-span..=span), bounds);
            }
        }
    }

    Vec3::from(axes)
}

// Write every agent's next position into `next`.
// Reads generation-t positions from `snapshot` and generation-(t+1)
// velocities already stored in `next`; never reads a position from `next`
// Fails on the first agent whose new state is not finite
pub fn position_pass(
    snapshot: &AgentGrid,
    next: &mut [Agent],
    containment: &Containment,
    dt: f32,
    generation: u64,
    parallel: bool,
) -> Result<(), SimulationError> {
    let advance = |index: usize, slot: &mut Agent| -> Result<(), SimulationError> {
        let current = &snapshot[index];
        slot.position = integrate(index, current.position, slot.velocity, dt, containment, generation);

        if slot.is_finite() {
            Ok(())
        } else {
            Err(SimulationError::NonFiniteState { index })
        }
    };

    if parallel {
        let chunk_size = std::cmp::max(next.len() / rayon::current_num_threads(), 1);

        next.par_chunks_mut(chunk_size)
            .enumerate()
            .try_for_each(|(chunk_idx, chunk)| {
                for (offset, slot) in chunk.iter_mut().enumerate() {
                    advance(chunk_idx * chunk_size + offset, slot)?;
                }
                Ok(())
            })
    } else {
        for (index, slot) in next.iter_mut().enumerate() {
            advance(index, slot)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec3;

    fn containment(freedom: f32) -> Containment {
        Containment {
            bounds: 500.0,
            freedom,
            seed: 42,
        }
    }

    #[test]
    fn interior_positions_are_untouched() {
        assert_eq!(wrap_axis(499.5, 500.0), 499.5);
        assert_eq!(wrap_axis(-500.0, 500.0), -500.0);
        assert_eq!(wrap_axis(500.0, 500.0), 500.0);
    }

    #[test]
    fn crossing_a_face_re_enters_on_the_opposite_side() {
        assert!((wrap_axis(502.0, 500.0) + 498.0).abs() < 1e-3);
        assert!((wrap_axis(-503.0, 500.0) - 497.0).abs() < 1e-3);
        // Several domain widths away still lands inside
        let far = wrap_axis(4321.0, 500.0);
        assert!((-500.0..=500.0).contains(&far));
    }

    #[test]
    fn integrates_with_elapsed_time() {
        let next = integrate(0, vec3(1.0, 2.0, 3.0), vec3(10.0, -10.0, 0.0), 0.5, &containment(0.3), 0);
        assert_eq!(next, vec3(6.0, -3.0, 3.0));
    }

    #[test]
    fn outward_agent_at_the_edge_is_wrapped() {
        let edge = 500.0 - 1e-3;
        let next = integrate(3, vec3(edge, 0.0, 0.0), vec3(10.0, 0.0, 0.0), 1.0, &containment(0.3), 9);
        for axis in next.to_array() {
            assert!((-500.0..=500.0).contains(&axis));
        }
        assert!(next.x < 0.0);
    }

    #[test]
    fn scatter_is_bounded_and_deterministic() {
        let c = containment(1.0);
        let a = integrate(5, vec3(499.0, 10.0, -20.0), vec3(5.0, 0.0, 0.0), 1.0, &c, 17);
        let b = integrate(5, vec3(499.0, 10.0, -20.0), vec3(5.0, 0.0, 0.0), 1.0, &c, 17);
        assert_eq!(a, b);

        let span = 500.0 * SCATTER_FRACTION;
        assert!((a.y - 10.0).abs() <= span);
        assert!((a.z + 20.0).abs() <= span);
    }

    #[test]
    fn zero_freedom_wraps_without_scatter() {
        let next = integrate(5, vec3(499.0, 10.0, -20.0), vec3(5.0, 0.0, 0.0), 1.0, &containment(0.0), 17);
        assert_eq!(next.y, 10.0);
        assert_eq!(next.z, -20.0);
    }

    #[test]
    fn non_finite_state_fails_the_pass() {
        let snapshot = AgentGrid::from_agents(vec![Agent::ZERO, Agent::ZERO], 2);
        let mut next = vec![Agent::ZERO, Agent::new(Vec3::ZERO, vec3(f32::NAN, 0.0, 0.0))];

        let err = position_pass(&snapshot, &mut next, &containment(0.3), 0.016, 0, false).unwrap_err();
        assert!(matches!(err, SimulationError::NonFiniteState { index: 1 }));
    }
}
