/*
 * Agent Module
 *
 * This module defines the per-agent record and the AgentGrid that holds one
 * generation of the flock. Agents are addressed by a flat index; a 2D grid
 * coordinate is derived from the grid resolution for consumers that lay the
 * flock out as a texture-like grid.
 */

use nannou::prelude::{vec3, Vec3};
use rand::Rng;

use crate::error::SimulationError;

/// One flocking agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Agent {
    pub const ZERO: Agent = Agent {
        position: Vec3::ZERO,
        velocity: Vec3::ZERO,
    };

    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    // Random spawn: positions in [0, 100)^3, velocities in [-5, 5]^3
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let position = vec3(
            rng.gen_range(0.0..100.0),
            rng.gen_range(0.0..100.0),
            rng.gen_range(0.0..100.0),
        );
        let velocity = vec3(
            rng.gen_range(-5.0..=5.0),
            rng.gen_range(-5.0..=5.0),
            rng.gen_range(-5.0..=5.0),
        );
        Self { position, velocity }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// One complete generation of agents.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentGrid {
    agents: Vec<Agent>,
    resolution: u32,
}

impl AgentGrid {
    /// Allocate a zeroed grid, reporting allocation failure instead of aborting.
    pub fn try_zeroed(count: usize, resolution: u32) -> Result<Self, SimulationError> {
        let mut agents = Vec::new();
        agents
            .try_reserve_exact(count)
            .map_err(|source| SimulationError::Allocation { count, source })?;
        agents.resize(count, Agent::ZERO);

        Ok(Self { agents, resolution })
    }

    pub fn from_agents(agents: Vec<Agent>, resolution: u32) -> Self {
        Self { agents, resolution }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn get(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    /// Grid coordinate `(column, row)` of a flat index.
    pub fn coord(&self, index: usize) -> (u32, u32) {
        let resolution = self.resolution.max(1) as usize;
        ((index % resolution) as u32, (index / resolution) as u32)
    }
}

impl std::ops::Index<usize> for AgentGrid {
    type Output = Agent;

    fn index(&self, index: usize) -> &Agent {
        &self.agents[index]
    }
}

impl<'a> IntoIterator for &'a AgentGrid {
    type Item = &'a Agent;
    type IntoIter = std::slice::Iter<'a, Agent>;

    fn into_iter(self) -> Self::IntoIter {
        self.agents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_agents_respect_spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let agent = Agent::random(&mut rng);
            for axis in agent.position.to_array() {
                assert!((0.0..100.0).contains(&axis));
            }
            for axis in agent.velocity.to_array() {
                assert!((-5.0..=5.0).contains(&axis));
            }
        }
    }

    #[test]
    fn coord_follows_resolution() {
        let grid = AgentGrid::try_zeroed(10, 4).unwrap();
        assert_eq!(grid.coord(0), (0, 0));
        assert_eq!(grid.coord(5), (1, 1));
        assert_eq!(grid.coord(9), (1, 2));
    }

    #[test]
    fn non_finite_agent_is_detected() {
        let agent = Agent::new(vec3(f32::NAN, 0.0, 0.0), Vec3::ZERO);
        assert!(!agent.is_finite());
        assert!(Agent::ZERO.is_finite());
    }
}
