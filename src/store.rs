/*
 * Agent State Store Module
 *
 * Two physical generations of the flock with one designated as current.
 * Consumers only ever borrow the current generation. Writes go through a
 * NextGeneration guard: committing it promotes the written buffer, dropping
 * it without a commit leaves the current generation untouched.
 */

use rand::Rng;

use crate::agent::{Agent, AgentGrid};
use crate::error::SimulationError;

pub struct AgentStore {
    generations: [AgentGrid; 2],
    current: usize,
}

impl AgentStore {
    pub fn allocate(count: usize, resolution: u32) -> Result<Self, SimulationError> {
        let front = AgentGrid::try_zeroed(count, resolution)?;
        let back = AgentGrid::try_zeroed(count, resolution)?;

        Ok(Self {
            generations: [front, back],
            current: 0,
        })
    }

    // Provision both generations and fill the current one with random agents
    pub fn seeded<R: Rng + ?Sized>(
        count: usize,
        resolution: u32,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        let mut store = Self::allocate(count, resolution)?;
        for slot in store.generations[store.current].as_mut_slice() {
            *slot = Agent::random(rng);
        }
        Ok(store)
    }

    // Build a store whose current generation is exactly `agents`
    pub fn from_agents(agents: Vec<Agent>, resolution: u32) -> Result<Self, SimulationError> {
        let back = AgentGrid::try_zeroed(agents.len(), resolution)?;
        Ok(Self {
            generations: [AgentGrid::from_agents(agents, resolution), back],
            current: 0,
        })
    }

    pub fn read(&self) -> &AgentGrid {
        &self.generations[self.current]
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Open the non-current generation for writing
    pub fn begin_frame(&mut self) -> NextGeneration<'_> {
        NextGeneration { store: self }
    }

    fn next_index(&self) -> usize {
        1 - self.current
    }
}

/// An in-progress frame. Holds the store mutably, so nothing can read a
/// half-written generation while it is alive.
pub struct NextGeneration<'a> {
    store: &'a mut AgentStore,
}

impl<'a> NextGeneration<'a> {
    pub fn write_next(&mut self, index: usize, agent: Agent) -> Result<(), SimulationError> {
        let next = self.store.next_index();
        let slots = self.store.generations[next].as_mut_slice();
        let len = slots.len();
        let slot = slots
            .get_mut(index)
            .ok_or(SimulationError::IndexOutOfRange { index, len })?;
        *slot = agent;
        Ok(())
    }

    // Split into the read-only snapshot and the writable next generation
    pub fn parts(&mut self) -> (&AgentGrid, &mut [Agent]) {
        let current = self.store.current;
        let [first, second] = &mut self.store.generations;
        if current == 0 {
            (&*first, second.as_mut_slice())
        } else {
            (&*second, first.as_mut_slice())
        }
    }

    // Promote the written generation to current
    pub fn commit(self) {
        self.store.current = self.store.next_index();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec3;

    fn agent(x: f32) -> Agent {
        Agent::new(vec3(x, 0.0, 0.0), vec3(0.0, x, 0.0))
    }

    #[test]
    fn commit_promotes_written_generation() {
        let mut store = AgentStore::from_agents(vec![agent(1.0), agent(2.0)], 2).unwrap();

        let mut frame = store.begin_frame();
        frame.write_next(0, agent(10.0)).unwrap();
        frame.write_next(1, agent(20.0)).unwrap();
        frame.commit();

        assert_eq!(store.read()[0], agent(10.0));
        assert_eq!(store.read()[1], agent(20.0));
    }

    #[test]
    fn dropped_frame_keeps_current_generation() {
        let mut store = AgentStore::from_agents(vec![agent(1.0)], 1).unwrap();

        {
            let mut frame = store.begin_frame();
            frame.write_next(0, agent(99.0)).unwrap();
        }

        assert_eq!(store.read()[0], agent(1.0));
    }

    #[test]
    fn parts_alternate_between_buffers() {
        let mut store = AgentStore::from_agents(vec![agent(1.0)], 1).unwrap();

        let mut frame = store.begin_frame();
        {
            let (snapshot, next) = frame.parts();
            assert_eq!(snapshot[0], agent(1.0));
            next[0] = agent(2.0);
        }
        frame.commit();

        let mut frame = store.begin_frame();
        {
            let (snapshot, next) = frame.parts();
            assert_eq!(snapshot[0], agent(2.0));
            next[0] = agent(3.0);
        }
        frame.commit();

        assert_eq!(store.read()[0], agent(3.0));
    }

    #[test]
    fn out_of_range_write_is_rejected() {
        let mut store = AgentStore::allocate(3, 2).unwrap();
        let mut frame = store.begin_frame();
        let err = frame.write_next(3, Agent::ZERO).unwrap_err();
        assert!(matches!(err, SimulationError::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn oversized_allocation_reports_failure() {
        let err = AgentStore::allocate(usize::MAX / 2, 1).err().unwrap();
        assert!(matches!(err, SimulationError::Allocation { .. }));
    }
}
