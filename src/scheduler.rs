/*
 * Frame Scheduler Module
 *
 * Simulation owns the agent store and drives one tick per rendered frame:
 * 1. Consume this frame's pointer sample, if any
 * 2. Velocity kernel over every agent (reads generation t)
 * 3. Position kernel over every agent (generation-t positions, t+1 velocities)
 * 4. Promote generation t+1
 *
 * A failing tick is dropped whole; generation t stays current.
 */

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::agent::{Agent, AgentGrid};
use crate::error::SimulationError;
use crate::integrate::{self, Containment};
use crate::interaction::{predator_target, InteractionSignal};
use crate::params::{SimulationParams, Zones};
use crate::physics;
use crate::store::AgentStore;

// Longest elapsed time a single tick will integrate, in seconds
pub const MAX_ELAPSED: f32 = 1.0;

/// Summary of one completed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub generation: u64,
    pub dt: f32,
    pub predator_active: bool,
    pub elapsed: Duration,
}

pub struct Simulation {
    params: SimulationParams,
    zones: Zones,
    containment: Containment,
    store: AgentStore,
    interaction: InteractionSignal,
    generation: u64,
}

impl Simulation {
    // Build a simulation with a randomly spawned flock
    pub fn new(params: SimulationParams) -> Result<Self, SimulationError> {
        params.validate()?;

        let seed = params.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        let store = AgentStore::seeded(params.agent_count(), params.grid_resolution(), &mut rng)?;

        Ok(Self::assemble(params, store, seed))
    }

    // Build a simulation whose first generation is exactly `agents`
    // The agent count is taken from `agents`, not from `params`
    pub fn from_agents(params: SimulationParams, agents: Vec<Agent>) -> Result<Self, SimulationError> {
        params.validate()?;

        if agents.is_empty() {
            return Err(SimulationError::InvalidConfig("a flock needs at least one agent".to_string()));
        }
        if let Some(index) = agents.iter().position(|agent| !agent.is_finite()) {
            return Err(SimulationError::InvalidConfig(format!(
                "agent {index} has a non-finite position or velocity"
            )));
        }

        let seed = params.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let resolution = (agents.len() as f64).sqrt().ceil() as u32;
        let store = AgentStore::from_agents(agents, resolution)?;

        Ok(Self::assemble(params, store, seed))
    }

    fn assemble(params: SimulationParams, store: AgentStore, seed: u64) -> Self {
        let zones = params.zones();
        let containment = Containment {
            bounds: params.bounds,
            freedom: params.freedom,
            seed,
        };

        tracing::info!(
            agents = store.len(),
            resolution = store.read().resolution(),
            zone_radius = zones.radius_sq.sqrt(),
            parallel = params.parallel,
            "flock allocated"
        );

        Self {
            params,
            zones,
            containment,
            store,
            interaction: InteractionSignal::new(),
            generation: 0,
        }
    }

    // Replace the flock with a fresh one built from `params`
    // On failure the running flock is left as it was
    pub fn restart(&mut self, params: SimulationParams) -> Result<(), SimulationError> {
        *self = Self::new(params)?;
        Ok(())
    }

    // Advance the flock by one generation
    pub fn tick(&mut self, elapsed: f32) -> Result<TickReport, SimulationError> {
        let started = Instant::now();
        let dt = clamp_elapsed(elapsed);
        let predator = self
            .interaction
            .consume()
            .map(|sample| predator_target(sample, self.params.bounds));
        let generation = self.generation + 1;
        let parallel = self.params.parallel;

        let mut frame = self.store.begin_frame();
        {
            let (snapshot, next) = frame.parts();

            physics::velocity_pass(snapshot, next, &self.zones, dt, predator, parallel);

            // The velocity pass has fully returned before positions are touched
            if let Err(err) =
                integrate::position_pass(snapshot, next, &self.containment, dt, generation, parallel)
            {
                tracing::error!(generation, error = %err, "tick abandoned");
                return Err(err);
            }
        }
        frame.commit();
        self.generation = generation;

        let report = TickReport {
            generation,
            dt,
            predator_active: predator.is_some(),
            elapsed: started.elapsed(),
        };
        tracing::trace!(
            generation,
            dt,
            predator = report.predator_active,
            micros = report.elapsed.as_micros() as u64,
            "tick"
        );

        Ok(report)
    }

    // The current generation, for renderers. Re-fetch every frame
    pub fn frame(&self) -> &AgentGrid {
        self.store.read()
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.interaction.set_pointer(x, y);
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn zones(&self) -> &Zones {
        &self.zones
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn agent_count(&self) -> usize {
        self.store.len()
    }
}

// Clamp a frame's elapsed time to `[0, MAX_ELAPSED]`; non-finite becomes 0.
pub fn clamp_elapsed(elapsed: f32) -> f32 {
    if !elapsed.is_finite() || elapsed < 0.0 {
        tracing::debug!(elapsed, "discarding invalid elapsed time");
        return 0.0;
    }

    if elapsed > MAX_ELAPSED {
        tracing::debug!(elapsed, "clamping elapsed time after a stall");
        return MAX_ELAPSED;
    }

    elapsed
}
