/*
 * Murmuration Flocking Simulation - Module Definitions
 *
 * The simulation core (params, agent, store, physics, integrate, interaction,
 * scheduler) has no windowing dependencies beyond nannou's vector types. The
 * viewer modules (app, renderer, input, ui, debug) drive it from a nannou
 * window.
 */

// Re-export key components for easier access
pub use agent::{Agent, AgentGrid};
pub use error::SimulationError;
pub use interaction::InteractionSignal;
pub use params::{SimulationParams, Zones};
pub use scheduler::{Simulation, TickReport};
pub use store::{AgentStore, NextGeneration};
pub use debug::DebugInfo;
pub use app::Model;

// Simulation core
pub mod agent;
pub mod error;
pub mod integrate;
pub mod interaction;
pub mod params;
pub mod physics;
pub mod scheduler;
pub mod store;

// Viewer
pub mod app;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;

// Constants
pub const BOID_SIZE: f32 = 6.0;
