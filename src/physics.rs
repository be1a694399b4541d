/*
 * Physics Module
 *
 * This module holds the velocity update kernel. Each agent's next velocity is
 * a pure function of the previous generation, the zone geometry, the elapsed
 * time and the optional predator point:
 * 1. Predator repulsion (planar, within a fixed radius)
 * 2. A soft pull toward the origin, weighted vertically
 * 3. An all-pairs neighbor scan split into separation, alignment and
 *    cohesion bands, blended with raised-cosine weights
 * 4. A speed clamp
 *
 * The kernel never sees the generation being written, so agents can be
 * dispatched across the rayon pool in any order.
 */

use std::f32::consts::TAU;

use nannou::prelude::Vec3;
use rayon::prelude::*;

use crate::agent::{Agent, AgentGrid};
use crate::params::Zones;

pub const BASE_SPEED_LIMIT: f32 = 10.0;
pub const PREDATOR_SPEED_BONUS: f32 = 5.0;
pub const PREDATOR_RADIUS: f32 = 50.0;
const PREDATOR_STRENGTH: f32 = 160.0;
const CENTER_PULL: f32 = 6.0;
const VERTICAL_WEIGHT: f32 = 2.5;
const COINCIDENT_DISTANCE: f32 = 1e-4;

/// Which force rule applies to a neighbor at a normalized zone distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Separation,
    Alignment,
    Cohesion,
}

impl Zone {
    pub fn classify(percent: f32, zones: &Zones) -> Zone {
        if percent < zones.separation_thresh {
            Zone::Separation
        } else if percent < zones.alignment_thresh {
            Zone::Alignment
        } else {
            Zone::Cohesion
        }
    }
}

// Grows without bound as percent approaches zero, zero at the band's outer edge
pub fn separation_weight(percent: f32, separation_thresh: f32) -> f32 {
    separation_thresh / percent - 1.0
}

// Raised cosine over the alignment band, t in [0, 1]
pub fn alignment_weight(t: f32) -> f32 {
    0.5 - (t * TAU).cos() * 0.5 + 0.5
}

// Complementary raised cosine over the cohesion band, t in [0, 1]
pub fn cohesion_weight(t: f32) -> f32 {
    0.5 - ((t * TAU).cos() * -0.5 + 0.5)
}

/// Velocity change from the predator, if the agent is inside its radius.
/// Influence is planar: the z offset to the predator is ignored.
pub fn predator_push(position: Vec3, predator: Vec3, dt: f32) -> Option<Vec3> {
    let mut dir = predator - position;
    dir.z = 0.0;
    let dist = dir.length();

    if dist < PREDATOR_RADIUS {
        let strength = (dist * dist) / (PREDATOR_RADIUS * PREDATOR_RADIUS) * dt * PREDATOR_STRENGTH;
        Some(dir.normalize_or_zero() * strength)
    } else {
        None
    }
}

/// Compute generation-(t+1) velocity of agent `index` from generation t.
pub fn next_velocity(
    index: usize,
    snapshot: &AgentGrid,
    zones: &Zones,
    dt: f32,
    predator: Option<Vec3>,
) -> Vec3 {
    let agents = snapshot.as_slice();
    let me = agents[index];

    let mut velocity = me.velocity;
    let mut limit = BASE_SPEED_LIMIT;

    if let Some(push) = predator.and_then(|target| predator_push(me.position, target, dt)) {
        velocity += push;
        limit += PREDATOR_SPEED_BONUS;
    }

    // Keep the flock loosely centered, flattened vertically
    let mut to_center = me.position;
    to_center.y *= VERTICAL_WEIGHT;
    velocity -= to_center.normalize_or_zero() * dt * CENTER_PULL;

    if zones.has_influence() {
        velocity += neighbor_influence(index, agents, zones, dt);
    }

    clamp_speed(velocity, limit)
}

// Rescale to at most `limit`; the result's f32 length never exceeds it
pub fn clamp_speed(velocity: Vec3, limit: f32) -> Vec3 {
    let speed = velocity.length();
    if speed.is_nan() || speed <= limit {
        return velocity;
    }

    let mut clamped = velocity * (f64::from(limit) / f64::from(speed)) as f32;
    // Rounding can leave the length a few ulps over
    while clamped.length() > limit {
        clamped *= 1.0 - f32::EPSILON;
    }
    clamped
}

fn neighbor_influence(index: usize, agents: &[Agent], zones: &Zones, dt: f32) -> Vec3 {
    let me = agents[index];
    let mut delta = Vec3::ZERO;

    for (j, other) in agents.iter().enumerate() {
        if j == index {
            continue;
        }

        let dir = other.position - me.position;
        let dist = dir.length();
        let dist_sq = dist * dist;

        // Also rejects NaN distances
        let in_range = dist >= COINCIDENT_DISTANCE && dist_sq <= zones.radius_sq;
        if !in_range {
            continue;
        }

        let percent = dist_sq / zones.radius_sq;
        let heading = dir / dist;

        match Zone::classify(percent, zones) {
            Zone::Separation => {
                let f = separation_weight(percent, zones.separation_thresh) * dt;
                delta -= heading * f;
            }
            Zone::Alignment => {
                let span = zones.alignment_thresh - zones.separation_thresh;
                let t = (percent - zones.separation_thresh) / span;
                let f = alignment_weight(t) * dt;
                delta += other.velocity.normalize_or_zero() * f;
            }
            Zone::Cohesion => {
                let span = 1.0 - zones.alignment_thresh;
                // Zero-width cohesion band
                if span <= 0.0 {
                    continue;
                }
                let t = (percent - zones.alignment_thresh) / span;
                let f = cohesion_weight(t) * dt;
                delta += heading * f;
            }
        }
    }

    delta
}

/// Write every agent's next velocity into `next`, reading only `snapshot`.
pub fn velocity_pass(
    snapshot: &AgentGrid,
    next: &mut [Agent],
    zones: &Zones,
    dt: f32,
    predator: Option<Vec3>,
    parallel: bool,
) {
    if parallel {
        let chunk_size = std::cmp::max(next.len() / rayon::current_num_threads(), 1);

        next.par_chunks_mut(chunk_size).enumerate().for_each(|(chunk_idx, chunk)| {
            for (offset, slot) in chunk.iter_mut().enumerate() {
                let i = chunk_idx * chunk_size + offset;
                slot.velocity = next_velocity(i, snapshot, zones, dt, predator);
            }
        });
    } else {
        for (i, slot) in next.iter_mut().enumerate() {
            slot.velocity = next_velocity(i, snapshot, zones, dt, predator);
        }
    }
}
