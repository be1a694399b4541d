/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that collects frame and tick
 * metrics for the viewer's diagnostics panel.
 */

use std::time::Duration;

use crate::scheduler::TickReport;

// Debug information to display
#[derive(Debug, Default, Clone)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub tick_time: Duration,
    pub generation: u64,
    pub agent_count: usize,
    pub predator_active: bool,
    pub last_error: Option<String>,
}

impl DebugInfo {
    pub fn record_tick(&mut self, report: &TickReport) {
        self.tick_time = report.elapsed;
        self.generation = report.generation;
        self.predator_active = report.predator_active;
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }
}
