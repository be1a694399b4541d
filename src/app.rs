/*
 * Application Module
 *
 * This module defines the viewer model and its per-frame update. The viewer
 * is a thin collaborator: it ticks the simulation once per frame with the
 * frame's elapsed time, forwards pointer movement, and lets the user edit a
 * parameter draft that takes effect on restart.
 */

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::debug::DebugInfo;
use crate::input::{mouse_moved, raw_window_event};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::scheduler::Simulation;
use crate::ui;

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    // Parameters being edited in the UI, applied on restart
    pub draft: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub paused: bool,
    pub show_debug: bool,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Get the primary monitor's dimensions
    let monitor = app.primary_monitor().expect("Failed to get primary monitor");
    let monitor_size = monitor.size();

    // Calculate window size based on monitor size (80% of monitor size)
    let window_width = monitor_size.width as f32 * 0.8;
    let window_height = monitor_size.height as f32 * 0.8;

    let window_id = app
        .new_window()
        .title("Murmuration")
        .size(window_width as u32, window_height as u32)
        .view(view)
        .mouse_moved(mouse_moved)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window closed during startup");
    let egui = Egui::from_window(&window);

    let params = SimulationParams::default();
    let simulation = Simulation::new(params.clone()).expect("Failed to start simulation");

    let debug_info = DebugInfo {
        agent_count: simulation.agent_count(),
        ..DebugInfo::default()
    };

    Model {
        simulation,
        draft: params,
        egui,
        debug_info,
        paused: false,
        show_debug: false,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let restart_requested = ui::update_ui(
        &mut model.egui,
        &mut model.draft,
        &mut model.paused,
        &mut model.show_debug,
        &model.debug_info,
    );

    if restart_requested {
        restart(model);
    }

    if model.paused {
        return;
    }

    match model.simulation.tick(update.since_last.as_secs_f32()) {
        Ok(report) => model.debug_info.record_tick(&report),
        Err(err) => model.debug_info.record_error(err.to_string()),
    }
}

fn restart(model: &mut Model) {
    match model.simulation.restart(model.draft.clone()) {
        Ok(()) => {
            model.debug_info = DebugInfo {
                agent_count: model.simulation.agent_count(),
                ..DebugInfo::default()
            };
        }
        Err(err) => {
            tracing::warn!(error = %err, "restart rejected");
            model.debug_info.record_error(err.to_string());
        }
    }
}
