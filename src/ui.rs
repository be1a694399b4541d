/*
 * UI Module
 *
 * Control panel built with nannou_egui. Flock parameters are edited on a
 * draft copy; the running simulation only picks them up on "Restart Flock"
 * since a Simulation's parameters are fixed for its lifetime.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;

// Update the UI and return whether a restart with the draft was requested
pub fn update_ui(
    egui: &mut Egui,
    draft: &mut SimulationParams,
    paused: &mut bool,
    show_debug: &mut bool,
    debug_info: &DebugInfo,
) -> bool {
    let mut restart_requested = false;

    let ctx = egui.begin_frame();

    egui::Window::new("Murmuration Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flock", |ui| {
                let mut explicit_count = draft.birds.is_some();
                ui.checkbox(&mut explicit_count, "Explicit bird count");

                if explicit_count {
                    let mut birds = draft.birds.unwrap_or(draft.resolution * draft.resolution);
                    ui.add(egui::Slider::new(&mut birds, SimulationParams::get_birds_range()).logarithmic(true).text("Birds"));
                    draft.birds = Some(birds);
                } else {
                    draft.birds = None;
                    ui.add(egui::Slider::new(&mut draft.resolution, SimulationParams::get_resolution_range()).logarithmic(true).text("Resolution"));
                }

                ui.label(format!("Agents after restart: {}", draft.agent_count()));
            });

            ui.collapsing("Zones", |ui| {
                ui.add(egui::Slider::new(&mut draft.separation, SimulationParams::get_zone_distance_range()).text("Separation"));
                ui.add(egui::Slider::new(&mut draft.alignment, SimulationParams::get_zone_distance_range()).text("Alignment"));
                ui.add(egui::Slider::new(&mut draft.cohesion, SimulationParams::get_zone_distance_range()).text("Cohesion"));
            });

            ui.collapsing("Domain", |ui| {
                ui.add(egui::Slider::new(&mut draft.bounds, SimulationParams::get_bounds_range()).logarithmic(true).text("Bounds"));
                ui.add(egui::Slider::new(&mut draft.freedom, SimulationParams::get_freedom_range()).text("Freedom"));
                ui.checkbox(&mut draft.parallel, "Parallel kernels");
            });

            if ui.button("Restart Flock").clicked() {
                restart_requested = true;
            }

            ui.separator();

            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Tick: {:.2} ms", debug_info.tick_time.as_secs_f64() * 1000.0));
            ui.label(format!("Generation: {}", debug_info.generation));
            if let Some(error) = &debug_info.last_error {
                ui.colored_label(egui::Color32::LIGHT_RED, error.as_str());
            }

            ui.checkbox(show_debug, "Show Debug Info");
            ui.checkbox(paused, "Pause Simulation");
        });

    restart_requested
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    bounds: f32,
) {
    // Create a background panel in the top-right corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * 6.0 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = panel_x;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Tick time: {:.2} ms", debug_info.tick_time.as_secs_f64() * 1000.0),
        format!("Agents: {}", debug_info.agent_count),
        format!("Predator: {}", if debug_info.predator_active { "active" } else { "idle" }),
        format!("Bounds: ±{:.0}", bounds),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
