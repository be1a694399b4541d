/*
 * Input Module
 *
 * Turns window events into simulation input. Pointer movement becomes an
 * interaction sample in normalized device coordinates; everything else is
 * handed to egui.
 */

use nannou::prelude::*;

use crate::app::Model;

/// Window-space point to normalized device coordinates, per axis.
pub fn to_ndc(pos: Point2, window_rect: Rect) -> Vec2 {
    let half_w = (window_rect.w() * 0.5).max(1.0);
    let half_h = (window_rect.h() * 0.5).max(1.0);
    vec2((pos.x - window_rect.x()) / half_w, (pos.y - window_rect.y()) / half_h)
}

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    // Pointer over the control panel does not disturb the flock
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    let ndc = to_ndc(pos, app.window_rect());
    model.simulation.set_pointer(ndc.x, ndc.y);
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
