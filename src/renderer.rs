/*
 * Renderer Module
 *
 * Draws the current generation with an orthographic x/y projection. The
 * domain's [-bounds, bounds] square is stretched over the window so a pointer
 * sample lands on the predator's world position. Depth only tints the agent.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::ui;
use crate::BOID_SIZE;

/// World x/y to screen coordinates for a domain of half-width `bounds`.
pub fn world_to_screen(position: Vec3, bounds: f32, window_rect: Rect) -> Vec2 {
    let scale = vec2(window_rect.w() * 0.5 / bounds, window_rect.h() * 0.5 / bounds);
    vec2(position.x * scale.x, position.y * scale.y) + window_rect.xy()
}

// Nearer agents (higher z) are drawn brighter
fn depth_shade(z: f32, bounds: f32) -> f32 {
    let depth = ((z / bounds) * 0.5 + 0.5).clamp(0.0, 1.0);
    0.35 + depth * 0.65
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let bounds = model.simulation.params().bounds;

    draw.rect()
        .xy(window_rect.xy())
        .wh(window_rect.wh())
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.3, 0.3, 0.3, 1.0));

    let points = [
        pt2(BOID_SIZE, 0.0),
        pt2(-BOID_SIZE, BOID_SIZE / 2.0),
        pt2(-BOID_SIZE, -BOID_SIZE / 2.0),
    ];

    // Re-fetched every frame; never cached across ticks
    for agent in model.simulation.frame() {
        let screen_pos = world_to_screen(agent.position, bounds, window_rect);
        let angle = agent.velocity.y.atan2(agent.velocity.x);
        let shade = depth_shade(agent.position.z, bounds);

        draw.polygon()
            .color(rgb(shade, shade, shade))
            .points(points.iter().cloned())
            .xy(screen_pos)
            .rotate(angle);
    }

    if model.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect, bounds);
    }

    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}
