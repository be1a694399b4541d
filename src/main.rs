/*
 * Murmuration Viewer
 *
 * Opens a window onto a flock of agents that separate, align and cohere in
 * overlapping zones. Moving the pointer over the window scatters agents near
 * it for a frame. Set RUST_LOG (e.g. RUST_LOG=murmuration=debug) for logs.
 */

use murmuration::app;

fn main() {
    tracing_subscriber::fmt::init();

    nannou::app(app::model)
        .update(app::update)
        .run();
}
