mod detail;
mod gallery;
mod help;

use crate::app::{App, View};
use ratatui::Frame;

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    match app.view {
        View::Gallery => gallery::render(app, frame),
        View::Detail => detail::render(app, frame),
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}
