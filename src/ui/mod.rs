//! Terminal user interface for the slideshow.
//!
//! - `loop_runner`: event loop and terminal setup
//! - `input`: key dispatch through the keybinding registry
//! - `events`: background completions applied to the presenter
//! - `render`: frame layout and the minimum-size guard
//! - `slide`, `summary`, `status`, `help`: the individual regions

mod events;
mod help;
mod input;
mod loop_runner;
mod render;
mod slide;
mod status;
mod summary;

pub use loop_runner::{run, Action};
pub use summary::render_html;

/// Braille spinner frames for loading indicators.
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
