//! Terminal slideshow for astrophotography catalogs.
//!
//! The crate is split into a surface-agnostic core and a ratatui front-end:
//!
//! - [`catalog`] - slide records and the one-shot catalog loader
//! - [`content`] - network collaborators (Wikipedia summaries, image preloads)
//! - [`presenter`] - slideshow state machine driven through the [`presenter::SlideView`]
//!   and [`presenter::SlideBackend`] seams
//! - [`screen`] - the terminal-side implementation of `SlideView`
//! - [`app`], [`tasks`], [`ui`] - event loop wiring, background tasks and rendering

pub mod app;
pub mod catalog;
pub mod config;
pub mod content;
pub mod keybindings;
pub mod logging;
pub mod presenter;
pub mod screen;
pub mod tasks;
pub mod theme;
pub mod ui;
pub mod util;
