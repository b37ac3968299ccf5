//! Ratatui front-end for the roster. The submodules split event handling
//! (`app`), form state (`forms`), the projected table (`screens`), layout
//! helpers and the terminal loop.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
