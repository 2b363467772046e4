mod app;
pub mod logging;
mod prompt;
mod ui;

pub use app::run_app;
