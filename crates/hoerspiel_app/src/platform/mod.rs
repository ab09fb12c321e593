mod app;
mod cli;
mod config;
mod effects;
mod ui;

pub use app::run_app;
pub use cli::Cli;
