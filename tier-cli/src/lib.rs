pub mod app;
pub mod config;
pub mod logging;
pub mod status_line;
pub mod terminal;
