// Library surface for headless/integration tests and reuse.
// main.rs only parses flags, sets up logging and owns the terminal.
pub mod app;
pub mod app_dirs;
pub mod chat;
pub mod clock;
pub mod config;
pub mod controller;
pub mod crisis;
pub mod error;
pub mod leaderboard;
pub mod mood;
pub mod quiz;
pub mod runtime;
pub mod session;
pub mod store;
pub mod ui;
pub mod util;
pub mod view;
