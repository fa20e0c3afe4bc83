// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod aids;
pub mod app_dirs;
pub mod audio;
pub mod config;
pub mod game;
pub mod input;
pub mod logging;
pub mod menu;
pub mod number_pool;
pub mod runtime;
pub mod scoring;
pub mod settings;

/// Game frames per second
pub const FPS: u32 = 60;
