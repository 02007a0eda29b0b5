pub mod config;
pub mod level_file;
pub mod loader;
