pub mod level;
pub mod scene;
pub mod snapshot;
pub mod time;
pub mod world;
