pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::GameConfig;
pub use api::session::{Checkpoint, CheckpointSlot, Session};
pub use api::types::{EntityId, Facing, Transition};
pub use components::entity::{BannerKind, Capabilities, Effect, Entity, EntityKind};
pub use components::hero::{Hero, HeroSize};
pub use components::layer::Layer;
pub use core::level::{Level, LevelLayout, LevelRules};
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, TICK_DT};
pub use renderer::instance::{EntityInstance, InstanceBuffer};
pub use assets::config::SessionConfig;
pub use assets::level_file::LevelFile;
pub use assets::loader::{DirectoryLoader, LevelCatalog, LevelLoader, LoadError};
pub use bridge::protocol::{ProtocolLayout, StatusBlock};
