#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const QUEST_ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod assets;
pub mod cache;
pub mod config;
pub mod data_paths;

// Re-exports for convenience
pub use assets::{AssetDir, MemoryAssets, QuestSource, quest_asset_path};
pub use cache::{QuestCache, QuestError};
pub use config::{EngineConfig, load_config};
pub use quest_data::{Command, QuestDefinition, Resource, ResourceKind, TaskDefinition};
