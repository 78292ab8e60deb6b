use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Environment variable that overrides asset root detection.
pub const ASSET_ROOT_ENV: &str = "QUEST_ASSET_ROOT";

/// Cached path to the directory holding `quests/` and the engine config.
static ASSET_ROOT: LazyLock<PathBuf> = LazyLock::new(detect_asset_root);

pub fn asset_root() -> PathBuf {
    ASSET_ROOT.clone()
}

/// Construct a path relative to the resolved asset root.
pub fn asset_path(relative: impl AsRef<Path>) -> PathBuf {
    ASSET_ROOT.join(relative)
}

/// Resolve the most likely location of the asset directory.
fn detect_asset_root() -> PathBuf {
    if let Ok(root) = env::var(ASSET_ROOT_ENV)
        && !root.trim().is_empty()
    {
        return PathBuf::from(root);
    }

    let mut candidates = Vec::new();

    // Common layouts: workspace root and flattened `assets/`.
    candidates.push(PathBuf::from("quest_engine/assets"));
    candidates.push(PathBuf::from("assets"));

    if let Ok(exe_path) = env::current_exe()
        && let Some(dir) = exe_path.parent()
    {
        candidates.push(dir.join("assets"));
        if let Some(parent) = dir.parent() {
            candidates.push(parent.join("assets"));
        }
    }

    first_existing_dir(candidates).unwrap_or_else(|| PathBuf::from("assets"))
}

fn first_existing_dir(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|candidate| candidate.is_dir())
}
