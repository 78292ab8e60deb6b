//! Asset lookup used by the quest cache.
//!
//! The cache only needs "path → raw text, or nothing"; where the text lives
//! is up to the `QuestSource` implementation.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Folder, relative to an asset root, holding quest sources.
pub const QUEST_DIR: &str = "quests";
/// File extension of quest sources.
pub const QUEST_EXTENSION: &str = "qst";

/// Asset path of the quest called `name`: `quests/<lower-cased name>.qst`.
pub fn quest_asset_path(name: &str) -> String {
    format!("{QUEST_DIR}/{}.{QUEST_EXTENSION}", name.to_lowercase())
}

/// Something that can hand out raw asset text by relative path.
pub trait QuestSource {
    /// Fetch the asset at `path`, or `Ok(None)` if there is no such asset.
    ///
    /// # Errors
    /// Returns an error when the asset exists but cannot be read.
    fn find_asset(&self, path: &str) -> io::Result<Option<String>>;
}

impl<S: QuestSource + ?Sized> QuestSource for &S {
    fn find_asset(&self, path: &str) -> io::Result<Option<String>> {
        (**self).find_asset(path)
    }
}

/// Assets stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of every quest source under `<root>/quests`, sorted.
    ///
    /// # Errors
    /// Returns an error if the quest folder exists but cannot be listed.
    pub fn quest_names(&self) -> io::Result<Vec<String>> {
        let dir = self.root.join(QUEST_DIR);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(QUEST_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

impl QuestSource for AssetDir {
    fn find_asset(&self, path: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.root.join(path)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// In-memory assets keyed by asset path.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<String, String>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the source of quest `name` under its usual asset path.
    #[must_use]
    pub fn with_quest(mut self, name: &str, source: impl Into<String>) -> Self {
        self.insert(quest_asset_path(name), source);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, source: impl Into<String>) {
        self.files.insert(path.into(), source.into());
    }
}

impl QuestSource for MemoryAssets {
    fn find_asset(&self, path: &str) -> io::Result<Option<String>> {
        Ok(self.files.get(path).cloned())
    }
}
