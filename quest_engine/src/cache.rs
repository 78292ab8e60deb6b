//! Process-lifetime cache of parsed quest definitions.
//!
//! Quests are parsed once per distinct (lower-cased) name and handed out as
//! shared, read-only `Arc`s. Nothing is ever evicted or re-parsed.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info};
use quest_data::QuestDefinition;
use quest_script::{ParseError, parse_quest_source};
use thiserror::Error;

use crate::assets::{QuestSource, quest_asset_path};

#[derive(Debug, Error)]
pub enum QuestError {
    #[error("quest '{name}' could not be found (looked for '{path}')")]
    QuestNotFound { name: String, path: String },
    #[error("failed to read quest asset '{path}'")]
    Asset {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("quest '{name}' is malformed: {source}")]
    Parse {
        name: String,
        #[source]
        source: ParseError,
    },
}

pub struct QuestCache<S> {
    source: S,
    quests: RwLock<HashMap<String, Arc<QuestDefinition>>>,
}

impl<S: QuestSource> QuestCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            quests: RwLock::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Return the definition of quest `name`, parsing it on first use.
    ///
    /// # Errors
    /// `QuestNotFound` if the asset is missing, `Asset` if it cannot be read,
    /// `Parse` if the source is malformed. Failed quests are not cached.
    pub fn parse_quest(&self, name: &str) -> Result<Arc<QuestDefinition>, QuestError> {
        let key = cache_key(name);
        if let Some(quest) = self.read().get(&key) {
            debug!("reusing cached quest '{key}'");
            return Ok(Arc::clone(quest));
        }

        let path = quest_asset_path(name);
        let text = self
            .source
            .find_asset(&path)
            .map_err(|source| QuestError::Asset {
                path: path.clone(),
                source,
            })?
            .ok_or_else(|| QuestError::QuestNotFound {
                name: name.to_string(),
                path: path.clone(),
            })?;

        self.parse_and_insert(key, name, &text)
    }

    /// Parse `text` as quest `name` and cache it, unless `name` is already cached,
    /// in which case the cached definition is returned untouched.
    ///
    /// # Errors
    /// `Parse` if the source is malformed.
    pub fn insert_source(&self, name: &str, text: &str) -> Result<Arc<QuestDefinition>, QuestError> {
        let key = cache_key(name);
        if let Some(quest) = self.read().get(&key) {
            return Ok(Arc::clone(quest));
        }
        self.parse_and_insert(key, name, text)
    }

    fn parse_and_insert(&self, key: String, name: &str, text: &str) -> Result<Arc<QuestDefinition>, QuestError> {
        let quest = parse_quest_source(text).map_err(|source| QuestError::Parse {
            name: name.to_string(),
            source,
        })?;
        info!(
            "quest '{}' parsed: {} task(s), {} resource(s)",
            key,
            quest.tasks.len(),
            quest.resources.len()
        );

        let mut quests = self.write();
        let cached = quests.entry(key).or_insert_with(|| Arc::new(quest));
        Ok(Arc::clone(cached))
    }

    /// Parse every named quest up front, stopping at the first failure.
    ///
    /// # Errors
    /// The first error returned by [`QuestCache::parse_quest`].
    pub fn preload<I, N>(&self, names: I) -> Result<usize, QuestError>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut count = 0;
        for name in names {
            self.parse_quest(name.as_ref())?;
            count += 1;
        }
        Ok(count)
    }
}

impl<S> QuestCache<S> {
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(&cache_key(name))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Cached quest keys, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    // Entries are only ever inserted whole, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<QuestDefinition>>> {
        self.quests.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<QuestDefinition>>> {
        self.quests.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn cache_key(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssets;

    #[test]
    fn names_are_case_insensitive() {
        let cache = QuestCache::new(MemoryAssets::new().with_quest("intro", "title : Intro\n"));
        let first = cache.parse_quest("Intro").expect("parse Intro");
        let second = cache.parse_quest("INTRO").expect("parse INTRO");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.names(), vec!["intro".to_string()]);
    }

    #[test]
    fn insert_source_keeps_existing_entry() {
        let cache = QuestCache::new(MemoryAssets::new());
        let first = cache.insert_source("side", "title : One\n").expect("first");
        let second = cache.insert_source("side", "title : Two\n").expect("second");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.title, "One");
    }

    #[test]
    fn preload_counts_quests() {
        let assets = MemoryAssets::new()
            .with_quest("a", "title : A\n")
            .with_quest("b", "title : B\n");
        let cache = QuestCache::new(assets);
        assert_eq!(cache.preload(["a", "b"]).expect("preload"), 2);
        assert_eq!(cache.len(), 2);
        assert!(matches!(cache.preload(["c"]), Err(QuestError::QuestNotFound { .. })));
    }
}
