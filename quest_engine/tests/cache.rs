use std::fs;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use quest_engine::{AssetDir, MemoryAssets, QuestCache, QuestError, QuestSource, ResourceKind};
use quest_script::ParseError;
use tempfile::tempdir;

/// Counts lookups so tests can tell cache hits from re-parses.
struct CountingAssets {
    inner: MemoryAssets,
    lookups: AtomicUsize,
}

impl CountingAssets {
    fn new(inner: MemoryAssets) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl QuestSource for CountingAssets {
    fn find_asset(&self, path: &str) -> io::Result<Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_asset(path)
    }
}

const LIGHTHOUSE: &str = "$- The keeper's errand
+background
title : The Keeper
briefing :
The lamp went dark last night.
Climb the tower and relight it.

qrc :
message : 1 The stairs creak underfoot.

sound : 2 creak.ogg

qst :
message 1
set (lamp below 1) stage 3
task climb :
sound 2
wait 10
event lamp_lit :
message 1
";

#[test]
fn second_lookup_reuses_definition() {
    let assets = CountingAssets::new(MemoryAssets::new().with_quest("lighthouse", LIGHTHOUSE));
    let cache = QuestCache::new(&assets);

    let first = cache.parse_quest("lighthouse").expect("first parse");
    let second = cache.parse_quest("Lighthouse").expect("cached");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(assets.lookups(), 1);
}

#[test]
fn parsed_quest_contents() {
    let cache = QuestCache::new(MemoryAssets::new().with_quest("lighthouse", LIGHTHOUSE));
    let quest = cache.parse_quest("lighthouse").expect("parse ok");

    assert!(quest.runs_in_background);
    assert_eq!(quest.title, "The Keeper");
    assert_eq!(quest.briefing, "The lamp went dark last night.\nClimb the tower and relight it.");
    assert_eq!(quest.resource(1).map(|r| r.kind), Some(ResourceKind::Message));
    assert_eq!(quest.resource(2).map(|r| r.content.as_str()), Some("creak.ogg"));

    let names: Vec<_> = quest.tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["<entry-point>", "climb", "lamp_lit"]);
    assert_eq!(
        quest.entry_point().commands[1].arguments,
        vec!["(lamp below 1)".to_string(), "stage".to_string(), "3".to_string()]
    );
    assert!(quest.task("lamp_lit").is_some_and(|t| t.is_event));
}

#[test]
fn missing_quest_is_not_found() {
    let cache = QuestCache::new(MemoryAssets::new());
    let err = cache.parse_quest("Nowhere").expect_err("no such quest");
    match err {
        QuestError::QuestNotFound { name, path } => {
            assert_eq!(name, "Nowhere");
            assert_eq!(path, "quests/nowhere.qst");
        },
        other => panic!("unexpected error: {other}"),
    }
    assert!(cache.is_empty());
}

#[test]
fn malformed_quest_is_not_cached() {
    let assets = CountingAssets::new(MemoryAssets::new().with_quest("broken", "title : Broken\nfoo : bar\n"));
    let cache = QuestCache::new(&assets);

    for _ in 0..2 {
        let err = cache.parse_quest("broken").expect_err("unknown directive");
        assert!(matches!(
            err,
            QuestError::Parse {
                source: ParseError::UnknownDirective { .. },
                ..
            }
        ));
    }
    assert!(!cache.contains("broken"));
    assert_eq!(assets.lookups(), 2);
}

#[test]
fn concurrent_lookups_share_one_definition() {
    let cache = QuestCache::new(MemoryAssets::new().with_quest("lighthouse", LIGHTHOUSE));

    let quests: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| cache.parse_quest("lighthouse").expect("parse ok")))
            .collect();
        handles.into_iter().map(|h| h.join().expect("thread")).collect()
    });

    assert_eq!(cache.len(), 1);
    assert!(quests.iter().all(|q| Arc::ptr_eq(q, &quests[0])));
}

#[test]
fn asset_dir_backed_cache() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("quests"))?;
    fs::write(dir.path().join("quests/intro.qst"), "title : Intro\nqst :\nmessage 5\n")?;

    let cache = QuestCache::new(AssetDir::new(dir.path()));
    let quest = cache.parse_quest("INTRO")?;
    assert_eq!(quest.title, "Intro");
    assert_eq!(cache.names(), vec!["intro".to_string()]);
    assert_eq!(cache.source().quest_names()?, vec!["intro".to_string()]);
    Ok(())
}
