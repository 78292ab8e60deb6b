#![warn(clippy::pedantic)]
//! `quest`: inspect and check quest definitions through the engine's cache.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use quest_data::validate_quest;
use quest_engine::config::default_config_path;
use quest_engine::{AssetDir, QuestCache, QuestError, QuestSource, load_config, quest_asset_path};

#[derive(Parser)]
#[command(author, version, about = "Inspect and check quest definitions.")]
struct Cli {
    /// Asset root containing the `quests/` folder (overrides the config file).
    #[arg(long, global = true, value_name = "DIR")]
    assets: Option<PathBuf>,
    /// Engine config file (defaults to `quest_engine.toml` in the asset root).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a quest and print its definition.
    Show {
        /// Quest name, as used by the game (case-insensitive).
        name: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Ron)]
        format: Format,
    },
    /// Parse quests and report errors and validation findings.
    Check {
        /// Quests to check; every quest under the asset root when omitted.
        names: Vec<String>,
        /// Fail on validation findings, not only on parse errors.
        #[arg(long)]
        strict: bool,
    },
    /// List quests available under the asset root.
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Ron,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let mut config = load_config(&config_path);
    if let Some(root) = cli.assets {
        config.asset_root = root;
    }
    info!("using asset root '{}'", config.asset_root.display());

    let cache = QuestCache::new(AssetDir::new(&config.asset_root));
    if !config.preload.is_empty() {
        let count = cache
            .preload(&config.preload)
            .map_err(|err| anyhow::anyhow!(describe(cache.source(), &err)))
            .context("while preloading quests from config")?;
        info!("{count} quest(s) preloaded");
    }

    match cli.command {
        Commands::Show { name, format } => show(&cache, &name, format),
        Commands::Check { names, strict } => check(&cache, names, strict || config.strict),
        Commands::List => list(cache.source()),
    }
}

fn show(cache: &QuestCache<AssetDir>, name: &str, format: Format) -> Result<()> {
    let quest = cache
        .parse_quest(name)
        .map_err(|err| anyhow::anyhow!(describe(cache.source(), &err)))?;
    let rendered = match format {
        Format::Ron => ron::ser::to_string_pretty(&*quest, ron::ser::PrettyConfig::default())
            .context("while rendering quest as RON")?,
        Format::Json => serde_json::to_string_pretty(&*quest).context("while rendering quest as JSON")?,
    };
    println!("{rendered}");
    Ok(())
}

fn check(cache: &QuestCache<AssetDir>, names: Vec<String>, strict: bool) -> Result<()> {
    let names = if names.is_empty() {
        cache
            .source()
            .quest_names()
            .with_context(|| format!("while listing quests in '{}'", cache.source().root().display()))?
    } else {
        names
    };

    let mut errors = 0;
    let mut findings = 0;
    for name in &names {
        match cache.parse_quest(name) {
            Ok(quest) => {
                let problems = validate_quest(&quest);
                if problems.is_empty() {
                    println!("ok: {name}");
                }
                for problem in &problems {
                    println!("warning: {name}: {problem}");
                }
                findings += problems.len();
            },
            Err(err) => {
                eprintln!("error: {}", describe(cache.source(), &err));
                errors += 1;
            },
        }
    }

    if errors > 0 {
        bail!("{errors} of {} quest(s) failed to parse", names.len());
    }
    if strict && findings > 0 {
        bail!("{findings} validation finding(s) in strict mode");
    }
    Ok(())
}

fn list(assets: &AssetDir) -> Result<()> {
    let names = assets
        .quest_names()
        .with_context(|| format!("while listing quests in '{}'", assets.root().display()))?;
    if names.is_empty() {
        println!("no quests found under '{}'", assets.root().display());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

/// Render a quest error, adding the line and column for parse failures.
fn describe(source: &impl QuestSource, err: &QuestError) -> String {
    if let QuestError::Parse { name, source: parse } = err
        && let Ok(Some(text)) = source.find_asset(&quest_asset_path(name))
    {
        let (line, column) = parse.line_col(&text);
        return format!("{err} [{}:{line}:{column}]", quest_asset_path(name));
    }
    err.to_string()
}
