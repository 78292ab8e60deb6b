#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! quest_script: scanner and parser for the quest definition language.
//!
//! A quest file is a sequence of directives:
//! - `+background` marks the quest as running in the background
//! - `title : The Lost Key`
//! - `briefing :` followed by lines of text, ended by a blank line
//! - `qrc :` followed by `message : 7 Some text` style resource entries
//! - `qst :` followed by entry-point commands and `task NAME :` / `event NAME :` blocks
//!
//! `$-` starts a comment that runs to the end of the line. A parenthesized
//! span such as `(health above 10)` is read as a single word.
//!
//! The result is a [`quest_data::QuestDefinition`]; executing it is someone
//! else's job.

mod cursor;
mod error;
mod parser;
mod scanner;

pub use cursor::Cursor;
pub use error::{ParseError, line_col};
pub use parser::QuestParser;
pub use scanner::{Scanner, Snapshot, Token, TokenKind};

use quest_data::QuestDefinition;

/// Parse a complete quest source into a definition.
///
/// ```
/// let quest = quest_script::parse_quest_source("title : Intro\nqst :\nmessage 5\n").unwrap();
/// assert_eq!(quest.title, "Intro");
/// assert_eq!(quest.tasks[0].commands[0].arguments, vec!["5".to_string()]);
/// ```
///
/// # Errors
/// Returns the first [`ParseError`] encountered; no partial definition is produced.
pub fn parse_quest_source(source: &str) -> Result<QuestDefinition, ParseError> {
    QuestParser::new(source).parse()
}

/// Scan a source into tokens, stopping before end of file. Handy for debugging content.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).collect()
}
