//! Recursive-descent rules for quest directives.

use std::collections::BTreeMap;

use log::{debug, warn};
use quest_data::{Command, QuestDefinition, Resource, ResourceId, ResourceKind, TaskDefinition};

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::scanner::{Token, TokenKind};

const SCOPE: &str = ":";
const FLAG_MARKER: char = '+';

const KW_TITLE: &str = "title";
const KW_BRIEFING: &str = "briefing";
const KW_RESOURCES: &str = "qrc";
const KW_STAGES: &str = "qst";
const KW_TASK: &str = "task";
const KW_EVENT: &str = "event";
const FLAG_BACKGROUND: &str = "+background";

pub struct QuestParser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> QuestParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Run the top-level directive loop over the whole source.
    ///
    /// # Errors
    /// Fails on the first malformed or unknown construct.
    pub fn parse(mut self) -> Result<QuestDefinition, ParseError> {
        let mut quest = QuestDefinition::default();

        loop {
            self.cursor.skip_separators();
            if self.cursor.at_end() {
                break;
            }

            let directive = self.cursor.next_identifier()?;
            if directive.text.starts_with(FLAG_MARKER) {
                apply_flag(&mut quest, &directive);
                continue;
            }

            self.cursor.expect(SCOPE)?;

            match directive.text.to_ascii_lowercase().as_str() {
                KW_TITLE => quest.title = self.cursor.next_string()?,
                KW_BRIEFING => quest.briefing = self.cursor.next_text_block()?,
                KW_RESOURCES => quest.resources = self.parse_resources()?,
                KW_STAGES => quest.tasks = self.parse_tasks()?,
                _ => {
                    return Err(ParseError::UnknownDirective {
                        directive: directive.text,
                        offset: directive.offset,
                    });
                },
            }
        }

        Ok(quest)
    }

    fn parse_resources(&mut self) -> Result<BTreeMap<ResourceId, Resource>, ParseError> {
        let mut resources = BTreeMap::new();
        self.cursor.skip_separators();

        while let Some(kind) = resource_kind(&self.cursor.peek()) {
            self.cursor.advance();
            self.cursor.expect(SCOPE)?;
            let id = self.cursor.next_number()?;
            let content = self.cursor.next_text_block()?;

            if resources.insert(id, Resource { kind, content }).is_some() {
                warn!("resource {id} is defined more than once; keeping the last definition");
            }

            self.cursor.skip_separators();
        }

        Ok(resources)
    }

    fn parse_tasks(&mut self) -> Result<Vec<TaskDefinition>, ParseError> {
        let mut tasks = vec![TaskDefinition::entry_point(self.parse_commands()?)];
        self.cursor.skip_separators();

        while self.cursor.peek().is_identifier() {
            let keyword = self.cursor.next_identifier()?;
            let is_event = match keyword.text.to_ascii_lowercase().as_str() {
                KW_TASK => false,
                KW_EVENT => true,
                _ => {
                    return Err(ParseError::UnknownTaskKeyword {
                        keyword: keyword.text,
                        offset: keyword.offset,
                    });
                },
            };

            let name = self.cursor.next_identifier()?.text;
            self.cursor.expect(SCOPE)?;
            let commands = self.parse_commands()?;

            if tasks.iter().any(|task| task.name == name) {
                warn!("task '{name}' is defined more than once; lookups will use the last definition");
            }
            debug!(
                "{} '{}' added with {} command(s)",
                if is_event { "event" } else { "task" },
                name,
                commands.len()
            );

            tasks.push(TaskDefinition {
                name,
                commands,
                is_event,
            });

            self.cursor.skip_separators();
        }

        Ok(tasks)
    }

    /// Read command lines until a `task`/`event` label, a non-identifier, or EOF.
    fn parse_commands(&mut self) -> Result<Vec<Command>, ParseError> {
        let mut commands = Vec::new();
        self.cursor.skip_separators();

        loop {
            let next = self.cursor.peek();
            if !next.is_identifier() || is_task_keyword(&next.text) {
                break;
            }

            let name = self.cursor.next_identifier()?.text.to_ascii_lowercase();
            let mut arguments = Vec::new();
            while !matches!(self.cursor.peek().kind, TokenKind::EndOfFile | TokenKind::Separator) {
                arguments.push(self.cursor.next_word()?);
            }
            commands.push(Command { name, arguments });

            self.cursor.skip_separators();
        }

        Ok(commands)
    }
}

fn apply_flag(quest: &mut QuestDefinition, flag: &Token) {
    if flag.text.eq_ignore_ascii_case(FLAG_BACKGROUND) {
        quest.runs_in_background = true;
    } else {
        warn!("ignoring unknown quest flag '{}' at byte {}", flag.text, flag.offset);
    }
}

fn resource_kind(token: &Token) -> Option<ResourceKind> {
    if token.is_identifier() {
        ResourceKind::from_keyword(&token.text)
    } else {
        None
    }
}

fn is_task_keyword(text: &str) -> bool {
    text.eq_ignore_ascii_case(KW_TASK) || text.eq_ignore_ascii_case(KW_EVENT)
}
