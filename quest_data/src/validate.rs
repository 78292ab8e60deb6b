use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Advisory findings about a parsed quest that the grammar itself permits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateTask { name: String },
    MissingEntryPoint,
    MisplacedEntryPoint { index: usize },
    EmptyTitle,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateTask { name } => {
                write!(f, "task '{name}' is defined more than once; the last definition wins")
            },
            ValidationError::MissingEntryPoint => write!(f, "first task is not the entry point"),
            ValidationError::MisplacedEntryPoint { index } => {
                write!(f, "task #{index} reuses the reserved name '{ENTRY_POINT}'")
            },
            ValidationError::EmptyTitle => write!(f, "quest has no title"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a quest for duplicate task names and structural oddities.
///
/// ```
/// use quest_data::{QuestDefinition, validate_quest};
///
/// let quest = QuestDefinition {
///     title: "Intro".into(),
///     ..QuestDefinition::default()
/// };
/// assert!(validate_quest(&quest).is_empty());
/// ```
pub fn validate_quest(quest: &QuestDefinition) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if quest.title.trim().is_empty() {
        errors.push(ValidationError::EmptyTitle);
    }

    match quest.tasks.first() {
        Some(first) if first.is_entry_point() => {},
        _ => errors.push(ValidationError::MissingEntryPoint),
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for (index, task) in quest.tasks.iter().enumerate().skip(1) {
        if task.is_entry_point() {
            errors.push(ValidationError::MisplacedEntryPoint { index });
            continue;
        }
        if !seen.insert(task.name.as_str()) && reported.insert(task.name.as_str()) {
            errors.push(ValidationError::DuplicateTask {
                name: task.name.clone(),
            });
        }
    }

    errors
}
