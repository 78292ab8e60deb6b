use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved name of the implicit first task of every quest.
pub const ENTRY_POINT: &str = "<entry-point>";

/// Integer key used by the resource table.
pub type ResourceId = i64;

/// A fully parsed quest program, as handed to the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDefinition {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub briefing: String,
    #[serde(default)]
    pub runs_in_background: bool,
    #[serde(default)]
    pub resources: BTreeMap<ResourceId, Resource>,
    /// Entry-point task first, then named tasks and events in source order.
    pub tasks: Vec<TaskDefinition>,
}

impl Default for QuestDefinition {
    fn default() -> Self {
        Self {
            title: String::new(),
            briefing: String::new(),
            runs_in_background: false,
            resources: BTreeMap::new(),
            tasks: vec![TaskDefinition::entry_point(Vec::new())],
        }
    }
}

impl QuestDefinition {
    /// The implicit main line of the quest.
    ///
    /// # Panics
    /// Only if the task list was emptied by hand; the parser always emits the entry point.
    pub fn entry_point(&self) -> &TaskDefinition {
        &self.tasks[0]
    }

    /// Look up a named task or event. Later definitions shadow earlier ones.
    pub fn task(&self, name: &str) -> Option<&TaskDefinition> {
        self.tasks.iter().rev().find(|task| task.name == name)
    }

    /// Event handlers, in source order.
    pub fn events(&self) -> impl Iterator<Item = &TaskDefinition> {
        self.tasks.iter().filter(|task| task.is_event)
    }

    /// Linear tasks (including the entry point), in source order.
    pub fn linear_tasks(&self) -> impl Iterator<Item = &TaskDefinition> {
        self.tasks.iter().filter(|task| !task.is_event)
    }

    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(&id)
    }
}

/// A task or event body: a named list of commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub name: String,
    #[serde(default)]
    pub commands: Vec<Command>,
    #[serde(default)]
    pub is_event: bool,
}

impl TaskDefinition {
    pub fn entry_point(commands: Vec<Command>) -> Self {
        Self {
            name: ENTRY_POINT.to_string(),
            commands,
            is_event: false,
        }
    }

    pub fn is_entry_point(&self) -> bool {
        self.name == ENTRY_POINT
    }
}

/// One instruction line inside a task body.
///
/// Arguments are kept as raw words; interpreting them is up to the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Keyed auxiliary content referenced from task commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub kind: ResourceKind,
    pub content: String,
}

/// Resource categories understood by the `qrc` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Message,
    Sound,
    Video,
    Stage,
}

impl ResourceKind {
    /// Map a resource keyword (any case) to its kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "message" => Some(ResourceKind::Message),
            "sound" => Some(ResourceKind::Sound),
            "video" => Some(ResourceKind::Video),
            "stage" => Some(ResourceKind::Stage),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Message => "message",
            ResourceKind::Sound => "sound",
            ResourceKind::Video => "video",
            ResourceKind::Stage => "stage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quest_has_entry_point() {
        let quest = QuestDefinition::default();
        assert_eq!(quest.tasks.len(), 1);
        assert!(quest.entry_point().is_entry_point());
        assert!(quest.entry_point().commands.is_empty());
    }

    #[test]
    fn task_lookup_prefers_last_definition() {
        let mut quest = QuestDefinition::default();
        quest.tasks.push(TaskDefinition {
            name: "door".into(),
            commands: vec![Command::new("message", vec!["1".into()])],
            is_event: true,
        });
        quest.tasks.push(TaskDefinition {
            name: "door".into(),
            commands: vec![Command::new("message", vec!["2".into()])],
            is_event: true,
        });
        let door = quest.task("door").expect("door task");
        assert_eq!(door.commands[0].arguments, vec!["2".to_string()]);
        assert_eq!(quest.events().count(), 2);
        assert_eq!(quest.linear_tasks().count(), 1);
    }

    #[test]
    fn resource_kind_keywords_are_case_insensitive() {
        assert_eq!(ResourceKind::from_keyword("MESSAGE"), Some(ResourceKind::Message));
        assert_eq!(ResourceKind::from_keyword("Stage"), Some(ResourceKind::Stage));
        assert_eq!(ResourceKind::from_keyword("task"), None);
        assert_eq!(ResourceKind::Video.as_str(), "video");
    }

    #[test]
    fn resource_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ResourceKind::Sound).expect("serialize");
        assert_eq!(json, "\"sound\"");
    }
}
