//! Typed sync commands.
//!
//! Each write the tool can perform is one [`Command`] variant carrying exactly
//! the fields that command accepts. Optional fields are omitted from the wire
//! payload when unset. [`SyncCommand`] wraps a command with its idempotency
//! token (and a temporary id for commands that create a record) and
//! serializes to the service's envelope:
//!
//! ```json
//! {"type": "item_move", "uuid": "…", "args": {"id": "…", "project_id": "…"}}
//! ```

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tdo_core::enums::{Priority, ViewStyle};
use uuid::Uuid;

/// Due date given in the service's natural language (`"tomorrow 9am"`,
/// `"every monday"`, `"no date"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueSpec {
    pub string: String,
}

impl DueSpec {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            string: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemAdd {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DueSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemUpdate {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DueSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl ItemUpdate {
    /// True when no field besides the id is set.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.content.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due.is_none()
            && self.labels.is_none()
    }
}

/// Where an item moves. The service accepts exactly one of these per move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTarget {
    ProjectId(String),
    SectionId(String),
    ParentId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemMove {
    pub id: String,
    #[serde(flatten)]
    pub target: MoveTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectAdd {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_style: Option<ViewStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectUpdate {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_style: Option<ViewStyle>,
}

impl ProjectUpdate {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.name.is_none()
            && self.color.is_none()
            && self.is_favorite.is_none()
            && self.view_style.is_none()
    }
}

/// `parent_id: None` moves the project to the top level; it is sent as an
/// explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectMove {
    pub id: String,
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionAdd {
    pub name: String,
    pub project_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionUpdate {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionMove {
    pub id: String,
    pub project_id: String,
}

/// One write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ItemAdd(ItemAdd),
    ItemUpdate(ItemUpdate),
    ItemMove(ItemMove),
    ItemClose(ItemRef),
    ItemReopen(ItemRef),
    ProjectAdd(ProjectAdd),
    ProjectUpdate(ProjectUpdate),
    ProjectMove(ProjectMove),
    SectionAdd(SectionAdd),
    SectionUpdate(SectionUpdate),
    SectionMove(SectionMove),
}

impl Command {
    /// Wire name of the command.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ItemAdd(_) => "item_add",
            Self::ItemUpdate(_) => "item_update",
            Self::ItemMove(_) => "item_move",
            Self::ItemClose(_) => "item_close",
            Self::ItemReopen(_) => "item_reopen",
            Self::ProjectAdd(_) => "project_add",
            Self::ProjectUpdate(_) => "project_update",
            Self::ProjectMove(_) => "project_move",
            Self::SectionAdd(_) => "section_add",
            Self::SectionUpdate(_) => "section_update",
            Self::SectionMove(_) => "section_move",
        }
    }

    /// Whether the command creates a record and therefore needs a temp id.
    #[must_use]
    pub const fn creates(&self) -> bool {
        matches!(
            self,
            Self::ItemAdd(_) | Self::ProjectAdd(_) | Self::SectionAdd(_)
        )
    }

    /// Id of the existing record the command acts on.
    #[must_use]
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Self::ItemUpdate(args) => Some(&args.id),
            Self::ItemMove(args) => Some(&args.id),
            Self::ItemClose(args) | Self::ItemReopen(args) => Some(&args.id),
            Self::ProjectUpdate(args) => Some(&args.id),
            Self::ProjectMove(args) => Some(&args.id),
            Self::SectionUpdate(args) => Some(&args.id),
            Self::SectionMove(args) => Some(&args.id),
            Self::ItemAdd(_) | Self::ProjectAdd(_) | Self::SectionAdd(_) => None,
        }
    }

    fn serialize_args<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        match self {
            Self::ItemAdd(args) => map.serialize_entry("args", args),
            Self::ItemUpdate(args) => map.serialize_entry("args", args),
            Self::ItemMove(args) => map.serialize_entry("args", args),
            Self::ItemClose(args) | Self::ItemReopen(args) => map.serialize_entry("args", args),
            Self::ProjectAdd(args) => map.serialize_entry("args", args),
            Self::ProjectUpdate(args) => map.serialize_entry("args", args),
            Self::ProjectMove(args) => map.serialize_entry("args", args),
            Self::SectionAdd(args) => map.serialize_entry("args", args),
            Self::SectionUpdate(args) => map.serialize_entry("args", args),
            Self::SectionMove(args) => map.serialize_entry("args", args),
        }
    }
}

/// A command with its idempotency token.
///
/// The `uuid` is generated once and reused if the request carrying the
/// command is retried, so the service applies it at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncCommand {
    pub uuid: Uuid,
    pub temp_id: Option<Uuid>,
    pub command: Command,
}

impl SyncCommand {
    #[must_use]
    pub fn new(command: Command) -> Self {
        let temp_id = command.creates().then(Uuid::new_v4);
        Self {
            uuid: Uuid::new_v4(),
            temp_id,
            command,
        }
    }
}

impl From<Command> for SyncCommand {
    fn from(command: Command) -> Self {
        Self::new(command)
    }
}

impl Serialize for SyncCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.temp_id.is_some() { 4 } else { 3 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", self.command.kind())?;
        map.serialize_entry("uuid", &self.uuid)?;
        if let Some(temp_id) = &self.temp_id {
            map.serialize_entry("temp_id", temp_id)?;
        }
        self.command.serialize_args(&mut map)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn wire(command: Command) -> serde_json::Value {
        serde_json::to_value(SyncCommand::new(command)).unwrap()
    }

    #[test]
    fn item_move_carries_exactly_one_target() {
        let value = wire(Command::ItemMove(ItemMove {
            id: "5".into(),
            target: MoveTarget::SectionId("11".into()),
        }));
        assert_eq!(value["type"], "item_move");
        assert_eq!(value["args"], json!({"id": "5", "section_id": "11"}));
        assert!(value.get("temp_id").is_none());
        assert!(value["uuid"].as_str().is_some_and(|u| u.len() == 36));
    }

    #[test]
    fn item_update_omits_unset_fields() {
        let value = wire(Command::ItemUpdate(ItemUpdate {
            id: "5".into(),
            priority: Some(Priority::URGENT),
            labels: Some(vec!["home".into()]),
            ..Default::default()
        }));
        assert_eq!(
            value["args"],
            json!({"id": "5", "priority": 4, "labels": ["home"]})
        );
    }

    #[test]
    fn create_commands_get_temp_ids() {
        let command = SyncCommand::new(Command::ProjectAdd(ProjectAdd {
            name: "Sprint".into(),
            parent_id: Some("1".into()),
            ..Default::default()
        }));
        assert!(command.temp_id.is_some());
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value["temp_id"], command.temp_id.unwrap().to_string());
        assert_eq!(value["args"], json!({"name": "Sprint", "parent_id": "1"}));
    }

    #[test]
    fn project_move_to_root_sends_null_parent() {
        let value = wire(Command::ProjectMove(ProjectMove {
            id: "2".into(),
            parent_id: None,
        }));
        assert_eq!(value["args"], json!({"id": "2", "parent_id": null}));
    }

    #[test]
    fn item_add_due_is_nested_object() {
        let value = wire(Command::ItemAdd(ItemAdd {
            content: "Buy milk".into(),
            due: Some(DueSpec::new("tomorrow")),
            ..Default::default()
        }));
        assert_eq!(
            value["args"],
            json!({"content": "Buy milk", "due": {"string": "tomorrow"}})
        );
    }

    #[test]
    fn noop_detection() {
        let update = ItemUpdate {
            id: "1".into(),
            ..Default::default()
        };
        assert!(update.is_noop());
        let update = ProjectUpdate {
            id: "1".into(),
            is_favorite: Some(false),
            ..Default::default()
        };
        assert!(!update.is_noop());
    }

    #[test]
    fn target_ids() {
        let close = Command::ItemClose(ItemRef { id: "9".into() });
        assert_eq!(close.target_id(), Some("9"));
        let add = Command::SectionAdd(SectionAdd {
            name: "x".into(),
            project_id: "1".into(),
        });
        assert_eq!(add.target_id(), None);
        assert!(add.creates());
    }
}
