//! Task board records exchanged with the ProjectStack backend.
//!
//! Field names on the wire are exactly `id`, `title`, `description`,
//! `status`, `priority`, `assignee`, `dueDate` and `tags`. Decoding is
//! lenient: an unrecognized status is preserved as [`TaskStatus::Unknown`],
//! and so is a missing, `null` or non-string one (as an empty or raw value),
//! which keeps such a task off the board. An unrecognized priority or
//! unparseable due date decodes as absent, a missing title as empty, and a
//! `null` tag list as empty. A single odd record therefore never fails a
//! whole board load.

use crate::libs::board::ValidationError;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Server-assigned task identifier, unique within a project.
pub type TaskId = String;

/// Board column a task belongs to.
///
/// Only `todo`, `in-progress` and `done` are columns. Any other value read
/// from the backend is kept verbatim as `Unknown` so it round-trips
/// unchanged, but the board projector leaves such tasks unmapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Unknown(String),
}

impl TaskStatus {
    /// Column order of the board.
    pub const COLUMNS: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
            TaskStatus::Unknown(raw) => raw,
        }
    }

    /// Human-readable column title.
    pub fn title(&self) -> &str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
            TaskStatus::Unknown(raw) => raw,
        }
    }

    /// Returns `true` for the three board columns.
    pub fn is_known(&self) -> bool {
        !matches!(self, TaskStatus::Unknown(_))
    }

    /// Parses a status and rejects anything that is not a board column.
    pub fn parse_known(value: &str) -> Result<Self, ValidationError> {
        match Self::from(value.to_owned()) {
            TaskStatus::Unknown(raw) => Err(ValidationError::UnknownStatus(raw)),
            status => Ok(status),
        }
    }
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "todo" => TaskStatus::Todo,
            "in-progress" => TaskStatus::InProgress,
            "done" => TaskStatus::Done,
            _ => TaskStatus::Unknown(value),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Unknown(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    /// Case-insensitive: the backend has been seen to send both `high` and `High`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ValidationError::UnknownPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project member, used both as task assignee and as comment author.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Member {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.trim().to_owned(),
            ..Self::default()
        }
    }

    /// Name to show, or `None` when the backend sent a blank one.
    pub fn display_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(deserialize_with = "string_or_number")]
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "missing_status", deserialize_with = "lenient_status")]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_priority")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl Task {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            description: None,
            status: TaskStatus::Todo,
            priority: None,
            assignee: None,
            due_date: None,
            tags: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, assignee: Member) -> Self {
        self.assignee = Some(assignee);
        self
    }
}

/// Fields a client supplies when creating a task. The server assigns `id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Member>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

impl TaskDraft {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, assignee: Member) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Checks the draft locally, before anything is sent.
    ///
    /// The title is trimmed; tags are trimmed and blank ones discarded.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if !self.status.is_known() {
            return Err(ValidationError::UnknownStatus(self.status.to_string()));
        }
        self.title = title.to_owned();
        self.tags = self.tags.iter().map(|tag| tag.trim()).filter(|tag| !tag.is_empty()).map(str::to_owned).collect();
        Ok(self)
    }
}

/// Partial update of a task. Only the fields that are `Some` are sent.
///
/// `assignee: Some(None)` clears the assignee and serializes as `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Option<Member>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn assignee(assignee: Option<Member>) -> Self {
        Self {
            assignee: Some(assignee),
            ..Self::default()
        }
    }

    /// Writes the patched fields into `task`, leaving every other field alone.
    pub fn apply(&self, task: &mut Task) {
        if let Some(status) = &self.status {
            task.status = status.clone();
        }
        if let Some(assignee) = &self.assignee {
            task.assignee = assignee.clone();
        }
    }

    /// Restores the patched fields of `task` from `previous`.
    pub fn revert(&self, task: &mut Task, previous: &Task) {
        if self.status.is_some() {
            task.status = previous.status.clone();
        }
        if self.assignee.is_some() {
            task.assignee = previous.assignee.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Comment {
    pub fn author_name(&self) -> &str {
        self.author.as_ref().and_then(Member::display_name).unwrap_or("Unknown")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// Any JSON value as text: strings as-is, `null` as `None`, anything else
/// in its JSON form.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.map(|value| match value {
        Value::String(text) => text,
        other => other.to_string(),
    }))
}

fn missing_status() -> TaskStatus {
    TaskStatus::Unknown(String::new())
}

fn lenient_status<'de, D>(deserializer: D) -> Result<TaskStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.map_or_else(missing_status, TaskStatus::from))
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.and_then(|value| value.parse().ok()))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.as_deref().and_then(parse_due_date))
}

pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_task_with_camel_case_fields() {
        let task: Task = serde_json::from_value(json!({
            "id": "t-1",
            "title": "Write release notes",
            "description": "for 1.2",
            "status": "in-progress",
            "priority": "High",
            "assignee": { "name": "Ada", "avatar": "https://example.com/ada.png" },
            "dueDate": "2025-04-03T00:00:00.000Z",
            "tags": ["docs"]
        }))
        .unwrap();

        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.assignee.as_ref().map(|m| m.name.as_str()), Some("Ada"));
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 4, 3));
        assert_eq!(task.tags, vec!["docs".to_string()]);
    }

    #[test]
    fn unknown_status_is_preserved_not_rejected() {
        let task: Task = serde_json::from_value(json!({ "id": 7, "title": "x", "status": "blocked" })).unwrap();

        assert_eq!(task.id, "7");
        assert_eq!(task.status, TaskStatus::Unknown("blocked".into()));
        assert!(!task.status.is_known());
        assert_eq!(serde_json::to_value(&task).unwrap()["status"], "blocked");
    }

    #[test]
    fn missing_null_or_non_string_status_is_kept_as_unknown() {
        let tasks: Vec<Task> = serde_json::from_value(json!([
            { "id": "1", "title": "ok", "status": "todo" },
            { "id": "2", "title": "null status", "status": null },
            { "id": "3", "title": "no status" },
            { "id": "4", "title": "numeric status", "status": 2 },
            { "id": "5", "status": "done" }
        ]))
        .unwrap();

        let statuses: Vec<_> = tasks.iter().map(|task| task.status.clone()).collect();
        assert_eq!(
            statuses,
            vec![
                TaskStatus::Todo,
                TaskStatus::Unknown(String::new()),
                TaskStatus::Unknown(String::new()),
                TaskStatus::Unknown("2".into()),
                TaskStatus::Done,
            ]
        );
        assert_eq!(tasks[4].title, "");
    }

    #[test]
    fn odd_optional_fields_decode_as_absent() {
        let task: Task = serde_json::from_value(json!({
            "id": "1",
            "title": "x",
            "status": "todo",
            "priority": 3,
            "dueDate": "someday",
            "tags": null
        }))
        .unwrap();

        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, None);
        assert_eq!(task.due_date, None);
        assert!(task.tags.is_empty());
    }

    #[test]
    fn draft_serializes_with_wire_names() {
        let draft = TaskDraft::new("Ship it")
            .with_priority(Priority::Medium)
            .with_due_date(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());

        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["title"], "Ship it");
        assert_eq!(value["status"], "todo");
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["dueDate"], "2025-05-01");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn draft_validation_trims_and_rejects_blank_titles() {
        assert_eq!(TaskDraft::new("   ").validated(), Err(ValidationError::EmptyTitle));

        let draft = TaskDraft::new("  Plan sprint ")
            .with_tags(vec![" a ".into(), "".into()])
            .validated()
            .unwrap();
        assert_eq!(draft.title, "Plan sprint");
        assert_eq!(draft.tags, vec!["a".to_string()]);
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        assert_eq!(serde_json::to_value(TaskPatch::status(TaskStatus::Done)).unwrap(), json!({ "status": "done" }));
        assert_eq!(serde_json::to_value(TaskPatch::assignee(None)).unwrap(), json!({ "assignee": null }));
    }

    #[test]
    fn patch_revert_restores_only_patched_fields() {
        let previous = Task::new("1", "x").with_priority(Priority::Low);
        let mut task = previous.clone();
        let patch = TaskPatch::status(TaskStatus::Done);

        patch.apply(&mut task);
        task.title = "renamed meanwhile".into();
        patch.revert(&mut task, &previous);

        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.title, "renamed meanwhile");
    }

    #[test]
    fn parse_known_status() {
        assert_eq!(TaskStatus::parse_known("done"), Ok(TaskStatus::Done));
        assert_eq!(TaskStatus::parse_known("Done"), Err(ValidationError::UnknownStatus("Done".into())));
    }

    #[test]
    fn comment_without_author_is_unknown() {
        let comment: Comment = serde_json::from_value(json!({ "id": 3, "text": "hi" })).unwrap();
        assert_eq!(comment.author_name(), "Unknown");
    }
}
