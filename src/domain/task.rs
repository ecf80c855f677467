//! Task and stage value objects

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidStatusError;

/// Task workflow status, as accepted by the tenant API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Open,
    Pause,
    Continue,
    Important,
    Close,
}

impl TaskStatus {
    /// Get the wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Pause => "PAUSE",
            Self::Continue => "CONTINUE",
            Self::Important => "IMPORTANT",
            Self::Close => "CLOSE",
        }
    }

    /// Human-readable label, used when the server did not provide one
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Pause => "Paused",
            Self::Continue => "Continue",
            Self::Important => "Important",
            Self::Close => "Closed",
        }
    }

    /// All statuses the API accepts
    pub const ALL: [TaskStatus; 5] = [
        Self::Open,
        Self::Pause,
        Self::Continue,
        Self::Important,
        Self::Close,
    ];
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "PAUSE" => Ok(Self::Pause),
            "CONTINUE" => Ok(Self::Continue),
            "IMPORTANT" => Ok(Self::Important),
            "CLOSE" => Ok(Self::Close),
            _ => Err(InvalidStatusError {
                input: s.to_string(),
            }),
        }
    }
}

/// A single stage of a task. Read-only in this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub is_completed: bool,
}

/// A task assigned to the field worker.
/// Replaced wholesale on every successful fetch or status update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub status_display: Option<String>,
    #[serde(default)]
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub total_duration: Option<u32>,
}

impl Task {
    /// Status label, preferring the server-provided display string
    pub fn status_label(&self) -> &str {
        self.status_display
            .as_deref()
            .unwrap_or_else(|| self.status.label())
    }

    /// Total stage duration in minutes, falling back to summing stages
    pub fn total_minutes(&self) -> u32 {
        self.total_duration
            .unwrap_or_else(|| self.stages.iter().map(|s| s.duration_minutes).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_representation() {
        assert_eq!(TaskStatus::Open.as_str(), "OPEN");
        assert_eq!(TaskStatus::Important.as_str(), "IMPORTANT");
        assert_eq!(TaskStatus::Close.as_str(), "CLOSE");
    }

    #[test]
    fn status_parses_case_insensitive() {
        assert_eq!("close".parse::<TaskStatus>().unwrap(), TaskStatus::Close);
        assert_eq!("PAUSE".parse::<TaskStatus>().unwrap(), TaskStatus::Pause);
    }

    #[test]
    fn status_parse_rejects_unknown() {
        let err = "DONE".parse::<TaskStatus>().unwrap_err();
        assert!(err.to_string().contains("DONE"));
    }

    #[test]
    fn status_serializes_as_screaming_snake() {
        let json = serde_json::to_string(&TaskStatus::Important).unwrap();
        assert_eq!(json, "\"IMPORTANT\"");
    }

    #[test]
    fn task_deserializes_from_api_shape() {
        let json = r#"{
            "id": 1,
            "title": "Inspect machine #5",
            "description": "Sector B",
            "status": "OPEN",
            "status_display": "Open",
            "stages": [
                {"name": "Prepare", "duration_minutes": 15, "is_completed": true},
                {"name": "Inspect", "duration_minutes": 30, "is_completed": false}
            ],
            "total_duration": 45
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.stages.len(), 2);
        assert!(task.stages[0].is_completed);
        assert_eq!(task.total_minutes(), 45);
    }

    #[test]
    fn task_deserializes_with_minimal_fields() {
        let json = r#"{"id": 2, "title": "Clean workshop", "status": "IMPORTANT"}"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, None);
        assert!(task.stages.is_empty());
        assert_eq!(task.status_label(), "Important");
    }

    #[test]
    fn total_minutes_sums_stages_when_not_provided() {
        let json = r#"{
            "id": 3,
            "title": "Audit",
            "status": "OPEN",
            "stages": [
                {"name": "A", "duration_minutes": 10},
                {"name": "B", "duration_minutes": 20}
            ]
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.total_minutes(), 30);
    }

    #[test]
    fn status_label_prefers_server_display() {
        let json = r#"{"id": 4, "title": "T", "status": "OPEN", "status_display": "Открыта"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status_label(), "Открыта");
    }
}
