use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::error::BoardError;

/// Opaque unique identifier for a project, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Generates a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for ProjectId {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| BoardError::InvalidProjectId(s.to_string()))
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which column a project belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Finished,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            _ => Err(BoardError::InvalidStatus(s.to_string())),
        }
    }
}

/// A project on the board
///
/// Only [`crate::store::ProjectStore`] changes `status`; everything handed to
/// listeners and columns is a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub people: u32,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new active project
    pub fn new(id: ProjectId, title: String, description: String, people: u32) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description,
            people,
            status: ProjectStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Changes the status, returning whether anything changed
    pub(crate) fn set_status(&mut self, status: ProjectStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.updated_at = Utc::now();
        true
    }

    /// Human-readable head count, e.g. "1 person" or "4 people"
    pub fn persons(&self) -> String {
        if self.people == 1 {
            "1 person".to_string()
        } else {
            format!("{} people", self.people)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_parsing() {
        let id = ProjectId::generate();
        let parsed = ProjectId::from_str(&id.to_string()).unwrap();
        assert_eq!(parsed, id);

        assert!(ProjectId::from_str("").is_err());
        assert!(ProjectId::from_str("0.123456").is_err());
    }

    #[test]
    fn test_project_ids_are_unique() {
        let a = ProjectId::generate();
        let b = ProjectId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_status_parsing_case_insensitive() {
        assert_eq!(
            ProjectStatus::from_str("active").unwrap(),
            ProjectStatus::Active
        );
        assert_eq!(
            ProjectStatus::from_str("FINISHED").unwrap(),
            ProjectStatus::Finished
        );
        assert_eq!(
            ProjectStatus::from_str(" Finished ").unwrap(),
            ProjectStatus::Finished
        );
        assert!(ProjectStatus::from_str("done").is_err());
    }

    #[test]
    fn test_new_project_is_active() {
        let project = Project::new(
            ProjectId::generate(),
            "T".to_string(),
            "Desc".to_string(),
            3,
        );
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.people, 3);
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_set_status_reports_change() {
        let mut project = Project::new(
            ProjectId::generate(),
            "T".to_string(),
            "Desc".to_string(),
            3,
        );

        assert!(!project.set_status(ProjectStatus::Active));
        assert!(project.set_status(ProjectStatus::Finished));
        assert_eq!(project.status, ProjectStatus::Finished);
        assert!(project.updated_at >= project.created_at);
        assert!(!project.set_status(ProjectStatus::Finished));
    }

    #[test]
    fn test_persons_label() {
        let mut project = Project::new(
            ProjectId::generate(),
            "T".to_string(),
            "Desc".to_string(),
            1,
        );
        assert_eq!(project.persons(), "1 person");

        project.people = 0;
        assert_eq!(project.persons(), "0 people");

        project.people = 7;
        assert_eq!(project.persons(), "7 people");
    }

    #[test]
    fn test_project_wire_fields() {
        let project = Project::new(
            ProjectId::generate(),
            "Ship it".to_string(),
            "Release the board".to_string(),
            2,
        );

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["id"], project.id.to_string());
        assert_eq!(json["title"], "Ship it");
        assert_eq!(json["people"], 2);
        assert_eq!(json["status"], "active");
    }
}
