use crate::domain::project::ProjectStatus;
use crate::domain::validation::{NumberRule, TextRule};
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Configuration for a board column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub title: String,
    pub status: ProjectStatus,
}

impl ColumnConfig {
    pub fn new(title: impl Into<String>, status: ProjectStatus) -> Self {
        Self {
            title: title.into(),
            status,
        }
    }
}

/// Validation rules applied by the project form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRules {
    pub title: TextRule,
    pub description: TextRule,
    pub people: NumberRule,
}

impl Default for InputRules {
    fn default() -> Self {
        Self {
            title: TextRule::required(),
            description: TextRule::required().with_min_length(5),
            people: NumberRule::required().with_range(0, 10),
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub input: InputRules,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Projects".to_string(),
            columns: vec![
                ColumnConfig::new("Active projects", ProjectStatus::Active),
                ColumnConfig::new("Finished projects", ProjectStatus::Finished),
            ],
            input: InputRules::default(),
        }
    }
}

impl BoardConfig {
    /// Loads and validates a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: BoardConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations no board could be built from
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(BoardError::ConfigError(
                "board needs at least one column".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.status) {
                return Err(BoardError::ConfigError(format!(
                    "status {} is assigned to more than one column",
                    column.status
                )));
            }
        }

        if let (Some(min), Some(max)) = (self.input.people.min_value, self.input.people.max_value)
        {
            if min > max {
                return Err(BoardError::ConfigError(format!(
                    "people range {}..={} is empty",
                    min, max
                )));
            }
        }

        Ok(())
    }

    /// Gets the column configuration for a status
    pub fn get_column_for_status(&self, status: &ProjectStatus) -> Option<&ColumnConfig> {
        self.columns.iter().find(|col| &col.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.columns.len(), 2);

        let active = config.get_column_for_status(&ProjectStatus::Active).unwrap();
        assert_eq!(active.title, "Active projects");

        let finished = config
            .get_column_for_status(&ProjectStatus::Finished)
            .unwrap();
        assert_eq!(finished.title, "Finished projects");
    }

    #[test]
    fn test_default_input_rules() {
        let rules = InputRules::default();
        assert!(rules.title.required);
        assert_eq!(rules.description.min_length, Some(5));
        assert_eq!(rules.people.min_value, Some(0));
        assert_eq!(rules.people.max_value, Some(10));
    }

    #[test]
    fn test_duplicate_status_rejected() {
        let config = BoardConfig {
            columns: vec![
                ColumnConfig::new("Now", ProjectStatus::Active),
                ColumnConfig::new("Also now", ProjectStatus::Active),
            ],
            ..BoardConfig::default()
        };
        assert!(matches!(config.validate(), Err(BoardError::ConfigError(_))));
    }

    #[test]
    fn test_empty_columns_rejected() {
        let config = BoardConfig {
            columns: Vec::new(),
            ..BoardConfig::default()
        };
        assert!(matches!(config.validate(), Err(BoardError::ConfigError(_))));
    }

    #[test]
    fn test_inverted_people_range_rejected() {
        let mut config = BoardConfig::default();
        config.input.people = NumberRule::required().with_range(5, 2);
        assert!(matches!(config.validate(), Err(BoardError::ConfigError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "name": "Team board",
                "columns": [
                    {{ "title": "Doing", "status": "active" }},
                    {{ "title": "Done", "status": "finished" }}
                ]
            }}"#
        )
        .unwrap();

        let config = BoardConfig::load(file.path()).unwrap();
        assert_eq!(config.name, "Team board");
        assert_eq!(config.columns[0].title, "Doing");
        assert_eq!(config.columns[1].status, ProjectStatus::Finished);
        assert_eq!(config.input, InputRules::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = BoardConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(BoardError::IoError(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let result = BoardConfig::load(file.path());
        assert!(matches!(result, Err(BoardError::SerializationError(_))));
    }
}
