//! Form input rules.
//!
//! The store never re-checks what it is given, so everything entering
//! [`crate::store::ProjectStore::add_project`] through a form goes through
//! [`ProjectInput::validate`] first.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::domain::board::InputRules;
use crate::error::{BoardError, Result};

/// Constraints for a free-text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRule {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl TextRule {
    pub fn required() -> Self {
        Self {
            required: true,
            min_length: None,
            max_length: None,
        }
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Checks `value` against the rule, naming `field` in the error
    pub fn check(&self, field: &str, value: &str) -> Result<()> {
        if self.required && value.trim().is_empty() {
            return Err(BoardError::validation(field, "is required"));
        }

        let length = value.chars().count();
        if let Some(min) = self.min_length {
            if length < min {
                return Err(BoardError::validation(
                    field,
                    format!("must be at least {} characters", min),
                ));
            }
        }
        if let Some(max) = self.max_length {
            if length > max {
                return Err(BoardError::validation(
                    field,
                    format!("must be at most {} characters", max),
                ));
            }
        }

        Ok(())
    }
}

/// Constraints for a whole-number field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRule {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<u32>,
}

impl NumberRule {
    pub fn required() -> Self {
        Self {
            required: true,
            min_value: None,
            max_value: None,
        }
    }

    pub fn with_range(mut self, min: u32, max: u32) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    /// Parses and checks raw field text. Blank optional input yields zero.
    pub fn parse(&self, field: &str, raw: &str) -> Result<u32> {
        let raw = raw.trim();
        if raw.is_empty() {
            if self.required {
                return Err(BoardError::validation(field, "is required"));
            }
            return Ok(0);
        }

        let value: i64 = raw
            .parse()
            .map_err(|_| BoardError::validation(field, "must be a whole number"))?;
        let value = u32::try_from(value)
            .map_err(|_| BoardError::validation(field, "must not be negative"))?;

        if let Some(min) = self.min_value {
            if value < min {
                return Err(BoardError::validation(
                    field,
                    format!("must be at least {}", min),
                ));
            }
        }
        if let Some(max) = self.max_value {
            if value > max {
                return Err(BoardError::validation(
                    field,
                    format!("must be at most {}", max),
                ));
            }
        }

        Ok(value)
    }
}

/// A validated request to create a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub people: u32,
}

/// Raw, unvalidated form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub people: String,
}

impl ProjectInput {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        people: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            people: people.into(),
        }
    }

    /// Checks every field against `rules`; the first failing field wins
    pub fn validate(&self, rules: &InputRules) -> Result<NewProject> {
        let outcome = rules
            .title
            .check("title", &self.title)
            .and_then(|_| rules.description.check("description", &self.description))
            .and_then(|_| rules.people.parse("people", &self.people));

        match outcome {
            Ok(people) => Ok(NewProject {
                title: self.title.clone(),
                description: self.description.clone(),
                people,
            }),
            Err(err) => {
                warn!("rejected project input: {}", err);
                Err(err)
            }
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.people.clear();
    }
}
