use crate::domain::project::ProjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Media type under which a dragged card carries its project id
pub const PROJECT_MEDIA_TYPE: &str = "text/plain";

/// Operations a drag source permits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
}

impl fmt::Display for DropEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Copy => write!(f, "copy"),
            Self::Move => write!(f, "move"),
            Self::Link => write!(f, "link"),
        }
    }
}

/// Data attached to a drag gesture, keyed by media type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload carrying a single project id
    pub fn for_project(id: &ProjectId) -> Self {
        let mut transfer = Self::new();
        transfer.set_data(PROJECT_MEDIA_TYPE, id.to_string());
        transfer.set_effect_allowed(DropEffect::Move);
        transfer
    }

    /// Stores `value` under `media_type`, replacing any previous value
    pub fn set_data(&mut self, media_type: impl Into<String>, value: impl Into<String>) {
        let media_type = media_type.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(ty, _)| *ty == media_type) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((media_type, value)),
        }
    }

    pub fn get_data(&self, media_type: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(ty, _)| ty == media_type)
            .map(|(_, value)| value.as_str())
    }

    /// Offered media types in the order they were set
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(ty, _)| ty.as_str())
    }

    pub fn effect_allowed(&self) -> DropEffect {
        self.effect_allowed
    }

    pub fn set_effect_allowed(&mut self, effect: DropEffect) {
        self.effect_allowed = effect;
    }

    /// Whether the payload is offered as a project card
    pub fn carries_project(&self) -> bool {
        self.types().any(|ty| ty == PROJECT_MEDIA_TYPE)
    }

    /// The dragged project's id, if the payload carries a well-formed one
    pub fn project_id(&self) -> Option<ProjectId> {
        self.get_data(PROJECT_MEDIA_TYPE)
            .and_then(|raw| ProjectId::from_str(raw).ok())
    }
}
