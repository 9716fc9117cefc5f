use crate::dnd::transfer::{DataTransfer, DropEffect, PROJECT_MEDIA_TYPE};
use crate::domain::project::{Project, ProjectId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Turns a project into whatever a column displays
pub trait CardRenderer {
    type Card: Clone;

    fn render(&self, project: &Project) -> Self::Card;
}

/// Plain-text card: a heading, an assignment line and a body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextCard {
    pub id: ProjectId,
    pub heading: String,
    pub assigned: String,
    pub body: String,
}

impl fmt::Display for TextCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.id, self.heading)?;
        writeln!(f, "    {}", self.assigned)?;
        write!(f, "    {}", self.body)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextCardRenderer;

impl CardRenderer for TextCardRenderer {
    type Card = TextCard;

    fn render(&self, project: &Project) -> TextCard {
        TextCard {
            id: project.id,
            heading: project.title.clone(),
            assigned: format!("{} assigned.", project.persons()),
            body: project.description.clone(),
        }
    }
}

/// Where a card is in its drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
    Dropped,
    Cancelled,
}

/// Drag source side of a rendered card.
///
/// Only drag start and drag end are observed here; the store is mutated by
/// the column receiving the drop, never by the card.
#[derive(Debug, Clone)]
pub struct CardDrag {
    project: ProjectId,
    state: DragState,
}

impl CardDrag {
    pub fn new(project: ProjectId) -> Self {
        Self {
            project,
            state: DragState::Idle,
        }
    }

    pub fn project(&self) -> ProjectId {
        self.project
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Begins a drag, writing the project id as the sole payload
    pub fn start(&mut self, transfer: &mut DataTransfer) {
        transfer.set_data(PROJECT_MEDIA_TYPE, self.project.to_string());
        transfer.set_effect_allowed(DropEffect::Move);
        self.state = DragState::Dragging;
        debug!("drag started for project {}", self.project);
    }

    /// Ends the gesture. `dropped` tells whether a column accepted it.
    pub fn end(&mut self, dropped: bool) -> DragState {
        if self.state != DragState::Dragging {
            return self.state;
        }
        self.state = if dropped {
            DragState::Dropped
        } else {
            DragState::Cancelled
        };
        debug!("drag of project {} ended: {:?}", self.project, self.state);
        let outcome = self.state;
        self.state = DragState::Idle;
        outcome
    }
}
