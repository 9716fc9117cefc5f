//! # Taskboard Core
//!
//! State store and drag-and-drop status protocol for a two-column project
//! board.
//!
//! A [`ProjectStore`] owns the projects and pushes a full snapshot to its
//! listeners after every change. Columns subscribe to the store, keep the
//! projects matching their status, and translate drops into
//! [`ProjectStore::move_project`] calls. Nothing here depends on a
//! particular UI toolkit; hosts supply a [`CardRenderer`] and forward drag
//! events.

pub mod app;
pub mod dnd;
pub mod domain;
pub mod error;
pub mod store;

// Re-export commonly used types
pub use app::{Board, ProjectForm};
pub use dnd::{
    CardDrag, CardRenderer, DataTransfer, DragState, DragVerdict, ProjectColumn, TextCard,
    TextCardRenderer, PROJECT_MEDIA_TYPE,
};
pub use domain::{
    board::{BoardConfig, ColumnConfig, InputRules},
    project::{Project, ProjectId, ProjectStatus},
    validation::{NewProject, ProjectInput},
};
pub use error::{BoardError, Result};
pub use store::{ProjectStore, Snapshot, Subscription, WeakProjectStore};
