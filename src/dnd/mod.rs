//! Drag-and-drop status transitions.
//!
//! Cards are drag sources that put their project id on a [`DataTransfer`];
//! columns are drop targets that turn an accepted drop into a
//! [`crate::store::ProjectStore::move_project`] call and re-render from the
//! notification that follows.

pub mod card;
pub mod column;
pub mod transfer;

pub use card::{CardDrag, CardRenderer, DragState, TextCard, TextCardRenderer};
pub use column::{DragVerdict, ProjectColumn};
pub use transfer::{DataTransfer, DropEffect, PROJECT_MEDIA_TYPE};
