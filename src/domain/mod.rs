pub mod board;
pub mod project;
pub mod validation;

pub use board::{BoardConfig, ColumnConfig, InputRules};
pub use project::{Project, ProjectId, ProjectStatus};
pub use validation::{NewProject, NumberRule, ProjectInput, TextRule};
