//! Board assembly: one store, one input form and a column per configured
//! status, all sharing the same store handle.

use crate::dnd::{CardDrag, CardRenderer, DataTransfer, ProjectColumn};
use crate::domain::board::{BoardConfig, InputRules};
use crate::domain::project::{ProjectId, ProjectStatus};
use crate::domain::validation::ProjectInput;
use crate::error::Result;
use crate::store::ProjectStore;
use log::{debug, info};

/// The project creation form
pub struct ProjectForm {
    store: ProjectStore,
    rules: InputRules,
    input: ProjectInput,
}

impl ProjectForm {
    pub fn new(store: ProjectStore, rules: InputRules) -> Self {
        Self {
            store,
            rules,
            input: ProjectInput::default(),
        }
    }

    pub fn input(&self) -> &ProjectInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut ProjectInput {
        &mut self.input
    }

    /// Replaces all three fields at once
    pub fn fill(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: impl Into<String>,
    ) {
        self.input = ProjectInput::new(title, description, people);
    }

    /// Validates the fields and, if they pass, adds the project and clears
    /// the form. On error the fields are left as entered.
    pub fn submit(&mut self) -> Result<ProjectId> {
        let project = self.input.validate(&self.rules)?;
        let id = self
            .store
            .add_project(project.title, project.description, project.people);
        self.input.clear();
        Ok(id)
    }
}

/// A complete board
pub struct Board<R: CardRenderer> {
    config: BoardConfig,
    store: ProjectStore,
    form: ProjectForm,
    columns: Vec<ProjectColumn<R>>,
}

impl<R> Board<R>
where
    R: CardRenderer + Clone + 'static,
{
    pub fn new(config: BoardConfig, renderer: R) -> Result<Self> {
        config.validate()?;

        let store = ProjectStore::new();
        let form = ProjectForm::new(store.clone(), config.input.clone());
        let columns = config
            .columns
            .iter()
            .map(|column| ProjectColumn::new(column, store.clone(), renderer.clone()))
            .collect();

        info!(
            "board {:?} ready with {} column(s)",
            config.name,
            config.columns.len()
        );

        Ok(Self {
            config,
            store,
            form,
            columns,
        })
    }
}

impl<R: CardRenderer> Board<R> {
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn form_mut(&mut self) -> &mut ProjectForm {
        &mut self.form
    }

    pub fn columns(&self) -> &[ProjectColumn<R>] {
        &self.columns
    }

    pub fn column(&self, status: ProjectStatus) -> Option<&ProjectColumn<R>> {
        self.columns.iter().find(|column| column.status() == status)
    }

    /// Picks up the card for `id`, if the store knows the project
    pub fn pick_up(&self, id: &ProjectId) -> Option<(CardDrag, DataTransfer)> {
        self.store.get(id)?;
        let mut drag = CardDrag::new(*id);
        let mut transfer = DataTransfer::new();
        drag.start(&mut transfer);
        Some((drag, transfer))
    }

    /// Releases a drag over the column for `status`.
    ///
    /// Returns whether the column took the gesture as a drop, which ends the
    /// drag as `Dropped`. That is not the same as the store changing: a drop
    /// on the project's own column, or one naming an unknown id, is accepted
    /// and leaves the store untouched. Releasing over a missing column counts
    /// as a cancelled drag.
    pub fn release(
        &self,
        drag: &mut CardDrag,
        transfer: &DataTransfer,
        status: ProjectStatus,
    ) -> bool {
        let accepted = match self.column(status) {
            Some(column) if column.drag_enter(transfer).prevents_default() => {
                if !column.handle_drop(transfer) {
                    debug!("drop on {} left the store unchanged", column.title());
                }
                true
            }
            Some(column) => {
                column.drag_leave();
                false
            }
            None => false,
        };
        drag.end(accepted);
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dnd::{DragState, TextCardRenderer};
    use crate::error::BoardError;

    fn board() -> Board<TextCardRenderer> {
        Board::new(BoardConfig::default(), TextCardRenderer).unwrap()
    }

    fn card_ids(board: &Board<TextCardRenderer>, status: ProjectStatus) -> Vec<ProjectId> {
        board
            .column(status)
            .unwrap()
            .cards()
            .iter()
            .map(|card| card.id)
            .collect()
    }

    #[test]
    fn test_board_has_configured_columns() {
        let board = board();
        let titles: Vec<&str> = board.columns().iter().map(|c| c.title()).collect();
        assert_eq!(titles, vec!["Active projects", "Finished projects"]);
        assert_eq!(board.store().listener_count(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BoardConfig {
            columns: Vec::new(),
            ..BoardConfig::default()
        };
        let result = Board::new(config, TextCardRenderer);
        assert!(matches!(result, Err(BoardError::ConfigError(_))));
    }

    #[test]
    fn test_form_submit_adds_and_clears() {
        let mut board = board();
        board.form_mut().fill("P1", "First project", "3");

        let id = board.form_mut().submit().unwrap();

        assert_eq!(card_ids(&board, ProjectStatus::Active), vec![id]);
        assert!(card_ids(&board, ProjectStatus::Finished).is_empty());
        assert_eq!(board.form_mut().input(), &ProjectInput::default());
    }

    #[test]
    fn test_invalid_form_leaves_store_untouched() {
        let mut board = board();
        board.form_mut().fill("P1", "Tiny", "3");

        let result = board.form_mut().submit();

        assert!(matches!(result, Err(BoardError::Validation { .. })));
        assert!(board.store().is_empty());
        assert_eq!(board.form_mut().input().description, "Tiny");
        assert_eq!(board.column(ProjectStatus::Active).unwrap().render_count(), 0);
    }

    #[test]
    fn test_end_to_end_drag_to_finished() {
        let mut board = board();
        board.form_mut().fill("P1", "First project", "1");
        let p1 = board.form_mut().submit().unwrap();

        assert_eq!(card_ids(&board, ProjectStatus::Active), vec![p1]);
        assert!(card_ids(&board, ProjectStatus::Finished).is_empty());

        let (mut drag, transfer) = board.pick_up(&p1).unwrap();
        assert_eq!(drag.state(), DragState::Dragging);
        assert!(board.release(&mut drag, &transfer, ProjectStatus::Finished));

        assert_eq!(board.store().get(&p1).unwrap().status, ProjectStatus::Finished);
        assert!(card_ids(&board, ProjectStatus::Active).is_empty());
        assert_eq!(card_ids(&board, ProjectStatus::Finished), vec![p1]);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_pick_up_unknown_project() {
        let board = board();
        assert!(board.pick_up(&ProjectId::generate()).is_none());
    }

    #[test]
    fn test_release_foreign_payload_cancels() {
        let mut board = board();
        board.form_mut().fill("P1", "First project", "1");
        let p1 = board.form_mut().submit().unwrap();

        let (mut drag, _) = board.pick_up(&p1).unwrap();
        let mut foreign = DataTransfer::new();
        foreign.set_data("text/html", "<p>nope</p>");

        assert!(!board.release(&mut drag, &foreign, ProjectStatus::Finished));
        assert_eq!(board.store().get(&p1).unwrap().status, ProjectStatus::Active);
        assert!(!board.column(ProjectStatus::Finished).unwrap().is_droppable());
    }

    #[test]
    fn test_release_on_own_column_accepted_without_change() {
        let mut board = board();
        board.form_mut().fill("P1", "First project", "1");
        let p1 = board.form_mut().submit().unwrap();
        let renders = board.column(ProjectStatus::Active).unwrap().render_count();

        let (mut drag, transfer) = board.pick_up(&p1).unwrap();
        assert!(board.release(&mut drag, &transfer, ProjectStatus::Active));

        assert_eq!(board.store().get(&p1).unwrap().status, ProjectStatus::Active);
        assert_eq!(
            board.column(ProjectStatus::Active).unwrap().render_count(),
            renders
        );
    }

    #[test]
    fn test_round_trip_between_columns() {
        let mut board = board();
        board.form_mut().fill("P1", "First project", "1");
        let p1 = board.form_mut().submit().unwrap();
        board.form_mut().fill("P2", "Second project", "2");
        let p2 = board.form_mut().submit().unwrap();

        let (mut drag, transfer) = board.pick_up(&p1).unwrap();
        board.release(&mut drag, &transfer, ProjectStatus::Finished);
        let (mut drag, transfer) = board.pick_up(&p1).unwrap();
        board.release(&mut drag, &transfer, ProjectStatus::Active);

        assert_eq!(card_ids(&board, ProjectStatus::Active), vec![p1, p2]);
        assert!(card_ids(&board, ProjectStatus::Finished).is_empty());
    }
}
