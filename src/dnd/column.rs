use crate::dnd::card::CardRenderer;
use crate::dnd::transfer::DataTransfer;
use crate::domain::board::ColumnConfig;
use crate::domain::project::ProjectStatus;
use crate::store::{ProjectStore, Snapshot, Subscription};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Answer to drag-enter/drag-over.
///
/// `Accept` means the host must suppress its default "no drop" handling so
/// that a drop event can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragVerdict {
    Accept,
    Ignore,
}

impl DragVerdict {
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

#[derive(Debug)]
struct ColumnView<C> {
    cards: Vec<C>,
    droppable: bool,
    renders: usize,
}

/// One rendered status column and the drop target over it.
///
/// The card list is only ever rebuilt from store snapshots. A drop asks the
/// store to move the project and waits for the resulting notification.
pub struct ProjectColumn<R: CardRenderer> {
    title: String,
    status: ProjectStatus,
    store: ProjectStore,
    view: Rc<RefCell<ColumnView<R::Card>>>,
    _subscription: Subscription,
}

impl<R> ProjectColumn<R>
where
    R: CardRenderer + 'static,
{
    /// Creates the column and subscribes it to `store`
    pub fn new(config: &ColumnConfig, store: ProjectStore, renderer: R) -> Self {
        let status = config.status;
        let view = Rc::new(RefCell::new(ColumnView {
            cards: Vec::new(),
            droppable: false,
            renders: 0,
        }));

        let subscription = {
            let view = Rc::clone(&view);
            store.subscribe(move |snapshot: Snapshot| {
                let cards: Vec<R::Card> = snapshot
                    .iter()
                    .filter(|project| project.status == status)
                    .map(|project| renderer.render(project))
                    .collect();
                let mut view = view.borrow_mut();
                view.cards = cards;
                view.renders += 1;
            })
        };

        Self {
            title: config.title.clone(),
            status,
            store,
            view,
            _subscription: subscription,
        }
    }
}

impl<R: CardRenderer> ProjectColumn<R> {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Currently rendered cards, in store order
    pub fn cards(&self) -> Vec<R::Card> {
        self.view.borrow().cards.clone()
    }

    pub fn len(&self) -> usize {
        self.view.borrow().cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.borrow().cards.is_empty()
    }

    /// Whether the column is marked as a live drop target
    pub fn is_droppable(&self) -> bool {
        self.view.borrow().droppable
    }

    /// Number of times the card list has been rebuilt
    pub fn render_count(&self) -> usize {
        self.view.borrow().renders
    }

    pub fn drag_enter(&self, transfer: &DataTransfer) -> DragVerdict {
        self.drag_over(transfer)
    }

    pub fn drag_over(&self, transfer: &DataTransfer) -> DragVerdict {
        if !transfer.carries_project() {
            return DragVerdict::Ignore;
        }
        self.view.borrow_mut().droppable = true;
        DragVerdict::Accept
    }

    pub fn drag_leave(&self) {
        self.view.borrow_mut().droppable = false;
    }

    /// Handles a drop, returning whether the store changed.
    ///
    /// Payloads without the project media type or with an unreadable id are
    /// ignored.
    pub fn handle_drop(&self, transfer: &DataTransfer) -> bool {
        self.view.borrow_mut().droppable = false;

        if !transfer.carries_project() {
            debug!("{}: drop without project payload ignored", self.title);
            return false;
        }
        let Some(id) = transfer.project_id() else {
            debug!("{}: drop with unreadable project id ignored", self.title);
            return false;
        };

        self.store.move_project(&id, self.status)
    }
}
