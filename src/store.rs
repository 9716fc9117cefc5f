//! The authoritative project collection and its change notifications.
//!
//! A [`ProjectStore`] is a cheap handle: clones share one collection, so a
//! board builds one store and hands clones to its form and columns. Every
//! mutation synchronously pushes a fresh [`Snapshot`] to each listener in
//! registration order before returning.
//!
//! Mutations issued from inside a listener are applied at once, but their
//! notification waits until the running pass has reached every listener.
//! Each pass therefore delivers one consistent snapshot to everybody.

use crate::domain::project::{Project, ProjectId, ProjectStatus};
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// An independently owned copy of the collection, in insertion order
pub type Snapshot = Vec<Project>;

type Listener = Rc<RefCell<dyn FnMut(Snapshot)>>;

#[derive(Default)]
struct StoreState {
    projects: Vec<Project>,
    listeners: BTreeMap<u64, Listener>,
    next_listener_key: u64,
    notifying: bool,
    pending: bool,
}

/// Single source of truth for the board's projects
#[derive(Clone, Default)]
pub struct ProjectStore {
    state: Rc<RefCell<StoreState>>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for every future mutation.
    ///
    /// The current state is not replayed. The listener stays registered
    /// until the returned [`Subscription`] is dropped.
    ///
    /// A listener holding a strong `ProjectStore` clone keeps the store alive
    /// until it is unsubscribed; capture [`ProjectStore::downgrade`] instead
    /// when that matters.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(Snapshot) + 'static,
    {
        let mut state = self.state.borrow_mut();
        let key = state.next_listener_key;
        state.next_listener_key += 1;
        state.listeners.insert(key, Rc::new(RefCell::new(listener)));
        debug!("listener {} subscribed", key);

        Subscription {
            state: Rc::downgrade(&self.state),
            key,
        }
    }

    /// Handle that does not keep the store alive
    pub fn downgrade(&self) -> WeakProjectStore {
        WeakProjectStore {
            state: Rc::downgrade(&self.state),
        }
    }

    /// Appends a new active project and notifies listeners
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> ProjectId {
        let id = ProjectId::generate();
        let project = Project::new(id, title.into(), description.into(), people);
        debug!("adding project {} ({:?})", id, project.title);
        self.state.borrow_mut().projects.push(project);
        self.notify();
        id
    }

    /// Moves a project to `status`.
    ///
    /// Returns `false` without notifying when the id is unknown or the
    /// project already has that status.
    pub fn move_project(&self, id: &ProjectId, status: ProjectStatus) -> bool {
        let changed = {
            let mut state = self.state.borrow_mut();
            match state.projects.iter_mut().find(|p| &p.id == id) {
                Some(project) => project.set_status(status),
                None => {
                    debug!("move of unknown project {} ignored", id);
                    return false;
                }
            }
        };

        if !changed {
            debug!("project {} already {}", id, status);
            return false;
        }

        debug!("project {} moved to {}", id, status);
        self.notify();
        true
    }

    /// Copy of the current collection
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().projects.clone()
    }

    pub fn get(&self, id: &ProjectId) -> Option<Project> {
        self.state
            .borrow()
            .projects
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().projects.is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Serializes the current collection for JSON-consuming renderers
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.state.borrow().projects)?)
    }

    fn notify(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.notifying {
                state.pending = true;
                return;
            }
            state.notifying = true;
        }
        let _pass = NotifyPass(&self.state);

        loop {
            let (snapshot, keys) = {
                let state = self.state.borrow();
                let keys: Vec<u64> = state.listeners.keys().copied().collect();
                (state.projects.clone(), keys)
            };
            debug!(
                "notifying {} listener(s) of {} project(s)",
                keys.len(),
                snapshot.len()
            );

            for key in keys {
                // Listeners may unsubscribe each other mid-pass.
                let listener = self.state.borrow().listeners.get(&key).cloned();
                if let Some(listener) = listener {
                    let mut listener = listener.borrow_mut();
                    (&mut *listener)(snapshot.clone());
                }
            }

            let mut state = self.state.borrow_mut();
            if !state.pending {
                break;
            }
            state.pending = false;
        }
    }
}

impl fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ProjectStore")
            .field("projects", &state.projects)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

/// Non-owning store handle, see [`ProjectStore::downgrade`]
#[derive(Clone, Debug)]
pub struct WeakProjectStore {
    state: Weak<RefCell<StoreState>>,
}

impl WeakProjectStore {
    pub fn upgrade(&self) -> Option<ProjectStore> {
        self.state.upgrade().map(|state| ProjectStore { state })
    }
}

/// Clears the in-progress flag even if a listener panics
struct NotifyPass<'a>(&'a RefCell<StoreState>);

impl Drop for NotifyPass<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.0.try_borrow_mut() {
            state.notifying = false;
            state.pending = false;
        }
    }
}

/// Registration handle returned by [`ProjectStore::subscribe`]
#[derive(Debug)]
pub struct Subscription {
    state: Weak<RefCell<StoreState>>,
    key: u64,
}

impl Subscription {
    /// Unregisters the listener now
    pub fn unsubscribe(self) {}

    pub fn is_active(&self) -> bool {
        match self.state.upgrade() {
            Some(state) => {
                let state = state.borrow();
                state.listeners.contains_key(&self.key)
            }
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            // Release the borrow before the closure drops: it may own
            // subscriptions of its own.
            let removed = match state.try_borrow_mut() {
                Ok(mut state) => state.listeners.remove(&self.key),
                Err(_) => {
                    warn!("listener {} could not be unsubscribed", self.key);
                    None
                }
            };
            if removed.is_some() {
                debug!("listener {} unsubscribed", self.key);
            }
            drop(removed);
        }
    }
}
