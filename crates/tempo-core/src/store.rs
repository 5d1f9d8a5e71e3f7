//! Reactive cache for to-do data.
//!
//! `TodoStateStore` is the single mutation site for [`TodoState`]. All
//! operations follow the same shape: mark loading, await the network, then
//! apply the result only if it is still current. Staleness is detected post
//! hoc (captured selection id, refresh generation) rather than by
//! cancelling requests; late responses are discarded entirely.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tempo_types::{TodoItem, TodoList};
use tokio::sync::watch;

use crate::api::{ApiError, TodoApi};
use crate::session::SessionController;

/// Snapshot of the to-do cache observed by consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoState {
    /// All lists, in server order, replaced wholesale on refresh.
    pub lists: Vec<TodoList>,
    /// Invariant: absent, or the id of some element of `lists`.
    pub selected_list_id: Option<i64>,
    /// Items of the selected list only; never merged across selections.
    pub selected_items: Vec<TodoItem>,
    pub selected_list_title: Option<String>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

/// Reactive cache over [`TodoApi`], scoped to the authenticated session.
pub struct TodoStateStore {
    api: TodoApi,
    session: Arc<SessionController>,
    state: watch::Sender<TodoState>,
    /// Bumped at the start of every list refresh; a response whose
    /// generation is no longer current has been superseded.
    refresh_gen: AtomicU64,
    /// Bumped at the start of every selection fetch. The captured-id check
    /// alone cannot tell two in-flight fetches for the same id apart.
    select_gen: AtomicU64,
}

impl TodoStateStore {
    pub fn new(api: TodoApi, session: Arc<SessionController>) -> Self {
        Self {
            api,
            session,
            state: watch::Sender::new(TodoState::default()),
            refresh_gen: AtomicU64::new(0),
            select_gen: AtomicU64::new(0),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn snapshot(&self) -> TodoState {
        self.state.borrow().clone()
    }

    /// Change notification stream for the cache.
    pub fn subscribe(&self) -> watch::Receiver<TodoState> {
        self.state.subscribe()
    }

    /// Discards all cached data, e.g. when the session ends.
    pub fn reset(&self) {
        self.state.send_replace(TodoState::default());
    }

    /// Refreshes the full set of lists.
    ///
    /// On success the lists are replaced wholesale. If nothing is selected
    /// (or the selection disappeared from the server result), the first
    /// list in server order is selected; an empty result clears the
    /// selection. On failure the previous lists are left untouched.
    pub async fn fetch_lists(&self) {
        let generation = self.refresh_gen.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error_message = None;
        });

        let result = self.api.list_all().await;

        if self.refresh_gen.load(Ordering::SeqCst) != generation {
            tracing::debug!("discarding superseded list refresh");
            return;
        }

        match result {
            Ok(lists) => {
                let selected = self.state.borrow().selected_list_id;
                let selection_alive =
                    selected.is_some_and(|id| lists.iter().any(|list| list.id == id));
                let first_id = lists.first().map(|list| list.id);

                self.state.send_modify(|s| {
                    s.lists = lists;
                    s.is_loading = false;
                    if !selection_alive {
                        s.selected_list_id = None;
                        s.selected_items = Vec::new();
                        s.selected_list_title = None;
                    }
                });

                if !selection_alive
                    && let Some(id) = first_id
                {
                    self.select_list(id).await;
                }
            }
            Err(err) => self.fail(err),
        }
    }

    /// Selects a list and fetches its items.
    ///
    /// Idempotent for the already-selected id; an id absent from `lists`
    /// is rejected without touching the selection. The selection is
    /// recorded before the fetch starts; when the response arrives it is
    /// applied only if that id is still selected and no newer selection
    /// fetch has started, for success and failure alike.
    pub async fn select_list(&self, id: i64) {
        if self.state.borrow().selected_list_id == Some(id) {
            return;
        }
        if !self.state.borrow().lists.iter().any(|list| list.id == id) {
            self.fail(ApiError::validation(format!("List {id} not found")));
            return;
        }
        let generation = self.select_gen.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.selected_list_id = Some(id);
            s.is_loading = true;
            s.error_message = None;
        });

        let result = self.api.list_with_items(id).await;

        if self.select_gen.load(Ordering::SeqCst) != generation
            || self.state.borrow().selected_list_id != Some(id)
        {
            tracing::debug!(list_id = id, "discarding stale items response");
            return;
        }

        match result {
            Ok(list) => self.state.send_modify(|s| {
                s.selected_items = list.items;
                s.selected_list_title = Some(list.title);
                s.is_loading = false;
            }),
            Err(err) => self.fail(err),
        }
    }

    /// Creates a new list.
    ///
    /// A blank title is rejected client-side without a network call. On
    /// success the lists are re-fetched; there is no optimistic insert, the
    /// new list appears once the refresh completes.
    pub async fn create_list(&self, title: &str) {
        if title.trim().is_empty() {
            self.fail(ApiError::validation("Title cannot be empty"));
            return;
        }
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error_message = None;
        });

        match self.api.create_list(title).await {
            Ok(list) => {
                tracing::debug!(list_id = list.id, "list created, refreshing");
                self.fetch_lists().await;
            }
            Err(err) => self.fail(err),
        }
    }

    /// Applies a classified failure to the cache.
    ///
    /// `Unauthorized` is the one non-local case: the session is torn down
    /// and the cache discarded instead of surfacing a message.
    fn fail(&self, err: ApiError) {
        if err.is_unauthorized() {
            self.session.force_logout();
            self.reset();
            return;
        }
        self.state.send_modify(|s| {
            s.is_loading = false;
            s.error_message = Some(err.to_string());
        });
    }
}
