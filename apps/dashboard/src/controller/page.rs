//! State shared by every listing screen: the current page, the open modal
//! with its draft, the error slot, debounced search and the stale-result
//! guard.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use client_core::{paging::Pager, ActionError, ActionResult};
use shared::protocol::Page;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::events::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal<Id> {
    Closed,
    Create,
    Edit(Id),
    Delete(Id),
    Approve(Id),
    Reset(Id),
}

impl<Id> Default for Modal<Id> {
    fn default() -> Self {
        Modal::Closed
    }
}

impl<Id> Modal<Id> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    pub fn target(&self) -> Option<&Id> {
        match self {
            Modal::Edit(id) | Modal::Delete(id) | Modal::Approve(id) | Modal::Reset(id) => Some(id),
            Modal::Closed | Modal::Create => None,
        }
    }
}

/// Open modal plus the form fields it edits.
#[derive(Debug, Clone)]
pub struct Editor<Id, D> {
    pub modal: Modal<Id>,
    pub draft: D,
}

impl<Id, D: Default> Default for Editor<Id, D> {
    fn default() -> Self {
        Self {
            modal: Modal::Closed,
            draft: D::default(),
        }
    }
}

impl<Id, D: Default> Editor<Id, D> {
    pub fn create(&mut self) {
        self.modal = Modal::Create;
        self.draft = D::default();
    }

    pub fn edit(&mut self, id: Id, draft: D) {
        self.modal = Modal::Edit(id);
        self.draft = draft;
    }

    /// Confirmation modals (delete, approve, reset) carry no draft.
    pub fn confirm(&mut self, modal: Modal<Id>) {
        self.modal = modal;
        self.draft = D::default();
    }

    pub fn close(&mut self) {
        self.modal = Modal::Closed;
        self.draft = D::default();
    }
}

#[derive(Debug)]
pub struct PageState<T> {
    pub page: u32,
    pub size: u32,
    pub content: Vec<T>,
    pub total_pages: u32,
    pub error: Option<String>,
    pub redirect: Option<Route>,
    cancel: CancellationToken,
}

impl<T> PageState<T> {
    pub fn new(size: u32) -> Self {
        Self {
            page: 0,
            size,
            content: Vec::new(),
            total_pages: 0,
            error: None,
            redirect: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn pager(&self) -> Pager {
        Pager::new(self.page, self.total_pages)
    }

    pub fn is_live(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// After this nothing fetched is committed any more.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Token that shuts the screen down from another task, e.g. while a
    /// fetch is still in flight.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stores a fetched page. Returns `false` when the result was dropped,
    /// either because the screen is gone or the fetch failed.
    pub fn commit(&mut self, result: ActionResult<Page<T>>) -> bool {
        if !self.is_live() {
            debug!("page: dropping result for a closed screen");
            return false;
        }
        match result {
            Ok(page) => {
                self.content = page.content;
                self.total_pages = page.total_pages;
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// Outcome of a mutation. `true` means the caller should close its
    /// modal and reload.
    pub fn mutated(&mut self, result: ActionResult<()>) -> bool {
        match result {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// A 401 never shows inline; it only sets the login redirect.
    pub fn fail(&mut self, err: ActionError) {
        if !self.is_live() {
            return;
        }
        match err {
            ActionError::Unauthorized => self.redirect = Some(Route::Login),
            ActionError::Rejected(message) => self.error = Some(message),
        }
    }

    /// Local validation failure; drafts are left untouched.
    pub fn reject(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn goto_next(&mut self) -> bool {
        match self.pager().next() {
            Some(page) => {
                self.page = page;
                true
            }
            None => false,
        }
    }

    pub fn goto_prev(&mut self) -> bool {
        match self.pager().prev() {
            Some(page) => {
                self.page = page;
                true
            }
            None => false,
        }
    }
}

/// Trailing-edge debounce. Each keystroke takes a new generation and only the
/// latest one survives the delay.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Waits out the delay; `true` if no later keystroke superseded `generation`.
    ///
    /// Clones share the counter, so the wait can run apart from the screen
    /// while further keystrokes keep bumping it.
    pub async fn settle(&self, generation: u64) -> bool {
        tokio::time::sleep(self.delay).await;
        self.is_current(generation)
    }
}

#[cfg(test)]
#[path = "../tests/page_tests.rs"]
mod tests;
