//! In-memory brief editing sessions.
//!
//! One session per drafted document, owned by this store for the lifetime of
//! the edit. Closing a session aborts any regeneration task still in flight
//! rather than letting it resolve against discarded state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::editor::DocumentEditor;

pub struct BriefSession {
    pub editor: DocumentEditor,
    pub account_id: String,
    pub from_rep_id: String,
    pub to_rep_id: String,
    tasks: Vec<JoinHandle<()>>,
}

impl BriefSession {
    pub fn new(
        editor: DocumentEditor,
        account_id: String,
        from_rep_id: String,
        to_rep_id: String,
    ) -> Self {
        Self {
            editor,
            account_id,
            from_rep_id,
            to_rep_id,
            tasks: Vec::new(),
        }
    }

    pub fn track_task(&mut self, handle: JoinHandle<()>) {
        // Drop handles for tasks that already resolved.
        self.tasks.retain(|t| !t.is_finished());
        self.tasks.push(handle);
    }

    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

#[derive(Clone, Default)]
pub struct BriefSessions {
    inner: Arc<Mutex<HashMap<Uuid, BriefSession>>>,
}

impl BriefSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, session: BriefSession) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().insert(id, session);
        id
    }

    /// Runs `f` against the named session under the store lock. Returns
    /// `None` when the session does not exist (or was closed).
    pub fn with_session<T>(&self, id: &Uuid, f: impl FnOnce(&mut BriefSession) -> T) -> Option<T> {
        self.inner.lock().get_mut(id).map(f)
    }

    /// Discards the session and aborts in-flight regeneration tasks.
    pub fn close(&self, id: &Uuid) -> bool {
        match self.inner.lock().remove(id) {
            Some(mut session) => {
                session.abort_tasks();
                true
            }
            None => false,
        }
    }
}
