use parking_lot::Mutex;
use std::sync::Arc;

/// Shared, ordered record of which actions were invoked.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<&'static str>>>,
}

impl Journal {
    /// Makes an action that appends `name` to this journal when invoked.
    pub fn recorder(&self, name: &'static str) -> impl FnOnce() + Send + 'static {
        let entries = Arc::clone(&self.entries);

        move || entries.lock().push(name)
    }

    /// Returns the names recorded so far, in invocation order.
    pub fn entries(&self) -> Vec<&'static str> {
        self.entries.lock().clone()
    }
}
