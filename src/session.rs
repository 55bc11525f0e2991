//! Process-wide session context holding the last uploaded PDF text.
//!
//! There is exactly one slot shared by every caller. Each operation is atomic
//! on its own, but nothing orders operations across requests: two concurrent
//! uploads resolve last-write-wins, never as a merge.

use std::sync::{Arc, RwLock};
use tracing::debug;

/// Single-slot text context shared across requests.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    text: Arc<RwLock<String>>,
}

impl SessionContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the context wholesale.
    pub fn set(&self, text: String) {
        debug!("Setting session context ({} characters)", text.chars().count());
        *self.text.write().unwrap_or_else(|e| e.into_inner()) = text;
    }

    /// Current context, empty if nothing has been uploaded.
    pub fn get(&self) -> String {
        self.text.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Current context, or None when empty.
    pub fn get_non_empty(&self) -> Option<String> {
        let text = self.get();
        (!text.is_empty()).then_some(text)
    }

    /// Reset to empty.
    pub fn clear(&self) {
        debug!("Clearing session context");
        self.text.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Length of the current context in characters.
    pub fn len(&self) -> usize {
        self.text.read().unwrap_or_else(|e| e.into_inner()).chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.read().unwrap_or_else(|e| e.into_inner()).is_empty()
    }
}
