use serde::{Deserialize, Serialize};

use super::note::generate_id;

/// A checklist item owned by a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub done: bool,
}

impl Todo {
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            text: String::new(),
            done: false,
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new()
        }
    }

    /// Checkbox marker used by the terminal views
    pub fn checkbox(&self) -> &'static str {
        if self.done {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

impl Default for Todo {
    fn default() -> Self {
        Self {
            id: String::new(),
            text: String::new(),
            done: false,
        }
    }
}
