//! Needs and todos: plain text records independent of the board.

use serde::{Deserialize, Serialize};

use super::fields::null_as_default;
use crate::ids::new_id;

/// Something the shoot needs (gear, props, people)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Need {
    pub id: String,
    pub text: String,
}

impl Need {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
        }
    }
}

/// Checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

impl Todo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            completed: false,
        }
    }

    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}
