//! Messages emitted by the simulation for the UI feedback line.

use serde::{Deserialize, Serialize};

use crate::enums::FeedbackLevel;
use crate::types::Tick;

/// A user-visible feedback message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: String,
    pub tick: Tick,
}

impl Feedback {
    pub fn info(message: impl Into<String>, tick: Tick) -> Self {
        Self {
            level: FeedbackLevel::Info,
            message: message.into(),
            tick,
        }
    }

    pub fn warning(message: impl Into<String>, tick: Tick) -> Self {
        Self {
            level: FeedbackLevel::Warning,
            message: message.into(),
            tick,
        }
    }
}
