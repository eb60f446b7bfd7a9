//! Per-conversation state.

use std::sync::Arc;

use uuid::Uuid;

use ac_charts::FloatSet;
use ac_protocol::{ChatMessage, Dataset, FloatId};

/// Whether the next utterance is free text or a pending float number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogueState {
    #[default]
    Idle,
    /// The user asked to add a float; the next input is its number.
    AwaitingIdentifier,
}

/// State owned by exactly one conversation.
///
/// Datasets only enter through the router (auto-load or add flow), always
/// straight from the fetcher.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    state: DialogueState,
    floats: FloatSet,
    transcript: Vec<ChatMessage>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            state: DialogueState::Idle,
            floats: FloatSet::new(),
            transcript: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn is_awaiting_identifier(&self) -> bool {
        self.state == DialogueState::AwaitingIdentifier
    }

    pub(crate) fn set_state(&mut self, state: DialogueState) {
        if self.state != state {
            tracing::debug!(session_id = %self.id, ?state, "dialogue state changed");
        }
        self.state = state;
    }

    /// Loaded datasets, keyed by float id.
    pub fn floats(&self) -> &FloatSet {
        &self.floats
    }

    /// Loaded float ids in ascending order.
    pub fn loaded_ids(&self) -> Vec<FloatId> {
        self.floats.keys().copied().collect()
    }

    pub fn is_loaded(&self, float_id: FloatId) -> bool {
        self.floats.contains_key(&float_id)
    }

    pub fn dataset(&self, float_id: FloatId) -> Option<&Arc<Dataset>> {
        self.floats.get(&float_id)
    }

    /// The one loaded float, if exactly one is loaded.
    pub fn sole_float(&self) -> Option<FloatId> {
        match self.floats.len() {
            1 => self.floats.keys().next().copied(),
            _ => None,
        }
    }

    pub(crate) fn insert_float(&mut self, float_id: FloatId, dataset: Arc<Dataset>) {
        self.floats.insert(float_id, dataset);
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub(crate) fn record(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
