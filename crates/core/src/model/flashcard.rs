use std::collections::HashSet;

use crate::model::ids::WordId;

/// Per-card reveal state for a flashcard grid.
///
/// Ephemeral: owned by the hosting view and reset whenever a new word list is
/// loaded. Each card flips independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlipState {
    revealed: HashSet<WordId>,
}

impl FlipState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the reveal state of one card, leaving all others untouched.
    pub fn flip(&mut self, id: &WordId) {
        if !self.revealed.remove(id) {
            self.revealed.insert(id.clone());
        }
    }

    #[must_use]
    pub fn is_revealed(&self, id: &WordId) -> bool {
        self.revealed.contains(id)
    }

    /// Hide every card again.
    pub fn reset(&mut self) {
        self.revealed.clear();
    }
}
