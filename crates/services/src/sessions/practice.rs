use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;

use lesson_core::model::{VocabWord, WordId};

use super::progress::PracticeProgress;
use crate::error::PracticeError;

/// How a word was classified during practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Known,
    Unknown,
}

//
// ─── PRACTICE SESSION ──────────────────────────────────────────────────────────
//

/// Index-driven flashcard run with known/unknown bucket classification.
///
/// A word id lives in at most one bucket at a time: re-classifying moves it,
/// never duplicates it. Marking a word advances the pointer; arrow navigation
/// moves the pointer without touching the buckets.
pub struct PracticeSession {
    words: Vec<VocabWord>,
    current: usize,
    known: HashSet<WordId>,
    unknown: HashSet<WordId>,
    completed: bool,
    started_at: DateTime<Utc>,
}

impl PracticeSession {
    /// Create a practice session over a non-empty word list.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Empty` if no words are provided.
    pub fn new(words: Vec<VocabWord>, started_at: DateTime<Utc>) -> Result<Self, PracticeError> {
        if words.is_empty() {
            return Err(PracticeError::Empty);
        }

        Ok(Self {
            words,
            current: 0,
            known: HashSet::new(),
            unknown: HashSet::new(),
            completed: false,
            started_at,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_word(&self) -> Option<&VocabWord> {
        if self.completed {
            None
        } else {
            self.words.get(self.current)
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.unknown.len()
    }

    /// Which bucket a word currently sits in, if any.
    #[must_use]
    pub fn classification_of(&self, id: &WordId) -> Option<Classification> {
        if self.known.contains(id) {
            Some(Classification::Known)
        } else if self.unknown.contains(id) {
            Some(Classification::Unknown)
        } else {
            None
        }
    }

    /// Returns a summary of the current practice progress.
    #[must_use]
    pub fn progress(&self) -> PracticeProgress {
        PracticeProgress {
            total: self.words.len(),
            index: self.current.min(self.words.len().saturating_sub(1)),
            known: self.known.len(),
            unknown: self.unknown.len(),
            is_complete: self.completed,
        }
    }

    /// Classify the current word as known and advance.
    ///
    /// A no-op once the session is complete.
    pub fn mark_known(&mut self) {
        self.classify_current(Classification::Known);
    }

    /// Classify the current word as unknown and advance.
    ///
    /// A no-op once the session is complete.
    pub fn mark_unknown(&mut self) {
        self.classify_current(Classification::Unknown);
    }

    fn classify_current(&mut self, classification: Classification) {
        let Some(word) = self.current_word() else {
            return;
        };
        let id = word.id().clone();

        // Membership moves between the buckets, never duplicates.
        match classification {
            Classification::Known => {
                self.unknown.remove(&id);
                self.known.insert(id);
            }
            Classification::Unknown => {
                self.known.remove(&id);
                self.unknown.insert(id);
            }
        }

        if self.current + 1 >= self.words.len() {
            self.completed = true;
        } else {
            self.current += 1;
        }
    }

    /// Move forward without classifying; clamps at the last word.
    pub fn advance(&mut self) {
        if self.completed {
            return;
        }
        self.current = (self.current + 1).min(self.words.len() - 1);
    }

    /// Move back without classifying; clamps at the first word.
    pub fn go_back(&mut self) {
        if self.completed {
            return;
        }
        self.current = self.current.saturating_sub(1);
    }

    /// Reorder the deck randomly and start over from the first card.
    ///
    /// Classifications already recorded are kept; re-seeing a classified card
    /// just allows it to be re-classified.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.words.shuffle(rng);
        self.current = 0;
        self.completed = false;
    }

    /// Start a fresh session over exactly the words still marked unknown.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::NotComplete` before the current run has
    /// finished, and `PracticeError::NothingToRepeat` when every word is
    /// known — a zero-length session is never produced.
    pub fn restart_with_unknown_only(
        &self,
        started_at: DateTime<Utc>,
    ) -> Result<PracticeSession, PracticeError> {
        if !self.completed {
            return Err(PracticeError::NotComplete);
        }
        if self.unknown.is_empty() {
            return Err(PracticeError::NothingToRepeat);
        }

        let repeats: Vec<VocabWord> = self
            .words
            .iter()
            .filter(|word| self.unknown.contains(word.id()))
            .cloned()
            .collect();
        PracticeSession::new(repeats, started_at)
    }
}

impl fmt::Debug for PracticeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeSession")
            .field("words_len", &self.words.len())
            .field("current", &self.current)
            .field("known", &self.known.len())
            .field("unknown", &self.unknown.len())
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::time::fixed_now;

    fn build_word(id: u32) -> VocabWord {
        VocabWord::new(
            WordId::new(format!("w{id}")),
            format!("Wort{id}"),
            format!("word{id}"),
            None,
            None,
            None,
        )
        .unwrap()
    }

    fn build_session(count: u32) -> PracticeSession {
        let words = (1..=count).map(build_word).collect();
        PracticeSession::new(words, fixed_now()).unwrap()
    }

    #[test]
    fn empty_session_is_rejected() {
        let err = PracticeSession::new(Vec::new(), fixed_now()).unwrap_err();
        assert!(matches!(err, PracticeError::Empty));
    }

    #[test]
    fn marking_every_word_completes_the_session() {
        let mut session = build_session(3);
        session.mark_known();
        session.mark_unknown();
        assert!(!session.is_complete());
        session.mark_known();

        assert!(session.is_complete());
        assert_eq!(session.known_count(), 2);
        assert_eq!(session.unknown_count(), 1);
        assert_eq!(session.current_word(), None);
    }

    #[test]
    fn reclassification_moves_between_buckets() {
        let mut session = build_session(2);
        let first = WordId::new("w1");

        session.mark_unknown();
        assert_eq!(
            session.classification_of(&first),
            Some(Classification::Unknown)
        );

        // Walk back and flip the verdict.
        session.go_back();
        session.mark_known();
        assert_eq!(
            session.classification_of(&first),
            Some(Classification::Known)
        );
        assert_eq!(session.unknown_count(), 0);
        assert_eq!(session.known_count(), 1);
    }

    #[test]
    fn arrows_navigate_without_classifying() {
        let mut session = build_session(3);
        session.advance();
        session.advance();
        session.advance(); // clamps
        assert_eq!(session.current_index(), 2);
        assert!(!session.is_complete());
        assert_eq!(session.known_count() + session.unknown_count(), 0);

        session.go_back();
        session.go_back();
        session.go_back(); // clamps
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn skipped_words_belong_to_neither_bucket() {
        let mut session = build_session(3);
        session.advance(); // skip w1
        session.mark_known(); // w2
        session.mark_unknown(); // w3
        assert!(session.is_complete());

        assert_eq!(session.classification_of(&WordId::new("w1")), None);
        assert_eq!(
            session.classification_of(&WordId::new("w2")),
            Some(Classification::Known)
        );
    }

    #[test]
    fn shuffle_keeps_classifications_and_restarts_the_walk() {
        let mut session = build_session(4);
        session.mark_unknown();
        session.mark_known();

        let mut rng = rand::rng();
        session.shuffle(&mut rng);

        assert_eq!(session.current_index(), 0);
        assert!(!session.is_complete());
        assert_eq!(session.total_words(), 4);
        assert_eq!(session.unknown_count(), 1);
        assert_eq!(session.known_count(), 1);
    }

    #[test]
    fn restart_unknown_only_scopes_to_unknown_words() {
        let mut session = build_session(10);
        for _ in 0..3 {
            session.mark_unknown();
        }
        for _ in 0..7 {
            session.mark_known();
        }
        assert!(session.is_complete());

        let repeat = session.restart_with_unknown_only(fixed_now()).unwrap();
        assert_eq!(repeat.total_words(), 3);
        assert_eq!(repeat.known_count(), 0);
        assert_eq!(repeat.unknown_count(), 0);
        let ids: Vec<&str> = repeat.words.iter().map(|w| w.id().as_str()).collect();
        assert_eq!(ids, ["w1", "w2", "w3"]);
    }

    #[test]
    fn restart_unknown_only_guards_its_preconditions() {
        let mut session = build_session(2);
        let err = session.restart_with_unknown_only(fixed_now()).unwrap_err();
        assert!(matches!(err, PracticeError::NotComplete));

        session.mark_known();
        session.mark_known();
        let err = session.restart_with_unknown_only(fixed_now()).unwrap_err();
        assert!(matches!(err, PracticeError::NothingToRepeat));
    }

    #[test]
    fn marking_after_completion_is_a_no_op() {
        let mut session = build_session(1);
        session.mark_known();
        assert!(session.is_complete());

        session.mark_unknown();
        assert_eq!(session.known_count(), 1);
        assert_eq!(session.unknown_count(), 0);
    }
}
