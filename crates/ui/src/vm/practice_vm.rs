use lesson_core::model::{Level, Locale};
use services::{PracticeLoopService, PracticeProgress, PracticeSession, PracticeStartError};

use super::lesson_vm::{WordCardVm, map_word_cards};
use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PracticeIntent {
    Flip,
    Next,
    Previous,
    MarkKnown,
    MarkUnknown,
}

/// Flashcard run plus the card-face state the session itself does not track.
pub struct PracticeVm {
    session: PracticeSession,
    flipped: bool,
}

impl PracticeVm {
    #[must_use]
    pub fn new(session: PracticeSession) -> Self {
        Self {
            session,
            flipped: false,
        }
    }

    #[must_use]
    pub fn current_card(&self, locale: Locale) -> Option<WordCardVm> {
        let word = self.session.current_word()?;
        map_word_cards(std::slice::from_ref(word), locale).pop()
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    #[must_use]
    pub fn progress(&self) -> PracticeProgress {
        self.session.progress()
    }

    #[must_use]
    pub fn can_repeat_unknown(&self) -> bool {
        self.session.is_complete() && self.session.unknown_count() > 0
    }

    /// Apply a card intent. Every intent is inert once the run is complete;
    /// navigating or classifying always shows the front of the next card.
    pub fn apply(&mut self, intent: PracticeIntent) {
        if self.session.is_complete() {
            return;
        }
        match intent {
            PracticeIntent::Flip => self.flipped = !self.flipped,
            PracticeIntent::Next => {
                self.session.advance();
                self.flipped = false;
            }
            PracticeIntent::Previous => {
                self.session.go_back();
                self.flipped = false;
            }
            PracticeIntent::MarkKnown => {
                self.session.mark_known();
                self.flipped = false;
            }
            PracticeIntent::MarkUnknown => {
                self.session.mark_unknown();
                self.flipped = false;
            }
        }
    }

    pub fn shuffle(&mut self, practice_loop: &PracticeLoopService) {
        practice_loop.shuffle(&mut self.session);
        self.flipped = false;
    }

    /// Start over with only the words still marked unknown.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Empty` when there is nothing to repeat.
    pub fn repeat_unknown(&mut self, practice_loop: &PracticeLoopService) -> Result<(), ViewError> {
        let repeat = practice_loop
            .restart_unknown_only(&self.session)
            .map_err(|_| ViewError::Empty)?;
        self.session = repeat;
        self.flipped = false;
        Ok(())
    }
}

/// # Errors
///
/// Returns `ViewError::Empty` when the backend has no words for the request,
/// `ViewError::Unknown` for transport failures.
pub async fn start_practice(
    practice_loop: &PracticeLoopService,
    count: u32,
    level: Option<Level>,
) -> Result<PracticeVm, ViewError> {
    let session = match practice_loop.start_practice(count, level).await {
        Ok(session) => session,
        Err(PracticeStartError::NoWords) => return Err(ViewError::Empty),
        Err(_) => return Err(ViewError::Unknown),
    };

    Ok(PracticeVm::new(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::model::{VocabWord, WordId};
    use lesson_core::time::fixed_now;

    fn build_vm(count: u32) -> PracticeVm {
        let words = (1..=count)
            .map(|id| {
                VocabWord::new(
                    WordId::new(format!("w{id}")),
                    format!("Wort{id}"),
                    format!("word{id}"),
                    None,
                    None,
                    None,
                )
                .unwrap()
            })
            .collect();
        PracticeVm::new(PracticeSession::new(words, fixed_now()).unwrap())
    }

    #[test]
    fn flip_toggles_and_navigation_resets_to_front() {
        let mut vm = build_vm(3);
        vm.apply(PracticeIntent::Flip);
        assert!(vm.is_flipped());
        vm.apply(PracticeIntent::Flip);
        assert!(!vm.is_flipped());

        vm.apply(PracticeIntent::Flip);
        vm.apply(PracticeIntent::Next);
        assert!(!vm.is_flipped());
    }

    #[test]
    fn marking_shows_the_front_of_the_next_card() {
        let mut vm = build_vm(2);
        vm.apply(PracticeIntent::Flip);
        vm.apply(PracticeIntent::MarkKnown);
        assert!(!vm.is_flipped());
        assert_eq!(vm.progress().known, 1);
    }

    #[test]
    fn intents_are_inert_once_complete() {
        let mut vm = build_vm(1);
        vm.apply(PracticeIntent::MarkUnknown);
        assert!(vm.is_complete());

        vm.apply(PracticeIntent::Flip);
        assert!(!vm.is_flipped());
        vm.apply(PracticeIntent::MarkKnown);
        assert_eq!(vm.progress().known, 0);
        assert!(vm.can_repeat_unknown());
    }

    #[test]
    fn current_card_resolves_for_the_reader_locale() {
        let vm = build_vm(1);
        let card = vm.current_card(Locale::En).unwrap();
        assert_eq!(card.front, "Wort1");
        assert_eq!(card.back, "word1");
    }
}
