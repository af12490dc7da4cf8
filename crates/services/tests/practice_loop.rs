//! Flashcard practice flow against the in-memory backend.

use std::sync::Arc;

use api::InMemoryBackend;
use lesson_core::model::{Level, VocabWord, WordId};
use lesson_core::time::fixed_clock;
use services::{PracticeError, PracticeLoopService};

fn build_word(id: u32) -> VocabWord {
    VocabWord::new(
        WordId::new(format!("w{id}")),
        format!("Wort{id}"),
        format!("word{id}"),
        None,
        None,
        Some(Level::A1),
    )
    .unwrap()
}

#[tokio::test]
async fn full_run_then_repeat_of_the_unknown_words() {
    let backend = Arc::new(InMemoryBackend::new());
    backend.set_word_pool((1..=6).map(build_word).collect());
    let practice_loop = PracticeLoopService::new(fixed_clock(), backend);

    let mut session = practice_loop.start_practice(20, None).await.unwrap();
    assert_eq!(session.total_words(), 6);

    // First two stick, the rest need another pass.
    session.mark_known();
    session.mark_known();
    for _ in 0..4 {
        session.mark_unknown();
    }
    assert!(session.is_complete());

    let repeat = practice_loop.restart_unknown_only(&session).unwrap();
    assert_eq!(repeat.total_words(), 4);
    assert_eq!(repeat.known_count(), 0);
    assert_eq!(repeat.unknown_count(), 0);
}

#[tokio::test]
async fn repeat_is_refused_while_cards_remain() {
    let backend = Arc::new(InMemoryBackend::new());
    backend.set_word_pool(vec![build_word(1), build_word(2)]);
    let practice_loop = PracticeLoopService::new(fixed_clock(), backend);

    let mut session = practice_loop.start_practice(10, None).await.unwrap();
    session.mark_unknown();

    let err = practice_loop.restart_unknown_only(&session).unwrap_err();
    assert!(matches!(err, PracticeError::NotComplete));
}

#[tokio::test]
async fn shuffle_preserves_the_deck_and_its_verdicts() {
    let backend = Arc::new(InMemoryBackend::new());
    backend.set_word_pool((1..=5).map(build_word).collect());
    let practice_loop = PracticeLoopService::new(fixed_clock(), backend);

    let mut session = practice_loop.start_practice(10, None).await.unwrap();
    session.mark_known();
    session.mark_unknown();

    practice_loop.shuffle(&mut session);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.total_words(), 5);
    assert_eq!(session.known_count(), 1);
    assert_eq!(session.unknown_count(), 1);
}
