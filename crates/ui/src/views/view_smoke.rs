use lesson_core::model::{
    DialogueLine, LessonDetail, LessonId, LessonOverview, LessonText, VocabWord, WordId,
};

use super::test_harness::{ViewKind, setup_view_harness};

fn sample_lesson(id: &str, title: &str) -> LessonDetail {
    LessonDetail::new(
        LessonOverview::new(
            LessonId::new(id),
            LessonText::plain(title),
            LessonText::plain("Basics for the first week."),
            None,
        ),
        vec!["Wie heißt du?".to_string()],
        vec!["Verbs go second in a main clause.".to_string()],
        DialogueLine::assign_sides(vec![
            ("Anna".to_string(), "Hallo!".to_string()),
            ("Ben".to_string(), "Guten Tag!".to_string()),
        ]),
    )
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_lessons() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.backend.insert_lesson(sample_lesson("l1", "Greetings"));
    harness.backend.insert_lesson(sample_lesson("l2", "Numbers"));

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Greetings"), "missing lesson title in {html}");
    assert!(html.contains("Numbers"), "missing lesson title in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_shows_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No lessons yet"), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_opens_on_warmup() {
    let mut harness = setup_view_harness(ViewKind::Lesson("l1".to_string()));
    harness.backend.insert_lesson(sample_lesson("l1", "Greetings"));
    harness.backend.set_words(
        LessonId::new("l1"),
        vec![
            VocabWord::new(WordId::new("w1"), "Hallo", "hello", None, None, None).unwrap(),
        ],
    );

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Greetings"), "missing title in {html}");
    assert!(html.contains("Wie heißt du?"), "missing warmup text in {html}");
    assert!(html.contains("Warm-up"), "missing section tabs in {html}");
    assert!(html.contains("Quiz"), "missing quiz tab in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_shows_start_screen() {
    let mut harness = setup_view_harness(ViewKind::Practice);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Start Practice"), "missing start button in {html}");
    assert!(
        html.contains("Space flips the card"),
        "missing keyboard hint in {html}"
    );
}
