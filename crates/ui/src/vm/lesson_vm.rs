use lesson_core::model::{DialogueLine, LessonDetail, LessonOverview, Locale, Side, VocabWord};

/// One lesson tile on the home screen.
///
/// Localized text is resolved here, once, so views only ever see plain
/// strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonCardVm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub level_label: Option<String>,
}

#[must_use]
pub fn map_lesson_cards(lessons: &[LessonOverview], locale: Locale) -> Vec<LessonCardVm> {
    lessons
        .iter()
        .map(|lesson| LessonCardVm {
            id: lesson.id().as_str().to_string(),
            title: lesson.title().resolve(locale).to_string(),
            description: lesson.description().resolve(locale).to_string(),
            level_label: lesson.level().map(|level| level.as_str().to_string()),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueBubbleVm {
    pub speaker: String,
    pub text: String,
    pub is_left: bool,
}

fn map_bubble(line: &DialogueLine) -> DialogueBubbleVm {
    DialogueBubbleVm {
        speaker: line.speaker().to_string(),
        text: line.text().to_string(),
        is_left: line.side() == Side::Left,
    }
}

/// A vocabulary flashcard: German on the front, the learner's language on the
/// back. Bengali readers get the Bengali gloss when the word carries one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordCardVm {
    pub id: String,
    pub front: String,
    pub back: String,
    pub level_label: Option<String>,
}

#[must_use]
pub fn map_word_cards(words: &[VocabWord], locale: Locale) -> Vec<WordCardVm> {
    words.iter().map(|word| map_word_card(word, locale)).collect()
}

fn map_word_card(word: &VocabWord, locale: Locale) -> WordCardVm {
    let back = match locale {
        Locale::Bn => word.bengali().unwrap_or_else(|| word.english()),
        Locale::En | Locale::De => word.english(),
    };
    WordCardVm {
        id: word.id().as_str().to_string(),
        front: word.german().to_string(),
        back: back.to_string(),
        level_label: word.level().map(|level| level.as_str().to_string()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonDetailVm {
    pub title: String,
    pub warmup: Vec<String>,
    pub grammar: Vec<String>,
    pub conversation: Vec<DialogueBubbleVm>,
}

#[must_use]
pub fn map_lesson_detail(detail: &LessonDetail, locale: Locale) -> LessonDetailVm {
    LessonDetailVm {
        title: detail.overview().title().resolve(locale).to_string(),
        warmup: detail.warmup().to_vec(),
        grammar: detail.grammar().to_vec(),
        conversation: detail.conversation().iter().map(map_bubble).collect(),
    }
}
