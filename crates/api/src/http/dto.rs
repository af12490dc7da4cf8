use serde::{Deserialize, Serialize};
use tracing::warn;

use lesson_core::model::{
    DialogueLine, Exercise, ExerciseId, LessonDetail, LessonId, LessonOverview, LessonText,
    Level, VocabWord, WordId,
};

/// Wire shape of a quiz exercise.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExerciseDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl ExerciseDto {
    fn into_domain(self) -> Option<Exercise> {
        match Exercise::new(
            ExerciseId::new(self.id.clone()),
            self.question,
            self.options,
            self.correct_answer,
        ) {
            Ok(exercise) => Some(exercise),
            Err(err) => {
                warn!(exercise = %self.id, %err, "skipping malformed exercise");
                None
            }
        }
    }
}

/// Decode exercises, dropping rows that violate the exercise invariants
/// instead of failing the whole quiz load.
pub(crate) fn exercises_into_domain(rows: Vec<ExerciseDto>) -> Vec<Exercise> {
    rows.into_iter()
        .filter_map(ExerciseDto::into_domain)
        .collect()
}

/// Wire shape of a vocabulary word.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WordDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub german: String,
    pub english: String,
    #[serde(default)]
    pub bengali: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

impl WordDto {
    fn into_domain(self) -> Option<VocabWord> {
        let level = self.level.as_deref().and_then(|raw| raw.parse().ok());
        match VocabWord::new(
            WordId::new(self.id.clone()),
            self.german,
            self.english,
            self.bengali,
            self.audio_url,
            level,
        ) {
            Ok(word) => Some(word),
            Err(err) => {
                warn!(word = %self.id, %err, "skipping malformed word");
                None
            }
        }
    }
}

pub(crate) fn words_into_domain(rows: Vec<WordDto>) -> Vec<VocabWord> {
    rows.into_iter().filter_map(WordDto::into_domain).collect()
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DialogueLineDto {
    pub speaker: String,
    pub text: String,
}

/// Wire shape of a lesson. Title and description come as either a plain
/// string or a localized object; `LessonText` absorbs both shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LessonDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: LessonText,
    #[serde(default)]
    pub description: Option<LessonText>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub warmup: Vec<String>,
    #[serde(default)]
    pub grammar: Vec<String>,
    #[serde(default)]
    pub conversation: Vec<DialogueLineDto>,
}

impl LessonDto {
    pub(crate) fn overview(&self) -> LessonOverview {
        let level = self
            .level
            .as_deref()
            .and_then(|raw| raw.parse::<Level>().ok());
        LessonOverview::new(
            LessonId::new(self.id.clone()),
            self.title.clone(),
            self.description
                .clone()
                .unwrap_or_else(|| LessonText::plain("")),
            level,
        )
    }

    pub(crate) fn into_domain(self) -> LessonDetail {
        let overview = self.overview();
        let conversation = DialogueLine::assign_sides(
            self.conversation
                .into_iter()
                .map(|line| (line.speaker, line.text)),
        );
        LessonDetail::new(overview, self.warmup, self.grammar, conversation)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CompletionBody {
    pub score: u8,
}
