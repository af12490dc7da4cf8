use crate::model::dialogue::DialogueLine;
use crate::model::ids::LessonId;
use crate::model::text::LessonText;
use crate::model::word::Level;

/// What the lesson list needs to render one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonOverview {
    id: LessonId,
    title: LessonText,
    description: LessonText,
    level: Option<Level>,
}

impl LessonOverview {
    #[must_use]
    pub fn new(
        id: LessonId,
        title: LessonText,
        description: LessonText,
        level: Option<Level>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            level,
        }
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &LessonText {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &LessonText {
        &self.description
    }

    #[must_use]
    pub fn level(&self) -> Option<Level> {
        self.level
    }
}

/// Full lesson content for the detail view: the non-interactive sections are
/// plain text blocks, the conversation carries precomputed bubble sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDetail {
    overview: LessonOverview,
    warmup: Vec<String>,
    grammar: Vec<String>,
    conversation: Vec<DialogueLine>,
}

impl LessonDetail {
    #[must_use]
    pub fn new(
        overview: LessonOverview,
        warmup: Vec<String>,
        grammar: Vec<String>,
        conversation: Vec<DialogueLine>,
    ) -> Self {
        Self {
            overview,
            warmup,
            grammar,
            conversation,
        }
    }

    #[must_use]
    pub fn overview(&self) -> &LessonOverview {
        &self.overview
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        self.overview.id()
    }

    #[must_use]
    pub fn warmup(&self) -> &[String] {
        &self.warmup
    }

    #[must_use]
    pub fn grammar(&self) -> &[String] {
        &self.grammar
    }

    #[must_use]
    pub fn conversation(&self) -> &[DialogueLine] {
        &self.conversation
    }
}
