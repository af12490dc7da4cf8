/// The fixed, ordered phases of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonSection {
    Warmup,
    Vocabulary,
    Grammar,
    Practice,
    Conversation,
    Quiz,
}

impl LessonSection {
    /// All sections in presentation order.
    pub const ALL: [LessonSection; 6] = [
        LessonSection::Warmup,
        LessonSection::Vocabulary,
        LessonSection::Grammar,
        LessonSection::Practice,
        LessonSection::Conversation,
        LessonSection::Quiz,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            LessonSection::Warmup => "Warm-up",
            LessonSection::Vocabulary => "Vocabulary",
            LessonSection::Grammar => "Grammar",
            LessonSection::Practice => "Practice",
            LessonSection::Conversation => "Conversation",
            LessonSection::Quiz => "Quiz",
        }
    }

    /// The section after this one, or `None` at the end of the lesson.
    #[must_use]
    pub fn following(self) -> Option<LessonSection> {
        let index = Self::ALL.iter().position(|section| *section == self)?;
        Self::ALL.get(index + 1).copied()
    }
}

/// Single-pointer navigator over the fixed section order.
///
/// There is no history stack and no prerequisite gating: any section is
/// reachable at any time, and `next` clamps at the final section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionFlow {
    current: LessonSection,
}

impl Default for SectionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionFlow {
    /// Start at the first section.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: LessonSection::ALL[0],
        }
    }

    #[must_use]
    pub fn current(&self) -> LessonSection {
        self.current
    }

    /// Unconditional jump to a section.
    pub fn go_to(&mut self, section: LessonSection) {
        self.current = section;
    }

    /// Advance to the following section; stays put at the final one.
    pub fn next(&mut self) {
        if let Some(following) = self.current.following() {
            self.current = following;
        }
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current.following().is_none()
    }
}
