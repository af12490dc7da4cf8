/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub score: u32,
    pub is_complete: bool,
}

/// Aggregated view of practice progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeProgress {
    pub total: usize,
    pub index: usize,
    pub known: usize,
    pub unknown: usize,
    pub is_complete: bool,
}
