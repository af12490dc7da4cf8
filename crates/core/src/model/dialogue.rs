use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DialogueError {
    #[error("dialogue line has no speaker")]
    EmptySpeaker,

    #[error("dialogue line has no text")]
    EmptyText,
}

/// Which side a dialogue bubble renders on.
///
/// Assigned once when conversation data is loaded; views never re-derive it
/// from speaker names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One line of a lesson conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    speaker: String,
    text: String,
    side: Side,
}

impl DialogueLine {
    /// # Errors
    ///
    /// Returns `DialogueError` when speaker or text is blank.
    pub fn new(
        speaker: impl Into<String>,
        text: impl Into<String>,
        side: Side,
    ) -> Result<Self, DialogueError> {
        let speaker = speaker.into();
        if speaker.trim().is_empty() {
            return Err(DialogueError::EmptySpeaker);
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DialogueError::EmptyText);
        }

        Ok(Self {
            speaker,
            text,
            side,
        })
    }

    #[must_use]
    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Assign sides to raw (speaker, text) pairs: the first speaker to appear
    /// sits on the left, everyone else on the right. Blank lines are skipped.
    #[must_use]
    pub fn assign_sides(lines: impl IntoIterator<Item = (String, String)>) -> Vec<DialogueLine> {
        let mut first_speaker: Option<String> = None;
        lines
            .into_iter()
            .filter_map(|(speaker, text)| {
                let anchor = first_speaker
                    .get_or_insert_with(|| speaker.clone())
                    .clone();
                let side = if speaker == anchor {
                    Side::Left
                } else {
                    Side::Right
                };
                DialogueLine::new(speaker, text, side).ok()
            })
            .collect()
    }
}
