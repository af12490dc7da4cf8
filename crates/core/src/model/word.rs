use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::WordId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("german text must not be empty")]
    EmptyGerman,

    #[error("english text must not be empty")]
    EmptyEnglish,

    #[error("unknown level tag: {raw}")]
    UnknownLevel { raw: String },
}

/// CEFR level tag attached to vocabulary and lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl Level {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
            Level::C2 => "C2",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(Level::A1),
            "A2" => Ok(Level::A2),
            "B1" => Ok(Level::B1),
            "B2" => Ok(Level::B2),
            "C1" => Ok(Level::C1),
            "C2" => Ok(Level::C2),
            _ => Err(WordError::UnknownLevel { raw: s.to_string() }),
        }
    }
}

/// A vocabulary entry: German front, English/Bengali back, optional audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabWord {
    id: WordId,
    german: String,
    english: String,
    bengali: Option<String>,
    audio_url: Option<String>,
    level: Option<Level>,
}

impl VocabWord {
    /// Build a vocabulary word.
    ///
    /// # Errors
    ///
    /// Returns `WordError` if the german or english text is blank.
    pub fn new(
        id: WordId,
        german: impl Into<String>,
        english: impl Into<String>,
        bengali: Option<String>,
        audio_url: Option<String>,
        level: Option<Level>,
    ) -> Result<Self, WordError> {
        let german = german.into();
        if german.trim().is_empty() {
            return Err(WordError::EmptyGerman);
        }
        let english = english.into();
        if english.trim().is_empty() {
            return Err(WordError::EmptyEnglish);
        }

        Ok(Self {
            id,
            german,
            english,
            bengali: bengali.filter(|text| !text.trim().is_empty()),
            audio_url: audio_url.filter(|url| !url.trim().is_empty()),
            level,
        })
    }

    #[must_use]
    pub fn id(&self) -> &WordId {
        &self.id
    }

    #[must_use]
    pub fn german(&self) -> &str {
        &self.german
    }

    #[must_use]
    pub fn english(&self) -> &str {
        &self.english
    }

    #[must_use]
    pub fn bengali(&self) -> Option<&str> {
        self.bengali.as_deref()
    }

    #[must_use]
    pub fn audio_url(&self) -> Option<&str> {
        self.audio_url.as_deref()
    }

    #[must_use]
    pub fn level(&self) -> Option<Level> {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_and_normalizes_blank_extras() {
        let word = VocabWord::new(
            WordId::new("w1"),
            "Haus",
            "house",
            Some("  ".into()),
            None,
            Some(Level::A1),
        )
        .unwrap();
        assert_eq!(word.german(), "Haus");
        assert_eq!(word.bengali(), None);
        assert_eq!(word.level(), Some(Level::A1));
    }

    #[test]
    fn rejects_blank_front_or_back() {
        let err = VocabWord::new(WordId::new("w1"), " ", "house", None, None, None).unwrap_err();
        assert!(matches!(err, WordError::EmptyGerman));

        let err = VocabWord::new(WordId::new("w1"), "Haus", "", None, None, None).unwrap_err();
        assert!(matches!(err, WordError::EmptyEnglish));
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("b1".parse::<Level>().unwrap(), Level::B1);
        assert!("Z9".parse::<Level>().is_err());
    }
}
