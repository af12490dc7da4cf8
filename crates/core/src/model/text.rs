use serde::{Deserialize, Serialize};

/// Display locale selected by the user at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    En,
    Bn,
    De,
}

impl Locale {
    #[must_use]
    pub fn as_tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Bn => "bn",
            Locale::De => "de",
        }
    }
}

/// Lesson titles and descriptions arrive either as a bare string or as a
/// per-language object. The variant is decided once when the payload is
/// decoded; render code only ever calls [`LessonText::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LessonText {
    Plain(String),
    Localized {
        #[serde(default)]
        en: Option<String>,
        #[serde(default)]
        bn: Option<String>,
        #[serde(default)]
        de: Option<String>,
    },
}

impl LessonText {
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        Self::Plain(value.into())
    }

    /// Resolve the text for a locale, falling back to English, then to any
    /// variant that is present.
    #[must_use]
    pub fn resolve(&self, locale: Locale) -> &str {
        match self {
            LessonText::Plain(value) => value,
            LessonText::Localized { en, bn, de } => {
                let preferred = match locale {
                    Locale::En => en,
                    Locale::Bn => bn,
                    Locale::De => de,
                };
                preferred
                    .as_deref()
                    .or(en.as_deref())
                    .or(de.as_deref())
                    .or(bn.as_deref())
                    .unwrap_or("")
            }
        }
    }

    /// Whether the text has at least one non-empty variant.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.resolve(Locale::En).trim().is_empty()
            || !self.resolve(Locale::Bn).trim().is_empty()
            || !self.resolve(Locale::De).trim().is_empty()
    }
}
