use serde::{Deserialize, Serialize};

/// Longest topic text accepted into prompt building, in characters.
pub const MAX_TOPIC_LENGTH: usize = 2000;

/// What the caller wants generated from a topic.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Explain,
    Summarize,
    Quiz,
    Flashcards,
}

impl Mode {
    /// Parse a user-supplied mode, substituting the default for anything unknown.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "summarize" => Self::Summarize,
            "quiz" => Self::Quiz,
            "flashcards" => Self::Flashcards,
            _ => Self::Explain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explain => "explain",
            Self::Summarize => "summarize",
            Self::Quiz => "quiz",
            Self::Flashcards => "flashcards",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse a user-supplied difficulty, substituting the default for anything unknown.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            _ => Self::Easy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// An external text-generation backend a caller may prefer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    OpenRouter,
}

impl Provider {
    /// Parse a user-supplied provider, substituting the default for anything unknown.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "openrouter" => Self::OpenRouter,
            _ => Self::Gemini,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenRouter => "openrouter",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::OpenRouter => "OpenRouter",
        }
    }
}
