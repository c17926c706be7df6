use studybuddy_core::{Difficulty, Mode};

/// Render the provider-agnostic instruction for a topic.
///
/// Quiz and flashcard instructions pin an exact output shape so the answers
/// stay machine-parsable; the caller is responsible for clipping the topic
/// beforehand.
pub fn build_prompt(topic: &str, mode: Mode, difficulty: Difficulty) -> String {
    match mode {
        Mode::Quiz => format!(
            "Generate 5 {} level MCQs.\n\
             \n\
             Format STRICTLY:\n\
             Q1. Question\n\
             A) Option\n\
             B) Option\n\
             C) Option\n\
             D) Option\n\
             Answer: Correct option letter\n\
             \n\
             Topic:\n\
             {}",
            difficulty.as_str(),
            topic
        ),
        Mode::Flashcards => format!(
            "Generate 5 flashcards.\n\
             Format:\n\
             Q: Question\n\
             A: Answer\n\
             Topic:\n\
             {}",
            topic
        ),
        Mode::Summarize => format!("Summarize clearly with key points and concise examples:\n{topic}"),
        Mode::Explain => format!("Explain clearly in structured, easy language:\n{topic}"),
    }
}

#[cfg(test)]
mod tests {
    use super::build_prompt;
    use studybuddy_core::{Difficulty, Mode};

    #[test]
    fn quiz_prompt_pins_the_answer_format() {
        let prompt = build_prompt("Photosynthesis", Mode::Quiz, Difficulty::Hard);
        assert!(prompt.contains("5 Hard level MCQs"));
        assert!(prompt.contains("A) Option"));
        assert!(prompt.contains("D) Option"));
        assert!(prompt.contains("Answer: Correct option letter"));
        assert!(prompt.contains("Photosynthesis"));
    }

    #[test]
    fn flashcard_prompt_uses_two_line_cards() {
        let prompt = build_prompt("Photosynthesis", Mode::Flashcards, Difficulty::Medium);
        assert!(prompt.contains("Q:"));
        assert!(prompt.contains("A:"));
        assert!(prompt.contains("Photosynthesis"));
    }

    #[test]
    fn summarize_and_explain_embed_the_topic() {
        let summary = build_prompt("Black holes", Mode::Summarize, Difficulty::Easy);
        assert!(summary.starts_with("Summarize clearly"));
        assert!(summary.ends_with("Black holes"));

        let explanation = build_prompt("Black holes", Mode::Explain, Difficulty::Easy);
        assert!(explanation.starts_with("Explain clearly"));
        assert!(explanation.ends_with("Black holes"));
    }
}
