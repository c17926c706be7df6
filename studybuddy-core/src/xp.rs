use crate::request::Mode;

/// Flat XP granted when a quiz result is submitted.
pub const QUIZ_SUBMIT_BASE_XP: i64 = 20;

/// Extra XP granted per correctly answered quiz question.
pub const PER_CORRECT_ANSWER_XP: i64 = 5;

/// XP earned for generating content in the given mode.
pub fn xp_for_mode(mode: Mode) -> i64 {
    match mode {
        Mode::Explain => 8,
        Mode::Summarize => 10,
        Mode::Flashcards => 12,
        Mode::Quiz => 15,
    }
}

/// XP earned for submitting a quiz with `correct` right answers.
pub fn xp_for_quiz_submit(correct: i64) -> i64 {
    QUIZ_SUBMIT_BASE_XP + correct.max(0) * PER_CORRECT_ANSWER_XP
}
