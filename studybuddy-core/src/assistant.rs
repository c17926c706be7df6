use rand::seq::SliceRandom;

/// Short encouragements attached to assistant replies.
pub const MOTIVATION_QUOTES: [&str; 5] = [
    "Small progress every day beats big plans someday.",
    "You are one focused session away from a breakthrough.",
    "Discipline creates confidence. Keep going.",
    "Learn deeply, not quickly. Depth wins.",
    "Consistency is your superpower.",
];

/// Pick a motivation quote at random.
pub fn motivation_quote() -> &'static str {
    MOTIVATION_QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(MOTIVATION_QUOTES[0])
}

fn matches_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Answer common product questions locally, without a provider round trip.
pub fn canned_reply(message: &str, username: &str) -> String {
    let text = message.trim().to_lowercase();

    if matches_any(&text, &["hello", "hi", "hey"]) {
        return format!(
            "Hi {username}! 👋 I’m your Study Buddy. Ask me about chat, XP, quizzes, the leaderboard, or profile settings."
        );
    }

    if matches_any(&text, &["how to use", "how use", "start", "guide", "help"]) {
        return format!(
            "Sure {username}, quick guide:\n\
             1) Open AI Chat and enter a prompt.\n\
             2) Pick a mode (Explain/Summarize/Quiz/Flashcards).\n\
             3) Use the Dashboard for stats and history.\n\
             4) Use the XP Center to track progress and rules."
        );
    }

    if matches_any(&text, &["xp", "points", "level", "badge"]) {
        return format!(
            "{username}, XP is earned on tasks and quiz submits.\n\
             - Explain +8\n- Summarize +10\n- Flashcards +12\n- Quiz generate +15\n\
             - Quiz submit base +20\n- +5 per correct answer"
        );
    }

    if matches_any(&text, &["leaderboard", "rank", "ranking"]) {
        return format!(
            "{username}, open the Leaderboard to see the XP ranking. Higher XP means a better rank 🏆."
        );
    }

    if matches_any(&text, &["quiz", "mcq", "test"]) {
        return format!(
            "{username}, select Quiz mode in Chat, generate questions, then submit. You earn extra XP for every correct answer."
        );
    }

    if matches_any(&text, &["theme", "dark", "light"]) {
        return format!(
            "{username}, use the 🌓 Toggle Theme button in the sidebar to switch Dark/Light mode."
        );
    }

    if matches_any(&text, &["profile", "password", "avatar"]) {
        return format!("{username}, open the Profile page to change avatar and password settings.");
    }

    format!(
        "{username}, I didn’t fully catch that, but I can still guide you.\n\
         Try asking one of these:\n\
         - how to use\n- how to gain xp\n- how quizzes work\n- how the leaderboard works"
    )
}

#[cfg(test)]
mod tests {
    use super::{MOTIVATION_QUOTES, canned_reply, motivation_quote};

    #[test]
    fn greets_by_name() {
        let reply = canned_reply("hello there", "Ada");
        assert!(reply.contains("Hi Ada"));
    }

    #[test]
    fn explains_xp_rules() {
        let reply = canned_reply("How do I gain XP?", "Ada");
        assert!(reply.contains("+8"));
        assert!(reply.contains("per correct answer"));
    }

    #[test]
    fn unknown_questions_get_fallback_guidance() {
        let reply = canned_reply("what is the meaning of it all", "Ada");
        assert!(reply.contains("didn’t fully catch"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let reply = canned_reply("LEADERBOARD please", "Ada");
        assert!(reply.contains("ranking"));
    }

    #[test]
    fn quotes_come_from_the_fixed_set() {
        let quote = motivation_quote();
        assert!(MOTIVATION_QUOTES.contains(&quote));
    }
}
