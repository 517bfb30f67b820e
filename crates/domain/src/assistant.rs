/// Canned answers for common greetings. Checked before the emergency
/// keywords and before the LLM provider is consulted.
const QUICK_RESPONSES: &[(&str, &str)] = &[
    (
        "emergency",
        "If experiencing confusion, seizures, or loss of consciousness, seek immediate medical help!",
    ),
    (
        "hi",
        "Hello! I'm your diabetes assistant. How can I help today?",
    ),
    (
        "thanks",
        "You're welcome! Remember to always consult your healthcare team for personal advice.",
    ),
];

const EMERGENCY_KEYWORDS: &[(&str, &str)] = &[
    ("emergency", "Seek immediate medical help for:"),
    (
        "hypo",
        "Hypoglycemia symptoms: Shaking, sweating. Treat with 15g fast-acting carbs",
    ),
    (
        "hyper",
        "Hyperglycemia symptoms: Thirst, fatigue. Check blood sugar, contact doctor",
    ),
];

/// Looks the message up in the quick-response and emergency-keyword tables.
/// A hit short-circuits the LLM provider entirely.
pub fn quick_reply(message: &str) -> Option<&'static str> {
    let lowered = message.to_lowercase();
    QUICK_RESPONSES
        .iter()
        .chain(EMERGENCY_KEYWORDS.iter())
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, reply)| *reply)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn matches_keywords_case_insensitively() {
        assert_eq!(
            quick_reply("HI there"),
            Some("Hello! I'm your diabetes assistant. How can I help today?")
        );
        assert!(quick_reply("I think I'm having a hypo").is_some());
        assert!(quick_reply("thanks a lot").is_some());
    }

    #[test]
    fn quick_responses_win_over_emergency_keywords() {
        // "emergency" appears in both tables; the quick response is used
        let reply = quick_reply("is this an emergency?").unwrap();
        assert!(reply.starts_with("If experiencing confusion"));
    }

    #[test]
    fn unknown_messages_fall_through() {
        assert_eq!(quick_reply("how many carbs in an apple?"), None);
    }
}
