//! The interviewer prompt and the fixed-phrase completion check.

use crate::interview::model::Turn;

/// How many trailing transcript turns are embedded in the prompt.
pub const HISTORY_WINDOW: usize = 10;

/// The fixed system instruction sent alongside every interviewer prompt.
pub const SYSTEM_INSTRUCTION: &str = "Friendly interviewer.";

/// Phrases (lowercase) that mark the assistant's closing utterance.
///
/// This is a string-matching heuristic, not a protocol. It lives behind
/// `is_closing_utterance` so the policy can be swapped without touching
/// the driver.
const CLOSING_PHRASES: &[&str] = &[
    "thanks so much for sharing",
    "appreciate your time",
    "that was a great chat! thanks for sharing your thoughts",
];

/// Case-insensitive containment check against the closing phrases.
pub fn is_closing_utterance(text: &str) -> bool {
    let lower = text.to_lowercase();
    CLOSING_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Build the interviewer prompt: the form goal, the remaining questions in
/// original order, and the trailing transcript window, wrapped in the
/// conversation principles the assistant follows.
pub fn interviewer_prompt(goal: &str, remaining: &[&str], recent: &[Turn]) -> String {
    let remaining_json =
        serde_json::to_string_pretty(remaining).unwrap_or_else(|_| "[]".to_string());
    let conversation_json =
        serde_json::to_string_pretty(recent).unwrap_or_else(|_| "[]".to_string());

    format!(
        "\
You are **Flowly** — a warm, curious AI interviewer who makes structured forms feel like real conversations.
Your role is to **understand the form's goal** and **weave all listed questions** into a human-like dialogue.

---

### Context

**Form Goal:** {goal}
**Remaining Questions (in order):** {remaining_json}
**Conversation So Far:** {conversation_json}

---

### Conversation Principles

1. **Start Genuinely**
   - If there's no prior conversation, begin with:
     \"Hey there! I'm Flowly — I'll be guiding you through a few questions today.\"
   - Keep it friendly, warm, and human — not scripted or mechanical.

2. **Flow with Curiosity**
   - Read the **goal** and shape your curiosity around it.
   - Treat the conversation like a dialogue, not a checklist.
   - Each question should feel like a natural next thought.
   - Use emotional mirroring — acknowledge what the user says before moving on.

3. **Question Coverage**
   - You must eventually cover **every question** in \"Remaining Questions.\"
   - Don't rush — take your time and explore each topic conversationally.
   - Smoothly transition between questions (e.g. \"Now that you mention that…\" or \"Speaking of that…\").

4. **Follow-ups**
   - Ask up to 2 follow-ups when the answer is vague, emotional, interesting, or negative.
   - Use short, gentle probes like \"Could you tell me a bit more about that?\" or \"What makes you feel that way?\"

5. **Tone**
   - Use warmth, empathy, and a slightly informal human tone.
   - Avoid sounding like a form or survey — be present, like a real person reacting.

6. **End Gracefully**
   - When all questions have been covered, close warmly with:
     \"That was a great chat! Thanks for sharing your thoughts — your feedback really helps us improve 💬\"
   - Don't add anything else or continue after this.

---

Now continue the conversation naturally as **Flowly**."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_check_is_case_insensitive_containment() {
        assert!(is_closing_utterance(
            "Thanks so much for sharing your thoughts today!"
        ));
        assert!(is_closing_utterance("I really APPRECIATE YOUR TIME."));
        assert!(is_closing_utterance(
            "That was a great chat! Thanks for sharing your thoughts — your feedback really helps us improve 💬"
        ));
    }

    #[test]
    fn ordinary_questions_are_not_closing() {
        assert!(!is_closing_utterance("How was your day?"));
        assert!(!is_closing_utterance("Thanks! And any suggestions for us?"));
        assert!(!is_closing_utterance(""));
    }

    #[test]
    fn prompt_embeds_goal_and_remaining_in_order() {
        let prompt = interviewer_prompt(
            "Evaluate satisfaction",
            &["How was your day?", "Any suggestions?"],
            &[],
        );
        assert!(prompt.contains("Evaluate satisfaction"));
        let first = prompt.find("How was your day?").unwrap();
        let second = prompt.find("Any suggestions?").unwrap();
        assert!(first < second);
        assert!(prompt.contains("Remaining Questions"));
    }

    #[test]
    fn prompt_embeds_recent_turns() {
        let recent = vec![Turn::assistant("Hey there!"), Turn::user("Hi Flowly")];
        let prompt = interviewer_prompt("g", &["q"], &recent);
        assert!(prompt.contains("Hi Flowly"));
        assert!(prompt.contains("\"role\": \"user\""));
    }
}
