//! Transcript types and export.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Assistant,
    User,
}

/// One utterance in the transcript. Append-only; never mutated after
/// creation. Serializes as `{"role": "assistant"|"user", "content": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Speaker,
    pub content: String,
}

impl Turn {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::Assistant,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::User,
            content: content.into(),
        }
    }
}

/// Serialize a transcript as an ordered JSON array of `{role, content}`
/// records. Pure and idempotent given the same turns.
pub fn export_transcript(turns: &[Turn]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(turns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_roles_serialize_lowercase() {
        let json = serde_json::to_string(&Turn::assistant("Hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"Hi"}"#);
        let json = serde_json::to_string(&Turn::user("Hello")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Hello"}"#);
    }

    #[test]
    fn export_is_ordered_and_idempotent() {
        let turns = vec![
            Turn::assistant("How was your day?"),
            Turn::user("Pretty good"),
        ];
        let first = export_transcript(&turns).unwrap();
        let second = export_transcript(&turns).unwrap();
        assert_eq!(first, second);

        let parsed: Vec<Turn> = serde_json::from_str(&first).unwrap();
        assert_eq!(parsed, turns);
    }
}
