//! Form intake — a goal plus an ordered question list, authored once.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::IntakeError;

/// A persisted form: goal text and an ordered list of questions.
///
/// Created once at intake and immutable afterward. Serializes as the
/// on-disk form document `{form_id, goal, questions}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    pub form_id: String,
    pub goal: String,
    pub questions: Vec<String>,
}

impl Form {
    /// Build a form from goal text and a newline-delimited question list.
    ///
    /// Questions are trimmed and blank lines dropped; order is preserved and
    /// duplicates are allowed. An empty parsed list is rejected.
    pub fn new(goal: &str, questions_text: &str) -> Result<Self, IntakeError> {
        let questions = parse_questions(questions_text);
        if questions.is_empty() {
            return Err(IntakeError::NoQuestions);
        }
        Ok(Self {
            form_id: generate_form_id(),
            goal: goal.trim().to_string(),
            questions,
        })
    }
}

/// Split a multi-line question field into trimmed, non-empty lines.
pub fn parse_questions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Allocate a timestamp-derived form id, e.g. `form_20250114_093042`.
pub fn generate_form_id() -> String {
    Local::now().format("form_%Y%m%d_%H%M%S").to_string()
}
