//! Interview state — the single mutable record one session owns.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::form::Form;
use crate::interview::model::Turn;

/// The phases an interview moves through.
///
/// AwaitingQuestion → AwaitingAnswer → AwaitingQuestion (loop), with either
/// phase able to close into Complete. Complete is terminal: once reached,
/// only transcript export is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    AwaitingQuestion,
    AwaitingAnswer,
    Complete,
}

impl InterviewPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: InterviewPhase) -> bool {
        use InterviewPhase::*;
        matches!(
            (self, target),
            (AwaitingQuestion, AwaitingAnswer)
                | (AwaitingAnswer, AwaitingQuestion)
                | (AwaitingQuestion, Complete)
                | (AwaitingAnswer, Complete)
        )
    }

    /// Whether this phase is terminal (the interview is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl std::fmt::Display for InterviewPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AwaitingQuestion => "awaiting_question",
            Self::AwaitingAnswer => "awaiting_answer",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

/// All mutable interview fields bundled into one record, passed by
/// ownership into each driver operation. The surface layer (REST session
/// or CLI loop) owns its lifecycle: created at interview start, discarded
/// at interview end or reset.
///
/// Invariants: `answered` is a subset of `form.questions`; the transcript
/// alternates assistant/user except for an optional terminal assistant
/// turn; `cursor` never exceeds the question count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewState {
    pub form: Form,
    pub transcript: Vec<Turn>,
    pub answered: HashSet<String>,
    pub cursor: usize,
    pub pending_question: Option<String>,
    pub complete: bool,
}

impl InterviewState {
    /// Fresh state for a just-created form: empty transcript, empty
    /// answered set, cursor 0.
    pub fn new(form: Form) -> Self {
        Self {
            form,
            transcript: Vec::new(),
            answered: HashSet::new(),
            cursor: 0,
            pending_question: None,
            complete: false,
        }
    }

    /// Current phase, derived from the state record.
    pub fn phase(&self) -> InterviewPhase {
        if self.complete {
            InterviewPhase::Complete
        } else if self.pending_question.is_some() {
            InterviewPhase::AwaitingAnswer
        } else {
            InterviewPhase::AwaitingQuestion
        }
    }

    /// Questions not yet answered, in original form order.
    pub fn remaining_questions(&self) -> Vec<&str> {
        self.form
            .questions
            .iter()
            .filter(|q| !self.answered.contains(*q))
            .map(String::as_str)
            .collect()
    }

    /// The last `n` transcript turns (the prompt's history window).
    pub fn recent_turns(&self, n: usize) -> &[Turn] {
        let start = self.transcript.len().saturating_sub(n);
        &self.transcript[start..]
    }

    /// Mark the question at the cursor as answered and advance the cursor.
    ///
    /// Marking is positional, not matched against whatever the model
    /// actually asked — this mirrors the original behavior on purpose.
    /// The cursor is capped at the question count.
    pub(crate) fn mark_current_answered(&mut self) {
        let len = self.form.questions.len();
        if self.cursor < len {
            self.answered.insert(self.form.questions[self.cursor].clone());
        }
        self.cursor = (self.cursor + 1).min(len);
    }

    /// Serialize the transcript for download. Pure; identical output for
    /// identical state.
    pub fn export(&self) -> Result<String, serde_json::Error> {
        super::model::export_transcript(&self.transcript)
    }
}
