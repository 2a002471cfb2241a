//! InterviewDriver — turns the question list into a turn-by-turn interview.

use std::sync::Arc;

use crate::error::{Error, InterviewError, Result};
use crate::interview::model::Turn;
use crate::interview::prompts::{
    HISTORY_WINDOW, SYSTEM_INSTRUCTION, interviewer_prompt, is_closing_utterance,
};
use crate::interview::state::InterviewState;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

/// Drives one interview: fetches assistant utterances from the LLM and
/// applies user replies to the state record.
pub struct InterviewDriver {
    llm: Arc<dyn LlmProvider>,
}

impl InterviewDriver {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Get the assistant utterance awaiting a reply, requesting one from
    /// the LLM if none is pending.
    ///
    /// A failed LLM call leaves the state untouched; the caller may retry
    /// by invoking this again. If the fetched utterance matches a closing
    /// phrase it becomes the terminal assistant turn and the interview
    /// completes with nothing left pending.
    pub async fn next_question(&self, state: &mut InterviewState) -> Result<String> {
        if state.complete {
            return Err(InterviewError::Complete.into());
        }
        if let Some(question) = &state.pending_question {
            return Ok(question.clone());
        }

        let remaining = state.remaining_questions();
        let prompt = interviewer_prompt(
            &state.form.goal,
            &remaining,
            state.recent_turns(HISTORY_WINDOW),
        );
        let request = CompletionRequest::new(vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(&prompt),
        ]);
        let response = self.llm.complete(request).await.map_err(Error::Llm)?;
        let utterance = response.content.trim().to_string();

        if is_closing_utterance(&utterance) {
            tracing::info!(form_id = %state.form.form_id, "assistant closed the interview");
            state.transcript.push(Turn::assistant(&utterance));
            state.pending_question = None;
            state.complete = true;
            return Ok(utterance);
        }

        state.pending_question = Some(utterance.clone());
        Ok(utterance)
    }

    /// Apply a user reply to the pending question.
    ///
    /// Appends the (assistant, user) turn pair, marks the question at the
    /// cursor answered, advances the cursor, clears the pending question,
    /// and completes the interview once no questions remain unanswered.
    /// Blank replies are rejected without mutating anything.
    pub fn submit_reply(&self, state: &mut InterviewState, reply: &str) -> Result<()> {
        if state.complete {
            return Err(InterviewError::Complete.into());
        }
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(InterviewError::EmptyReply.into());
        }
        let question = state
            .pending_question
            .clone()
            .ok_or(InterviewError::NoPendingQuestion)?;

        state.transcript.push(Turn::assistant(question));
        state.transcript.push(Turn::user(reply));
        state.mark_current_answered();
        state.pending_question = None;

        if state.remaining_questions().is_empty() {
            tracing::info!(form_id = %state.form.form_id, "all questions covered");
            state.complete = true;
        }
        Ok(())
    }
}
