//! The conversation driver: state record, prompt, and progression logic.

pub mod driver;
pub mod model;
pub mod prompts;
pub mod state;

pub use driver::InterviewDriver;
pub use model::{Speaker, Turn, export_transcript};
pub use state::{InterviewPhase, InterviewState};
