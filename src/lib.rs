//! Flowly — turns static forms into AI-driven conversational interviews.

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod interview;
pub mod llm;
pub mod routes;
pub mod store;
