// Resume Analyzer
// Implements: text extraction, prompt building, the analysis client, per-request session state.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod client;
pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod render;
pub mod session;
