// Application Processor: validate → build prompt → call LLM → (optionally) notify → respond.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod handlers;
pub mod models;
pub mod notifier;
pub mod processor;
pub mod prompts;
pub mod summarizer;
