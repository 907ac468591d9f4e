//! Adapters to the external generative service.

pub mod gemini_api_agent;
pub mod gemini_content_generator;
pub mod prompts;

pub use gemini_api_agent::{GeminiApiAgent, InlineImage};
pub use gemini_content_generator::GeminiContentGenerator;
