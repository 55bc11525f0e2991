//! Configuration module for Brief.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, SummarizePrompts};
pub use settings::{
    FeedbackSettings, GeneralSettings, LlmSettings, PromptSettings, ServerSettings, Settings,
    SpeechSettings, SummarizationSettings, YoutubeSettings,
};
