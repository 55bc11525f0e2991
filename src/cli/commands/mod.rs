//! CLI command implementations.

mod config;
mod doctor;
mod serve;
mod speak;
mod summarize;
mod transcript;

pub use config::run_config;
pub use doctor::run_doctor;
pub use serve::run_serve;
pub use speak::run_speak;
pub use summarize::run_summarize;
pub use transcript::run_transcript;
