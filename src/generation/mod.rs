//! Answer generation: prompt assembly and citation extraction

pub mod prompt;

pub use prompt::PromptBuilder;
