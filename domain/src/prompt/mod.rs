//! Prompt domain
//!
//! Instruction texts for the default cast and the fixed directives sent at
//! each step of the dialogue.

mod template;

pub use template::PromptTemplate;
