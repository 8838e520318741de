//! Interactive chat module
//!
//! Provides a readline-based interactive interface to a dialogue session.

mod repl;

pub use repl::ChatRepl;
