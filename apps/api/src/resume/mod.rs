//! Resume parsing: turns an uploaded PDF into a draft profile.

pub mod handlers;
pub mod parser;
pub mod prompts;
