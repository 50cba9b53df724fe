use std::fmt::Display;

use crate::prompt::SelectError;

#[derive(Debug)]
pub enum QuizError {
    Selection(SelectError),
    NoCompletionKey,
    Upstream(String),
    Config(String),
}

impl Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Selection(e) => write!(f, "{}", e),
            QuizError::NoCompletionKey => {
                write!(f, "No default OpenRouter API key found in database")
            }
            QuizError::Upstream(msg) => write!(f, "Completion API call failed: {}", msg),
            QuizError::Config(msg) => write!(f, "Configuration lookup failed: {}", msg),
        }
    }
}
