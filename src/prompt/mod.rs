pub mod selector;
pub mod templates;

pub use selector::{select_prompt, ContentType, QuestionFamily, QuizParams, SelectError};
