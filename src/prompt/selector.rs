use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::templates;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentType {
    Topic,
    Paragraph,
}

impl ContentType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "topic" => Some(ContentType::Topic),
            "paragraph" => Some(ContentType::Paragraph),
            _ => None,
        }
    }
}

/// Internal template families. The caller-facing labels are mapped through
/// `parse`; only the first three have templates for both content types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionFamily {
    MultipleChoice,
    TrueFalse,
    FillInTheBlanks,
    ShortAnswer,
    Matching,
    EssayQuestions,
}

impl QuestionFamily {
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "multiple_choice_quiz" => Some(QuestionFamily::MultipleChoice),
            "true_false_quiz" => Some(QuestionFamily::TrueFalse),
            "fill_in_the_blanks_quiz" => Some(QuestionFamily::FillInTheBlanks),
            "short_answer_quiz" => Some(QuestionFamily::ShortAnswer),
            "matching_quiz" => Some(QuestionFamily::Matching),
            "essay_questions" => Some(QuestionFamily::EssayQuestions),
            _ => None,
        }
    }
}

/// Quiz generation parameters as sent by the frontend. The two renamed
/// fields keep the exact wire names the frontend already uses.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct QuizParams {
    pub content_type: Option<String>,
    pub question_type: Option<String>,
    pub level: Option<String>,
    pub content: Option<String>,
    pub num_of_question: Option<u32>,
    pub subject: Option<String>,
    #[serde(rename = "refrence exam")]
    pub reference_exam: Option<String>,
    #[serde(rename = "custom instruction")]
    pub custom_instruction: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SelectError {
    MissingParams(Vec<&'static str>),
    UnsupportedContentType(String),
    UnsupportedQuestionType(String),
    UnsupportedCombination(ContentType, QuestionFamily),
}

impl Display for SelectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectError::MissingParams(names) => {
                write!(f, "Missing required parameters: {}", names.join(", "))
            }
            SelectError::UnsupportedContentType(raw) => {
                write!(f, "Unsupported content type: {}", raw)
            }
            SelectError::UnsupportedQuestionType(raw) => {
                write!(f, "Unsupported question type: {}", raw)
            }
            SelectError::UnsupportedCombination(content_type, family) => {
                write!(
                    f,
                    "No template for {:?} content with {:?} questions",
                    content_type, family
                )
            }
        }
    }
}

/// Compose the full prompt for a quiz request.
///
/// Required fields are checked first and reported together by name; the
/// (content type, question family) pair then selects one of the six
/// implemented templates. Optional fields become instruction clauses that
/// render empty when absent.
pub fn select_prompt(params: &QuizParams) -> Result<String, SelectError> {
    let content_type_raw = params.content_type.as_deref().unwrap_or("").trim();
    let question_type_raw = params.question_type.as_deref().unwrap_or("").trim();
    let level = params.level.as_deref().unwrap_or("").trim();
    let content = params.content.as_deref().unwrap_or("").trim();

    let mut missing = Vec::new();
    if content_type_raw.is_empty() {
        missing.push("content_type");
    }
    if question_type_raw.is_empty() {
        missing.push("question_type");
    }
    if level.is_empty() {
        missing.push("level");
    }
    if content.is_empty() {
        missing.push("content");
    }
    let num_of_question = match params.num_of_question {
        Some(n) if n > 0 => n,
        _ => {
            missing.push("num_of_question");
            0
        }
    };
    if !missing.is_empty() {
        return Err(SelectError::MissingParams(missing));
    }

    let family = QuestionFamily::parse(question_type_raw)
        .ok_or_else(|| SelectError::UnsupportedQuestionType(question_type_raw.to_string()))?;
    let content_type = ContentType::parse(content_type_raw)
        .ok_or_else(|| SelectError::UnsupportedContentType(content_type_raw.to_string()))?;

    let subject_instruction = optional_clause("Subject", params.subject.as_deref());
    let exam_instruction = optional_clause("Reference exam", params.reference_exam.as_deref());
    let custom_instruction =
        optional_clause("Custom instruction", params.custom_instruction.as_deref());

    let render = match (content_type, family) {
        (ContentType::Topic, QuestionFamily::MultipleChoice) => templates::topic_multiple_choice,
        (ContentType::Topic, QuestionFamily::TrueFalse) => templates::topic_true_false,
        (ContentType::Topic, QuestionFamily::FillInTheBlanks) => {
            templates::topic_fill_in_the_blanks
        }
        (ContentType::Paragraph, QuestionFamily::MultipleChoice) => {
            templates::paragraph_multiple_choice
        }
        (ContentType::Paragraph, QuestionFamily::TrueFalse) => templates::paragraph_true_false,
        (ContentType::Paragraph, QuestionFamily::FillInTheBlanks) => {
            templates::paragraph_fill_in_the_blanks
        }
        (content_type, family) => {
            return Err(SelectError::UnsupportedCombination(content_type, family))
        }
    };

    Ok(render(
        content,
        level,
        num_of_question,
        &subject_instruction,
        &exam_instruction,
        &custom_instruction,
    ))
}

fn optional_clause(label: &str, value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => format!("{}: {}.", label, v.trim()),
        _ => String::new(),
    }
}
