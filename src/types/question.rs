//! Survey questions shown on the questions demo pages

use serde::{Deserialize, Serialize};

/// One survey question with its answer choices
///
/// `id` is a display sequence number assigned by position after the final
/// question set is known; gateway-decided questions arrive without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
}

impl Question {
    pub fn new(question: impl Into<String>, answers: &[&str]) -> Self {
        Self {
            question: question.into(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
            id: None,
        }
    }
}

/// The three static questions every questions page starts from
pub fn base_questions() -> Vec<Question> {
    vec![
        Question::new(
            "What is your favorite Color",
            &["red", "green", "blue", "orange"],
        ),
        Question::new(
            "FOC do you work for?",
            &[
                "rocket homes",
                "rocket loans",
                "rocket mortgage",
                "rocket auto",
            ],
        ),
        Question::new(
            "What garage do you park in?",
            &["ZLOT", "OCM", "Greektown", "I walk to work"],
        ),
    ]
}

/// The fourth question shown when the visitor is not in a variant
pub fn default_fourth_question() -> Question {
    Question::new(
        "IS DEFAULT CONTENT REALLY BORING???",
        &["yes", "probably", "yep", "nah"],
    )
}
