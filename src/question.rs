use serde::Serialize;

/// A generated multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    /// Shown after answering, whatever the outcome
    pub explanation: String,
    /// Shown on demand after a wrong answer
    pub hint: String,
}

impl Question {
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_answer
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }
}

/// Option list plus the index of the right one, as produced by the distractor builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choices {
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl Choices {
    pub fn into_question(
        self,
        question: impl Into<String>,
        explanation: impl Into<String>,
        hint: impl Into<String>,
    ) -> Question {
        Question {
            question: question.into(),
            options: self.options,
            correct_answer: self.correct_answer,
            explanation: explanation.into(),
            hint: hint.into(),
        }
    }
}
