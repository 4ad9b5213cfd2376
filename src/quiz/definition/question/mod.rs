use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use unidecode::unidecode;

use super::{token_from_scalar, truthy_text, RawRow};


lazy_static! {
    static ref FORBIDDEN_SELECTION_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9]").unwrap();
}

fn sanitize(input: &str) -> String {
    let input = unidecode(input);
    FORBIDDEN_SELECTION_CHARACTERS_REGEX
        .replace_all(&input.to_lowercase(), "")
        .into()
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AnswerOption {
    pub label: String,
    #[serde(deserialize_with = "token_from_scalar")]
    pub value: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Question {
    #[serde(deserialize_with = "token_from_scalar")]
    pub id: String,
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Resolves what the user typed to one of the options: an exact label
    /// first, then a 1-based option number, then the label or value ignoring
    /// case and punctuation.
    pub fn find_option(&self, input: &str) -> Option<&AnswerOption> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if let Some(option) = self.options.iter().find(|o| o.label == input) {
            return Some(option);
        }
        if let Ok(number) = input.parse::<usize>() {
            if let Some(option) = number.checked_sub(1).and_then(|i| self.options.get(i)) {
                return Some(option);
            }
        }

        let sanitized_input = sanitize(input);
        if sanitized_input.is_empty() {
            return self.options.iter().find(|o| o.value == input);
        }
        self.options.iter().find(|o| {
            sanitize(&o.label) == sanitized_input || sanitize(&o.value) == sanitized_input
        })
    }
}

/// The columns of a question sheet. Each row contributes one option.
#[derive(Debug, Default)]
pub struct RawQuestion {
    pub id: Option<Value>,
    pub question: Option<Value>,
    pub option_label: Option<Value>,
    pub option_value: Option<Value>,
}

struct QuestionRow {
    id: String,
    text: String,
    option: AnswerOption,
}

impl RawQuestion {
    pub fn from_row(row: &RawRow) -> RawQuestion {
        RawQuestion {
            id: row.get("id").cloned(),
            question: row.get("question").cloned(),
            option_label: row.get("option_label").cloned(),
            option_value: row.get("option_value").cloned(),
        }
    }

    fn into_row(self) -> Option<QuestionRow> {
        Some(QuestionRow {
            id: truthy_text(self.id.as_ref())?,
            text: truthy_text(self.question.as_ref())?,
            option: AnswerOption {
                label: truthy_text(self.option_label.as_ref())?,
                value: truthy_text(self.option_value.as_ref())?,
            },
        })
    }
}

pub enum QuestionInput {
    RawRows(Vec<RawRow>),
    PreNormalized(Vec<Question>),
}

pub fn normalize_questions(input: QuestionInput) -> Vec<Question> {
    let rows = match input {
        QuestionInput::PreNormalized(questions) => return questions,
        QuestionInput::RawRows(rows) => rows,
    };

    let mut questions: Vec<Question> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (index, row) in rows.iter().enumerate() {
        let row = match RawQuestion::from_row(row).into_row() {
            Some(row) => row,
            None => {
                log::debug!("Skipping question row {}: missing a required field", index);
                continue;
            }
        };
        let position = *positions.entry(row.id.clone()).or_insert_with(|| {
            questions.push(Question {
                id: row.id.clone(),
                text: row.text.clone(),
                options: Vec::new(),
            });
            questions.len() - 1
        });
        questions[position].options.push(row.option);
    }
    questions
}
