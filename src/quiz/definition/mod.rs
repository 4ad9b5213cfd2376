use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub mod question;
pub mod rule;

pub use question::{normalize_questions, AnswerOption, Question, QuestionInput};
pub use rule::{normalize_rules, RecommendationRule, RuleInput};

#[cfg(test)]
mod tests;

/// One record of raw input, fields in column or document order.
pub type RawRow = Map<String, Value>;

/// Declares what a JSON payload holds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Shape {
    /// Flat rows that still need normalizing.
    Rows,
    /// Records already shaped as questions or rules.
    Grouped,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataSource {
    Spreadsheet {
        questions: PathBuf,
        recommendations: PathBuf,
    },
    Json {
        questions: PathBuf,
        recommendations: PathBuf,
        question_shape: Shape,
        rule_shape: Shape,
    },
}

/// Returns the text form of a value, or `None` when the value does not count
/// as present (absent, null, false, zero or empty string).
pub fn truthy_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_owned()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn token_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::invalid_type(
            serde::de::Unexpected::Other(&other.to_string()),
            &"a string or a number",
        )),
    }
}

fn tokens_from_scalars<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Token(#[serde(deserialize_with = "token_from_scalar")] String);

    let tokens = Vec::<Token>::deserialize(deserializer)?;
    Ok(tokens.into_iter().map(|t| t.0).collect())
}

/// Names every column, suffixing repeated headers with `_1`, `_2`, ... so
/// that no cell is lost when two columns share a name.
fn unique_headers(headers: &csv::StringRecord) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for header in headers.iter() {
        let header = header.trim();
        let mut name = header.to_owned();
        let mut suffix = 0;
        while names.contains(&name) {
            suffix += 1;
            name = format!("{}_{}", header, suffix);
        }
        names.push(name);
    }
    names
}

/// Reads a sheet exported as CSV. Every cell is kept as text. Short rows are
/// accepted; their missing cells are simply absent from the row.
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = unique_headers(csv_reader.headers()?);
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), Value::String(cell.to_owned())))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Reads a JSON document holding an array of records of type `T`.
pub fn read_json_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let document: Value = serde_json::from_reader(reader)?;
    if !document.is_array() {
        return Err(anyhow!("Expected a JSON array at the top level"));
    }
    Ok(serde_json::from_value(document)?)
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Could not open {:?}", path))
}

fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    read_csv_rows(open_file(path)?).with_context(|| format!("Could not parse sheet {:?}", path))
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    read_json_rows(open_file(path)?).with_context(|| format!("Could not parse {:?}", path))
}

fn load_question_input(path: &Path, shape: Shape) -> Result<QuestionInput> {
    Ok(match shape {
        Shape::Rows => QuestionInput::RawRows(load_json(path)?),
        Shape::Grouped => QuestionInput::PreNormalized(load_json(path)?),
    })
}

fn load_rule_input(path: &Path, shape: Shape) -> Result<RuleInput> {
    Ok(match shape {
        Shape::Rows => RuleInput::RawRows(load_json(path)?),
        Shape::Grouped => RuleInput::PreNormalized(load_json(path)?),
    })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuizDefinition {
    questions: Vec<Question>,
    rules: Vec<RecommendationRule>,
}

impl QuizDefinition {
    pub fn new(questions: QuestionInput, rules: RuleInput) -> QuizDefinition {
        QuizDefinition {
            questions: normalize_questions(questions),
            rules: normalize_rules(rules),
        }
    }

    pub fn open(source: &DataSource) -> Result<QuizDefinition> {
        let (questions, rules) = match source {
            DataSource::Spreadsheet {
                questions,
                recommendations,
            } => {
                log::info!("Reading sheets {:?} and {:?}", questions, recommendations);
                (
                    QuestionInput::RawRows(load_csv(questions)?),
                    RuleInput::RawRows(load_csv(recommendations)?),
                )
            }
            DataSource::Json {
                questions,
                recommendations,
                question_shape,
                rule_shape,
            } => {
                log::info!("Reading {:?} and {:?}", questions, recommendations);
                (
                    load_question_input(questions, *question_shape)?,
                    load_rule_input(recommendations, *rule_shape)?,
                )
            }
        };

        let definition = QuizDefinition::new(questions, rules);
        log::info!(
            "Loaded {} questions and {} recommendation rules",
            definition.questions.len(),
            definition.rules.len()
        );
        Ok(definition)
    }

    pub fn get_questions(&self) -> &Vec<Question> {
        &self.questions
    }

    pub fn get_rules(&self) -> &Vec<RecommendationRule> {
        &self.rules
    }
}
