use itertools::Itertools;
use std::fmt;

/// The value chosen for each answered question, in the order answered.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AnswerSet {
    entries: Vec<(String, String)>,
}

impl AnswerSet {
    pub fn new() -> Self {
        AnswerSet::default()
    }

    pub fn record(&mut self, question_id: &str, value: &str) {
        match self.entries.iter_mut().find(|(id, _)| id == question_id) {
            Some(entry) => entry.1 = value.to_owned(),
            None => self
                .entries
                .push((question_id.to_owned(), value.to_owned())),
        }
    }

    #[cfg(test)]
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, value)| value.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, value)| value.as_str())
    }

    pub fn contains_value(&self, token: &str) -> bool {
        self.values().any(|v| v == token)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for AnswerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .entries
            .iter()
            .map(|(id, value)| format!("{}={}", id, value))
            .join(", ");
        write!(f, "{{{}}}", entries)
    }
}

impl<'a> std::iter::FromIterator<(&'a str, &'a str)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut answers = AnswerSet::new();
        for (id, value) in iter {
            answers.record(id, value);
        }
        answers
    }
}
