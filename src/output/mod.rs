use crate::quiz::definition::Question;

#[cfg(test)]
pub mod mock;
pub mod terminal;

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Welcome,
    QuestionBegins(Question),
    Progress(f32),
    SelectionRequired,
    Recommendation(String),
    NoMatch(String),
    LoadFailed(String),
}

pub trait QuizOutput {
    fn say(&self, message: &Message);
}
