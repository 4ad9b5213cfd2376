use anyhow::{anyhow, Result};
use std::sync::Arc;

use self::answers::AnswerSet;
use self::definition::*;
use self::matcher::Outcome;
use crate::output::{Message, QuizOutput};

pub mod answers;
pub mod definition;
pub mod matcher;


#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Startup,
    Question(usize),
    Results(Outcome),
}

/// One run through the questionnaire. Owns the answers and the position in
/// the question list; the loaded definition is shared and never modified.
pub struct Session<O: QuizOutput> {
    definition: Arc<QuizDefinition>,
    current_phase: Phase,
    answers: AnswerSet,
    no_match_message: String,
    output: O,
}

impl<O: QuizOutput> Session<O> {
    pub fn new(definition: Arc<QuizDefinition>, no_match_message: &str, output: O) -> Self {
        let mut session = Session {
            definition,
            current_phase: Phase::Startup,
            answers: AnswerSet::new(),
            no_match_message: no_match_message.to_owned(),
            output,
        };
        session.set_current_phase(Phase::Startup);
        session
    }

    pub fn get_phase(&self) -> &Phase {
        &self.current_phase
    }

    pub fn get_answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_over(&self) -> bool {
        match self.current_phase {
            Phase::Results(_) => true,
            _ => false,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.current_phase {
            Phase::Question(index) => self.definition.get_questions().get(index),
            _ => None,
        }
    }

    /// Percentage of questions answered so far.
    pub fn progress(&self) -> f32 {
        let count = self.definition.get_questions().len();
        if count == 0 {
            return 0.0;
        }
        let index = match self.current_phase {
            Phase::Startup => 0,
            Phase::Question(index) => index,
            Phase::Results(_) => count,
        };
        (index as f32 / count as f32) * 100.0
    }

    pub fn start(&mut self) -> Result<()> {
        if let Phase::Question(_) = self.current_phase {
            return Err(anyhow!("The quiz is already in progress"));
        }
        self.answers.clear();
        self.begin_question(0);
        Ok(())
    }

    /// Interprets free-form input as a choice for the current question.
    pub fn select(&mut self, input: &str) -> Result<()> {
        let question = self
            .current_question()
            .ok_or_else(|| anyhow!("There is no active question"))?;
        let option = question.find_option(input).cloned();
        self.advance(option.as_ref())
    }

    /// Records the chosen option and moves to the next question, or to the
    /// results after the last one. Without a choice the question is repeated.
    pub fn advance(&mut self, selection: Option<&AnswerOption>) -> Result<()> {
        let index = match self.current_phase {
            Phase::Question(index) => index,
            _ => return Err(anyhow!("There is no active question")),
        };

        let option = match selection {
            Some(option) => option,
            None => {
                self.output.say(&Message::SelectionRequired);
                return Ok(());
            }
        };

        let question_id = self.definition.get_questions()[index].id.clone();
        self.answers.record(&question_id, &option.value);
        self.begin_question(index + 1);
        Ok(())
    }

    pub fn restart(&mut self) {
        self.answers.clear();
        self.set_current_phase(Phase::Startup);
    }

    fn begin_question(&mut self, index: usize) {
        if index < self.definition.get_questions().len() {
            self.set_current_phase(Phase::Question(index));
        } else {
            let outcome = matcher::evaluate(&self.answers, self.definition.get_rules());
            self.set_current_phase(Phase::Results(outcome));
        }
    }

    fn set_current_phase(&mut self, phase: Phase) {
        log::debug!("Entering quiz phase: {:?}", phase);
        self.current_phase = phase;

        match &self.current_phase {
            Phase::Startup => {
                self.output.say(&Message::Progress(0.0));
                self.output.say(&Message::Welcome);
            }
            Phase::Question(index) => {
                let question = self.definition.get_questions()[*index].clone();
                self.output.say(&Message::Progress(self.progress()));
                self.output.say(&Message::QuestionBegins(question));
            }
            Phase::Results(Outcome::Recommendation(text)) => {
                self.output.say(&Message::Recommendation(text.clone()));
            }
            Phase::Results(Outcome::NoMatch) => {
                self.output
                    .say(&Message::NoMatch(self.no_match_message.clone()));
            }
        }
    }
}
