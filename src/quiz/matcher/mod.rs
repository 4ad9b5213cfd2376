use crate::quiz::answers::AnswerSet;
use crate::quiz::definition::RecommendationRule;


#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Recommendation(String),
    NoMatch,
}

/// Finds the first rule, in list order, whose conditions are all among the
/// answers. Later rules never take precedence, even when more specific.
pub fn find_recommendation<'a>(
    answers: &AnswerSet,
    rules: &'a [RecommendationRule],
) -> Option<&'a RecommendationRule> {
    rules.iter().find(|rule| rule.is_satisfied_by(answers))
}

pub fn evaluate(answers: &AnswerSet, rules: &[RecommendationRule]) -> Outcome {
    match find_recommendation(answers, rules) {
        Some(rule) => Outcome::Recommendation(rule.recommendation.clone()),
        None => {
            log::debug!("No recommendation matches answers {}", answers);
            Outcome::NoMatch
        }
    }
}
