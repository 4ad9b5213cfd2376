use serde::{Deserialize, Serialize};

use crate::quiz::answers::AnswerSet;

use super::{tokens_from_scalars, truthy_text, RawRow};


const CONDITION_FIELD_PREFIX: &str = "condition";
const RECOMMENDATION_FIELD: &str = "recommendation";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RecommendationRule {
    #[serde(deserialize_with = "tokens_from_scalars")]
    pub conditions: Vec<String>,
    pub recommendation: String,
}

impl RecommendationRule {
    /// A rule is satisfied when every one of its conditions was given as an
    /// answer. Rules without conditions are never satisfied.
    pub fn is_satisfied_by(&self, answers: &AnswerSet) -> bool {
        !self.conditions.is_empty() && self.conditions.iter().all(|c| answers.contains_value(c))
    }

    fn from_row(row: &RawRow) -> Option<RecommendationRule> {
        let conditions: Vec<String> = row
            .iter()
            .filter(|(field, _)| field.starts_with(CONDITION_FIELD_PREFIX))
            .filter_map(|(_, value)| truthy_text(Some(value)))
            .collect();
        if conditions.is_empty() {
            return None;
        }
        let recommendation = truthy_text(row.get(RECOMMENDATION_FIELD))?;
        Some(RecommendationRule {
            conditions,
            recommendation,
        })
    }
}

pub enum RuleInput {
    RawRows(Vec<RawRow>),
    PreNormalized(Vec<RecommendationRule>),
}

pub fn normalize_rules(input: RuleInput) -> Vec<RecommendationRule> {
    match input {
        RuleInput::PreNormalized(rules) => rules,
        RuleInput::RawRows(rows) => rows
            .iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let rule = RecommendationRule::from_row(row);
                if rule.is_none() {
                    log::debug!(
                        "Skipping recommendation row {}: no conditions or no recommendation",
                        index
                    );
                }
                rule
            })
            .collect(),
    }
}
