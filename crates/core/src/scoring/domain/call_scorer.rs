use thiserror::Error;

use super::rulebook::Rulebook;
use crate::rubric::domain::parameter_registry::ParameterRegistry;
use crate::rubric::domain::score_card::ScoreCard;
use crate::rubric::domain::score_validator::ScoreValidator;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("no extraction rule for parameter '{0}'")]
    MissingExtractor(String),
    #[error("extractor for '{parameter}' produced non-finite signal {value}")]
    NonFiniteSignal { parameter: String, value: f64 },
}

/// Raw extractor output for one parameter. Never leaves the scorer unvalidated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSignal {
    pub parameter_id: &'static str,
    pub value: f64,
}

/// Turns formatted transcript text into a validated score card.
pub struct CallScorer {
    registry: ParameterRegistry,
    rulebook: Rulebook,
}

impl CallScorer {
    pub fn new(registry: ParameterRegistry, rulebook: Rulebook) -> Self {
        Self { registry, rulebook }
    }

    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }

    /// One raw signal per registry parameter, in rubric order. Each extractor
    /// sees the same lower-cased text and nothing else.
    pub fn raw_signals(&self, formatted_text: &str) -> Result<Vec<RawSignal>, ScoringError> {
        let text = formatted_text.to_lowercase();
        self.registry
            .iter()
            .map(|parameter| {
                let rule = self
                    .rulebook
                    .rule_for(parameter.id)
                    .ok_or_else(|| ScoringError::MissingExtractor(parameter.id.to_string()))?;
                let value = self.rulebook.extract(rule, &text, parameter);
                if !value.is_finite() {
                    return Err(ScoringError::NonFiniteSignal {
                        parameter: parameter.id.to_string(),
                        value,
                    });
                }
                Ok(RawSignal {
                    parameter_id: parameter.id,
                    value,
                })
            })
            .collect()
    }

    pub fn score(&self, formatted_text: &str) -> Result<ScoreCard, ScoringError> {
        let signals = self.raw_signals(formatted_text)?;
        let card = ScoreCard::from_registry(&self.registry, |parameter| {
            let raw = signals
                .iter()
                .find(|s| s.parameter_id == parameter.id)
                .map(|s| s.value)
                .unwrap_or(0.0);
            let validated = ScoreValidator::validate_parameter(parameter, raw);
            log::debug!("{}: raw {raw:.2} -> {validated}", parameter.id);
            validated
        });
        Ok(card)
    }
}

impl Default for CallScorer {
    fn default() -> Self {
        Self::new(ParameterRegistry::standard(), Rulebook::default())
    }
}
