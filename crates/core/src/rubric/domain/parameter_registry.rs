use thiserror::Error;

use super::scoring_parameter::ScoringParameter;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RubricError {
    #[error("unknown scoring parameter: {0}")]
    UnknownParameter(String),
}

/// Parameter ids of the standard rubric.
pub mod ids {
    pub const GREETING: &str = "greeting";
    pub const COLLECTION_URGENCY: &str = "collectionUrgency";
    pub const REBUTTAL_CUSTOMER_HANDLING: &str = "rebuttalCustomerHandling";
    pub const CALL_ETIQUETTE: &str = "callEtiquette";
    pub const CALL_DISCLAIMER: &str = "callDisclaimer";
    pub const CORRECT_DISPOSITION: &str = "correctDisposition";
    pub const CALL_CLOSING: &str = "callClosing";
    pub const FATAL_IDENTIFICATION: &str = "fatalIdentification";
    pub const FATAL_TAPE_DISCLOSER: &str = "fatalTapeDiscloser";
    pub const FATAL_TONE_LANGUAGE: &str = "fatalToneLanguage";
}

const STANDARD_RUBRIC: &[ScoringParameter] = &[
    ScoringParameter::pass_fail(ids::GREETING, 5, "Call opening within 5 seconds"),
    ScoringParameter::graduated(
        ids::COLLECTION_URGENCY,
        15,
        "Create urgency, cross-questioning",
    ),
    ScoringParameter::graduated(
        ids::REBUTTAL_CUSTOMER_HANDLING,
        15,
        "Address penalties, objections",
    ),
    ScoringParameter::graduated(ids::CALL_ETIQUETTE, 15, "Tone, empathy, clear speech"),
    ScoringParameter::pass_fail(ids::CALL_DISCLAIMER, 5, "Take permission before ending"),
    ScoringParameter::pass_fail(
        ids::CORRECT_DISPOSITION,
        10,
        "Use correct category with remark",
    ),
    ScoringParameter::pass_fail(ids::CALL_CLOSING, 5, "Thank the customer properly"),
    ScoringParameter::pass_fail(ids::FATAL_IDENTIFICATION, 5, "Missing agent/customer info"),
    ScoringParameter::pass_fail(
        ids::FATAL_TAPE_DISCLOSER,
        10,
        "Inform customer about recording",
    ),
    ScoringParameter::pass_fail(
        ids::FATAL_TONE_LANGUAGE,
        15,
        "No abusive or threatening speech",
    ),
];

/// Ordered, immutable catalog of scoring parameters.
///
/// The only place weights and disciplines are defined. Scoring, validation,
/// percentages and reports all read from here.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRegistry {
    parameters: Vec<ScoringParameter>,
}

impl ParameterRegistry {
    /// The ten-parameter collections-call rubric.
    pub fn standard() -> Self {
        Self {
            parameters: STANDARD_RUBRIC.to_vec(),
        }
    }

    /// Weights must be positive; a zero maximum has no meaningful score.
    pub fn new(parameters: Vec<ScoringParameter>) -> Self {
        debug_assert!(
            parameters.iter().all(|p| p.weight > 0),
            "scoring parameter weights must be positive"
        );
        Self { parameters }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoringParameter> {
        self.parameters.iter()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn lookup(&self, id: &str) -> Result<&ScoringParameter, RubricError> {
        self.parameters
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| RubricError::UnknownParameter(id.to_string()))
    }

    /// Sum of all weights: the denominator for every percentage.
    pub fn total_weight(&self) -> u32 {
        self.parameters.iter().map(|p| p.weight).sum()
    }
}

impl Default for ParameterRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::domain::scoring_parameter::Discipline;
    use std::collections::HashSet;

    #[test]
    fn test_standard_rubric_has_ten_parameters_in_order() {
        let registry = ParameterRegistry::standard();
        let ids: Vec<&str> = registry.iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec![
                "greeting",
                "collectionUrgency",
                "rebuttalCustomerHandling",
                "callEtiquette",
                "callDisclaimer",
                "correctDisposition",
                "callClosing",
                "fatalIdentification",
                "fatalTapeDiscloser",
                "fatalToneLanguage",
            ]
        );
    }

    #[test]
    fn test_total_weight_is_fixed() {
        assert_eq!(ParameterRegistry::standard().total_weight(), 100);
    }

    #[test]
    fn test_ids_are_unique() {
        let registry = ParameterRegistry::standard();
        let unique: HashSet<&str> = registry.iter().map(|p| p.id).collect();
        assert_eq!(unique.len(), registry.len());
    }

    #[test]
    fn test_lookup_known_parameter() {
        let registry = ParameterRegistry::standard();
        let p = registry.lookup(ids::CALL_ETIQUETTE).unwrap();
        assert_eq!(p.weight, 15);
        assert_eq!(p.discipline, Discipline::Graduated);
    }

    #[test]
    fn test_lookup_unknown_parameter_fails() {
        let registry = ParameterRegistry::standard();
        assert_eq!(
            registry.lookup("holdMusic"),
            Err(RubricError::UnknownParameter("holdMusic".to_string()))
        );
    }

    #[test]
    fn test_weights_are_positive() {
        assert!(ParameterRegistry::standard().iter().all(|p| p.weight > 0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "weights must be positive")]
    fn test_zero_weight_rejected() {
        ParameterRegistry::new(vec![ScoringParameter::pass_fail("holdMusic", 0, "")]);
    }
}
