use super::parameter_registry::ParameterRegistry;
use super::scoring_parameter::{Discipline, ScoringParameter};

/// Clamps and quantizes raw extractor signals into the legal range of a
/// parameter's discipline.
pub struct ScoreValidator;

impl ScoreValidator {
    /// Validate a raw signal for the parameter with `id`.
    ///
    /// Unknown ids score 0 rather than failing.
    pub fn validate(registry: &ParameterRegistry, id: &str, raw_signal: f64) -> u32 {
        match registry.lookup(id) {
            Ok(parameter) => Self::validate_parameter(parameter, raw_signal),
            Err(e) => {
                log::debug!("{e}; scoring 0");
                0
            }
        }
    }

    pub fn validate_parameter(parameter: &ScoringParameter, raw_signal: f64) -> u32 {
        let weight = parameter.weight;
        match parameter.discipline {
            Discipline::PassFail => {
                if raw_signal >= weight as f64 {
                    weight
                } else {
                    0
                }
            }
            Discipline::Graduated => {
                // NaN compares false everywhere and ends up at 0.
                let rounded = raw_signal.round();
                if rounded.is_nan() || rounded <= 0.0 {
                    0
                } else if rounded >= weight as f64 {
                    weight
                } else {
                    rounded as u32
                }
            }
        }
    }
}
