use serde::ser::{Serialize, SerializeMap, Serializer};

use super::parameter_registry::ParameterRegistry;
use super::scoring_parameter::ScoringParameter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterScore {
    pub id: &'static str,
    pub score: u32,
}

/// Coarse rating of a score relative to its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Okay,
    Poor,
}

impl ScoreBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            ScoreBand::Good
        } else if percentage >= 60.0 {
            ScoreBand::Okay
        } else {
            ScoreBand::Poor
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreBand::Good => write!(f, "good"),
            ScoreBand::Okay => write!(f, "okay"),
            ScoreBand::Poor => write!(f, "poor"),
        }
    }
}

/// Validated scores, one entry per rubric parameter in rubric order.
///
/// Only constructible from a registry, so every parameter appears exactly once.
/// Serializes as a JSON object keyed by parameter id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCard {
    entries: Vec<ParameterScore>,
}

impl ScoreCard {
    pub fn from_registry<F>(registry: &ParameterRegistry, mut score_of: F) -> Self
    where
        F: FnMut(&ScoringParameter) -> u32,
    {
        let entries = registry
            .iter()
            .map(|p| ParameterScore {
                id: p.id,
                score: score_of(p),
            })
            .collect();
        Self { entries }
    }

    pub fn zeroed(registry: &ParameterRegistry) -> Self {
        Self::from_registry(registry, |_| 0)
    }

    pub fn entries(&self) -> &[ParameterScore] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.score)
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.score).sum()
    }

    /// `100 * total / registry.total_weight()`.
    pub fn percentage(&self, registry: &ParameterRegistry) -> f64 {
        let denominator = registry.total_weight();
        if denominator == 0 {
            return 0.0;
        }
        100.0 * self.total() as f64 / denominator as f64
    }
}

impl Serialize for ScoreCard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.id, &entry.score)?;
        }
        map.end()
    }
}
