use serde::Serialize;

/// How a parameter's raw signal is turned into a legal score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Discipline {
    /// Either 0 or the full weight, no partial credit.
    PassFail,
    /// Any integer in `[0, weight]`.
    Graduated,
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Discipline::PassFail => write!(f, "pass/fail"),
            Discipline::Graduated => write!(f, "graduated"),
        }
    }
}

/// One category of the call-quality rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoringParameter {
    pub id: &'static str,
    pub discipline: Discipline,
    pub weight: u32,
    pub description: &'static str,
}

impl ScoringParameter {
    pub const fn pass_fail(id: &'static str, weight: u32, description: &'static str) -> Self {
        Self {
            id,
            discipline: Discipline::PassFail,
            weight,
            description,
        }
    }

    pub const fn graduated(id: &'static str, weight: u32, description: &'static str) -> Self {
        Self {
            id,
            discipline: Discipline::Graduated,
            weight,
            description,
        }
    }

    pub fn is_pass_fail(&self) -> bool {
        self.discipline == Discipline::PassFail
    }

    /// Human-readable name derived from the camelCase id ("callEtiquette" -> "Call Etiquette").
    pub fn display_name(&self) -> String {
        let mut name = String::with_capacity(self.id.len() + 4);
        for (i, c) in self.id.chars().enumerate() {
            if i == 0 {
                name.extend(c.to_uppercase());
            } else if c.is_uppercase() {
                name.push(' ');
                name.push(c);
            } else {
                name.push(c);
            }
        }
        name
    }
}
