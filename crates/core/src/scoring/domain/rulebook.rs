use serde::{Deserialize, Serialize};

use super::keyword_group::{contains_any, KeywordGroup, KeywordScanner};
use crate::rubric::domain::parameter_registry::ids;
use crate::rubric::domain::scoring_parameter::ScoringParameter;

/// Extra points once enough distinct groups have matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusTier {
    pub min_groups: usize,
    pub bonus: f64,
}

/// Heuristic knobs of the graduated extractors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    /// The highest tier whose `min_groups` is reached applies; tiers do not stack.
    pub bonus_tiers: Vec<BonusTier>,
    /// Subtracted from call etiquette once per confrontational phrase present.
    pub confrontation_penalty: f64,
    /// Starting etiquette score before any evidence.
    pub etiquette_base: f64,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            bonus_tiers: vec![
                BonusTier {
                    min_groups: 3,
                    bonus: 1.0,
                },
                BonusTier {
                    min_groups: 5,
                    bonus: 2.0,
                },
            ],
            confrontation_penalty: 3.0,
            etiquette_base: 5.0,
        }
    }
}

impl ScoringTuning {
    pub fn bonus_for(&self, matched_groups: usize) -> f64 {
        self.bonus_tiers
            .iter()
            .filter(|t| matched_groups >= t.min_groups)
            .max_by_key(|t| t.min_groups)
            .map(|t| t.bonus)
            .unwrap_or(0.0)
    }
}

/// Weighted evidence for a graduated parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct GraduatedRule {
    pub base: f64,
    pub groups: &'static [KeywordGroup],
    pub penalty_phrases: &'static [&'static str],
    pub penalty: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Full weight if any keyword appears, else 0.
    Presence(&'static [&'static str]),
    /// Full weight unless any keyword appears.
    Absence(&'static [&'static str]),
    Graduated(GraduatedRule),
}

/// How one rubric parameter's raw signal is extracted from text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRule {
    pub parameter_id: &'static str,
    pub kind: RuleKind,
}

// ─── Keyword tables (lower-case) ───

const GREETING: &[&str] = &[
    "नमस्ते",
    "नमस्कार",
    "सुप्रभात",
    "namaste",
    "good morning",
    "good afternoon",
    "good evening",
    "hello",
    "thank you for calling",
];

const DISCLAIMER: &[&str] = &[
    "permission",
    "अनुमति",
    "कुछ और",
    "anything else",
    "और कोई",
    "कोई और सवाल",
    "कुछ और मदद",
    "may i end",
];

const DISPOSITION: &[&str] = &[
    "payment plan",
    "भुगतान योजना",
    "resolved",
    "हल हो",
    "हल कर",
    "मामला हल",
    "agreement",
    "समझौता",
    "settlement",
    "निपटान",
    "promise to pay",
];

const CLOSING: &[&str] = &[
    "धन्यवाद",
    "शुक्रिया",
    "thank you",
    "आपका दिन शुभ हो",
    "have a great day",
    "have a nice day",
    "स्वागत",
    "welcome",
    "कॉल करने के लिए धन्यवाद",
];

// Bare pronouns like "मैं" are left out: either speaker says them.
const IDENTIFICATION: &[&str] = &[
    "मेरा नाम",
    "बोल रहा हूँ",
    "बोल रही हूँ",
    "this is",
    "my name is",
    "speaking",
    "बात कर रहे हैं",
    "से बात",
    "collections",
];

const TAPE_DISCLOSURE: &[&str] = &[
    "recording",
    "recorded",
    "tape",
    "monitor",
    "रिकॉर्ड",
    "रिकॉर्डिंग",
    "निगरानी",
];

const ABUSIVE: &[&str] = &[
    "stupid",
    "idiot",
    "damn",
    "threat",
    "shut up",
    "मूर्ख",
    "बेवकूफ",
    "गधा",
    "बदमाश",
    "चुप रहो",
];

const URGENCY_GROUPS: &[KeywordGroup] = &[
    KeywordGroup::new("outstanding", &["outstanding", "overdue", "बकाया"], 3.0),
    KeywordGroup::new("urgency", &["urgent", "immediately", "तुरंत", "जल्दी"], 4.0),
    KeywordGroup::new("payment", &["payment", "भुगतान"], 3.0),
    KeywordGroup::new("consequences", &["consequences", "legal action", "परिणाम"], 3.0),
    KeywordGroup::new("deadline", &["deadline", "due date", "समय सीमा"], 2.0),
    KeywordGroup::new(
        "cross-questioning",
        &["when can you", "why haven't", "कब तक", "क्यों नहीं"],
        2.0,
    ),
];

const REBUTTAL_GROUPS: &[KeywordGroup] = &[
    KeywordGroup::new("penalty", &["penalty", "late fee", "जुर्माना"], 4.0),
    KeywordGroup::new("objection", &["objection", "आपत्ति"], 3.0),
    KeywordGroup::new("concern", &["concern", "worried", "चिंता"], 3.0),
    KeywordGroup::new("solution", &["solution", "option", "समाधान"], 3.0),
    KeywordGroup::new("address", &["address", "explain", "संबोधित"], 2.0),
    KeywordGroup::new(
        "reassurance",
        &["don't worry", "we can help", "चिंता मत"],
        2.0,
    ),
];

const ETIQUETTE_GROUPS: &[KeywordGroup] = &[
    KeywordGroup::new("please", &["please", "कृपया"], 2.0),
    KeywordGroup::new("understanding", &["understand", "समझ"], 2.0),
    KeywordGroup::new("help", &["help", "मदद"], 2.0),
    KeywordGroup::new("appreciation", &["appreciate", "सराहना"], 2.0),
    KeywordGroup::new("apology", &["sorry", "माफ करें", "क्षमा"], 2.0),
    KeywordGroup::new("respectful address", &["sir", "madam", "जी"], 1.0),
];

const CONFRONTATIONAL: &[&str] = &["you must", "but you", "आपको करना ही होगा", "लेकिन आप"];

/// Declarative extraction rules, one per rubric parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Rulebook {
    rules: Vec<ExtractionRule>,
    tuning: ScoringTuning,
}

impl Rulebook {
    pub fn standard(tuning: ScoringTuning) -> Self {
        let rules = vec![
            rule(ids::GREETING, RuleKind::Presence(GREETING)),
            rule(ids::COLLECTION_URGENCY, graduated(0.0, URGENCY_GROUPS, &[], 0.0)),
            rule(
                ids::REBUTTAL_CUSTOMER_HANDLING,
                graduated(0.0, REBUTTAL_GROUPS, &[], 0.0),
            ),
            rule(
                ids::CALL_ETIQUETTE,
                graduated(
                    tuning.etiquette_base,
                    ETIQUETTE_GROUPS,
                    CONFRONTATIONAL,
                    tuning.confrontation_penalty,
                ),
            ),
            rule(ids::CALL_DISCLAIMER, RuleKind::Presence(DISCLAIMER)),
            rule(ids::CORRECT_DISPOSITION, RuleKind::Presence(DISPOSITION)),
            rule(ids::CALL_CLOSING, RuleKind::Presence(CLOSING)),
            rule(ids::FATAL_IDENTIFICATION, RuleKind::Presence(IDENTIFICATION)),
            rule(ids::FATAL_TAPE_DISCLOSER, RuleKind::Presence(TAPE_DISCLOSURE)),
            rule(ids::FATAL_TONE_LANGUAGE, RuleKind::Absence(ABUSIVE)),
        ];

        Self { rules, tuning }
    }

    pub fn new(rules: Vec<ExtractionRule>, tuning: ScoringTuning) -> Self {
        Self { rules, tuning }
    }

    pub fn rule_for(&self, parameter_id: &str) -> Option<&ExtractionRule> {
        self.rules.iter().find(|r| r.parameter_id == parameter_id)
    }

    /// Raw, unclamped signal of `rule` over lower-cased `text`. Weights come
    /// from `parameter`, never from the rule.
    pub fn extract(&self, rule: &ExtractionRule, text: &str, parameter: &ScoringParameter) -> f64 {
        let full = parameter.weight as f64;
        match &rule.kind {
            RuleKind::Presence(keywords) => {
                if contains_any(text, keywords) {
                    full
                } else {
                    0.0
                }
            }
            RuleKind::Absence(keywords) => {
                if contains_any(text, keywords) {
                    0.0
                } else {
                    full
                }
            }
            RuleKind::Graduated(g) => {
                let scan = KeywordScanner::scan(text, g.groups);
                let penalties = KeywordScanner::count_present(text, g.penalty_phrases) as f64;
                g.base + scan.points + self.tuning.bonus_for(scan.matched_groups)
                    - penalties * g.penalty
            }
        }
    }
}

impl Default for Rulebook {
    fn default() -> Self {
        Self::standard(ScoringTuning::default())
    }
}

fn rule(parameter_id: &'static str, kind: RuleKind) -> ExtractionRule {
    ExtractionRule { parameter_id, kind }
}

fn graduated(
    base: f64,
    groups: &'static [KeywordGroup],
    penalty_phrases: &'static [&'static str],
    penalty: f64,
) -> RuleKind {
    RuleKind::Graduated(GraduatedRule {
        base,
        groups,
        penalty_phrases,
        penalty,
    })
}
