use crate::rubric::domain::parameter_registry::{ids, ParameterRegistry};
use crate::rubric::domain::score_card::ScoreCard;

const TIER_EXCELLENT: &str =
    "उत्कृष्ट प्रदर्शन! एजेंट ने मजबूत पेशेवर कौशल का प्रदर्शन किया और सकारात्मक परिणाम प्राप्त किया।";
const TIER_GOOD: &str = "अच्छा प्रदर्शन लेकिन सुधार की गुंजाइश है। एजेंट ने कॉल को पेशेवर तरीके से संभाला लेकिन कुछ क्षेत्रों को बेहतर बनाया जा सकता है।";
const TIER_AVERAGE: &str = "औसत प्रदर्शन। एजेंट ने कुछ बुनियादी मानकों का पालन किया लेकिन कई महत्वपूर्ण क्षेत्रों में सुधार आवश्यक है।";
const TIER_POOR: &str = "प्रदर्शन में सुधार की आवश्यकता है। एजेंट को बेहतर संचार और समाधान कौशल विकसित करने पर ध्यान देना चाहिए।";

/// When a corrective sentence is appended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    /// Score is exactly 0.
    Zero,
    /// Score is strictly below the cutoff.
    Below(u32),
}

impl Gate {
    fn triggered_by(self, score: u32) -> bool {
        match self {
            Gate::Zero => score == 0,
            Gate::Below(cutoff) => score < cutoff,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectiveRule {
    pub parameter_id: &'static str,
    pub gate: Gate,
    pub sentence: &'static str,
}

/// Corrective sentences in the order they appear in feedback.
pub const CORRECTIVE_CHECKLIST: &[CorrectiveRule] = &[
    CorrectiveRule {
        parameter_id: ids::GREETING,
        gate: Gate::Zero,
        sentence: "उचित अभिवादन और परिचय में सुधार करें।",
    },
    CorrectiveRule {
        parameter_id: ids::FATAL_IDENTIFICATION,
        gate: Gate::Zero,
        sentence: "कॉल की शुरुआत में अपनी और ग्राहक की पहचान की पुष्टि करें।",
    },
    CorrectiveRule {
        parameter_id: ids::FATAL_TAPE_DISCLOSER,
        gate: Gate::Zero,
        sentence: "कॉल रिकॉर्डिंग के बारे में ग्राहक को सूचित करना आवश्यक है।",
    },
    CorrectiveRule {
        parameter_id: ids::FATAL_TONE_LANGUAGE,
        gate: Gate::Zero,
        sentence: "कॉल के दौरान अपमानजनक या धमकी भरी भाषा का प्रयोग बिल्कुल न करें।",
    },
    CorrectiveRule {
        parameter_id: ids::CALL_ETIQUETTE,
        gate: Gate::Below(8),
        sentence: "ग्राहक की स्थिति के प्रति अधिक सहानुभूति और समझ दिखाएं।",
    },
    CorrectiveRule {
        parameter_id: ids::COLLECTION_URGENCY,
        gate: Gate::Below(8),
        sentence: "भुगतान की तात्कालिकता को अधिक प्रभावी रूप से संप्रेषित करें।",
    },
    CorrectiveRule {
        parameter_id: ids::REBUTTAL_CUSTOMER_HANDLING,
        gate: Gate::Below(8),
        sentence: "ग्राहक की आपत्तियों और चिंताओं का समाधान अधिक प्रभावी ढंग से करें।",
    },
    CorrectiveRule {
        parameter_id: ids::CORRECT_DISPOSITION,
        gate: Gate::Zero,
        sentence: "कॉल को सही श्रेणी और टिप्पणी के साथ दर्ज करें।",
    },
    CorrectiveRule {
        parameter_id: ids::CALL_DISCLAIMER,
        gate: Gate::Zero,
        sentence: "कॉल समाप्त करने से पहले ग्राहक से अनुमति लें।",
    },
    CorrectiveRule {
        parameter_id: ids::CALL_CLOSING,
        gate: Gate::Zero,
        sentence: "कॉल के अंत में ग्राहक को उचित रूप से धन्यवाद दें।",
    },
];

pub struct FeedbackSynthesizer;

impl FeedbackSynthesizer {
    pub fn opening_for(percentage: f64) -> &'static str {
        if percentage >= 80.0 {
            TIER_EXCELLENT
        } else if percentage >= 60.0 {
            TIER_GOOD
        } else if percentage >= 40.0 {
            TIER_AVERAGE
        } else {
            TIER_POOR
        }
    }

    /// Tiered opening by overall percentage, then one corrective sentence per
    /// triggered checklist entry. Parameters absent from the card are skipped.
    pub fn synthesize(scores: &ScoreCard, registry: &ParameterRegistry) -> String {
        let mut feedback = String::from(Self::opening_for(scores.percentage(registry)));

        for rule in CORRECTIVE_CHECKLIST {
            if let Some(score) = scores.get(rule.parameter_id) {
                if rule.gate.triggered_by(score) {
                    feedback.push(' ');
                    feedback.push_str(rule.sentence);
                }
            }
        }

        feedback.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn card_with(overrides: &[(&str, u32)]) -> (ScoreCard, ParameterRegistry) {
        let registry = ParameterRegistry::standard();
        let card = ScoreCard::from_registry(&registry, |p| {
            overrides
                .iter()
                .find(|(id, _)| *id == p.id)
                .map(|(_, s)| *s)
                .unwrap_or(p.weight)
        });
        (card, registry)
    }

    #[rstest]
    #[case(100.0, TIER_EXCELLENT)]
    #[case(80.0, TIER_EXCELLENT)]
    #[case(79.9, TIER_GOOD)]
    #[case(60.0, TIER_GOOD)]
    #[case(40.0, TIER_AVERAGE)]
    #[case(39.9, TIER_POOR)]
    #[case(0.0, TIER_POOR)]
    fn test_opening_tiers(#[case] pct: f64, #[case] expected: &str) {
        assert_eq!(FeedbackSynthesizer::opening_for(pct), expected);
    }

    #[test]
    fn test_full_marks_has_only_opening() {
        let (card, registry) = card_with(&[]);
        assert_eq!(FeedbackSynthesizer::synthesize(&card, &registry), TIER_EXCELLENT);
    }

    #[test]
    fn test_greeting_sentence_only_when_zero() {
        let (card, registry) = card_with(&[(ids::GREETING, 0)]);
        let fb = FeedbackSynthesizer::synthesize(&card, &registry);
        assert!(fb.contains("उचित अभिवादन"));
        assert!(fb.starts_with(TIER_EXCELLENT));
    }

    #[test]
    fn test_etiquette_cutoff_is_strict() {
        let (card, registry) = card_with(&[(ids::CALL_ETIQUETTE, 8)]);
        assert!(!FeedbackSynthesizer::synthesize(&card, &registry).contains("सहानुभूति"));
        let (card, registry) = card_with(&[(ids::CALL_ETIQUETTE, 7)]);
        assert!(FeedbackSynthesizer::synthesize(&card, &registry).contains("सहानुभूति"));
    }

    #[test]
    fn test_sentences_follow_checklist_order() {
        let registry = ParameterRegistry::standard();
        let card = ScoreCard::zeroed(&registry);
        let fb = FeedbackSynthesizer::synthesize(&card, &registry);
        assert!(fb.starts_with(TIER_POOR));
        let mut last = 0;
        for rule in CORRECTIVE_CHECKLIST {
            let pos = fb.find(rule.sentence).expect("every gate fires on zero scores");
            assert!(pos > last);
            last = pos;
        }
        assert_eq!(fb, fb.trim_end());
    }

    #[test]
    fn test_is_deterministic() {
        let (card, registry) = card_with(&[(ids::COLLECTION_URGENCY, 3), (ids::CALL_CLOSING, 0)]);
        assert_eq!(
            FeedbackSynthesizer::synthesize(&card, &registry),
            FeedbackSynthesizer::synthesize(&card, &registry)
        );
    }
}
