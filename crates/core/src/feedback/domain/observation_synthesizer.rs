use crate::scoring::domain::keyword_group::contains_any;

/// Emitted when no topic is recognized.
pub const GENERIC_OBSERVATION: &str =
    "मानक कलेक्शन कॉल जिसमें सामान्य ग्राहक इंटरैक्शन पैटर्न देखे गए।";

/// What a topic needs to be present in the text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TopicEvidence {
    AnyOf(&'static [&'static str]),
    AllOf(&'static [&'static str]),
}

impl TopicEvidence {
    fn found_in(self, text: &str) -> bool {
        match self {
            TopicEvidence::AnyOf(phrases) => contains_any(text, phrases),
            TopicEvidence::AllOf(phrases) => phrases.iter().all(|p| text.contains(p)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topic {
    pub evidence: TopicEvidence,
    pub sentence: &'static str,
}

pub const TOPICS: &[Topic] = &[
    // payment plan
    Topic {
        evidence: TopicEvidence::AnyOf(&["payment plan", "भुगतान योजना"]),
        sentence: "भुगतान योजना पर चर्चा की गई और सहमति बनी",
    },
    // cooperation
    Topic {
        evidence: TopicEvidence::AnyOf(&["cooperative", "सहयोग"]),
        sentence: "ग्राहक पूरी कॉल के दौरान सहयोगी रहा",
    },
    // concerns
    Topic {
        evidence: TopicEvidence::AnyOf(&["concern", "चिंता"]),
        sentence: "ग्राहक की चिंताओं को संबोधित किया गया",
    },
    // satisfaction
    Topic {
        evidence: TopicEvidence::AnyOf(&["satisfied", "संतुष्ट"]),
        sentence: "कॉल सकारात्मक नोट पर समाप्त हुई",
    },
    // both speakers labelled
    Topic {
        evidence: TopicEvidence::AllOf(&["agent:", "customer:"]),
        sentence: "स्पीकर डायराइज़ेशन उपलब्ध - एजेंट और ग्राहक की पहचान की गई",
    },
];

pub struct ObservationSynthesizer;

impl ObservationSynthesizer {
    pub fn synthesize(formatted_text: &str) -> String {
        let text = formatted_text.to_lowercase();
        let observations: Vec<&str> = TOPICS
            .iter()
            .filter(|t| t.evidence.found_in(&text))
            .map(|t| t.sentence)
            .collect();

        if observations.is_empty() {
            GENERIC_OBSERVATION.to_string()
        } else {
            format!("{}.", observations.join(". "))
        }
    }
}
