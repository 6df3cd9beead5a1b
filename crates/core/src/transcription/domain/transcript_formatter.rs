use super::utterance::Utterance;

pub const AGENT_LABEL: &str = "Agent";
pub const CUSTOMER_LABEL: &str = "Customer";

/// Utterances at or below this confidence are dropped.
pub const MIN_UTTERANCE_CONFIDENCE: f32 = 0.3;
/// Utterances whose trimmed text is shorter than this (in characters) are dropped.
pub const MIN_UTTERANCE_CHARS: usize = 3;

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?', '।'];

/// Turns recognizer output into a speaker-labelled text block.
pub struct TranscriptFormatter;

impl TranscriptFormatter {
    /// Diarized formatting when utterances are available, sentence alternation
    /// otherwise. Never returns less text than it was given: if diarized
    /// formatting keeps nothing, the raw transcript is formatted instead.
    pub fn format(raw_transcript: &str, utterances: &[Utterance]) -> String {
        if !utterances.is_empty() {
            let diarized = Self::format_diarized(utterances);
            if !diarized.is_empty() {
                return diarized;
            }
            log::debug!("All utterances filtered out; falling back to sentence alternation");
        }
        Self::format_plain(raw_transcript)
    }

    pub fn format_diarized(utterances: &[Utterance]) -> String {
        let mut out = String::new();
        let mut previous_speaker: Option<u32> = None;

        for u in utterances {
            let text = u.text.trim();
            if u.confidence <= MIN_UTTERANCE_CONFIDENCE
                || text.chars().count() < MIN_UTTERANCE_CHARS
            {
                continue;
            }

            if previous_speaker == Some(u.speaker_id) {
                out.push(' ');
            } else {
                out.push_str("\n\n");
                out.push_str(speaker_label(u.speaker_id));
                out.push_str(": ");
            }
            out.push_str(text);
            previous_speaker = Some(u.speaker_id);
        }

        out.trim().to_string()
    }

    /// Splits on sentence terminators and alternates Agent/Customer by
    /// sentence index.
    pub fn format_plain(raw_transcript: &str) -> String {
        let formatted = raw_transcript
            .split(SENTENCE_TERMINATORS)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(i, sentence)| {
                let label = if i % 2 == 0 {
                    AGENT_LABEL
                } else {
                    CUSTOMER_LABEL
                };
                format!("{label}: {sentence}")
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        if formatted.is_empty() {
            raw_transcript.to_string()
        } else {
            formatted
        }
    }
}

fn speaker_label(speaker_id: u32) -> &'static str {
    if speaker_id == 0 {
        AGENT_LABEL
    } else {
        CUSTOMER_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utt(speaker: u32, text: &str, confidence: f32) -> Utterance {
        Utterance::new(speaker, text, confidence)
    }

    #[test]
    fn test_diarized_drops_low_confidence() {
        let utterances = vec![
            utt(0, "Hello", 0.9),
            utt(1, "Hi there", 0.8),
            utt(0, "Bye", 0.2),
        ];
        assert_eq!(
            TranscriptFormatter::format_diarized(&utterances),
            "Agent: Hello\n\nCustomer: Hi there"
        );
    }

    #[test]
    fn test_diarized_confidence_boundary_is_exclusive() {
        let utterances = vec![utt(0, "Hello", 0.3), utt(1, "Namaste", 0.31)];
        assert_eq!(
            TranscriptFormatter::format_diarized(&utterances),
            "Customer: Namaste"
        );
    }

    #[test]
    fn test_diarized_drops_short_text() {
        let utterances = vec![utt(0, "  ok ", 0.9), utt(0, "Good morning", 0.9)];
        assert_eq!(
            TranscriptFormatter::format_diarized(&utterances),
            "Agent: Good morning"
        );
    }

    #[test]
    fn test_diarized_counts_characters_not_bytes() {
        // Three Devanagari characters, nine bytes.
        let utterances = vec![utt(1, "हाँ", 0.9), utt(1, "जी", 0.9)];
        assert_eq!(
            TranscriptFormatter::format_diarized(&utterances),
            "Customer: हाँ"
        );
    }

    #[test]
    fn test_diarized_same_speaker_continues_line() {
        let utterances = vec![
            utt(0, "Good morning", 0.9),
            utt(0, "this is collections", 0.9),
            utt(1, "Yes tell me", 0.9),
            utt(0, "Your payment is due", 0.9),
        ];
        assert_eq!(
            TranscriptFormatter::format_diarized(&utterances),
            "Agent: Good morning this is collections\n\nCustomer: Yes tell me\n\nAgent: Your payment is due"
        );
    }

    #[test]
    fn test_diarized_any_nonzero_speaker_is_customer() {
        let utterances = vec![utt(2, "Who is this", 0.9)];
        assert_eq!(
            TranscriptFormatter::format_diarized(&utterances),
            "Customer: Who is this"
        );
    }

    #[test]
    fn test_plain_alternates_on_devanagari_danda() {
        assert_eq!(
            TranscriptFormatter::format_plain("नमस्ते। कैसे हैं आप?"),
            "Agent: नमस्ते\n\nCustomer: कैसे हैं आप"
        );
    }

    #[test]
    fn test_plain_skips_empty_fragments() {
        assert_eq!(
            TranscriptFormatter::format_plain("Hello... Is this Ravi?! Yes."),
            "Agent: Hello\n\nCustomer: Is this Ravi\n\nAgent: Yes"
        );
    }

    #[test]
    fn test_plain_without_terminators_is_single_agent_line() {
        assert_eq!(
            TranscriptFormatter::format_plain("hello this is collections"),
            "Agent: hello this is collections"
        );
    }

    #[test]
    fn test_plain_falls_back_to_raw_text() {
        assert_eq!(TranscriptFormatter::format_plain(" ?. ! "), " ?. ! ");
        assert_eq!(TranscriptFormatter::format_plain(""), "");
    }

    #[test]
    fn test_format_uses_plain_when_all_utterances_dropped() {
        let utterances = vec![utt(0, "Bye", 0.1)];
        assert_eq!(
            TranscriptFormatter::format("Bye. See you.", &utterances),
            "Agent: Bye\n\nCustomer: See you"
        );
    }

    #[test]
    fn test_format_prefers_diarized() {
        let utterances = vec![utt(1, "Hi there", 0.8)];
        assert_eq!(
            TranscriptFormatter::format("Hi there.", &utterances),
            "Customer: Hi there"
        );
    }
}
