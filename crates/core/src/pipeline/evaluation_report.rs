use crate::pipeline::evaluation_result::EvaluationResult;
use crate::rubric::domain::parameter_registry::ParameterRegistry;
use crate::rubric::domain::score_card::ScoreBand;

/// Plain-text rendering of a result. Maxima come from the registry, never
/// from the result.
pub fn render_text(result: &EvaluationResult, registry: &ParameterRegistry) -> String {
    let percentage = result.scores.percentage(registry);
    let mut lines = vec![format!(
        "Overall score: {}/{} ({:.0}%, {})",
        result.scores.total(),
        registry.total_weight(),
        percentage.round(),
        ScoreBand::from_percentage(percentage)
    )];

    lines.push(String::new());
    lines.push("Parameter scores:".to_string());
    for parameter in registry.iter() {
        let score = result.scores.get(parameter.id).unwrap_or(0);
        let pct = if parameter.weight == 0 {
            0.0
        } else {
            100.0 * score as f64 / parameter.weight as f64
        };
        lines.push(format!(
            "  {:28} {:>2}/{:<2} {:9} [{}]",
            parameter.display_name(),
            score,
            parameter.weight,
            parameter.discipline.to_string(),
            ScoreBand::from_percentage(pct)
        ));
    }

    lines.push(String::new());
    lines.push(format!("Feedback: {}", result.overall_feedback));
    lines.push(format!("Observation: {}", result.observation));

    if let Some(ref transcription) = result.transcription {
        lines.push(String::new());
        lines.push("Transcription:".to_string());
        lines.push(transcription.clone());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::domain::score_card::ScoreCard;

    fn result(scores: ScoreCard, transcription: Option<&str>) -> EvaluationResult {
        EvaluationResult {
            scores,
            overall_feedback: "fb".to_string(),
            observation: "obs".to_string(),
            transcription: transcription.map(str::to_string),
        }
    }

    #[test]
    fn test_report_lists_every_parameter_with_registry_maximum() {
        let registry = ParameterRegistry::standard();
        let r = result(ScoreCard::from_registry(&registry, |p| p.weight), None);
        let text = render_text(&r, &registry);
        assert!(text.starts_with("Overall score: 100/100 (100%, good)"));
        assert!(text.contains("Fatal Tone Language"));
        assert!(text.contains("15/15"));
        assert!(text.contains("Call Disclaimer"));
        assert!(!text.contains("Transcription:"));
    }

    #[test]
    fn test_report_includes_transcription() {
        let registry = ParameterRegistry::standard();
        let r = result(ScoreCard::zeroed(&registry), Some("Agent: hi"));
        let text = render_text(&r, &registry);
        assert!(text.contains("(0%, poor)"));
        assert!(text.ends_with("Transcription:\nAgent: hi"));
    }
}
