//! Console output formatter for answers

use crate::api::AnswerBody;
use colored::{ColoredString, Colorize};
use sma_domain::{Answer, ConfidenceLevel};

/// Formats answers for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Answer text followed by a colored confidence line
    pub fn format(answer: &Answer) -> String {
        let mut output = String::new();
        output.push_str(answer.text());
        output.push_str("\n\n");
        output.push_str(&format!(
            "{} {} ({}) {}\n",
            "Confidence:".cyan().bold(),
            Self::tier(answer.confidence_level()),
            format!("{:.2}", answer.confidence().value()).bold(),
            format!("in {} ms", answer.response_time_ms()).dimmed()
        ));
        output
    }

    /// Format as JSON
    pub fn format_json(answer: &Answer) -> String {
        serde_json::to_string_pretty(&AnswerBody::from(answer)).unwrap_or_else(|_| "{}".to_string())
    }

    fn tier(level: ConfidenceLevel) -> ColoredString {
        let label = level.as_str().replace('_', " ");
        match level {
            ConfidenceLevel::VeryHigh | ConfidenceLevel::High => label.green().bold(),
            ConfidenceLevel::Medium => label.yellow().bold(),
            ConfidenceLevel::Low | ConfidenceLevel::VeryLow => label.red().bold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sma_domain::{AnswerOrigin, Confidence, Extraction};
    use std::time::Duration;

    fn answer(confidence: f64) -> Answer {
        Answer::new(
            "SMA is a genetic disorder.",
            Confidence::new(confidence).unwrap(),
            Duration::from_millis(420),
            AnswerOrigin::Model(Extraction::Trusted),
        )
    }

    #[test]
    fn test_format_includes_text_and_tier() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format(&answer(0.95));
        assert!(output.starts_with("SMA is a genetic disorder."));
        assert!(output.contains("Confidence: very high (0.95) in 420 ms"));
    }

    #[test]
    fn test_format_json_matches_http_body() {
        let json = ConsoleFormatter::format_json(&answer(0.55));
        let body: AnswerBody = serde_json::from_str(&json).unwrap();
        assert_eq!(body.answer, "SMA is a genetic disorder.");
        assert_eq!(body.confidence, 0.55);
        assert_eq!(body.confidence_level, "medium");
        assert_eq!(body.response_time_ms, 420);
    }
}
