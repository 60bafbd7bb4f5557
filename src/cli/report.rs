//! Plain-text rendering of translation results

use std::fmt;

use crate::core::models::TranslationResult;

const RULE_WIDTH: usize = 38;

/// Token/probability table followed by the overall sequence probability
pub struct TokenTable<'a>(pub &'a TranslationResult);

impl fmt::Display for TokenTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(f, "--- Token Probabilities ---")?;
        writeln!(f, "{:<15} | {:<20}", "Token", "Probability")?;
        writeln!(f, "{}", rule)?;

        for entry in &self.0.token_probabilities {
            writeln!(
                f,
                "{:<15} | {:.4} ({:.2}%)",
                entry.token,
                entry.probability,
                entry.probability * 100.0
            )?;
        }

        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "Overall sequence probability: {:.6}",
            self.0.sequence_probability()
        )
    }
}

pub fn render_token_table(result: &TranslationResult) -> String {
    TokenTable(result).to_string()
}

/// Full report: translated text, then the token table
pub fn render_report(result: &TranslationResult, target_language: &str) -> String {
    format!(
        "Translated {} Text:\n\"{}\"\n\n{}",
        target_language,
        result.translation_text,
        TokenTable(result)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::TokenProbability;

    fn bonjour() -> TranslationResult {
        TranslationResult::new(
            "Bonjour",
            vec![
                TokenProbability::from_logprob("Bon", -0.1),
                TokenProbability::from_logprob("jour", -0.05),
            ],
        )
    }

    #[test]
    fn test_token_rows() {
        let table = render_token_table(&bonjour());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "--- Token Probabilities ---");
        assert_eq!(lines[1], "Token           | Probability         ");
        assert_eq!(lines[2], "-".repeat(38));
        assert_eq!(lines[3], "Bon             | 0.9048 (90.48%)");
        assert_eq!(lines[4], "jour            | 0.9512 (95.12%)");
        assert_eq!(lines[5], "-".repeat(38));
        assert_eq!(lines[6], "Overall sequence probability: 0.860708");
    }

    #[test]
    fn test_empty_result_reports_one() {
        let table = render_token_table(&TranslationResult::new("", vec![]));
        assert!(table.ends_with("Overall sequence probability: 1.000000\n"));
    }

    #[test]
    fn test_report_header() {
        let report = render_report(&bonjour(), "French");
        assert!(report.starts_with("Translated French Text:\n\"Bonjour\"\n\n"));
    }

    #[test]
    fn test_table_display_embeds_in_report() {
        let result = bonjour();
        let table = format!("{}", TokenTable(&result));
        assert_eq!(table, render_token_table(&result));
        assert!(render_report(&result, "French").ends_with(&table));
    }
}
