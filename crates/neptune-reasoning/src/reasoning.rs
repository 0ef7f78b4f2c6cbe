//! Structured reasoning: one low-temperature oracle call, decomposed into
//! discrete steps with a post-hoc confidence classification.

use std::sync::OnceLock;

use neptune_oracle::{CompletionClient, CompletionRequest};
use regex::Regex;

/// At most this many steps are extracted from the response.
const MAX_STEPS: usize = 5;
/// Length of the synthetic single step built from an unstructured response.
const FALLBACK_STEP_CHARS: usize = 200;

/// Phrases that mark a low-confidence answer. Checked before the high list:
/// hedging anywhere outweighs confident wording elsewhere.
const LOW_CONFIDENCE_PHRASES: &[&str] = &[
    "not sure",
    "uncertain",
    "unclear",
    "hard to say",
    "difficult to say",
    "cannot determine",
    "can't determine",
    "it depends",
    "insufficient data",
];

const HIGH_CONFIDENCE_PHRASES: &[&str] = &[
    "clearly",
    "definitely",
    "certainly",
    "without a doubt",
    "strong evidence",
    "confident",
];

const REASONING_SYSTEM_PROMPT: &str = "\
You are an analytical assistant. Break the question down and reason through \
it step by step. Present your reasoning as a numbered list of short steps \
(at most five), then state your conclusion.";

/// Post-hoc confidence classification of a reasoning response.
///
/// This is a keyword heuristic over the response text, not a model-reported
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// The outcome of one reasoning pass. Always usable: a failed or
/// unstructured oracle response degrades to a single synthetic step.
#[derive(Debug, Clone)]
pub struct ReasoningOutcome {
    pub steps: Vec<String>,
    pub confidence: Confidence,
}

/// Run the structured reasoning pass for a complex question.
///
/// Never fails: oracle trouble yields a deterministic single-step outcome
/// with low confidence.
pub async fn perform_reasoning(
    client: &dyn CompletionClient,
    question: &str,
    context: &str,
) -> ReasoningOutcome {
    let user_prompt = if context.is_empty() {
        question.to_string()
    } else {
        format!("Context:\n{context}\n\nQuestion: {question}")
    };

    let request = CompletionRequest::new(REASONING_SYSTEM_PROMPT, user_prompt).temperature(0.2);

    match client.complete(&request).await {
        Ok(text) => ReasoningOutcome {
            steps: parse_steps(&text),
            confidence: classify_confidence(&text),
        },
        Err(e) => {
            tracing::warn!(error = %e, "reasoning oracle call failed");
            ReasoningOutcome {
                steps: vec!["Could not produce a step-by-step analysis for this question.".to_string()],
                confidence: Confidence::Low,
            }
        }
    }
}

fn step_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:\d+[.)]|[-*•])\s+(.+)$").expect("step pattern is valid")
    })
}

/// Extract numbered-list or bullet steps, capped at [`MAX_STEPS`]. A response
/// with no recognizable structure becomes a single truncated step.
fn parse_steps(text: &str) -> Vec<String> {
    let steps: Vec<String> = step_pattern()
        .captures_iter(text)
        .take(MAX_STEPS)
        .map(|capture| capture[1].trim().to_string())
        .collect();

    if steps.is_empty() {
        let truncated: String = text.trim().chars().take(FALLBACK_STEP_CHARS).collect();
        return vec![truncated];
    }
    steps
}

/// Keyword-based confidence classification; low phrases take precedence,
/// default is medium.
fn classify_confidence(text: &str) -> Confidence {
    let lower = text.to_lowercase();
    if LOW_CONFIDENCE_PHRASES.iter().any(|p| lower.contains(p)) {
        return Confidence::Low;
    }
    if HIGH_CONFIDENCE_PHRASES.iter().any(|p| lower.contains(p)) {
        return Confidence::High;
    }
    Confidence::Medium
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use neptune_oracle::OracleError;

    use super::*;

    struct CannedClient(&'static str);

    #[async_trait]
    impl CompletionClient for CannedClient {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, OracleError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, OracleError> {
            Err(OracleError::EmptyResponse)
        }
    }

    #[test]
    fn numbered_steps_are_extracted() {
        let text = "Here is my reasoning:\n1. Segment churned users by plan.\n2) Check cancellation timing.\n3. Correlate with the pricing change.";
        let steps = parse_steps(text);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], "Segment churned users by plan.");
        assert_eq!(steps[1], "Check cancellation timing.");
    }

    #[test]
    fn bulleted_steps_are_extracted() {
        let text = "- first look at the funnel\n* then the cohort data\n• finally the exit surveys";
        let steps = parse_steps(text);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2], "finally the exit surveys");
    }

    #[test]
    fn steps_are_capped_at_five() {
        let text = (1..=8)
            .map(|i| format!("{i}. step number {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(parse_steps(&text).len(), MAX_STEPS);
    }

    #[test]
    fn unstructured_response_becomes_single_truncated_step() {
        let text = "x".repeat(500);
        let steps = parse_steps(&text);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].chars().count(), FALLBACK_STEP_CHARS);
    }

    #[test]
    fn low_confidence_phrases_win_over_high() {
        let text = "The data clearly points one way, but I am not sure it holds next quarter.";
        assert_eq!(classify_confidence(text), Confidence::Low);
    }

    #[test]
    fn high_confidence_is_detected() {
        assert_eq!(
            classify_confidence("The pricing change is definitely the driver."),
            Confidence::High
        );
    }

    #[test]
    fn default_confidence_is_medium() {
        assert_eq!(
            classify_confidence("Churn moved with the pricing change."),
            Confidence::Medium
        );
    }

    #[tokio::test]
    async fn reasoning_parses_oracle_steps() {
        let client = CannedClient("1. Check the funnel.\n2. It depends on the cohort.");
        let outcome = perform_reasoning(&client, "why did churn rise", "").await;
        assert_eq!(outcome.steps.len(), 2);
        assert_eq!(outcome.confidence, Confidence::Low);
    }

    #[tokio::test]
    async fn oracle_failure_degrades_to_single_low_step() {
        let outcome = perform_reasoning(&FailingClient, "why did churn rise", "ctx").await;
        assert_eq!(outcome.steps.len(), 1);
        assert_eq!(outcome.confidence, Confidence::Low);
    }
}
