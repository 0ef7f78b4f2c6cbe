//! Deterministic question-complexity heuristic.

/// Openings that mark a question as a simple lookup or command, whatever
/// else it contains. Checked first: a question matching both lists is
/// treated as simple.
const SIMPLE_PREFIXES: &[&str] = &[
    "what is",
    "what are",
    "what's",
    "show me",
    "list",
    "create",
    "add",
    "give me",
    "how many",
    "how much",
    "when is",
    "when did",
    "where",
];

/// Phrases anywhere in the question that signal multi-step analysis.
const COMPLEX_KEYWORDS: &[&str] = &[
    "why",
    "compare",
    "comparison",
    "trade-off",
    "tradeoff",
    "versus",
    " vs ",
    "forecast",
    "predict",
    "projection",
    "strategy",
    "should we",
    "should i",
    "analyze",
    "analysis",
    "root cause",
    "optimize",
    "what if",
];

/// Threshold for the length-plus-conjunction fallback heuristic.
const LONG_QUESTION_CHARS: usize = 100;

/// Decide whether a question warrants the structured reasoning pass.
///
/// Precedence, in order:
/// 1. a simple-lookup prefix wins immediately (returns `false`);
/// 2. a complex keyword anywhere returns `true`;
/// 3. otherwise, long questions (> 100 chars) chaining clauses with
///    " and " / " or " count as complex.
#[must_use]
pub fn is_complex_question(question: &str) -> bool {
    let normalized = question.trim().to_lowercase();

    if SIMPLE_PREFIXES
        .iter()
        .any(|prefix| normalized.starts_with(prefix))
    {
        return false;
    }

    if COMPLEX_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
    {
        return true;
    }

    normalized.chars().count() > LONG_QUESTION_CHARS
        && (normalized.contains(" and ") || normalized.contains(" or "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_lookup_is_not_complex() {
        assert!(!is_complex_question("What is our churn rate"));
        assert!(!is_complex_question("show me last month's signups"));
        assert!(!is_complex_question("List open deals"));
    }

    #[test]
    fn complex_keyword_is_complex() {
        assert!(is_complex_question(
            "Why is our churn rate increasing and what should we do about it"
        ));
        assert!(is_complex_question("Compare Q3 against Q4 revenue"));
        assert!(is_complex_question("Forecast signups for next quarter"));
    }

    #[test]
    fn simple_prefix_wins_over_complex_keyword() {
        // Contains "why" but opens with a lookup prefix.
        assert!(!is_complex_question("What is the reason why users leave"));
    }

    #[test]
    fn long_conjunction_question_is_complex() {
        let question = "Our trial-to-paid conversion dropped last month across both pricing tiers \
                        and I want to understand the relationship to onboarding changes";
        assert!(question.len() > 100);
        assert!(is_complex_question(question));
    }

    #[test]
    fn long_question_without_conjunction_is_simple() {
        let question = "Please summarize the overall performance of the entire marketing program \
                        during the most recent completed fiscal quarter period";
        assert!(!is_complex_question(question));
    }

    #[test]
    fn short_plain_question_is_simple() {
        assert!(!is_complex_question("Did the deploy finish"));
    }
}
