//! Heuristic tier classification.
//!
//! Upstream carries no tier information, so the tier is inferred from the
//! model id and display name. Pattern lists are hand-curated and checked in
//! order: any max pattern wins over any mini pattern, and models matching
//! neither list are `pro`. Models whose names don't follow these conventions
//! may be misclassified.

use crate::store::Tier;

/// Substrings identifying flagship models. Checked first.
pub const MAX_PATTERNS: &[&str] = &[
    "opus",
    "gpt-5",
    "gpt-4.5",
    "gpt-4o",
    "o1",
    "o3",
    "gemini-2.5-pro",
    "gemini-3-pro",
    "ultra",
    "grok-4",
    "deepseek-r1",
    "qwen3-max",
    "405b",
];

/// Substrings identifying small or cost-optimized variants.
pub const MINI_PATTERNS: &[&str] = &[
    "mini", "nano", "haiku", "flash", "lite", "small", "tiny", "micro", "8b", "7b", "3b", "1b",
];

/// Classify a model by id and display name. Never fails.
pub fn classify_tier(id: &str, name: &str) -> Tier {
    let id = id.to_lowercase();
    let name = name.to_lowercase();
    let matches = |pattern: &&str| id.contains(pattern) || name.contains(pattern);

    if MAX_PATTERNS.iter().any(matches) {
        Tier::Max
    } else if MINI_PATTERNS.iter().any(matches) {
        Tier::Mini
    } else {
        Tier::Pro
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::opus("claude-opus-4-5", "Claude Opus 4.5", Tier::Max)]
    #[case::gpt5("gpt-5", "GPT-5", Tier::Max)]
    #[case::reasoning_series("o3-pro", "o3 Pro", Tier::Max)]
    #[case::haiku("claude-3-5-haiku-20241022", "Claude Haiku 3.5", Tier::Mini)]
    #[case::flash("gemini-2.0-flash", "Gemini 2.0 Flash", Tier::Mini)]
    #[case::small_weights("llama-3.1-8b-instant", "Llama 3.1 8B", Tier::Mini)]
    #[case::sonnet("claude-sonnet-4-5", "Claude Sonnet 4.5", Tier::Pro)]
    #[case::unknown("some-model", "Some Model", Tier::Pro)]
    fn test_classify_tier(#[case] id: &str, #[case] name: &str, #[case] expected: Tier) {
        assert_eq!(classify_tier(id, name), expected);
    }

    #[test]
    fn test_max_patterns_checked_before_mini() {
        // "gpt-4o" is a max pattern and "mini" a mini pattern; max wins.
        assert!(MAX_PATTERNS.contains(&"gpt-4o"));
        assert!(MINI_PATTERNS.contains(&"mini"));
        assert_eq!(classify_tier("gpt-4o-mini", "GPT-4o mini"), Tier::Max);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify_tier("CLAUDE-OPUS-4", "x"), Tier::Max);
        assert_eq!(classify_tier("x", "Gemini Flash Lite"), Tier::Mini);
    }

    #[test]
    fn test_name_alone_can_match() {
        assert_eq!(classify_tier("model-123", "Mistral Small"), Tier::Mini);
    }

    #[test]
    fn test_empty_inputs_default_to_pro() {
        assert_eq!(classify_tier("", ""), Tier::Pro);
    }
}
