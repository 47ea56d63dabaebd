//! Email action-item extraction
//!
//! A pure, single-pass heuristic over pasted email text:
//! 1. Split into sentences on terminal punctuation
//! 2. Keep sentences that look actionable (keyword / date / time)
//! 3. Fall back to the leading sentences when nothing matched
//! 4. Cap the result at [`MAX_ACTION_ITEMS`]

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Read;
use std::path::Path;

use crate::core::model::{ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};

/// Maximum number of action items returned
pub const MAX_ACTION_ITEMS: usize = 5;

/// How many leading sentences the fallback path considers
const FALLBACK_SENTENCES: usize = 3;

/// Keywords that mark a sentence as actionable (case-insensitive substring match)
const ACTION_KEYWORDS: &[&str] = &[
    "please",
    "kindly",
    "required",
    "must",
    "should",
    "need to",
    "deadline",
    "submit",
    "register",
    "attend",
    "complete",
    "action",
    "urgent",
    "important",
    "reminder",
    "notice",
    "announcement",
];

/// Sentence boundary: one or more terminal punctuation marks
static SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("Invalid SPLIT_RE regex"));

/// Numeric dates (5/10/2025, 5-10-25) or month-name dates (Oct 12, january 3)
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b|\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{1,2}\b",
    )
    .expect("Invalid DATE_RE regex")
});

/// Clock times with optional am/pm suffix (10:30, 9:15 pm)
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\d{1,2}:\d{2}\s*(?:am|pm)?\b").expect("Invalid TIME_RE regex"));

/// Split raw text into trimmed, non-empty sentences in original order
pub fn split_sentences(text: &str) -> Vec<&str> {
    SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Pure predicate: does this sentence look like a task or deadline?
pub fn is_actionable(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    ACTION_KEYWORDS.iter().any(|kw| lower.contains(kw))
        || DATE_RE.is_match(sentence)
        || TIME_RE.is_match(sentence)
}

/// Collapse whitespace runs to single spaces, trim, append one period.
/// Idempotent: cleaning an already-clean sentence is a no-op modulo the
/// trailing period check below.
pub fn clean_sentence(sentence: &str) -> String {
    let collapsed = sentence.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{}.", collapsed.trim_end_matches('.'))
}

/// Extract up to [`MAX_ACTION_ITEMS`] action items from pasted email text.
///
/// Never fails: degenerate inputs (empty, whitespace, pure punctuation)
/// yield an empty list.
pub fn extract_action_items(text: &str) -> Vec<String> {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return Vec::new();
    }

    let mut items: Vec<String> = Vec::new();
    for sentence in &sentences {
        if is_actionable(sentence) {
            let cleaned = clean_sentence(sentence);
            let len = cleaned.chars().count();
            if len > 20 && len < 200 {
                items.push(cleaned);
            }
        }
    }

    // Fallback: lead sentences, with only the lower length bound
    if items.is_empty() {
        for sentence in sentences.iter().take(FALLBACK_SENTENCES) {
            let cleaned = clean_sentence(sentence);
            if cleaned.chars().count() > 20 {
                items.push(cleaned);
            }
        }
    }

    items.truncate(MAX_ACTION_ITEMS);
    items
}

/// Run the summarize command: read text from an argument, a file, or stdin
pub fn run_summarize(
    text: Option<&str>,
    file: Option<&Path>,
    config: RenderConfig,
) -> Result<()> {
    let input = match (text, file) {
        (Some(t), _) => t.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {:?}", path))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };

    let result_set: ResultSet = extract_action_items(&input)
        .into_iter()
        .map(ResultItem::action)
        .collect();

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_basic() {
        let sentences = split_sentences("One. Two! Three?");
        assert_eq!(sentences, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_split_sentences_repeated_punctuation() {
        let sentences = split_sentences("Wait... what?! Ok.");
        assert_eq!(sentences, vec!["Wait", "what", "Ok"]);
    }

    #[test]
    fn test_split_sentences_no_terminal_punctuation() {
        let sentences = split_sentences("  a single run-on sentence  ");
        assert_eq!(sentences, vec!["a single run-on sentence"]);
    }

    #[test]
    fn test_split_sentences_degenerate() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \t\n ").is_empty());
        assert!(split_sentences("...!!!???").is_empty());
    }

    #[test]
    fn test_is_actionable_keywords() {
        assert!(is_actionable("Please review the attached file"));
        assert!(is_actionable("REGISTRATION IS REQUIRED for all students"));
        assert!(is_actionable("you need to bring your id card"));
        assert!(!is_actionable("Hello there, how are you"));
    }

    #[test]
    fn test_is_actionable_dates() {
        assert!(is_actionable("The event is on 5/10/2025"));
        assert!(is_actionable("rescheduled to 12-1-24"));
        assert!(is_actionable("See you on Oct 12"));
        assert!(is_actionable("starting january 3 in the main hall"));
        assert!(!is_actionable("room 101 on the third floor"));
    }

    #[test]
    fn test_is_actionable_times() {
        assert!(is_actionable("doors open at 10:30"));
        assert!(is_actionable("lunch at 12:15 pm sharp"));
        assert!(is_actionable("9:05am in the lab"));
        assert!(!is_actionable("the score was 10 to 2"));
    }

    #[test]
    fn test_clean_sentence_collapses_whitespace() {
        assert_eq!(
            clean_sentence("too   much \t whitespace\nhere"),
            "too much whitespace here."
        );
    }

    #[test]
    fn test_clean_sentence_idempotent() {
        let once = clean_sentence("  do the   thing ");
        let twice = clean_sentence(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "do the thing.");
    }

    #[test]
    fn test_extract_empty_and_whitespace() {
        assert!(extract_action_items("").is_empty());
        assert!(extract_action_items("   \n\t  ").is_empty());
    }

    #[test]
    fn test_extract_scenario_keyword_and_date() {
        let input = "Please submit the form by 5/10/2025. Thanks for your attention. Have a nice day.";
        let items = extract_action_items(input);
        assert_eq!(items, vec!["Please submit the form by 5/10/2025."]);
    }

    #[test]
    fn test_extract_scenario_fallback_all_short() {
        // No keywords, dates or times, and every sentence cleans to <= 20 chars
        let input = "Hello there. How are you. Good weather today";
        assert!(extract_action_items(input).is_empty());
    }

    #[test]
    fn test_extract_scenario_fallback_keeps_long_lead() {
        let input = "We had a wonderful picnic out by the lake yesterday afternoon. It was fun. Bye";
        let items = extract_action_items(input);
        assert_eq!(
            items,
            vec!["We had a wonderful picnic out by the lake yesterday afternoon."]
        );
    }

    #[test]
    fn test_extract_scenario_single_long_actionable() {
        let input = "Deadline is 10:30am tomorrow for the urgent submission of your final project report for review";
        let items = extract_action_items(input);
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0],
            "Deadline is 10:30am tomorrow for the urgent submission of your final project report for review."
        );
    }

    #[test]
    fn test_extract_keeps_first_five_in_order() {
        // Eight independently actionable sentences within the length bounds
        let input = (1..=8)
            .map(|i| format!("Please complete assignment number {} this week", i))
            .collect::<Vec<_>>()
            .join(". ");
        let items = extract_action_items(&input);
        assert_eq!(items.len(), 5);
        for (idx, item) in items.iter().enumerate() {
            assert!(
                item.contains(&format!("number {}", idx + 1)),
                "expected sentence {} in slot {}, got {:?}",
                idx + 1,
                idx,
                item
            );
        }
    }

    #[test]
    fn test_extract_drops_too_long_actionable() {
        // Actionable but cleaned length >= 200: excluded, fallback then applies
        let long = format!("Please {}", "x".repeat(250));
        let items = extract_action_items(&long);
        // Fallback has no upper bound, so the sentence comes back through it
        assert_eq!(items.len(), 1);
        assert!(items[0].starts_with("Please"));
    }

    #[test]
    fn test_extract_output_invariants() {
        let inputs = [
            "",
            "short",
            "Please submit the form by 5/10/2025. Thanks.",
            "a!!b??c..d",
            "Register   for the\t\tworkshop before friday please",
        ];
        for input in inputs {
            let items = extract_action_items(input);
            assert!(items.len() <= MAX_ACTION_ITEMS);
            for item in items {
                assert!(item.ends_with('.'));
                assert!(!item.ends_with(".."));
                assert!(!item.contains("  "));
                assert!(!item.contains('\t'));
                assert!(!item.contains('\n'));
            }
        }
    }

    #[test]
    fn test_extract_length_bounds_exclusive() {
        // Cleaned to exactly 21 chars including the period: kept (> 20)
        let s21 = "please do send more x"; // 21 chars with period after cleanup
        assert_eq!(clean_sentence(s21).chars().count(), 22);
        let items = extract_action_items(s21);
        assert_eq!(items.len(), 1);

        // Cleaned to exactly 20 chars: dropped by both paths
        let short = "please send it to x"; // 19 chars + period = 20
        assert_eq!(clean_sentence(short).chars().count(), 20);
        assert!(extract_action_items(short).is_empty());
    }
}
