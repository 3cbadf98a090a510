//! Word lists and text predicates shared by the built-in analyzers.

pub const VAGUE_VERBS: &[&str] = &[
    "improved",
    "enhanced",
    "helped",
    "worked on",
    "assisted",
    "supported",
    "participated",
    "involved",
];

pub const VAGUE_SCALE_WORDS: &[&str] = &[
    "significant",
    "major",
    "large",
    "huge",
    "massive",
    "substantial",
    "considerable",
    "great",
    "many",
    "numerous",
    "various",
    "several",
];

/// Openers that describe duties instead of outcomes.
pub const WEAK_OPENERS: &[&str] = &[
    "responsible for",
    "duties included",
    "tasked with",
    "in charge of",
    "worked on",
    "helped",
    "assisted",
    "participated in",
    "involved in",
];

pub const STRONG_VERBS: &[&str] = &[
    "achieved", "architected", "automated", "built", "championed", "created", "cut",
    "delivered", "designed", "developed", "drove", "eliminated", "engineered", "established",
    "expanded", "grew", "implemented", "increased", "launched", "led", "managed", "mentored",
    "migrated", "negotiated", "optimized", "orchestrated", "owned", "pioneered", "reduced",
    "redesigned", "resolved", "saved", "scaled", "shipped", "spearheaded", "streamlined",
    "trained", "transformed",
];

pub const BUZZWORDS: &[&str] = &[
    "synergy",
    "go-getter",
    "team player",
    "hard-working",
    "hardworking",
    "detail-oriented",
    "self-starter",
    "think outside the box",
    "results-driven",
    "dynamic",
    "passionate",
    "rockstar",
    "ninja",
    "guru",
    "best of breed",
    "proactive",
];

/// Suggested replacements for verbs that tend to get repeated.
pub const VERB_ALTERNATIVES: &[(&str, &[&str])] = &[
    ("led", &["directed", "headed", "steered"]),
    ("managed", &["oversaw", "coordinated", "ran"]),
    ("built", &["engineered", "assembled", "developed"]),
    ("developed", &["engineered", "authored", "produced"]),
    ("created", &["established", "founded", "introduced"]),
    ("worked", &["collaborated", "partnered", "contributed"]),
    ("improved", &["boosted", "strengthened", "accelerated"]),
    ("designed", &["architected", "modeled", "planned"]),
];

/// Outcome-bearing text: a number, an estimate, a currency or percentage, or an
/// explicit `[LOW_METRICS]` marker.
pub fn is_quantified(text: &str) -> bool {
    let has_digit = text.chars().any(|c| c.is_ascii_digit());
    let has_low_metrics = text.contains("[LOW_METRICS]");
    let has_percent = text.contains('%');
    let has_currency = text.contains('$') || text.contains('€') || text.contains('£');
    has_digit || has_low_metrics || has_percent || has_currency
}

/// Lowercased first word with trailing punctuation removed.
pub fn leading_word(text: &str) -> Option<String> {
    let word = text
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    (!word.is_empty()).then_some(word)
}

/// Case-insensitive phrase search that only matches whole words.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    let haystack = text.to_lowercase();
    let needle = phrase.to_lowercase();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(&needle) {
        let start = from + pos;
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric() && c != '-');
        if before_ok && after_ok {
            return true;
        }
        from = start + needle.len().max(1);
    }
    false
}

/// First entry of `phrases` found in `text`.
pub fn first_match<'a>(text: &str, phrases: &[&'a str]) -> Option<&'a str> {
    phrases.iter().copied().find(|p| contains_phrase(text, p))
}

pub fn alternatives_for(verb: &str) -> Option<&'static [&'static str]> {
    VERB_ALTERNATIVES
        .iter()
        .find(|(v, _)| *v == verb)
        .map(|(_, alts)| *alts)
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantified_variants() {
        assert!(is_quantified("Reduced latency by 40% through caching"));
        assert!(is_quantified("Saved $50,000 annually"));
        assert!(is_quantified("Generated €200k in new revenue"));
        assert!(is_quantified("Improved system performance [LOW_METRICS]"));
        assert!(is_quantified("Trained 15 engineers"));
        assert!(!is_quantified("Improved the user experience"));
    }

    #[test]
    fn test_leading_word() {
        assert_eq!(leading_word("Led, the team"), Some("led".to_string()));
        assert_eq!(leading_word("   "), None);
    }

    #[test]
    fn test_contains_phrase_respects_word_boundaries() {
        assert!(contains_phrase("A true team player.", "team player"));
        assert!(contains_phrase("Dynamic engineer", "dynamic"));
        assert!(!contains_phrase("aerodynamics research", "dynamic"));
        assert!(!contains_phrase("manyfold", "many"));
        assert!(!contains_phrase("great-grandparent", "great"));
        assert!(contains_phrase("handled many, many tickets", "many"));
    }

    #[test]
    fn test_first_match_prefers_list_order() {
        assert_eq!(
            first_match("Helped and assisted", VAGUE_VERBS),
            Some("helped")
        );
        assert_eq!(first_match("Shipped 3 features", VAGUE_VERBS), None);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long sentence here", 6), "a long…");
    }
}
