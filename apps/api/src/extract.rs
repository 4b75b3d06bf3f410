//! Response extraction — isolates structured payloads inside free-form
//! model completions.
//!
//! The JSON helpers are a best-effort heuristic, not a balanced-bracket
//! parser: the candidate payload is the span from the first opening
//! delimiter to the last matching closing delimiter. A completion holding
//! two top-level JSON objects therefore produces an invalid slice — that is
//! the documented contract, callers recover through their fallback tier.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no structural delimiter found in model output")]
    NotFound,
}

/// Strips control characters (0x00-0x1F and 0x7F) from the completion.
/// Applied before JSON extraction only — it also removes newlines, which
/// the line-oriented helpers below depend on.
pub fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(*c, '\u{0000}'..='\u{001F}' | '\u{007F}'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// First `{` to last `}`, inclusive.
pub fn json_object(text: &str) -> Result<&str, ExtractError> {
    bounded_slice(text, '{', '}')
}

/// First `[` to last `]`, inclusive.
pub fn json_array(text: &str) -> Result<&str, ExtractError> {
    bounded_slice(text, '[', ']')
}

fn bounded_slice(text: &str, open: char, close: char) -> Result<&str, ExtractError> {
    let start = text.find(open).ok_or(ExtractError::NotFound)?;
    let end = text.rfind(close).ok_or(ExtractError::NotFound)?;
    if end < start {
        return Err(ExtractError::NotFound);
    }
    Ok(&text[start..=end])
}

/// Substring strictly between two marker phrases, trimmed.
/// Runs to end-of-text when `end_marker` is `None` or never matches.
pub fn delimited_section<'a>(
    text: &'a str,
    start_marker: &str,
    end_marker: Option<&str>,
) -> Option<&'a str> {
    let start = text.find(start_marker)? + start_marker.len();
    let rest = &text[start..];
    let section = match end_marker.and_then(|m| rest.find(m)) {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(section.trim())
}

/// First `"..."` span in the completion (thesis-refinement output contract).
pub fn quoted_phrase(text: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#""([^"]+)""#).expect("quoted phrase regex"));
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// Trims the completion and removes one pair of surrounding quotes if present.
pub fn strip_quotes(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .trim()
}

/// Lines recognized as `1.` / `2)` numbered items, with the marker removed.
pub fn numbered_items(text: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^\s*\d+[.)]\s*(.+)$").expect("numbered item regex"));
    text.lines()
        .filter_map(|line| re.captures(line.trim()))
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Bullet or numbered lines inside an already-isolated text section.
/// Accepts `-`, `•`, `*`, `✓`, `✗` and `N.` markers.
pub fn listed_items(text: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re =
        RE.get_or_init(|| Regex::new(r"^\s*(?:[-•*✓✗]|\d+[.)])\s*(.+)$").expect("list item regex"));
    text.lines()
        .filter_map(|line| re.captures(line.trim()))
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Text-mining helpers — the heuristic tier for completions without valid JSON
// ────────────────────────────────────────────────────────────────────────────

/// Lines of the form `Theme 2: ...`, captured after the label.
pub fn theme_lines(text: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?im)^.*theme\s*\d*\s*:\s*(.+)$").expect("theme regex"));
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Capitalized multi-word phrases that look like domain concepts.
/// Filters leading articles/demonstratives and all-caps tokens.
pub fn capitalized_phrases(text: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"\b[A-Z][a-zA-Z ]{3,25}(?:[.,;:\s]|$)").expect("capitalized phrase regex")
    });
    let mut out: Vec<String> = Vec::new();
    for m in re.find_iter(text) {
        let phrase = m
            .as_str()
            .trim_end_matches(['.', ',', ';', ':', ' '])
            .trim()
            .to_string();
        let lower = phrase.to_lowercase();
        if phrase.len() <= 3
            || phrase.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase())
            || ["the ", "this ", "that ", "these ", "those "]
                .iter()
                .any(|p| lower.starts_with(p))
        {
            continue;
        }
        if !out.contains(&phrase) {
            out.push(phrase);
        }
    }
    out
}

/// Temporal scope mentioned in the text: an explicit year range if present,
/// otherwise the span of individual years, otherwise a single year.
pub fn temporal_scope(text: &str) -> Option<String> {
    static RANGE_RE: OnceLock<Regex> = OnceLock::new();
    static YEAR_RE: OnceLock<Regex> = OnceLock::new();
    let range_re = RANGE_RE.get_or_init(|| {
        Regex::new(r"\b((?:19|20)\d{2})\s*[-–]\s*((?:19|20)\d{2})\b").expect("year range regex")
    });
    let year_re =
        YEAR_RE.get_or_init(|| Regex::new(r"\b((?:19|20)\d{2})\b").expect("year regex"));

    if let Some(c) = range_re.captures(text) {
        return Some(format!("{}-{}", &c[1], &c[2]));
    }

    let mut years: Vec<&str> = year_re
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();
    years.sort_unstable();
    years.dedup();
    match years.len() {
        0 => None,
        1 => Some(years[0].to_string()),
        _ => Some(format!("{}-{}", years[0], years[years.len() - 1])),
    }
}

/// First line of the form `Label: ...`, captured after the label
/// (case-insensitive). Used for `Approach:` / `Reasoning:` style cues.
pub fn labelled_line(text: &str, label: &str) -> Option<String> {
    let re = Regex::new(&format!(r"(?im)^\s*{}\s*:?\s*(.+)$", regex::escape(label)))
        .expect("labelled line regex");
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array_roundtrip_with_noise() {
        let json = r#"[{"section_title":"A"}]"#;
        let wrapped = format!("Here is your answer:\n{json}\nThanks!");
        assert_eq!(json_array(&wrapped).unwrap(), json);
    }

    #[test]
    fn test_json_object_roundtrip_with_noise() {
        let json = r#"{"outline":[{"section_title":"A","section_context":"B","subsections":[]}]}"#;
        let wrapped = format!("Here is your answer:\n{json}\nThanks!");
        let payload = json_object(&wrapped).unwrap();
        assert_eq!(payload, json);

        let value: serde_json::Value = serde_json::from_str(payload).unwrap();
        assert_eq!(value["outline"][0]["section_title"], "A");
    }

    #[test]
    fn test_no_brackets_is_not_found() {
        assert_eq!(json_array("no structure here at all"), Err(ExtractError::NotFound));
        assert_eq!(json_object("plain prose"), Err(ExtractError::NotFound));
    }

    #[test]
    fn test_reversed_delimiters_are_not_found() {
        assert_eq!(json_array("] nothing [").unwrap_err(), ExtractError::NotFound);
        assert_eq!(json_object("} oops {").unwrap_err(), ExtractError::NotFound);
    }

    #[test]
    fn test_known_limitation_two_objects_produce_invalid_slice() {
        // First-{ to last-} is the contract; the slice spans both objects.
        let text = r#"{"a":1} and {"b":2}"#;
        let payload = json_object(text).unwrap();
        assert_eq!(payload, r#"{"a":1} and {"b":2}"#);
        assert!(serde_json::from_str::<serde_json::Value>(payload).is_err());
    }

    #[test]
    fn test_clean_strips_control_characters() {
        let raw = "a\u{0000}b\u{001F}c\u{007F}d\n e ";
        assert_eq!(clean(raw), "abcd e");
    }

    #[test]
    fn test_delimited_section_between_markers() {
        let text = "HEADER\nContent to INCLUDE:\n- item one\nContent to EXCLUDE:\n- other";
        let section = delimited_section(text, "Content to INCLUDE", Some("Content to EXCLUDE"));
        assert_eq!(section.unwrap(), ":\n- item one");
    }

    #[test]
    fn test_delimited_section_runs_to_end_without_end_marker() {
        let text = "Selection Strategy: keep the thesis tight";
        let section = delimited_section(text, "Selection Strategy:", None);
        assert_eq!(section.unwrap(), "keep the thesis tight");
    }

    #[test]
    fn test_delimited_section_missing_start_marker() {
        assert_eq!(delimited_section("nothing here", "MARKER", None), None);
    }

    #[test]
    fn test_quoted_phrase_finds_first_quote_span() {
        let text = "Sure. \"Renewable subsidies accelerate grid decarbonization.\" Hope it helps.";
        assert_eq!(
            quoted_phrase(text).unwrap(),
            "Renewable subsidies accelerate grid decarbonization."
        );
        assert_eq!(quoted_phrase("no quotes"), None);
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("  \"A refined thesis.\"  "), "A refined thesis.");
        assert_eq!(strip_quotes("Already bare."), "Already bare.");
        // Lone quote is left alone rather than producing an unbalanced strip
        assert_eq!(strip_quotes("\"Unbalanced"), "\"Unbalanced");
    }

    #[test]
    fn test_numbered_items() {
        let text = "Here are your questions:\n1. First?\n2. Second?\n\n3) Third?\nNot an item";
        assert_eq!(numbered_items(text), vec!["First?", "Second?", "Third?"]);
    }

    #[test]
    fn test_listed_items_accepts_mixed_markers() {
        let text = "✓ keep this\n- and this\n• this too\nplain line\n1. numbered";
        assert_eq!(
            listed_items(text),
            vec!["keep this", "and this", "this too", "numbered"]
        );
    }

    #[test]
    fn test_theme_lines() {
        let text = "Theme 1: Policy Effectiveness\nsome prose\nTHEME: Attribution Challenges";
        assert_eq!(
            theme_lines(text),
            vec!["Policy Effectiveness", "Attribution Challenges"]
        );
    }

    #[test]
    fn test_capitalized_phrases_filters_articles_and_all_caps() {
        let text = "the report covers Grid Modernization, NATO, and Energy Storage Systems.";
        let phrases = capitalized_phrases(text);
        assert!(phrases.contains(&"Grid Modernization".to_string()));
        assert!(phrases.iter().any(|p| p.starts_with("Energy Storage")));
        assert!(!phrases.contains(&"NATO".to_string()));
        assert!(!phrases.iter().any(|p| p.starts_with("The ")));
    }

    #[test]
    fn test_temporal_scope_prefers_explicit_range() {
        assert_eq!(
            temporal_scope("Covers 2016–2021, including 1999 data").unwrap(),
            "2016-2021"
        );
    }

    #[test]
    fn test_temporal_scope_spans_individual_years() {
        assert_eq!(temporal_scope("From 2003 and later 2019").unwrap(), "2003-2019");
        assert_eq!(temporal_scope("Only 2020 matters").unwrap(), "2020");
        assert_eq!(temporal_scope("no years"), None);
    }

    #[test]
    fn test_labelled_line() {
        let text = "Approach: Evidence-first organization\nReasoning: strongest citations lead";
        assert_eq!(
            labelled_line(text, "approach").unwrap(),
            "Evidence-first organization"
        );
        assert_eq!(labelled_line(text, "missing"), None);
    }
}
