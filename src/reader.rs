//! Sentence segmentation for the line-by-line story reader.

use once_cell::sync::Lazy;
use regex::Regex;

/// A run of non-terminators closed by one or more `.`, `!` or `?`.
static SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").unwrap());

/// Split `content` into trimmed sentences.
///
/// Content with no terminated sentence at all is returned as a single
/// segment. Text trailing the last terminator is not kept.
pub fn sentences(content: &str) -> Vec<String> {
    let found: Vec<String> = SENTENCE
        .find_iter(content)
        .map(|m| m.as_str().trim().to_string())
        .collect();

    if found.is_empty() {
        vec![content.trim().to_string()]
    } else {
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sentences() {
        assert_eq!(sentences("Hi. Bye."), vec!["Hi.", "Bye."]);
    }

    #[test]
    fn test_mixed_terminators_and_runs() {
        assert_eq!(
            sentences("Wait... what?! Run!  Now."),
            vec!["Wait...", "what?!", "Run!", "Now."]
        );
    }

    #[test]
    fn test_newlines_are_trimmed() {
        assert_eq!(
            sentences("First line.\nSecond line.\n"),
            vec!["First line.", "Second line."]
        );
    }

    #[test]
    fn test_no_terminator_is_one_segment() {
        assert_eq!(sentences("  no ending here "), vec!["no ending here"]);
        assert_eq!(sentences("..."), vec!["..."]);
    }

    #[test]
    fn test_unterminated_tail_is_dropped() {
        assert_eq!(sentences("Done. And then"), vec!["Done."]);
    }
}
