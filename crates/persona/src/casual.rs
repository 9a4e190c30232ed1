use std::sync::LazyLock;

use regex::Regex;

/// Ordered substitution list: formal phrasing → casual phrasing.
///
/// Applied left-to-right; no replacement text contains a later pattern, so
/// the fixed order keeps `casualize` idempotent.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("However,", "but like"),
    ("Therefore,", "so"),
    ("Additionally,", "also"),
    ("Furthermore,", "and"),
    ("going to", "gonna"),
    ("want to", "wanna"),
    ("kind of", "kinda"),
    ("sort of", "sorta"),
    ("have to", "gotta"),
    ("got to", "gotta"),
];

static COMPILED_SUBSTITUTIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    SUBSTITUTIONS
        .iter()
        .map(|(pattern, replacement)| {
            let re = Regex::new(&format!("(?i){}", regex::escape(pattern)))
                .expect("substitution pattern");
            (re, *replacement)
        })
        .collect()
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Turn a provider's reply into casual phrasing.
///
/// Runs the fixed substitution list case-insensitively, collapses every
/// whitespace run to a single space, and trims. Idempotent on its own
/// output.
#[must_use]
pub fn casualize(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, replacement) in COMPILED_SUBSTITUTIONS.iter() {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    WHITESPACE_RUN.replace_all(&out, " ").trim().to_string()
}

/// Pacing chunk size cap in characters.
const CHUNK_CAP: usize = 250;

/// Replies shorter than this are never split.
const SPLIT_THRESHOLD: usize = 300;

static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+\s+").expect("sentence boundary pattern"));

/// Split a reply into pacing-sized chunks.
///
/// Short text passes through unmodified as a single chunk. Longer text is
/// split at sentence boundaries (delimiters retained) and sentences are
/// greedily packed up to [`CHUNK_CAP`] characters per chunk; a single
/// sentence longer than the cap stays whole as its own chunk. Never returns
/// an empty sequence for non-empty input.
#[must_use]
pub fn split_for_pacing(text: &str) -> Vec<String> {
    if text.chars().count() < SPLIT_THRESHOLD {
        return vec![text.to_string()];
    }

    // Segment into sentence / delimiter pieces, delimiters kept in-stream.
    let mut segments = Vec::new();
    let mut last = 0;
    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        if boundary.start() > last {
            segments.push(&text[last..boundary.start()]);
        }
        segments.push(boundary.as_str());
        last = boundary.end();
    }
    if last < text.len() {
        segments.push(&text[last..]);
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    for segment in segments {
        if current.chars().count() + segment.chars().count() > CHUNK_CAP {
            if !current.trim().is_empty() {
                chunks.push(current.trim().to_string());
            }
            current = segment.to_string();
        } else {
            current.push_str(segment);
        }
    }
    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    if chunks.is_empty() {
        vec![text.to_string()]
    } else {
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_formal_connectives() {
        assert_eq!(
            casualize("However, I think so. Therefore, yes."),
            "but like I think so. so yes."
        );
    }

    #[test]
    fn substitutes_verb_phrases() {
        assert_eq!(
            casualize("I'm going to try, I want to see it"),
            "I'm gonna try, I wanna see it"
        );
        assert_eq!(casualize("you have to go, I got to run"), "you gotta go, I gotta run");
    }

    #[test]
    fn case_insensitive_substitution() {
        assert_eq!(casualize("KIND OF weird, Sort Of fun"), "kinda weird, sorta fun");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(casualize("  hey   there \n\n friend  "), "hey there friend");
    }

    #[test]
    fn idempotent_on_own_output() {
        let inputs = [
            "However, I was going to say something. Additionally, I want to add more.",
            "plain text without anything formal",
            "  spaced    out   ",
            "",
        ];
        for input in inputs {
            let once = casualize(input);
            assert_eq!(casualize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn empty_input_passes_through() {
        assert_eq!(casualize(""), "");
    }

    #[test]
    fn short_text_is_single_chunk() {
        let text = "short reply";
        assert_eq!(split_for_pacing(text), vec![text.to_string()]);
    }

    #[test]
    fn text_just_under_threshold_is_unmodified() {
        let text = "a".repeat(299);
        assert_eq!(split_for_pacing(&text), vec![text.clone()]);
    }

    #[test]
    fn long_text_splits_at_sentence_boundaries() {
        let sentence = "this sentence is about forty characers ok. ";
        let text = sentence.repeat(10);
        let chunks = split_for_pacing(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(
                chunk.chars().count() <= 250,
                "chunk too long: {} chars",
                chunk.chars().count()
            );
            assert!(!chunk.trim().is_empty());
        }
    }

    #[test]
    fn concatenation_reconstructs_text_modulo_boundary_trim() {
        let sentence = "some words that make a sentence of decent length here! ";
        let text = sentence.repeat(8);
        let chunks = split_for_pacing(&text);

        // Joining with a single space restores the text up to the trimmed
        // boundary whitespace.
        let rejoined = chunks.join(" ");
        assert_eq!(rejoined, text.trim());
    }

    #[test]
    fn oversized_single_sentence_stays_whole() {
        // One 400-char "sentence" with no boundary: cannot be split.
        let text = "x".repeat(400);
        let chunks = split_for_pacing(&text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn oversized_sentence_among_normal_ones_gets_own_chunk() {
        let big = "y".repeat(260);
        let text = format!("first bit here. {big}. and then a closing thought. {}", "pad ".repeat(20));
        let chunks = split_for_pacing(&text);
        assert!(chunks.iter().any(|c| c.chars().count() > 250));
        assert!(chunks.iter().all(|c| !c.trim().is_empty()));
    }
}
