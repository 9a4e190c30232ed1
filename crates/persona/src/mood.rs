use std::sync::LazyLock;

use regex::Regex;

/// Detected mood of an inbound message. Advisory context only — the most
/// recent detection wins and nothing downstream depends on it being right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
    Stressed,
    Excited,
}

impl Mood {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Stressed => "stressed",
            Self::Excited => "excited",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Checked in this order; first hit wins. Ties break by priority, not
// confidence — this is a deliberately lossy heuristic.
static MOOD_PATTERNS: LazyLock<[(Mood, Regex); 4]> = LazyLock::new(|| {
    [
        (
            Mood::Happy,
            Regex::new(r"(?i)\b(haha|lol|lmao|😂|🤣|happy|great|awesome|amazing|excited)\b")
                .expect("happy pattern"),
        ),
        (
            Mood::Sad,
            Regex::new(r"(?i)\b(sad|upset|crying|😢|😭|depressed|down|bad day)\b")
                .expect("sad pattern"),
        ),
        (
            Mood::Stressed,
            Regex::new(r"(?i)\b(stressed|tired|exhausted|overwhelmed|busy|exam|deadline)\b")
                .expect("stressed pattern"),
        ),
        (
            Mood::Excited,
            Regex::new(r"(?i)(!{2,}|🔥|😍|omg|wow|sick|dope)\b").expect("excited pattern"),
        ),
    ]
});

/// Classify inbound text into a mood, or `None` when nothing matches.
#[must_use]
pub fn classify_mood(text: &str) -> Option<Mood> {
    MOOD_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(mood, _)| *mood)
}

/// Fixed interest vocabulary matched as case-insensitive substrings.
const INTEREST_VOCAB: &[&str] = &[
    "coding",
    "programming",
    "dev",
    "anime",
    "gaming",
    "music",
    "sports",
    "gym",
    "movies",
    "food",
    "travel",
    "art",
    "reading",
    "crypto",
    "nft",
    "startup",
    "college",
    "school",
];

/// Accumulate interest tags onto a profile's interest list.
///
/// Matched keywords not already present are appended in vocabulary order.
/// Interests are never removed.
pub fn update_interests(text: &str, interests: &mut Vec<String>) {
    let lower = text.to_lowercase();
    for keyword in INTEREST_VOCAB {
        if lower.contains(keyword) && !interests.iter().any(|i| i == keyword) {
            interests.push((*keyword).to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laughing_is_happy() {
        assert_eq!(classify_mood("lol that's hilarious 😂"), Some(Mood::Happy));
    }

    #[test]
    fn exam_is_stressed() {
        assert_eq!(
            classify_mood("ugh so stressed about this exam"),
            Some(Mood::Stressed)
        );
    }

    #[test]
    fn neutral_is_none() {
        assert_eq!(classify_mood("just a normal sentence"), None);
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(classify_mood(""), None);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(classify_mood("HAHA nice one"), Some(Mood::Happy));
        assert_eq!(classify_mood("Feeling SAD today"), Some(Mood::Sad));
    }

    #[test]
    fn priority_order_breaks_ties() {
        // "lol" (happy) and "exam" (stressed) both match; happy is checked first.
        assert_eq!(
            classify_mood("lol this exam is killing me"),
            Some(Mood::Happy)
        );
    }

    #[test]
    fn excited_markers() {
        assert_eq!(classify_mood("omg we won"), Some(Mood::Excited));
        assert_eq!(classify_mood("that show was dope"), Some(Mood::Excited));
    }

    #[test]
    fn interests_accumulate_without_duplicates() {
        let mut interests = Vec::new();
        update_interests("I love coding and gaming", &mut interests);
        assert_eq!(interests, vec!["coding", "gaming"]);

        update_interests("gaming is fun", &mut interests);
        assert_eq!(interests, vec!["coding", "gaming"]);
    }

    #[test]
    fn interests_match_case_insensitively() {
        let mut interests = Vec::new();
        update_interests("CRYPTO is wild, Anime too", &mut interests);
        assert_eq!(interests, vec!["anime", "crypto"]);
    }

    #[test]
    fn interests_match_as_substrings() {
        // "devops" contains "dev" — substring matching is intentional.
        let mut interests = Vec::new();
        update_interests("doing devops all day", &mut interests);
        assert_eq!(interests, vec!["dev"]);
    }

    #[test]
    fn no_vocabulary_hit_leaves_profile_untouched() {
        let mut interests = vec!["music".to_string()];
        update_interests("nothing relevant here", &mut interests);
        assert_eq!(interests, vec!["music"]);
    }
}
