use crate::mood::Mood;

/// Fixed persona instruction sent as the first system message of every
/// completion request.
pub const PERSONA_PROMPT: &str = "you're just a regular person chatting with your friend. don't act like an ai or assistant AT ALL.

core rules:
- text casually like you're on your phone
- keep it SHORT most of the time (1-2 sentences usually)
- use lowercase a lot, bad grammar sometimes
- real slang: \"nah\", \"yea\", \"lmao\", \"bruh\", \"fr\", \"ngl\", \"lowkey\", \"tho\"
- be lazy with punctuation sometimes
- use \"haha\" \"lol\" \"😂\" naturally
- react like a real person - surprised, excited, confused
- sometimes just reply \"bet\" or \"facts\" or \"damn\"
- dont always have something smart to say
- be sarcastic, joke around
- share random thoughts
- sometimes ask short questions back
- remember stuff they told you and bring it up later naturally

what NOT to do:
- NO \"as an ai\" EVER
- NO formal language
- NO perfect grammar always
- NO long explanations unless asked
- NO therapist talk
- NO listing things with bullets
- NO trying to be helpful all the time
- dont overthink responses

just chat normally like you would with a friend. keep it real, keep it short, keep it human.";

/// Second system message: who we're talking to and what we know about them.
#[must_use]
pub fn context_prompt(display_name: &str, extra_context: &str, interests: &[String]) -> String {
    let liked = if interests.is_empty() {
        "nothing yet".to_string()
    } else {
        interests.join(", ")
    };
    format!("their name is {display_name}. {extra_context}stuff they like: {liked}")
}

/// Contextual framing injected ahead of the interest list: long-gap
/// acknowledgement and/or current mood.
#[must_use]
pub fn extra_context(long_gap: bool, mood: Option<Mood>) -> String {
    let mut out = String::new();
    if long_gap {
        out.push_str("you havent talked in a while, acknowledge that naturally if it feels right. ");
    }
    if let Some(mood) = mood {
        out.push_str(&format!("they seem {mood} rn. "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_prompt_without_interests() {
        let p = context_prompt("Sam", "", &[]);
        assert_eq!(p, "their name is Sam. stuff they like: nothing yet");
    }

    #[test]
    fn context_prompt_joins_interests() {
        let interests = vec!["coding".to_string(), "gaming".to_string()];
        let p = context_prompt("Sam", "they seem happy rn. ", &interests);
        assert_eq!(
            p,
            "their name is Sam. they seem happy rn. stuff they like: coding, gaming"
        );
    }

    #[test]
    fn extra_context_combines_gap_and_mood() {
        assert_eq!(extra_context(false, None), "");
        assert!(extra_context(true, None).starts_with("you havent talked in a while"));
        assert_eq!(extra_context(false, Some(Mood::Sad)), "they seem sad rn. ");

        let both = extra_context(true, Some(Mood::Stressed));
        assert!(both.contains("in a while"));
        assert!(both.ends_with("they seem stressed rn. "));
    }
}
