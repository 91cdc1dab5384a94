//! Keyword-based risk classification and canned counselor replies.
//!
//! Matching is plain substring containment on case-folded text: no stemming
//! and no word boundaries, so "sadness" matches "sad" and "hopelessly"
//! matches "hopeless". False positives are preferred over misses.

/// Phrases that mark a message as crisis-positive
pub const DEFAULT_CRISIS_PHRASES: [&str; 9] = [
    "suicide",
    "kill myself",
    "end it all",
    "hurt myself",
    "self harm",
    "don't want to live",
    "better off dead",
    "hopeless",
    "can't go on",
];

const ANXIETY_KEYWORDS: [&str; 2] = ["anxious", "anxiety"];
const STRESS_KEYWORDS: [&str; 2] = ["stressed", "stress"];
const SADNESS_KEYWORDS: [&str; 2] = ["sad", "depressed"];

/// Immutable set of lowercase phrases tested by substring containment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrisisLexicon {
    phrases: Vec<String>,
}

impl CrisisLexicon {
    /// Builds a lexicon from arbitrary phrases; they are case-folded and blanks dropped
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| normalize(p.as_ref()))
                .filter(|p| !p.trim().is_empty())
                .collect(),
        }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// True iff any phrase occurs in the case-folded text
    pub fn classify(&self, text: &str) -> bool {
        self.matches_normalized(&normalize(text))
    }

    /// Picks the reply for a user message; the crisis check always wins
    pub fn compose_reply(&self, text: &str) -> Reply {
        let text = normalize(text);
        if self.matches_normalized(&text) {
            Reply::Crisis
        } else if contains_any(&text, &ANXIETY_KEYWORDS) {
            Reply::Anxiety
        } else if contains_any(&text, &STRESS_KEYWORDS) {
            Reply::Stress
        } else if contains_any(&text, &SADNESS_KEYWORDS) {
            Reply::Sadness
        } else {
            Reply::Generic
        }
    }

    fn matches_normalized(&self, text: &str) -> bool {
        self.phrases.iter().any(|p| text.contains(p.as_str()))
    }
}

impl Default for CrisisLexicon {
    fn default() -> Self {
        Self::new(DEFAULT_CRISIS_PHRASES)
    }
}

/// Case folding shared by classification and reply selection.
///
/// Curly apostrophes are folded to ASCII so "don’t want to live" still matches.
fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Canned counselor replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Crisis,
    Anxiety,
    Stress,
    Sadness,
    Generic,
}

impl Reply {
    pub fn text(self) -> &'static str {
        match self {
            // acknowledges and signals escalation only; resources come from the crisis modal
            Reply::Crisis => "I'm really concerned about what you're sharing. Your feelings are valid, but please know that you don't have to go through this alone. Let me connect you with immediate help resources.",
            Reply::Anxiety => "I hear that you're feeling anxious. That must be really difficult. Can you tell me more about what's contributing to these feelings? Sometimes it helps to break down what's happening.",
            Reply::Stress => "Stress can feel overwhelming. You're taking a positive step by talking about it. What are some of the main sources of stress in your life right now?",
            Reply::Sadness => "I'm sorry you're feeling this way. Your feelings are important and valid. Would you like to explore what might be contributing to these feelings, or would you prefer to talk about coping strategies?",
            Reply::Generic => "Thank you for sharing that with me. I'm here to listen and support you. Can you tell me more about how you're feeling, or is there something specific you'd like to talk through together?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Call,
    Text,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrisisContact {
    pub name: &'static str,
    pub number: &'static str,
    pub description: &'static str,
    pub kind: ContactKind,
}

pub const CRISIS_CONTACTS: [CrisisContact; 3] = [
    CrisisContact {
        name: "988 Suicide & Crisis Lifeline",
        number: "988",
        description: "24/7, free and confidential support",
        kind: ContactKind::Call,
    },
    CrisisContact {
        name: "Crisis Text Line",
        number: "Text HOME to 741741",
        description: "Free, 24/7 crisis counseling via text",
        kind: ContactKind::Text,
    },
    CrisisContact {
        name: "Emergency Services",
        number: "911",
        description: "For immediate emergency assistance",
        kind: ContactKind::Emergency,
    },
];

pub const LIFELINE_URL: &str = "https://988lifeline.org";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_flags_crisis_phrases() {
        let lex = CrisisLexicon::default();
        assert!(lex.classify("I want to kill myself"));
        assert!(lex.classify("I feel hopeless"));
        assert!(lex.classify("I DON'T WANT TO LIVE anymore"));
        assert!(lex.classify("i don’t want to live"));
        assert!(!lex.classify("I feel anxious about work"));
        assert!(!lex.classify(""));
    }

    #[test]
    fn classify_is_substring_not_word_match() {
        let lex = CrisisLexicon::default();
        assert!(lex.classify("hopelessly lost in this puzzle"));
        assert!(lex.classify("antisuicidepact"));
    }

    #[test]
    fn crisis_reply_has_priority() {
        let lex = CrisisLexicon::default();
        assert_eq!(
            lex.compose_reply("I'm so stressed I want to end it all"),
            Reply::Crisis
        );
        assert_eq!(
            lex.compose_reply("anxious and sad and hopeless"),
            Reply::Crisis
        );
    }

    #[test]
    fn keyword_replies_follow_decision_order() {
        let lex = CrisisLexicon::default();
        assert_eq!(lex.compose_reply("Anxiety is rough"), Reply::Anxiety);
        assert_eq!(lex.compose_reply("anxious and stressed"), Reply::Anxiety);
        assert_eq!(lex.compose_reply("So much STRESS"), Reply::Stress);
        assert_eq!(lex.compose_reply("stressed and sad"), Reply::Stress);
        assert_eq!(lex.compose_reply("a bit depressed"), Reply::Sadness);
        assert_eq!(lex.compose_reply("Sadness today"), Reply::Sadness);
        assert_eq!(lex.compose_reply("hello there"), Reply::Generic);
    }

    #[test]
    fn reply_texts_are_distinct() {
        let all = [
            Reply::Crisis,
            Reply::Anxiety,
            Reply::Stress,
            Reply::Sadness,
            Reply::Generic,
        ];
        for a in all {
            for b in all {
                if a != b {
                    assert_ne!(a.text(), b.text());
                }
            }
        }
    }

    #[test]
    fn custom_lexicon_is_case_folded() {
        let lex = CrisisLexicon::new(["Give Up", "  "]);
        assert_eq!(lex.phrases().to_vec(), vec!["give up".to_string()]);
        assert!(lex.classify("I just want to GIVE UP"));
        assert!(!lex.classify("kill myself"));
    }
}
