//! Part-of-speech tagging of isolated vocabulary terms.
//!
//! Candidate terms arrive without sentence context, so tagging works on the
//! word form alone: a closed lexicon of frequent verb forms and verb-looking
//! nouns, then inflection-suffix rules. Tags follow Penn Treebank names so a
//! context-aware tagger can be dropped in behind [`PosTagger`].

use std::collections::HashMap;

/// Coarse Penn-Treebank-style tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    Verb,
    VerbPast,
    VerbGerund,
    VerbParticiple,
    VerbNonThirdPerson,
    VerbThirdPerson,
    Adjective,
    Adverb,
    Cardinal,
}

impl PosTag {
    /// Penn Treebank tag name.
    pub fn penn(&self) -> &'static str {
        match self {
            PosTag::Noun => "NN",
            PosTag::Verb => "VB",
            PosTag::VerbPast => "VBD",
            PosTag::VerbGerund => "VBG",
            PosTag::VerbParticiple => "VBN",
            PosTag::VerbNonThirdPerson => "VBP",
            PosTag::VerbThirdPerson => "VBZ",
            PosTag::Adjective => "JJ",
            PosTag::Adverb => "RB",
            PosTag::Cardinal => "CD",
        }
    }

    /// Any tag of the `VB*` family.
    pub fn is_verb(&self) -> bool {
        self.penn().starts_with("VB")
    }
}

/// Tags a single lowercase term.
pub trait PosTagger: Send + Sync {
    fn tag(&self, term: &str) -> PosTag;
}

const VERB_BASE: &[&str] = &[
    "accept", "achieve", "add", "agree", "allow", "announce", "appear", "apply", "argue", "ask",
    "become", "begin", "believe", "bring", "build", "buy", "call", "change", "choose", "claim",
    "come", "consider", "continue", "create", "cut", "decide", "deliver", "deploy", "describe",
    "develop", "die", "discover", "do", "drive", "enable", "expect", "explain", "fall", "feel",
    "find", "follow", "forget", "generate", "get", "give", "go", "grow", "happen", "hear", "help",
    "hold", "improve", "include", "introduce", "keep", "kill", "know", "launch", "lead", "learn",
    "leave", "let", "like", "live", "look", "lose", "make", "mean", "meet", "move", "need",
    "offer", "open", "pass", "pay", "play", "predict", "produce", "provide", "pull", "put",
    "raise", "reach", "read", "receive", "reduce", "release", "remain", "remember", "replace",
    "report", "require", "reveal", "run", "say", "see", "seem", "sell", "send", "serve", "set",
    "share", "show", "sit", "speak", "spend", "stand", "start", "stay", "stop", "suggest", "take",
    "talk", "tell", "think", "train", "try", "turn", "understand", "unveil", "use", "wait",
    "walk", "want", "watch", "win", "work", "write",
];

const VERB_PAST: &[&str] = &[
    "ate", "became", "began", "bought", "brought", "came", "chose", "did", "drove", "fell",
    "felt", "forgot", "gave", "got", "grew", "had", "heard", "held", "kept", "knew", "led",
    "left", "lost", "made", "meant", "met", "paid", "ran", "said", "sat", "saw", "sent", "sold",
    "spoke", "spent", "stood", "taught", "thought", "told", "took", "was", "went", "were", "won",
    "wrote",
];

const VERB_PARTICIPLE: &[&str] = &[
    "been", "begun", "built", "chosen", "done", "driven", "eaten", "fallen", "forgotten",
    "given", "gone", "grown", "known", "seen", "shown", "spoken", "taken", "understood",
    "written",
];

const VERB_NON_THIRD_PERSON: &[&str] = &["am", "are", "have"];

const VERB_THIRD_PERSON: &[&str] = &["does", "goes", "has", "is", "says"];

/// Nouns whose form would otherwise trip a verb rule.
const NOUN_EXCEPTIONS: &[&str] = &[
    "anything", "bed", "breed", "building", "ceiling", "computing", "creed", "deed", "embedding",
    "engineering", "enterprise", "evening", "everything", "exercise", "expertise", "feed",
    "franchise", "funding", "greed", "hundred", "king", "learning", "marketing", "meeting",
    "merchandise", "morning", "need", "noise", "nothing", "paradise", "premise", "processing",
    "programming", "promise", "reasoning", "red", "ring", "seed", "shed", "something", "speed",
    "spring", "string", "thing", "training", "understanding", "wedding", "weed",
];

/// Default tagger: lexicon lookup, then suffix rules, then noun.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: HashMap<&'static str, PosTag>,
}

impl LexiconTagger {
    pub fn new() -> Self {
        let mut lexicon = HashMap::new();
        let groups: [(&[&str], PosTag); 5] = [
            (VERB_BASE, PosTag::Verb),
            (VERB_PAST, PosTag::VerbPast),
            (VERB_PARTICIPLE, PosTag::VerbParticiple),
            (VERB_NON_THIRD_PERSON, PosTag::VerbNonThirdPerson),
            (VERB_THIRD_PERSON, PosTag::VerbThirdPerson),
        ];
        for (words, tag) in groups {
            for word in words {
                lexicon.insert(*word, tag);
            }
        }
        // Exceptions win over base verbs ("need", "feed")
        for word in NOUN_EXCEPTIONS {
            lexicon.insert(*word, PosTag::Noun);
        }
        Self { lexicon }
    }

    /// Third-person singular of a known base verb ("launches", "uses").
    fn third_person_of_base(&self, term: &str) -> bool {
        let is_base = |stem: &str| self.lexicon.get(stem) == Some(&PosTag::Verb);
        if let Some(stem) = term.strip_suffix("es") {
            if is_base(stem) {
                return true;
            }
        }
        if let Some(stem) = term.strip_suffix("ies") {
            if is_base(format!("{stem}y").as_str()) {
                return true;
            }
        }
        term.strip_suffix('s').is_some_and(is_base)
    }

    fn by_suffix(&self, term: &str) -> PosTag {
        let len = term.chars().count();
        if len >= 5 && term.ends_with("ing") {
            return PosTag::VerbGerund;
        }
        if len >= 4 && term.ends_with("ed") {
            return PosTag::VerbPast;
        }
        if len >= 5 && (term.ends_with("ize") || term.ends_with("ise") || term.ends_with("ify")) {
            return PosTag::Verb;
        }
        if self.third_person_of_base(term) {
            return PosTag::VerbThirdPerson;
        }
        if len >= 5 && term.ends_with("ly") {
            return PosTag::Adverb;
        }
        const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "able", "ible", "less"];
        if len >= 6 && ADJECTIVE_SUFFIXES.iter().any(|s| term.ends_with(s)) {
            return PosTag::Adjective;
        }
        PosTag::Noun
    }
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, term: &str) -> PosTag {
        if !term.is_empty() && term.chars().all(|c| c.is_ascii_digit()) {
            return PosTag::Cardinal;
        }
        if let Some(tag) = self.lexicon.get(term) {
            return *tag;
        }
        self.by_suffix(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(term: &str) -> PosTag {
        LexiconTagger::new().tag(term)
    }

    #[test]
    fn test_lexicon_verbs() {
        assert_eq!(tag("say"), PosTag::Verb);
        assert_eq!(tag("said"), PosTag::VerbPast);
        assert_eq!(tag("written"), PosTag::VerbParticiple);
        assert_eq!(tag("is"), PosTag::VerbThirdPerson);
        assert_eq!(tag("are"), PosTag::VerbNonThirdPerson);
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(tag("running"), PosTag::VerbGerund);
        assert_eq!(tag("released"), PosTag::VerbPast);
        assert_eq!(tag("optimize"), PosTag::Verb);
        assert_eq!(tag("launches"), PosTag::VerbThirdPerson);
        assert_eq!(tag("uses"), PosTag::VerbThirdPerson);
        assert_eq!(tag("applies"), PosTag::VerbThirdPerson);
        assert_eq!(tag("quickly"), PosTag::Adverb);
        assert_eq!(tag("powerful"), PosTag::Adjective);
    }

    #[test]
    fn test_noun_exceptions() {
        assert_eq!(tag("learning"), PosTag::Noun);
        assert_eq!(tag("training"), PosTag::Noun);
        assert_eq!(tag("thing"), PosTag::Noun);
        assert_eq!(tag("speed"), PosTag::Noun);
        assert_eq!(tag("need"), PosTag::Noun);
        assert_eq!(tag("enterprise"), PosTag::Noun);
    }

    #[test]
    fn test_default_is_noun() {
        assert_eq!(tag("transformer"), PosTag::Noun);
        assert_eq!(tag("gpu"), PosTag::Noun);
        assert_eq!(tag("models"), PosTag::Noun);
        assert_eq!(tag("ai"), PosTag::Noun);
        assert_eq!(tag("king"), PosTag::Noun);
    }

    #[test]
    fn test_cardinal() {
        assert_eq!(tag("2024"), PosTag::Cardinal);
        assert_eq!(tag("4o"), PosTag::Noun);
    }

    #[test]
    fn test_verb_family() {
        assert!(PosTag::VerbGerund.is_verb());
        assert!(PosTag::VerbThirdPerson.is_verb());
        assert!(!PosTag::Noun.is_verb());
        assert!(!PosTag::Cardinal.is_verb());
        assert_eq!(PosTag::VerbParticiple.penn(), "VBN");
    }
}
