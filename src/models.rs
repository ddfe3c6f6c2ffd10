use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Enumerations (closed sets, rejected at the validation boundary) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

/// Grammatical gender of a Spanish term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Masculine,
    #[serde(rename = "f")]
    Feminine,
    #[serde(rename = "inv")]
    Invariable,
}

/// Language of an example sentence. Exactly "en" or "es".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleLanguage {
    En,
    Es,
}

// --- Entity Graph ---
//
// Ownership is unidirectional: a hydrated EnglishTerm embeds its Meanings,
// and each Meaning embeds its SpanishTerms and Examples. There are no
// back-references, so the graph is cycle-free and fully disconnected from
// the store once returned.

/// An English lemma with its attached meanings.
///
/// The lemma text is globally unique; re-adding an existing lemma updates
/// its `pos` rather than creating a second row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnglishTerm {
    pub term_id: Uuid,
    pub term: String,
    pub pos: PartOfSpeech,
    pub meanings: Vec<Meaning>,
}

impl EnglishTerm {
    /// Creates a fresh, not-yet-persisted term with a client-generated id.
    pub fn new(term: impl Into<String>, pos: PartOfSpeech) -> Self {
        EnglishTerm {
            term_id: Uuid::new_v4(),
            term: term.into(),
            pos,
            meanings: Vec::new(),
        }
    }
}

/// One sense of a lemma. Shareable: several English terms may link to the
/// same meaning, and several Spanish terms may attach to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    pub meaning_id: Uuid,
    pub description: String,
    pub spanish_terms: Vec<SpanishTerm>,
    pub examples: Vec<Example>,
}

impl Meaning {
    pub fn new(description: impl Into<String>) -> Self {
        Meaning {
            meaning_id: Uuid::new_v4(),
            description: description.into(),
            spanish_terms: Vec::new(),
            examples: Vec::new(),
        }
    }
}

/// A Spanish translation. The text is globally unique; re-adding updates
/// `gender` in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanishTerm {
    pub term_id: Uuid,
    pub term: String,
    pub gender: Gender,
}

impl SpanishTerm {
    pub fn new(term: impl Into<String>, gender: Gender) -> Self {
        SpanishTerm {
            term_id: Uuid::new_v4(),
            term: term.into(),
            gender,
        }
    }
}

/// A usage example. Belongs to exactly one meaning for its entire lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub example_id: Uuid,
    pub language: ExampleLanguage,
    pub text: String,
}

impl Example {
    pub fn new(language: ExampleLanguage, text: impl Into<String>) -> Self {
        Example {
            example_id: Uuid::new_v4(),
            language,
            text: text.into(),
        }
    }
}

// --- Display / FromStr for CLI parsing ---

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PartOfSpeech::Noun => "noun",
                PartOfSpeech::Verb => "verb",
                PartOfSpeech::Adjective => "adjective",
                PartOfSpeech::Adverb => "adverb",
                PartOfSpeech::Other => "other",
            }
        )
    }
}

impl std::str::FromStr for PartOfSpeech {
    type Err = String; // Simple error type
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "n" | "noun" => Ok(PartOfSpeech::Noun),
            "v" | "verb" => Ok(PartOfSpeech::Verb),
            "a" | "adj" | "adjective" => Ok(PartOfSpeech::Adjective),
            "r" | "adv" | "adverb" => Ok(PartOfSpeech::Adverb),
            "x" | "other" => Ok(PartOfSpeech::Other),
            _ => Err(format!("Invalid part of speech: {}", s)),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Gender::Masculine => "masculine",
                Gender::Feminine => "feminine",
                Gender::Invariable => "invariable",
            }
        )
    }
}

impl std::str::FromStr for Gender {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" | "masc" | "masculine" => Ok(Gender::Masculine),
            "f" | "fem" | "feminine" => Ok(Gender::Feminine),
            "inv" | "invariable" => Ok(Gender::Invariable),
            _ => Err(format!("Invalid gender: {}", s)),
        }
    }
}

impl std::fmt::Display for ExampleLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ExampleLanguage::En => "en",
                ExampleLanguage::Es => "es",
            }
        )
    }
}

impl std::str::FromStr for ExampleLanguage {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(ExampleLanguage::En),
            "es" => Ok(ExampleLanguage::Es),
            _ => Err(format!("Invalid example language: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entities_get_distinct_ids() {
        let a = EnglishTerm::new("lesion", PartOfSpeech::Noun);
        let b = EnglishTerm::new("lesion", PartOfSpeech::Noun);
        assert_ne!(a.term_id, b.term_id);
        assert!(a.meanings.is_empty());
    }

    #[test]
    fn enum_round_trips_through_str() {
        assert_eq!("noun".parse::<PartOfSpeech>(), Ok(PartOfSpeech::Noun));
        assert_eq!("adv".parse::<PartOfSpeech>(), Ok(PartOfSpeech::Adverb));
        assert_eq!("f".parse::<Gender>(), Ok(Gender::Feminine));
        assert_eq!("es".parse::<ExampleLanguage>(), Ok(ExampleLanguage::Es));
        assert!("fr".parse::<ExampleLanguage>().is_err());
    }

    #[test]
    fn json_projection_uses_storage_encodings() {
        let term = SpanishTerm::new("lesión", Gender::Feminine);
        let json = serde_json::to_value(&term).unwrap();
        assert_eq!(json["gender"], "f");
        assert_eq!(json["term"], "lesión");
        // UUIDs serialize as canonical 36-character text
        assert_eq!(json["term_id"].as_str().unwrap().len(), 36);
    }
}
