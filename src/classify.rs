//! Verb transitivity rules over dependency trees
//!
//! A verb is transitive when it governs a direct object, ditransitive
//! when it additionally governs an indirect or oblique dependent. A
//! sentence is labeled with the union over all of its verbs, so it can
//! carry zero, one, or both labels.

use crate::tree::{Sentence, Token};
use rustc_hash::FxHashSet;
use std::fmt;

/// POS tag identifying verbs
pub const VERB_POS: &str = "VERB";

/// Dependency role of a direct object
///
/// Role names follow the ClearNLP-style scheme; a backend emitting
/// Universal Dependencies labels ("obj", "obl:agent", ...) must map its
/// inventory onto these before classification, or results will quietly
/// shift.
pub const DIRECT_OBJECT: &str = "dobj";

/// Dependency roles counted as indirect/oblique dependents
pub const INDIRECT_OBJECTS: [&str; 4] = ["iobj", "obl", "prep", "dative"];

/// Transitivity label for a sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Transitive,
    Ditransitive,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Transitive => "transitive",
            Label::Ditransitive => "ditransitive",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label contributed by a single verb, from its direct dependents
fn verb_label(sentence: &Sentence, verb: &Token) -> Option<Label> {
    let children = sentence.children(verb.id);

    let has_direct = children.iter().any(|c| c.deprel == DIRECT_OBJECT);
    let has_indirect = children
        .iter()
        .any(|c| INDIRECT_OBJECTS.contains(&c.deprel.as_str()));

    match (has_direct, has_indirect) {
        (true, true) => Some(Label::Ditransitive),
        (true, false) => Some(Label::Transitive),
        _ => None,
    }
}

/// Classify a sentence by the transitivity of its verbs
///
/// Pure function of the parsed structure; a sentence with no verbs
/// yields the empty set.
pub fn classify(sentence: &Sentence) -> FxHashSet<Label> {
    sentence
        .tokens
        .iter()
        .filter(|t| t.pos == VERB_POS)
        .filter_map(|t| verb_label(sentence, t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Token;

    /// Build a one-verb sentence with the verb at ID 0 governing
    /// dependents with the given deprels
    fn verb_with_dependents(deprels: &[&str]) -> Sentence {
        let mut sentence = Sentence::new();
        sentence.add_token(Token::new(0, "gave", "give", "VERB", "root"));
        sentence.root_id = Some(0);
        for (i, deprel) in deprels.iter().enumerate() {
            sentence.add_token(Token::new(i + 1, "w", "w", "NOUN", deprel));
            sentence.set_parent(i + 1, 0);
        }
        sentence
    }

    #[test]
    fn test_direct_object_only_is_transitive() {
        let sentence = verb_with_dependents(&["nsubj", "dobj", "punct"]);
        let labels = classify(&sentence);

        assert_eq!(labels.len(), 1);
        assert!(labels.contains(&Label::Transitive));
    }

    #[test]
    fn test_both_objects_is_only_ditransitive() {
        for indirect in INDIRECT_OBJECTS {
            let sentence = verb_with_dependents(&["nsubj", "dobj", indirect]);
            let labels = classify(&sentence);

            assert_eq!(labels.len(), 1, "role {}", indirect);
            assert!(labels.contains(&Label::Ditransitive));
        }
    }

    #[test]
    fn test_indirect_without_direct_is_unlabeled() {
        let sentence = verb_with_dependents(&["nsubj", "dative"]);
        assert!(classify(&sentence).is_empty());
    }

    #[test]
    fn test_no_verbs_yields_empty_set() {
        let mut sentence = Sentence::new();
        sentence.add_token(Token::new(0, "dog", "dog", "NOUN", "root"));
        sentence.root_id = Some(0);

        assert!(classify(&sentence).is_empty());
    }

    #[test]
    fn test_dependent_order_does_not_matter() {
        let forward = verb_with_dependents(&["dobj", "dative", "nsubj"]);
        let backward = verb_with_dependents(&["nsubj", "dative", "dobj"]);

        assert_eq!(classify(&forward), classify(&backward));
    }

    #[test]
    fn test_labels_union_across_verbs() {
        // "gave ... book" (ditransitive) coordinated with "ate apple"
        // (transitive)
        let mut sentence = Sentence::new();
        sentence.add_token(Token::new(0, "gave", "give", "VERB", "root"));
        sentence.add_token(Token::new(1, "him", "he", "PRON", "dative"));
        sentence.add_token(Token::new(2, "book", "book", "NOUN", "dobj"));
        sentence.add_token(Token::new(3, "ate", "eat", "VERB", "conj"));
        sentence.add_token(Token::new(4, "apple", "apple", "NOUN", "dobj"));
        sentence.root_id = Some(0);
        sentence.set_parent(1, 0);
        sentence.set_parent(2, 0);
        sentence.set_parent(3, 0);
        sentence.set_parent(4, 3);

        let labels = classify(&sentence);
        assert_eq!(labels.len(), 2);
        assert!(labels.contains(&Label::Transitive));
        assert!(labels.contains(&Label::Ditransitive));
    }

    #[test]
    fn test_non_verb_with_dobj_child_is_ignored() {
        let mut sentence = Sentence::new();
        sentence.add_token(Token::new(0, "destruction", "destruction", "NOUN", "root"));
        sentence.add_token(Token::new(1, "city", "city", "NOUN", "dobj"));
        sentence.root_id = Some(0);
        sentence.set_parent(1, 0);

        assert!(classify(&sentence).is_empty());
    }
}
