//! Shared fixtures for worker and dispatch tests
//!
//! [`StubParser`] stands in for the external parser process: known
//! sentences come back as hand-annotated dependency parses, anything
//! else as a flat unclassifiable parse.

use crate::conllu::SentenceReader;
use crate::parser::{Parser, ParserError};
use crate::tree::{Sentence, Token};

pub(crate) const GAVE: &str = "She gave him a book.";
pub(crate) const CAT: &str = "The cat sleeps.";
pub(crate) const ATE: &str = "He ate the apple quickly.";

const GAVE_CONLLU: &str = "1\tShe\tshe\tPRON\t_\t_\t2\tnsubj\t_\t_\n\
                           2\tgave\tgive\tVERB\t_\t_\t0\troot\t_\t_\n\
                           3\thim\the\tPRON\t_\t_\t2\tdative\t_\t_\n\
                           4\ta\ta\tDET\t_\t_\t5\tdet\t_\t_\n\
                           5\tbook\tbook\tNOUN\t_\t_\t2\tdobj\t_\t_\n\
                           6\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_\n\n";

const CAT_CONLLU: &str = "1\tThe\tthe\tDET\t_\t_\t2\tdet\t_\t_\n\
                          2\tcat\tcat\tNOUN\t_\t_\t3\tnsubj\t_\t_\n\
                          3\tsleeps\tsleep\tVERB\t_\t_\t0\troot\t_\t_\n\
                          4\t.\t.\tPUNCT\t_\t_\t3\tpunct\t_\t_\n\n";

const ATE_CONLLU: &str = "1\tHe\the\tPRON\t_\t_\t2\tnsubj\t_\t_\n\
                          2\tate\teat\tVERB\t_\t_\t0\troot\t_\t_\n\
                          3\tthe\tthe\tDET\t_\t_\t4\tdet\t_\t_\n\
                          4\tapple\tapple\tNOUN\t_\t_\t2\tdobj\t_\t_\n\
                          5\tquickly\tquickly\tADV\t_\t_\t2\tadvmod\t_\t_\n\
                          6\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_\n\n";

const FIXTURES: [(&str, &str); 3] = [
    (GAVE, GAVE_CONLLU),
    (CAT, CAT_CONLLU),
    (ATE, ATE_CONLLU),
];

/// Deterministic in-process stand-in for the parser subprocess
pub(crate) struct StubParser;

impl Parser for StubParser {
    fn parse_batch(&mut self, lines: &[String]) -> Result<Vec<Sentence>, ParserError> {
        lines.iter().map(|line| parse_fixture(line)).collect()
    }
}

fn parse_fixture(line: &str) -> Result<Sentence, ParserError> {
    for (text, conllu) in FIXTURES {
        if line == text {
            let sentence = SentenceReader::from_string(conllu)
                .next()
                .expect("fixture is non-empty")?;
            return Ok(sentence);
        }
    }

    // fallback: flat parse headed by a noun, which classifies to nothing
    let mut sentence = Sentence::new();
    for (i, word) in line.split_whitespace().enumerate() {
        let deprel = if i == 0 { "root" } else { "dep" };
        sentence.add_token(Token::new(i, word, word, "NOUN", deprel));
    }
    if !sentence.is_empty() {
        sentence.root_id = Some(0);
        for i in 1..sentence.len() {
            sentence.set_parent(i, 0);
        }
    }
    Ok(sentence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Label, classify};

    #[test]
    fn test_fixtures_parse_and_classify_as_annotated() {
        let mut parser = StubParser;
        let parses = parser
            .parse_batch(&[GAVE.to_string(), CAT.to_string(), ATE.to_string()])
            .unwrap();

        let gave = classify(&parses[0]);
        assert!(gave.contains(&Label::Ditransitive));
        assert_eq!(gave.len(), 1);

        assert!(classify(&parses[1]).is_empty());

        let ate = classify(&parses[2]);
        assert!(ate.contains(&Label::Transitive));
        assert_eq!(ate.len(), 1);
    }

    #[test]
    fn test_unknown_lines_fall_back_to_flat_parse() {
        let mut parser = StubParser;
        let parses = parser
            .parse_batch(&["totally novel words".to_string()])
            .unwrap();

        assert_eq!(parses[0].len(), 3);
        assert!(classify(&parses[0]).is_empty());
    }
}
