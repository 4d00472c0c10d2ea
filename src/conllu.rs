//! CoNLL-U parsing into [`Sentence`] structures
//!
//! This is the wire format between the external parser process and the
//! pipeline. Only the fields the transitivity pass consumes are kept:
//! FORM, LEMMA, UPOS, HEAD, and DEPREL, plus the `# text` comment.
//! Multiword token ranges and empty nodes are skipped.
//!
//! CoNLL-U format: https://universaldependencies.org/format.html

use crate::tree::{Sentence, Token, TokenId};
use std::io::{BufRead, BufReader, Lines};
use thiserror::Error;

/// Error during CoNLL-U parsing
#[derive(Debug, Error)]
#[error("CoNLL-U parse error at line {line_num}: {message}")]
pub struct ParseError {
    pub line_num: usize,
    pub message: String,
}

/// Streaming reader that iterates over CoNLL-U sentences
#[derive(Debug)]
pub struct SentenceReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
}

impl<R: BufRead> SentenceReader<R> {
    /// Create a reader over any buffered source
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }
}

impl SentenceReader<BufReader<std::io::Cursor<String>>> {
    /// Create a reader from an in-memory string
    pub fn from_string(text: &str) -> Self {
        let cursor = std::io::Cursor::new(text.to_string());
        Self::from_reader(BufReader::new(cursor))
    }
}

impl<R: BufRead> Iterator for SentenceReader<R> {
    type Item = Result<Sentence, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut token_lines = Vec::new();
        let mut text = None;

        // Accumulate lines until a blank line (sentence boundary) or EOF
        loop {
            self.line_num += 1;
            match self.lines.next() {
                None => {
                    if token_lines.is_empty() {
                        return None; // no more sentences
                    }
                    // last sentence without trailing blank line
                    break;
                }
                Some(Err(e)) => {
                    return Some(Err(ParseError {
                        line_num: self.line_num,
                        message: format!("I/O error: {}", e),
                    }));
                }
                Some(Ok(line)) => {
                    let line = line.trim();

                    if line.is_empty() {
                        if token_lines.is_empty() {
                            // skip blank lines between sentences
                            continue;
                        }
                        break;
                    }

                    if let Some(comment) = line.strip_prefix('#') {
                        parse_comment(comment, &mut text);
                        continue;
                    }

                    token_lines.push((self.line_num, line.to_string()));
                }
            }
        }

        Some(build_sentence(token_lines, text))
    }
}

/// Parse a comment line (after the leading `#`), keeping only `text = ...`
fn parse_comment(comment: &str, text: &mut Option<String>) {
    let comment = comment.trim();
    if let Some(eq_pos) = comment.find('=') {
        if comment[..eq_pos].trim() == "text" {
            *text = Some(comment[eq_pos + 1..].trim().to_string());
        }
    }
}

/// Assemble accumulated token lines into a linked [`Sentence`]
fn build_sentence(
    token_lines: Vec<(usize, String)>,
    text: Option<String>,
) -> Result<Sentence, ParseError> {
    let mut sentence = Sentence::with_text(text);

    for (line_num, line) in token_lines {
        if let Some(token) = parse_token_line(&line, line_num, sentence.len())? {
            sentence.add_token(token);
        }
    }

    // Wire up head/child links from the HEAD column
    let token_count = sentence.len();
    for id in 0..token_count {
        match sentence.tokens[id].parent {
            Some(parent_id) if parent_id < token_count => sentence.set_parent(id, parent_id),
            _ => sentence.root_id = Some(id),
        }
    }

    Ok(sentence)
}

/// Parse a single token line into a [`Token`]
///
/// Returns `None` for multiword token ranges (`1-2`) and empty nodes
/// (`2.1`), which take no part in the basic dependency tree.
fn parse_token_line(
    line: &str,
    line_num: usize,
    id: TokenId,
) -> Result<Option<Token>, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() != 10 {
        return Err(ParseError {
            line_num,
            message: format!("expected 10 fields, found {}", fields.len()),
        });
    }

    if fields[0].contains('-') || fields[0].contains('.') {
        return Ok(None);
    }
    if fields[0].parse::<usize>().is_err() {
        return Err(ParseError {
            line_num,
            message: format!("invalid token ID: {}", fields[0]),
        });
    }

    let form = fields[1];
    let lemma = if fields[2] == "_" { form } else { fields[2] };
    let pos = fields[3];
    let deprel = fields[7];

    let mut token = Token::new(id, form, lemma, pos, deprel);
    token.parent = parse_head(fields[6], line_num)?;

    Ok(Some(token))
}

/// Parse the HEAD field (`0` and `_` mean root)
fn parse_head(s: &str, line_num: usize) -> Result<Option<TokenId>, ParseError> {
    if s == "0" || s == "_" {
        return Ok(None);
    }
    let head: usize = s.parse().map_err(|_| ParseError {
        line_num,
        message: format!("invalid HEAD: {}", s),
    })?;
    // HEAD is 1-indexed in CoNLL-U
    Ok(head.checked_sub(1))
}
