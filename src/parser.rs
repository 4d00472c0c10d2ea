//! External dependency parser integration
//!
//! Parsing is delegated to a separate process that reads one raw
//! sentence per line on stdin and emits CoNLL-U on stdout (UDPipe's
//! `--immediate --input=horizontal --output=conllu` mode, for example).
//! Spawning the process loads the model, so it is the expensive step:
//! a [`CommandParser`] is spawned once per worker and kept alive across
//! batches.

use crate::conllu::{ParseError, SentenceReader};
use crate::tree::Sentence;
use std::io::{BufReader, BufWriter, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use thiserror::Error;

/// Error from the parser backend
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("I/O error talking to the parser: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("parser produced {got} parses for {expected} sentences")]
    Truncated { expected: usize, got: usize },
}

/// A batch-oriented dependency parser
///
/// Implementations return one parsed [`Sentence`] per input line, in
/// input order. Lines are assumed to be non-blank and trimmed.
pub trait Parser {
    fn parse_batch(&mut self, lines: &[String]) -> Result<Vec<Sentence>, ParserError>;
}

/// Parser backed by a long-lived subprocess speaking CoNLL-U
#[derive(Debug)]
pub struct CommandParser {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    sentences: SentenceReader<BufReader<ChildStdout>>,
    command: String,
}

impl CommandParser {
    /// Spawn the parser process
    ///
    /// The child must read one sentence per stdin line and write each
    /// parse as a CoNLL-U sentence terminated by a blank line, flushing
    /// as it goes; a child that buffers its whole output would deadlock
    /// against large batches.
    pub fn spawn<S: AsRef<str>>(program: &str, args: &[S]) -> Result<Self, ParserError> {
        let command = std::iter::once(program)
            .chain(args.iter().map(|a| a.as_ref()))
            .collect::<Vec<_>>()
            .join(" ");

        let mut child = Command::new(program)
            .args(args.iter().map(|a| a.as_ref()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| ParserError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stdin = child.stdin.take().expect("child stdin is piped");
        let stdout = child.stdout.take().expect("child stdout is piped");
        log::debug!("spawned parser: {}", command);

        Ok(Self {
            child,
            stdin: BufWriter::new(stdin),
            sentences: SentenceReader::from_reader(BufReader::new(stdout)),
            command,
        })
    }

    /// Spawn UDPipe over the given model, reading one sentence per line
    pub fn udpipe(model: &str) -> Result<Self, ParserError> {
        Self::spawn(
            "udpipe",
            &[
                "--immediate",
                "--input=horizontal",
                "--output=conllu",
                model,
            ],
        )
    }

    /// The command line this parser was spawned with
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Parser for CommandParser {
    fn parse_batch(&mut self, lines: &[String]) -> Result<Vec<Sentence>, ParserError> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }

        for line in lines {
            writeln!(self.stdin, "{}", line)?;
        }
        self.stdin.flush()?;

        // One CoNLL-U sentence comes back per input line, in order
        let mut parses = Vec::with_capacity(lines.len());
        while parses.len() < lines.len() {
            match self.sentences.next() {
                Some(Ok(sentence)) => parses.push(sentence),
                Some(Err(e)) => return Err(e.into()),
                None => {
                    return Err(ParserError::Truncated {
                        expected: lines.len(),
                        got: parses.len(),
                    });
                }
            }
        }

        Ok(parses)
    }
}

impl Drop for CommandParser {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
