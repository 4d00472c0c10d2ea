//! Per-file processing pipeline
//!
//! One worker owns one input file end to end: read lines, filter,
//! batch-parse through the worker's parser, classify, and write a
//! single output file next to the input. The two output modes share the
//! whole pipeline and differ only in serialization.

use crate::classify::{Label, classify};
use crate::filter::filter_lines;
use crate::parser::{Parser, ParserError};
use flate2::read::GzDecoder;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error during file processing or dispatch
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Output serialization mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Per-label token sequences as an indented JSON object
    Json,
    /// One lowercased space-joined sentence per line, labeled ones only
    PlainText,
}

impl OutputFormat {
    /// Suffix replacing the input file's extension
    pub fn output_suffix(self) -> &'static str {
        match self {
            OutputFormat::Json => "_output.json",
            OutputFormat::PlainText => "_verbs.txt",
        }
    }
}

/// Aggregated token sequences for one input file (JSON mode)
///
/// Both keys are always present, possibly empty; sequences appear in
/// input line order within each label.
#[derive(Debug, Default, Serialize)]
pub struct LabelRecord {
    pub transitive: Vec<Vec<String>>,
    pub ditransitive: Vec<Vec<String>>,
}

impl LabelRecord {
    fn push(&mut self, label: Label, forms: Vec<String>) {
        match label {
            Label::Transitive => self.transitive.push(forms),
            Label::Ditransitive => self.ditransitive.push(forms),
        }
    }
}

/// One-line result of processing a single file
#[derive(Debug, Clone)]
pub struct FileSummary {
    pub file: String,
    pub format: OutputFormat,
    pub transitive: usize,
    pub ditransitive: usize,
    pub labeled: usize,
    pub skipped: usize,
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            OutputFormat::Json => write!(
                f,
                "{}: {} transitive, {} ditransitive. Skipped: {}",
                self.file, self.transitive, self.ditransitive, self.skipped
            ),
            OutputFormat::PlainText => write!(
                f,
                "{}: {} labeled (transitive/ditransitive). Skipped: {}",
                self.file, self.labeled, self.skipped
            ),
        }
    }
}

/// Process one input file, writing its output file alongside it
///
/// An empty or fully filtered input is not an error: it produces a
/// valid empty output file and a zero-count summary.
pub fn process_file<P: Parser>(
    parser: &mut P,
    path: &Path,
    max_words: Option<usize>,
    format: OutputFormat,
) -> Result<FileSummary, PipelineError> {
    let lines = read_lines(path)?;
    let (kept, skipped) = filter_lines(lines, max_words);
    let sentences = parser.parse_batch(&kept)?;
    log::debug!(
        "{}: parsed {} of {} lines",
        path.display(),
        sentences.len(),
        kept.len() + skipped
    );

    let mut record = LabelRecord::default();
    let mut flat = Vec::new();
    let mut transitive = 0;
    let mut ditransitive = 0;
    let mut labeled = 0;

    for sentence in &sentences {
        let labels = classify(sentence);
        if labels.is_empty() {
            continue;
        }
        labeled += 1;
        if labels.contains(&Label::Transitive) {
            transitive += 1;
        }
        if labels.contains(&Label::Ditransitive) {
            ditransitive += 1;
        }

        let forms = sentence.lowercased_forms();
        match format {
            OutputFormat::Json => {
                // a sentence with several verbs can land in both lists
                for label in [Label::Transitive, Label::Ditransitive] {
                    if labels.contains(&label) {
                        record.push(label, forms.clone());
                    }
                }
            }
            // both labels still mean one output line
            OutputFormat::PlainText => flat.push(forms.join(" ")),
        }
    }

    write_output(&output_path(path, format), format, &record, &flat)?;

    Ok(FileSummary {
        file: basename(path),
        format,
        transitive,
        ditransitive,
        labeled,
        skipped,
    })
}

/// Output path: `name.ext` maps to `name_output.json` / `name_verbs.txt`
/// in the same folder
pub fn output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, format.output_suffix()))
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read all lines of a UTF-8 input file, decompressing `.gz` inputs
fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    reader.lines().collect()
}

fn write_output(
    path: &Path,
    format: OutputFormat,
    record: &LabelRecord,
    flat: &[String],
) -> Result<(), PipelineError> {
    let mut out = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Json => serde_json::to_writer_pretty(&mut out, record)?,
        OutputFormat::PlainText => {
            // trailing newline only when there is at least one line
            for line in flat {
                writeln!(out, "{}", line)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
