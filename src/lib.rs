//! Valency: parallel verb-transitivity labeling for text corpora
//!
//! Labels each sentence in a folder of text files as transitive or
//! ditransitive from its dependency parse, writing one JSON or
//! plain-text output file per input file. Parsing is delegated to an
//! external CoNLL-U-speaking parser process; classification and the
//! file-level fan-out happen here.

pub mod classify; // Verb transitivity rules over dependency trees
pub mod conllu; // CoNLL-U parsing into Sentence structures
pub mod dispatch; // Folder fan-out across a worker pool
pub mod filter; // Line length filtering
pub mod parser; // External dependency parser integration
pub mod tree; // Dependency-tree data structures
pub mod worker; // Per-file processing pipeline

#[cfg(test)]
pub(crate) mod testutil;

// Re-exports for convenience
pub use classify::{Label, classify};
pub use conllu::{ParseError, SentenceReader};
pub use dispatch::run_folder;
pub use filter::filter_lines;
pub use parser::{CommandParser, Parser, ParserError};
pub use tree::{Sentence, Token, TokenId};
pub use worker::{FileSummary, OutputFormat, PipelineError, process_file};
