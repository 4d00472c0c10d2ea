//! Folder fan-out across a bounded worker pool
//!
//! Each file is processed to completion by exactly one worker, and each
//! pool thread owns its own parser instance, so the model-loading cost
//! is paid per worker rather than per file. There is no cross-file
//! shared mutable state; only within-file line order is guaranteed.

use crate::parser::{Parser, ParserError};
use crate::worker::{OutputFormat, PipelineError, process_file};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;

/// Process every regular file directly inside `folder`
///
/// `make_parser` is called once per pool thread. Per-file failures are
/// logged and skipped (the file simply produces no output and no
/// summary); folder listing and pool construction failures propagate.
/// Summaries for successful files go to stdout.
pub fn run_folder<P, F>(
    folder: &Path,
    max_words: Option<usize>,
    format: OutputFormat,
    make_parser: F,
) -> Result<(), PipelineError>
where
    P: Parser,
    F: Fn() -> Result<P, ParserError> + Send + Sync,
{
    let files = list_files(folder)?;
    if files.is_empty() {
        // rayon treats num_threads(0) as "use the default", so bail out
        // before building the pool
        log::info!("no files to process in {}", folder.display());
        return Ok(());
    }

    let parallelism = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    let workers = parallelism.min(files.len());
    log::debug!("dispatching {} files across {} workers", files.len(), workers);

    let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
    pool.install(|| {
        files.par_iter().for_each_init(
            || make_parser(),
            |parser, path| {
                let parser = match parser {
                    Ok(parser) => parser,
                    Err(e) => {
                        log::warn!("parser unavailable for {}: {}", path.display(), e);
                        return;
                    }
                };
                match process_file(parser, path, max_words, format) {
                    Ok(summary) => println!("{}", summary),
                    Err(e) => log::warn!("skipping {}: {}", path.display(), e),
                }
            },
        );
    });

    Ok(())
}

/// Regular files directly inside `folder`, sorted; subfolders are not
/// entered
fn list_files(folder: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
