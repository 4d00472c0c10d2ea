//! Line length filtering
//!
//! Corpus files can contain very long sentences that dominate parse
//! time; the optional word-count ceiling drops them up front.

/// Partition raw input lines into kept lines and a skipped count
///
/// Lines are whitespace-trimmed first; blank lines are dropped outright
/// and never counted as skipped. With `max_words` set, a line is kept
/// iff its whitespace-delimited word count is at most the limit, so
/// kept + skipped equals the number of non-blank lines. Input order is
/// preserved.
pub fn filter_lines<I, S>(lines: I, max_words: Option<usize>) -> (Vec<String>, usize)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut kept = Vec::new();
    let mut skipped = 0;

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        match max_words {
            Some(limit) if line.split_whitespace().count() > limit => skipped += 1,
            _ => kept.push(line.to_string()),
        }
    }

    (kept, skipped)
}
