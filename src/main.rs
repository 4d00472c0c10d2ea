use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use valency::{CommandParser, OutputFormat, run_folder};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Label sentences by verb transitivity from dependency parses
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Folder of input text files, one sentence per line
    folder: PathBuf,

    /// Skip lines with more than this many whitespace-delimited words
    #[arg(long)]
    max_words: Option<usize>,

    /// Output format written next to each input file
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// UDPipe model file for the parser subprocess
    #[arg(long, default_value = "english-ewt.udpipe")]
    model: String,

    /// Full parser command to run instead of UDPipe; must read one
    /// sentence per stdin line and write CoNLL-U to stdout
    #[arg(long)]
    parser: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Text => OutputFormat::PlainText,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let format = args.format.into();

    let result = match &args.parser {
        Some(command) => {
            let words: Vec<String> = command.split_whitespace().map(str::to_string).collect();
            let Some((program, rest)) = words.split_first() else {
                eprintln!("error: --parser command is empty");
                return ExitCode::FAILURE;
            };
            run_folder(&args.folder, args.max_words, format, || {
                CommandParser::spawn(program, rest)
            })
        }
        None => run_folder(&args.folder, args.max_words, format, || {
            CommandParser::udpipe(&args.model)
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
