use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use iqtibas_lib::{
    output, tag, CorpusError, QuranIndex, QuranText, StopwordPolicy, TagOptions,
};

mod eval;

#[derive(Parser)]
#[command(name = "iqtibas", about = "Tag Quranic quotations in Arabic-script text")]
struct Cli {
    /// Tokenised words to tag, as a single JSON array. Reads stdin if omitted.
    infile: Option<PathBuf>,

    /// Tanzil Quran source: `sura|aya|text` plain text, or the XML edition
    /// when the file name ends in .xml.
    #[arg(long, value_name = "PATH")]
    quran: PathBuf,

    /// Minimum number of matched words to accept as a match.
    #[arg(long, default_value_t = 2)]
    min: usize,

    /// Suppress overlap warnings.
    #[arg(long)]
    quiet: bool,

    /// Gold annotations (JSON array of [start, end] input spans); prints an
    /// accuracy report after tagging.
    #[arg(long, value_name = "PATH")]
    gold: Option<PathBuf>,

    /// Allow one bounded gap of non-Quranic words inside a quotation.
    #[arg(long)]
    ellipsis: bool,

    /// Maximum gap width when --ellipsis is on.
    #[arg(long, default_value_t = 2)]
    window: usize,

    /// Stopword list used to reject match anchors: "internal" or "leeds".
    #[arg(long, default_value = "leeds")]
    stopwords: String,

    /// Print one sura:verse:word reference line per match instead of JSON.
    #[arg(long)]
    refs: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("iqtibas: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stopwords: StopwordPolicy = cli.stopwords.parse()?;

    let tokens: Vec<String> = match &cli.infile {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => serde_json::from_reader(io::stdin().lock())?,
    };

    let corpus = load_corpus(&cli.quran)?;
    let index = QuranIndex::build(&corpus);
    log::info!(
        "quran corpus loaded: {} words, {} distinct bigrams",
        index.word_count(),
        index.bigram_count()
    );

    let opts = TagOptions {
        min_blocks: cli.min,
        stopwords,
        ellipsis: cli.ellipsis,
        ellipsis_window: cli.window,
    };
    let tagging = tag(&tokens, &index, &opts)?;

    if !cli.quiet {
        for warning in &tagging.warnings {
            eprintln!("WARNING! {warning}");
        }
    }

    if cli.refs {
        for m in &tagging.matches {
            println!("{}", output::to_ref(m, &index));
        }
    } else {
        let quotes: Vec<_> = tagging
            .matches
            .iter()
            .map(|m| output::resolve(m, &index))
            .collect();
        let json = if cli.pretty {
            serde_json::to_string_pretty(&quotes)?
        } else {
            serde_json::to_string(&quotes)?
        };
        println!("{json}");
    }

    if let Some(gold_path) = &cli.gold {
        let report = eval::evaluate_file(gold_path, &tagging.matches)?;
        eprintln!("{report}");
    }

    Ok(())
}

/// Load the corpus, selecting the parser by file extension.
fn load_corpus(path: &Path) -> Result<QuranText, CorpusError> {
    if path.extension().is_some_and(|ext| ext == "xml") {
        let xml = std::fs::read_to_string(path)?;
        QuranText::from_tanzil_xml(&xml)
    } else {
        QuranText::from_tanzil_text(BufReader::new(File::open(path)?))
    }
}
