//! Fixture generator.
//!
//! Reads a whitespace-separated word list and writes two command scripts:
//! `outfile` (inserts followed by a print) and `queries` (one query per
//! insert). With `--seed`, words are drawn from a built-in vocabulary
//! instead of read from a file.

use std::path::PathBuf;

use clap::Parser;
use imagedb::fixtures::{
    DEFAULT_VOCABULARY, FixtureError, INSERTS_FILE, QUERIES_FILE, random_words, read_words,
    write_scripts,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "produce", about = "Generate insert and query scripts for imagedb")]
struct Args {
    /// Whitespace-separated word list, three words per image.
    #[arg(default_value = "random")]
    words_file: PathBuf,

    /// Generate the words from this seed instead of reading `words_file`.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of words to generate with `--seed`.
    #[arg(long, default_value_t = 300)]
    count: usize,

    /// Directory the scripts are written to.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

fn run(args: &Args) -> Result<(), FixtureError> {
    let words = match args.seed {
        Some(seed) => random_words(seed, args.count, &DEFAULT_VOCABULARY),
        None => read_words(&args.words_file)?,
    };

    write_scripts(&args.out, &words)?;

    tracing::info!(
        "Wrote {} and {} to {} from {} words",
        INSERTS_FILE,
        QUERIES_FILE,
        args.out.display(),
        words.len()
    );
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "produce=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
