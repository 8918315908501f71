//! Batch enrichment CLI: load a JSON lexicon, analyze every entry, write the
//! enriched lexicon back, optionally print frequency statistics.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use panlex::rules::RuleTable;
use panlex::{lexicon, stats};

#[derive(Parser, Debug)]
#[command(
    name = "panlex",
    about = "Apply rule-based morphological analysis to a Pangasinan lexicon"
)]
struct Args {
    /// Input JSON lexicon.
    #[arg(short, long, default_value = "pangasinan_dictionary_combined.json")]
    input: PathBuf,

    /// Output enriched JSON file.
    #[arg(short, long, default_value = "pangasinan_with_morphology.json")]
    output: PathBuf,

    /// Print enrichment statistics after processing.
    #[arg(long)]
    stats: bool,

    /// Analyze entries on one thread instead of the rayon pool.
    #[arg(long)]
    sequential: bool,

    /// Verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    let table = RuleTable::pangasinan();

    let mut entries = lexicon::load(&args.input)
        .with_context(|| format!("failed to load lexicon from {}", args.input.display()))?;

    if args.sequential {
        lexicon::enrich(&mut entries, &table);
    } else {
        lexicon::enrich_parallel(&mut entries, &table);
    }

    lexicon::save(&args.output, &entries)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!(
        "Saved enriched lexicon ({} entries) to {}",
        entries.len(),
        args.output.display()
    );

    if args.stats {
        print!("{}", stats::collect(&entries));
    }

    Ok(())
}
