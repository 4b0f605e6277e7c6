//! Times word lookups in a plain list against lookups in a [`Tree`] built three ways: by adding
//! the words in file order, by adding randomly chosen words, and by rebalancing the latter.

use std::fs;
use std::hint::black_box;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use linked_bst::Tree;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "bst-demo")]
#[command(about = "Compare list and binary search tree lookups over a word list.", long_about = None)]
struct Cli {
    /// Newline-delimited word list. Sorted lists make the unbalanced tree degenerate.
    path: PathBuf,
    /// Number of random words to look up (and to build the random tree from).
    #[arg(long, default_value_t = 10_000)]
    tries: usize,
    /// Seed for choosing words. If omitted, one is taken from the OS.
    #[arg(long)]
    seed: Option<u64>,
}

/// Total time spent on the same batch of lookups in each structure.
#[derive(Debug)]
struct LookupTimings {
    list: Duration,
    alphabetical: Duration,
    random: Duration,
    balanced: Duration,
}

fn timed<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

fn find_all(tree: &Tree<&str>, words: &[&str]) -> Duration {
    timed(|| {
        for word in words {
            black_box(tree.find(word));
        }
    })
    .1
}

fn run(cli: &Cli) -> Result<LookupTimings> {
    let (contents, time_read) = timed(|| fs::read_to_string(&cli.path));
    let contents =
        contents.with_context(|| format!("failed to read word list {}", cli.path.display()))?;
    let dictionary: Vec<&str> = contents.lines().collect();
    ensure!(
        !dictionary.is_empty(),
        "word list {} is empty",
        cli.path.display()
    );
    println!("Time to read file: {time_read:?}");
    info!(words = dictionary.len(), tries = cli.tries, "loaded word list");

    let mut rng = cli
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let random_words: Vec<&str> = (0..cli.tries)
        .filter_map(|_| dictionary.choose(&mut rng).copied())
        .collect();

    let mut tree = Tree::new();
    let ((), time_create) = timed(|| tree.extend(dictionary.iter().copied()));
    println!("Time to create bst: {time_create:?}");
    info!(len = tree.len(), height = tree.height(), "built tree in file order");

    let ((), list) = timed(|| {
        for word in &random_words {
            black_box(dictionary.iter().position(|w| w == word));
        }
    });
    println!("Time for find in list: {list:?}");

    let alphabetical = find_all(&tree, &random_words);
    println!("Time for find in bst alphabetically: {alphabetical:?}");

    tree.clear();
    let ((), time_create) = timed(|| {
        for _ in 0..cli.tries {
            if let Some(word) = dictionary.choose(&mut rng) {
                tree.add(*word);
            }
        }
    });
    println!("Time to create bst random: {time_create:?}");
    info!(len = tree.len(), height = tree.height(), "built tree from random words");

    let random = find_all(&tree, &random_words);
    println!("Time for find in bst random: {random:?}");

    let ((), time_rebalance) = timed(|| tree.rebalance());
    println!("Time to rebalance bst: {time_rebalance:?}");
    info!(
        height = tree.height(),
        balanced = tree.is_balanced(),
        "rebalanced tree"
    );

    let balanced = find_all(&tree, &random_words);
    println!("Time for find in bst balanced: {balanced:?}");

    Ok(LookupTimings {
        list,
        alphabetical,
        random,
        balanced,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let timings = run(&cli)?;
    info!(
        list = ?timings.list,
        alphabetical = ?timings.alphabetical,
        random = ?timings.random,
        balanced = ?timings.balanced,
        "lookup totals"
    );

    Ok(())
}
