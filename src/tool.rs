// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! CLI tool for running collision experiments and inspecting tables

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use collision_tables::{
    experiment::{CsvSink, Measurement, Runner, Sink, Summary},
    hash::DoubleHashSecondary,
    AnyHash, AnyTable, ExperimentConfig, HashFunction, HashKind, HashTable, Key, Strategy,
};
use humansize::{format_size, BINARY};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

macro_rules! die {
    ($fmt:literal, $($arg:tt)*) => {{
        eprintln!($fmt, $($arg)*);
        std::process::exit(1);
    }};

    ($msg:literal) => {{
        eprintln!($msg);
        std::process::exit(1);
    }};
}

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

pub fn init_tracing(quiet: bool, verbose: u8) -> (bool, LevelFilter) {
    let is_verbose = !quiet && verbose > 0;

    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // Bridge log crate macros to tracing (for library code that uses log::*)
    tracing_log::LogTracer::init().expect("Failed to set log tracer");

    let registry = Registry::default();

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("CTAB_LOG")
        .from_env_lossy();

    let subscriber = registry.with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing_panic::panic_hook(info);
        prev_hook(info); // daisy-chain to old panic hook
    }));

    (is_verbose, level_filter)
}

/// Hash function selectable from the command line, including the
/// double hashing step function
#[derive(Copy, Clone, Debug)]
enum HashArg {
    Primary(HashKind),
    Step,
}

impl std::str::FromStr for HashArg {
    type Err = collision_tables::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dh" => Ok(Self::Step),
            _ => s.parse().map(Self::Primary),
        }
    }
}

impl HashArg {
    fn build(self, m: u32) -> collision_tables::Result<AnyHash> {
        match self {
            Self::Primary(kind) => kind.build(m),
            Self::Step => Ok(DoubleHashSecondary::new(m)?.into()),
        }
    }
}

/// CLI tool for running collision experiments and inspecting tables
#[derive(Parser, Debug)]
#[command(name = "ctab")]
#[command(about = "CLI tool for running collision experiments and inspecting tables")]
struct ToolArgs {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: ToolCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ToolCommand {
    /// Run an experiment sweep and write the measurements as CSV
    Run {
        /// Only use the smallest table and dataset size
        #[arg(long)]
        quick: bool,

        /// Strategies to run (e.g. "chain,lin,double")
        #[arg(long, value_delimiter = ',')]
        tables: Option<Vec<Strategy>>,

        /// Table sizes (e.g. "200003,2000003")
        #[arg(long, value_delimiter = ',')]
        msizes: Option<Vec<u32>>,

        /// Dataset sizes (e.g. "100000,1000000")
        #[arg(long, value_delimiter = ',')]
        nsizes: Option<Vec<usize>>,

        /// Primary hash functions (e.g. "mod,mul,mix,xxh3")
        #[arg(long, value_delimiter = ',')]
        hashes: Option<Vec<HashKind>>,

        /// Number of repetitions
        #[arg(long, default_value_t = 1)]
        repeats: usize,

        /// Dataset seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Path of the measurement CSV
        #[arg(short, long, default_value = "results/metrics.csv")]
        output: PathBuf,

        /// Also write aggregated statistics per combination to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },
    /// Print the slot index of keys
    Hash {
        /// Hash function (mod, mul, mix, xxh3, or dh for the double hashing step)
        function: HashArg,

        /// Table size
        m: u32,

        /// Keys to hash
        #[arg(allow_negative_numbers = true, required = true)]
        keys: Vec<Key>,
    },
    /// Insert keys into a single table and print its metrics
    Inspect {
        /// Collision resolution strategy (chain, lin, double)
        #[arg(short, long, default_value = "chain")]
        strategy: Strategy,

        /// Primary hash function (mod, mul, mix, xxh3)
        #[arg(long, default_value = "mod")]
        hash: HashKind,

        /// Table size
        #[arg(short)]
        m: u32,

        /// Keys to insert
        #[arg(allow_negative_numbers = true)]
        keys: Vec<Key>,
    },
}

fn create_file(path: &Path) -> io::Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    File::create(path).map(BufWriter::new)
}

/// Counts measurements passing through
struct Counted<S>(S, usize);

impl<S: Sink> Sink for Counted<S> {
    fn record(&mut self, measurement: &Measurement) -> collision_tables::Result<()> {
        self.1 += 1;
        self.0.record(measurement)
    }

    fn finish(&mut self) -> collision_tables::Result<()> {
        self.0.finish()
    }
}

#[allow(clippy::too_many_arguments)]
fn run_experiment(
    quick: bool,
    tables: Option<Vec<Strategy>>,
    msizes: Option<Vec<u32>>,
    nsizes: Option<Vec<usize>>,
    hashes: Option<Vec<HashKind>>,
    repeats: usize,
    seed: u64,
    output: &Path,
    summary: Option<&Path>,
) -> collision_tables::Result<()> {
    let mut config = ExperimentConfig::new().repeats(repeats).seed(seed);

    if quick {
        config = config.quick();
    }
    if let Some(tables) = tables {
        config = config.strategies(tables);
    }
    if let Some(sizes) = msizes {
        config = config.table_sizes(sizes);
    }
    if let Some(sizes) = nsizes {
        config = config.data_sizes(sizes);
    }
    if let Some(hashes) = hashes {
        config = config.hashes(hashes);
    }

    debug!("experiment config: {config:?}");

    let csv = CsvSink::new(create_file(output)?)?;
    let mut sink = Counted((csv, Summary::new()), 0);

    let runs = Runner::new(config).run(&mut sink)?;

    let Counted((_, aggregate), count) = sink;

    if let Some(path) = summary {
        aggregate.write_csv(create_file(path)?)?;
        info!("wrote {} combinations to {}", aggregate.len(), path.display());
    }

    println!(
        "{runs} runs, {count} measurements written to {}",
        output.display()
    );

    Ok(())
}

fn print_hashes(function: HashArg, m: u32, keys: &[Key]) -> collision_tables::Result<()> {
    let hash = function.build(m)?;

    for &key in keys {
        println!("{key} -> {}", hash.index(key));
    }

    Ok(())
}

fn inspect(
    strategy: Strategy,
    hash: HashKind,
    m: u32,
    keys: &[Key],
) -> collision_tables::Result<()> {
    let mut table = AnyTable::build(strategy, hash, m, keys.len())?;

    for &key in keys {
        table.insert(key)?;
    }

    let mut stdout = io::stdout().lock();
    let gaps = table.gap_stats();
    let [top1, top2, top3] = table.top_chain_lengths();

    writeln!(stdout, "table: {strategy} ({hash}), m={m}")?;
    writeln!(stdout, "keys: {}", table.len())?;
    writeln!(stdout, "collisions: {}", table.collisions())?;
    writeln!(stdout, "occupied: {}", table.occupied_slots())?;
    if strategy == Strategy::Chaining {
        writeln!(stdout, "top chains: {top1} {top2} {top3}")?;
    }
    writeln!(
        stdout,
        "gaps: min={} avg={:?} max={}",
        gaps.min, gaps.avg, gaps.max
    )?;
    writeln!(
        stdout,
        "memory: {}",
        format_size(table.memory_bytes(), BINARY)
    )?;

    Ok(())
}

fn main() {
    let args = ToolArgs::parse();
    let (verbose, level_filter) = init_tracing(args.quiet, args.verbose);

    let cmd = ToolArgs::command();

    info!(
        "starting {} ({} {}), log level: {level_filter}",
        cmd.get_name(),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let result = match args.command {
        ToolCommand::Run {
            quick,
            tables,
            msizes,
            nsizes,
            hashes,
            repeats,
            seed,
            output,
            summary,
        } => run_experiment(
            quick,
            tables,
            msizes,
            nsizes,
            hashes,
            repeats,
            seed,
            &output,
            summary.as_deref(),
        ),
        ToolCommand::Hash { function, m, keys } => print_hashes(function, m, &keys),
        ToolCommand::Inspect {
            strategy,
            hash,
            m,
            keys,
        } => inspect(strategy, hash, m, &keys),
    };

    if let Err(e) = result {
        let note = if verbose {
            ""
        } else {
            ". Note: Use -v (one or multiple times) for more information"
        };
        die!("Error: {}{}", e, note);
    }
}
