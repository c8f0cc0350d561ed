use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use env_logger::Env;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::{Order, Request, WindowPolicy, Workspace};

/// Create text based on Markov chains
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// File containing the learning corpus, inside the source directory
	file: String,

	/// Markov chain order <1, 5>
	#[arg(value_parser = clap::value_parser!(u8).range(Order::MIN as i64..=Order::MAX as i64))]
	order: u8,

	/// Number of words in the output file
	#[arg(allow_negative_numbers = true)]
	n_words: i64,

	/// Seed the random generator for a reproducible run
	#[arg(long, value_name = "N")]
	seed: Option<u64>,

	/// Rolling window used while generating
	#[arg(long, value_enum, default_value_t = Window::Pair)]
	window: Window,

	/// Directory holding corpus files
	#[arg(long, value_name = "DIR", default_value = "Source")]
	source_dir: PathBuf,

	/// Directory holding cached tables
	#[arg(long, value_name = "DIR", default_value = "Table")]
	table_dir: PathBuf,

	/// Directory receiving generated texts
	#[arg(long, value_name = "DIR", default_value = "Output")]
	output_dir: PathBuf,

	/// Increase verbosity (-v, -vv)
	#[arg(short = 'v', long, action = ArgAction::Count)]
	verbose: u8,

	/// Decrease verbosity (-q, -qq)
	#[arg(short = 'q', long, action = ArgAction::Count)]
	quiet: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Window {
	/// Always track two words, whatever the order
	Pair,
	/// Track as many words as the order
	Order,
}

impl From<Window> for WindowPolicy {
	fn from(window: Window) -> Self {
		match window {
			Window::Pair => WindowPolicy::Pair,
			Window::Order => WindowPolicy::Order,
		}
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	let workspace = Workspace::default()
		.with_source_dir(&cli.source_dir)
		.with_table_dir(&cli.table_dir)
		.with_output_dir(&cli.output_dir);

	let request = Request {
		file: cli.file.clone(),
		order: Order::new(usize::from(cli.order))?,
		n_words: cli.n_words,
		window: cli.window.into(),
	};

	let mut rng = match cli.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_rng(&mut rand::rng()),
	};

	let report = workspace
		.run(&request, &mut rng, chrono::Local::now().naive_local())
		.with_context(|| format!("unable to generate text from {} at order {}", request.file, request.order))?;

	info!(
		"{} table {}, seed {:?}, {} words written to {}",
		if report.table_cached { "Reused" } else { "Built" },
		report.table_path.display(),
		report.seed,
		report.chain.len(),
		report.output_path.display()
	);

	Ok(())
}

fn init_logging(verbose: u8, quiet: u8) {
	use log::LevelFilter;

	let level = if quiet > 0 {
		match quiet {
			1 => LevelFilter::Warn,
			_ => LevelFilter::Error,
		}
	} else {
		match verbose {
			0 => LevelFilter::Info,
			1 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		}
	};

	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
	builder.format_timestamp_millis();
	builder.filter_level(level);
	let _ = builder.try_init();
}
