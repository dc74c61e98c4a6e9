use anyhow::Context;
use clap::Parser;
use clvm::{node_to_bytes, run_serialized, Config, Reduction};
use futures::executor::block_on;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Evaluate a serialized program against a serialized environment and print
/// its cost and result.
#[derive(Parser, Debug)]
#[clap(name = "clvm-run", version, about)]
struct Args {
	/// Hex encoded program.
	program: String,
	/// Hex encoded environment.
	#[clap(default_value = "80")]
	env: String,
	/// Cost budget of the run. Unbounded if omitted.
	#[clap(short, long)]
	max_cost: Option<u64>,
	/// Use the block cost limit of the main network unless `--max-cost` is
	/// given.
	#[clap(long)]
	mainnet: bool,
	/// Fail on operators outside the operator table.
	#[clap(short, long)]
	strict: bool,
	/// Sets the level of debugging information.
	#[clap(short, long, parse(from_occurrences))]
	verbose: usize,
}

fn init_logging(verbose: usize) -> anyhow::Result<()> {
	let level = match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};
	let stderr = ConsoleAppender::builder()
		.target(Target::Stderr)
		.encoder(Box::new(PatternEncoder::new("{l} {t} - {m}{n}")))
		.build();
	let config = LogConfig::builder()
		.appender(Appender::builder().build("stderr", Box::new(stderr)))
		.build(Root::builder().appender("stderr").build(level))?;
	log4rs::init_config(config)?;
	Ok(())
}

fn decode_hex(name: &str, input: &str) -> anyhow::Result<Vec<u8>> {
	let input = input.trim();
	let input = input.strip_prefix("0x").unwrap_or(input);
	hex::decode(input).with_context(|| format!("{} is not valid hex", name))
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();
	init_logging(args.verbose)?;

	block_on(clvm::bls::initialize()).context("cannot initialize BLS12-381")?;

	let base = if args.mainnet {
		Config::mainnet()
	} else {
		Config::new()
	};
	let config = match args.max_cost {
		Some(max_cost) => base.with_max_cost(Some(max_cost)),
		None => base,
	}
	.with_strict(args.strict);

	let program = decode_hex("program", &args.program)?;
	let env = decode_hex("env", &args.env)?;

	let Reduction(cost, result) = run_serialized(&config, &program, &env)?;
	log::info!(target: "clvm", "cost used: {}", cost);

	println!("cost = {}", cost);
	println!("{}", hex::encode(node_to_bytes(&result)?));
	Ok(())
}
