//! xhash CLI
//!
//! A command-line tool for computing and inspecting chained proof-of-work hashes.
//!
//! # Commands
//!
//! - `list` - Show every variant and whether the bundled primitives cover it
//! - `hash` - Hash a message with one variant
//! - `trace` - Show every intermediate digest of one hash
//! - `benchmark` - Run performance benchmark

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use xhash::algorithm::OUTPUT_SIZE;
use xhash::{Hash256, Hasher, SelectorContext, Variant};

#[derive(Parser)]
#[command(name = "xhash")]
#[command(version = "0.1.0")]
#[command(about = "Chained 512-bit proof-of-work hashes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log chain construction and every step (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known variants
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Hash a message
    Hash {
        #[command(flatten)]
        input: HashInput,

        /// Print JSON instead of plain hex
        #[arg(long)]
        json: bool,
    },

    /// Show the primitive and digest of every chain step
    Trace {
        #[command(flatten)]
        input: HashInput,
    },

    /// Run performance benchmark
    Benchmark {
        /// Variant to benchmark
        #[arg(long, default_value = "NIST5")]
        variant: String,

        /// Number of hashes to compute
        #[arg(short, long, default_value = "1000")]
        count: u32,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },
}

#[derive(Args)]
struct HashInput {
    /// Variant name (case-insensitive, e.g. x11, nist5, x16r)
    variant: String,

    /// Message as UTF-8 text
    #[arg(long, conflicts_with = "hex")]
    text: Option<String>,

    /// Message as hex
    #[arg(long)]
    hex: Option<String>,

    /// Previous block hash in display order (X16R)
    #[arg(long, conflicts_with = "timestamp")]
    reference: Option<String>,

    /// Block timestamp (TimeTravel)
    #[arg(long)]
    timestamp: Option<u32>,
}

impl HashInput {
    fn variant(&self) -> anyhow::Result<Variant> {
        Ok(self.variant.parse()?)
    }

    fn message(&self) -> anyhow::Result<Vec<u8>> {
        match (&self.text, &self.hex) {
            (Some(text), _) => Ok(text.as_bytes().to_vec()),
            (None, Some(hex_str)) => Ok(hex::decode(hex_str.trim())?),
            (None, None) => Ok(Vec::new()),
        }
    }

    fn context(&self) -> anyhow::Result<SelectorContext> {
        Ok(match (&self.reference, self.timestamp) {
            (Some(reference), _) => SelectorContext::Reference(reference.parse::<Hash256>()?),
            (None, Some(timestamp)) => SelectorContext::Timestamp(timestamp),
            (None, None) => SelectorContext::None,
        })
    }
}

#[derive(Serialize)]
struct VariantInfo {
    name: &'static str,
    steps: usize,
    selection: &'static str,
    link_bytes: usize,
    finalizer: &'static str,
    context: Option<&'static str>,
    bundled: bool,
}

#[derive(Serialize)]
struct HashOutput {
    variant: &'static str,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<u32>,
    schedule: Vec<&'static str>,
    digest: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::List { json } => cmd_list(json),
        Commands::Hash { input, json } => cmd_hash(&input, json),
        Commands::Trace { input } => cmd_trace(&input),
        Commands::Benchmark {
            variant,
            count,
            threads,
        } => cmd_benchmark(&variant, count, threads),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_list(json: bool) -> anyhow::Result<()> {
    let hasher = Hasher::bundled();
    let infos: Vec<VariantInfo> = Variant::ALL
        .into_iter()
        .map(|variant| {
            let chain = variant.chain();
            VariantInfo {
                name: variant.name(),
                steps: chain.len(),
                selection: chain.selection().kind(),
                link_bytes: chain.link_width().bytes(),
                finalizer: chain.finalizer().name(),
                context: variant.required_context(),
                bundled: hasher.check(variant).is_ok(),
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!(
        "{:<12} {:>5}  {:<12} {:>4}  {:<9} {:<8}",
        "VARIANT", "STEPS", "SELECTION", "LINK", "FINALIZER", "BUNDLED"
    );
    for info in &infos {
        println!(
            "{:<12} {:>5}  {:<12} {:>4}  {:<9} {:<8}",
            info.name,
            info.steps,
            info.selection,
            info.link_bytes,
            info.finalizer,
            if info.bundled { "yes" } else { "no" }
        );
    }
    Ok(())
}

fn cmd_hash(input: &HashInput, json: bool) -> anyhow::Result<()> {
    let variant = input.variant()?;
    let message = input.message()?;
    let context = input.context()?;

    let hasher = Hasher::bundled();
    hasher.check_with(variant, &context)?;
    let trace = hasher.trace(variant, &message, &context);
    tracing::debug!(%variant, steps = trace.len(), "hashed {} bytes", message.len());

    if json {
        let output = HashOutput {
            variant: variant.name(),
            input: hex::encode(&message),
            reference: match &context {
                SelectorContext::Reference(reference) => Some(reference.to_hex()),
                _ => None,
            },
            timestamp: match context {
                SelectorContext::Timestamp(timestamp) => Some(timestamp),
                _ => None,
            },
            schedule: trace.primitives().iter().map(|p| p.name()).collect(),
            digest: hex::encode(trace.output),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", hex::encode(trace.output));
    }
    Ok(())
}

fn cmd_trace(input: &HashInput) -> anyhow::Result<()> {
    let variant = input.variant()?;
    let message = input.message()?;
    let context = input.context()?;

    let hasher = Hasher::bundled();
    hasher.check_with(variant, &context)?;
    let chain = variant.chain();
    let trace = hasher.trace(variant, &message, &context);

    println!("Variant: {}", variant);
    println!("Input: {} bytes", message.len());
    for (i, step) in trace.steps.iter().enumerate() {
        println!("{:>3}  {:<12} {}", i, step.primitive.name(), hex::encode(step.slot));
    }
    println!("Output ({}): {}", chain.finalizer(), hex::encode(trace.output));
    Ok(())
}

fn cmd_benchmark(variant: &str, count: u32, threads: Option<usize>) -> anyhow::Result<()> {
    let variant: Variant = variant.parse()?;
    let context = match variant {
        Variant::X16r => SelectorContext::Reference(Hash256::ZERO),
        Variant::TimeTravel => SelectorContext::Timestamp(0),
        _ => SelectorContext::None,
    };

    let hasher = Hasher::bundled();
    hasher.check_with(variant, &context)?;

    let num_threads = thread_count(threads)?;
    println!("Running benchmark...");
    println!("Variant: {}", variant);
    println!("Threads: {}", num_threads);

    let per_thread = count.div_ceil(num_threads);
    let start = Instant::now();

    let total = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..num_threads)
            .map(|worker| {
                let hasher = &hasher;
                let context = &context;
                scope.spawn(move || {
                    let first = worker.saturating_mul(per_thread);
                    let last = count.min(first.saturating_add(per_thread));
                    let mut last_digest = [0u8; OUTPUT_SIZE];
                    for nonce in first..last {
                        let mut input = b"benchmark input data".to_vec();
                        input.extend_from_slice(&nonce.to_le_bytes());
                        last_digest = hasher.hash(variant, &input, context);
                    }
                    tracing::trace!(worker, digest = %hex::encode(last_digest), "worker done");
                    u64::from(last.saturating_sub(first))
                })
            })
            .collect();
        workers
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| {
                handle
                    .join()
                    .map_err(|_| anyhow::anyhow!("benchmark worker {worker} panicked"))
            })
            .sum::<anyhow::Result<u64>>()
    })?;

    let elapsed = start.elapsed();
    let hashrate = total as f64 / elapsed.as_secs_f64();

    println!();
    println!("Results:");
    println!("  Total hashes: {}", total);
    println!("  Time: {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate: {:.2} H/s", hashrate);
    Ok(())
}

/// Worker count: `--threads`, else one per CPU, never zero
fn thread_count(threads: Option<usize>) -> anyhow::Result<u32> {
    let threads = threads.unwrap_or_else(num_cpus::get).max(1);
    u32::try_from(threads).map_err(|_| anyhow::anyhow!("too many threads: {threads}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_parse_hash_text() {
        let cli = parse(&["xhash", "hash", "nist5", "--text", "test"]);
        let Commands::Hash { input, json } = cli.command else {
            panic!("expected hash command");
        };
        assert!(!json);
        assert_eq!(input.variant().unwrap(), Variant::Nist5);
        assert_eq!(input.message().unwrap(), b"test");
        assert_eq!(input.context().unwrap(), SelectorContext::None);
    }

    #[test]
    fn test_parse_hash_hex_with_reference() {
        let reference = format!("{}0123456789abcdef", "0".repeat(48));
        let cli = parse(&[
            "xhash",
            "hash",
            "x16r",
            "--hex",
            "deadbeef",
            "--reference",
            &reference,
            "--json",
        ]);
        let Commands::Hash { input, json } = cli.command else {
            panic!("expected hash command");
        };
        assert!(json);
        assert_eq!(input.message().unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(
            input.context().unwrap(),
            SelectorContext::Reference(reference.parse().unwrap())
        );
    }

    #[test]
    fn test_parse_trace_timestamp() {
        let cli = parse(&["xhash", "trace", "timetravel", "--timestamp", "1492973331"]);
        let Commands::Trace { input } = cli.command else {
            panic!("expected trace command");
        };
        assert_eq!(input.variant().unwrap(), Variant::TimeTravel);
        assert_eq!(input.message().unwrap(), Vec::<u8>::new());
        assert_eq!(
            input.context().unwrap(),
            SelectorContext::Timestamp(1492973331)
        );
    }

    #[test]
    fn test_text_and_hex_conflict() {
        assert!(Cli::try_parse_from(["xhash", "hash", "x11", "--text", "a", "--hex", "61"]).is_err());
    }

    #[test]
    fn test_reference_and_timestamp_conflict() {
        let reference = "0".repeat(64);
        assert!(Cli::try_parse_from([
            "xhash",
            "hash",
            "x16r",
            "--reference",
            reference.as_str(),
            "--timestamp",
            "1",
        ])
        .is_err());
    }

    #[test]
    fn test_unknown_variant() {
        let cli = parse(&["xhash", "hash", "x99"]);
        let Commands::Hash { input, .. } = cli.command else {
            panic!("expected hash command");
        };
        assert!(input.variant().is_err());
    }

    #[test]
    fn test_bad_hex_message() {
        let cli = parse(&["xhash", "trace", "nist5", "--hex", "xyz"]);
        let Commands::Trace { input } = cli.command else {
            panic!("expected trace command");
        };
        assert!(input.message().is_err());
    }

    #[test]
    fn test_benchmark_defaults() {
        let cli = parse(&["xhash", "-v", "benchmark"]);
        assert!(cli.verbose);
        let Commands::Benchmark {
            variant,
            count,
            threads,
        } = cli.command
        else {
            panic!("expected benchmark command");
        };
        assert_eq!(variant, "NIST5");
        assert_eq!(count, 1000);
        assert_eq!(threads, None);
    }

    #[test]
    fn test_thread_count() {
        assert_eq!(thread_count(Some(4)).unwrap(), 4);
        assert_eq!(thread_count(Some(0)).unwrap(), 1);
        assert!(thread_count(None).unwrap() >= 1);
        #[cfg(target_pointer_width = "64")]
        assert!(thread_count(Some(u32::MAX as usize + 1)).is_err());
    }

    #[test]
    fn test_list_json_flag() {
        let cli = parse(&["xhash", "list", "--json"]);
        assert!(matches!(cli.command, Commands::List { json: true }));
    }
}
