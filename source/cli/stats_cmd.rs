use super::input;
use crate::{extractor::ReadOptions, stats};

/// `stats [file] --details`: counts and covered-address totals, optionally
/// with the largest blocks listed (spec.md §6, supplemented from
/// `original_source/cli/stats.py`).
#[derive(clap::Args, Debug)]
pub struct Args {
  #[arg(help = "Input file (else stdin)")]
  file: Option<String>,
  #[arg(long = "details", help = "List the largest blocks")]
  details: bool,
  #[arg(long = "limit", default_value_t = 10, help = "How many blocks --details lists")]
  limit: usize,
}

pub fn run(args: &Args) -> anyhow::Result<()> {
  let prefixes = input::read_plain(args.file.as_deref(), &ReadOptions::default())?;
  let summary = stats::compute(&prefixes);

  println!("IPv4: {} prefixes, {} addresses", summary.v4_count, summary.v4_addresses);
  println!("IPv6: {} prefixes, {} addresses", summary.v6_count, summary.v6_addresses);

  if args.details {
    println!("Largest blocks:");
    for prefix in stats::largest_blocks(&prefixes, args.limit) {
      println!("  {prefix}");
    }
  }
  Ok(())
}
