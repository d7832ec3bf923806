use super::io;
use crate::{canon, extractor};

/// `merge file1 file2 [files...]`: union an arbitrary number of files into
/// one canonicalized set. spec.md §6 names only two files; the original's
/// `cli/merge.py` accepts any number, a strict superset this crate carries
/// forward (SPEC_FULL.md).
#[derive(clap::Args, Debug)]
pub struct Args {
  #[arg(required = true, num_args = 2.., help = "Files to merge (at least two)")]
  files: Vec<String>,
  #[arg(long = "ipv4-only")]
  ipv4_only: bool,
  #[arg(long = "ipv6-only")]
  ipv6_only: bool,
  #[clap(flatten)]
  output: io::OutputArgs,
}

pub fn run(args: &Args) -> anyhow::Result<()> {
  let options = extractor::ReadOptions::default();
  let mut merged = Vec::new();
  for file in &args.files {
    let prefixes = extractor::read_path(std::path::Path::new(file), &options)
      .map_err(|error| anyhow::anyhow!(error).context(format!("reading {file:?}")))?;
    merged.extend(prefixes);
  }

  if args.ipv4_only {
    merged.retain(|prefix| prefix.family() == crate::prefix::Family::V4);
  }
  if args.ipv6_only {
    merged.retain(|prefix| prefix.family() == crate::prefix::Family::V6);
  }

  let before = merged.len();
  let canonical = canon::canonicalize(merged);
  log::info!("{before} prefixes -> {} prefixes", canonical.len());
  io::write_prefixes(args.output.output.as_deref(), args.output.format, &canonical)
}
