use super::io;
use crate::{extractor, extractor::ReadOptions, setops};

/// The subset of a diff report a run prints (spec.md §4.4/§6). Default is
/// `changes` (added + removed only); a plain `stats`-style count from
/// `--summary` is cheaper to skim than the full report for a CI gate,
/// which is the only consumer spec.md §6 anticipates for this verb.
#[derive(Clone, Copy, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum Mode {
  Changes,
  Added,
  Removed,
  Unchanged,
  All,
}

/// `diff new_file old_file`: added/removed/unchanged between two canonical
/// prefix sets (spec.md §4.4/§6).
#[derive(clap::Args, Debug)]
pub struct Args {
  #[arg(help = "The new file")]
  new: String,
  #[arg(help = "The baseline file")]
  old: String,
  #[arg(long = "mode", value_enum, default_value = "changes")]
  mode: Mode,
  #[arg(long = "summary", help = "Print only the added/removed/unchanged counts")]
  summary: bool,
  #[arg(long = "ipv4-only")]
  ipv4_only: bool,
  #[arg(long = "ipv6-only")]
  ipv6_only: bool,
  #[clap(flatten)]
  output: io::OutputArgs,
}

fn retain(prefixes: &mut Vec<crate::prefix::Prefix>, ipv4_only: bool, ipv6_only: bool) {
  use crate::prefix::Family;
  if ipv4_only {
    prefixes.retain(|prefix| prefix.family() == Family::V4);
  }
  if ipv6_only {
    prefixes.retain(|prefix| prefix.family() == Family::V6);
  }
}

pub fn run(args: &Args) -> anyhow::Result<()> {
  let options = ReadOptions::default();
  let mut old = extractor::read_path(std::path::Path::new(&args.old), &options)
    .map_err(|error| anyhow::anyhow!(error).context(format!("reading {:?}", args.old)))?;
  let mut new = extractor::read_path(std::path::Path::new(&args.new), &options)
    .map_err(|error| anyhow::anyhow!(error).context(format!("reading {:?}", args.new)))?;
  retain(&mut old, args.ipv4_only, args.ipv6_only);
  retain(&mut new, args.ipv4_only, args.ipv6_only);

  let result = setops::diff(new, old)?;

  let (added, removed, unchanged): (&[_], &[_], &[_]) = match args.mode {
    Mode::Changes => (&result.added, &result.removed, &[]),
    Mode::Added => (&result.added, &[], &[]),
    Mode::Removed => (&[], &result.removed, &[]),
    Mode::Unchanged => (&[], &[], &result.unchanged),
    Mode::All => (&result.added, &result.removed, &result.unchanged),
  };

  if args.summary {
    let mut parts = Vec::new();
    if !matches!(args.mode, Mode::Removed | Mode::Unchanged) {
      parts.push(format!("+{}", added.len()));
    }
    if !matches!(args.mode, Mode::Added | Mode::Unchanged) {
      parts.push(format!("-{}", removed.len()));
    }
    if matches!(args.mode, Mode::Unchanged | Mode::All) {
      parts.push(format!("={}", unchanged.len()));
    }
    println!("{}", parts.join(" "));
    return Ok(());
  }

  io::write_diff_report(args.output.output.as_deref(), added, removed, unchanged)
}
