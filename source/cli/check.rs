use super::input;
use crate::{
  extractor::ReadOptions,
  prefix,
  splitter::{self, Target},
};
use anyhow::Context as _;

/// `check target file`: which source prefixes contain `target`, an address
/// or a prefix (spec.md §4.5/§6). A parse failure of `target` is fatal.
#[derive(clap::Args, Debug)]
pub struct Args {
  #[arg(help = "Address or prefix to look up")]
  target: String,
  #[arg(help = "Input file (else stdin)")]
  file: Option<String>,
}

/// Routes bare addresses through the same tolerant normalizer as the rest
/// of the toolkit (spec.md §4.1/§9), so a leading-zero address (`010.0.0.1`)
/// is accepted here too, not just when it appears in a source file.
fn parse_target(text: &str) -> anyhow::Result<Target> {
  let prefix = prefix::normalize(text)
    .ok_or_else(|| anyhow::anyhow!("{text:?} is not a valid address or prefix"))?;
  if text.contains('/') {
    Ok(Target::Prefix(prefix))
  } else {
    Ok(Target::Address(prefix.family(), prefix.base()))
  }
}

pub fn run(args: &Args) -> anyhow::Result<()> {
  let target = parse_target(&args.target).with_context(|| format!("parsing target {:?}", args.target))?;
  let source = input::read_plain(args.file.as_deref(), &ReadOptions::default())?;

  let mut any = false;
  for prefix in splitter::check(target, source.into_iter()) {
    println!("{prefix}");
    any = true;
  }
  anyhow::ensure!(any, "{:?} is not covered by any input prefix", args.target);
  Ok(())
}
