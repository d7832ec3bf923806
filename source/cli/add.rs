use super::{input, io};
use crate::{canon, extractor::ReadOptions, prefix::Annotated, prefix::Prefix};
use anyhow::Context as _;

/// `add new_prefix file`: insert one prefix into a list and re-canonicalize.
#[derive(clap::Args, Debug)]
pub struct Args {
  #[arg(help = "Prefix to add")]
  new_prefix: String,
  #[arg(help = "Input file")]
  file: String,
  #[arg(long = "keep-comments")]
  keep_comments: bool,
  #[clap(flatten)]
  output: io::OutputArgs,
}

pub fn run(args: &Args) -> anyhow::Result<()> {
  anyhow::ensure!(
    !(args.keep_comments && args.output.format == io::Format::Csv),
    "--keep-comments is mutually exclusive with --format csv"
  );
  // A parse failure of this explicit target argument is fatal, unlike the
  // line-level tolerance the extractor gives everything else (spec.md §7).
  let new_prefix: Prefix = args
    .new_prefix
    .parse()
    .with_context(|| format!("{:?} is not a valid prefix", args.new_prefix))?;

  if args.keep_comments {
    let mut annotated = input::read_annotated(Some(&args.file), &ReadOptions::default().limits)?;
    annotated.push(Annotated::new(new_prefix, ""));
    let annotated = canon::dedup_sort_annotated(annotated);
    io::write_annotated(args.output.output.as_deref(), &annotated)
  } else {
    let mut prefixes = input::read_plain(Some(&args.file), &ReadOptions::default())?;
    prefixes.push(new_prefix);
    let canonical = canon::canonicalize(prefixes);
    io::write_prefixes(args.output.output.as_deref(), args.output.format, &canonical)
  }
}
