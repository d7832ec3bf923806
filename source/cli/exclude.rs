use super::{input, io};
use crate::{extractor, extractor::ReadOptions, prefix::Prefix, setops};
use anyhow::Context as _;
use std::path::Path;

/// `exclude target file`: subtract `target` (a path to a prefix list, or a
/// single inline prefix when it doesn't name an existing file) from `file`
/// (spec.md §4.4/§6), or from stdin when `file` is omitted.
#[derive(clap::Args, Debug)]
pub struct Args {
  #[arg(help = "Prefix to remove, or a path to a file listing prefixes to remove")]
  target: String,
  #[arg(help = "Input file (else stdin)")]
  file: Option<String>,
  #[clap(flatten)]
  output: io::OutputArgs,
}

pub fn run(args: &Args) -> anyhow::Result<()> {
  let options = ReadOptions::default();

  let excludes = if Path::new(&args.target).is_file() {
    extractor::read_path(Path::new(&args.target), &options)
      .with_context(|| format!("reading {:?}", args.target))?
  } else {
    // A parse failure of this explicit target argument is fatal, unlike
    // the line-level tolerance the extractor gives everything else
    // (spec.md §7).
    let prefix: Prefix = args
      .target
      .parse()
      .with_context(|| format!("{:?} is not a valid prefix and not an existing file", args.target))?;
    vec![prefix]
  };

  let source = input::read_plain(args.file.as_deref(), &options)?;

  let result = setops::subtract(source, excludes)?;
  io::write_prefixes(args.output.output.as_deref(), args.output.format, &result)
}
