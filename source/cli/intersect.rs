use super::io;
use crate::{extractor, setops};

/// `intersect file1 file2`: the canonical overlap of two prefix sets
/// (spec.md §4.4/§6).
#[derive(clap::Args, Debug)]
pub struct Args {
  file1: String,
  file2: String,
  #[clap(flatten)]
  output: io::OutputArgs,
}

pub fn run(args: &Args) -> anyhow::Result<()> {
  let options = extractor::ReadOptions::default();
  let a = extractor::read_path(std::path::Path::new(&args.file1), &options)
    .map_err(|error| anyhow::anyhow!(error).context(format!("reading {:?}", args.file1)))?;
  let b = extractor::read_path(std::path::Path::new(&args.file2), &options)
    .map_err(|error| anyhow::anyhow!(error).context(format!("reading {:?}", args.file2)))?;

  let result = setops::intersect(a, b);
  io::write_prefixes(args.output.output.as_deref(), args.output.format, &result)
}
