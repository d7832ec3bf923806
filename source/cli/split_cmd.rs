use super::{input, io};
use crate::{extractor::ReadOptions, prefix::Prefix, splitter};
use anyhow::Context as _;

/// `split target_length [prefix] --file FILE`: split one prefix (given
/// inline) or every prefix read from `--file`/stdin into subnets of
/// `target_length` (spec.md §4.5/§6).
#[derive(clap::Args, Debug)]
pub struct Args {
  #[arg(help = "Target prefix length to split down to")]
  target_length: u8,
  #[arg(help = "Prefix to split (else read from --file or stdin)")]
  prefix: Option<String>,
  #[arg(long = "file", help = "Input file (instead of an inline prefix)")]
  file: Option<String>,
  #[arg(long = "max-subnets", default_value_t = splitter::DEFAULT_MAX_SUBNETS)]
  max_subnets: u64,
  #[clap(flatten)]
  output: io::OutputArgs,
}

pub fn run(args: &Args) -> anyhow::Result<()> {
  let sources: Vec<Prefix> = match &args.prefix {
    Some(text) => {
      // Explicit inline target: a parse failure here is fatal (spec.md §7).
      let prefix: Prefix = text
        .parse()
        .with_context(|| format!("{text:?} is not a valid prefix"))?;
      vec![prefix]
    }
    None => input::read_plain(args.file.as_deref(), &ReadOptions::default())?,
  };

  let mut out = Vec::new();
  for prefix in &sources {
    out.extend(splitter::split(prefix, args.target_length, args.max_subnets)?);
  }
  io::write_prefixes(args.output.output.as_deref(), args.output.format, &out)
}
