use super::{input, io};
use crate::{canon, extractor::ReadOptions, filter};

/// `optimize [file]`: canonicalize a prefix list (spec.md §4.3).
#[derive(clap::Args, Debug)]
pub struct Args {
  #[arg(help = "Input file (else stdin)")]
  file: Option<String>,
  #[arg(long = "ipv4-only")]
  ipv4_only: bool,
  #[arg(long = "ipv6-only")]
  ipv6_only: bool,
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

  let options = filter::Options {
    ipv4_only: args.ipv4_only,
    ipv6_only: args.ipv6_only,
    ..filter::Options::default()
  };

  if args.keep_comments {
    let annotated = input::read_annotated(args.file.as_deref(), &ReadOptions::default().limits)?;
    let before = annotated.len();
    let annotated: Vec<_> = annotated
      .into_iter()
      .filter(|entry| !options.excludes(&entry.prefix))
      .collect();
    let annotated = canon::dedup_sort_annotated(annotated);
    log::info!("{before} prefixes -> {} prefixes", annotated.len());
    io::write_annotated(args.output.output.as_deref(), &annotated)
  } else {
    let prefixes = input::read_plain(args.file.as_deref(), &ReadOptions::default())?;
    let before = prefixes.len();
    let filtered: Vec<_> = filter::apply(options, prefixes.into_iter()).collect();
    let canonical = canon::canonicalize(filtered);
    log::info!("{before} prefixes -> {} prefixes", canonical.len());
    io::write_prefixes(args.output.output.as_deref(), args.output.format, &canonical)
  }
}
