use super::{input, io};
use crate::{canon, extractor::ReadOptions, filter};

/// `filter [file]`: drop prefixes matching a classification bundle
/// (spec.md §4.2/§6). Output is re-canonicalized, same as `optimize`.
#[derive(clap::Args, Debug)]
pub struct Args {
  #[arg(help = "Input file (else stdin)")]
  file: Option<String>,
  #[arg(long = "bogons", help = "Shorthand for every --no-* flag")]
  bogons: bool,
  #[arg(long = "ipv4-only")]
  ipv4_only: bool,
  #[arg(long = "ipv6-only")]
  ipv6_only: bool,
  #[arg(long = "no-private")]
  exclude_private: bool,
  #[arg(long = "no-loopback")]
  exclude_loopback: bool,
  #[arg(long = "no-link-local")]
  exclude_link_local: bool,
  #[arg(long = "no-multicast")]
  exclude_multicast: bool,
  #[arg(long = "no-reserved")]
  exclude_reserved: bool,
  #[arg(long = "no-unspecified")]
  exclude_unspecified: bool,
  #[arg(long = "keep-comments")]
  keep_comments: bool,
  #[clap(flatten)]
  output: io::OutputArgs,
}

fn options(args: &Args) -> filter::Options {
  if args.bogons {
    return filter::Options {
      ipv4_only: args.ipv4_only,
      ipv6_only: args.ipv6_only,
      ..filter::Options::bogons()
    };
  }
  filter::Options {
    ipv4_only: args.ipv4_only,
    ipv6_only: args.ipv6_only,
    exclude_private: args.exclude_private,
    exclude_loopback: args.exclude_loopback,
    exclude_link_local: args.exclude_link_local,
    exclude_multicast: args.exclude_multicast,
    exclude_reserved: args.exclude_reserved,
    exclude_unspecified: args.exclude_unspecified,
  }
}

pub fn run(args: &Args) -> anyhow::Result<()> {
  anyhow::ensure!(
    !(args.keep_comments && args.output.format == io::Format::Csv),
    "--keep-comments is mutually exclusive with --format csv"
  );
  let options = options(args);

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
    let kept: Vec<_> = filter::apply(options, prefixes.into_iter()).collect();
    let canonical = canon::canonicalize(kept);
    log::info!("{before} prefixes -> {} prefixes", canonical.len());
    io::write_prefixes(args.output.output.as_deref(), args.output.format, &canonical)
  }
}
