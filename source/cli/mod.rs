//! The CLI surface (spec.md §6): one `clap::Subcommand` variant per verb,
//! deliberately thin — each verb module wires the library's pipeline
//! layers together and does no set algebra of its own.

mod add;
mod check;
mod diff;
mod exclude;
mod filter_cmd;
mod intersect;
mod io;
mod input;
mod merge;
mod optimize;
mod split_cmd;
mod stats_cmd;

#[derive(clap::Parser, Debug)]
#[command(name = "cidrset", about = "Set algebra over CIDR prefix lists")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
  #[clap(flatten)]
  pub verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
  /// Canonicalize a prefix list: sort, remove nested, aggregate siblings.
  Optimize(optimize::Args),
  /// Add one prefix to a list and re-canonicalize.
  Add(add::Args),
  /// Drop prefixes matching a classification bundle (bogons, private, ...).
  Filter(filter_cmd::Args),
  /// Union two or more files into one canonicalized set.
  Merge(merge::Args),
  /// The canonical overlap of two prefix sets.
  Intersect(intersect::Args),
  /// Subtract a target prefix set from a file.
  Exclude(exclude::Args),
  /// Split a prefix (or every prefix in a file) into subnets.
  Split(split_cmd::Args),
  /// Added/removed/unchanged between two prefix sets.
  Diff(diff::Args),
  /// Per-family counts and covered-address totals.
  Stats(stats_cmd::Args),
  /// Which source prefixes contain a given address or prefix.
  Check(check::Args),
}

pub fn run(command: &Command) -> anyhow::Result<()> {
  match command {
    Command::Optimize(args) => optimize::run(args),
    Command::Add(args) => add::run(args),
    Command::Filter(args) => filter_cmd::run(args),
    Command::Merge(args) => merge::run(args),
    Command::Intersect(args) => intersect::run(args),
    Command::Exclude(args) => exclude::run(args),
    Command::Split(args) => split_cmd::run(args),
    Command::Diff(args) => diff::run(args),
    Command::Stats(args) => stats_cmd::run(args),
    Command::Check(args) => check::run(args),
  }
}
