// Thin output helpers shared by every verb (spec.md §6's output formats).
// Rendering beyond this — tables, colors, progress bars — is explicitly
// out of scope (spec.md §1).

use crate::prefix::{Annotated, Prefix};
use anyhow::Context as _;
use std::fs;

#[derive(Clone, Copy, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum Format {
  List,
  Csv,
}

/// `-o PATH` / `--format list|csv`, flattened into every verb that
/// produces a prefix list (spec.md §6).
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
  #[arg(short = 'o', long = "output", help = "Write to this file instead of stdout")]
  pub output: Option<String>,
  #[arg(long = "format", value_enum, default_value = "list", help = "Output format")]
  pub format: Format,
}

fn write_out(output: Option<&str>, body: &str) -> anyhow::Result<()> {
  match output {
    Some(path) => {
      fs::write(path, body).with_context(|| format!("couldn't write {path:?}"))?;
    }
    None => {
      print!("{body}");
    }
  }
  Ok(())
}

/// Renders a prefix set as `list` (one per line) or `csv` (comma-separated,
/// single line, no trailing blank line).
pub fn write_prefixes(output: Option<&str>, format: Format, prefixes: &[Prefix]) -> anyhow::Result<()> {
  let body = match format {
    Format::List => prefixes
      .iter()
      .map(|prefix| format!("{prefix}\n"))
      .collect::<String>(),
    Format::Csv => {
      let joined = prefixes
        .iter()
        .map(Prefix::to_string)
        .collect::<Vec<_>>()
        .join(",");
      format!("{joined}\n")
    }
  };
  write_out(output, &body)
}

/// Renders an annotated prefix set (`--keep-comments`), one `prefix #
/// comment` per line.
pub fn write_annotated(output: Option<&str>, annotated: &[Annotated]) -> anyhow::Result<()> {
  let body = annotated
    .iter()
    .map(|entry| {
      if entry.comment.is_empty() {
        format!("{}\n", entry.prefix)
      } else {
        format!("{} {}\n", entry.prefix, entry.comment)
      }
    })
    .collect::<String>();
  write_out(output, &body)
}

/// The diff report format (spec.md §6): one prefix per line prefixed by
/// `+ `, `- `, or `= `.
pub fn write_diff_report(
  output: Option<&str>,
  added: &[Prefix],
  removed: &[Prefix],
  unchanged: &[Prefix],
) -> anyhow::Result<()> {
  let mut body = String::new();
  for prefix in added {
    body += &format!("+ {prefix}\n");
  }
  for prefix in removed {
    body += &format!("- {prefix}\n");
  }
  for prefix in unchanged {
    body += &format!("= {prefix}\n");
  }
  write_out(output, &body)
}

/// Reads from a named file, or from stdin when `file` is `None`.
pub fn read_input(file: Option<&str>) -> anyhow::Result<String> {
  match file {
    Some(path) => fs::read_to_string(path).with_context(|| format!("couldn't read {path:?}")),
    None => {
      let mut buffer = String::new();
      std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
        .with_context(|| "couldn't read stdin")?;
      Ok(buffer)
    }
  }
}
