// Shared "get me a prefix stream from this verb's file argument" glue.
// File-format auto-detection itself lives in `extractor`; this just wires
// the "else stdin" half of spec.md §6's CLI surface, common to every verb.

use super::io;
use crate::{
  extractor::{self, Limits, ReadOptions},
  prefix::{Annotated, Prefix},
};
use anyhow::Context as _;
use std::path::Path;

/// Reads a plain (non-annotated) prefix stream from `file`, or stdin when
/// `file` is `None`. A named file gets the full per-extension dispatch
/// (csv/json/text); stdin is always treated as line-oriented text, since
/// there's no extension to sniff.
pub fn read_plain(file: Option<&str>, options: &ReadOptions) -> anyhow::Result<Vec<Prefix>> {
  match file {
    Some(path) => Ok(extractor::read_path(Path::new(path), options).with_context(|| format!("reading {path:?}"))?),
    None => {
      let text = io::read_input(None)?;
      Ok(extractor::read_text(&text, &options.limits)?)
    }
  }
}

/// Reads an annotated (keep-comments) prefix stream. Fatal if `file` names
/// a CSV or JSON file, which have no annotated mode (spec.md §3).
pub fn read_annotated(file: Option<&str>, limits: &Limits) -> anyhow::Result<Vec<Annotated>> {
  match file {
    Some(path) => {
      let path = Path::new(path);
      anyhow::ensure!(
        !extractor::is_structured(path),
        "--keep-comments only supports line-oriented text, not CSV/JSON input"
      );
      let text = extractor::read_text_file(path, limits)
        .with_context(|| format!("reading {path:?}"))?;
      Ok(extractor::read_text_annotated(&text, limits)?)
    }
    None => {
      let text = io::read_input(None)?;
      Ok(extractor::read_text_annotated(&text, limits)?)
    }
  }
}
