// L1 extractor (spec.md §4.1): turns arbitrary text/bytes/files into a
// clean prefix stream, tolerating garbage between tokens and defusing the
// octal-leading-zero misparse class (the normalizer itself lives in
// `prefix::normalize`).

use crate::{
  error::Error,
  prefix::{self, Annotated, Prefix},
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs, path::Path};

/// Hard limits enforced as counters inside the reader (spec.md §4.1): any
/// breach is fatal, not a partial success.
#[derive(Clone, Copy, Debug)]
pub struct Limits {
  pub max_file_bytes: u64,
  pub max_lines: u64,
  pub max_json_items: u64,
}

impl Default for Limits {
  fn default() -> Self {
    Self {
      max_file_bytes: 700 * 1024 * 1024,
      max_lines: 8_000_000,
      max_json_items: 8_000_000,
    }
  }
}

/// Column/key defaults and limits for a read, bundled so every verb
/// doesn't have to thread them through individually.
#[derive(Clone, Debug)]
pub struct ReadOptions {
  pub csv_column: String,
  pub json_key: String,
  pub limits: Limits,
}

impl Default for ReadOptions {
  fn default() -> Self {
    Self {
      csv_column: "prefix".to_string(),
      json_key: "prefixes".to_string(),
      limits: Limits::default(),
    }
  }
}

static IPV4_CANDIDATE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?:\d{1,3}\.){3}\d{1,3}(?:/\d{1,2})?").unwrap());

static IPV6_CANDIDATE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?:[0-9a-fA-F]{0,4}:){2,7}[0-9a-fA-F]{0,4}(?:/\d{1,3})?").unwrap());

/// Extracts every IPv4/IPv6-looking substring from `text` and normalizes
/// each into a `Prefix`, discarding whatever doesn't parse. Falls back to
/// treating the whole (trimmed) text as one candidate when neither regex
/// matches anything (spec.md §4.1 step 5).
fn extract_from_text(text: &str) -> Vec<Prefix> {
  let mut found = Vec::new();
  for candidate in IPV4_CANDIDATE.find_iter(text) {
    if let Some(prefix) = prefix::normalize(candidate.as_str()) {
      found.push(prefix);
    }
  }
  for candidate in IPV6_CANDIDATE.find_iter(text) {
    if let Some(prefix) = prefix::normalize(candidate.as_str()) {
      found.push(prefix);
    }
  }
  if found.is_empty() {
    if let Some(prefix) = prefix::normalize(text.trim()) {
      found.push(prefix);
    }
  }
  found
}

fn strip_comment(line: &str) -> &str {
  line.trim().starts_with('#').then_some("").unwrap_or(line)
}

/// Line-oriented text reading (spec.md §4.1): strips whitespace, drops
/// empty/full-line-comment lines, and extracts every prefix from what's
/// left. Per-line parse failures are silently discarded; the pipeline
/// continues (spec.md §7).
pub fn read_text(text: &str, limits: &Limits) -> Result<Vec<Prefix>, Error> {
  let mut out = Vec::new();
  for (line_number, line) in text.lines().enumerate() {
    if line_number as u64 + 1 > limits.max_lines {
      return Err(Error::LimitExceeded(format!(
        "input exceeds the {}-line safety limit",
        limits.max_lines
      )));
    }
    let line = strip_comment(line);
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }
    out.extend(extract_from_text(trimmed));
  }
  Ok(out)
}

/// The "keep-comments" variant of line-oriented reading (spec.md §3/§4.1):
/// splits each line at the first `#`, extracts prefixes from the left
/// part, and pairs every prefix extracted from that line with the
/// trimmed, `"# "`-prefixed right part (empty if the trimmed remainder is
/// empty).
pub fn read_text_annotated(text: &str, limits: &Limits) -> Result<Vec<Annotated>, Error> {
  let mut out = Vec::new();
  for (line_number, line) in text.lines().enumerate() {
    if line_number as u64 + 1 > limits.max_lines {
      return Err(Error::LimitExceeded(format!(
        "input exceeds the {}-line safety limit",
        limits.max_lines
      )));
    }
    if line.trim().is_empty() {
      continue;
    }
    let (content, comment) = match memchr::memchr(b'#', line.as_bytes()) {
      Some(index) => {
        let remainder = line[index + 1..].trim();
        let comment = if remainder.is_empty() {
          String::new()
        } else {
          format!("# {remainder}")
        };
        (&line[..index], comment)
      }
      None => (line, String::new()),
    };
    for prefix in extract_from_text(content.trim()) {
      out.push(Annotated::new(prefix, comment.clone()));
    }
  }
  Ok(out)
}

fn decode_lossy(bytes: Vec<u8>) -> String {
  encoding_rs::UTF_8.decode_without_bom_handling(&bytes).0.into_owned()
}

fn read_file_checked(path: &Path, limits: &Limits) -> Result<Vec<u8>, Error> {
  let metadata = fs::metadata(path)
    .map_err(|error| Error::IOFailure(format!("couldn't stat {path:?}: {error}")))?;
  if metadata.len() > limits.max_file_bytes {
    return Err(Error::LimitExceeded(format!(
      "{path:?} is {} bytes, above the {}-byte safety limit",
      metadata.len(),
      limits.max_file_bytes
    )));
  }
  fs::read(path).map_err(|error| Error::IOFailure(format!("couldn't read {path:?}: {error}")))
}

/// CSV reading (spec.md §6): a header row with at least the configured
/// column (default `prefix`).
fn read_csv(path: &Path, column: &str, limits: &Limits) -> Result<Vec<Prefix>, Error> {
  let bytes = read_file_checked(path, limits)?;
  let text = decode_lossy(bytes);
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .from_reader(text.as_bytes());
  let headers = reader
    .headers()
    .map_err(|error| Error::InvalidInput(format!("couldn't read CSV headers: {error}")))?
    .clone();
  let column_index = headers.iter().position(|header| header == column);
  let Some(column_index) = column_index else {
    return Ok(Vec::new());
  };

  let mut out = Vec::new();
  for (row_number, record) in reader.records().enumerate() {
    if row_number as u64 + 1 > limits.max_lines {
      return Err(Error::LimitExceeded(format!(
        "CSV exceeds the {}-row safety limit",
        limits.max_lines
      )));
    }
    let record = record.map_err(|error| Error::InvalidInput(format!("bad CSV row: {error}")))?;
    let Some(field) = record.get(column_index) else {
      continue;
    };
    let field = field.trim();
    if field.is_empty() {
      continue;
    }
    out.extend(extract_from_text(field));
  }
  Ok(out)
}

/// Splits the top-level JSON array found under `"{key}": [ ... ]` into its
/// raw item substrings, tracking string/escape state and bracket depth so
/// commas inside nested structures or strings don't get mistaken for
/// separators. Stops at the first unparsable boundary (a truncated file,
/// say) and returns whatever was cleanly split out so far — the tolerance
/// spec.md §4.1 asks for ("malformed tails ... dropped silently").
fn scan_json_array(text: &str, key: &str) -> Vec<String> {
  let marker = format!("\"{key}\"");
  let Some(key_at) = text.find(&marker) else {
    return Vec::new();
  };
  let after_key = &text[key_at + marker.len()..];
  let Some(colon_at) = after_key.find(':') else {
    return Vec::new();
  };
  let after_colon = after_key[colon_at + 1..].trim_start();
  let Some(body) = after_colon.strip_prefix('[') else {
    return Vec::new();
  };

  let bytes = body.as_bytes();
  let mut items = Vec::new();
  let mut depth = 0i32;
  let mut in_string = false;
  let mut escape = false;
  let mut start = 0usize;
  let mut index = 0usize;
  while index < bytes.len() {
    let byte = bytes[index];
    if in_string {
      if escape {
        escape = false;
      } else if byte == b'\\' {
        escape = true;
      } else if byte == b'"' {
        in_string = false;
      }
    } else {
      match byte {
        b'"' => in_string = true,
        b'[' | b'{' => depth += 1,
        b']' | b'}' => {
          if depth == 0 {
            let segment = body[start..index].trim();
            if !segment.is_empty() {
              items.push(segment.to_string());
            }
            return items;
          }
          depth -= 1;
        }
        b',' if depth == 0 => {
          let segment = body[start..index].trim();
          if !segment.is_empty() {
            items.push(segment.to_string());
          }
          start = index + 1;
        }
        _ => {}
      }
    }
    index += 1;
  }
  let segment = body[start..].trim();
  if !segment.is_empty() {
    items.push(segment.to_string());
  }
  items
}

/// JSON reading (spec.md §6): an object whose `{key}` (default `prefixes`)
/// is an array of strings. A malformed tail is tolerated; whatever parsed
/// cleanly before the error is delivered.
fn read_json(path: &Path, key: &str, limits: &Limits) -> Result<Vec<Prefix>, Error> {
  let bytes = read_file_checked(path, limits)?;
  let text = decode_lossy(bytes);
  let mut out = Vec::new();
  for (item_number, item) in scan_json_array(&text, key).into_iter().enumerate() {
    if item_number as u64 + 1 > limits.max_json_items {
      return Err(Error::LimitExceeded(format!(
        "JSON array exceeds the {}-item safety limit",
        limits.max_json_items
      )));
    }
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&item) else {
      // Tolerate a malformed tail: stop here, keep what we already have.
      break;
    };
    let candidate = match value {
      serde_json::Value::String(text) => text,
      other => other.to_string(),
    };
    out.extend(extract_from_text(candidate.trim()));
  }
  Ok(out)
}

/// Reads a file as lossily-decoded text, enforcing the file-size limit.
/// Shared by the line-oriented branch of `read_path` and the
/// keep-comments reader, which both want the same bytes-to-text step
/// without the per-extension dispatch.
pub fn read_text_file(path: &Path, limits: &Limits) -> Result<String, Error> {
  let bytes = read_file_checked(path, limits)?;
  Ok(decode_lossy(bytes))
}

/// Per-file dispatch by extension (spec.md §4.1): `.csv` and `.json` get
/// dedicated readers, everything else is treated as line-oriented text.
pub fn read_path(path: &Path, options: &ReadOptions) -> Result<Vec<Prefix>, Error> {
  match path.extension().and_then(|extension| extension.to_str()) {
    Some(extension) if extension.eq_ignore_ascii_case("csv") => {
      read_csv(path, &options.csv_column, &options.limits)
    }
    Some(extension) if extension.eq_ignore_ascii_case("json") => {
      read_json(path, &options.json_key, &options.limits)
    }
    _ => read_text(&read_text_file(path, &options.limits)?, &options.limits),
  }
}

/// Whether `path`'s extension names a structured format with no
/// keep-comments support (spec.md §3: "CSV/JSON have no annotated mode").
pub fn is_structured(path: &Path) -> bool {
  path
    .extension()
    .and_then(|extension| extension.to_str())
    .map(|extension| extension.eq_ignore_ascii_case("csv") || extension.eq_ignore_ascii_case("json"))
    .unwrap_or(false)
}

/// Cheap dispatch (spec.md §4.1): a short string that names an existing
/// regular file is read as that file; everything else is parsed as inline
/// text.
fn looks_like_path(candidate: &str) -> bool {
  candidate.len() < 255 && Path::new(candidate).is_file()
}

/// General-purpose entrypoint: accepts a path, inline text, or (via
/// `read_list`) an already-typed list, and dispatches cheaply between the
/// first two.
pub fn read_any(candidate: &str, options: &ReadOptions) -> Result<Vec<Prefix>, Error> {
  if looks_like_path(candidate) {
    read_path(Path::new(candidate), options)
  } else {
    read_text(candidate, &options.limits)
  }
}

/// The list path bypasses parsing entirely for already-typed values.
pub fn read_list(prefixes: Vec<Prefix>) -> Vec<Prefix> {
  prefixes
}
