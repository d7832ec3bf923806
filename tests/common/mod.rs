// Shared integration-test scaffolding. The crate has no server to spin up
// (spec.md §1 is a batch CLI), so unlike the teacher's `Runner` these
// helpers just materialize an input file and call the library directly.

use std::{fs, io::Write as _};

pub fn write_file(directory: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
  let path = directory.path().join(name);
  let mut file = fs::File::create(&path).expect("create temp file");
  file.write_all(contents.as_bytes()).expect("write temp file");
  path
}
