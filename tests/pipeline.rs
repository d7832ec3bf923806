// End-to-end tests driving the library's layers the way the CLI verbs do,
// exercising file I/O through real temp files rather than the unit-level
// in-memory fixtures already covered inside each module.

mod common;

use cidrset::{canon, extractor, filter, setops, splitter};
use pretty_assertions::assert_eq;

fn prefixes(texts: &[&str]) -> Vec<cidrset::prefix::Prefix> {
  texts.iter().map(|text| text.parse().unwrap()).collect()
}

#[test_log::test]
fn optimize_reads_a_dirty_text_file_and_aggregates() {
  let directory = tempfile::tempdir().unwrap();
  let path = common::write_file(
    &directory,
    "input.txt",
    "# a comment\n192.168.0.0/24\n192.168.1.0/24\n\nnot a prefix at all\n010.0.0.1\n",
  );

  let read = extractor::read_path(&path, &extractor::ReadOptions::default()).unwrap();
  let canonical = canon::canonicalize(read);

  assert_eq!(prefixes(&["10.0.0.1/32", "192.168.0.0/23"]), canonical);
}

#[test_log::test]
fn filter_then_canonicalize_drops_bogons_before_aggregating() {
  let input = prefixes(&[
    "10.0.0.0/8",
    "8.8.8.0/24",
    "8.8.1.0/24",
    "127.0.0.1/32",
  ]);
  let kept: Vec<_> = filter::apply(filter::Options::bogons(), input.into_iter()).collect();
  let canonical = canon::canonicalize(kept);
  assert_eq!(prefixes(&["8.8.0.0/23"]), canonical);
}

#[test_log::test]
fn exclude_then_check_is_consistent() {
  let source = prefixes(&["10.0.0.0/24"]);
  let excludes = prefixes(&["10.0.0.128/25"]);
  let remainder = setops::subtract(source, excludes).unwrap();

  let target: std::net::Ipv4Addr = "10.0.0.200".parse().unwrap();
  let hits: Vec<_> = splitter::check(
    splitter::Target::Address(cidrset::prefix::Family::V4, u32::from(target) as u128),
    remainder.into_iter(),
  )
  .collect();
  assert!(hits.is_empty());
}

#[test_log::test]
fn csv_and_json_files_round_trip_through_the_same_pipeline() {
  let directory = tempfile::tempdir().unwrap();
  let csv_path = common::write_file(&directory, "input.csv", "prefix,note\n10.0.0.0/8,internal\n192.168.0.0/16,lan\n");
  let json_path = common::write_file(
    &directory,
    "input.json",
    r#"{"prefixes": ["10.0.0.0/8", "192.168.0.0/16"]}"#,
  );

  let options = extractor::ReadOptions::default();
  let from_csv = canon::canonicalize(extractor::read_path(&csv_path, &options).unwrap());
  let from_json = canon::canonicalize(extractor::read_path(&json_path, &options).unwrap());

  assert_eq!(from_csv, from_json);
}

#[test_log::test]
fn diff_round_trips_through_files() {
  let directory = tempfile::tempdir().unwrap();
  let old_path = common::write_file(&directory, "old.txt", "10.0.0.0/24\n10.0.1.0/24\n");
  let new_path = common::write_file(&directory, "new.txt", "10.0.0.0/24\n10.0.2.0/24\n");

  let options = extractor::ReadOptions::default();
  let old = extractor::read_path(&old_path, &options).unwrap();
  let new = extractor::read_path(&new_path, &options).unwrap();
  let result = setops::diff(new, old).unwrap();

  assert_eq!(prefixes(&["10.0.2.0/24"]), result.added);
  assert_eq!(prefixes(&["10.0.1.0/24"]), result.removed);
  assert_eq!(prefixes(&["10.0.0.0/24"]), result.unchanged);
}
