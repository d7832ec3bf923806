// L3 canonicalizer (spec.md §4.3): sort (broadest-first) -> remove-nested ->
// aggregate, each a pure function from sequence to sequence.

use crate::prefix::{self, Annotated, Prefix};

/// Sorts `prefixes` into the broadest-first total order: `(family, base,
/// length)` all ascending. `Prefix`'s derived `Ord` already implements this
/// comparator (its fields are declared in that exact order), so this is
/// just `Vec::sort`.
pub fn sort_broadest_first(prefixes: &mut Vec<Prefix>) {
  prefixes.sort_unstable();
}

/// Emits each prefix not contained by any previously emitted prefix of the
/// same family. `assume_sorted` lets a caller that already sorted skip the
/// resort (spec.md §4.3).
pub fn remove_nested(mut prefixes: Vec<Prefix>, assume_sorted: bool) -> Vec<Prefix> {
  if !assume_sorted {
    sort_broadest_first(&mut prefixes);
  }
  let mut out: Vec<Prefix> = Vec::with_capacity(prefixes.len());
  for prefix in prefixes {
    // The "current cover" per family is always the last prefix of that
    // family pushed to `out`, because input is broadest-first: nothing
    // already emitted for this family can be narrower than `prefix`.
    let covered = out
      .iter()
      .rev()
      .find(|candidate| candidate.family() == prefix.family())
      .is_some_and(|cover| cover.contains(&prefix));
    if !covered {
      out.push(prefix);
    }
  }
  out
}

/// Replaces adjacent sibling pairs with their shared parent, to a fixed
/// point, via a single linear pass with a stack (spec.md §4.3). Requires
/// `prefixes` to already be sorted and nested-free.
pub fn aggregate(prefixes: Vec<Prefix>) -> Vec<Prefix> {
  let mut stack: Vec<Prefix> = Vec::with_capacity(prefixes.len());
  for prefix in prefixes {
    let mut current = prefix;
    loop {
      match stack.last() {
        Some(top) if top.is_sibling_of(&current) => {
          let parent = top.parent().expect("siblings have a parent");
          stack.pop();
          current = parent;
        }
        _ => break,
      }
    }
    stack.push(current);
  }
  stack
}

/// Full canonicalization: sort, remove-nested, aggregate. Deterministic in
/// the input multiset alone, coverage-preserving, and minimal (spec.md §4.3
/// post-conditions).
pub fn canonicalize(mut prefixes: Vec<Prefix>) -> Vec<Prefix> {
  sort_broadest_first(&mut prefixes);
  let prefixes = remove_nested(prefixes, true);
  aggregate(prefixes)
}

/// The "keep-comments" variant (spec.md §3): dedup + sort only, because
/// aggregation would erase the prefix-to-comment binding. When the same
/// prefix tuple repeats, the representative with a non-empty comment wins;
/// among equally-commented repeats, first-seen wins.
pub fn dedup_sort_annotated(mut annotated: Vec<Annotated>) -> Vec<Annotated> {
  annotated.sort_by(|a, b| {
    a.prefix
      .cmp(&b.prefix)
      .then_with(|| prefix::prefer_commented(a, b))
  });
  annotated.dedup_by(|a, b| a.prefix == b.prefix);
  annotated
}

#[cfg(test)]
mod tests {
  use super::*;

  fn prefixes(texts: &[&str]) -> Vec<Prefix> {
    texts.iter().map(|text| text.parse().unwrap()).collect()
  }

  #[test]
  fn s1_aggregation() {
    let input = prefixes(&[
      "192.168.0.0/24",
      "192.168.1.0/24",
      "192.168.2.0/24",
      "192.168.3.0/24",
    ]);
    assert_eq!(prefixes(&["192.168.0.0/22"]), canonicalize(input));
  }

  #[test]
  fn s2_nested_absorption() {
    let input = prefixes(&["10.1.1.1/32", "10.0.0.0/8", "10.50.0.0/16"]);
    assert_eq!(prefixes(&["10.0.0.0/8"]), canonicalize(input));
  }

  #[test]
  fn idempotent() {
    let input = prefixes(&["10.0.0.0/8", "10.1.1.1/32", "172.16.0.0/16", "192.168.0.0/23"]);
    let once = canonicalize(input);
    let twice = canonicalize(once.clone());
    assert_eq!(once, twice);
  }

  #[test]
  fn coverage_preserved_for_unrelated_prefixes() {
    let input = prefixes(&["10.0.0.0/24", "10.0.1.0/24", "10.0.3.0/24"]);
    // .0/24 and .1/24 aggregate into .0/23; .3/24 stays on its own (no
    // sibling present, since its sibling would be .2.0/24).
    assert_eq!(
      prefixes(&["10.0.0.0/23", "10.0.3.0/24"]),
      canonicalize(input)
    );
  }

  #[test]
  fn no_siblings_survive_aggregation() {
    let input = prefixes(&["10.0.0.0/24", "10.0.1.0/24", "10.0.2.0/24", "10.0.3.0/24"]);
    let out = canonicalize(input);
    for window in out.windows(2) {
      assert!(!window[0].is_sibling_of(&window[1]));
    }
  }

  #[test]
  fn mixed_family_is_independent() {
    let input = prefixes(&["10.0.0.0/24", "10.0.1.0/24", "2001:db8::/33", "2001:db8:8000::/33"]);
    let out = canonicalize(input);
    assert_eq!(
      prefixes(&["10.0.0.0/23", "2001:db8::/32"]),
      out
    );
  }

  #[test]
  fn annotated_dedup_keeps_comment_and_first_seen() {
    let one: Prefix = "10.0.0.0/24".parse().unwrap();
    let input = vec![
      Annotated::new(one, ""),
      Annotated::new(one, "# first comment"),
      Annotated::new(one, "# second comment"),
    ];
    let out = dedup_sort_annotated(input);
    assert_eq!(1, out.len());
    assert_eq!("# first comment", out[0].comment);
  }

  #[test]
  fn annotated_mode_does_not_aggregate() {
    let a: Prefix = "192.168.0.0/24".parse().unwrap();
    let b: Prefix = "192.168.1.0/24".parse().unwrap();
    let out = dedup_sort_annotated(vec![Annotated::new(a, ""), Annotated::new(b, "")]);
    assert_eq!(2, out.len());
  }
}
