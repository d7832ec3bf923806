// L4 set operations (spec.md §4.4): subtract (hole-punch), intersect, diff.

use crate::{canon, error::Error, prefix::Prefix};

/// Fatal once cumulative subtract fragments cross this count (spec.md
/// §4.4's "safety fuse"): bounds worst-case behavior on deeply interleaved
/// inputs.
pub const MAX_SUBTRACT_FRAGMENTS: usize = 2_000_000;

fn overlaps(a: &Prefix, b: &Prefix) -> bool {
  a.family() == b.family() && a.base() <= b.end() && b.base() <= a.end()
}

/// Partitions `container \ hole` into the minimum CIDR cover, via the
/// standard recursive halving (spec.md GLOSSARY, "hole-punch"). Assumes
/// `hole` is strictly contained in `container` (checked by the caller).
fn punch_hole(container: Prefix, hole: Prefix) -> Vec<Prefix> {
  if container.length() == hole.length() {
    return Vec::new();
  }
  let (low, high) = container
    .children()
    .expect("container is strictly broader than hole, so it can still be split");
  if low.contains(&hole) {
    let mut out = vec![high];
    out.extend(punch_hole(low, hole));
    out
  } else {
    let mut out = vec![low];
    out.extend(punch_hole(high, hole));
    out
  }
}

/// `A − E`: for each source prefix, punches out every overlapping exclude
/// via a monotone cursor over the canonicalized excludes (spec.md §4.4).
/// The raw fragment stream is re-canonicalized before returning, since
/// subtraction leaves adjacent fragments that can re-aggregate (e.g.
/// punching `.1/32` out of a `/30` leaves `.0/32` and `.2/31`, which sit
/// right next to whatever else survived).
pub fn subtract(source: Vec<Prefix>, excludes: Vec<Prefix>) -> Result<Vec<Prefix>, Error> {
  let excludes = canon::canonicalize(excludes);
  let mut source = source;
  canon::sort_broadest_first(&mut source);

  let mut cursor = 0usize;
  let mut out = Vec::with_capacity(source.len());
  let mut fragment_total = 0usize;

  for a in source {
    // Advance past excludes that can no longer apply to this or any later
    // source prefix of the same family (source is sorted by non-decreasing
    // base, so once an exclude's end falls behind `a.base()` it is behind
    // for good).
    while cursor < excludes.len()
      && (excludes[cursor].family() < a.family()
        || (excludes[cursor].family() == a.family() && excludes[cursor].end() < a.base()))
    {
      cursor += 1;
    }

    let mut fragments = vec![a];
    let mut lookahead = cursor;
    while lookahead < excludes.len()
      && excludes[lookahead].family() == a.family()
      && excludes[lookahead].base() <= a.end()
    {
      let exclude = excludes[lookahead];
      let mut next_fragments = Vec::with_capacity(fragments.len());
      for fragment in fragments {
        if !overlaps(&fragment, &exclude) {
          next_fragments.push(fragment);
        } else if exclude.contains(&fragment) {
          // Dropped entirely.
        } else if fragment.contains(&exclude) {
          next_fragments.extend(punch_hole(fragment, exclude));
        } else {
          // Partial overlap across a CIDR boundary: impossible once `E` is
          // canonical (it is CIDR-disjoint). Only reachable if a caller
          // bypassed canonicalization of `E`; degrade to the conservative
          // rule spec.md §4.4 specifies for that case.
          if fragment.base() >= exclude.base() && fragment.end() <= exclude.end() {
            // Dropped entirely.
          } else {
            next_fragments.push(fragment);
          }
        }
      }
      fragments = next_fragments;
      lookahead += 1;
    }

    fragment_total += fragments.len();
    if fragment_total > MAX_SUBTRACT_FRAGMENTS {
      return Err(Error::LimitExceeded(format!(
        "subtraction produced more than {MAX_SUBTRACT_FRAGMENTS} fragments; reduce the input size"
      )));
    }
    out.extend(fragments);
  }

  Ok(canon::canonicalize(out))
}

/// `A ∩ B`, re-expressed as a canonical prefix set. Walks two canonical
/// sequences with a linear two-pointer sweep (spec.md §4.4 and §9: prefer
/// this over the source's quadratic overlap scan). Because two CIDR blocks
/// either nest or are disjoint (never partially overlapping), whenever a
/// pair from the two canonical inputs overlaps, the narrower of the two
/// *is* their intersection.
pub fn intersect(a: Vec<Prefix>, b: Vec<Prefix>) -> Vec<Prefix> {
  let a = canon::canonicalize(a);
  let b = canon::canonicalize(b);

  let mut i = 0usize;
  let mut j = 0usize;
  let mut out = Vec::new();

  while i < a.len() && j < b.len() {
    let (pa, pb) = (a[i], b[j]);
    if pa.family() != pb.family() {
      if pa.family() < pb.family() {
        i += 1;
      } else {
        j += 1;
      }
      continue;
    }
    if overlaps(&pa, &pb) {
      out.push(if pa.length() >= pb.length() { pa } else { pb });
    }
    if pa.end() < pb.end() {
      i += 1;
    } else if pb.end() < pa.end() {
      j += 1;
    } else {
      i += 1;
      j += 1;
    }
  }

  canon::canonicalize(out)
}

/// `(added, removed, unchanged)` between two fully canonicalized prefix
/// sets (spec.md §4.4). Two canonical sets that cover the same address
/// space are element-wise equal, so `unchanged = new ∩ old`, `added = new −
/// old`, `removed = old − new`.
pub struct Diff {
  pub added: Vec<Prefix>,
  pub removed: Vec<Prefix>,
  pub unchanged: Vec<Prefix>,
}

pub fn diff(new: Vec<Prefix>, old: Vec<Prefix>) -> Result<Diff, Error> {
  let unchanged = intersect(new.clone(), old.clone());
  let added = subtract(new.clone(), old.clone())?;
  let removed = subtract(old, new)?;
  Ok(Diff {
    added,
    removed,
    unchanged,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn prefixes(texts: &[&str]) -> Vec<Prefix> {
    texts.iter().map(|text| text.parse().unwrap()).collect()
  }

  #[test]
  fn s3_hole_punch() {
    let source = prefixes(&["10.0.0.0/30"]);
    let excludes = prefixes(&["10.0.0.1/32"]);
    let out = subtract(source, excludes).unwrap();
    assert_eq!(prefixes(&["10.0.0.0/32", "10.0.0.2/31"]), out);
  }

  #[test]
  fn s6_mixed_family_subtract_is_inert() {
    let source = prefixes(&["10.0.0.0/24"]);
    let excludes = prefixes(&["2001:db8::/32"]);
    let out = subtract(source, excludes).unwrap();
    assert_eq!(prefixes(&["10.0.0.0/24"]), out);
  }

  #[test]
  fn subtract_everything_leaves_nothing() {
    let source = prefixes(&["10.0.0.0/24"]);
    let excludes = prefixes(&["10.0.0.0/24"]);
    assert!(subtract(source, excludes).unwrap().is_empty());
  }

  #[test]
  fn subtract_disjoint_is_noop() {
    let source = prefixes(&["10.0.0.0/24"]);
    let excludes = prefixes(&["192.168.0.0/24"]);
    assert_eq!(
      prefixes(&["10.0.0.0/24"]),
      subtract(source, excludes).unwrap()
    );
  }

  #[test]
  fn s4_semantic_diff() {
    let new = prefixes(&["192.168.0.0/24", "192.168.1.0/24"]);
    let old = prefixes(&["192.168.0.0/23"]);
    let result = diff(new, old).unwrap();
    assert!(result.added.is_empty());
    assert!(result.removed.is_empty());
    assert_eq!(prefixes(&["192.168.0.0/23"]), result.unchanged);
  }

  #[test]
  fn diff_added_and_removed() {
    let new = prefixes(&["10.0.0.0/24", "10.0.2.0/24"]);
    let old = prefixes(&["10.0.0.0/24", "10.0.1.0/24"]);
    let result = diff(new, old).unwrap();
    assert_eq!(prefixes(&["10.0.2.0/24"]), result.added);
    assert_eq!(prefixes(&["10.0.1.0/24"]), result.removed);
    assert_eq!(prefixes(&["10.0.0.0/24"]), result.unchanged);
  }

  #[test]
  fn intersect_picks_narrower_block() {
    let a = prefixes(&["10.0.0.0/8"]);
    let b = prefixes(&["10.1.0.0/16"]);
    assert_eq!(prefixes(&["10.1.0.0/16"]), intersect(a, b));
  }

  #[test]
  fn intersect_disjoint_is_empty() {
    let a = prefixes(&["10.0.0.0/8"]);
    let b = prefixes(&["192.168.0.0/16"]);
    assert!(intersect(a, b).is_empty());
  }

  #[test]
  fn subtract_round_trip_union_with_intersection_equals_source() {
    let source = prefixes(&["10.0.0.0/24"]);
    let excludes = prefixes(&["10.0.0.64/27", "10.0.0.128/25"]);
    let remainder = subtract(source.clone(), excludes.clone()).unwrap();
    let overlap = intersect(source, excludes);
    let mut recombined = remainder;
    recombined.extend(overlap);
    let recombined = canon::canonicalize(recombined);
    assert_eq!(prefixes(&["10.0.0.0/24"]), recombined);
  }
}
