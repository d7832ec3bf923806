// Statistics reporter (spec.md §6's `stats` verb). Named as an external
// collaborator out of scope for the hard engineering in spec.md §1, but
// the CLI surface still needs it to exist; SPEC_FULL.md supplements its
// exact shape from `examples/original_source/src/prefixopt/cli/stats.py`
// and `api.py`.

use crate::prefix::{Family, Prefix};

#[derive(Clone, Copy, Debug, Default)]
pub struct Stats {
  pub v4_count: usize,
  pub v6_count: usize,
  pub v4_addresses: u128,
  pub v6_addresses: u128,
}

fn block_size(prefix: &Prefix) -> u128 {
  let host_bits = prefix.width() - u32::from(prefix.length());
  if host_bits >= 128 {
    u128::MAX
  } else {
    1u128 << host_bits
  }
}

/// Per-family counts and covered-address totals. Address totals saturate
/// at `u128::MAX` rather than overflow, which only matters for an entire
/// `::/0` (2^128 addresses, one more than `u128` can hold).
pub fn compute(prefixes: &[Prefix]) -> Stats {
  let mut stats = Stats::default();
  for prefix in prefixes {
    let size = block_size(prefix);
    match prefix.family() {
      Family::V4 => {
        stats.v4_count += 1;
        stats.v4_addresses = stats.v4_addresses.saturating_add(size);
      }
      Family::V6 => {
        stats.v6_count += 1;
        stats.v6_addresses = stats.v6_addresses.saturating_add(size);
      }
    }
  }
  stats
}

/// The `limit` broadest (largest) blocks, for `stats --details`.
pub fn largest_blocks(prefixes: &[Prefix], limit: usize) -> Vec<Prefix> {
  let mut sorted = prefixes.to_vec();
  sorted.sort_by_key(|prefix| (prefix.length(), prefix.family(), prefix.base()));
  sorted.truncate(limit);
  sorted
}

#[cfg(test)]
mod tests {
  use super::*;

  fn prefix(text: &str) -> Prefix {
    text.parse().unwrap()
  }

  #[test]
  fn counts_and_addresses_per_family() {
    let prefixes = vec![prefix("10.0.0.0/24"), prefix("192.168.0.0/16"), prefix("2001:db8::/32")];
    let stats = compute(&prefixes);
    assert_eq!(2, stats.v4_count);
    assert_eq!(1, stats.v6_count);
    assert_eq!(256 + 65536, stats.v4_addresses);
    assert_eq!(1u128 << 96, stats.v6_addresses);
  }

  #[test]
  fn largest_blocks_are_broadest_first() {
    let prefixes = vec![prefix("10.0.0.0/24"), prefix("10.0.0.0/8"), prefix("10.0.1.0/28")];
    let out = largest_blocks(&prefixes, 2);
    assert_eq!(vec![prefix("10.0.0.0/8"), prefix("10.0.0.0/24")], out);
  }
}
