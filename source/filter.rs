// L2 classifier/filter (spec.md §4.2): a pure streaming predicate, O(1)
// memory, that never reorders its input.

use crate::prefix::Prefix;
use once_cell::sync::Lazy;

fn table(prefixes: &[&str]) -> Vec<Prefix> {
  prefixes.iter().map(|text| text.parse().unwrap()).collect()
}

static PRIVATE: Lazy<Vec<Prefix>> = Lazy::new(|| {
  table(&[
    "10.0.0.0/8",
    "172.16.0.0/12",
    "192.168.0.0/16",
    "fc00::/7",
  ])
});

static LOOPBACK: Lazy<Vec<Prefix>> = Lazy::new(|| table(&["127.0.0.0/8", "::1/128"]));

static LINK_LOCAL: Lazy<Vec<Prefix>> = Lazy::new(|| table(&["169.254.0.0/16", "fe80::/10"]));

static MULTICAST: Lazy<Vec<Prefix>> = Lazy::new(|| table(&["224.0.0.0/4", "ff00::/8"]));

// A representative, non-exhaustive set of IETF-reserved special-purpose
// blocks (IANA IPv4/IPv6 special-purpose address registries): CGNAT
// shared space, the TEST-NET documentation ranges, benchmarking space,
// the reserved-for-future-use top octet, and their IPv6 counterparts.
static RESERVED: Lazy<Vec<Prefix>> = Lazy::new(|| {
  table(&[
    "0.0.0.0/8",
    "100.64.0.0/10",
    "192.0.0.0/24",
    "192.0.2.0/24",
    "192.88.99.0/24",
    "198.18.0.0/15",
    "198.51.100.0/24",
    "203.0.113.0/24",
    "240.0.0.0/4",
    "255.255.255.255/32",
    "64:ff9b::/96",
    "100::/64",
    "2001::/23",
    "2001:db8::/32",
    "2002::/16",
  ])
});

fn overlaps_any(prefix: &Prefix, blocks: &[Prefix]) -> bool {
  blocks.iter().any(|block| {
    block.family() == prefix.family()
      && block.base() <= prefix.end()
      && prefix.base() <= block.end()
  })
}

fn is_unspecified(prefix: &Prefix) -> bool {
  // spec.md's "0.0.0.0/*" / "::/*" wildcard: any prefix whose base address
  // is the all-zeros address, regardless of length.
  prefix.base() == 0
}

/// Classification flags (spec.md §4.2). All default to `false`; `bogons`
/// is a shorthand that is equivalent to setting the six `exclude_*` flags.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
  pub ipv4_only: bool,
  pub ipv6_only: bool,
  pub exclude_private: bool,
  pub exclude_loopback: bool,
  pub exclude_link_local: bool,
  pub exclude_multicast: bool,
  pub exclude_reserved: bool,
  pub exclude_unspecified: bool,
}

impl Options {
  pub fn bogons() -> Self {
    Self {
      exclude_private: true,
      exclude_loopback: true,
      exclude_link_local: true,
      exclude_multicast: true,
      exclude_reserved: true,
      exclude_unspecified: true,
      ..Self::default()
    }
  }

  /// Whether `prefix` should be dropped: excluded if *any* enabled
  /// predicate matches.
  pub fn excludes(&self, prefix: &Prefix) -> bool {
    use crate::prefix::Family;
    if self.ipv4_only && prefix.family() != Family::V4 {
      return true;
    }
    if self.ipv6_only && prefix.family() != Family::V6 {
      return true;
    }
    if self.exclude_private && overlaps_any(prefix, &PRIVATE) {
      return true;
    }
    if self.exclude_loopback && overlaps_any(prefix, &LOOPBACK) {
      return true;
    }
    if self.exclude_link_local && overlaps_any(prefix, &LINK_LOCAL) {
      return true;
    }
    if self.exclude_multicast && overlaps_any(prefix, &MULTICAST) {
      return true;
    }
    if self.exclude_reserved && overlaps_any(prefix, &RESERVED) {
      return true;
    }
    if self.exclude_unspecified && is_unspecified(prefix) {
      return true;
    }
    false
  }
}

/// Streaming filter: drops any prefix for which `options.excludes` matches.
/// O(1) memory beyond the iterator itself.
pub fn apply<'a>(
  options: Options,
  prefixes: impl Iterator<Item = Prefix> + 'a,
) -> impl Iterator<Item = Prefix> + 'a {
  prefixes.filter(move |prefix| !options.excludes(prefix))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn prefix(text: &str) -> Prefix {
    text.parse().unwrap()
  }

  #[test]
  fn s5_bogon_filter() {
    let input = vec![
      prefix("8.8.8.8/32"),
      prefix("127.0.0.1/32"),
      prefix("169.254.1.1/32"),
      prefix("224.0.0.1/32"),
      prefix("0.0.0.0/0"),
    ];
    let out: Vec<_> = apply(Options::bogons(), input.into_iter()).collect();
    assert_eq!(vec![prefix("8.8.8.8/32")], out);
  }

  #[test]
  fn ipv4_only_drops_v6() {
    let input = vec![prefix("10.0.0.0/8"), prefix("2001:db8::/32")];
    let options = Options {
      ipv4_only: true,
      ..Options::default()
    };
    let out: Vec<_> = apply(options, input.into_iter()).collect();
    assert_eq!(vec![prefix("10.0.0.0/8")], out);
  }

  #[test]
  fn private_excludes_rfc1918_and_ula() {
    let options = Options {
      exclude_private: true,
      ..Options::default()
    };
    assert!(options.excludes(&prefix("192.168.1.0/24")));
    assert!(options.excludes(&prefix("fc00::/8")));
    assert!(!options.excludes(&prefix("8.8.8.8/32")));
  }

  #[test]
  fn default_excludes_nothing() {
    let options = Options::default();
    assert!(!options.excludes(&prefix("127.0.0.1/32")));
  }

  #[test]
  fn filter_does_not_reorder() {
    let input = vec![
      prefix("10.0.0.0/8"),
      prefix("8.8.8.8/32"),
      prefix("172.16.0.0/12"),
    ];
    let options = Options {
      exclude_private: true,
      ..Options::default()
    };
    let out: Vec<_> = apply(options, input.clone().into_iter()).collect();
    assert_eq!(vec![prefix("8.8.8.8/32")], out);
  }
}
