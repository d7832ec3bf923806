// L5 splitter and membership check (spec.md §4.5).

use crate::{
  error::Error,
  prefix::{Family, Prefix},
};

/// Default cap on subnets a single `split` may produce, exposed as a
/// parameter per spec.md §4.5 ("a `max_subnets` cap (default a few
/// million)").
pub const DEFAULT_MAX_SUBNETS: u64 = 4_000_000;

/// Emits the `2^(target_length - prefix.length())` subnets covering
/// `prefix`, or fails before allocating if that count would exceed
/// `max_subnets`.
pub fn split(prefix: &Prefix, target_length: u8, max_subnets: u64) -> Result<Vec<Prefix>, Error> {
  if target_length < prefix.length() {
    return Err(Error::InvalidInput(
      "target length must be \u{2265} source length".to_string(),
    ));
  }
  let width = prefix.width();
  if u32::from(target_length) > width {
    return Err(Error::InvalidInput(format!(
      "target length {target_length} exceeds {width}-bit address width"
    )));
  }

  let steps = u32::from(target_length - prefix.length());
  let count: u128 = 1u128 << steps;
  if count > u128::from(max_subnets) {
    return Err(Error::LimitExceeded(format!(
      "splitting to /{target_length} would produce {count} subnets, above the {max_subnets} limit"
    )));
  }

  let block_bits = width - u32::from(target_length);
  let block_size: u128 = if block_bits >= 128 {
    0 // only reachable when target_length == 0 == prefix.length(), count == 1
  } else {
    1u128 << block_bits
  };

  let mut out = Vec::with_capacity(count as usize);
  let mut base = prefix.base();
  for _ in 0..count {
    out.push(Prefix::new(prefix.family(), base, target_length)?);
    base = base.wrapping_add(block_size);
  }
  Ok(out)
}

/// A `check` target: either a bare address or a prefix (spec.md §4.5).
#[derive(Clone, Copy, Debug)]
pub enum Target {
  Address(Family, u128),
  Prefix(Prefix),
}

/// Emits every source prefix containing `target` (address-in-prefix, or
/// prefix-subset-of-prefix) within a matching family, preserving source
/// order.
pub fn check<'a>(
  target: Target,
  source: impl Iterator<Item = Prefix> + 'a,
) -> impl Iterator<Item = Prefix> + 'a {
  source.filter(move |candidate| match target {
    Target::Address(family, addr) => candidate.contains_addr(family, addr),
    Target::Prefix(target) => candidate.contains(&target),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn prefix(text: &str) -> Prefix {
    text.parse().unwrap()
  }

  #[test]
  fn s8_split_round_trip() {
    let source: Prefix = prefix("10.0.0.0/24");
    let subnets = split(&source, 26, DEFAULT_MAX_SUBNETS).unwrap();
    assert_eq!(4, subnets.len());
    assert_eq!(
      vec![
        prefix("10.0.0.0/26"),
        prefix("10.0.0.64/26"),
        prefix("10.0.0.128/26"),
        prefix("10.0.0.192/26"),
      ],
      subnets
    );
  }

  #[test]
  fn split_same_length_is_identity() {
    let source = prefix("10.0.0.0/24");
    let subnets = split(&source, 24, DEFAULT_MAX_SUBNETS).unwrap();
    assert_eq!(vec![source], subnets);
  }

  #[test]
  fn split_rejects_narrower_target() {
    let source = prefix("10.0.0.0/24");
    assert!(split(&source, 16, DEFAULT_MAX_SUBNETS).is_err());
  }

  #[test]
  fn split_enforces_max_subnets() {
    let source = prefix("10.0.0.0/8");
    assert!(split(&source, 32, 1_000).is_err());
  }

  #[test]
  fn check_matches_address_and_prefix_targets() {
    let source = vec![prefix("10.0.0.0/8"), prefix("192.168.0.0/16")];
    let by_address: Vec<_> = check(
      Target::Address(Family::V4, u32::from("10.1.1.1".parse::<std::net::Ipv4Addr>().unwrap()) as u128),
      source.clone().into_iter(),
    )
    .collect();
    assert_eq!(vec![prefix("10.0.0.0/8")], by_address);

    let by_prefix: Vec<_> = check(
      Target::Prefix(prefix("192.168.1.0/24")),
      source.into_iter(),
    )
    .collect();
    assert_eq!(vec![prefix("192.168.0.0/16")], by_prefix);
  }
}
