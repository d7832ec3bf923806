// Error kinds named in spec.md §7. A bare enum with a manual `Display` and
// a blanket `std::error::Error` impl, the same shape the teacher used for
// `notmuch::bindings::Error` rather than a derive macro.

use std::{error, fmt};

#[derive(Debug)]
pub enum Error {
  /// Unparsable target, bad flag combination.
  InvalidInput(String),
  /// File size, line count, JSON item count, fragment count, or split
  /// count crossed a documented limit.
  LimitExceeded(String),
  /// Missing file, unwritable output.
  IOFailure(String),
}

impl fmt::Display for Error {
  fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Error::InvalidInput(message) => write!(formatter, "{message}"),
      Error::LimitExceeded(message) => write!(formatter, "{message}"),
      Error::IOFailure(message) => write!(formatter, "{message}"),
    }
  }
}

impl error::Error for Error {}
