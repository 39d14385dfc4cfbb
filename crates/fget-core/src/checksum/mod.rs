//! Checksum resolution and streaming validation.
//!
//! The checksum argument given to a download is either a literal hex digest,
//! an absolute URL to a checksum file, or a path to a local one. This module
//! classifies the argument once, retrieves and parses the source to find the
//! digest for the target filename, and checks that digest incrementally while
//! the payload streams to its destination.

mod error;
mod parse;
mod source;
mod spec;
mod validate;

pub use error::ChecksumError;
pub use parse::{resolve_expected_digest, ChecksumEntry};
pub use spec::ChecksumSpec;
pub use validate::{StreamingValidator, ValidatingWriter};
