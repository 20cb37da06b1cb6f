#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `rans` implements an order-0 range ANS entropy coder over byte symbols,
//! the final compression layer of the AURA pipeline. It turns the
//! tag-byte token stream into a dense bitstream using a frequency table
//! normalized to a fixed scale.
//!
//! # Design
//!
//! [`FrequencyTable`] derives and stores the normalized `f[0..256]` and
//! cumulative `F[0..256]` arrays plus a flat reverse lookup table so symbol
//! decode is O(1). [`encode`]/[`decode`] implement the rANS state machine
//! itself: encoding walks the input in reverse so that decoding, which
//! walks forward through the bitstream, reproduces the input in its
//! original order.
//!
//! # Invariants
//!
//! - A table built by [`FrequencyTable::build`] always sums to
//!   [`ANS_SCALE`]; [`FrequencyTable::from_frequencies`] trusts its caller
//!   to have already checked this (the container parser is the one place
//!   that receives an untrusted table straight off the wire).
//! - [`decode`] never returns a prefix of the input: it either produces
//!   exactly `count` bytes with the state invariant intact, or fails.
//!
//! # Errors
//!
//! See [`error::RangeCoderError`] and [`error::FrequencyError`].
//!
//! # Examples
//!
//! ```
//! use rans::{decode, encode, FrequencyTable};
//!
//! let data = b"mississippi";
//! let table = FrequencyTable::build(data).unwrap();
//! let encoded = encode(data, &table);
//! let decoded = decode(&encoded, &table, data.len()).unwrap();
//! assert_eq!(decoded, data);
//! ```
//!
//! # See also
//!
//! - `container` for where the normalized frequency table sits in the
//!   container envelope for method `0x01`.

pub mod codec;
pub mod error;
pub mod freq;

pub use codec::{decode, encode, INITIAL_STATE};
pub use error::{FrequencyError, RangeCoderError};
pub use freq::FrequencyTable;

/// Fixed-point scale every normalized frequency table sums to (`2^12`).
pub const ANS_SCALE: u16 = 4096;
