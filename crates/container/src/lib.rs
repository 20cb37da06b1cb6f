#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `container` implements the AURA container envelope: the fixed 16-byte
//! header, the optional 512-byte frequency table, the metadata array, and
//! the method-dependent payload, serialized and parsed bit-exactly
//! (spec.md §6.1).
//!
//! # Design
//!
//! [`Header`]/[`Method`] cover the first 16 bytes; [`Container`] wraps the
//! whole envelope and enforces the parse validation order from spec.md
//! §4.5: magic, then version, then method, then size, then trailing
//! bytes, then (for the hybrid method) the frequency-table sum.
//!
//! # Invariants
//!
//! - Every accepted container has `magic == "AURA"` and `version == 0x01`.
//! - [`Container::parse`] never returns a container with bytes left over
//!   in the input buffer (spec.md §4.5 step 5).
//! - A hybrid-method container's frequency table always sums to exactly
//!   [`rans::ANS_SCALE`] once parsed successfully.
//!
//! # Errors
//!
//! See [`error::HeaderError`] and [`error::ContainerError`].
//!
//! # Examples
//!
//! ```
//! use container::{Container, Method};
//! use metadata::{Kind, MetadataEntry, ParseMode};
//!
//! let container = Container::new(
//!     Method::Fallback,
//!     5,
//!     None,
//!     vec![MetadataEntry::new(0, Kind::Fallback, 3)],
//!     b"Hello".to_vec(),
//! );
//! let bytes = container.to_bytes();
//! let parsed = Container::parse(&bytes, ParseMode::Strict).unwrap();
//! assert_eq!(parsed, container);
//! ```
//!
//! # See also
//!
//! - `aura` for the compression driver that decides which method to
//!   assemble and the decode dispatch that follows parsing.

pub mod container;
pub mod error;
pub mod header;

pub use container::{Container, FREQUENCY_TABLE_SIZE};
pub use error::{ContainerError, HeaderError};
pub use header::{Header, Method, HEADER_SIZE, MAGIC, VERSION};

/// Upper bound on `original_size` this core will accept, well above the
/// spec's recommended `2^24` floor while staying safely inside the
/// `u32` field (spec.md §4.5 validation step 4, §1 Non-goals: inputs
/// `>= 2^32` bytes are out of scope entirely).
pub const MAX_MESSAGE_SIZE: u32 = 1 << 30;

/// Worst-case header+metadata envelope for a method-`0x00` container
/// carrying a single metadata entry: 4 magic + 1 version + 1 method +
/// 4 original_size + 4 payload_size + 2 metadata_count + 6 metadata
/// (spec.md §4.6).
pub const MAX_OVERHEAD: usize = 22;
