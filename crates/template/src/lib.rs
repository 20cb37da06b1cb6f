#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `template` implements the AURA codec's template registry: the matching
//! semantics, slot extraction contract, and (optionally) the JSON template
//! store format that the encoder and decoder must agree on.
//!
//! # Design
//!
//! A [`Template`](registry::Template) pattern is compiled once, at
//! registration time, into an alternating sequence of literal runs and slot
//! references (see [`pattern`] for the compiled representation). Matching
//! and formatting both operate on this compiled form rather than
//! re-parsing the pattern text on every call.
//!
//! [`Registry`](registry::Registry) is read-safe to share once built;
//! [`RegistryBuilder`](registry::RegistryBuilder) is the preferred
//! construction path when every template is known up front, matching the
//! "builder/frozen split" preference over a reader-writer lock.
//!
//! # Invariants
//!
//! - `format_template(m.template_id, &m.slots) == original_text` for every
//!   `TemplateMatch` `m` returned by `match_text`.
//! - `match_text` returns the lowest-id match when more than one template
//!   matches the same text.
//! - `register_template` never mutates the registry on failure.
//!
//! # Errors
//!
//! See [`error`] for the full taxonomy: [`error::RegistrationError`] from
//! registration, [`error::FormatError`] from formatting.
//!
//! # Examples
//!
//! ```
//! use template::RegistryBuilder;
//!
//! let registry = RegistryBuilder::new()
//!     .with_template(10, "The {0} of {1} is {2}.")
//!     .unwrap()
//!     .build();
//!
//! let m = registry.match_text("The capital of France is Paris.").unwrap();
//! assert_eq!(m.template_id, 10);
//! assert_eq!(registry.format_template(10, &m.slots).unwrap(), "The capital of France is Paris.");
//! ```
//!
//! # See also
//!
//! - `tokenizer` for the whole-message template attempt inside the
//!   tokenization pipeline (spec.md §4.2 step 1).
//! - `aura` for the driver that decides when a template-only container is
//!   profitable (spec.md §4.6).

pub mod error;
mod pattern;
pub mod registry;
#[cfg(feature = "serde")]
pub mod store;

pub use error::{FormatError, PatternError, RegistrationError};
pub use registry::{Registry, RegistryBuilder, Template, TemplateMatch};
