//! Error types returned by template registration, matching, and formatting.

use thiserror::Error;

/// Failure modes for [`crate::registry::Registry::register_template`].
#[derive(Debug, Error, Eq, PartialEq)]
pub enum RegistrationError {
    /// A template with this id is already registered. The registry is left
    /// unchanged.
    #[error("template id {0} is already registered")]
    DuplicateId(u16),
    /// The pattern failed to compile. The registry is left unchanged.
    #[error("invalid template pattern: {0}")]
    InvalidPattern(#[from] PatternError),
}

/// Why a pattern string failed to compile.
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum PatternError {
    /// A `{` was not matched by a closing `}` before the end of the pattern,
    /// and was not part of a `{{` escape.
    #[error("unterminated slot placeholder starting at byte {0}")]
    UnterminatedSlot(usize),
    /// The text between `{` and `}` was not a decimal slot index.
    #[error("slot placeholder {{{0}}} is not a decimal integer")]
    NotADecimal(String),
    /// Slot indices must be below 16 (spec.md §3.1).
    #[error("slot index {0} is out of range (must be < 16)")]
    SlotIndexOutOfRange(u32),
    /// A bare `}` appeared without a matching `{` and was not part of a `}}`
    /// escape.
    #[error("unmatched '}}' at byte {0}")]
    UnmatchedClosingBrace(usize),
}

/// Failure modes for [`crate::registry::Registry::format_template`].
#[derive(Debug, Error, Eq, PartialEq)]
pub enum FormatError {
    /// No template is registered under this id.
    #[error("unknown template id {0}")]
    UnknownId(u16),
    /// `slots` did not cover every slot index referenced by the pattern.
    #[error("template {template_id} references slot {slot_index} but only {provided} slots were supplied")]
    SlotCountMismatch {
        /// The template being formatted.
        template_id: u16,
        /// The highest slot index referenced by the pattern.
        slot_index: u8,
        /// The number of slot values the caller supplied.
        provided: usize,
    },
}
