//! The template registry (spec.md §3.1, §4.1, §9 "immutable-after-load").

use rustc_hash::FxHashMap;

use crate::error::{FormatError, RegistrationError};
use crate::pattern::CompiledPattern;

/// A parameterized response pattern, identified by a 16-bit id.
#[derive(Debug, Clone)]
pub struct Template {
    id: u16,
    pattern: String,
    compiled: CompiledPattern,
}

impl Template {
    /// The template's id.
    #[must_use]
    pub const fn id(&self) -> u16 {
        self.id
    }

    /// The original pattern text, including `{N}` placeholders.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The number of distinct slot indices referenced by the pattern.
    #[must_use]
    pub fn slot_count(&self) -> u8 {
        self.compiled.slot_count()
    }
}

/// The result of a successful [`Registry::match_text`] call.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TemplateMatch {
    /// The matched template's id.
    pub template_id: u16,
    /// Captured slot values, ordered by slot index.
    pub slots: Vec<String>,
}

/// Stores templates by id and matches/formats text against them.
///
/// Hot-path encoders and decoders read a `Registry` under the assumption
/// that it does not change mid-call; `register_template` takes `&mut self`
/// precisely so that mutation requires exclusive access, per the
/// concurrency model in spec.md §5. [`RegistryBuilder`] is the preferred way
/// to construct one when all templates are known up front, since it avoids
/// repeatedly re-validating a partially built registry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    templates: FxHashMap<u16, Template>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `pattern` and registers it under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::DuplicateId`] if `id` is already
    /// registered, or [`RegistrationError::InvalidPattern`] if `pattern`
    /// fails to compile. The registry is left unchanged on either error.
    pub fn register_template(&mut self, id: u16, pattern: &str) -> Result<(), RegistrationError> {
        if self.templates.contains_key(&id) {
            return Err(RegistrationError::DuplicateId(id));
        }
        let compiled = CompiledPattern::compile(pattern)?;
        #[cfg(feature = "tracing")]
        tracing::trace!(template_id = id, slot_count = compiled.slot_count(), "template registered");
        self.templates.insert(
            id,
            Template {
                id,
                pattern: pattern.to_string(),
                compiled,
            },
        );
        Ok(())
    }

    /// Returns the template registered under `id`, if any.
    #[must_use]
    pub fn get(&self, id: u16) -> Option<&Template> {
        self.templates.get(&id)
    }

    /// Iterates over all registered templates, ordered by ascending id.
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        let mut ids: Vec<_> = self.templates.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().map(move |id| &self.templates[&id])
    }

    /// Attempts to find the template whose pattern reconstructs `text`
    /// byte-for-byte, returning the lowest-id match on ties.
    #[must_use]
    pub fn match_text(&self, text: &str) -> Option<TemplateMatch> {
        let mut ids: Vec<_> = self.templates.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            let template = &self.templates[&id];
            if let Some(slots) = template.compiled.match_text(text) {
                #[cfg(feature = "tracing")]
                tracing::trace!(template_id = id, "whole-message template match");
                return Some(TemplateMatch {
                    template_id: id,
                    slots,
                });
            }
        }
        None
    }

    /// Substitutes `slots` into the template registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnknownId`] if no template is registered under
    /// `id`, or [`FormatError::SlotCountMismatch`] if `slots` does not cover
    /// every index referenced by the pattern.
    pub fn format_template(&self, id: u16, slots: &[impl AsRef<str>]) -> Result<String, FormatError> {
        let template = self.templates.get(&id).ok_or(FormatError::UnknownId(id))?;
        let max_index = template.compiled.max_slot_index();
        if template.compiled.slot_count() > 0 && slots.len() <= max_index as usize {
            return Err(FormatError::SlotCountMismatch {
                template_id: id,
                slot_index: max_index,
                provided: slots.len(),
            });
        }
        let refs: Vec<&str> = slots.iter().map(AsRef::as_ref).collect();
        Ok(template.compiled.format(&refs))
    }
}

/// Ergonomic builder for constructing a [`Registry`] from a known set of
/// templates (spec.md §9 prefers this split over a reader-writer lock).
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template, returning the builder for chaining.
    ///
    /// # Errors
    ///
    /// See [`Registry::register_template`].
    pub fn with_template(mut self, id: u16, pattern: &str) -> Result<Self, RegistrationError> {
        self.registry.register_template(id, pattern)?;
        Ok(self)
    }

    /// Freezes the builder into an immutable-by-convention [`Registry`].
    #[must_use]
    pub fn build(self) -> Registry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> Registry {
        RegistryBuilder::new()
            .with_template(100, "Yes, I can help with that. What specific {0} would you like to know more about?")
            .unwrap()
            .with_template(1, "I cannot {0}.")
            .unwrap()
            .with_template(10, "The {0} of {1} is {2}.")
            .unwrap()
            .build()
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut reg = Registry::new();
        reg.register_template(1, "a {0}").unwrap();
        assert!(matches!(
            reg.register_template(1, "b {0}"),
            Err(RegistrationError::DuplicateId(1))
        ));
        // Unchanged on error.
        assert_eq!(reg.get(1).unwrap().pattern(), "a {0}");
    }

    #[test]
    fn match_and_format_round_trip() {
        let reg = sample_registry();
        let text = "The capital of France is Paris.";
        let m = reg.match_text(text).unwrap();
        assert_eq!(m.template_id, 10);
        assert_eq!(m.slots, vec!["capital", "France", "Paris"]);
        let formatted = reg.format_template(m.template_id, &m.slots).unwrap();
        assert_eq!(formatted, text);
    }

    #[test]
    fn lowest_id_wins_on_tie() {
        let mut reg = Registry::new();
        reg.register_template(5, "hello").unwrap();
        reg.register_template(2, "hello").unwrap();
        let m = reg.match_text("hello").unwrap();
        assert_eq!(m.template_id, 2);
    }

    #[test]
    fn format_template_slot_count_mismatch() {
        let reg = sample_registry();
        let err = reg.format_template(10, &["only one"]).unwrap_err();
        assert!(matches!(err, FormatError::SlotCountMismatch { template_id: 10, .. }));
    }

    #[test]
    fn format_template_unknown_id() {
        let reg = sample_registry();
        let slots: [&str; 0] = [];
        assert!(matches!(
            reg.format_template(999, &slots),
            Err(FormatError::UnknownId(999))
        ));
    }

    #[test]
    fn zero_slot_template_matches_exactly() {
        let mut reg = Registry::new();
        reg.register_template(1, "ping").unwrap();
        assert_eq!(reg.match_text("ping").unwrap().template_id, 1);
        assert_eq!(reg.match_text("pingg"), None);
    }
}
