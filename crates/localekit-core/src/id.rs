// crates/localekit-core/src/id.rs
// ============================================================================
// Module: Locale Identifiers
// Description: Validated locale identifiers and their derived forms.
// Purpose: Reject malformed identifiers before they reach files or commands.
// Dependencies: regex, thiserror
// ============================================================================

//! ## Overview
//! A [`LocaleId`] is the only representation of a locale identifier accepted
//! by the provisioning pipeline. Construction validates the full
//! `language[_COUNTRY][.ENCODING][@modifier]` shape against a strict pattern;
//! values that do not match are rejected wholesale.
//!
//! Security posture: identifiers are interpolated into a system file and
//! matched against subprocess output, so validation here is the injection
//! barrier for the whole subsystem.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

// ============================================================================
// SECTION: Grammar
// ============================================================================

/// Strict locale identifier grammar.
///
/// Accepts `de`, `de_DE`, `de_DE.UTF-8`, `sr@latin`, and
/// `uz_UZ.UTF-8@cyrillic`; rejects everything containing shell or file
/// metacharacters.
const LOCALE_PATTERN: &str = r"^[a-z]{2,3}(_[A-Z]{2})?(\.[A-Za-z0-9-]+)?(@[a-z0-9]+)?$";

/// Compiled locale grammar, built once per process.
static LOCALE_REGEX: LazyLock<Regex> = LazyLock::new(compile_locale_pattern);

/// Compiles the locale grammar.
#[allow(clippy::expect_used, reason = "The pattern is a compile-time constant.")]
fn compile_locale_pattern() -> Regex {
    Regex::new(LOCALE_PATTERN).expect("locale pattern must compile")
}

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// Errors produced by locale identifier validation.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Identifier does not match the locale grammar.
    #[error("malformed locale identifier")]
    Malformed {
        /// The rejected input value.
        value: String,
    },
    /// Identifier is empty.
    #[error("empty locale identifier")]
    Empty,
}

// ============================================================================
// SECTION: Locale Identifier
// ============================================================================

/// A validated locale identifier.
///
/// # Invariants
/// - The inner string always matches the strict locale grammar.
/// - Construction through [`LocaleId::parse`] is the only path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocaleId(String);

impl LocaleId {
    /// Parses and validates a locale identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] for empty input and
    /// [`ValidationError::Malformed`] when the input does not match the
    /// locale grammar.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty);
        }
        if !LOCALE_REGEX.is_match(&value) {
            return Err(ValidationError::Malformed {
                value,
            });
        }
        Ok(Self(value))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the identifier with any `.ENCODING` segment removed.
    ///
    /// `uz_UZ.UTF-8@cyrillic` becomes `uz_UZ@cyrillic`.
    #[must_use]
    pub fn without_encoding(&self) -> String {
        match self.0.split_once('.') {
            Some((head, tail)) => match tail.split_once('@') {
                Some((_, modifier)) => format!("{head}@{modifier}"),
                None => head.to_string(),
            },
            None => self.0.clone(),
        }
    }

    /// Returns the encoding segment when one is present.
    #[must_use]
    pub fn encoding(&self) -> Option<&str> {
        let (_, tail) = self.0.split_once('.')?;
        Some(tail.split_once('@').map_or(tail, |(encoding, _)| encoding))
    }

    /// Returns the bare `language[_COUNTRY]` form used for package queries.
    ///
    /// Encoding and modifier segments are both stripped: `de_DE.UTF-8`
    /// becomes `de_DE`, `sr@latin` becomes `sr`.
    #[must_use]
    pub fn language_tag(&self) -> &str {
        let end = self.0.find(['.', '@']).unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<&str> for LocaleId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for LocaleId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
