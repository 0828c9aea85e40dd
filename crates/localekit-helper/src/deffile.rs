// crates/localekit-helper/src/deffile.rs
// ============================================================================
// Module: Definition File Model
// Description: Parsed form of the system locale-definition file.
// Purpose: Toggle locale declarations idempotently without touching prose.
// Dependencies: localekit-core
// ============================================================================

//! ## Overview
//! The locale-definition file is an ordered sequence of lines. Lines that
//! match the declaration grammar `#?<locale-id> <encoding>` become entries
//! that can be activated; every other line is carried through byte-for-byte.
//! Enabling only toggles the leading `#` or appends a new active
//! declaration; lines are never reordered or removed.
//!
//! Invariants:
//! - Unrecognized lines render exactly as they were read.
//! - Enabling the same identifier twice is a no-op the second time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use localekit_core::LocaleId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Encoding column used when an appended identifier carries no encoding.
const DEFAULT_ENCODING: &str = "UTF-8";

// ============================================================================
// SECTION: Line Model
// ============================================================================

/// One line of the definition file.
///
/// # Invariants
/// - `Entry.raw` is the exact text rendered for the line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DefinitionLine {
    /// A locale declaration, active or commented out.
    Entry {
        /// Exact line text as read or rewritten.
        raw: String,
        /// Declared locale identifier.
        id: LocaleId,
        /// Declared encoding column.
        encoding: String,
        /// Whether the declaration is active (no leading `#`).
        active: bool,
    },
    /// Any line that is not a locale declaration.
    Raw(String),
}

/// Result of enabling one identifier.
///
/// # Invariants
/// - Variants are stable for change accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableAction {
    /// The declaration was already active; nothing changed.
    AlreadyActive,
    /// A commented declaration was rewritten to its active form.
    Uncommented,
    /// No declaration existed; an active one was appended.
    Appended,
}

// ============================================================================
// SECTION: Definition File
// ============================================================================

/// Parsed, editable definition file.
///
/// # Invariants
/// - Line order is preserved across parse, edit, and render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionFile {
    /// Ordered file lines.
    lines: Vec<DefinitionLine>,
}

impl DefinitionFile {
    /// Parses file content into the line model.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.lines().map(parse_line).collect(),
        }
    }

    /// Enables one identifier, appending an active declaration when no
    /// matching line exists.
    ///
    /// A declaration matches when its identifier equals the request exactly
    /// or when both reduce to the same encoding-free form, so `de_DE`
    /// activates an existing `de_DE.UTF-8 UTF-8` line.
    pub fn enable(&mut self, id: &LocaleId) -> EnableAction {
        if let Some(index) = self.find_entry(id) {
            let DefinitionLine::Entry {
                raw,
                id: entry_id,
                encoding,
                active,
            } = &mut self.lines[index]
            else {
                return EnableAction::AlreadyActive;
            };
            if *active {
                return EnableAction::AlreadyActive;
            }
            *active = true;
            *raw = format!("{entry_id} {encoding}");
            return EnableAction::Uncommented;
        }
        let encoding = id.encoding().unwrap_or(DEFAULT_ENCODING).to_string();
        self.lines.push(DefinitionLine::Entry {
            raw: format!("{id} {encoding}"),
            id: id.clone(),
            encoding,
            active: true,
        });
        EnableAction::Appended
    }

    /// Returns true when an active declaration for the identifier exists.
    #[must_use]
    pub fn is_active(&self, id: &LocaleId) -> bool {
        self.find_entry(id).is_some_and(|index| {
            matches!(
                &self.lines[index],
                DefinitionLine::Entry {
                    active: true,
                    ..
                }
            )
        })
    }

    /// Renders the file back to text with a trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();
        for line in &self.lines {
            match line {
                DefinitionLine::Entry {
                    raw, ..
                } => output.push_str(raw),
                DefinitionLine::Raw(raw) => output.push_str(raw),
            }
            output.push('\n');
        }
        output
    }

    /// Finds the declaration matching the identifier.
    ///
    /// Exact identifier matches win; otherwise the first declaration with
    /// the same encoding-free form is used.
    fn find_entry(&self, id: &LocaleId) -> Option<usize> {
        let exact = self.lines.iter().position(|line| {
            matches!(line, DefinitionLine::Entry { id: entry_id, .. } if entry_id == id)
        });
        if exact.is_some() {
            return exact;
        }
        let wanted = id.without_encoding();
        self.lines.iter().position(|line| {
            matches!(
                line,
                DefinitionLine::Entry { id: entry_id, .. }
                    if entry_id.without_encoding() == wanted
            )
        })
    }
}

// ============================================================================
// SECTION: Line Parsing
// ============================================================================

/// Parses one line, falling back to raw passthrough.
fn parse_line(line: &str) -> DefinitionLine {
    let trimmed = line.trim();
    let (active, body) = trimmed
        .strip_prefix('#')
        .map_or((true, trimmed), |rest| (false, rest.trim_start()));
    let mut tokens = body.split_whitespace();
    let (Some(first), Some(second), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return DefinitionLine::Raw(line.to_string());
    };
    let Ok(id) = LocaleId::parse(first) else {
        return DefinitionLine::Raw(line.to_string());
    };
    if !is_encoding_token(second) {
        return DefinitionLine::Raw(line.to_string());
    }
    DefinitionLine::Entry {
        raw: line.to_string(),
        id,
        encoding: second.to_string(),
        active,
    }
}

/// Returns true for plausible encoding column tokens such as `UTF-8`.
fn is_encoding_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
