//! Error surface (§6/§7): one hand-rolled enum, no `thiserror`/`anyhow`,
//! matching the teacher crate's own `ParseError` in `lossless.rs`.

use std::fmt;

/// Diagnostics accumulated while building a tree; never panics, always
/// surfaced as an `ErrorElement` plus, at the boundary, as this type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseError(pub(crate) Vec<String>);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in &self.0 {
            writeln!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Errors returned from the core (§6). Nothing here is raised except as a
/// plain `Result` value; the tree is left unchanged whenever one of these
/// is returned from a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `parse_file` was called with `accept_error_tokens = false` and an
    /// `ErrorElement` was encountered; carries its text.
    SyntaxError(String),
    /// `parse_file` was called with `accept_duplicated_fields = false` and
    /// a paragraph had a repeated field name.
    DuplicatedField(String),
    /// A raw value string fed to `set_field_from_raw_string` (or produced
    /// internally by a list-interpretation commit) failed to parse cleanly.
    InvalidFieldSyntax(String),
    /// A bare key lookup on an `InvalidParagraph` matched more than one
    /// field and no index was given, with auto-resolve disabled.
    AmbiguousFieldKey(String),
    /// An index was supplied for a key lookup on a `ValidParagraph`.
    UnexpectedIndex,
    /// The requested field does not exist in the paragraph.
    FieldNotFound(String),
    /// `remove` was called on a list interpretation with a value not
    /// present in the list.
    ValueNotInList(String),
    /// A comment string passed to a comment-producing API contained an
    /// embedded newline.
    CommentNewlineForbidden,
    /// A raw value was expected to end with a trailing newline and did not.
    MissingTrailingNewline,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SyntaxError(s) => write!(f, "syntax error: {}", s),
            Error::DuplicatedField(name) => write!(f, "duplicated field: {}", name),
            Error::InvalidFieldSyntax(s) => write!(f, "invalid field syntax: {}", s),
            Error::AmbiguousFieldKey(name) => {
                write!(f, "ambiguous field key (multiple occurrences): {}", name)
            }
            Error::UnexpectedIndex => {
                write!(f, "an index was given for a key lookup on a unique-key paragraph")
            }
            Error::FieldNotFound(name) => write!(f, "field not found: {}", name),
            Error::ValueNotInList(v) => write!(f, "value not in list: {}", v),
            Error::CommentNewlineForbidden => write!(f, "comment text must not contain a newline"),
            Error::MissingTrailingNewline => write!(f, "value is missing its trailing newline"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
