#![allow(clippy::type_complexity)]
//! Lossless parser, tree, and editor for deb822 style files.
//!
//! This crate parses RFC822-style Debian control files while preserving
//! every byte of whitespace, comments, and field ordering. It is built on
//! the [rowan] library, the same lossless syntax-tree library the wider
//! Debian Rust tooling ecosystem uses.
//!
//! Once parsed, a file can be traversed, edited field-by-field or as typed
//! list interpretations, and written back out; unmodified regions of the
//! input are reproduced byte-for-byte.
//!
//! # Example
//!
//! ```rust
//! use deb822_lossless::FileElement;
//! use std::str::FromStr;
//!
//! let input = r#"Package: deb822-lossless
//! Maintainer: Jelmer Vernooĳ <jelmer@debian.org>
//! Homepage: https://github.com/jelmer/deb822-lossless
//! Section: rust
//!
//! Package: deb822-lossless
//! Architecture: any
//! "#;
//!
//! let file = FileElement::from_str(input).unwrap();
//! assert_eq!(file.iter_paragraphs().count(), 2);
//! let homepage = file.iter_paragraphs().next().unwrap().get("Homepage").unwrap();
//! assert_eq!(homepage.as_deref(), Some("https://github.com/jelmer/deb822-lossless"));
//! ```

mod common;
mod error;
mod field_name;
mod field_name_set;
mod lex;
mod linked_list;
mod list;
mod paragraph;
mod parser;
mod syntax_kind;
mod tree;
mod views;

pub use error::{Error, ParseError, Result};
pub use field_name::FieldName;
pub use field_name_set::FieldNameSet;
pub use list::{ListInterpretation, SeparatorKind};
pub use paragraph::{FieldComment, ParagraphVariant};
pub use tree::{
    CommentElement, ErrorElement, FileElement, KeyValuePairElement, ParagraphElement,
    ValueElement, ValueLineElement,
};
pub use views::{ConfiguredView, InterpretationKind, InterpretedView};

/// Parses a deb822 file from its lines, with explicit control over two
/// tolerance knobs (§6): whether stray unparsable lines (`ErrorElement`s)
/// are accepted, and whether a paragraph may repeat a field name.
///
/// Both knobs default to `true` for `FileElement::parse_relaxed`; this
/// entry point is for callers that want `FileElement::parse`'s strictness
/// without its all-or-nothing shape.
pub fn parse_file<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    accept_error_tokens: bool,
    accept_duplicated_fields: bool,
) -> Result<FileElement> {
    let text: String = lines.into_iter().collect();
    let file = FileElement::parse_relaxed(&text);
    if !accept_error_tokens {
        if let Some(err) = file.find_first_error_element() {
            return Err(Error::SyntaxError(err.text()));
        }
    }
    if !accept_duplicated_fields {
        for para in file.iter_paragraphs() {
            if let Some(name) = para.first_duplicate_field_name() {
                return Err(Error::DuplicatedField(name.to_string()));
            }
        }
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Scenario 1: minimal parse.
    #[test]
    fn test_scenario_minimal_parse() {
        let file = FileElement::parse("A: b\n").unwrap();
        assert_eq!(file.iter_paragraphs().count(), 1);
        let para = file.iter_paragraphs().next().unwrap();
        assert_eq!(para.get("A").unwrap().as_deref(), Some("b"));
        assert_eq!(file.dump(), "A: b\n");
    }

    // Scenario 2: comment preservation and field edit.
    #[test]
    fn test_scenario_comment_preservation_and_field_edit() {
        let input = "Package: foo\n# field comment\nSection: main/devel\nDepends: libfoo,\n# inline\n         libbar,\n";
        let file = FileElement::parse(input).unwrap();
        let para = file.iter_paragraphs().next().unwrap();
        para.set_field_to_simple_value("Section", "devel", FieldComment::PreserveOriginal)
            .unwrap();
        let expected = "Package: foo\n# field comment\nSection: devel\nDepends: libfoo,\n# inline\n         libbar,\n";
        assert_eq!(file.dump(), expected);
    }

    // Scenario 4: duplicate field tolerated.
    #[test]
    fn test_scenario_duplicate_field_tolerated() {
        let file = FileElement::parse("Package: foo\nPackage: bar\n").unwrap();
        let para = file.iter_paragraphs().next().unwrap();
        assert_eq!(para.variant(), ParagraphVariant::Invalid);
        let err = para.get("Package").unwrap_err();
        assert!(matches!(err, Error::AmbiguousFieldKey(_)));
        let second = para.get_kvpair_at("Package", 1).unwrap().unwrap();
        assert_eq!(second.value_text(), "bar");
    }

    // Scenario 5: simple-value rejects newline.
    #[test]
    fn test_scenario_simple_value_rejects_newline() {
        let file = FileElement::parse("Foo: bar\n").unwrap();
        let para = file.iter_paragraphs().next().unwrap();
        let before = file.dump();
        let err = para
            .set_field_to_simple_value("Foo", "bar\nbin", FieldComment::PreserveOriginal)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFieldSyntax(_)));
        assert_eq!(file.dump(), before);
    }

    // Scenario 6: raw value syntactic validation.
    #[test]
    fn test_scenario_raw_value_missing_continuation_whitespace() {
        let file = FileElement::parse("Build-Depends: a\n").unwrap();
        let para = file.iter_paragraphs().next().unwrap();
        let err = para
            .set_field_from_raw_string("Build-Depends", " a,\nb,\n", FieldComment::PreserveOriginal)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFieldSyntax(_)));
    }

    #[test]
    fn test_parse_file_default_options_accept_messy_input() {
        let file = parse_file(
            [" stray\n", "Package: foo\n", "Package: bar\n"],
            true,
            true,
        )
        .unwrap();
        assert_eq!(file.iter_paragraphs().count(), 1);
    }

    #[test]
    fn test_parse_file_rejects_error_tokens_when_disabled() {
        let err = parse_file([" stray\n", "Package: foo\n"], false, true).unwrap_err();
        assert!(matches!(err, Error::SyntaxError(_)));
    }

    #[test]
    fn test_parse_file_rejects_duplicated_fields_when_disabled() {
        let err = parse_file(["Package: foo\n", "Package: bar\n"], true, false).unwrap_err();
        assert!(matches!(err, Error::DuplicatedField(name) if name == "Package"));
    }
}
