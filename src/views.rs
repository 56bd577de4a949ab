//! Dict-like wrapper views over a paragraph (§4.10/§6).
//!
//! Grounded on `original_source/.../parsing.py`'s `Deb822ParagraphElement.
//! configured_view`/`as_interpreted_dict_view`: both wrappers are thin,
//! stateless-beyond-their-knobs borrows over a [`ParagraphElement`], so
//! several differently configured views can coexist over one paragraph.

use crate::error::{Error, Result};
use crate::list::ListInterpretation;
use crate::paragraph::{FieldComment, ParagraphElement};

/// A dict-like view over a paragraph's fields as plain strings, with five
/// independent knobs controlling how much of the raw value syntax is
/// normalized away on read and re-added on write. All knobs default to
/// `true`.
#[derive(Debug, Clone)]
pub struct ConfiguredView<'a> {
    paragraph: &'a ParagraphElement,
    pub discard_comments_on_read: bool,
    pub auto_map_initial_line_whitespace: bool,
    pub auto_resolve_ambiguous_fields: bool,
    pub preserve_field_comments_on_field_updates: bool,
    pub auto_map_final_newline_in_multiline_values: bool,
}

impl<'a> ConfiguredView<'a> {
    pub fn new(paragraph: &'a ParagraphElement) -> Self {
        ConfiguredView {
            paragraph,
            discard_comments_on_read: true,
            auto_map_initial_line_whitespace: true,
            auto_resolve_ambiguous_fields: true,
            preserve_field_comments_on_field_updates: true,
            auto_map_final_newline_in_multiline_values: true,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.paragraph.contains_key(key)
    }

    fn kvpair_for_read(&self, key: &str) -> Result<Option<crate::tree::KeyValuePairElement>> {
        if self.auto_resolve_ambiguous_fields {
            match self.paragraph.get_kvpair(key) {
                Ok(v) => Ok(v),
                Err(Error::AmbiguousFieldKey(_)) => self.paragraph.get_kvpair_at(key, 0),
                Err(e) => Err(e),
            }
        } else {
            self.paragraph.get_kvpair(key)
        }
    }

    /// Reads a field's value, normalized per this view's knobs.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let Some(kvp) = self.kvpair_for_read(key)? else {
            return Ok(None);
        };
        // With both knobs off, fall through to the raw post-colon syntax
        // (original per-line whitespace and any embedded comments intact),
        // matching the ground truth's `convert_to_text()` fallback; with
        // either on, `ValueElement::text()` already strips per-line leading
        // whitespace and inline comments, so there is no separate knob for
        // each half of that normalization.
        let raw = if !self.discard_comments_on_read && !self.auto_map_initial_line_whitespace {
            kvp.value_element().syntax().text().to_string()
        } else {
            kvp.value_text()
        };
        let value = if self.auto_map_final_newline_in_multiline_values {
            raw.trim_end_matches('\n').to_string()
        } else {
            raw
        };
        Ok(Some(value))
    }

    /// Sets a field's value. With `auto_map_initial_line_whitespace` on, `value`
    /// is a bare value with no leading space/trailing newline convention and
    /// this view adds it; with it off, `value` must already carry the raw
    /// field-value syntax (leading space after `:`, trailing newline on
    /// every line) and an improperly shaped value is rejected with
    /// [`Error::InvalidFieldSyntax`].
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let comment = if self.preserve_field_comments_on_field_updates {
            FieldComment::PreserveOriginal
        } else {
            FieldComment::None
        };
        let raw = if self.auto_map_initial_line_whitespace {
            if value.contains('\n') {
                let mut raw = String::new();
                for line in value.split('\n') {
                    raw.push(' ');
                    raw.push_str(line);
                    raw.push('\n');
                }
                raw
            } else {
                format!(" {value}\n")
            }
        } else {
            if !value.starts_with(' ') || !value.ends_with('\n') {
                return Err(Error::InvalidFieldSyntax(
                    "raw value must start with a space and end with a newline when \
                     auto_map_initial_line_whitespace is disabled"
                        .to_string(),
                ));
            }
            value.to_string()
        };
        self.paragraph.set_field_from_raw_string(key, &raw, comment)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.paragraph.remove_field(key)
    }
}

/// A dict-like view over a paragraph's fields as list interpretations.
#[derive(Debug, Clone, Copy)]
pub enum InterpretationKind {
    Whitespace,
    Comma,
}

pub struct InterpretedView<'a> {
    paragraph: &'a ParagraphElement,
    kind: InterpretationKind,
}

impl<'a> InterpretedView<'a> {
    pub fn new(paragraph: &'a ParagraphElement, kind: InterpretationKind) -> Self {
        InterpretedView { paragraph, kind }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.paragraph.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Result<Option<ListInterpretation>> {
        let Some(kvp) = self.paragraph.get_kvpair(key)? else {
            return Ok(None);
        };
        Ok(Some(match self.kind {
            InterpretationKind::Whitespace => ListInterpretation::whitespace_list(kvp),
            InterpretationKind::Comma => ListInterpretation::comma_list(kvp),
        }))
    }

    /// Replaces the field's values wholesale, creating the field if absent.
    pub fn set<'v>(&self, key: &str, values: impl IntoIterator<Item = &'v str>) -> Result<()> {
        if !self.paragraph.contains_key(key) {
            self.paragraph
                .set_field_from_raw_string(key, "\n", FieldComment::None)?;
        }
        let kvp = self
            .paragraph
            .get_kvpair(key)?
            .ok_or_else(|| Error::FieldNotFound(key.to_string()))?;
        let list = match self.kind {
            InterpretationKind::Whitespace => ListInterpretation::whitespace_list(kvp),
            InterpretationKind::Comma => ListInterpretation::comma_list(kvp),
        };
        list.set_values(values)?;
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::FileElement;

    fn first_paragraph(text: &str) -> ParagraphElement {
        FileElement::parse(text).unwrap().iter_paragraphs().next().unwrap()
    }

    #[test]
    fn test_configured_view_get_trims_defaults() {
        let para = first_paragraph("Foo: bar\n");
        let view = ConfiguredView::new(&para);
        assert_eq!(view.get("Foo").unwrap().as_deref(), Some("bar"));
    }

    #[test]
    fn test_configured_view_set_bare_value() {
        let para = first_paragraph("Foo: bar\n");
        let view = ConfiguredView::new(&para);
        view.set("Foo", "baz").unwrap();
        assert_eq!(view.get("Foo").unwrap().as_deref(), Some("baz"));
    }

    #[test]
    fn test_configured_view_set_rejects_malformed_raw_when_auto_map_disabled() {
        let para = first_paragraph("Foo: bar\n");
        let mut view = ConfiguredView::new(&para);
        view.auto_map_initial_line_whitespace = false;
        let err = view.set("Foo", "baz").unwrap_err();
        assert!(matches!(err, Error::InvalidFieldSyntax(_)));
    }

    #[test]
    fn test_configured_view_auto_resolve_ambiguous() {
        let para = first_paragraph("Package: foo\nPackage: bar\n");
        let view = ConfiguredView::new(&para);
        assert_eq!(view.get("Package").unwrap().as_deref(), Some("foo"));
    }

    #[test]
    fn test_configured_view_raw_fallback_keeps_comments_and_whitespace() {
        let para = first_paragraph("Depends: a,\n# inline\n   b,\n");
        let mut view = ConfiguredView::new(&para);
        view.discard_comments_on_read = false;
        view.auto_map_initial_line_whitespace = false;
        view.auto_map_final_newline_in_multiline_values = false;
        assert_eq!(
            view.get("Depends").unwrap().as_deref(),
            Some(" a,\n# inline\n   b,\n")
        );
    }

    #[test]
    fn test_interpreted_view_returns_list() {
        let para = first_paragraph("Architecture: amd64 arm64\n");
        let view = InterpretedView::new(&para, InterpretationKind::Whitespace);
        let list = view.get("Architecture").unwrap().unwrap();
        assert_eq!(list.values(), vec!["amd64", "arm64"]);
    }
}
