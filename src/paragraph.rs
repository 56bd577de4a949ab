//! Paragraph representations (C7) and the field mutation API (C8).
//!
//! The canonical storage for a paragraph is always its rowan [`ParagraphElement`]
//! node: there is no separate cache of [`FieldNameSet`]/[`LinkedList`] state
//! that could drift out of sync with the tree after a splice. Instead
//! [`ParagraphElement::variant`] computes, on demand, which of the two
//! representations the spec describes currently applies:
//!
//! * `ParagraphVariant::Valid` — every field name is unique; lookups by bare
//!   name are unambiguous and an indexed lookup is a programmer error
//!   ([`Error::UnexpectedIndex`]).
//! * `ParagraphVariant::Invalid` — at least one field name repeats; a bare
//!   lookup on a repeated name is ambiguous ([`Error::AmbiguousFieldKey`])
//!   and callers must supply an index.
//!
//! Grounded on `original_source/.../parsing.py`'s `Deb822ParagraphElement`
//! (`from_kvpairs`'s `len(kvpair_order) == len(kvpair_elements)` dispatch)
//! and the teacher's `Paragraph` in `src/lossless.rs` (`get`/`insert`/
//! `remove`/`rename`, generalized here to duplicate-tolerant lookups and a
//! richer field-comment story).

use crate::error::{Error, Result};
use crate::field_name::FieldName;
use crate::field_name_set::FieldNameSet;
use crate::tree::{self, CommentElement, KeyValuePairElement, ParagraphElement};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphVariant {
    Valid,
    Invalid,
}

/// How to handle a field's comment when overwriting its value.
#[derive(Debug, Clone, Default)]
pub enum FieldComment {
    /// Keep whatever comment the field already had (the default).
    #[default]
    PreserveOriginal,
    /// Replace it with fresh comment lines (each rendered as `# <line>`).
    Lines(Vec<String>),
    /// Drop the field's comment entirely.
    None,
}

fn field_name_matches(kvp: &KeyValuePairElement, key: &str) -> bool {
    kvp.field_name().as_lowercase() == key.to_ascii_lowercase()
}

fn render_comment_lines(lines: &[String]) -> Result<String> {
    let mut text = String::new();
    for line in lines {
        if line.contains('\n') {
            return Err(Error::CommentNewlineForbidden);
        }
        if line.is_empty() {
            text.push_str("#\n");
        } else {
            text.push_str("# ");
            text.push_str(line);
            text.push('\n');
        }
    }
    Ok(text)
}

impl ParagraphElement {
    fn kvpairs(&self) -> impl Iterator<Item = KeyValuePairElement> + '_ {
        tree::children_of_kind(self.syntax(), crate::syntax_kind::SyntaxKind::KEY_VALUE_PAIR)
            .filter_map(KeyValuePairElement::cast)
    }

    pub fn len(&self) -> usize {
        self.kvpairs().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this paragraph currently has any repeated field name.
    pub fn variant(&self) -> ParagraphVariant {
        let mut seen = FieldNameSet::new();
        for kvp in self.kvpairs() {
            if !seen.append(kvp.field_name()) {
                return ParagraphVariant::Invalid;
            }
        }
        ParagraphVariant::Valid
    }

    /// The set of distinct field names, in first-occurrence document order.
    pub fn field_names(&self) -> FieldNameSet {
        self.kvpairs().map(|k| k.field_name()).collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.kvpairs().any(|k| field_name_matches(&k, key))
    }

    /// One `(name, value)` pair per key-value pair in document order,
    /// including repeats.
    pub fn items(&self) -> impl Iterator<Item = (FieldName, String)> + '_ {
        self.kvpairs().map(|k| (k.field_name(), k.value_text()))
    }

    fn matches(&self, key: &str) -> Vec<KeyValuePairElement> {
        self.kvpairs().filter(|k| field_name_matches(k, key)).collect()
    }

    /// Bare lookup. `Ok(None)` if absent, `Err(AmbiguousFieldKey)` if the
    /// name repeats in this paragraph.
    pub fn get_kvpair(&self, key: &str) -> Result<Option<KeyValuePairElement>> {
        let mut matches = self.matches(key);
        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches.remove(0))),
            _ => Err(Error::AmbiguousFieldKey(key.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_kvpair(key)?.map(|k| k.value_text()))
    }

    /// Indexed lookup, for use on an [`ParagraphVariant::Invalid`] paragraph
    /// only: using an index on a paragraph with no duplicate keys is a
    /// programmer error, not an absent-value condition.
    pub fn get_kvpair_at(&self, key: &str, index: usize) -> Result<Option<KeyValuePairElement>> {
        if self.variant() == ParagraphVariant::Valid {
            return Err(Error::UnexpectedIndex);
        }
        Ok(self.matches(key).into_iter().nth(index))
    }

    /// All occurrences of `key`, in document order.
    pub fn iter_all(&self, key: &str) -> impl Iterator<Item = KeyValuePairElement> + '_ {
        let key = key.to_ascii_lowercase();
        self.kvpairs()
            .filter(move |k| k.field_name().as_lowercase() == key)
    }

    fn resolve_comment_prefix(
        &self,
        existing: Option<&KeyValuePairElement>,
        comment: &FieldComment,
    ) -> Result<String> {
        match comment {
            FieldComment::PreserveOriginal => Ok(existing
                .and_then(KeyValuePairElement::field_comment)
                .map(|c: CommentElement| c.syntax().text().to_string())
                .unwrap_or_default()),
            FieldComment::Lines(lines) => render_comment_lines(lines),
            FieldComment::None => Ok(String::new()),
        }
    }

    /// Replaces (or inserts) a field's raw value text. `raw` is everything
    /// that follows the field's `:`, verbatim, including the mandatory
    /// trailing newline of its last line (§4.6's raw-string validation).
    pub fn set_field_from_raw_string(
        &self,
        key: &str,
        raw: &str,
        comment: FieldComment,
    ) -> Result<()> {
        validate_raw_value(raw)?;
        let existing = self.get_kvpair(key)?;
        let comment_text = self.resolve_comment_prefix(existing.as_ref(), &comment)?;
        let fragment = format!("{comment_text}{key}:{raw}");
        let new_kvp = tree::parse_kvpair_fragment(&fragment)?;

        match existing {
            Some(old) => {
                let idx = old.syntax().index();
                self.syntax()
                    .splice_children(idx..idx + 1, vec![new_kvp.syntax().clone().into()]);
            }
            None => {
                let count = self.syntax().children_with_tokens().count();
                self.syntax()
                    .splice_children(count..count, vec![new_kvp.syntax().clone().into()]);
            }
        }
        Ok(())
    }

    /// Sets a field to a single-line value with no embedded newline.
    pub fn set_field_to_simple_value(
        &self,
        key: &str,
        value: &str,
        comment: FieldComment,
    ) -> Result<()> {
        if value.contains('\n') {
            return Err(Error::InvalidFieldSyntax(
                "a simple value must not contain a newline".to_string(),
            ));
        }
        let raw = format!(" {value}\n");
        self.set_field_from_raw_string(key, &raw, comment)
    }

    /// Removes the single occurrence of `key`. Errors if `key` is absent or
    /// ambiguous; use [`Self::remove_field_at`] for a duplicate-tolerant
    /// paragraph.
    pub fn remove_field(&self, key: &str) -> Result<()> {
        let kvp = self
            .get_kvpair(key)?
            .ok_or_else(|| Error::FieldNotFound(key.to_string()))?;
        kvp.detach();
        Ok(())
    }

    pub fn remove_field_at(&self, key: &str, index: usize) -> Result<()> {
        let kvp = self
            .get_kvpair_at(key, index)?
            .ok_or_else(|| Error::FieldNotFound(key.to_string()))?;
        kvp.detach();
        Ok(())
    }

    /// Reorders the paragraph's fields in place, carrying each field's
    /// leading comment and any interleaved free comment/error runs along
    /// with it, the way the teacher's `Paragraph::wrap_and_sort` regroups
    /// entries around a fresh `GreenNodeBuilder` pass.
    pub fn sort_fields(&self, mut cmp: impl FnMut(&FieldName, &FieldName) -> Ordering) {
        // The paragraph's current last field may be the file's last line
        // with no trailing newline; if it moves away from the end during
        // this sort, its value would run straight into the following
        // field's name with nothing to separate them. Per §4.6, append the
        // missing newline before reordering.
        self.ensure_last_field_has_trailing_newline();

        // A PARAGRAPH node's only possible children are KEY_VALUE_PAIRs (a
        // free comment run never becomes part of one, see
        // `parser::parse_paragraph`), so reordering is a single splice over
        // the node's whole child range with no other element kind to carry
        // along.
        let mut pairs: Vec<KeyValuePairElement> = self.kvpairs().collect();
        pairs.sort_by(|a, b| cmp(&a.field_name(), &b.field_name()));
        let count = self.syntax().children_with_tokens().count();
        let elements: Vec<_> = pairs.into_iter().map(|k| k.syntax().clone().into()).collect();
        self.syntax().splice_children(0..count, elements);
    }

    /// The first field name that appears more than once, in document order,
    /// or `None` if all field names are unique. Used by `parse_file` to
    /// reject duplicated fields without needing the caller to already know
    /// which name repeats.
    pub fn first_duplicate_field_name(&self) -> Option<FieldName> {
        let mut seen = FieldNameSet::new();
        for kvp in self.kvpairs() {
            if !seen.append(kvp.field_name()) {
                return Some(kvp.field_name());
            }
        }
        None
    }

    fn ensure_last_field_has_trailing_newline(&self) {
        let Some(last) = self.kvpairs().last() else {
            return;
        };
        let value = last.value_element();
        let ends_in_newline = value.lines().last().map(|l| l.has_newline()).unwrap_or(true);
        if ends_in_newline {
            return;
        }
        let comment_text = last
            .field_comment()
            .map(|c| c.syntax().text().to_string())
            .unwrap_or_default();
        let raw_value = format!("{}\n", value.syntax().text());
        let field_name = last.field_name();
        let fragment = format!("{comment_text}{field_name}:{raw_value}");
        if let Ok(new_kvp) = tree::parse_kvpair_fragment(&fragment) {
            let idx = last.syntax().index();
            self.syntax()
                .splice_children(idx..idx + 1, vec![new_kvp.syntax().clone().into()]);
        }
    }
}

/// Raw-string validation (§4.6): every physical line after the first must
/// begin with `' '` (continuation) or `'#'` (comment); the text must end on
/// a newline; and the final line must not be a comment (a trailing comment
/// would otherwise be silently reattached as a free file-level comment
/// rather than staying with this field, see `parser::parse_file_body`).
fn validate_raw_value(raw: &str) -> Result<()> {
    if !raw.ends_with('\n') {
        return Err(Error::MissingTrailingNewline);
    }
    let lines: Vec<&str> = raw.split_inclusive('\n').collect();
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            continue;
        }
        let first = line.chars().next().unwrap_or('\n');
        if first != ' ' && first != '\t' && first != '#' {
            return Err(Error::InvalidFieldSyntax(format!(
                "continuation line must start with whitespace or '#': {line:?}"
            )));
        }
    }
    if let Some(last) = lines.last() {
        if last.trim_start().starts_with('#') {
            return Err(Error::InvalidFieldSyntax(
                "a field's raw value must not end on a comment line".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::FileElement;

    fn paragraph(text: &str) -> ParagraphElement {
        FileElement::parse(text)
            .unwrap()
            .iter_paragraphs()
            .next()
            .unwrap()
    }

    #[test]
    fn test_valid_paragraph_variant() {
        let p = paragraph("A: 1\nB: 2\n");
        assert_eq!(p.variant(), ParagraphVariant::Valid);
        assert_eq!(p.get("a").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_invalid_paragraph_variant_and_ambiguous_get() {
        let p = paragraph("A: 1\nA: 2\n");
        assert_eq!(p.variant(), ParagraphVariant::Invalid);
        assert!(matches!(p.get("A"), Err(Error::AmbiguousFieldKey(_))));
        assert_eq!(
            p.get_kvpair_at("A", 1).unwrap().unwrap().value_text(),
            "2"
        );
    }

    #[test]
    fn test_indexed_lookup_on_valid_paragraph_errors() {
        let p = paragraph("A: 1\n");
        assert!(matches!(
            p.get_kvpair_at("A", 0),
            Err(Error::UnexpectedIndex)
        ));
    }

    #[test]
    fn test_set_field_to_simple_value_rejects_newline() {
        let p = paragraph("A: 1\n");
        let err = p
            .set_field_to_simple_value("A", "x\ny", FieldComment::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFieldSyntax(_)));
    }

    #[test]
    fn test_set_field_preserves_comment_by_default() {
        let p = paragraph("# keep me\nA: 1\n");
        p.set_field_to_simple_value("A", "2", FieldComment::default())
            .unwrap();
        assert_eq!(p.syntax().text().to_string(), "# keep me\nA: 2\n");
    }

    #[test]
    fn test_set_field_inserts_new_field_at_end() {
        let p = paragraph("A: 1\n");
        p.set_field_to_simple_value("B", "2", FieldComment::None)
            .unwrap();
        assert_eq!(p.syntax().text().to_string(), "A: 1\nB: 2\n");
    }

    #[test]
    fn test_remove_field() {
        let p = paragraph("A: 1\nB: 2\n");
        p.remove_field("A").unwrap();
        assert_eq!(p.syntax().text().to_string(), "B: 2\n");
    }

    #[test]
    fn test_remove_field_missing_is_field_not_found() {
        let p = paragraph("A: 1\n");
        assert!(matches!(
            p.remove_field("Z"),
            Err(Error::FieldNotFound(_))
        ));
    }

    #[test]
    fn test_raw_value_rejects_comment_only_tail() {
        let p = paragraph("A: 1\n");
        let err = p
            .set_field_from_raw_string("A", " 1\n# trailing\n", FieldComment::None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFieldSyntax(_)));
    }

    #[test]
    fn test_sort_fields() {
        let p = paragraph("Z: 1\nA: 2\nM: 3\n");
        p.sort_fields(|a, b| a.as_lowercase().cmp(b.as_lowercase()));
        let names: Vec<_> = p.items().map(|(n, _)| n.as_str().to_string()).collect();
        assert_eq!(names, vec!["A", "M", "Z"]);
    }
}
