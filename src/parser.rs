//! Element-tree builder (C6): five logical passes —
//! comment runs → value-lines → values → key-value pairs → paragraphs —
//! folded into one recursive-descent traversal driving a single
//! [`rowan::GreenNodeBuilder`], the same shape as the teacher's hand-rolled
//! `Parser` in `lossless.rs`. A bounded one-token lookahead (never more
//! than the length of one comment run) decides each layer's boundary, so
//! no pass needs to materialize its own intermediate token stream.
//!
//! Grounded on `original_source/.../parsing.py`'s `parse_deb822_file`
//! (read in full) for the pipeline order and the comment-associativity
//! rule ("attached to a following `ValueContinuation` → inside the value
//! line; attached to a following `FieldName` → the field's comment;
//! otherwise free").

use crate::error::ParseError;
use crate::lex::lex;
use crate::syntax_kind::{GreenNodeBuilder, SyntaxKind, SyntaxNode};

struct Tokens<'a> {
    tokens: Vec<(SyntaxKind, &'a str)>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(tokens: Vec<(SyntaxKind, &'a str)>) -> Self {
        Tokens { tokens, pos: 0 }
    }

    fn peek_kind(&self) -> Option<SyntaxKind> {
        self.tokens.get(self.pos).map(|(k, _)| *k)
    }

    /// Peeks the kind of the first non-`COMMENT` token starting at the
    /// current position, i.e. what follows a run of comments.
    fn peek_kind_after_comments(&self) -> Option<SyntaxKind> {
        let mut i = self.pos;
        while let Some((k, _)) = self.tokens.get(i) {
            if *k != SyntaxKind::COMMENT {
                return Some(*k);
            }
            i += 1;
        }
        None
    }

    fn bump(&mut self, builder: &mut GreenNodeBuilder) {
        let (kind, text) = self.tokens[self.pos];
        builder.token(kind.into(), text);
        self.pos += 1;
    }

    fn bump_if(&mut self, builder: &mut GreenNodeBuilder, kind: SyntaxKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.bump(builder);
            true
        } else {
            false
        }
    }
}

pub struct Parse {
    pub(crate) green_node: rowan::GreenNode,
    pub errors: Vec<String>,
}

impl Parse {
    /// Builds a mutable red-tree view of this parse, the same way the
    /// teacher's `Deb822::cast(SyntaxNode::new_root_mut(...))` does: every
    /// tree produced by this crate supports in-place editing via
    /// `splice_children`/`detach`, since mutation always goes through a
    /// fresh re-parse-and-graft rather than hand-patching a green node.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root_mut(self.green_node.clone())
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn ok(self) -> Result<SyntaxNode, ParseError> {
        if self.errors.is_empty() {
            Ok(self.syntax())
        } else {
            Err(ParseError(self.errors))
        }
    }
}

pub fn parse(text: &str) -> Parse {
    let lexed = lex(text);
    let mut tokens = Tokens::new(lexed);
    let mut builder = GreenNodeBuilder::new();
    let mut errors = Vec::new();

    builder.start_node(SyntaxKind::FILE.into());
    parse_file_body(&mut tokens, &mut builder, &mut errors);
    builder.finish_node();

    Parse {
        green_node: builder.finish(),
        errors,
    }
}

fn parse_file_body(tokens: &mut Tokens, builder: &mut GreenNodeBuilder, errors: &mut Vec<String>) {
    loop {
        match tokens.peek_kind() {
            None => break,
            Some(SyntaxKind::WHITESPACE) => {
                tokens.bump(builder);
            }
            Some(SyntaxKind::ERROR) => {
                bump_error_run(tokens, builder);
            }
            Some(SyntaxKind::COMMENT) => {
                if tokens.peek_kind_after_comments() == Some(SyntaxKind::FIELD_NAME) {
                    parse_paragraph(tokens, builder, errors);
                } else {
                    bump_comment_run(tokens, builder);
                }
            }
            Some(SyntaxKind::FIELD_NAME) => {
                parse_paragraph(tokens, builder, errors);
            }
            Some(_) => {
                // Defensive: the lexer never emits a bare VALUE/SEPARATOR
                // token outside of a line sequence it also opened, but
                // guard against it rather than panic.
                bump_error_run(tokens, builder);
            }
        }
    }
}

fn bump_comment_run(tokens: &mut Tokens, builder: &mut GreenNodeBuilder) {
    builder.start_node(SyntaxKind::COMMENT_ELEMENT.into());
    while tokens.peek_kind() == Some(SyntaxKind::COMMENT) {
        tokens.bump(builder);
    }
    builder.finish_node();
}

fn bump_error_run(tokens: &mut Tokens, builder: &mut GreenNodeBuilder) {
    builder.start_node(SyntaxKind::ERROR_ELEMENT.into());
    while tokens.peek_kind() == Some(SyntaxKind::ERROR) {
        tokens.bump(builder);
    }
    builder.finish_node();
}

/// Consumes one paragraph: a run of key-value pairs (each optionally
/// preceded by a field-comment), stopping as soon as the next item is not
/// shaped like "(comments)? field-name".
fn parse_paragraph(tokens: &mut Tokens, builder: &mut GreenNodeBuilder, errors: &mut Vec<String>) {
    builder.start_node(SyntaxKind::PARAGRAPH.into());
    loop {
        let next_after_comments = tokens.peek_kind_after_comments();
        if next_after_comments != Some(SyntaxKind::FIELD_NAME) {
            break;
        }
        parse_kvpair(tokens, builder, errors);
    }
    builder.finish_node();
}

fn parse_kvpair(tokens: &mut Tokens, builder: &mut GreenNodeBuilder, errors: &mut Vec<String>) {
    builder.start_node(SyntaxKind::KEY_VALUE_PAIR.into());
    if tokens.peek_kind() == Some(SyntaxKind::COMMENT) {
        bump_comment_run(tokens, builder);
    }
    debug_assert_eq!(tokens.peek_kind(), Some(SyntaxKind::FIELD_NAME));
    tokens.bump(builder);

    if tokens.peek_kind() == Some(SyntaxKind::FIELD_SEPARATOR) {
        tokens.bump(builder);
        parse_value_element(tokens, builder);
    } else {
        // A field name not followed by its separator: the lexer's own
        // contract guarantees this cannot happen, but surface it as a
        // builder-level error rather than silently losing tokens.
        errors.push("field name not followed by ':'".to_string());
        builder.start_node(SyntaxKind::ERROR_ELEMENT.into());
        while !matches!(
            tokens.peek_kind(),
            None | Some(SyntaxKind::NEWLINE_AFTER_VALUE) | Some(SyntaxKind::FIELD_NAME)
        ) {
            tokens.bump(builder);
        }
        if tokens.peek_kind() == Some(SyntaxKind::NEWLINE_AFTER_VALUE) {
            tokens.bump(builder);
        }
        builder.finish_node();
    }
    builder.finish_node();
}

fn parse_value_element(tokens: &mut Tokens, builder: &mut GreenNodeBuilder) {
    builder.start_node(SyntaxKind::VALUE_ELEMENT.into());
    parse_value_line(tokens, builder, false);
    loop {
        let has_comment = tokens.peek_kind() == Some(SyntaxKind::COMMENT);
        let next_after_comments = tokens.peek_kind_after_comments();
        if next_after_comments != Some(SyntaxKind::VALUE_CONTINUATION) {
            break;
        }
        let _ = has_comment;
        parse_value_line(tokens, builder, true);
    }
    builder.finish_node();
}

fn parse_value_line(tokens: &mut Tokens, builder: &mut GreenNodeBuilder, is_continuation: bool) {
    builder.start_node(SyntaxKind::VALUE_LINE.into());
    if is_continuation {
        if tokens.peek_kind() == Some(SyntaxKind::COMMENT) {
            bump_comment_run(tokens, builder);
        }
        debug_assert_eq!(tokens.peek_kind(), Some(SyntaxKind::VALUE_CONTINUATION));
        tokens.bump(builder);
    }
    tokens.bump_if(builder, SyntaxKind::WHITESPACE);
    tokens.bump_if(builder, SyntaxKind::VALUE);
    tokens.bump_if(builder, SyntaxKind::WHITESPACE);
    tokens.bump_if(builder, SyntaxKind::NEWLINE_AFTER_VALUE);
    builder.finish_node();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(text: &str) -> String {
        let parsed = parse(text);
        format!("{:#?}", parsed.syntax())
    }

    #[test]
    fn test_parse_minimal() {
        let parsed = parse("A: b\n");
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.syntax().text().to_string(), "A: b\n");
    }

    #[test]
    fn test_parse_tree_shape() {
        let out = dump("A: b\n");
        assert!(out.contains("FILE"));
        assert!(out.contains("PARAGRAPH"));
        assert!(out.contains("KEY_VALUE_PAIR"));
        assert!(out.contains("VALUE_ELEMENT"));
        assert!(out.contains("VALUE_LINE"));
    }

    #[test]
    fn test_coverage_is_byte_exact() {
        let text = "Package: foo\n# field comment\nSection: main/devel\nDepends: libfoo,\n# inline\n         libbar,\n\nSource: bar\n";
        let parsed = parse(text);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.syntax().text().to_string(), text);
    }

    #[test]
    fn test_duplicate_field_parses_without_errors() {
        let text = "Package: foo\nPackage: bar\n";
        let parsed = parse(text);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.syntax().text().to_string(), text);
    }

    #[test]
    fn test_free_comment_between_paragraphs() {
        let text = "A: b\n\n# free\n\nC: d\n";
        let parsed = parse(text);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.syntax().text().to_string(), text);
    }

    #[test]
    fn test_stray_continuation_is_error_element() {
        let text = " stray\nA: b\n";
        let parsed = parse(text);
        assert_eq!(parsed.syntax().text().to_string(), text);
        assert!(format!("{:#?}", parsed.syntax()).contains("ERROR_ELEMENT"));
    }
}
