//! Typed AST wrappers (C4 elements) over the raw rowan [`SyntaxNode`]/
//! [`SyntaxToken`], following the teacher's `ast_node!` pattern in
//! `src/lossless.rs` and `debian-control/src/lossless/relations.rs`.

use crate::error::{Error, ParseError, Result};
use crate::field_name::FieldName;
use crate::parser;
use crate::syntax_kind::{GreenNodeBuilder, SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($ast:ident, $kind:ident) => {
        #[repr(transparent)]
        pub struct $ast(pub(crate) SyntaxNode);

        impl $ast {
            #[allow(unused)]
            pub(crate) fn cast(node: SyntaxNode) -> Option<Self> {
                if node.kind() == SyntaxKind::$kind {
                    Some(Self(node))
                } else {
                    None
                }
            }

            pub fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }

        impl Clone for $ast {
            fn clone(&self) -> Self {
                Self(self.0.clone())
            }
        }

        impl PartialEq for $ast {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl Eq for $ast {}

        impl std::fmt::Display for $ast {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.text())
            }
        }

        impl std::fmt::Debug for $ast {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($ast)).field(&self.0).finish()
            }
        }
    };
}

ast_node!(FileElement, FILE);
ast_node!(ParagraphElement, PARAGRAPH);
ast_node!(CommentElement, COMMENT_ELEMENT);
ast_node!(ValueElement, VALUE_ELEMENT);
ast_node!(ValueLineElement, VALUE_LINE);
ast_node!(KeyValuePairElement, KEY_VALUE_PAIR);
ast_node!(ErrorElement, ERROR_ELEMENT);

pub(crate) fn children_of_kind(
    node: &SyntaxNode,
    kind: SyntaxKind,
) -> impl Iterator<Item = SyntaxNode> + '_ {
    node.children().filter(move |n| n.kind() == kind)
}

pub(crate) fn tokens_of_kind(
    node: &SyntaxNode,
    kind: SyntaxKind,
) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(move |t| t.kind() == kind)
}

impl ParagraphElement {
    /// Builds a new, empty, mutable paragraph node.
    pub(crate) fn new() -> Self {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(SyntaxKind::PARAGRAPH.into());
        builder.finish_node();
        ParagraphElement(SyntaxNode::new_root_mut(builder.finish()))
    }

    /// Detaches this paragraph from its parent file.
    pub fn detach(&self) {
        self.0.detach();
    }
}

impl CommentElement {
    /// The comment text, one line per comment token, each including its
    /// trailing newline verbatim.
    pub fn lines(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens_of_kind(&self.0, SyntaxKind::COMMENT)
    }
}

impl ValueLineElement {
    pub fn comment(&self) -> Option<CommentElement> {
        children_of_kind(&self.0, SyntaxKind::COMMENT_ELEMENT)
            .next()
            .and_then(CommentElement::cast)
    }

    pub fn is_continuation(&self) -> bool {
        tokens_of_kind(&self.0, SyntaxKind::VALUE_CONTINUATION)
            .next()
            .is_some()
    }

    /// The value-body text of this line (without surrounding whitespace,
    /// the leading continuation marker, or the trailing newline).
    pub fn value_text(&self) -> String {
        tokens_of_kind(&self.0, SyntaxKind::VALUE)
            .map(|t| t.text().to_string())
            .collect()
    }

    pub fn has_newline(&self) -> bool {
        tokens_of_kind(&self.0, SyntaxKind::NEWLINE_AFTER_VALUE)
            .next()
            .is_some()
    }

    /// The raw post-marker content of this line: its leading whitespace run,
    /// its value body, and its trailing whitespace run, concatenated in
    /// document order (continuation marker and trailing newline excluded).
    /// List interpretations (§4.9) re-tokenize this text.
    pub fn content_text(&self) -> String {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| matches!(t.kind(), SyntaxKind::WHITESPACE | SyntaxKind::VALUE))
            .map(|t| t.text().to_string())
            .collect()
    }
}

impl ValueElement {
    pub fn lines(&self) -> impl Iterator<Item = ValueLineElement> + '_ {
        children_of_kind(&self.0, SyntaxKind::VALUE_LINE).filter_map(ValueLineElement::cast)
    }

    /// The semantic value: every line's value-body text joined with `'\n'`,
    /// matching what a caller reading the field would expect (no leading
    /// whitespace, no inline comments, no continuation markers).
    pub fn text(&self) -> String {
        self.lines()
            .map(|l| l.value_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl KeyValuePairElement {
    pub fn field_comment(&self) -> Option<CommentElement> {
        children_of_kind(&self.0, SyntaxKind::COMMENT_ELEMENT)
            .next()
            .and_then(CommentElement::cast)
    }

    pub fn field_name_token(&self) -> SyntaxToken {
        tokens_of_kind(&self.0, SyntaxKind::FIELD_NAME)
            .next()
            .expect("key-value pair always has a field name")
    }

    pub fn field_name(&self) -> FieldName {
        FieldName::new(self.field_name_token().text().to_string())
    }

    pub fn value_element(&self) -> ValueElement {
        children_of_kind(&self.0, SyntaxKind::VALUE_ELEMENT)
            .next()
            .and_then(ValueElement::cast)
            .expect("key-value pair always has a value element")
    }

    pub fn value_text(&self) -> String {
        self.value_element().text()
    }

    /// Detaches this key-value pair from its parent paragraph.
    pub fn detach(&self) {
        self.0.detach();
    }
}

impl ErrorElement {
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

impl FileElement {
    pub fn parse(text: &str) -> std::result::Result<FileElement, ParseError> {
        let parsed = parser::parse(text);
        let node = parsed.ok()?;
        Ok(FileElement(node))
    }

    /// Parses without rejecting error elements; always succeeds as far as
    /// the tokenizer/builder are concerned (§7's recoverable path).
    pub fn parse_relaxed(text: &str) -> FileElement {
        FileElement(parser::parse(text).syntax())
    }

    pub fn iter_paragraphs(&self) -> impl Iterator<Item = ParagraphElement> + '_ {
        children_of_kind(&self.0, SyntaxKind::PARAGRAPH).filter_map(ParagraphElement::cast)
    }

    /// Appends a new, initially empty paragraph at the end of the file,
    /// separated from a preceding paragraph by one blank line, matching the
    /// teacher's `Deb822::add_paragraph`.
    pub fn add_paragraph(&self) -> ParagraphElement {
        let paragraph = ParagraphElement::new();
        let mut to_insert = Vec::new();
        if self.0.children_with_tokens().count() > 0 {
            let mut builder = GreenNodeBuilder::new();
            builder.start_node(SyntaxKind::FILE.into());
            builder.token(SyntaxKind::WHITESPACE.into(), "\n");
            builder.finish_node();
            let separator = SyntaxNode::new_root_mut(builder.finish())
                .first_token()
                .expect("just built one token");
            to_insert.push(rowan::NodeOrToken::Token(separator));
        }
        to_insert.push(rowan::NodeOrToken::Node(paragraph.0.clone()));
        let count = self.0.children_with_tokens().count();
        self.0.splice_children(count..count, to_insert);
        paragraph
    }

    pub fn iter_tokens(&self) -> impl Iterator<Item = SyntaxToken> {
        self.0
            .descendants_with_tokens()
            .filter_map(|it| it.into_token())
    }

    pub fn dump(&self) -> String {
        self.0.text().to_string()
    }

    pub fn find_first_error_element(&self) -> Option<ErrorElement> {
        self.0
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ERROR_ELEMENT)
            .and_then(ErrorElement::cast)
    }

    pub fn is_valid_file(&self) -> bool {
        self.find_first_error_element().is_none()
    }
}

impl std::str::FromStr for FileElement {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FileElement::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FileElement {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.dump())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FileElement {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Builds a minimal `KEY_VALUE_PAIR` fragment by parsing `"name:value"`
/// text through the normal pipeline, matching the re-parse-on-edit design
/// (§4.5/§9): mutation never hand-patches nodes, it re-derives them.
pub(crate) fn parse_kvpair_fragment(raw_field_text: &str) -> Result<KeyValuePairElement> {
    let parsed = parser::parse(raw_field_text);
    if !parsed.errors.is_empty() {
        return Err(Error::InvalidFieldSyntax(parsed.errors.join("; ")));
    }
    let root = parsed.syntax();
    let first_error = root
        .descendants()
        .find(|n| n.kind() == SyntaxKind::ERROR_ELEMENT);
    if let Some(err) = first_error {
        return Err(Error::InvalidFieldSyntax(err.text().to_string()));
    }
    let paragraph = root
        .children()
        .find(|n| n.kind() == SyntaxKind::PARAGRAPH)
        .ok_or_else(|| Error::InvalidFieldSyntax(raw_field_text.to_string()))?;
    let kvpair = paragraph
        .children()
        .find(|n| n.kind() == SyntaxKind::KEY_VALUE_PAIR)
        .and_then(KeyValuePairElement::cast)
        .ok_or_else(|| Error::InvalidFieldSyntax(raw_field_text.to_string()))?;
    Ok(kvpair)
}
