//! The token/node kind taxonomy (C4) shared by the lexer, the tree builder
//! and the typed AST wrappers.
//!
//! One flat enum backs both tokens (leaves) and composite elements (nodes)
//! the way rowan expects; the token-vs-node distinction lives in how a
//! kind is used by the [`crate::parser`] builder, not in the enum itself.

/// Let's start with defining all kinds of tokens and composite nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- tokens ---
    /// Generic insignificant whitespace, including a whole blank-line run.
    WHITESPACE = 0,
    /// The `"\n"` that ends a value line.
    NEWLINE_AFTER_VALUE,
    /// The single leading space that marks a continuation line.
    VALUE_CONTINUATION,
    /// An intra-value run of spaces in a whitespace-separated list.
    SPACE_SEPARATOR,
    /// A `#...` comment line, including its trailing newline.
    COMMENT,
    /// A line that did not parse as any recognized shape.
    ERROR,
    /// An interned, case-insensitive field name.
    FIELD_NAME,
    /// The `:` that separates a field name from its value.
    FIELD_SEPARATOR,
    /// `,` in a comma-separated list interpretation.
    COMMA,
    /// `|` (reserved for dependency-alternative fields).
    PIPE,
    /// A generic separator token (reserved for future interpretations).
    SEPARATOR,
    /// A maximal non-whitespace, non-separator run; or, in the default
    /// parser, the whole value-line body.
    VALUE,
    /// Reserved for future dependency-field work.
    VALUE_DEPENDENCY,
    /// Reserved for future dependency-field work.
    VALUE_DEPENDENCY_VERSION_RELATION_OPERATOR,

    // --- composite nodes ---
    /// The entire file.
    FILE,
    /// A deb822 paragraph.
    PARAGRAPH,
    /// A single key-value pair (field).
    KEY_VALUE_PAIR,
    /// The value of one field, spanning all of its value-lines.
    VALUE_ELEMENT,
    /// One physical line of a field value.
    VALUE_LINE,
    /// One or more consecutive comment tokens.
    COMMENT_ELEMENT,
    /// One or more consecutive error tokens, or out-of-place items bundled
    /// together.
    ERROR_ELEMENT,
}

impl SyntaxKind {
    pub(crate) fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::WHITESPACE | SyntaxKind::COMMENT)
    }
}

/// Convert our `SyntaxKind` into the rowan `SyntaxKind`.
impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The rowan [`rowan::Language`] for this crate's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {}

impl rowan::Language for Lang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR_ELEMENT as u16);
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<Lang>;
pub type SyntaxToken = rowan::SyntaxToken<Lang>;
pub type SyntaxElement = rowan::SyntaxElement<Lang>;
pub(crate) type GreenNodeBuilder<'a> = rowan::GreenNodeBuilder<'a>;
